//! # Login State
//!
//! Drives the sign-in form.

use kasir_core::{LoginResponse, ResourceState};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

use super::resource::ResourceCell;
use crate::api::AuthApi;

/// Sign-in form state.
#[derive(Debug)]
pub struct LoginState<A> {
    auth: Arc<A>,
    login: ResourceCell<LoginResponse>,
}

impl<A: AuthApi> LoginState<A> {
    pub fn new(auth: Arc<A>) -> Self {
        LoginState {
            auth,
            login: ResourceCell::new("login"),
        }
    }

    /// Observable login state.
    pub fn state(&self) -> watch::Receiver<ResourceState<LoginResponse>> {
        self.login.subscribe()
    }

    pub fn current(&self) -> ResourceState<LoginResponse> {
        self.login.current()
    }

    /// Signs in. Publishes `Loading` immediately.
    pub fn login<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> impl Future<Output = ()> + Send + 'a {
        let ticket = self.login.begin();
        async move {
            let result = self.auth.login(email, password).await;
            self.login.finish(ticket, result);
        }
    }

    /// Signs out and returns the form to idle.
    pub fn logout(&self) {
        if let Err(e) = self.auth.logout() {
            warn!(error = %e, "Failed to clear session on logout");
        }
        self.login.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::FakeAuth;

    #[tokio::test]
    async fn test_login_success() {
        let state = LoginState::new(Arc::new(FakeAuth::default()));
        let rx = state.state();

        let pending = state.login("sari@toko.id", FakeAuth::PASSWORD);
        assert!(rx.borrow().is_loading());
        pending.await;

        let current = state.current();
        assert!(current.is_success());
        assert_eq!(current.data().unwrap().display_name(), "sari");
    }

    #[tokio::test]
    async fn test_login_failure_message() {
        let state = LoginState::new(Arc::new(FakeAuth::default()));
        state.login("sari@toko.id", "salah").await;
        assert_eq!(
            state.current().error_message(),
            Some("Invalid email or password")
        );
    }

    #[tokio::test]
    async fn test_logout_resets() {
        let auth = Arc::new(FakeAuth::default());
        let state = LoginState::new(auth.clone());
        state.login("sari@toko.id", FakeAuth::PASSWORD).await;

        state.logout();
        assert!(state.current().is_idle());
        assert_eq!(auth.logouts(), 1);
    }
}

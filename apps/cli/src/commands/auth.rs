//! `login`, `logout` and `whoami`.

use anyhow::Context as _;
use tracing::info;

use kasir_core::claims;

use super::{settled, Context};

pub async fn login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    let state = ctx.clients.login_state();
    state.login(email, password).await;

    let response = settled(state.current())?;
    info!(user_id = %response.user_id, "Signed in");
    println!("Signed in as {} ({})", response.display_name(), response.user_id);
    Ok(())
}

pub fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.clients.tokens.clear().context("failed to clear the session")?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> anyhow::Result<()> {
    let token = ctx.clients.tokens.require()?;
    let user_id = claims::user_id(&token).context("session token carries no user id")?;

    println!("{user_id}");
    match claims::expires_at(&token) {
        Some(exp) => println!("session expires at {exp} (unix time)"),
        None => println!("session does not expire"),
    }
    println!("server: {}", ctx.config.api.base_url);
    Ok(())
}

//! # Domain Types
//!
//! Wire and domain types shared by the cashier client.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │ CreatedProduct  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  userId         │   │  id             │       │
//! │  │  name, price    │──►│  name, price    │──►│  createdAt      │       │
//! │  │  size, type     │   │  size, type     │   │  message        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   GET products/         POST products/        response                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  LoginRequest   │──►│  LoginResponse  │   │  ErrorResponse  │       │
//! │  │  email,password │   │  token, userId  │   │  error          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   POST users/login                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All wire names are camelCase to match the REST backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog, as returned by the backend.
///
/// Immutable once fetched. Cart lines copy what they need into a
/// [`ProductSnapshot`](crate::cart::ProductSnapshot) instead of holding this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Backend identifier.
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: Money,

    /// Free-text description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Size label (`PLASTIC`, `MEDIUM`, `JUMBO`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,

    /// Type label (`DRINK`, `FOOD`, ...).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub product_type: String,

    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,

    /// Creation time as sent by the backend. See [`Product::created_at_utc`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,

    /// User id of the creator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: String,

    /// User id of the last editor, if it was ever edited.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl Product {
    /// Creates a product with empty labels and timestamps.
    ///
    /// Handy for fixtures and for callers that only care about id, name and
    /// price (the cart does not look at anything else).
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            description: String::new(),
            size: String::new(),
            product_type: String::new(),
            image: None,
            created_at: String::new(),
            updated_at: String::new(),
            created_by: String::new(),
            updated_by: None,
        }
    }

    /// Sets the size label.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Sets the type label.
    pub fn with_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// Parsed creation time, `None` when absent or unreadable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Parsed last-update time, `None` when absent or unreadable.
    pub fn updated_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.updated_at)
    }
}

/// Reads RFC 3339, or a zone-less `YYYY-MM-DD[T ]HH:MM:SS[.fff]` taken as UTC.
///
/// ```rust
/// use kasir_core::types::parse_timestamp;
///
/// assert!(parse_timestamp("2024-05-01T08:00:00+07:00").is_some());
/// assert!(parse_timestamp("2024-05-01 08:00:00").is_some());
/// assert!(parse_timestamp("kemarin").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Product Type & Size
// =============================================================================

/// Product categories offered by the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ProductType {
    Drink,
    Food,
}

impl ProductType {
    /// All selectable values, in form order.
    pub const ALL: [ProductType; 2] = [ProductType::Drink, ProductType::Food];

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Drink => "DRINK",
            ProductType::Food => "FOOD",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DRINK" => Ok(ProductType::Drink),
            "FOOD" => Ok(ProductType::Food),
            other => Err(ValidationError::InvalidFormat {
                field: "type".to_string(),
                reason: format!("'{}' is not one of DRINK, FOOD", other),
            }),
        }
    }
}

/// Product sizes offered by the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ProductSize {
    Plastic,
    Medium,
    Jumbo,
}

impl ProductSize {
    /// All selectable values, in form order.
    pub const ALL: [ProductSize; 3] = [ProductSize::Plastic, ProductSize::Medium, ProductSize::Jumbo];

    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductSize::Plastic => "PLASTIC",
            ProductSize::Medium => "MEDIUM",
            ProductSize::Jumbo => "JUMBO",
        }
    }
}

impl fmt::Display for ProductSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PLASTIC" => Ok(ProductSize::Plastic),
            "MEDIUM" => Ok(ProductSize::Medium),
            "JUMBO" => Ok(ProductSize::Jumbo),
            other => Err(ValidationError::InvalidFormat {
                field: "size".to_string(),
                reason: format!("'{}' is not one of PLASTIC, MEDIUM, JUMBO", other),
            }),
        }
    }
}

// =============================================================================
// Product Creation
// =============================================================================

/// Request body for `POST products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    /// Creator, taken from the `userId` claim of the session token.
    pub user_id: String,
    pub name: String,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub size: ProductSize,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Response body for `POST products/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreatedProduct {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// =============================================================================
// Authentication
// =============================================================================

/// Request body for `POST users/login`.
///
/// `Debug` is implemented by hand so the password never reaches a log line.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Response body for a successful login.
#[derive(Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub token: String,
}

impl LoginResponse {
    /// "First Last", trimmed when either part is missing.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("message", &self.message)
            .field("user_id", &self.user_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Error body returned by the backend on a failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_backend_json() {
        let json = r#"{
            "id": "a1",
            "name": "Es Teh",
            "price": 5000,
            "description": "Sweet iced tea",
            "createdAt": "2024-05-01T08:00:00Z",
            "updatedAt": "2024-05-02T09:30:00Z",
            "createdBy": "u-1",
            "updatedBy": null,
            "size": "JUMBO",
            "type": "DRINK",
            "image": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "a1");
        assert_eq!(product.price, Money::from_units(5_000));
        assert_eq!(product.product_type, "DRINK");
        assert_eq!(product.size, "JUMBO");
        assert!(product.image.is_none());
        assert!(product.updated_by.is_none());
    }

    #[test]
    fn test_product_tolerates_null_fields() {
        let json = r#"{
            "id": "a2",
            "name": "Roti Bakar",
            "price": 12000,
            "description": null,
            "createdAt": null,
            "updatedAt": null,
            "createdBy": null,
            "size": null,
            "type": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.created_by, "");
        assert_eq!(product.size, "");
        assert_eq!(product.product_type, "");
        assert!(product.created_at_utc().is_none());
    }

    #[test]
    fn test_product_accepts_zoneless_timestamps() {
        let json = r#"{
            "id": "a3",
            "name": "Kopi Susu",
            "price": 18000,
            "createdAt": "2024-05-01 08:00:00",
            "updatedAt": "2024-05-01T08:00:00.123"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.created_at, "2024-05-01 08:00:00");

        let created = product.created_at_utc().unwrap();
        assert_eq!(created.to_rfc3339(), "2024-05-01T08:00:00+00:00");
        assert!(product.updated_at_utc().unwrap() > created);
    }

    #[test]
    fn test_parse_timestamp() {
        let offset = parse_timestamp("2024-05-01T15:00:00+07:00").unwrap();
        let utc = parse_timestamp("2024-05-01T08:00:00Z").unwrap();
        assert_eq!(offset, utc);

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("01/05/2024").is_none());
    }

    #[test]
    fn test_created_product_tolerates_null_message() {
        let created: CreatedProduct =
            serde_json::from_str(r#"{"id":"n1","createdAt":"2024-05-01","message":null}"#).unwrap();
        assert_eq!(created.id, "n1");
        assert_eq!(created.message, "");
    }

    #[test]
    fn test_new_product_wire_format() {
        let request = NewProduct {
            user_id: "u-1".to_string(),
            name: "Roti Bakar".to_string(),
            price: Money::from_units(12_000),
            description: None,
            size: ProductSize::Medium,
            product_type: ProductType::Food,
            image: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["price"], 12_000);
        assert_eq!(value["size"], "MEDIUM");
        assert_eq!(value["type"], "FOOD");
        assert!(value.get("description").is_none());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_type_and_size_parsing() {
        assert_eq!("drink".parse::<ProductType>().unwrap(), ProductType::Drink);
        assert_eq!(" FOOD ".parse::<ProductType>().unwrap(), ProductType::Food);
        assert!("snack".parse::<ProductType>().is_err());

        assert_eq!("jumbo".parse::<ProductSize>().unwrap(), ProductSize::Jumbo);
        assert!("xl".parse::<ProductSize>().is_err());
    }

    #[test]
    fn test_login_debug_redacts_secrets() {
        let request = LoginRequest {
            email: "kasir@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("kasir@example.com"));
        assert!(!rendered.contains("hunter2"));

        let response = LoginResponse {
            message: "ok".to_string(),
            user_id: "u-1".to_string(),
            first_name: "Sari".to_string(),
            last_name: String::new(),
            token: "secret.token.value".to_string(),
        };
        assert!(!format!("{:?}", response).contains("secret.token.value"));
        assert_eq!(response.display_name(), "Sari");
    }
}

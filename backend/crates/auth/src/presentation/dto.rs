//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::Account;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request (also used to create admins)
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub account: AccountResponse,
}

// ============================================================================
// Profile
// ============================================================================

/// Update profile request; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of an account (no password digest)
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.value(),
            firstname: account.first_name.to_string(),
            lastname: account.last_name.to_string(),
            email: account.email.to_string(),
            role: account.role.to_string(),
            active: account.active,
        }
    }
}

/// Operation result with the affected account
#[derive(Debug, Clone, Serialize)]
pub struct AccountMessageResponse {
    pub success: bool,
    pub message: String,
    pub account: AccountResponse,
}

impl AccountMessageResponse {
    pub fn new(message: impl Into<String>, account: &Account) -> Self {
        Self {
            success: true,
            message: message.into(),
            account: account.into(),
        }
    }
}

// ============================================================================
// Generic
// ============================================================================

/// `{"success": true, "message": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

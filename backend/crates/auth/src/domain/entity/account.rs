//! Account Entity
//!
//! Identity, profile, credential digest, role and active flag in one record.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{
    account_password::AccountPassword, account_role::AccountRole, email::Email,
    person_name::PersonName,
};

/// Account entity
///
/// The password digest never leaves the crate through a DTO.
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned identifier
    pub account_id: AccountId,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Unique, lower-cased
    pub email: Email,
    pub password: AccountPassword,
    pub role: AccountRole,
    /// Toggled by activate / deactivate; reported, not enforced
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Account to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    pub password: AccountPassword,
    pub role: AccountRole,
}

/// Partial profile update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub email: Option<Email>,
    pub password: Option<AccountPassword>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::AccountId;

use crate::domain::entity::account::{Account, NewAccount, ProfileChanges};
use crate::domain::value_object::{account_role::AccountRole, email::Email};
use crate::error::AuthResult;

/// Account repository trait
///
/// Mutations return `Ok(None)` / `Ok(false)` when the account does not exist.
/// Email uniqueness is enforced by the store; a violation is
/// `AuthError::EmailTaken`.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    async fn create(&self, account: &NewAccount) -> AuthResult<Account>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    /// Find account by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// All accounts ordered by id
    async fn list(&self) -> AuthResult<Vec<Account>>;

    /// Apply a partial profile update
    async fn update_profile(
        &self,
        account_id: AccountId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<Account>>;

    /// Set the active flag
    async fn set_active(&self, account_id: AccountId, active: bool)
    -> AuthResult<Option<Account>>;

    /// Set the role
    async fn set_role(&self, account_id: AccountId, role: AccountRole)
    -> AuthResult<Option<Account>>;

    /// Hard delete; dependent rows go with it
    async fn delete(&self, account_id: AccountId) -> AuthResult<bool>;
}

//! Admin Use Case
//!
//! Operations behind the role gate. The gate has already verified that the
//! caller is an admin, so nothing here re-checks the role.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_role::AccountRole;
use crate::error::{AuthError, AuthResult};

pub struct AdminUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> AdminUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Like registration, with role `admin` and no token
    pub async fn create_admin(&self, input: RegisterInput) -> AuthResult<Account> {
        RegisterUseCase::new(self.repo.clone(), self.config.clone())
            .create_account(input, AccountRole::Admin)
            .await
    }

    pub async fn promote(&self, target: AccountId) -> AuthResult<Account> {
        let account = self
            .repo
            .set_role(target, AccountRole::Admin)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        tracing::info!(account_id = %account.account_id, "Account promoted to admin");

        Ok(account)
    }

    pub async fn list(&self) -> AuthResult<Vec<Account>> {
        self.repo.list().await
    }

    pub async fn inspect(&self, target: AccountId) -> AuthResult<Account> {
        self.repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }
}

//! Account Status Use Case
//!
//! Activation, deactivation and deletion.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::access::authorize_self_or_admin;
use crate::application::token::Identity;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

pub struct AccountStatusUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> AccountStatusUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn deactivate(&self, caller: Identity, target: AccountId) -> AuthResult<Account> {
        self.set_active(caller, target, false).await
    }

    pub async fn activate(&self, caller: Identity, target: AccountId) -> AuthResult<Account> {
        self.set_active(caller, target, true).await
    }

    async fn set_active(
        &self,
        caller: Identity,
        target: AccountId,
        active: bool,
    ) -> AuthResult<Account> {
        authorize_self_or_admin(self.repo.as_ref(), caller, target).await?;

        let account = self
            .repo
            .set_active(target, active)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        tracing::info!(
            account_id = %account.account_id,
            active,
            by = %caller.account_id,
            "Account status changed"
        );

        Ok(account)
    }

    /// Hard delete; cart entries and reviews are removed with the account
    pub async fn delete(&self, caller: Identity, target: AccountId) -> AuthResult<()> {
        authorize_self_or_admin(self.repo.as_ref(), caller, target).await?;

        if !self.repo.delete(target).await? {
            return Err(AuthError::AccountNotFound);
        }

        tracing::info!(
            account_id = %target,
            by = %caller.account_id,
            "Account deleted"
        );

        Ok(())
    }
}

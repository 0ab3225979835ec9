//! Profile Use Case
//!
//! Read and partially update an account's profile.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::access::authorize_self_or_admin;
use crate::application::config::AuthConfig;
use crate::application::token::Identity;
use crate::domain::entity::account::{Account, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    person_name::PersonName,
};
use crate::error::{AuthError, AuthResult};

/// Update profile input; absent fields are left unchanged
#[derive(Default)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn get(&self, caller: Identity, target: AccountId) -> AuthResult<Account> {
        authorize_self_or_admin(self.repo.as_ref(), caller, target).await?;

        self.repo
            .find_by_id(target)
            .await?
            .ok_or(AuthError::AccountNotFound)
    }

    /// A new email must still be unique (409); a new password is re-hashed
    pub async fn update(
        &self,
        caller: Identity,
        target: AccountId,
        input: UpdateProfileInput,
    ) -> AuthResult<Account> {
        authorize_self_or_admin(self.repo.as_ref(), caller, target).await?;

        let mut changes = ProfileChanges {
            first_name: input.first_name.map(PersonName::new).transpose()?,
            last_name: input.last_name.map(PersonName::new).transpose()?,
            email: input.email.map(Email::new).transpose()?,
            password: None,
        };
        let raw_password = input.password.map(RawPassword::new).transpose()?;

        if changes.is_empty() && raw_password.is_none() {
            return self.get(caller, target).await;
        }

        if let Some(email) = &changes.email {
            if let Some(owner) = self.repo.find_by_email(email).await? {
                if owner.account_id != target {
                    return Err(AuthError::EmailTaken);
                }
            }
        }

        if let Some(raw) = raw_password {
            changes.password =
                Some(AccountPassword::hash(&self.config.password_hasher, raw).await?);
        }

        let account = self
            .repo
            .update_profile(target, &changes)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        tracing::info!(
            account_id = %account.account_id,
            email_changed = changes.email.is_some(),
            password_changed = changes.password.is_some(),
            "Profile updated"
        );

        Ok(account)
    }
}

//! Bootstrap Admin
//!
//! Promotion is admin-only, so the first admin is created at startup from
//! configured credentials.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_role::AccountRole, email::Email};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created(AccountId),
    /// The email is taken; the existing account is left untouched
    AlreadyExists,
}

pub async fn bootstrap_admin<R>(
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    email: String,
    password: String,
) -> AuthResult<BootstrapOutcome>
where
    R: AccountRepository,
{
    if repo.exists_by_email(&Email::new(email.as_str())?).await? {
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let input = RegisterInput {
        first_name: None,
        last_name: None,
        email,
        password,
    };

    match RegisterUseCase::new(repo, config)
        .create_account(input, AccountRole::Admin)
        .await
    {
        Ok(account) => Ok(BootstrapOutcome::Created(account.account_id)),
        // Another instance won the race
        Err(AuthError::EmailTaken) => Ok(BootstrapOutcome::AlreadyExists),
        Err(e) => Err(e),
    }
}

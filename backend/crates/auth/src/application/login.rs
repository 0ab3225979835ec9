//! Login Use Case
//!
//! Verifies email + password and issues an identity token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_password::RawPassword, email::Email};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Unknown email is 404, wrong password 400
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let password_valid = account
            .password
            .verify(&self.config.password_hasher, raw_password)
            .await?;

        if !password_valid {
            tracing::warn!(account_id = %account.account_id, "Wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = TokenIssuer::new(self.config.clone()).issue(account.account_id)?;

        tracing::info!(account_id = %account.account_id, "Account logged in");

        Ok(LoginOutput { account, token })
    }
}

//! Register Use Case
//!
//! Creates a new account and signs the caller in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    account_role::AccountRole,
    email::Email,
    person_name::PersonName,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Register output
pub struct RegisterOutput {
    pub account: Account,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Create a standard account and issue a token for it
    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let account = self.create_account(input, AccountRole::Standard).await?;
        let token = TokenIssuer::new(self.config.clone()).issue(account.account_id)?;

        Ok(RegisterOutput { account, token })
    }

    /// Validate, check uniqueness, hash and insert with the given role
    ///
    /// The pre-check only gives an early 409; the unique constraint decides
    /// races between concurrent registrations.
    pub async fn create_account(
        &self,
        input: RegisterInput,
        role: AccountRole,
    ) -> AuthResult<Account> {
        let email = Email::new(input.email)?;
        let first_name = PersonName::optional(input.first_name.as_deref())?;
        let last_name = PersonName::optional(input.last_name.as_deref())?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = AccountPassword::hash(&self.config.password_hasher, raw_password).await?;

        let account = self
            .repo
            .create(&NewAccount {
                first_name,
                last_name,
                email,
                password,
                role,
            })
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            "Account created"
        );

        Ok(account)
    }
}

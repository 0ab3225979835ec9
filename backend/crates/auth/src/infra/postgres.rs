//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::AccountId;
use sqlx::PgPool;

use crate::domain::entity::account::{Account, NewAccount, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::AccountPassword, account_role::AccountRole, email::Email,
    person_name::PersonName,
};
use crate::error::{AuthError, AuthResult};

/// SQLSTATE unique_violation
const UNIQUE_VIOLATION: &str = "23505";

const ACCOUNT_COLUMNS: &str = r#"
    id,
    first_name,
    last_name,
    email,
    password_hash,
    role,
    active,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations on `accounts.email` to `EmailTaken`
fn map_write_error(err: sqlx::Error) -> AuthError {
    if sqlstate(&err).as_deref() == Some(UNIQUE_VIOLATION) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(err)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAuthRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO accounts (
                first_name,
                last_name,
                email,
                password_hash,
                role
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.first_name.as_str())
        .bind(account.last_name.as_str())
        .bind(account.email.as_str())
        .bind(account.password.as_phc_string())
        .bind(account.role.code())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.into_account()
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1"
        ))
        .bind(account_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> AuthResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }

    async fn update_profile(
        &self,
        account_id: AccountId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account_id.value())
        .bind(changes.first_name.as_ref().map(PersonName::as_str))
        .bind(changes.last_name.as_ref().map(PersonName::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.password.as_ref().map(AccountPassword::as_phc_string))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn set_active(
        &self,
        account_id: AccountId,
        active: bool,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts SET active = $2, updated_at = now()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account_id.value())
        .bind(active)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn set_role(
        &self,
        account_id: AccountId,
        role: AccountRole,
    ) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts SET role = $2, updated_at = now()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account_id.value())
        .bind(role.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn delete(&self, account_id: AccountId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(account_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    role: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let role = AccountRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        Ok(Account {
            account_id: AccountId::from_db(self.id),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            email: Email::from_db(self.email),
            password: AccountPassword::from_db(self.password_hash),
            role,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

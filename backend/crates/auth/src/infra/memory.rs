//! In-Memory Repository
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! used by tests. Every operation holds one lock, so each is atomic.
//! Stores that reference accounts register a delete hook, the in-memory
//! counterpart of `ON DELETE CASCADE`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::id::AccountId;

use crate::domain::entity::account::{Account, NewAccount, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_role::AccountRole, email::Email};
use crate::error::{AuthError, AuthResult};

/// Runs after an account is removed
pub type DeleteHook = Arc<dyn Fn(AccountId) -> AuthResult<()> + Send + Sync>;

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: BTreeMap<i64, Account>,
    delete_hooks: Vec<DeleteHook>,
}

#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    state: Arc<Mutex<State>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AuthError::Internal("Account store lock poisoned".into()))
    }

    /// Synchronous existence check for other in-memory stores
    pub fn contains(&self, account_id: AccountId) -> AuthResult<bool> {
        Ok(self.lock()?.accounts.contains_key(&account_id.value()))
    }

    /// Register a hook run on every successful delete
    pub fn on_delete<F>(&self, hook: F) -> AuthResult<()>
    where
        F: Fn(AccountId) -> AuthResult<()> + Send + Sync + 'static,
    {
        self.lock()?.delete_hooks.push(Arc::new(hook));
        Ok(())
    }

    fn email_owner(state: &State, email: &Email) -> Option<i64> {
        state
            .accounts
            .values()
            .find(|account| &account.email == email)
            .map(|account| account.account_id.value())
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: &NewAccount) -> AuthResult<Account> {
        let mut state = self.lock()?;

        if Self::email_owner(&state, &account.email).is_some() {
            return Err(AuthError::EmailTaken);
        }

        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();
        let created = Account {
            account_id: AccountId::from_db(id),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            password: account.password.clone(),
            role: account.role,
            active: true,
            created_at: now,
            updated_at: now,
        };
        state.accounts.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.lock()?.accounts.get(&account_id.value()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let state = self.lock()?;
        Ok(Self::email_owner(&state, email).and_then(|id| state.accounts.get(&id).cloned()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.lock()?;
        Ok(Self::email_owner(&state, email).is_some())
    }

    async fn list(&self) -> AuthResult<Vec<Account>> {
        Ok(self.lock()?.accounts.values().cloned().collect())
    }

    async fn update_profile(
        &self,
        account_id: AccountId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<Account>> {
        let mut state = self.lock()?;

        if let Some(email) = &changes.email {
            if Self::email_owner(&state, email).is_some_and(|id| id != account_id.value()) {
                return Err(AuthError::EmailTaken);
            }
        }

        let Some(account) = state.accounts.get_mut(&account_id.value()) else {
            return Ok(None);
        };

        if let Some(first_name) = &changes.first_name {
            account.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            account.last_name = last_name.clone();
        }
        if let Some(email) = &changes.email {
            account.email = email.clone();
        }
        if let Some(password) = &changes.password {
            account.password = password.clone();
        }
        account.updated_at = Utc::now();

        Ok(Some(account.clone()))
    }

    async fn set_active(
        &self,
        account_id: AccountId,
        active: bool,
    ) -> AuthResult<Option<Account>> {
        let mut state = self.lock()?;
        Ok(state.accounts.get_mut(&account_id.value()).map(|account| {
            account.active = active;
            account.updated_at = Utc::now();
            account.clone()
        }))
    }

    async fn set_role(
        &self,
        account_id: AccountId,
        role: AccountRole,
    ) -> AuthResult<Option<Account>> {
        let mut state = self.lock()?;
        Ok(state.accounts.get_mut(&account_id.value()).map(|account| {
            account.role = role;
            account.updated_at = Utc::now();
            account.clone()
        }))
    }

    async fn delete(&self, account_id: AccountId) -> AuthResult<bool> {
        // Hooks lock their own stores; release ours first
        let hooks = {
            let mut state = self.lock()?;
            if state.accounts.remove(&account_id.value()).is_none() {
                return Ok(false);
            }
            state.delete_hooks.clone()
        };

        for hook in &hooks {
            hook(account_id)?;
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use super::*;
    use crate::domain::value_object::{
        account_password::AccountPassword, person_name::PersonName,
    };

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            first_name: PersonName::default(),
            last_name: PersonName::default(),
            email: Email::new(email).unwrap(),
            password: AccountPassword::from_db("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA"),
            role: AccountRole::Standard,
        }
    }

    #[tokio::test]
    async fn test_exists_by_email() {
        let repo = MemoryAccountRepository::new();
        let email = Email::new("a@x.io").unwrap();

        assert!(!repo.exists_by_email(&email).await.unwrap());
        repo.create(&new_account("a@x.io")).await.unwrap();
        assert!(repo.exists_by_email(&email).await.unwrap());
        assert!(matches!(
            repo.create(&new_account("A@x.io")).await,
            Err(AuthError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_delete_runs_hooks_once() {
        let repo = MemoryAccountRepository::new();
        let account = repo.create(&new_account("a@x.io")).await.unwrap();

        let seen = Arc::new(AtomicI64::new(0));
        let sink = seen.clone();
        repo.on_delete(move |id| {
            sink.store(id.value(), Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

        assert!(repo.delete(account.account_id).await.unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), account.account_id.value());
        assert!(!repo.contains(account.account_id).unwrap());

        seen.store(0, Ordering::SeqCst);
        assert!(!repo.delete(account.account_id).await.unwrap());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_poisoned_store_is_internal_error() {
        let repo = MemoryAccountRepository::new();
        let state = repo.state.clone();
        let _ = std::thread::spawn(move || {
            let _guard = state.lock().unwrap();
            panic!("poison");
        })
        .join();

        assert!(matches!(
            repo.contains(AccountId::from_db(1)),
            Err(AuthError::Internal(_))
        ));
    }
}

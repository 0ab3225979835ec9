//! Account Access Policy
//!
//! An account may act on itself; admins may act on any account.

use kernel::id::AccountId;

use crate::application::token::Identity;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// Allow when the caller is the target or an admin
///
/// The caller's role is read from the store on every call.
pub async fn authorize_self_or_admin<R>(
    repo: &R,
    caller: Identity,
    target: AccountId,
) -> AuthResult<()>
where
    R: AccountRepository,
{
    if caller.account_id == target {
        return Ok(());
    }

    let caller_account = repo
        .find_by_id(caller.account_id)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    if caller_account.is_admin() {
        Ok(())
    } else {
        tracing::warn!(
            caller_id = %caller.account_id,
            target_id = %target,
            "Account access denied"
        );
        Err(AuthError::Forbidden)
    }
}

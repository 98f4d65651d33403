use rusqlite::Connection;

use crate::db::queries;
use crate::models::{AccountStatus, UserAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountFilter {
    #[default]
    All,
    Suspended,
}

impl AccountFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(AccountFilter::All),
            "suspended" => Some(AccountFilter::Suspended),
            _ => None,
        }
    }
}

pub fn list_accounts(conn: &Connection, filter: AccountFilter) -> anyhow::Result<Vec<UserAccount>> {
    queries::list_user_accounts(conn, filter == AccountFilter::Suspended)
}

/// Suspends an active account or reinstates a suspended one.
/// Returns the new status, or `None` for an unknown account.
pub fn toggle_status(conn: &Connection, id: i64) -> anyhow::Result<Option<AccountStatus>> {
    let Some(current) = queries::get_account_status(conn, id)? else {
        return Ok(None);
    };
    let next = current.toggled();
    queries::set_account_status(conn, id, next)?;
    tracing::info!(account_id = id, status = next.as_str(), "account status toggled");
    Ok(Some(next))
}

pub fn suspended_count(conn: &Connection) -> anyhow::Result<i64> {
    queries::count_suspended_accounts(conn)
}

//! The audit-log lookup seam.
//!
//! Handlers only see [`AuditLogStore`]; [`PgAuditLogStore`] is the production
//! implementation.

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AuditLog, PageLink, TenantId, TimePage};
use crate::query::{ActionTypeFilter, AuditLogScope};

pub use postgres::PgAuditLogStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid offset token: {0}")]
    InvalidOffset(String),

    #[error("corrupt audit log row: {0}")]
    CorruptRow(String),
}

/// Position of the last row of a page, handed out as the `offset` token.
///
/// Rows are ordered by `(created_time, id)`, so the id only breaks ties
/// between rows logged in the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub created_time: i64,
    pub id: Uuid,
}

impl PageCursor {
    pub fn after(log: &AuditLog) -> Self {
        Self {
            created_time: log.created_time,
            id: log.id.as_uuid(),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}_{}", self.created_time, self.id)
    }

    pub fn decode(token: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidOffset(token.to_string());
        let (time, id) = token.split_once('_').ok_or_else(invalid)?;
        Ok(Self {
            created_time: time.parse().map_err(|_| invalid())?,
            id: Uuid::parse_str(id).map_err(|_| invalid())?,
        })
    }
}

#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Looks up one page of audit logs belonging to `tenant_id`, narrowed by
    /// `scope` and `actions`.
    ///
    /// `Ok(None)` means the store produced no result container at all, which
    /// callers treat as "not found" rather than as an empty page.
    async fn find(
        &self,
        tenant_id: TenantId,
        scope: &AuditLogScope,
        actions: &ActionTypeFilter,
        page_link: &PageLink,
    ) -> Result<Option<TimePage<AuditLog>>, StoreError>;
}

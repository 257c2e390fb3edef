use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuditLogStore, PageCursor, StoreError};
use crate::db;
use crate::db::audit_logs::FindParams;
use crate::models::{AuditLog, PageLink, TenantId, TimePage};
use crate::query::{ActionTypeFilter, AuditLogScope};

/// Reads audit logs from the `audit_log` table.
///
/// Rows come back ordered by `(created_time, id)`; the continuation token is
/// the [`PageCursor`] of the last row of the previous page.
#[derive(Clone)]
pub struct PgAuditLogStore {
    pool: PgPool,
}

impl PgAuditLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert(&self, log: &AuditLog) -> Result<(), StoreError> {
        db::audit_logs::insert(&self.pool, log).await?;
        Ok(())
    }
}

fn find_params(
    tenant_id: TenantId,
    scope: &AuditLogScope,
    actions: &ActionTypeFilter,
    page_link: &PageLink,
) -> Result<FindParams, StoreError> {
    let after = page_link.offset.as_deref().map(PageCursor::decode).transpose()?;

    let mut params = FindParams {
        tenant_id: tenant_id.as_uuid(),
        action_types: match actions {
            ActionTypeFilter::All => None,
            ActionTypeFilter::Only(set) => Some(set.iter().map(|a| a.as_str().to_string()).collect()),
        },
        start_time: page_link.start_time,
        end_time: page_link.end_time,
        after_time: after.map(|c| c.created_time),
        after_id: after.map(|c| c.id),
        asc_order: page_link.asc_order,
        // One extra row tells us whether another page exists.
        limit: i64::from(page_link.limit) + 1,
        ..Default::default()
    };

    match scope {
        AuditLogScope::Tenant => {}
        AuditLogScope::Customer(id) => params.customer_id = Some(id.as_uuid()),
        AuditLogScope::User(id) => params.user_id = Some(id.as_uuid()),
        AuditLogScope::Entity(entity) => {
            params.entity_type = Some(entity.entity_type.as_str().to_string());
            params.entity_id = Some(entity.id);
        }
    }

    Ok(params)
}

#[async_trait]
impl AuditLogStore for PgAuditLogStore {
    async fn find(
        &self,
        tenant_id: TenantId,
        scope: &AuditLogScope,
        actions: &ActionTypeFilter,
        page_link: &PageLink,
    ) -> Result<Option<TimePage<AuditLog>>, StoreError> {
        let params = find_params(tenant_id, scope, actions, page_link)?;
        let mut rows = db::audit_logs::find(&self.pool, &params).await?;

        let limit = page_link.limit as usize;
        let has_next = rows.len() > limit;
        rows.truncate(limit);

        let data = rows
            .into_iter()
            .map(AuditLog::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::CorruptRow)?;

        let next_page_link = if has_next {
            data.last().map(|last| page_link.next(PageCursor::after(last).encode()))
        } else {
            None
        };

        tracing::debug!(
            tenant_id = %tenant_id,
            returned = data.len(),
            has_next,
            "Audit log page fetched"
        );

        Ok(Some(TimePage {
            data,
            has_next,
            next_page_link,
        }))
    }
}

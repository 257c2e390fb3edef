use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{
    ActionStatus, ActionType, AuditLog, AuditLogId, CustomerId, EntityId, EntityType, TenantId,
    UserId,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    pub created_time: i64,
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub entity_name: String,
    pub user_id: Option<Uuid>,
    pub user_name: String,
    pub action_type: String,
    pub action_data: serde_json::Value,
    pub action_status: String,
    pub action_failure_details: Option<String>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = String;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let entity_type = row
            .entity_type
            .parse::<EntityType>()
            .map_err(|e| format!("row {}: {e}", row.id))?;
        let action_type = row
            .action_type
            .parse::<ActionType>()
            .map_err(|e| format!("row {}: {e}", row.id))?;
        let action_status = ActionStatus::parse(&row.action_status)
            .ok_or_else(|| format!("row {}: unknown action status {}", row.id, row.action_status))?;

        Ok(AuditLog {
            id: AuditLogId::new(row.id),
            created_time: row.created_time,
            tenant_id: TenantId::new(row.tenant_id),
            customer_id: row.customer_id.map(CustomerId::new),
            entity_id: EntityId::new(entity_type, row.entity_id),
            entity_name: row.entity_name,
            user_id: row.user_id.map(UserId::new),
            user_name: row.user_name,
            action_type,
            action_data: row.action_data,
            action_status,
            action_failure_details: row.action_failure_details,
        })
    }
}

/// Filters for [`find`]. `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct FindParams {
    pub tenant_id: Uuid,
    pub customer_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub action_types: Option<Vec<String>>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    /// Return only rows strictly past `(after_time, after_id)` in the
    /// requested order. Both are set or neither is.
    pub after_time: Option<i64>,
    pub after_id: Option<Uuid>,
    pub asc_order: bool,
    pub limit: i64,
}

pub async fn find(pool: &PgPool, params: &FindParams) -> Result<Vec<AuditLogRow>, sqlx::Error> {
    let (order, cmp) = if params.asc_order {
        ("ASC", ">")
    } else {
        ("DESC", "<")
    };

    sqlx::query_as::<_, AuditLogRow>(&format!(
        "SELECT * FROM audit_log
         WHERE tenant_id = $1
           AND ($2::uuid IS NULL OR customer_id = $2)
           AND ($3::uuid IS NULL OR user_id = $3)
           AND ($4::text IS NULL OR entity_type = $4)
           AND ($5::uuid IS NULL OR entity_id = $5)
           AND ($6::text[] IS NULL OR action_type = ANY($6))
           AND ($7::bigint IS NULL OR created_time >= $7)
           AND ($8::bigint IS NULL OR created_time <= $8)
           AND ($9::bigint IS NULL OR (created_time, id) {cmp} ($9::bigint, $10::uuid))
         ORDER BY created_time {order}, id {order} LIMIT $11"
    ))
    .bind(params.tenant_id)
    .bind(params.customer_id)
    .bind(params.user_id)
    .bind(params.entity_type.as_deref())
    .bind(params.entity_id)
    .bind(params.action_types.clone())
    .bind(params.start_time)
    .bind(params.end_time)
    .bind(params.after_time)
    .bind(params.after_id)
    .bind(params.limit)
    .fetch_all(pool)
    .await
}

pub async fn insert(pool: &PgPool, log: &AuditLog) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_log (id, created_time, tenant_id, customer_id, entity_type, entity_id,
             entity_name, user_id, user_name, action_type, action_data, action_status,
             action_failure_details)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
    )
    .bind(log.id.as_uuid())
    .bind(log.created_time)
    .bind(log.tenant_id.as_uuid())
    .bind(log.customer_id.map(|c| c.as_uuid()))
    .bind(log.entity_id.entity_type.as_str())
    .bind(log.entity_id.id)
    .bind(&log.entity_name)
    .bind(log.user_id.map(|u| u.as_uuid()))
    .bind(&log.user_name)
    .bind(log.action_type.as_str())
    .bind(&log.action_data)
    .bind(log.action_status.as_str())
    .bind(log.action_failure_details.as_deref())
    .execute(pool)
    .await?;
    Ok(())
}

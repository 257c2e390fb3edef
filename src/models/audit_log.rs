use serde::{Deserialize, Serialize};

use super::{ActionType, AuditLogId, CustomerId, EntityId, TenantId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Success,
    Failure,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Success => "SUCCESS",
            ActionStatus::Failure => "FAILURE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(ActionStatus::Success),
            "FAILURE" => Some(ActionStatus::Failure),
            _ => None,
        }
    }
}

/// One logged action. Written by the audit service, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: AuditLogId,
    /// Milliseconds since the Unix epoch.
    pub created_time: i64,
    pub tenant_id: TenantId,
    pub customer_id: Option<CustomerId>,
    pub entity_id: EntityId,
    pub entity_name: String,
    pub user_id: Option<UserId>,
    pub user_name: String,
    pub action_type: ActionType,
    pub action_data: serde_json::Value,
    pub action_status: ActionStatus,
    pub action_failure_details: Option<String>,
}

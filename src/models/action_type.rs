use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    EntityCreated,
    EntityUpdated,
    EntityDeleted,
    AttributesUpdated,
    AttributesDeleted,
    AttributesRead,
    TimeseriesUpdated,
    TimeseriesDeleted,
    RpcCall,
    CredentialsUpdated,
    CredentialsRead,
    AssignedToCustomer,
    UnassignedFromCustomer,
    Activated,
    Suspended,
    RelationAddOrUpdate,
    RelationDeleted,
    RelationsDeleted,
    AlarmAck,
    AlarmClear,
    Login,
    Logout,
    Lockout,
}

impl ActionType {
    pub const ALL: [ActionType; 23] = [
        ActionType::EntityCreated,
        ActionType::EntityUpdated,
        ActionType::EntityDeleted,
        ActionType::AttributesUpdated,
        ActionType::AttributesDeleted,
        ActionType::AttributesRead,
        ActionType::TimeseriesUpdated,
        ActionType::TimeseriesDeleted,
        ActionType::RpcCall,
        ActionType::CredentialsUpdated,
        ActionType::CredentialsRead,
        ActionType::AssignedToCustomer,
        ActionType::UnassignedFromCustomer,
        ActionType::Activated,
        ActionType::Suspended,
        ActionType::RelationAddOrUpdate,
        ActionType::RelationDeleted,
        ActionType::RelationsDeleted,
        ActionType::AlarmAck,
        ActionType::AlarmClear,
        ActionType::Login,
        ActionType::Logout,
        ActionType::Lockout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::EntityCreated => "ENTITY_CREATED",
            ActionType::EntityUpdated => "ENTITY_UPDATED",
            ActionType::EntityDeleted => "ENTITY_DELETED",
            ActionType::AttributesUpdated => "ATTRIBUTES_UPDATED",
            ActionType::AttributesDeleted => "ATTRIBUTES_DELETED",
            ActionType::AttributesRead => "ATTRIBUTES_READ",
            ActionType::TimeseriesUpdated => "TIMESERIES_UPDATED",
            ActionType::TimeseriesDeleted => "TIMESERIES_DELETED",
            ActionType::RpcCall => "RPC_CALL",
            ActionType::CredentialsUpdated => "CREDENTIALS_UPDATED",
            ActionType::CredentialsRead => "CREDENTIALS_READ",
            ActionType::AssignedToCustomer => "ASSIGNED_TO_CUSTOMER",
            ActionType::UnassignedFromCustomer => "UNASSIGNED_FROM_CUSTOMER",
            ActionType::Activated => "ACTIVATED",
            ActionType::Suspended => "SUSPENDED",
            ActionType::RelationAddOrUpdate => "RELATION_ADD_OR_UPDATE",
            ActionType::RelationDeleted => "RELATION_DELETED",
            ActionType::RelationsDeleted => "RELATIONS_DELETED",
            ActionType::AlarmAck => "ALARM_ACK",
            ActionType::AlarmClear => "ALARM_CLEAR",
            ActionType::Login => "LOGIN",
            ActionType::Logout => "LOGOUT",
            ActionType::Lockout => "LOCKOUT",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = QueryError;

    /// Matches the upper-cased, trimmed token against the known names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        ActionType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| QueryError::UnknownActionType(s.to_string()))
    }
}

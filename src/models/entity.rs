use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Tenant,
    Customer,
    User,
    Dashboard,
    Asset,
    Device,
    Alarm,
    RuleChain,
    RuleNode,
    EntityView,
    WidgetsBundle,
    WidgetType,
}

impl EntityType {
    pub const ALL: [EntityType; 12] = [
        EntityType::Tenant,
        EntityType::Customer,
        EntityType::User,
        EntityType::Dashboard,
        EntityType::Asset,
        EntityType::Device,
        EntityType::Alarm,
        EntityType::RuleChain,
        EntityType::RuleNode,
        EntityType::EntityView,
        EntityType::WidgetsBundle,
        EntityType::WidgetType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Tenant => "TENANT",
            EntityType::Customer => "CUSTOMER",
            EntityType::User => "USER",
            EntityType::Dashboard => "DASHBOARD",
            EntityType::Asset => "ASSET",
            EntityType::Device => "DEVICE",
            EntityType::Alarm => "ALARM",
            EntityType::RuleChain => "RULE_CHAIN",
            EntityType::RuleNode => "RULE_NODE",
            EntityType::EntityView => "ENTITY_VIEW",
            EntityType::WidgetsBundle => "WIDGETS_BUNDLE",
            EntityType::WidgetType => "WIDGET_TYPE",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = QueryError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| QueryError::UnknownEntityType(s.to_string()))
    }
}

/// An entity reference: the type tag plus its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    pub entity_type: EntityType,
    pub id: Uuid,
}

impl EntityId {
    pub fn new(entity_type: EntityType, id: Uuid) -> Self {
        Self { entity_type, id }
    }

    /// Resolve a caller-supplied type string and id string into an entity reference.
    pub fn from_type_and_id(entity_type: &str, id: &str) -> Result<Self, QueryError> {
        let entity_type = entity_type.parse::<EntityType>()?;
        let id = Uuid::parse_str(id.trim()).map_err(|_| QueryError::InvalidUuid {
            name: "entityId",
            value: id.to_string(),
        })?;
        Ok(Self { entity_type, id })
    }
}

//! Request parameter parsing for audit-log queries.
//!
//! Everything here is pure: a request is either turned into a fully typed
//! lookup (scope, action filter, page window) or rejected with a
//! [`QueryError`] before any store is touched.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::QueryError;
use crate::models::{ActionType, CustomerId, EntityId, PageLink, UserId};

/// Raw query string. Every field is kept as text so that missing and
/// malformed values can be told apart and reported with our own error kinds.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogParams {
    pub limit: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub asc_order: Option<String>,
    pub offset: Option<String>,
    pub action_types: Option<String>,
}

/// Which action types a lookup should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTypeFilter {
    All,
    /// Never empty.
    Only(BTreeSet<ActionType>),
}

impl ActionTypeFilter {
    pub fn matches(&self, action: ActionType) -> bool {
        match self {
            ActionTypeFilter::All => true,
            ActionTypeFilter::Only(set) => set.contains(&action),
        }
    }
}

/// The narrowing applied on top of the caller's tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLogScope {
    Tenant,
    Customer(CustomerId),
    User(UserId),
    Entity(EntityId),
}

/// Path segments as received, before validation.
#[derive(Debug, Clone, Copy)]
pub enum ScopeParams<'a> {
    Tenant,
    Customer(&'a str),
    User(&'a str),
    Entity {
        entity_type: &'a str,
        entity_id: &'a str,
    },
}

impl ScopeParams<'_> {
    /// Rejects blank identifiers without interpreting them.
    pub fn check_not_blank(&self) -> Result<(), QueryError> {
        match self {
            ScopeParams::Tenant => Ok(()),
            ScopeParams::Customer(id) => require_non_blank("customerId", id).map(|_| ()),
            ScopeParams::User(id) => require_non_blank("userId", id).map(|_| ()),
            ScopeParams::Entity {
                entity_type,
                entity_id,
            } => {
                require_non_blank("entityId", entity_id)?;
                require_non_blank("entityType", entity_type)?;
                Ok(())
            }
        }
    }

    pub fn resolve(&self) -> Result<AuditLogScope, QueryError> {
        self.check_not_blank()?;
        match *self {
            ScopeParams::Tenant => Ok(AuditLogScope::Tenant),
            ScopeParams::Customer(id) => parse_id::<CustomerId>("customerId", id).map(AuditLogScope::Customer),
            ScopeParams::User(id) => parse_id::<UserId>("userId", id).map(AuditLogScope::User),
            ScopeParams::Entity {
                entity_type,
                entity_id,
            } => EntityId::from_type_and_id(entity_type, entity_id).map(AuditLogScope::Entity),
        }
    }
}

pub fn require_non_blank<'a>(name: &'static str, value: &'a str) -> Result<&'a str, QueryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(QueryError::BlankParameter(name))
    } else {
        Ok(trimmed)
    }
}

fn parse_id<T: FromStr>(name: &'static str, value: &str) -> Result<T, QueryError> {
    value.trim().parse::<T>().map_err(|_| QueryError::InvalidUuid {
        name,
        value: value.to_string(),
    })
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_i64(name: &'static str, value: &str) -> Result<i64, QueryError> {
    value.parse::<i64>().map_err(|_| QueryError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, QueryError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(QueryError::InvalidBoolean {
            name,
            value: value.to_string(),
        }),
    }
}

impl AuditLogParams {
    /// Builds the query window. `limit` is required; values above
    /// `max_page_size` are clamped to it.
    pub fn page_link(&self, max_page_size: u32) -> Result<PageLink, QueryError> {
        let limit = non_blank(self.limit.as_ref()).ok_or(QueryError::MissingParameter("limit"))?;
        let limit = parse_i64("limit", limit)?;
        if limit < 1 {
            return Err(QueryError::LimitTooSmall(limit));
        }
        let limit = u32::try_from(limit).unwrap_or(u32::MAX).min(max_page_size.max(1));

        let start_time = non_blank(self.start_time.as_ref())
            .map(|v| parse_i64("startTime", v))
            .transpose()?;
        let end_time = non_blank(self.end_time.as_ref())
            .map(|v| parse_i64("endTime", v))
            .transpose()?;
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if start > end {
                return Err(QueryError::InvalidTimeRange { start, end });
            }
        }

        let asc_order = non_blank(self.asc_order.as_ref())
            .map(|v| parse_bool("ascOrder", v))
            .transpose()?
            .unwrap_or(false);

        Ok(PageLink {
            limit,
            start_time,
            end_time,
            asc_order,
            offset: non_blank(self.offset.as_ref()).map(str::to_string),
        })
    }

    pub fn action_type_filter(&self) -> Result<ActionTypeFilter, QueryError> {
        parse_action_types(self.action_types.as_deref())
    }
}

/// Parses a comma-separated, case-insensitive list of action types.
///
/// Absent or blank input means no filtering. A single unknown or empty token
/// rejects the whole list.
pub fn parse_action_types(raw: Option<&str>) -> Result<ActionTypeFilter, QueryError> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return Ok(ActionTypeFilter::All),
    };

    let set = raw
        .split(',')
        .map(|token| {
            if token.trim().is_empty() {
                Err(QueryError::UnknownActionType(token.to_string()))
            } else {
                token.parse::<ActionType>()
            }
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    Ok(ActionTypeFilter::Only(set))
}

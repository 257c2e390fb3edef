pub mod action_type;
pub mod audit_log;
pub mod entity;
pub mod ids;
pub mod page;

pub use action_type::ActionType;
pub use audit_log::{ActionStatus, AuditLog};
pub use entity::{EntityId, EntityType};
pub use ids::{AuditLogId, CustomerId, TenantId, UserId};
pub use page::{PageLink, TimePage};

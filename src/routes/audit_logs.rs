use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::auth::extractor::{SecurityUser, TenantAdmin};
use crate::error::AppError;
use crate::models::{AuditLog, TimePage};
use crate::query::{AuditLogParams, ScopeParams};
use crate::state::SharedState;

type AuditLogPage = Result<Json<TimePage<AuditLog>>, AppError>;

fn query_params(query: Result<Query<AuditLogParams>, QueryRejection>) -> Result<AuditLogParams, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| AppError::InvalidParameter(e.body_text()))
}

pub async fn list(
    TenantAdmin(user): TenantAdmin,
    State(state): State<SharedState>,
    query: Result<Query<AuditLogParams>, QueryRejection>,
) -> AuditLogPage {
    let params = query_params(query)?;
    find_scoped(&state, &user, ScopeParams::Tenant, &params).await
}

pub async fn list_by_customer(
    TenantAdmin(user): TenantAdmin,
    State(state): State<SharedState>,
    Path(customer_id): Path<String>,
    query: Result<Query<AuditLogParams>, QueryRejection>,
) -> AuditLogPage {
    let params = query_params(query)?;
    find_scoped(&state, &user, ScopeParams::Customer(&customer_id), &params).await
}

pub async fn list_by_user(
    TenantAdmin(user): TenantAdmin,
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    query: Result<Query<AuditLogParams>, QueryRejection>,
) -> AuditLogPage {
    let params = query_params(query)?;
    find_scoped(&state, &user, ScopeParams::User(&user_id), &params).await
}

pub async fn list_by_entity(
    TenantAdmin(user): TenantAdmin,
    State(state): State<SharedState>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    query: Result<Query<AuditLogParams>, QueryRejection>,
) -> AuditLogPage {
    let params = query_params(query)?;
    let scope = ScopeParams::Entity {
        entity_type: &entity_type,
        entity_id: &entity_id,
    };
    find_scoped(&state, &user, scope, &params).await
}

/// Shared body of the four list operations.
///
/// Every parameter is validated before the store is called. The tenant always
/// comes from the caller's session. The page size is capped by
/// `Config::max_page_size`; the store is trusted to honour `limit`.
async fn find_scoped(
    state: &SharedState,
    user: &SecurityUser,
    scope: ScopeParams<'_>,
    params: &AuditLogParams,
) -> AuditLogPage {
    scope.check_not_blank()?;
    let tenant_id = user.tenant_id();
    let page_link = params.page_link(state.config.max_page_size)?;
    let actions = params.action_type_filter()?;
    let scope = scope.resolve()?;

    tracing::debug!(
        tenant_id = %tenant_id,
        ?scope,
        ?actions,
        limit = page_link.limit,
        asc_order = page_link.asc_order,
        "Listing audit logs"
    );

    let page = state
        .store
        .find(tenant_id, &scope, &actions, &page_link)
        .await?
        .ok_or_else(|| AppError::NotFound("Requested item wasn't found!".to_string()))?;

    Ok(Json(page))
}

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::jwt::{self, Claims};
use crate::auth::Authority;
use crate::error::AppError;
use crate::models::{CustomerId, TenantId, UserId};
use crate::state::SharedState;

/// The authenticated caller, resolved from the request's bearer token.
#[derive(Debug, Clone)]
pub struct SecurityUser {
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub customer_id: Option<CustomerId>,
    pub authority: Authority,
}

impl SecurityUser {
    pub fn require_authority(&self, authority: Authority) -> Result<(), AppError> {
        if self.authority == authority {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You don't have permission to perform this operation!".to_string(),
            ))
        }
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

impl From<Claims> for SecurityUser {
    fn from(claims: Claims) -> Self {
        SecurityUser {
            user_id: UserId::new(claims.sub),
            tenant_id: TenantId::new(claims.tid),
            customer_id: claims.cid.map(CustomerId::new),
            authority: claims.authority,
        }
    }
}

fn decode(token: &str, state: &SharedState) -> Result<SecurityUser, AppError> {
    jwt::decode_token(token, &state.config.jwt_secret)
        .map(SecurityUser::from)
        .map_err(|e| {
            tracing::debug!("Rejected token: {e}");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })
}

impl FromRequestParts<SharedState> for SecurityUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Try Bearer token from Authorization header first
        if let Some(auth_header) = parts.headers.get("authorization") {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return decode(token, state);
            }
        }

        // Try cookie-based auth
        let jar = CookieJar::from_headers(&parts.headers);
        if let Some(cookie) = jar.get("access_token") {
            return decode(cookie.value(), state);
        }

        Err(AppError::Unauthorized(
            "Missing authentication token".to_string(),
        ))
    }
}

/// A caller holding the `TENANT_ADMIN` authority. Extraction fails before the
/// handler body runs for anyone else.
#[derive(Debug, Clone)]
pub struct TenantAdmin(pub SecurityUser);

impl FromRequestParts<SharedState> for TenantAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let user = SecurityUser::from_request_parts(parts, state).await?;
        if let Err(e) = user.require_authority(Authority::TenantAdmin) {
            tracing::warn!(
                user_id = %user.user_id,
                authority = user.authority.as_str(),
                "Tenant admin access denied"
            );
            return Err(e);
        }
        Ok(TenantAdmin(user))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn user(authority: Authority) -> SecurityUser {
        SecurityUser::from(Claims::new(Uuid::now_v7(), Uuid::now_v7(), None, authority))
    }

    #[test]
    fn authority_must_match() {
        assert!(user(Authority::TenantAdmin).require_authority(Authority::TenantAdmin).is_ok());
        assert!(matches!(
            user(Authority::CustomerUser).require_authority(Authority::TenantAdmin),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            user(Authority::SysAdmin).require_authority(Authority::TenantAdmin),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn claims_map_to_typed_ids() {
        let customer = Uuid::now_v7();
        let claims = Claims::new(Uuid::now_v7(), Uuid::now_v7(), Some(customer), Authority::CustomerUser);
        let tid = claims.tid;
        let user = SecurityUser::from(claims);
        assert_eq!(user.tenant_id().as_uuid(), tid);
        assert_eq!(user.customer_id.map(|c| c.as_uuid()), Some(customer));
    }
}

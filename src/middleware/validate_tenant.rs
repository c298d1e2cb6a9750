use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::app::AppState;
use crate::error::ApiError;
use crate::tenant::TenantContext;

/// Middleware that resolves the tenant named by the token against the tenant
/// registry and injects the `TenantContext` for handlers
pub async fn validate_tenant_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before tenant validation"))?;

    let tenant = state.store.find_tenant(auth_user.tenant_id).await?.ok_or_else(|| {
        tracing::warn!(
            "Tenant validation failed: tenant {} for user '{}' not found",
            auth_user.tenant_id,
            auth_user.user
        );
        ApiError::unauthorized("Tenant is not active or does not exist")
    })?;

    tracing::debug!("Tenant validation successful: {} ({})", tenant.name, tenant.id);

    request
        .extensions_mut()
        .insert(TenantContext::new(tenant.id, tenant.name, auth_user.user));

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::database::MemoryStore;

    fn router(user: AuthUser) -> Router {
        let store = Arc::new(MemoryStore::with_tenants([(1, "Northside")]));
        let state = AppState::new(store, AppConfig::development());
        Router::new()
            .route(
                "/",
                get(|tenant: TenantContext| async move { format!("{}:{}", tenant.tenant_name, tenant.user) }),
            )
            .layer(from_fn_with_state(state.clone(), validate_tenant_middleware))
            .layer(Extension(user))
            .with_state(state)
    }

    fn user(tenant_id: i64) -> AuthUser {
        AuthUser {
            user: "ana".to_string(),
            tenant_id,
        }
    }

    #[tokio::test]
    async fn context_carries_tenant_name_and_principal() {
        let response = router(user(1))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Northside:ana");
    }

    #[tokio::test]
    async fn unregistered_tenant_is_unauthorized() {
        let response = router(user(42))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

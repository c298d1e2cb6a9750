use crate::database::models::DashboardCounts;
use crate::database::SchoolStore;
use crate::services::ServiceResult;
use crate::tenant::TenantContext;

/// Recomputed on every call; nothing is cached
pub async fn counts(store: &dyn SchoolStore, ctx: &TenantContext) -> ServiceResult<DashboardCounts> {
    Ok(store.dashboard_counts(ctx.tenant_id).await?)
}

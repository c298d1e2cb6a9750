use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::database::models::DashboardCounts;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::dashboard;
use crate::tenant::TenantContext;

/// Counts plus the school name shown in the dashboard header
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    pub school_name: String,
    #[serde(flatten)]
    pub counts: DashboardCounts,
}

/// GET /api/dashboard
pub async fn counts(State(state): State<AppState>, tenant: TenantContext) -> ApiResult<DashboardPage> {
    let counts = dashboard::counts(state.store.as_ref(), &tenant).await?;
    Ok(ApiResponse::success(DashboardPage {
        school_name: tenant.tenant_name,
        counts,
    }))
}

use serde::Serialize;

/// The resolved tenant of the current request.
///
/// Built once per request by the tenant middleware and passed explicitly
/// into every service call; nothing reads the tenant from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantContext {
    pub tenant_id: i64,
    pub tenant_name: String,
    /// Principal name from the bearer token
    pub user: String,
}

impl TenantContext {
    pub fn new(tenant_id: i64, tenant_name: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            tenant_id,
            tenant_name: tenant_name.into(),
            user: user.into(),
        }
    }
}

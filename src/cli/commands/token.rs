use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(
    config: &AppConfig,
    tenant: i64,
    user: &str,
    hours: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
    let claims = Claims::new(tenant, user, hours);
    let token = generate_jwt(&claims, &config.security.jwt_secret)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "token": token,
                "tenant_id": claims.tenant_id,
                "user": claims.sub,
                "expires_at": claims.exp,
            })
        ),
        OutputFormat::Text => println!("{}", token),
    }

    Ok(())
}

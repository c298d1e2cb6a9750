use anyhow::bail;
use clap::Subcommand;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::open_store;

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "List all tenants")]
    List,

    #[command(about = "Create new tenant")]
    Create {
        #[arg(help = "Tenant (school) name")]
        name: String,
    },
}

pub async fn handle(config: &AppConfig, cmd: TenantCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    match cmd {
        TenantCommands::List => {
            let tenants = store.list_tenants().await?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tenants)?),
                OutputFormat::Text => {
                    if tenants.is_empty() {
                        println!("No tenants registered");
                    }
                    for tenant in tenants {
                        println!("{:>6}  {}", tenant.id, tenant.name);
                    }
                }
            }
        }
        TenantCommands::Create { name } => {
            let name = name.trim();
            if name.is_empty() || name.chars().count() > 255 {
                bail!("Tenant name must be between 1 and 255 characters");
            }

            let tenant = store.create_tenant(name).await?;
            match output_format {
                OutputFormat::Json => println!("{}", json!({ "id": tenant.id, "name": tenant.name })),
                OutputFormat::Text => println!("Created tenant {} ({})", tenant.name, tenant.id),
            }
        }
    }

    Ok(())
}

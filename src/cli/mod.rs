pub mod commands;

use clap::{Parser, Subcommand};

use crate::config;

#[derive(Parser)]
#[command(name = "school-api")]
#[command(about = "Multi-tenant school management API server and admin tools")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides SCHOOL_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Issue a bearer token for a tenant user (development stand-in for the identity provider)")]
    Token {
        #[arg(long, help = "Tenant id the token is scoped to")]
        tenant: i64,

        #[arg(long, default_value = "admin", help = "Principal name")]
        user: String,

        #[arg(long, help = "Lifetime in hours (defaults to configured expiry)")]
        hours: Option<u64>,
    },

    #[command(about = "Tenant registry management")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::tenant::TenantCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = config::config().clone();

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Token { tenant, user, hours } => {
            commands::token::handle(&config, tenant, &user, hours, output_format)
        }
        Commands::Tenant { cmd } => commands::tenant::handle(&config, cmd, output_format).await,
    }
}

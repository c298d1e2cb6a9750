use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which `SchoolStore` implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Tenants registered at startup when running on the in-memory store
    pub memory_tenants: Vec<(i64, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl Environment {
    fn from_name(name: &str) -> Self {
        match name {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

impl AppConfig {
    /// Preset for `APP_ENV`, then individual variables on top
    pub fn from_env() -> Self {
        let environment = env::var("APP_ENV")
            .map(|name| Environment::from_name(&name))
            .unwrap_or(Environment::Development);

        let mut config = Self::for_environment(environment);
        config.apply_env();
        config
    }

    pub fn development() -> Self {
        Self::for_environment(Environment::Development)
    }

    pub fn staging() -> Self {
        Self::for_environment(Environment::Staging)
    }

    pub fn production() -> Self {
        Self::for_environment(Environment::Production)
    }

    pub fn for_environment(environment: Environment) -> Self {
        use Environment::*;

        let host = match environment {
            Development => "127.0.0.1",
            Staging | Production => "0.0.0.0",
        };
        let (max_connections, connection_timeout) = match environment {
            Development => (10, 30),
            Staging => (20, 10),
            Production => (50, 5),
        };
        let max_request_size_bytes = match environment {
            Development => 1024 * 1024,
            Staging => 512 * 1024,
            Production => 256 * 1024,
        };
        let cors_origins: &[&str] = match environment {
            Development => &["http://localhost:3000", "http://localhost:5173"],
            Staging => &["https://staging.example.com"],
            Production => &["https://app.example.com"],
        };
        // Only development ships a usable secret; elsewhere JWT_SECRET must be set
        let (jwt_secret, jwt_expiry_hours) = match environment {
            Development => ("school-api-development-secret", 24 * 7),
            Staging => ("", 24),
            Production => ("", 4),
        };

        Self {
            environment,
            server: ServerConfig {
                host: host.to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                backend: StorageBackend::Postgres,
                memory_tenants: Vec::new(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections,
                connection_timeout,
            },
            api: ApiConfig {
                enable_request_logging: environment != Production,
                max_request_size_bytes,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: cors_origins.iter().map(|o| o.to_string()).collect(),
                jwt_secret: jwt_secret.to_string(),
                jwt_expiry_hours,
            },
        }
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var("SCHOOL_API_HOST") {
            self.server.host = v;
        }
        if env::var("SCHOOL_API_PORT").is_ok() {
            parse_into("SCHOOL_API_PORT", &mut self.server.port);
        } else {
            parse_into("PORT", &mut self.server.port);
        }

        if let Some(backend) = env::var("SCHOOL_STORAGE").ok().as_deref().and_then(parse_backend) {
            self.storage.backend = backend;
        }
        if let Ok(v) = env::var("SCHOOL_MEMORY_TENANTS") {
            self.storage.memory_tenants = parse_tenant_list(&v);
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        parse_into("DATABASE_MAX_CONNECTIONS", &mut self.database.max_connections);
        parse_into("DATABASE_CONNECTION_TIMEOUT", &mut self.database.connection_timeout);

        parse_into("API_ENABLE_REQUEST_LOGGING", &mut self.api.enable_request_logging);
        parse_into("API_MAX_REQUEST_SIZE_BYTES", &mut self.api.max_request_size_bytes);

        parse_into("SECURITY_ENABLE_CORS", &mut self.security.enable_cors);
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        parse_into("SECURITY_JWT_EXPIRY_HOURS", &mut self.security.jwt_expiry_hours);
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Overwrite `target` when `name` is set and parses; unparsable values keep the preset
fn parse_into<T: FromStr>(name: &str, target: &mut T) {
    if let Some(value) = env::var(name).ok().and_then(|v| v.trim().parse().ok()) {
        *target = value;
    }
}

fn parse_backend(value: &str) -> Option<StorageBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "postgres" | "pg" => Some(StorageBackend::Postgres),
        "memory" | "mem" => Some(StorageBackend::Memory),
        _ => None,
    }
}

/// Parses `1:Northside,2:Riverside High` into tenant seeds. Malformed entries are skipped.
fn parse_tenant_list(value: &str) -> Vec<(i64, String)> {
    value
        .split(',')
        .filter_map(|entry| {
            let (id, name) = entry.split_once(':')?;
            let id = id.trim().parse::<i64>().ok()?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((id, name.to_string()))
        })
        .collect()
}

/// Process-wide configuration, read from the environment on first use
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("prod"), Environment::Production);
        assert_eq!(Environment::from_name("stage"), Environment::Staging);
        assert_eq!(Environment::from_name("anything"), Environment::Development);
    }

    #[test]
    fn staging_requires_a_secret() {
        let config = AppConfig::staging();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(config.api.enable_request_logging);
    }

    #[test]
    fn production_defaults() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn parses_storage_backend_names() {
        assert_eq!(parse_backend("memory"), Some(StorageBackend::Memory));
        assert_eq!(parse_backend(" PG "), Some(StorageBackend::Postgres));
        assert_eq!(parse_backend("sqlite"), None);
    }

    #[test]
    fn parses_memory_tenant_seeds() {
        let seeds = parse_tenant_list("1:Northside, 2: Riverside High,bogus,3:");
        assert_eq!(
            seeds,
            vec![(1, "Northside".to_string()), (2, "Riverside High".to_string())]
        );
    }
}

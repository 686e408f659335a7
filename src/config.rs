use std::env;

/// Connection settings for a named persistence unit.
///
/// A unit such as "hello" resolves to a database URL through the environment:
/// `HELLO_DATABASE_URL` wins, then `DATABASE_URL`, then a file-backed SQLite
/// database named after the unit. A `.env` file is honoured via dotenvy.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceConfig {
    pub unit: String,
    pub database_url: String,
    pub max_connections: u32,
}

pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

impl PersistenceConfig {
    pub fn resolve(unit: &str) -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var(unit_env_var(unit, "DATABASE_URL"))
            .or_else(|_| env::var(DATABASE_URL_ENV_VAR))
            .unwrap_or_else(|_| format!("sqlite:{unit}.db?mode=rwc"));

        let max_connections = env::var(unit_env_var(unit, "MAX_CONNECTIONS"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Self {
            unit: unit.to_string(),
            database_url,
            max_connections,
        }
    }
}

/// Environment variable name for a unit-scoped setting, e.g.
/// `("hello", "DATABASE_URL")` -> `HELLO_DATABASE_URL`.
fn unit_env_var(unit: &str, suffix: &str) -> String {
    let prefix: String = unit
        .chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() })
        .collect();
    format!("{prefix}_{suffix}")
}

#[test]
fn test_unit_env_var_mapping() {
    assert_eq!(unit_env_var("hello", "DATABASE_URL"), "HELLO_DATABASE_URL");
    assert_eq!(
        unit_env_var("member-archive", "MAX_CONNECTIONS"),
        "MEMBER_ARCHIVE_MAX_CONNECTIONS"
    );
}

#[test]
fn test_resolve_prefers_unit_scoped_url() {
    env::set_var("WARMUP_A_DATABASE_URL", "sqlite:warmup-a-test.db");
    let config = PersistenceConfig::resolve("warmup-a");
    assert_eq!(config.database_url, "sqlite:warmup-a-test.db");
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    env::remove_var("WARMUP_A_DATABASE_URL");
}

#[test]
fn test_resolve_reads_max_connections() {
    env::set_var("WARMUP_B_MAX_CONNECTIONS", "2");
    let config = PersistenceConfig::resolve("warmup-b");
    assert_eq!(config.max_connections, 2);
    env::remove_var("WARMUP_B_MAX_CONNECTIONS");
}

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// CSV fixture of accounts to seed at startup (optional)
    #[serde(default)]
    pub accounts_file: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Bound on lock acquisition wait; expiry is a reported failure.
    pub lock_wait_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { lock_wait_ms: 5000 }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml_with_defaults() {
        let yaml = r#"
log_level: "info"
log_dir: "logs"
log_file: "ledger.log"
use_json: false
rotation: "daily"
gateway:
  host: "127.0.0.1"
  port: 8080
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.engine.lock_wait_ms, 5000);
        assert!(config.accounts_file.is_none());
    }
}

//! Environment configuration.

use crate::error::ProvisionerError;
use deployment_types::BootConfig;
use std::env;
use std::net::SocketAddr;
use std::path::Path;

const DEFAULT_LISTEN: &str = "0.0.0.0:80";

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen: SocketAddr,
    /// Address booting machines use to reach this server
    pub http_address: String,
    /// Boot catalog file (JSON, or YAML by extension)
    pub boot_configs_path: String,
    /// Manifest applied at startup
    pub deployment_path: Option<String>,
    /// Boot every machine with the any-boot configuration
    pub any_boot: bool,
}

impl Config {
    /// Loads configuration from `PROVISIONER_*` environment variables.
    pub fn from_env() -> Result<Self, ProvisionerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProvisionerError> {
        let listen = lookup("PROVISIONER_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen.parse::<SocketAddr>().map_err(|e| {
            ProvisionerError::InvalidConfig(format!("PROVISIONER_LISTEN [{listen}]: {e}"))
        })?;

        let http_address = lookup("PROVISIONER_HTTP_ADDRESS").ok_or_else(|| {
            ProvisionerError::InvalidConfig(
                "PROVISIONER_HTTP_ADDRESS environment variable is required".to_string(),
            )
        })?;
        let boot_configs_path = lookup("PROVISIONER_BOOT_CONFIGS").ok_or_else(|| {
            ProvisionerError::InvalidConfig(
                "PROVISIONER_BOOT_CONFIGS environment variable is required".to_string(),
            )
        })?;

        let any_boot = match lookup("PROVISIONER_ANYBOOT").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ProvisionerError::InvalidConfig(format!(
                    "PROVISIONER_ANYBOOT must be true or false, got [{other}]"
                )));
            }
        };

        Ok(Self {
            listen,
            http_address,
            boot_configs_path,
            deployment_path: lookup("PROVISIONER_DEPLOYMENT").filter(|p| !p.is_empty()),
            any_boot,
        })
    }
}

fn read(path: &str) -> Result<String, ProvisionerError> {
    std::fs::read_to_string(path).map_err(|source| ProvisionerError::Read {
        path: path.to_string(),
        source,
    })
}

/// Loads the boot catalog, parsing YAML for `.yaml`/`.yml` files and JSON
/// otherwise.
pub fn load_boot_configs(path: &str) -> Result<Vec<BootConfig>, ProvisionerError> {
    parse_boot_configs(path, &read(path)?)
}

fn parse_boot_configs(path: &str, contents: &str) -> Result<Vec<BootConfig>, ProvisionerError> {
    let is_yaml = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let parsed: Result<Vec<BootConfig>, String> = if is_yaml {
        serde_yaml::from_str(contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ProvisionerError::Parse {
        path: path.to_string(),
        message,
    })
}

/// Reads the startup manifest as raw JSON.
pub fn load_deployment(path: &str) -> Result<Vec<u8>, ProvisionerError> {
    read(path).map(String::into_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PROVISIONER_HTTP_ADDRESS", "192.168.0.1"),
            ("PROVISIONER_BOOT_CONFIGS", "/etc/provisioner/boot.json"),
        ]))
        .expect("Config should load");

        assert_eq!(config.listen, "0.0.0.0:80".parse().expect("addr"));
        assert!(!config.any_boot);
        assert!(config.deployment_path.is_none());
    }

    #[test]
    fn test_config_requires_http_address() {
        let result = Config::from_lookup(lookup(&[("PROVISIONER_BOOT_CONFIGS", "boot.json")]));
        assert!(matches!(result, Err(ProvisionerError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_any_boot() {
        let config = Config::from_lookup(lookup(&[
            ("PROVISIONER_HTTP_ADDRESS", "192.168.0.1"),
            ("PROVISIONER_BOOT_CONFIGS", "boot.json"),
            ("PROVISIONER_ANYBOOT", "true"),
            ("PROVISIONER_LISTEN", "[::]:8080"),
        ]))
        .expect("Config should load");
        assert!(config.any_boot);
        assert_eq!(config.listen.port(), 8080);

        let invalid = Config::from_lookup(lookup(&[
            ("PROVISIONER_HTTP_ADDRESS", "192.168.0.1"),
            ("PROVISIONER_BOOT_CONFIGS", "boot.json"),
            ("PROVISIONER_ANYBOOT", "sometimes"),
        ]));
        assert!(invalid.is_err());
    }

    #[test]
    fn test_parse_boot_configs_json_and_yaml() {
        let json = r#"[{"configName": "preseed", "kernel": "ubuntu/linux", "initrd": "ubuntu/initrd.gz"}]"#;
        let from_json = parse_boot_configs("boot.json", json).expect("json catalog");

        let yaml = "- configName: preseed\n  kernel: ubuntu/linux\n  initrd: ubuntu/initrd.gz\n";
        let from_yaml = parse_boot_configs("boot.YAML", yaml).expect("yaml catalog");

        assert_eq!(from_json, from_yaml);
        assert_eq!(from_json[0].config_name, "preseed");
    }

    #[test]
    fn test_parse_boot_configs_error_names_file() {
        match parse_boot_configs("boot.json", "not json") {
            Err(ProvisionerError::Parse { path, .. }) => assert_eq!(path, "boot.json"),
            other => panic!("Expected parse error, got {other:?}"),
        }
    }
}

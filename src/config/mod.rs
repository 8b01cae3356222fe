//! Configuration management for the chat relay

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use secrecy::{Secret, ExposeSecret};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "azureopenaisettings", alias = "AzureOpenAISettings")]
    pub azure_openai: AzureOpenAISettings,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the hosted Azure OpenAI provider.
///
/// Keys follow the `AzureOpenAISettings` section names. `config` lowercases
/// keys, so the lowercase spelling is the serialized one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAISettings {
    /// Base URL of the Azure OpenAI resource
    #[serde(alias = "Endpoint")]
    pub endpoint: String,

    /// API key (secured)
    #[serde(
        alias = "Key",
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    pub key: Secret<String>,

    /// Deployment used for chat completion
    #[serde(rename = "chatcompletionmodel", alias = "ChatCompletionModel")]
    pub chat_completion_model: ModelDeployment,

    /// Deployment used for embedding generation
    #[serde(rename = "embeddinggenerationmodel", alias = "EmbeddingGenerationModel")]
    pub embedding_generation_model: ModelDeployment,

    /// Deployment used for text completion (loaded, not used)
    #[serde(default, rename = "textcompletionmodel", alias = "TextCompletionModel")]
    pub text_completion_model: Option<ModelDeployment>,

    /// REST API version sent as the `api-version` query parameter
    #[serde(default = "default_api_version", rename = "apiversion", alias = "ApiVersion")]
    pub api_version: String,

    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default, rename = "timeoutsecs", alias = "TimeoutSecs")]
    pub timeout_secs: Option<u64>,
}

/// A caller-chosen alias mapped to a provider-side deployment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelDeployment {
    #[serde(alias = "Alias")]
    pub alias: String,
    #[serde(rename = "deploymentname", alias = "DeploymentName")]
    pub deployment_name: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Maximum request body size in MB (0 = unlimited)
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_size_mb: default_max_body_size(),
        }
    }
}

/// Cross-origin policy.
///
/// Every flag defaults to `true`: any origin, any method and any header may
/// call the relay, and no credentials are involved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allow_any")]
    pub allow_any_origin: bool,

    #[serde(default = "default_allow_any")]
    pub allow_any_method: bool,

    #[serde(default = "default_allow_any")]
    pub allow_any_header: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_any_origin: true,
            allow_any_method: true,
            allow_any_header: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_api_version() -> String { "2023-05-15".to_string() }
fn default_server_host() -> String { "0.0.0.0".to_string() }
fn default_server_port() -> u16 { 8080 }
fn default_max_body_size() -> usize { 1 }
fn default_allow_any() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

impl Config {
    /// Load configuration from a base file, its `.local` sibling (if present),
    /// `AzureOpenAISettings__*` and `CHAT_API__*` environment variables
    pub fn load<P: AsRef<Path>>(base: P) -> crate::error::Result<Self> {
        let base = base.as_ref();
        loader::load_layered(base, local_override_path(base))
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Create a configuration pointing at the given endpoint and key, with
    /// default deployments and server settings
    pub fn with_endpoint(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            azure_openai: AzureOpenAISettings {
                endpoint: endpoint.into(),
                key: Secret::new(key.into()),
                chat_completion_model: ModelDeployment {
                    alias: "chat".to_string(),
                    deployment_name: "gpt-35-turbo".to_string(),
                },
                embedding_generation_model: ModelDeployment {
                    alias: "embeddings".to_string(),
                    deployment_name: "text-embedding-ada-002".to_string(),
                },
                text_completion_model: None,
                api_version: default_api_version(),
                timeout_secs: None,
            },
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// `appsettings.json` -> `appsettings.local.json`
pub fn local_override_path(base: &Path) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{}.local.{}", stem, ext.to_string_lossy()),
        None => format!("{}.local", stem),
    };
    base.with_file_name(file_name)
}

/// Custom serializer for Secret<String>
fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_override_path() {
        assert_eq!(
            local_override_path(Path::new("conf/appsettings.json")),
            PathBuf::from("conf/appsettings.local.json")
        );
        assert_eq!(
            local_override_path(Path::new("settings")),
            PathBuf::from("settings.local")
        );
    }

    #[test]
    fn test_cors_defaults_are_permissive() {
        let cors = CorsConfig::default();
        assert!(cors.allow_any_origin);
        assert!(cors.allow_any_method);
        assert!(cors.allow_any_header);
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = Config::with_endpoint("https://example.openai.azure.com", "super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }

    #[test]
    fn test_bind_address() {
        let mut config = Config::with_endpoint("https://example.openai.azure.com", "k");
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9000;
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }
}

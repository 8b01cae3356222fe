//! Configuration validation

use super::*;
use crate::error::{RelayError, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_azure_openai_settings(&config.azure_openai)?;
    validate_server_config(&config.server)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validate provider settings
fn validate_azure_openai_settings(settings: &AzureOpenAISettings) -> Result<()> {
    if settings.endpoint.trim().is_empty() {
        return Err(RelayError::Config(
            "Azure OpenAI endpoint is required".to_string()
        ));
    }

    if !settings.endpoint.starts_with("http://") && !settings.endpoint.starts_with("https://") {
        return Err(RelayError::Config(
            "Azure OpenAI endpoint must start with http:// or https://".to_string()
        ));
    }

    if settings.key.expose_secret().trim().is_empty() {
        return Err(RelayError::Config(
            "Azure OpenAI key is required".to_string()
        ));
    }

    validate_deployment("chat completion", &settings.chat_completion_model)?;
    validate_deployment("embedding generation", &settings.embedding_generation_model)?;

    if settings.api_version.trim().is_empty() {
        return Err(RelayError::Config(
            "Azure OpenAI api_version cannot be empty".to_string()
        ));
    }

    if settings.timeout_secs == Some(0) {
        return Err(RelayError::Config(
            "Provider timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

fn validate_deployment(role: &str, deployment: &ModelDeployment) -> Result<()> {
    if deployment.alias.trim().is_empty() {
        return Err(RelayError::Config(
            format!("Alias for the {} model is required", role)
        ));
    }

    if deployment.deployment_name.trim().is_empty() {
        return Err(RelayError::Config(
            format!("Deployment name for the {} model is required", role)
        ));
    }

    Ok(())
}

/// Validate server configuration
pub fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(RelayError::Config(
            "Server port cannot be 0".to_string()
        ));
    }

    if config.host.is_empty() {
        return Err(RelayError::Config(
            "Server host cannot be empty".to_string()
        ));
    }

    if config.max_body_size_mb > 100 {
        return Err(RelayError::Config(
            "Max body size too large (max: 100 MB)".to_string()
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if config.level.trim().is_empty() {
        return Err(RelayError::Config(
            "Log level cannot be empty".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn valid_config() -> Config {
        Config::with_endpoint("https://example.openai.azure.com", "test_key")
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_endpoint() {
        let mut config = valid_config();
        config.azure_openai.endpoint = String::new();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let mut config = valid_config();
        config.azure_openai.endpoint = "example.openai.azure.com".to_string();

        assert!(validate_azure_openai_settings(&config.azure_openai).is_err());
    }

    #[test]
    fn test_missing_key() {
        let mut config = valid_config();
        config.azure_openai.key = Secret::new("  ".to_string());

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_chat_deployment_name() {
        let mut config = valid_config();
        config.azure_openai.chat_completion_model.deployment_name = String::new();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("chat completion"));
    }

    #[test]
    fn test_missing_embedding_alias() {
        let mut config = valid_config();
        config.azure_openai.embedding_generation_model.alias = String::new();

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_text_completion_model_is_optional() {
        let mut config = valid_config();
        config.azure_openai.text_completion_model = None;

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.azure_openai.timeout_secs = Some(0);

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = valid_config();
        config.server.port = 0;

        assert!(validate_server_config(&config.server).is_err());
    }
}

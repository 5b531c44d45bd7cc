use crate::{ConfigError, Network};

#[derive(Debug, Clone)]
pub struct SubstrateConfig {
    /// JSON-RPC endpoint of the substrate node
    ///
    /// Env: AIRGAP_SUBSTRATE_URL
    /// Valid schemes: http://, https://
    /// Default: http://127.0.0.1:9933
    pub url: String,

    /// Network the node belongs to
    ///
    /// Env: AIRGAP_SUBSTRATE_NETWORK
    /// Valid values: polkadot, kusama, westend
    /// Default: polkadot
    pub network: Network,
}

impl SubstrateConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::ValidateError(
                "Substrate URL cannot be empty".to_string(),
            ));
        }

        Self::validate_url(&self.url)
    }

    fn validate_url(url_str: &str) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(url_str)
            .map_err(|e| ConfigError::ValidateError(format!("Invalid URL '{}': {}", url_str, e)))?;

        // The RPC transport speaks plain JSON-RPC over HTTP.
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::ValidateError(format!(
                "Invalid URL scheme '{}'. Must be http:// or https://",
                scheme
            ))),
        }
    }
}

impl Default for SubstrateConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:9933".to_string(),
            network: Network::default(),
        }
    }
}

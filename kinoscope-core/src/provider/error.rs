// Provider Error Types

/// Errors raised by provider directory and catalog query collaborators.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Invalid locator: {0}")]
    InvalidLocator(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Provider already installed: {0}")]
    AlreadyInstalled(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<kinoscope_addons::AddonError> for ProviderError {
    fn from(err: kinoscope_addons::AddonError) -> Self {
        use kinoscope_addons::AddonError;
        match err {
            AddonError::InvalidLocator(msg) => Self::InvalidLocator(msg),
            AddonError::InvalidManifest(msg) => Self::InvalidManifest(msg),
            AddonError::Network(msg) => Self::Network(msg),
            AddonError::Http { status, url } => {
                Self::Upstream(format!("HTTP {status} for {url}"))
            }
            AddonError::Parse(msg) => Self::Upstream(format!("parse: {msg}")),
            AddonError::ResponseTooLarge { size } => {
                Self::Upstream(format!("response too large: {size} bytes"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use kinoscope_addons::AddonError;

    #[test]
    fn test_addon_error_mapping() {
        let err: ProviderError = AddonError::InvalidLocator("x".to_string()).into();
        assert!(matches!(err, ProviderError::InvalidLocator(_)));

        let err: ProviderError = AddonError::Network("refused".to_string()).into();
        assert!(matches!(err, ProviderError::Network(_)));

        let err: ProviderError = AddonError::ResponseTooLarge { size: 1 }.into();
        assert!(matches!(err, ProviderError::Upstream(_)));
    }
}

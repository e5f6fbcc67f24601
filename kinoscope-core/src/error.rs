use thiserror::Error;

use crate::provider::ProviderError;

/// Discovery engine errors.
///
/// Collaborator failures are converted into one of these at the component
/// boundary; raw transport errors never reach the controller's callers.
/// `CatalogList`, `ProviderList` and `PageQuery` are recoverable and
/// user-retriable; `Install` is logged during bootstrap and startup
/// continues without it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to list catalogs: {0}")]
    CatalogList(#[source] ProviderError),

    #[error("Failed to list providers: {0}")]
    ProviderList(#[source] ProviderError),

    #[error("Catalog page query failed: {0}")]
    PageQuery(#[source] ProviderError),

    #[error("Provider install failed: {0}")]
    Install(#[source] ProviderError),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown catalog: {0}")]
    UnknownCatalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

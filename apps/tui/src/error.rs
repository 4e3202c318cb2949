use thiserror::Error;

/// Failures raised by the recipe sources and the catalog engine.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("local recipe #{index} is missing required field '{field}'")]
    MalformedLocalRecord { index: usize, field: &'static str },
    #[error("no recipe found for id '{id}'")]
    DetailNotFound { id: String },
    #[error("local recipes unavailable from {location}: {reason}")]
    LocalSource { location: String, reason: String },
}

impl CatalogError {
    pub(crate) fn transport(url: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "timed out".to_string()
        } else {
            err.to_string()
        };
        Self::Transport {
            url: url.to_string(),
            reason,
        }
    }

    pub(crate) fn decode(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::DetailNotFound { .. })
    }
}

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CatalogError;

/// A record in the local dataset's own shape. Every field is optional here;
/// the normalizer decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LocalRecipe {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
}

fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

async fn read_location(location: &str, timeout: Duration) -> Result<String, CatalogError> {
    let unavailable = |reason: String| CatalogError::LocalSource {
        location: location.to_string(),
        reason,
    };

    if is_remote_location(location) {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| unavailable(err.to_string()))?;
        let response = client
            .get(location)
            .send()
            .await
            .map_err(|err| unavailable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(unavailable(format!("unexpected status {}", response.status())));
        }
        response.text().await.map_err(|err| unavailable(err.to_string()))
    } else {
        tokio::fs::read_to_string(location)
            .await
            .map_err(|err| unavailable(err.to_string()))
    }
}

/// Parses the dataset body. Entries that are not JSON objects of the expected
/// shape are skipped and logged rather than failing the whole file.
pub fn parse_local_recipes(location: &str, body: &str) -> Result<Vec<LocalRecipe>, CatalogError> {
    let entries: Vec<Value> =
        serde_json::from_str(body).map_err(|err| CatalogError::LocalSource {
            location: location.to_string(),
            reason: err.to_string(),
        })?;

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                warn!(index, error = %err, "skipping unreadable local recipe");
                None
            }
        })
        .collect())
}

/// Loads the local dataset from a file path or an http(s) URL.
pub async fn load_local_recipes(
    location: &str,
    timeout: Duration,
) -> Result<Vec<LocalRecipe>, CatalogError> {
    let body = read_location(location, timeout).await?;
    let recipes = parse_local_recipes(location, &body)?;
    debug!(location, count = recipes.len(), "loaded local recipes");
    Ok(recipes)
}

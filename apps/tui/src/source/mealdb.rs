use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{
    CanonicalRecipe, IngredientSlot, Ingredients, SourceKind, MAX_INGREDIENT_SLOTS,
};
use crate::error::CatalogError;
use crate::source::{RemoteFilter, RemoteRecipeSource};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

const UNKNOWN_AREA: &str = "Unknown";

/// Every MealDB endpoint wraps its rows in `{"meals": ...}`. A miss is reported as
/// `null` and some endpoints use a bare string instead of an empty array.
#[derive(Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Value,
}

#[derive(Deserialize)]
struct AreaRow {
    #[serde(rename = "strArea")]
    area: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealRow {
    #[serde(rename = "idMeal")]
    id: Option<String>,
    #[serde(rename = "strMeal")]
    name: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    /// `strIngredient1..20`, `strMeasure1..20` and whatever else the API adds.
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl MealRow {
    /// Partial record as the listing endpoints describe it. Rows without an id or a
    /// name are dropped.
    fn into_listing(self, area_hint: Option<&str>) -> Option<CanonicalRecipe> {
        let id = non_blank(self.id)?;
        let name = non_blank(self.name)?;
        let region = non_blank(self.area)
            .or_else(|| area_hint.map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_AREA.to_string());

        Some(CanonicalRecipe {
            id,
            name,
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            region,
            category: self.category.unwrap_or_default(),
            instructions: None,
            ingredients: Ingredients::Absent,
            source: SourceKind::Remote,
        })
    }

    fn into_detail(mut self) -> Option<CanonicalRecipe> {
        let slots = self.ingredient_slots();
        let instructions = self.instructions.take();
        let mut recipe = self.into_listing(None)?;
        recipe.instructions = instructions;
        recipe.ingredients = Ingredients::Indexed(slots);
        Some(recipe)
    }

    /// Slots are not guaranteed to be contiguous, so the full range is scanned.
    fn ingredient_slots(&self) -> Vec<IngredientSlot> {
        (1..=MAX_INGREDIENT_SLOTS)
            .filter_map(|position| {
                let ingredient = self.slot_text("strIngredient", position)?;
                let measure = self.slot_text("strMeasure", position).unwrap_or_default();
                Some(IngredientSlot {
                    position,
                    ingredient,
                    measure,
                })
            })
            .collect()
    }

    fn slot_text(&self, prefix: &str, position: usize) -> Option<String> {
        self.extra
            .get(&format!("{prefix}{position}"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

fn decode_meals<T: DeserializeOwned>(url: &str, body: &str) -> Result<Vec<T>, CatalogError> {
    let envelope: MealsEnvelope =
        serde_json::from_str(body).map_err(|err| CatalogError::decode(url, err))?;

    match envelope.meals {
        Value::Array(_) => {
            serde_json::from_value(envelope.meals).map_err(|err| CatalogError::decode(url, err))
        }
        Value::Null | Value::String(_) => Ok(Vec::new()),
        other => Err(CatalogError::decode(
            url,
            format!("unexpected 'meals' payload: {other}"),
        )),
    }
}

/// HTTP client for TheMealDB's public JSON API.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("recipe_browser")
            .build()
            .map_err(|err| CatalogError::transport(&base_url, &err))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn fetch_meals<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, CatalogError> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "requesting MealDB");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| CatalogError::transport(&url, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Transport {
                url,
                reason: format!("unexpected status {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| CatalogError::transport(&url, &err))?;

        decode_meals(&url, &body)
    }
}

impl RemoteRecipeSource for MealDbClient {
    async fn list_areas(&self) -> Result<Vec<String>, CatalogError> {
        let rows: Vec<AreaRow> = self.fetch_meals("list.php", &[("a", "list")]).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| non_blank(row.area))
            .collect())
    }

    async fn list_recipes(&self, filter: &RemoteFilter) -> Result<Vec<CanonicalRecipe>, CatalogError> {
        let (rows, area_hint): (Vec<MealRow>, Option<&str>) = match filter {
            RemoteFilter::All => (self.fetch_meals("search.php", &[("s", "")]).await?, None),
            RemoteFilter::Term(term) => (
                self.fetch_meals("search.php", &[("s", term.as_str())]).await?,
                None,
            ),
            RemoteFilter::Area(area) => (
                self.fetch_meals("filter.php", &[("a", area.as_str())]).await?,
                Some(area.as_str()),
            ),
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| row.into_listing(area_hint))
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<CanonicalRecipe>, CatalogError> {
        let rows: Vec<MealRow> = self.fetch_meals("lookup.php", &[("i", id)]).await?;
        Ok(rows.into_iter().next().and_then(MealRow::into_detail))
    }
}

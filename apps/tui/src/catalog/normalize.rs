use serde_json::Value;
use tracing::warn;

use crate::domain::{CanonicalRecipe, Ingredients, SourceKind, RESERVED_AREA};
use crate::error::CatalogError;
use crate::source::LocalRecipe;

fn local_id(value: Option<&Value>) -> Option<String> {
    let id = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn required_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Maps one local record onto the canonical shape. `index` is the record's
/// position in the dataset and only feeds the error.
pub fn normalize(index: usize, record: &LocalRecipe) -> Result<CanonicalRecipe, CatalogError> {
    let missing = |field| CatalogError::MalformedLocalRecord { index, field };

    let id = local_id(record.id.as_ref()).ok_or_else(|| missing("id"))?;
    let name = required_text(record.name.as_deref()).ok_or_else(|| missing("name"))?;
    let instructions =
        required_text(record.description.as_deref()).ok_or_else(|| missing("description"))?;
    let ingredients = record
        .ingredients
        .clone()
        .ok_or_else(|| missing("ingredients"))?;

    Ok(CanonicalRecipe {
        id,
        name,
        thumbnail_url: record.image.clone().unwrap_or_default(),
        region: RESERVED_AREA.to_string(),
        category: String::new(),
        instructions: Some(instructions),
        ingredients: Ingredients::Inline(ingredients),
        source: SourceKind::Local,
    })
}

/// Normalizes a whole dataset, skipping malformed records.
pub fn normalize_all(records: &[LocalRecipe]) -> Vec<CanonicalRecipe> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match normalize(index, record) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                warn!(error = %err, "dropping local recipe");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dosa() -> LocalRecipe {
        LocalRecipe {
            id: Some(Value::from("L1")),
            name: Some("Dosa".to_string()),
            image: Some("dosa.jpg".to_string()),
            description: Some("Ferment the batter overnight.".to_string()),
            ingredients: Some(vec!["rice".to_string(), "urad dal".to_string()]),
        }
    }

    #[test]
    fn local_record_becomes_reserved_area_recipe() -> Result<(), CatalogError> {
        let recipe = normalize(0, &dosa())?;

        assert_eq!(recipe.id, "L1");
        assert_eq!(recipe.name, "Dosa");
        assert_eq!(recipe.thumbnail_url, "dosa.jpg");
        assert_eq!(recipe.region, RESERVED_AREA);
        assert_eq!(recipe.category, "");
        assert_eq!(recipe.source, SourceKind::Local);
        assert_eq!(
            recipe.ingredients,
            Ingredients::Inline(vec!["rice".to_string(), "urad dal".to_string()])
        );
        assert!(recipe.is_fully_detailed());
        Ok(())
    }

    #[test]
    fn numeric_ids_are_stringified() -> Result<(), CatalogError> {
        let record = LocalRecipe {
            id: Some(Value::from(42)),
            ..dosa()
        };
        assert_eq!(normalize(0, &record)?.id, "42");
        Ok(())
    }

    #[test]
    fn missing_image_is_tolerated() -> Result<(), CatalogError> {
        let record = LocalRecipe {
            image: None,
            ..dosa()
        };
        assert_eq!(normalize(0, &record)?.thumbnail_url, "");
        Ok(())
    }

    #[test]
    fn each_required_field_is_enforced() {
        let cases = [
            (LocalRecipe { id: None, ..dosa() }, "id"),
            (LocalRecipe { id: Some(Value::Bool(true)), ..dosa() }, "id"),
            (LocalRecipe { name: Some("  ".to_string()), ..dosa() }, "name"),
            (LocalRecipe { description: None, ..dosa() }, "description"),
            (LocalRecipe { ingredients: None, ..dosa() }, "ingredients"),
        ];

        for (record, expected) in cases {
            match normalize(3, &record) {
                Err(CatalogError::MalformedLocalRecord { index, field }) => {
                    assert_eq!(index, 3);
                    assert_eq!(field, expected);
                }
                other => panic!("expected malformed '{expected}', got {other:?}"),
            }
        }
    }

    #[test]
    fn malformed_records_are_dropped_from_the_batch() {
        let broken = LocalRecipe {
            name: None,
            ..dosa()
        };
        let idli = LocalRecipe {
            id: Some(Value::from("L2")),
            name: Some("Idli".to_string()),
            ..dosa()
        };

        let recipes = normalize_all(&[dosa(), broken, idli]);
        let ids: Vec<&str> = recipes.iter().map(|recipe| recipe.id.as_str()).collect();
        assert_eq!(ids, vec!["L1", "L2"]);
    }
}

use serde::Serialize;

/// Area label that belongs to the local dataset. Remote listings never own it.
pub const RESERVED_AREA: &str = "Indian";

/// Highest ingredient slot the remote detail payload carries.
pub const MAX_INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Local,
    Remote,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Remote => "MealDB",
        }
    }
}

/// One populated slot of the remote `strIngredientN` / `strMeasureN` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientSlot {
    pub position: usize,
    pub ingredient: String,
    pub measure: String,
}

impl IngredientSlot {
    pub fn display(&self) -> String {
        format!("{} - {}", self.ingredient, self.measure)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Ingredients {
    /// Listing record that has not been through detail resolution.
    #[default]
    Absent,
    /// Pre-formatted entries, local dataset only.
    Inline(Vec<String>),
    /// Sparse positional pairs from a remote detail lookup.
    Indexed(Vec<IngredientSlot>),
}

impl Ingredients {
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            Self::Absent => Vec::new(),
            Self::Inline(items) => items.clone(),
            Self::Indexed(slots) => slots.iter().map(IngredientSlot::display).collect(),
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecipe {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub region: String,
    pub category: String,
    pub instructions: Option<String>,
    pub ingredients: Ingredients,
    pub source: SourceKind,
}

impl CanonicalRecipe {
    /// Whether the record can be shown in the detail view without a lookup.
    pub fn is_fully_detailed(&self) -> bool {
        match self.source {
            SourceKind::Local => true,
            SourceKind::Remote => {
                let has_instructions = self
                    .instructions
                    .as_deref()
                    .is_some_and(|text| !text.trim().is_empty());
                // Only a lookup produces indexed slots, even when all of them were blank
                let has_ingredients = match &self.ingredients {
                    Ingredients::Absent => false,
                    Ingredients::Inline(_) | Ingredients::Indexed(_) => true,
                };
                has_instructions || has_ingredients
            }
        }
    }

    /// Case-insensitive substring match on the name or any inline ingredient.
    ///
    /// `needle` must already be lowercased. Indexed ingredients are not searched.
    pub fn matches_term(&self, needle: &str) -> bool {
        if self.name.to_lowercase().contains(needle) {
            return true;
        }

        match &self.ingredients {
            Ingredients::Inline(items) => items
                .iter()
                .any(|item| item.to_lowercase().contains(needle)),
            Ingredients::Absent | Ingredients::Indexed(_) => false,
        }
    }

    pub fn instructions_text(&self) -> &str {
        self.instructions.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_listing(name: &str) -> CanonicalRecipe {
        CanonicalRecipe {
            id: "52772".to_string(),
            name: name.to_string(),
            thumbnail_url: String::new(),
            region: "Japanese".to_string(),
            category: String::new(),
            instructions: None,
            ingredients: Ingredients::Absent,
            source: SourceKind::Remote,
        }
    }

    #[test]
    fn remote_listing_is_not_fully_detailed() {
        assert!(!remote_listing("Teriyaki Chicken").is_fully_detailed());
    }

    #[test]
    fn remote_with_blank_instructions_still_needs_detail() {
        let mut recipe = remote_listing("Teriyaki Chicken");
        recipe.instructions = Some("   ".to_string());
        assert!(!recipe.is_fully_detailed());

        recipe.ingredients = Ingredients::Indexed(vec![IngredientSlot {
            position: 1,
            ingredient: "soy sauce".to_string(),
            measure: "3/4 cup".to_string(),
        }]);
        assert!(recipe.is_fully_detailed());
    }

    #[test]
    fn looked_up_remote_with_no_slots_counts_as_detailed() {
        let mut recipe = remote_listing("Teriyaki Chicken");
        recipe.instructions = Some(String::new());
        recipe.ingredients = Ingredients::Indexed(Vec::new());
        assert!(recipe.is_fully_detailed());
    }

    #[test]
    fn term_matching_ignores_indexed_ingredients() {
        let mut recipe = remote_listing("Teriyaki Chicken");
        recipe.ingredients = Ingredients::Indexed(vec![IngredientSlot {
            position: 1,
            ingredient: "Soy Sauce".to_string(),
            measure: "3/4 cup".to_string(),
        }]);

        assert!(recipe.matches_term("teriyaki"));
        assert!(!recipe.matches_term("soy"));
    }

    #[test]
    fn indexed_slots_render_as_ingredient_dash_measure() {
        let ingredients = Ingredients::Indexed(vec![IngredientSlot {
            position: 3,
            ingredient: "Garlic".to_string(),
            measure: "2 cloves".to_string(),
        }]);
        assert_eq!(ingredients.display_lines(), vec!["Garlic - 2 cloves"]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    constraint::entities::{CompiledConstraints, ComplexityTier},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Per-serving nutrition. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// A recipe as returned by the generation service, after field validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub cooking_time: u32,
    pub servings: u32,
    pub dietary_tags: Vec<String>,
    pub nutrition_info: NutritionInfo,
}

impl RecipeDraft {
    /// Ingredient and instruction text, lowercased, as scanned by the compliance checks.
    pub fn searchable_text(&self) -> String {
        let ingredients = self
            .ingredients
            .iter()
            .map(|i| format!("{} {}", i.quantity, i.name))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n{}", ingredients, self.instructions.join("\n")).to_lowercase()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.dietary_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// The finished artifact handed to persistence and display collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub recipe: RecipeDraft,
    pub image_url: Option<String>,
    pub complexity_tier: ComplexityTier,
    pub contradictions: Vec<String>,
}

impl GeneratedRecipe {
    pub fn new(
        recipe: RecipeDraft,
        image_url: Option<String>,
        constraints: &CompiledConstraints,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            generated_at: now,
            recipe,
            image_url,
            complexity_tier: constraints.complexity_tier,
            contradictions: constraints.contradiction_messages(),
        }
    }
}

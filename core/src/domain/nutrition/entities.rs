use serde::Serialize;

use crate::domain::recipe::entities::NutritionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IngredientCategory {
    ProteinSource,
    CarbSource,
    FatSource,
    Other,
}

/// A quantity reduced to the units the floor heuristic understands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Measure {
    Grams(f64),
    Cups(f64),
    Tablespoons(f64),
    Unrecognized,
}

/// Reported nutrition with the two cross-checks derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionEstimate {
    pub reported: NutritionInfo,
    /// `4 * protein + 4 * carbs + 9 * fat`.
    pub arithmetic_calories: f64,
    /// Conservative per-serving lower bound from ingredient quantities.
    pub floor_calories: f64,
    pub has_protein_source: bool,
    pub accepted: NutritionInfo,
}

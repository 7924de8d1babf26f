use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    nutrition::entities::{IngredientCategory, Measure},
    recipe::entities::{Ingredient, NutritionInfo},
};

const GRAMS_PER_POUND: f64 = 454.0;
const GRAMS_PER_OUNCE: f64 = 28.35;
const GRAMS_PER_KILOGRAM: f64 = 1000.0;
/// Rough cooked weight of a cup of grain-like food.
const GRAMS_PER_CUP: f64 = 150.0;
const CALORIES_PER_GRAM_FLOOR: f64 = 1.0;
const CALORIES_PER_TABLESPOON_FAT: f64 = 100.0;

const PROTEIN_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "lamb", "turkey", "fish", "salmon", "tuna", "shrimp", "tofu",
    "tempeh",
];
const CARB_KEYWORDS: &[&str] = &["rice", "pasta", "noodle", "potato", "bread", "quinoa"];
const FAT_KEYWORDS: &[&str] = &["oil", "butter", "cream"];

static QUANTITY: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.\d+|\d+)(?:\s+(\d+)/(\d+)|/(\d+))?\s*([a-z]+)?")
        .ok()
});

pub fn arithmetic_calories(info: &NutritionInfo) -> f64 {
    4.0 * info.protein + 4.0 * info.carbs + 9.0 * info.fat
}

/// Extracts the first number and the unit word that follows it.
///
/// Handles integers, decimals, fractions (`1/2`) and mixed numbers (`1 1/2`).
pub fn parse_quantity(quantity: &str) -> Measure {
    let quantity = quantity.to_lowercase();
    let Some(captures) = QUANTITY.as_ref().and_then(|re| re.captures(&quantity)) else {
        return Measure::Unrecognized;
    };

    let number = |i: usize| {
        captures
            .get(i)
            .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
    };

    let Some(lead) = number(1) else {
        return Measure::Unrecognized;
    };

    let amount = match (number(2), number(3), number(4)) {
        (Some(numerator), Some(denominator), _) if denominator > 0.0 => {
            lead + numerator / denominator
        }
        (_, _, Some(denominator)) if denominator > 0.0 => lead / denominator,
        (None, None, None) => lead,
        _ => return Measure::Unrecognized,
    };

    let unit = captures.get(5).map(|m| m.as_str()).unwrap_or_default();

    match unit {
        "lb" | "lbs" | "pound" | "pounds" => Measure::Grams(amount * GRAMS_PER_POUND),
        "g" | "gr" | "gram" | "grams" => Measure::Grams(amount),
        "kg" | "kgs" | "kilogram" | "kilograms" => Measure::Grams(amount * GRAMS_PER_KILOGRAM),
        "oz" | "ounce" | "ounces" => Measure::Grams(amount * GRAMS_PER_OUNCE),
        "cup" | "cups" => Measure::Cups(amount),
        "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Measure::Tablespoons(amount),
        _ => Measure::Unrecognized,
    }
}

/// First keyword family found in the name wins: protein, then carbohydrate, then fat.
pub fn classify_ingredient(name: &str) -> IngredientCategory {
    let name = name.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

    if mentions(PROTEIN_KEYWORDS) {
        IngredientCategory::ProteinSource
    } else if mentions(CARB_KEYWORDS) {
        IngredientCategory::CarbSource
    } else if mentions(FAT_KEYWORDS) {
        IngredientCategory::FatSource
    } else {
        IngredientCategory::Other
    }
}

/// Floor calories contributed by one ingredient for the whole recipe.
pub fn ingredient_floor(category: IngredientCategory, measure: Measure) -> f64 {
    match (category, measure) {
        (
            IngredientCategory::ProteinSource | IngredientCategory::CarbSource,
            Measure::Grams(grams),
        ) => grams * CALORIES_PER_GRAM_FLOOR,
        (
            IngredientCategory::ProteinSource | IngredientCategory::CarbSource,
            Measure::Cups(cups),
        ) => cups * GRAMS_PER_CUP * CALORIES_PER_GRAM_FLOOR,
        (IngredientCategory::FatSource, Measure::Tablespoons(tbsp)) => {
            tbsp * CALORIES_PER_TABLESPOON_FAT
        }
        _ => 0.0,
    }
}

/// Per-serving calorie floor and whether any protein source was seen.
pub fn floor_calories(ingredients: &[Ingredient], servings: u32) -> (f64, bool) {
    let mut total = 0.0;
    let mut has_protein_source = false;

    for ingredient in ingredients {
        let category = classify_ingredient(&ingredient.name);
        if category == IngredientCategory::ProteinSource {
            has_protein_source = true;
        }
        total += ingredient_floor(category, parse_quantity(&ingredient.quantity));
    }

    (total / f64::from(servings.max(1)), has_protein_source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_units() {
        assert_eq!(parse_quantity("2 lb"), Measure::Grams(908.0));
        assert_eq!(parse_quantity("200g"), Measure::Grams(200.0));
        assert_eq!(parse_quantity("1.5 kg"), Measure::Grams(1500.0));
        assert_eq!(parse_quantity("1/2 cup"), Measure::Cups(0.5));
        assert_eq!(parse_quantity("1 1/2 cups, cooked"), Measure::Cups(1.5));
        assert_eq!(parse_quantity("3 Tbsp"), Measure::Tablespoons(3.0));
        assert_eq!(parse_quantity("about 4 ounces"), Measure::Grams(4.0 * 28.35));
        assert_eq!(parse_quantity(".5 lb"), Measure::Grams(227.0));
        assert_eq!(parse_quantity("1,200 g"), Measure::Grams(1200.0));
    }

    #[test]
    fn unrecognized_quantities_contribute_nothing() {
        assert_eq!(parse_quantity("to taste"), Measure::Unrecognized);
        assert_eq!(parse_quantity("2 cloves"), Measure::Unrecognized);
        assert_eq!(parse_quantity("1/0 cup"), Measure::Unrecognized);
        assert_eq!(
            ingredient_floor(IngredientCategory::ProteinSource, Measure::Unrecognized),
            0.0
        );
    }

    #[test]
    fn classification_follows_keyword_priority() {
        assert_eq!(
            classify_ingredient("Chicken Breast"),
            IngredientCategory::ProteinSource
        );
        assert_eq!(classify_ingredient("basmati rice"), IngredientCategory::CarbSource);
        assert_eq!(classify_ingredient("olive oil"), IngredientCategory::FatSource);
        assert_eq!(classify_ingredient("rice bran oil"), IngredientCategory::CarbSource);
        assert_eq!(classify_ingredient("cilantro"), IngredientCategory::Other);
    }

    #[test]
    fn fats_count_only_by_the_tablespoon() {
        assert_eq!(
            ingredient_floor(IngredientCategory::FatSource, Measure::Tablespoons(2.0)),
            200.0
        );
        assert_eq!(
            ingredient_floor(IngredientCategory::FatSource, Measure::Grams(30.0)),
            0.0
        );
    }

    #[test]
    fn floor_is_per_serving() {
        let ingredients = vec![
            Ingredient::new("chicken breast", "2 lb"),
            Ingredient::new("rice", "2 cups"),
            Ingredient::new("olive oil", "1 tbsp"),
            Ingredient::new("salt", "1 tsp"),
        ];

        let (floor, has_protein) = floor_calories(&ingredients, 4);
        assert!(has_protein);
        assert_eq!(floor, (908.0 + 300.0 + 100.0) / 4.0);
    }

    #[test]
    fn arithmetic_identity() {
        let info = NutritionInfo {
            calories: 0.0,
            protein: 10.0,
            fat: 5.0,
            carbs: 20.0,
        };
        assert_eq!(arithmetic_calories(&info), 165.0);
    }
}

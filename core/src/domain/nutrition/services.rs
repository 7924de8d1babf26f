use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    image::ports::{AssetHostPort, ImageGenerator},
    llm::{
        entities::{ChatMessage, ChatRequest},
        ports::LLMClient,
    },
    nutrition::{
        entities::NutritionEstimate,
        helpers::{arithmetic_calories, floor_calories},
    },
    recipe::{
        entities::{Ingredient, NutritionInfo, RecipeDraft},
        helpers::{nutrition_from_value, parse_json_body},
    },
};

const DISCREPANCY_TOLERANCE_PERCENT: f64 = 10.0;
const FLOOR_TRIGGER_CALORIES: f64 = 100.0;

const DIETITIAN_PROMPT: &str = r#"You are a registered dietitian and professional nutritionist specializing in precise recipe nutrition analysis.
Calculate the nutritional values for the given ingredients and quantities with extremely high accuracy.

CRITICAL: You MUST analyze EVERY SINGLE INGREDIENT listed, including:
- ALL protein sources (meat, fish, poultry, eggs, dairy, legumes)
- ALL carbohydrates (grains, bread, pasta, quinoa, rice, potatoes, etc)
- ALL vegetables and fruits
- ALL oils, butter, and other fats
- ALL sauces, condiments, and seasonings
- ANY other ingredients, no matter how minor

STEP 1: For each ingredient, calculate its nutritional values accurately based on quantity.
STEP 2: Sum up ALL ingredients' nutrition to get total recipe values.
STEP 3: Divide by number of servings for per-serving values.
STEP 4: Verify your calculations using the formula: calories = (protein*4) + (carbs*4) + (fat*9)

For commonly misunderstood ingredients, use these values per 100g:

PROTEINS:
- Shrimp: 99 calories (20.3g protein, 1.7g fat, 0g carbs)
- Chicken breast: 165 calories (31g protein, 3.6g fat, 0g carbs)
- Chicken thigh: 209 calories (26g protein, 10.9g fat, 0g carbs)
- Ground beef (85% lean): 250 calories (26g protein, 15g fat, 0g carbs)
- Salmon: 208 calories (22g protein, 12g fat, 0g carbs)
- Tuna (canned in water): 86 calories (19g protein, 0.6g fat, 0g carbs)
- Eggs: 155 calories or ~70-80 calories per large egg (6g protein, 5g fat, 0.6g carbs)

CARBOHYDRATES:
- White rice (cooked): 130 calories (2.7g protein, 0.3g fat, 28g carbs)
- Brown rice (cooked): 112 calories (2.6g protein, 0.9g fat, 23g carbs)
- Quinoa (cooked): 120 calories (4.4g protein, 1.9g fat, 21g carbs)
- Farro (cooked): 140 calories (5g protein, 0.5g fat, 29g carbs)
- Buckwheat (cooked): 92 calories (3.4g protein, 0.6g fat, 20g carbs)
- Pasta (cooked): 158 calories (5.8g protein, 0.9g fat, 31g carbs)
- Sweet potato (cooked): 90 calories (1.6g protein, 0.1g fat, 21g carbs)
- Potato (cooked): 86 calories (1.9g protein, 0.1g fat, 19.7g carbs)
- Ezekiel bread (1 slice): 80 calories (4g protein, 0.5g fat, 15g carbs)

PLANT PROTEINS:
- Tofu (firm): 144 calories (17g protein, 8.7g fat, 2.8g carbs)
- Tempeh: 193 calories (20g protein, 11g fat, 9g carbs)
- Edamame: 121 calories (11g protein, 5.2g fat, 10g carbs)
- Lentils (cooked): 116 calories (9g protein, 0.4g fat, 20g carbs)
- Chickpeas (cooked): 164 calories (9g protein, 2.6g fat, 27g carbs)
- Black beans (cooked): 132 calories (8.9g protein, 0.5g fat, 24g carbs)
- Hemp seeds: 580 calories (32g protein, 49g fat, 8.7g carbs)
- Chia seeds: 486 calories (17g protein, 31g fat, 42g carbs)
- Spirulina (dried): 290 calories (57g protein, 7.7g fat, 24g carbs)

FATS (per tablespoon/15mL):
- Olive oil: 119 calories (0g protein, 14g fat, 0g carbs)
- Butter: 102 calories (0.1g protein, 11.5g fat, 0g carbs)
- Coconut oil: 117 calories (0g protein, 13.5g fat, 0g carbs)

COMMON CONVERSION REFERENCES:
- 1 pound = 454 grams
- 1 cup = ~240mL for liquids, varies for solids
- 1 tablespoon = 15mL
- 1 teaspoon = 5mL

IMPORTANT: Pay close attention to quantity units (lb, g, oz, cup, tbsp, etc.) and convert appropriately.
CALCULATIONS MUST INCLUDE ALL INGREDIENTS, no matter how small the amount.

Final values should be PER SERVING, calculated as (total recipe nutrition) / (number of servings).
Provide a JSON response with calories, protein (g), fat (g), and carbs (g)."#;

/// Cross-checks reported nutrition against the macro identity and the ingredient floor.
///
/// Never fails: implausible values are adjusted and logged.
pub fn reconcile_nutrition(
    ingredients: &[Ingredient],
    servings: u32,
    reported: NutritionInfo,
) -> NutritionEstimate {
    let arithmetic = arithmetic_calories(&reported);
    let mut accepted = reported;

    let disagrees = if reported.calories > 0.0 {
        (arithmetic - reported.calories).abs() / reported.calories * 100.0
            > DISCREPANCY_TOLERANCE_PERCENT
    } else {
        arithmetic > 0.0
    };

    if disagrees {
        tracing::warn!(
            reported = reported.calories,
            arithmetic,
            "Calories disagree with macros, using arithmetic value"
        );
        accepted.calories = arithmetic.round();
    }

    let (floor, has_protein_source) = floor_calories(ingredients, servings);
    tracing::debug!(floor, has_protein_source, "Minimum calorie sanity check");

    if has_protein_source && accepted.calories < floor && floor > FLOOR_TRIGGER_CALORIES {
        tracing::warn!(
            calories = accepted.calories,
            floor,
            "Calorie count suspiciously low, raising to floor"
        );
        accepted.calories = accepted.calories.max(floor.round());
    }

    NutritionEstimate {
        reported,
        arithmetic_calories: arithmetic,
        floor_calories: floor,
        has_protein_source,
        accepted,
    }
}

pub fn nutrition_analysis_request(ingredients: &[Ingredient], servings: u32) -> ChatRequest {
    let listing = serde_json::to_string(ingredients).unwrap_or_default();

    ChatRequest::new(vec![
        ChatMessage::system(DIETITIAN_PROMPT),
        ChatMessage::user(format!(
            "Analyze the nutrition for these ingredients with high accuracy. The recipe makes {servings} servings:\n{listing}"
        )),
    ])
}

impl<LLM, IG, AH> Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    /// Re-derives per-serving nutrition with a dedicated call, falling back to the draft's values.
    #[instrument(skip_all, fields(ingredients = draft.ingredients.len(), servings = draft.servings))]
    pub(crate) async fn analyze_nutrition(&self, draft: &RecipeDraft) -> NutritionInfo {
        match self.request_nutrition(draft).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(error = %e, "Nutrition analysis failed, keeping reported values");
                draft.nutrition_info
            }
        }
    }

    async fn request_nutrition(&self, draft: &RecipeDraft) -> Result<NutritionInfo, CoreError> {
        let request = nutrition_analysis_request(&draft.ingredients, draft.servings);
        let raw = self.llm_client.complete(request).await?;
        let value = parse_json_body(&raw).map_err(CoreError::ExternalServiceError)?;

        Ok(nutrition_from_value(Some(&value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reported(calories: f64, protein: f64, fat: f64, carbs: f64) -> NutritionInfo {
        NutritionInfo {
            calories,
            protein,
            fat,
            carbs,
        }
    }

    #[test]
    fn discrepant_calories_are_replaced_by_arithmetic() {
        let estimate = reconcile_nutrition(&[], 4, reported(1000.0, 10.0, 5.0, 20.0));

        assert_eq!(estimate.arithmetic_calories, 165.0);
        assert_eq!(estimate.accepted.calories, 165.0);
        assert_eq!(estimate.reported.calories, 1000.0);
    }

    #[test]
    fn calories_within_tolerance_are_kept() {
        let estimate = reconcile_nutrition(&[], 4, reported(175.0, 10.0, 5.0, 20.0));
        assert_eq!(estimate.accepted.calories, 175.0);
    }

    #[test]
    fn zero_reported_calories_take_the_arithmetic_value() {
        let estimate = reconcile_nutrition(&[], 2, reported(0.0, 10.0, 5.0, 20.0));
        assert_eq!(estimate.accepted.calories, 165.0);

        let empty = reconcile_nutrition(&[], 2, NutritionInfo::default());
        assert_eq!(empty.accepted, NutritionInfo::default());
    }

    #[test]
    fn protein_floor_raises_implausibly_low_calories() {
        let ingredients = vec![Ingredient::new("chicken breast", "2 lb")];

        let estimate = reconcile_nutrition(&ingredients, 4, reported(5.0, 0.0, 0.0, 0.0));

        assert_eq!(estimate.floor_calories, 227.0);
        assert!(estimate.has_protein_source);
        assert!(estimate.accepted.calories >= 227.0);
    }

    #[test]
    fn floor_needs_a_protein_source() {
        let ingredients = vec![Ingredient::new("rice", "4 cups")];

        let estimate = reconcile_nutrition(&ingredients, 2, reported(40.0, 2.0, 0.0, 8.0));

        assert_eq!(estimate.floor_calories, 300.0);
        assert_eq!(estimate.accepted.calories, 40.0);
    }

    #[test]
    fn small_floors_are_ignored() {
        let ingredients = vec![Ingredient::new("tofu", "200 g")];

        let estimate = reconcile_nutrition(&ingredients, 4, reported(40.0, 4.0, 2.0, 1.0));

        assert_eq!(estimate.floor_calories, 50.0);
        assert_eq!(estimate.accepted.calories, 40.0);
    }

    #[test]
    fn analysis_request_lists_servings_and_ingredients() {
        let request = nutrition_analysis_request(&[Ingredient::new("tofu", "200 g")], 3);

        let user = request.user_content().unwrap();
        assert!(user.contains("makes 3 servings"));
        assert!(user.contains("\"tofu\""));
        assert!(request.system_content().unwrap().contains("registered dietitian"));
    }
}

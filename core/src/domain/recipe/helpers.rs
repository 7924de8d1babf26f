use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::recipe::entities::{Ingredient, NutritionInfo, RecipeDraft};

static STEP_NUMBERING: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:step\s*\d+\s*[:.)-]?\s*|\d+\s*[.):](?:\s+|$))").ok()
});

static LEADING_NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)?(?:\.\d+)?").ok()
});

/// Parses a response body as a JSON object, tolerating Markdown code fences.
pub fn parse_json_body(raw: &str) -> Result<Value, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty response body".to_string());
    }

    let body = strip_code_fence(trimmed);
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("response is not valid JSON: {}", e))?;

    if !value.is_object() {
        return Err("response is not a JSON object".to_string());
    }

    Ok(value)
}

fn strip_code_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Builds a draft from a parsed response, or names every mandatory field that is absent.
pub fn draft_from_value(value: &Value) -> Result<RecipeDraft, Vec<&'static str>> {
    let title = non_empty_string(value.get("title"));
    let description = non_empty_string(value.get("description"));
    let ingredients = ingredients(value.get("ingredients"));
    let instructions = instructions(value.get("instructions"));
    let cooking_time = positive_count(value.get("cookingTime"));
    let servings = positive_count(value.get("servings"));

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title");
    }
    if description.is_none() {
        missing.push("description");
    }
    if ingredients.is_empty() {
        missing.push("ingredients");
    }
    if instructions.is_empty() {
        missing.push("instructions");
    }
    if cooking_time.is_none() {
        missing.push("cookingTime");
    }
    if servings.is_none() {
        missing.push("servings");
    }

    match (title, description, cooking_time, servings) {
        (Some(title), Some(description), Some(cooking_time), Some(servings))
            if missing.is_empty() =>
        {
            Ok(RecipeDraft {
                title,
                description,
                ingredients,
                instructions,
                cooking_time,
                servings,
                dietary_tags: dietary_tags(value.get("dietaryTags")),
                nutrition_info: nutrition_from_value(value.get("nutritionInfo")),
            })
        }
        _ => Err(missing),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn ingredients(value: Option<&Value>) -> Vec<Ingredient> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let name = non_empty_string(item.get("name"))?;
            let quantity = match item.get("quantity") {
                Some(Value::String(q)) => q.trim().to_string(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            Some(Ingredient { name, quantity })
        })
        .collect()
}

fn instructions(value: Option<&Value>) -> Vec<String> {
    let Some(steps) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    steps
        .iter()
        .filter_map(Value::as_str)
        .map(strip_step_numbering)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Removes a leading `1.`, `2)` or `Step 3:` marker from an instruction.
pub fn strip_step_numbering(step: &str) -> String {
    let step = step.trim();
    match STEP_NUMBERING.as_ref() {
        Some(pattern) => pattern.replace(step, "").trim().to_string(),
        None => step.to_string(),
    }
}

/// Reads a number that may arrive as a JSON number or a numeric string.
pub fn lenient_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let numeric = LEADING_NUMBER.as_ref()?.find(s.trim())?.as_str().replace(',', "");
            numeric.parse().ok()
        }
        _ => None,
    }
}

fn positive_count(value: Option<&Value>) -> Option<u32> {
    let n = lenient_number(value)?.round();
    (n >= 1.0 && n <= f64::from(u32::MAX)).then_some(n as u32)
}

fn dietary_tags(value: Option<&Value>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for tag in value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|t| non_empty_string(Some(t)))
    {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }

    tags
}

/// Reads nutrition values, defaulting absent fields to zero and clamping negatives.
pub fn nutrition_from_value(value: Option<&Value>) -> NutritionInfo {
    let field = |name: &str| {
        lenient_number(value.and_then(|v| v.get(name)))
            .filter(|n| n.is_finite())
            .unwrap_or(0.0)
            .max(0.0)
    };

    NutritionInfo {
        calories: field("calories"),
        protein: field("protein"),
        fat: field("fat"),
        carbs: field("carbs"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn complete_response() -> Value {
        json!({
            "title": "Dal Tadka",
            "description": "Yellow lentils finished with a sizzling tempering",
            "ingredients": [
                {"name": "toor dal", "quantity": "1 cup"},
                {"name": "cumin seeds", "quantity": 1}
            ],
            "instructions": ["1. Rinse the dal", "Step 2: Pressure cook", "3) Temper the spices"],
            "cookingTime": "40",
            "servings": 4.0,
            "dietaryTags": ["vegan", "Vegan", "gluten-free"],
            "nutritionInfo": {"calories": 250, "protein": "14", "fat": -2}
        })
    }

    #[test]
    fn parses_a_complete_response_leniently() {
        let draft = draft_from_value(&complete_response()).unwrap();

        assert_eq!(draft.title, "Dal Tadka");
        assert_eq!(draft.ingredients[1].quantity, "1");
        assert_eq!(
            draft.instructions,
            vec!["Rinse the dal", "Pressure cook", "Temper the spices"]
        );
        assert_eq!(draft.cooking_time, 40);
        assert_eq!(draft.servings, 4);
        assert_eq!(draft.dietary_tags, vec!["vegan", "gluten-free"]);
        assert_eq!(draft.nutrition_info.protein, 14.0);
        assert_eq!(draft.nutrition_info.fat, 0.0);
        assert_eq!(draft.nutrition_info.carbs, 0.0);
    }

    #[test]
    fn names_every_missing_mandatory_field() {
        let mut response = complete_response();
        let object = response.as_object_mut().unwrap();
        object.remove("title");
        object.insert("servings".to_string(), json!(0));
        object.insert("instructions".to_string(), json!([]));

        assert_eq!(
            draft_from_value(&response).unwrap_err(),
            vec!["title", "instructions", "servings"]
        );
    }

    #[test]
    fn optional_fields_default() {
        let mut response = complete_response();
        let object = response.as_object_mut().unwrap();
        object.remove("dietaryTags");
        object.remove("nutritionInfo");

        let draft = draft_from_value(&response).unwrap();
        assert!(draft.dietary_tags.is_empty());
        assert_eq!(draft.nutrition_info, NutritionInfo::default());
    }

    #[test]
    fn json_body_tolerates_fences_and_rejects_garbage() {
        assert!(parse_json_body("```json\n{\"a\": 1}\n```").is_ok());
        assert!(parse_json_body("  ").is_err());
        assert!(parse_json_body("not json").is_err());
        assert!(parse_json_body("[1, 2]").is_err());
    }

    #[test]
    fn step_numbering_is_stripped_but_content_numbers_survive() {
        assert_eq!(strip_step_numbering("12. Bake for 20 minutes"), "Bake for 20 minutes");
        assert_eq!(strip_step_numbering("Add 2 cups water"), "Add 2 cups water");
        assert_eq!(
            strip_step_numbering("1.5 cups of water go into the pot"),
            "1.5 cups of water go into the pot"
        );
        assert_eq!(
            strip_step_numbering("2-3 minutes until golden"),
            "2-3 minutes until golden"
        );
        assert_eq!(strip_step_numbering("4) Garnish"), "Garnish");
        assert_eq!(strip_step_numbering("Step 5 - Serve hot"), "Serve hot");
    }

    #[test]
    fn numeric_strings_allow_separators_and_leading_dots() {
        assert_eq!(lenient_number(Some(&json!("1,200 kcal"))), Some(1200.0));
        assert_eq!(lenient_number(Some(&json!(".5"))), Some(0.5));
        assert_eq!(lenient_number(Some(&json!("12.5g"))), Some(12.5));
        assert_eq!(lenient_number(Some(&json!("about 3"))), None);
    }
}

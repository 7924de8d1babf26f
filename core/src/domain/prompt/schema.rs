use serde_json::json;

/// Response shape echoed verbatim in every recipe-generation system instruction.
pub const RECIPE_JSON_SHAPE: &str = r#"{
  "title": "Recipe title",
  "description": "Brief appetizing description",
  "ingredients": [{"name": "ingredient name", "quantity": "amount with units"}],
  "instructions": ["First instruction without numbering", "Second instruction without numbering", ...],
  "cookingTime": total time in minutes (number),
  "servings": number of servings (number),
  "dietaryTags": ["tag1", "tag2", ...],
  "nutritionInfo": {
    "calories": number,
    "protein": number in grams,
    "fat": number in grams,
    "carbs": number in grams
  }
}"#;

pub const RECIPE_SCHEMA_NAME: &str = "recipe";

/// JSON schema matching [`RECIPE_JSON_SHAPE`], for structured-output mode.
pub fn get_recipe_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": { "type": "string" },
            "ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "string" }
                    },
                    "required": ["name", "quantity"]
                }
            },
            "instructions": {
                "type": "array",
                "items": { "type": "string" }
            },
            "cookingTime": { "type": "number" },
            "servings": { "type": "number" },
            "dietaryTags": {
                "type": "array",
                "items": { "type": "string" }
            },
            "nutritionInfo": get_nutrition_schema()
        },
        "required": [
            "title", "description", "ingredients", "instructions",
            "cookingTime", "servings", "dietaryTags", "nutritionInfo"
        ]
    })
}

pub fn get_nutrition_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "calories": { "type": "number" },
            "protein": { "type": "number" },
            "fat": { "type": "number" },
            "carbs": { "type": "number" }
        },
        "required": ["calories", "protein", "fat", "carbs"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_every_shape_field() {
        let schema = get_recipe_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();

        for field in required {
            assert!(
                RECIPE_JSON_SHAPE.contains(&format!("\"{field}\"")),
                "{field} missing from the shape"
            );
        }
    }
}

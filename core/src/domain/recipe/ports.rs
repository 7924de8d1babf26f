use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{entities::GeneratedRecipe, value_objects::GenerateRecipeInput},
};

/// Inbound port: one request in, one finished recipe (or a classified failure) out.
pub trait RecipeGenerationService: Send + Sync {
    fn generate_recipe(
        &self,
        input: GenerateRecipeInput,
    ) -> impl Future<Output = Result<GeneratedRecipe, CoreError>> + Send;
}

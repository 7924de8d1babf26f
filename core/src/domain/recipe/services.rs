use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    constraint::services::compile_constraints,
    image::ports::{AssetHostPort, ImageGenerator},
    llm::ports::LLMClient,
    nutrition::services::reconcile_nutrition,
    prompt::services::assemble_prompt,
    recipe::{
        entities::GeneratedRecipe,
        generation::{GenerationPlan, generate_draft},
        ports::RecipeGenerationService,
        value_objects::GenerateRecipeInput,
    },
    safety::services::annotate,
};

impl<LLM, IG, AH> RecipeGenerationService for Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    #[instrument(skip(self, input), fields(filters = input.dietary_filters.len()))]
    async fn generate_recipe(
        &self,
        input: GenerateRecipeInput,
    ) -> Result<GeneratedRecipe, CoreError> {
        input.ensure_valid()?;

        let constraints = compile_constraints(&input.dietary_filters);
        tracing::info!(
            received = ?input.dietary_filters,
            normalized = ?constraints.canonical_ids(),
            tier = ?constraints.complexity_tier,
            "Compiled dietary constraints"
        );
        if !constraints.contradictions.is_empty() {
            tracing::warn!(
                contradictions = ?constraints.contradiction_messages(),
                "Conflicting dietary filters selected"
            );
        }

        let prompt = self.with_rng(|rng| assemble_prompt(&input.prompt, &constraints, rng))?;
        let plan = GenerationPlan::for_tier(constraints.complexity_tier, &self.settings);

        let draft = generate_draft(self.llm_client.as_ref(), prompt.to_messages(), plan).await?;
        let mut draft = self
            .enforce_compliance(&input.prompt, &constraints, draft)
            .await?;

        let reported = if self.settings.analyze_nutrition {
            self.analyze_nutrition(&draft).await
        } else {
            draft.nutrition_info
        };
        draft.nutrition_info =
            reconcile_nutrition(&draft.ingredients, draft.servings, reported).accepted;

        let (verdict, image_url) =
            futures::join!(self.check_safety(&draft), self.synthesize_image(&draft));
        let draft = annotate(draft, verdict);

        let recipe = GeneratedRecipe::new(draft, image_url, &constraints);
        tracing::info!(
            id = %recipe.id,
            title = %recipe.recipe.title,
            has_image = recipe.image_url.is_some(),
            "Recipe generated"
        );

        Ok(recipe)
    }
}

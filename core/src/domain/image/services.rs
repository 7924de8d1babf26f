use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    image::{
        helpers::image_prompt,
        ports::{AssetHostPort, ImageGenerator},
    },
    llm::ports::LLMClient,
    recipe::entities::RecipeDraft,
};

impl<LLM, IG, AH> Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    /// Generates and persists a dish image. Any failure degrades to `None`.
    #[instrument(skip_all, fields(title = %draft.title))]
    pub(crate) async fn synthesize_image(&self, draft: &RecipeDraft) -> Option<String> {
        match self.generate_and_persist(draft).await {
            Ok(url) => {
                tracing::info!(url = %url, "Recipe image stored");
                Some(url)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recipe image unavailable, continuing without one");
                None
            }
        }
    }

    async fn generate_and_persist(&self, draft: &RecipeDraft) -> Result<String, CoreError> {
        let prompt = image_prompt(&draft.title, &draft.description, &draft.instructions);
        let transient_url = self.image_generator.generate_image(prompt).await?;

        self.asset_host
            .persist_from_url(transient_url, self.image_folder.clone())
            .await
    }
}

use crate::{
    domain::common::{RecipeGenConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        image::openai_image_client::OpenAIImageClient, llm::openai_client::OpenAIClient,
        object_storage::minio::MinioAssetHost,
    },
};

pub type RecipeGenService = Service<OpenAIClient, OpenAIImageClient, MinioAssetHost>;

pub async fn create_service(config: RecipeGenConfig) -> Result<RecipeGenService, CoreError> {
    let llm_client = OpenAIClient::new(&config.llm)?;
    let image_generator = OpenAIImageClient::new(&config.llm)?;
    let asset_host = MinioAssetHost::new(&config.object_storage).await;

    tracing::info!(
        model = %config.llm.model,
        image_model = %config.llm.image_model,
        analyze_nutrition = config.generation.analyze_nutrition,
        seeded = config.generation.protein_seed.is_some(),
        "Recipe generation service ready"
    );

    Ok(Service::new(
        llm_client,
        image_generator,
        asset_host,
        config.generation,
        config.object_storage.folder,
    ))
}

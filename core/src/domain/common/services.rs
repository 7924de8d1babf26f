use std::sync::{Arc, Mutex};

use rand::{SeedableRng, rngs::StdRng};

use crate::domain::{
    common::{GenerationSettings, entities::app_errors::CoreError},
    image::ports::{AssetHostPort, ImageGenerator},
    llm::ports::LLMClient,
};

/// The recipe pipeline, generic over its three collaborators.
pub struct Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) image_generator: Arc<IG>,
    pub(crate) asset_host: Arc<AH>,
    pub(crate) settings: GenerationSettings,
    pub(crate) image_folder: String,
    rng: Arc<Mutex<StdRng>>,
}

impl<LLM, IG, AH> Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    pub fn new(
        llm_client: LLM,
        image_generator: IG,
        asset_host: AH,
        settings: GenerationSettings,
        image_folder: String,
    ) -> Self {
        let rng = match settings.protein_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            llm_client: Arc::new(llm_client),
            image_generator: Arc::new(image_generator),
            asset_host: Arc::new(asset_host),
            settings,
            image_folder,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Runs `f` with exclusive access to the service RNG.
    ///
    /// The lock is released before returning, so callers may freely await afterwards.
    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> Result<T, CoreError> {
        let mut rng = self.rng.lock().map_err(|e| {
            tracing::error!("Service RNG lock poisoned: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(f(&mut rng))
    }
}

impl<LLM, IG, AH> Clone for Service<LLM, IG, AH>
where
    LLM: LLMClient,
    IG: ImageGenerator,
    AH: AssetHostPort,
{
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            image_generator: Arc::clone(&self.image_generator),
            asset_host: Arc::clone(&self.asset_host),
            settings: self.settings.clone(),
            image_folder: self.image_folder.clone(),
            rng: Arc::clone(&self.rng),
        }
    }
}

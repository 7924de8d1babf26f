use clap::{Args as ClapArgs, Parser};
use recipegen_core::domain::{
    common::{
        DEFAULT_IMAGE_FOLDER, DEFAULT_IMAGE_MODEL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL,
        DEFAULT_REQUEST_TIMEOUT_SECS, GenerationSettings, LLMConfig, ObjectStorageConfig,
        RecipeGenConfig,
    },
    recipe::value_objects::GenerateRecipeInput,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "recipegen")]
#[command(about = "Generate a constraint-checked recipe", long_about = None)]
pub struct Args {
    /// Free-text description of the dish
    #[arg(long, short)]
    pub prompt: String,

    /// Dietary, allergy or cuisine filter (repeatable)
    #[arg(long = "filter", short = 'f')]
    pub filters: Vec<String>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "llm-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long = "llm-base-url", env = "OPENAI_BASE_URL", default_value = DEFAULT_LLM_BASE_URL)]
    pub base_url: String,

    #[arg(long = "llm-model", env = "OPENAI_MODEL", default_value = DEFAULT_LLM_MODEL)]
    pub model: String,

    #[arg(long = "image-model", env = "OPENAI_IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    /// Per-request timeout for collaborator calls, in seconds
    #[arg(long = "llm-timeout", env = "LLM_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ObjectStorageArgs {
    #[arg(long = "minio-endpoint", env = "MINIO_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long = "minio-region", env = "MINIO_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "minio-access-key", env = "MINIO_ACCESS_KEY", default_value = "minioadmin")]
    pub access_key: String,

    #[arg(
        long = "minio-secret-key",
        env = "MINIO_SECRET_KEY",
        default_value = "minioadmin",
        hide_env_values = true
    )]
    pub secret_key: String,

    #[arg(long = "minio-bucket", env = "MINIO_BUCKET", default_value = "recipegen")]
    pub bucket: String,

    /// Public base URL the stored images are served from. Defaults to the endpoint.
    #[arg(long = "minio-public-url", env = "MINIO_PUBLIC_URL")]
    pub public_base_url: Option<String>,

    #[arg(long = "image-folder", env = "IMAGE_FOLDER", default_value = DEFAULT_IMAGE_FOLDER)]
    pub folder: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct GenerationArgs {
    #[arg(long, env = "COMPLEX_TEMPERATURE", default_value_t = 1.2)]
    pub complex_temperature: f32,

    #[arg(long, env = "SIMPLE_TEMPERATURE")]
    pub simple_temperature: Option<f32>,

    /// Seed for the protein-category steer, for reproducible prompts
    #[arg(long, env = "PROTEIN_SEED")]
    pub seed: Option<u64>,

    /// Re-derive nutrition with a dedicated analysis call
    #[arg(long, env = "ANALYZE_NUTRITION", default_value_t = false)]
    pub analyze_nutrition: bool,
}

impl Args {
    pub fn input(&self) -> GenerateRecipeInput {
        GenerateRecipeInput::new(self.prompt.clone(), self.filters.clone())
    }
}

impl From<Args> for RecipeGenConfig {
    fn from(args: Args) -> Self {
        let storage = args.object_storage;

        Self {
            llm: LLMConfig {
                api_key: args.llm.api_key,
                base_url: args.llm.base_url,
                model: args.llm.model,
                image_model: args.llm.image_model,
                request_timeout_secs: args.llm.request_timeout_secs,
            },
            object_storage: ObjectStorageConfig {
                public_base_url: storage
                    .public_base_url
                    .unwrap_or_else(|| storage.endpoint.clone()),
                endpoint: storage.endpoint,
                region: storage.region,
                access_key: storage.access_key,
                secret_key: storage.secret_key,
                bucket: storage.bucket,
                folder: storage.folder,
            },
            generation: GenerationSettings {
                complex_temperature: args.generation.complex_temperature,
                simple_temperature: args.generation.simple_temperature,
                protein_seed: args.generation.seed,
                analyze_nutrition: args.generation.analyze_nutrition,
            },
        }
    }
}

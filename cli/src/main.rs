mod args;

use anyhow::Result;
use clap::Parser;
use recipegen_core::{
    application::create_service, domain::common::RecipeGenConfig,
    domain::recipe::ports::RecipeGenerationService,
};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_json);

    let input = args.input();
    let service = create_service(RecipeGenConfig::from(args)).await?;

    tracing::info!(
        prompt = %input.prompt,
        filters = ?input.dietary_filters,
        "Generating recipe"
    );
    let recipe = service.generate_recipe(input).await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}

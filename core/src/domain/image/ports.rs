use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// Text-to-image collaborator. Returns a transient URL for one square image.
#[cfg_attr(test, mockall::automock)]
pub trait ImageGenerator: Send + Sync {
    fn generate_image(&self, prompt: String)
    -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Durable asset hosting. Copies a transient image and returns its permanent URL.
#[cfg_attr(test, mockall::automock)]
pub trait AssetHostPort: Send + Sync {
    fn persist_from_url(
        &self,
        url: String,
        folder: String,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

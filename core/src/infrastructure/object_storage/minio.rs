use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
};
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError, generate_uuid_v7},
    image::ports::AssetHostPort,
};

/// Downloaded image bytes with their declared media type.
#[derive(Debug, Clone, PartialEq)]
struct FetchedAsset {
    payload: Bytes,
    content_type: String,
}

impl FetchedAsset {
    fn extension(&self) -> &'static str {
        match self.content_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Re-hosts generated images in an S3-compatible bucket.
#[derive(Clone)]
pub struct MinioAssetHost {
    client: Client,
    http: reqwest::Client,
    bucket: String,
    public_base_url: String,
}

impl MinioAssetHost {
    pub async fn new(config: &ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "recipegen",
        );

        let endpoint = config.endpoint.trim_end_matches('/');

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            http: reqwest::Client::new(),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<FetchedAsset, CoreError> {
        if url.starts_with("data:") {
            return decode_data_url(url);
        }

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to download generated image");
            CoreError::ObjectStorageError(format!("Failed to download image: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(status = %status, "Image download returned an error");
            return Err(CoreError::ObjectStorageError(format!(
                "Image download returned {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .unwrap_or_else(|| "image/png".to_string());

        let payload = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to read image body");
            CoreError::ObjectStorageError(format!("Failed to read image body: {}", e))
        })?;

        Ok(FetchedAsset {
            payload,
            content_type,
        })
    }

    #[instrument(skip(self, payload))]
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        let payload_size = payload.len();

        tracing::info!(
            bucket = %self.bucket,
            object_key = %object_key,
            size = payload_size,
            content_type = %content_type,
            "Uploading image to storage"
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("{}", e);
                let error_kind = if error_msg.contains("dispatch failure") {
                    "HTTP client dispatch failure - check endpoint URL and network connectivity"
                } else if error_msg.contains("timeout") {
                    "Request timeout - check network connection and MinIO server status"
                } else if error_msg.contains("connection") {
                    "Connection error - check MinIO endpoint and network"
                } else {
                    "Unknown error"
                };

                tracing::error!(
                    error = %e,
                    error_kind = %error_kind,
                    bucket = %self.bucket,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload image"
                );
                CoreError::ObjectStorageError(format!(
                    "Failed to upload object: {} ({})",
                    e, error_kind
                ))
            })?;

        Ok(())
    }
}

impl AssetHostPort for MinioAssetHost {
    #[instrument(skip(self, url))]
    async fn persist_from_url(&self, url: String, folder: String) -> Result<String, CoreError> {
        let asset = self.fetch(&url).await?;
        let object_key = object_key_for(&folder, &asset);

        self.put_object(&object_key, asset.payload, &asset.content_type)
            .await?;

        let public_url = format!("{}/{}/{}", self.public_base_url, self.bucket, object_key);

        tracing::info!(object_key = %object_key, "Image persisted");

        Ok(public_url)
    }
}

fn decode_data_url(url: &str) -> Result<FetchedAsset, CoreError> {
    let invalid = || CoreError::ObjectStorageError("Malformed data URL".to_string());

    let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
    let (meta, data) = rest.split_once(',').ok_or_else(invalid)?;
    let content_type = meta.strip_suffix(";base64").ok_or_else(invalid)?;

    let payload = general_purpose::STANDARD.decode(data.trim()).map_err(|e| {
        tracing::error!(error = %e, "Failed to decode inline image");
        CoreError::ObjectStorageError(format!("Invalid base64 image: {}", e))
    })?;

    Ok(FetchedAsset {
        payload: Bytes::from(payload),
        content_type: if content_type.is_empty() {
            "image/png".to_string()
        } else {
            content_type.to_string()
        },
    })
}

/// `<folder>/<uuid-v7>-<first 16 hex chars of sha256>.<ext>`
fn object_key_for(folder: &str, asset: &FetchedAsset) -> String {
    let digest = Sha256::digest(&asset.payload);
    let checksum = hex::encode(digest);

    format!(
        "{}/{}-{}.{}",
        folder.trim_matches('/'),
        generate_uuid_v7(),
        &checksum[..16],
        asset.extension()
    )
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart::{Form, Part}, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::{
    entities::asset::{AssetRef, ResourceType, UploadedFile},
    errors::AppError,
    repositories::asset_store::{AssetError, AssetStore},
    settings::AppConfig,
};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Signed REST client for the Cloudinary upload API.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: Client,
    cloud_name: String,
    api_key: String,
    api_secret: Zeroizing<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
    #[serde(default)]
    resource_type: ResourceType,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build media host client: {}", e)))?;

        Ok(CloudinaryClient {
            http,
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: Zeroizing::new(config.cloudinary_api_secret.clone()),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/{}", API_BASE, self.cloud_name, action)
    }

    /// Destroy must target the resource type the asset was filed under;
    /// any other type answers "not found".
    fn destroy_endpoint(&self, resource_type: ResourceType) -> String {
        self.endpoint(&format!("{}/destroy", resource_type))
    }

    fn sign(&self, params: &[(&str, &str)]) -> String {
        sign_params(params, &self.api_secret)
    }

    async fn rejection(response: reqwest::Response) -> AssetError {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => AssetError::Rejected(body.error.message),
            Err(_) => AssetError::Rejected(status.to_string()),
        }
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as
/// `k=v&k=v`, suffixed with the API secret and hashed with SHA-256.
fn sign_params(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{:x}", Sha256::digest(format!("{}{}", joined, secret).as_bytes()))
}

fn unix_timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

#[async_trait]
impl AssetStore for CloudinaryClient {
    async fn upload(&self, file: &UploadedFile, folder: &str) -> Result<AssetRef, AssetError> {
        let bytes = tokio::fs::read(file.path())
            .await
            .map_err(|e| AssetError::Io(e.to_string()))?;

        let timestamp = unix_timestamp();
        let signature = self.sign(&[("folder", folder), ("timestamp", &timestamp)]);

        let mut part = Part::bytes(bytes);
        if let Some(name) = file.file_name() {
            part = part.file_name(name.to_string());
        }

        let form = Form::new()
            .part("file", part)
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http
            .post(self.endpoint("auto/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssetError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AssetError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            public_id = %uploaded.public_id,
            resource_type = %uploaded.resource_type,
            folder,
            "Asset uploaded"
        );

        Ok(AssetRef {
            public_id: uploaded.public_id,
            url: uploaded.secure_url,
            resource_type: uploaded.resource_type,
        })
    }

    async fn destroy(&self, asset: &AssetRef) -> Result<(), AssetError> {
        let public_id = asset.public_id.as_str();
        let timestamp = unix_timestamp();
        let signature = self.sign(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let params = [
            ("public_id", public_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let response = self
            .http
            .post(self.destroy_endpoint(asset.resource_type))
            .form(&params)
            .send()
            .await
            .map_err(|e| AssetError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let outcome: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AssetError::InvalidResponse(e.to_string()))?;

        match outcome.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(AssetError::Rejected(other.to_string())),
        }
    }
}

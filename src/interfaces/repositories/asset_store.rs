use async_trait::async_trait;
use derive_more::Display;

use crate::{entities::asset::{AssetRef, UploadedFile}, errors::AppError};

#[derive(Debug, Display)]
pub enum AssetError {
    #[display("Could not read upload: {_0}")]
    Io(String),

    #[display("Media host unreachable: {_0}")]
    Request(String),

    #[display("Media host rejected the request: {_0}")]
    Rejected(String),

    #[display("Unexpected media host response: {_0}")]
    InvalidResponse(String),
}

impl From<AssetError> for AppError {
    fn from(err: AssetError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// External media host holding avatars, resumes, banners and icons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Uploads the file into `folder` and returns where it now lives.
    async fn upload(&self, file: &UploadedFile, folder: &str) -> Result<AssetRef, AssetError>;

    /// Removes an asset. Destroying an id that no longer exists succeeds.
    async fn destroy(&self, asset: &AssetRef) -> Result<(), AssetError>;
}

use crate::{
    entities::asset::{AssetRef, UploadedFile},
    errors::AppError,
    repositories::asset_store::AssetStore,
};

/// Pushes a file to the media host. Failures surface as `AppError::Upstream`.
pub async fn upload_asset<A: AssetStore>(
    assets: &A,
    file: &UploadedFile,
    folder: &str,
) -> Result<AssetRef, AppError> {
    assets.upload(file, folder).await.map_err(|e| {
        tracing::error!(folder, error = %e, "Asset upload failed");
        AppError::from(e)
    })
}

/// Uploads `file` when one was supplied.
pub async fn upload_optional<A: AssetStore>(
    assets: &A,
    file: Option<&UploadedFile>,
    folder: &str,
) -> Result<Option<AssetRef>, AppError> {
    match file {
        Some(file) => upload_asset(assets, file, folder).await.map(Some),
        None => Ok(None),
    }
}

/// Best-effort removal; a failure is logged and otherwise ignored.
pub async fn discard_asset<A: AssetStore>(assets: &A, asset: &AssetRef) {
    if let Err(e) = assets.destroy(asset).await {
        tracing::warn!(public_id = %asset.public_id, error = %e, "Failed to destroy asset");
    }
}

pub async fn discard_all<A: AssetStore>(assets: &A, refs: impl IntoIterator<Item = AssetRef>) {
    for asset in refs {
        discard_asset(assets, &asset).await;
    }
}

use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Storage class the media host filed an upload under. Documents such as
/// `.docx` resumes land in `raw` and can only be destroyed through it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    #[display("image")]
    Image,
    #[display("video")]
    Video,
    #[display("raw")]
    Raw,
}

/// Pointer to a binary stored on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub public_id: String,
    pub url: String,
    /// Rows written before the type was tracked hold images only.
    #[serde(default)]
    pub resource_type: ResourceType,
}

/// A file received from the client, waiting to be pushed to the media host.
///
/// When built from a multipart upload the temp file is kept alive here and
/// removed from disk once this value is dropped.
#[derive(Debug)]
pub struct UploadedFile {
    path: PathBuf,
    file_name: Option<String>,
    _temp: Option<TempFile>,
}

impl UploadedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        UploadedFile { path, file_name, _temp: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }
}

impl From<TempFile> for UploadedFile {
    fn from(temp: TempFile) -> Self {
        UploadedFile {
            path: temp.file.path().to_path_buf(),
            file_name: temp.file_name.clone(),
            _temp: Some(temp),
        }
    }
}

/// Empty multipart parts arrive as zero-length temp files; treat them as absent.
pub fn non_empty_upload(file: Option<TempFile>) -> Option<UploadedFile> {
    file.filter(|f| f.size > 0).map(UploadedFile::from)
}

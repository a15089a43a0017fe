use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::asset::{non_empty_upload, AssetRef, UploadedFile};
use crate::entities::form_fields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SoftwareApplication {
    pub id: Uuid,
    pub name: String,
    #[sqlx(json)]
    pub svg: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SoftwareApplicationInsert {
    pub name: String,
    pub svg: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SoftwareApplicationInsert {
    pub fn into_application(self, id: Uuid) -> SoftwareApplication {
        SoftwareApplication {
            id,
            name: self.name,
            svg: self.svg,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct NewSoftwareApplication {
    #[validate(
        required(message = "Software's name is required"),
        length(min = 1, max = 100, message = "Name must be between 1 and 100 characters")
    )]
    pub name: Option<String>,
}

impl NewSoftwareApplication {
    pub fn prepare_for_insert(self, svg: AssetRef) -> SoftwareApplicationInsert {
        let now = Utc::now();
        SoftwareApplicationInsert {
            name: self.name.unwrap_or_default(),
            svg,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct UpdateSoftwareApplication {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
}

impl SoftwareApplication {
    pub fn apply(&mut self, update: UpdateSoftwareApplication) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, MultipartForm)]
pub struct SoftwareApplicationUpload {
    pub name: Option<Text<String>>,
    #[multipart(limit = "2MB")]
    pub svg: Option<TempFile>,
}

impl SoftwareApplicationUpload {
    pub fn into_new_application(self) -> (NewSoftwareApplication, Option<UploadedFile>) {
        let (fields, svg) = self.into_update();
        (NewSoftwareApplication { name: fields.name }, svg)
    }

    pub fn into_update(self) -> (UpdateSoftwareApplication, Option<UploadedFile>) {
        let fields = UpdateSoftwareApplication { name: form_fields::text(self.name) };
        (fields, non_empty_upload(self.svg))
    }
}

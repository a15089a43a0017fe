use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::asset::{non_empty_upload, AssetRef, UploadedFile};
use crate::entities::form_fields;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub title: String,
    pub proficiency: i16,
    #[sqlx(json)]
    pub svg: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub title: String,
    pub proficiency: i16,
    pub svg: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkillInsert {
    pub fn into_skill(self, id: Uuid) -> Skill {
        Skill {
            id,
            title: self.title,
            proficiency: self.proficiency,
            svg: self.svg,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct NewSkill {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Proficiency is required"),
        range(min = 1, max = 100, message = "Proficiency must be between 1 and 100")
    )]
    pub proficiency: Option<i16>,
}

impl NewSkill {
    pub fn prepare_for_insert(self, svg: AssetRef) -> SkillInsert {
        let now = Utc::now();
        SkillInsert {
            title: self.title.unwrap_or_default(),
            proficiency: self.proficiency.unwrap_or_default(),
            svg,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct UpdateSkill {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,

    #[validate(range(min = 1, max = 100, message = "Proficiency must be between 1 and 100"))]
    pub proficiency: Option<i16>,
}

impl Skill {
    pub fn apply(&mut self, update: UpdateSkill) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(proficiency) = update.proficiency {
            self.proficiency = proficiency;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, MultipartForm)]
pub struct SkillUpload {
    pub title: Option<Text<String>>,
    pub proficiency: Option<Text<String>>,
    #[multipart(limit = "2MB")]
    pub svg: Option<TempFile>,
}

impl SkillUpload {
    pub fn into_new_skill(self) -> Result<(NewSkill, Option<UploadedFile>), AppError> {
        let (fields, svg) = self.into_update()?;
        Ok((NewSkill { title: fields.title, proficiency: fields.proficiency }, svg))
    }

    pub fn into_update(self) -> Result<(UpdateSkill, Option<UploadedFile>), AppError> {
        let fields = UpdateSkill {
            title: form_fields::text(self.title),
            proficiency: form_fields::integer(self.proficiency, "proficiency")?,
        };
        Ok((fields, non_empty_upload(self.svg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_must_be_a_percentage() {
        let request = NewSkill { title: Some("Rust".into()), proficiency: Some(140) };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("proficiency"));

        let request = NewSkill { title: Some("Rust".into()), proficiency: Some(90) };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let errors = NewSkill::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("proficiency"));
    }
}

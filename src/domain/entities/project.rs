use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::asset::{non_empty_upload, AssetRef, UploadedFile};
use crate::entities::form_fields;
use crate::errors::AppError;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub technologies: Vec<String>,
    pub stack: String,
    pub deployed: bool,
    #[sqlx(json)]
    pub project_banner: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub git_repo_link: String,
    pub project_link: String,
    pub technologies: Vec<String>,
    pub stack: String,
    pub deployed: bool,
    pub project_banner: AssetRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectInsert {
    pub fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            git_repo_link: self.git_repo_link,
            project_link: self.project_link,
            technologies: self.technologies,
            stack: self.stack,
            deployed: self.deployed,
            project_banner: self.project_banner,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Default, Clone, Validate)]
pub struct NewProject {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 200, message = "Title must be between 1 and 200 characters")
    )]
    pub title: Option<String>,

    #[validate(required(message = "Description is required"))]
    pub description: Option<String>,

    #[validate(
        required(message = "Git repository link is required"),
        url(message = "Git repository link must be a valid URL")
    )]
    pub git_repo_link: Option<String>,

    #[validate(
        required(message = "Project link is required"),
        url(message = "Project link must be a valid URL")
    )]
    pub project_link: Option<String>,

    #[validate(
        required(message = "Technologies are required"),
        length(min = 1, message = "At least one technology is required")
    )]
    pub technologies: Option<Vec<String>>,

    #[validate(required(message = "Stack is required"))]
    pub stack: Option<String>,

    #[validate(required(message = "Deployed flag is required"))]
    pub deployed: Option<bool>,
}

impl NewProject {
    /// Must only be called on a request that passed `validate()`.
    pub fn prepare_for_insert(self, project_banner: AssetRef) -> ProjectInsert {
        let now = Utc::now();
        ProjectInsert {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            git_repo_link: self.git_repo_link.unwrap_or_default(),
            project_link: self.project_link.unwrap_or_default(),
            technologies: self.technologies.unwrap_or_default(),
            stack: self.stack.unwrap_or_default(),
            deployed: self.deployed.unwrap_or_default(),
            project_banner,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default, Clone, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "Git repository link must be a valid URL"))]
    pub git_repo_link: Option<String>,
    #[validate(url(message = "Project link must be a valid URL"))]
    pub project_link: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub stack: Option<String>,
    pub deployed: Option<bool>,
}

impl Project {
    /// Overwrites every field the update carries; absent fields are kept.
    pub fn apply(&mut self, update: UpdateProject) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(link) = update.git_repo_link {
            self.git_repo_link = link;
        }
        if let Some(link) = update.project_link {
            self.project_link = link;
        }
        if let Some(technologies) = update.technologies {
            self.technologies = technologies;
        }
        if let Some(stack) = update.stack {
            self.stack = stack;
        }
        if let Some(deployed) = update.deployed {
            self.deployed = deployed;
        }
        self.updated_at = Utc::now();
    }
}

// ───── Multipart Input ──────────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct ProjectUpload {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub git_repo_link: Option<Text<String>>,
    pub project_link: Option<Text<String>>,
    /// Comma-separated, e.g. `Rust, actix-web, PostgreSQL`.
    pub technologies: Option<Text<String>>,
    pub stack: Option<Text<String>>,
    pub deployed: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub project_banner: Option<TempFile>,
}

impl ProjectUpload {
    pub fn into_new_project(self) -> Result<(NewProject, Option<UploadedFile>), AppError> {
        let (fields, banner) = self.into_parts()?;
        let request = NewProject {
            title: fields.title,
            description: fields.description,
            git_repo_link: fields.git_repo_link,
            project_link: fields.project_link,
            technologies: fields.technologies,
            stack: fields.stack,
            deployed: fields.deployed,
        };
        Ok((request, banner))
    }

    pub fn into_update(self) -> Result<(UpdateProject, Option<UploadedFile>), AppError> {
        self.into_parts()
    }

    fn into_parts(self) -> Result<(UpdateProject, Option<UploadedFile>), AppError> {
        let fields = UpdateProject {
            title: form_fields::text(self.title),
            description: form_fields::text(self.description),
            git_repo_link: form_fields::text(self.git_repo_link),
            project_link: form_fields::text(self.project_link),
            technologies: form_fields::list(self.technologies),
            stack: form_fields::text(self.stack),
            deployed: form_fields::flag(self.deployed, "deployed")?,
        };
        Ok((fields, non_empty_upload(self.project_banner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> NewProject {
        NewProject {
            title: Some("Portfolio API".into()),
            description: Some("Backend for my personal site".into()),
            git_repo_link: Some("https://github.com/example/portfolio".into()),
            project_link: Some("https://portfolio.example.com".into()),
            technologies: Some(vec!["Rust".into(), "PostgreSQL".into()]),
            stack: Some("Backend".into()),
            deployed: Some(true),
        }
    }

    #[test]
    fn complete_request_passes_validation() {
        assert!(complete_request().validate().is_ok());
    }

    #[test]
    fn missing_deployed_flag_is_reported() {
        let request = NewProject { deployed: None, ..complete_request() };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("deployed"));
    }

    #[test]
    fn update_keeps_fields_it_does_not_carry() {
        let mut stored = complete_request()
            .prepare_for_insert(AssetRef {
                public_id: "PROJECT IMAGES/banner".into(),
                url: "https://res.cloudinary.com/demo/banner.png".into(),
                resource_type: Default::default(),
            })
            .into_project(Uuid::new_v4());

        stored.apply(UpdateProject {
            deployed: Some(false),
            ..Default::default()
        });

        assert!(!stored.deployed);
        assert_eq!(stored.title, "Portfolio API");
        assert_eq!(stored.technologies, vec!["Rust", "PostgreSQL"]);
    }
}

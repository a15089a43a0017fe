use uuid::Uuid;
use validator::Validate;

use crate::constants::PROJECT_BANNER_FOLDER;
use crate::entities::asset::UploadedFile;
use crate::entities::project::{NewProject, Project, UpdateProject};
use crate::errors::AppError;
use crate::repositories::{asset_store::AssetStore, project::ProjectRepository};
use crate::use_cases::assets::{discard_asset, upload_asset, upload_optional};

pub struct ProjectHandler<R, A>
where
    R: ProjectRepository,
    A: AssetStore,
{
    pub project_repo: R,
    pub assets: A,
}

impl<R, A> ProjectHandler<R, A>
where
    R: ProjectRepository,
    A: AssetStore,
{
    pub fn new(project_repo: R, assets: A) -> Self {
        ProjectHandler { project_repo, assets }
    }

    /// Validates, uploads the banner, then stores the project. A failed insert
    /// takes the freshly uploaded banner down with it.
    pub async fn create_project(
        &self,
        request: NewProject,
        banner: Option<UploadedFile>,
    ) -> Result<Project, AppError> {
        request.validate()?;
        let banner = banner.ok_or_else(|| {
            AppError::validation("project_banner", "Project banner image is required")
        })?;

        let asset = upload_asset(&self.assets, &banner, PROJECT_BANNER_FOLDER).await?;
        let insert = request.prepare_for_insert(asset.clone());

        match self.project_repo.create_project(&insert).await {
            Ok(project) => {
                tracing::info!(project_id = %project.id, "Project created");
                Ok(project)
            }
            Err(e) => {
                discard_asset(&self.assets, &asset).await;
                Err(e)
            }
        }
    }

    pub async fn get_project(&self, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.get_all_projects().await
    }

    pub async fn update_project(
        &self,
        id: &Uuid,
        update: UpdateProject,
        banner: Option<UploadedFile>,
    ) -> Result<Project, AppError> {
        update.validate()?;
        let mut project = self.get_project(id).await?;

        let new_banner = upload_optional(&self.assets, banner.as_ref(), PROJECT_BANNER_FOLDER).await?;

        project.apply(update);
        let previous = new_banner
            .as_ref()
            .map(|banner| std::mem::replace(&mut project.project_banner, banner.clone()));

        match self.project_repo.update_project(&project).await {
            Ok(saved) => {
                if let Some(old) = previous {
                    discard_asset(&self.assets, &old).await;
                }
                Ok(saved)
            }
            Err(e) => {
                if let Some(new) = new_banner {
                    discard_asset(&self.assets, &new).await;
                }
                Err(e)
            }
        }
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let project = self.get_project(id).await?;

        discard_asset(&self.assets, &project.project_banner).await;
        self.project_repo.delete_project(id).await?;

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::asset_store::{AssetError, MockAssetStore};
    use crate::test_support::{sample_asset, InMemoryProjectRepo};

    fn new_project() -> NewProject {
        NewProject {
            title: Some("Portfolio API".into()),
            description: Some("Backend for my portfolio".into()),
            git_repo_link: Some("https://github.com/me/portfolio".into()),
            project_link: Some("https://me.dev".into()),
            technologies: Some(vec!["Rust".into(), "Postgres".into()]),
            stack: Some("Backend".into()),
            deployed: Some(true),
        }
    }

    fn banner() -> Option<UploadedFile> {
        Some(UploadedFile::from_path("/tmp/banner.png"))
    }

    fn uploading(public_id: &'static str) -> MockAssetStore {
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .withf(|_, folder| folder == PROJECT_BANNER_FOLDER)
            .returning(move |_, _| Ok(sample_asset(public_id)));
        assets
    }

    #[tokio::test]
    async fn create_then_get_returns_same_record() {
        let handler = ProjectHandler::new(InMemoryProjectRepo::default(), uploading("PROJECT IMAGES/p1"));

        let created = handler.create_project(new_project(), banner()).await.unwrap();
        let fetched = handler.get_project(&created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.project_banner.public_id, "PROJECT IMAGES/p1");
    }

    #[tokio::test]
    async fn missing_banner_is_rejected_before_upload() {
        let repo = InMemoryProjectRepo::default();
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = ProjectHandler::new(repo.clone(), assets);

        let err = handler.create_project(new_project(), None).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(repo.projects.is_empty());
    }

    #[tokio::test]
    async fn missing_deployed_flag_creates_nothing() {
        let repo = InMemoryProjectRepo::default();
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = ProjectHandler::new(repo.clone(), assets);

        let request = NewProject { deployed: None, ..new_project() };
        let err = handler.create_project(request, banner()).await.unwrap_err();

        match err {
            AppError::ValidationError(fields) => assert_eq!(fields[0].field, "deployed"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(repo.projects.is_empty());
    }

    #[tokio::test]
    async fn upload_failure_aborts_creation() {
        let repo = InMemoryProjectRepo::default();
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Err(AssetError::Rejected("Invalid image file".into())));
        let handler = ProjectHandler::new(repo.clone(), assets);

        let err = handler.create_project(new_project(), banner()).await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert!(repo.projects.is_empty());
    }

    #[tokio::test]
    async fn failed_insert_destroys_uploaded_banner() {
        let repo = InMemoryProjectRepo { fail_writes: true, ..Default::default() };
        let mut assets = uploading("PROJECT IMAGES/orphan");
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "PROJECT IMAGES/orphan")
            .times(1)
            .returning(|_| Ok(()));
        let handler = ProjectHandler::new(repo, assets);

        assert!(handler.create_project(new_project(), banner()).await.is_err());
    }

    #[tokio::test]
    async fn replacing_banner_destroys_old_one_after_save() {
        let repo = InMemoryProjectRepo::default();
        let mut assets = MockAssetStore::new();
        let mut uploads = vec![sample_asset("PROJECT IMAGES/new"), sample_asset("PROJECT IMAGES/old")];
        assets
            .expect_upload()
            .times(2)
            .returning(move |_, _| Ok(uploads.pop().unwrap()));
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "PROJECT IMAGES/old")
            .times(1)
            .returning(|_| Ok(()));
        let handler = ProjectHandler::new(repo.clone(), assets);

        let created = handler.create_project(new_project(), banner()).await.unwrap();
        let update = UpdateProject { title: Some("Renamed".into()), ..Default::default() };
        let updated = handler.update_project(&created.id, update, banner()).await.unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.project_banner.public_id, "PROJECT IMAGES/new");
        assert_eq!(updated.stack, "Backend");
    }

    #[tokio::test]
    async fn failed_update_destroys_new_banner_and_keeps_old() {
        let mut repo = InMemoryProjectRepo::default();
        let id = Uuid::new_v4();
        let existing = new_project()
            .prepare_for_insert(sample_asset("PROJECT IMAGES/old"))
            .into_project(id);
        repo.projects.insert(id, existing);
        repo.fail_writes = true;

        let mut assets = uploading("PROJECT IMAGES/new");
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "PROJECT IMAGES/new")
            .times(1)
            .returning(|_| Ok(()));
        let handler = ProjectHandler::new(repo.clone(), assets);

        let result = handler.update_project(&id, UpdateProject::default(), banner()).await;

        assert!(result.is_err());
        let stored = repo.projects.get(&id).unwrap();
        assert_eq!(stored.project_banner.public_id, "PROJECT IMAGES/old");
    }

    #[tokio::test]
    async fn update_of_unknown_project_is_not_found() {
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = ProjectHandler::new(InMemoryProjectRepo::default(), assets);

        let err = handler
            .update_project(&Uuid::new_v4(), UpdateProject::default(), banner())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_destroys_banner_even_when_host_fails() {
        let repo = InMemoryProjectRepo::default();
        let id = Uuid::new_v4();
        repo.projects.insert(
            id,
            new_project().prepare_for_insert(sample_asset("PROJECT IMAGES/p")).into_project(id),
        );

        let mut assets = MockAssetStore::new();
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "PROJECT IMAGES/p")
            .times(1)
            .returning(|_| Err(AssetError::Request("timeout".into())));
        let handler = ProjectHandler::new(repo.clone(), assets);

        handler.delete_project(&id).await.unwrap();

        assert!(repo.projects.is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_project_is_not_found() {
        let handler = ProjectHandler::new(InMemoryProjectRepo::default(), MockAssetStore::new());

        let err = handler.delete_project(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

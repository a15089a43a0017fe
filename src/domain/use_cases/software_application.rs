use uuid::Uuid;
use validator::Validate;

use crate::constants::SOFTWARE_APPLICATION_FOLDER;
use crate::entities::asset::UploadedFile;
use crate::entities::software_application::{
    NewSoftwareApplication, SoftwareApplication, UpdateSoftwareApplication,
};
use crate::errors::AppError;
use crate::repositories::{asset_store::AssetStore, software_application::SoftwareApplicationRepository};
use crate::use_cases::assets::{discard_asset, upload_asset, upload_optional};

pub struct SoftwareApplicationHandler<R, A>
where
    R: SoftwareApplicationRepository,
    A: AssetStore,
{
    pub application_repo: R,
    pub assets: A,
}

impl<R, A> SoftwareApplicationHandler<R, A>
where
    R: SoftwareApplicationRepository,
    A: AssetStore,
{
    pub fn new(application_repo: R, assets: A) -> Self {
        SoftwareApplicationHandler { application_repo, assets }
    }

    pub async fn create_application(
        &self,
        request: NewSoftwareApplication,
        svg: Option<UploadedFile>,
    ) -> Result<SoftwareApplication, AppError> {
        request.validate()?;
        let svg = svg.ok_or_else(|| {
            AppError::validation("svg", "Software application's icon/svg is required")
        })?;

        let asset = upload_asset(&self.assets, &svg, SOFTWARE_APPLICATION_FOLDER).await?;
        let insert = request.prepare_for_insert(asset.clone());

        match self.application_repo.create_application(&insert).await {
            Ok(application) => {
                tracing::info!(application_id = %application.id, "Software application created");
                Ok(application)
            }
            Err(e) => {
                discard_asset(&self.assets, &asset).await;
                Err(e)
            }
        }
    }

    pub async fn get_application(&self, id: &Uuid) -> Result<SoftwareApplication, AppError> {
        self.application_repo
            .get_application_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Software application not found".into()))
    }

    pub async fn list_applications(&self) -> Result<Vec<SoftwareApplication>, AppError> {
        self.application_repo.get_all_applications().await
    }

    pub async fn update_application(
        &self,
        id: &Uuid,
        update: UpdateSoftwareApplication,
        svg: Option<UploadedFile>,
    ) -> Result<SoftwareApplication, AppError> {
        update.validate()?;
        let mut application = self.get_application(id).await?;

        let new_svg = upload_optional(&self.assets, svg.as_ref(), SOFTWARE_APPLICATION_FOLDER).await?;

        application.apply(update);
        let previous = new_svg
            .as_ref()
            .map(|svg| std::mem::replace(&mut application.svg, svg.clone()));

        match self.application_repo.update_application(&application).await {
            Ok(saved) => {
                if let Some(old) = previous {
                    discard_asset(&self.assets, &old).await;
                }
                Ok(saved)
            }
            Err(e) => {
                if let Some(new) = new_svg {
                    discard_asset(&self.assets, &new).await;
                }
                Err(e)
            }
        }
    }

    pub async fn delete_application(&self, id: &Uuid) -> Result<(), AppError> {
        let application = self.get_application(id).await?;

        discard_asset(&self.assets, &application.svg).await;
        self.application_repo.delete_application(id).await?;

        tracing::info!(application_id = %id, "Software application deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::asset_store::{AssetError, MockAssetStore};
    use crate::test_support::{sample_asset, InMemorySoftwareApplicationRepo};

    fn icon() -> Option<UploadedFile> {
        Some(UploadedFile::from_path("/tmp/vscode.svg"))
    }

    #[tokio::test]
    async fn create_lists_in_insertion_order() {
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .withf(|_, folder| folder == SOFTWARE_APPLICATION_FOLDER)
            .returning(|file, _| Ok(sample_asset(file.file_name().unwrap_or("icon"))));
        let handler = SoftwareApplicationHandler::new(InMemorySoftwareApplicationRepo::default(), assets);

        let first = handler
            .create_application(NewSoftwareApplication { name: Some("VS Code".into()) }, icon())
            .await
            .unwrap();
        let second = handler
            .create_application(NewSoftwareApplication { name: Some("Postman".into()) }, icon())
            .await
            .unwrap();

        let listed = handler.list_applications().await.unwrap();
        assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![first.id, second.id]);
        assert_eq!(first.svg.public_id, "vscode.svg");
    }

    #[tokio::test]
    async fn missing_name_is_rejected_without_upload() {
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = SoftwareApplicationHandler::new(InMemorySoftwareApplicationRepo::default(), assets);

        let err = handler
            .create_application(NewSoftwareApplication { name: None }, icon())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn missing_icon_is_rejected_without_upload() {
        let repo = InMemorySoftwareApplicationRepo::default();
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = SoftwareApplicationHandler::new(repo.clone(), assets);

        let err = handler
            .create_application(NewSoftwareApplication { name: Some("VS Code".into()) }, None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.to_string(), "Software application's icon/svg is required");
        assert!(repo.applications.is_empty());
    }

    #[tokio::test]
    async fn created_application_reads_back_unchanged() {
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Ok(sample_asset("apps/vscode")));
        let handler = SoftwareApplicationHandler::new(InMemorySoftwareApplicationRepo::default(), assets);

        let created = handler
            .create_application(NewSoftwareApplication { name: Some("VS Code".into()) }, icon())
            .await
            .unwrap();
        let fetched = handler.get_application(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.svg.public_id, "apps/vscode");
    }

    fn seeded(repo: &InMemorySoftwareApplicationRepo, public_id: &str) -> Uuid {
        let id = Uuid::new_v4();
        repo.applications.insert(
            id,
            NewSoftwareApplication { name: Some("Docker".into()) }
                .prepare_for_insert(sample_asset(public_id))
                .into_application(id),
        );
        id
    }

    #[tokio::test]
    async fn replacing_icon_destroys_old_one_after_save() {
        let repo = InMemorySoftwareApplicationRepo::default();
        let id = seeded(&repo, "apps/old");

        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .times(1)
            .returning(|_, _| Ok(sample_asset("apps/new")));
        let saved = repo.clone();
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "apps/old")
            .times(1)
            .returning(move |_| {
                assert_eq!(saved.applications.get(&id).unwrap().svg.public_id, "apps/new");
                Ok(())
            });
        let handler = SoftwareApplicationHandler::new(repo.clone(), assets);

        let update = UpdateSoftwareApplication { name: Some("Docker Desktop".into()) };
        let updated = handler.update_application(&id, update, icon()).await.unwrap();

        assert_eq!(updated.name, "Docker Desktop");
        assert_eq!(updated.svg.public_id, "apps/new");
    }

    #[tokio::test]
    async fn failed_update_destroys_new_icon_and_keeps_old() {
        let mut repo = InMemorySoftwareApplicationRepo::default();
        let id = seeded(&repo, "apps/old");
        repo.fail_writes = true;

        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Ok(sample_asset("apps/new")));
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "apps/new")
            .times(1)
            .returning(|_| Ok(()));
        let handler = SoftwareApplicationHandler::new(repo.clone(), assets);

        let result = handler
            .update_application(&id, UpdateSoftwareApplication::default(), icon())
            .await;

        assert!(result.is_err());
        assert_eq!(repo.applications.get(&id).unwrap().svg.public_id, "apps/old");
    }

    #[tokio::test]
    async fn upload_failure_aborts_creation() {
        let repo = InMemorySoftwareApplicationRepo::default();
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Err(AssetError::InvalidResponse("missing secure_url".into())));
        let handler = SoftwareApplicationHandler::new(repo.clone(), assets);

        let err = handler
            .create_application(NewSoftwareApplication { name: Some("Figma".into()) }, icon())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert!(repo.applications.is_empty());
    }

    #[tokio::test]
    async fn delete_destroys_icon() {
        let repo = InMemorySoftwareApplicationRepo::default();
        let id = Uuid::new_v4();
        repo.applications.insert(
            id,
            NewSoftwareApplication { name: Some("Docker".into()) }
                .prepare_for_insert(sample_asset("apps/docker"))
                .into_application(id),
        );
        let mut assets = MockAssetStore::new();
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "apps/docker")
            .times(1)
            .returning(|_| Ok(()));
        let handler = SoftwareApplicationHandler::new(repo.clone(), assets);

        handler.delete_application(&id).await.unwrap();
        assert!(repo.applications.is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_application_is_not_found() {
        let handler = SoftwareApplicationHandler::new(InMemorySoftwareApplicationRepo::default(), MockAssetStore::new());

        let err = handler.delete_application(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

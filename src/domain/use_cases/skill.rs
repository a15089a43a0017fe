use uuid::Uuid;
use validator::Validate;

use crate::constants::SKILL_SVG_FOLDER;
use crate::entities::asset::UploadedFile;
use crate::entities::skill::{NewSkill, Skill, UpdateSkill};
use crate::errors::AppError;
use crate::repositories::{asset_store::AssetStore, skill::SkillRepository};
use crate::use_cases::assets::{discard_asset, upload_asset, upload_optional};

pub struct SkillHandler<R, A>
where
    R: SkillRepository,
    A: AssetStore,
{
    pub skill_repo: R,
    pub assets: A,
}

impl<R, A> SkillHandler<R, A>
where
    R: SkillRepository,
    A: AssetStore,
{
    pub fn new(skill_repo: R, assets: A) -> Self {
        SkillHandler { skill_repo, assets }
    }

    pub async fn create_skill(&self, request: NewSkill, svg: Option<UploadedFile>) -> Result<Skill, AppError> {
        request.validate()?;
        let svg = svg.ok_or_else(|| AppError::validation("svg", "Skill's svg is required"))?;

        let asset = upload_asset(&self.assets, &svg, SKILL_SVG_FOLDER).await?;
        let insert = request.prepare_for_insert(asset.clone());

        match self.skill_repo.create_skill(&insert).await {
            Ok(skill) => {
                tracing::info!(skill_id = %skill.id, "Skill created");
                Ok(skill)
            }
            Err(e) => {
                discard_asset(&self.assets, &asset).await;
                Err(e)
            }
        }
    }

    pub async fn get_skill(&self, id: &Uuid) -> Result<Skill, AppError> {
        self.skill_repo
            .get_skill_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.get_all_skills().await
    }

    pub async fn update_skill(
        &self,
        id: &Uuid,
        update: UpdateSkill,
        svg: Option<UploadedFile>,
    ) -> Result<Skill, AppError> {
        update.validate()?;
        let mut skill = self.get_skill(id).await?;

        let new_svg = upload_optional(&self.assets, svg.as_ref(), SKILL_SVG_FOLDER).await?;

        skill.apply(update);
        let previous = new_svg
            .as_ref()
            .map(|svg| std::mem::replace(&mut skill.svg, svg.clone()));

        match self.skill_repo.update_skill(&skill).await {
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

    pub async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError> {
        let skill = self.get_skill(id).await?;

        discard_asset(&self.assets, &skill.svg).await;
        self.skill_repo.delete_skill(id).await?;

        tracing::info!(skill_id = %id, "Skill deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::asset_store::{AssetError, MockAssetStore};
    use crate::test_support::{sample_asset, InMemorySkillRepo};

    fn new_skill() -> NewSkill {
        NewSkill { title: Some("Rust".into()), proficiency: Some(85) }
    }

    fn svg() -> Option<UploadedFile> {
        Some(UploadedFile::from_path("/tmp/rust.svg"))
    }

    #[tokio::test]
    async fn delete_destroys_svg_and_removes_record() {
        let repo = InMemorySkillRepo::default();
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .withf(|_, folder| folder == SKILL_SVG_FOLDER)
            .returning(|_, _| Ok(sample_asset("PORTFOLIO_SKILLS-SVGS/rust")));
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "PORTFOLIO_SKILLS-SVGS/rust")
            .times(1)
            .returning(|_| Ok(()));
        let handler = SkillHandler::new(repo.clone(), assets);

        let skill = handler.create_skill(new_skill(), svg()).await.unwrap();
        handler.delete_skill(&skill.id).await.unwrap();

        let err = handler.get_skill(&skill.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.skills.is_empty());
    }

    #[tokio::test]
    async fn missing_svg_is_a_validation_error() {
        let mut assets = MockAssetStore::new();
        assets.expect_upload().never();
        let handler = SkillHandler::new(InMemorySkillRepo::default(), assets);

        let err = handler.create_skill(new_skill(), None).await.unwrap_err();
        assert_eq!(err.to_string(), "Skill's svg is required");
    }

    #[tokio::test]
    async fn upload_failure_aborts_creation() {
        let repo = InMemorySkillRepo::default();
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Err(AssetError::Request("dns error".into())));
        let handler = SkillHandler::new(repo.clone(), assets);

        let err = handler.create_skill(new_skill(), svg()).await.unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
        assert!(repo.skills.is_empty());
    }

    #[tokio::test]
    async fn proficiency_update_keeps_svg() {
        let repo = InMemorySkillRepo::default();
        let id = Uuid::new_v4();
        repo.skills.insert(id, new_skill().prepare_for_insert(sample_asset("svg/1")).into_skill(id));
        let handler = SkillHandler::new(repo, MockAssetStore::new());

        let update = UpdateSkill { proficiency: Some(95), ..Default::default() };
        let updated = handler.update_skill(&id, update, None).await.unwrap();

        assert_eq!(updated.proficiency, 95);
        assert_eq!(updated.svg.public_id, "svg/1");
    }

    #[tokio::test]
    async fn created_skill_reads_back_unchanged() {
        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Ok(sample_asset("PORTFOLIO_SKILLS-SVGS/rust")));
        let handler = SkillHandler::new(InMemorySkillRepo::default(), assets);

        let created = handler.create_skill(new_skill(), svg()).await.unwrap();
        let fetched = handler.get_skill(&created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.svg.public_id, "PORTFOLIO_SKILLS-SVGS/rust");
        assert!(!fetched.svg.url.is_empty());
    }

    #[tokio::test]
    async fn replacing_svg_destroys_old_one_after_save() {
        let repo = InMemorySkillRepo::default();
        let id = Uuid::new_v4();
        repo.skills.insert(id, new_skill().prepare_for_insert(sample_asset("svg/old")).into_skill(id));

        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .times(1)
            .returning(|_, _| Ok(sample_asset("svg/new")));
        let saved = repo.clone();
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "svg/old")
            .times(1)
            .returning(move |_| {
                assert_eq!(saved.skills.get(&id).unwrap().svg.public_id, "svg/new");
                Ok(())
            });
        let handler = SkillHandler::new(repo.clone(), assets);

        let update = UpdateSkill { title: Some("Rust 2024".into()), ..Default::default() };
        let updated = handler.update_skill(&id, update, svg()).await.unwrap();

        assert_eq!(updated.title, "Rust 2024");
        assert_eq!(updated.svg.public_id, "svg/new");
    }

    #[tokio::test]
    async fn failed_update_destroys_new_svg_and_keeps_old() {
        let mut repo = InMemorySkillRepo::default();
        let id = Uuid::new_v4();
        repo.skills.insert(id, new_skill().prepare_for_insert(sample_asset("svg/old")).into_skill(id));
        repo.fail_writes = true;

        let mut assets = MockAssetStore::new();
        assets
            .expect_upload()
            .returning(|_, _| Ok(sample_asset("svg/new")));
        assets
            .expect_destroy()
            .withf(|asset| asset.public_id == "svg/new")
            .times(1)
            .returning(|_| Ok(()));
        let handler = SkillHandler::new(repo.clone(), assets);

        let result = handler.update_skill(&id, UpdateSkill::default(), svg()).await;

        assert!(result.is_err());
        assert_eq!(repo.skills.get(&id).unwrap().svg.public_id, "svg/old");
    }

    #[tokio::test]
    async fn delete_of_unknown_skill_is_not_found() {
        let handler = SkillHandler::new(InMemorySkillRepo::default(), MockAssetStore::new());

        let err = handler.delete_skill(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}

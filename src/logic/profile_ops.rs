use log::warn;

use crate::logic::error::{OpError, OpResult};
use crate::logic::validate;
use crate::model::{
    AuthUser, Id, NewEducation, NewExperience, PopulatedProfile, Profile, ProfileFields,
};
use crate::store::traits::Store;

const NO_PROFILE: &str = "There is no profile for this user";

/// Profile reads and the embedded experience/education mutations
pub struct ProfileOperations;

impl ProfileOperations {
    /// The caller's own profile, populated with their public fields
    pub async fn get_own<S: Store>(store: &S, auth: &AuthUser) -> OpResult<PopulatedProfile> {
        let profile = Self::load_own(store, auth).await?;
        Self::populate(store, profile).await
    }

    pub async fn get_by_user<S: Store>(store: &S, user_id: &Id) -> OpResult<PopulatedProfile> {
        let profile = store
            .get_profile_by_user(user_id)
            .await?
            .ok_or_else(|| OpError::NotFound("Profile not found".to_string()))?;
        Self::populate(store, profile).await
    }

    /// Every profile whose owner still exists
    pub async fn list<S: Store>(store: &S) -> OpResult<Vec<PopulatedProfile>> {
        let profiles = store.list_profiles().await?;
        let mut populated = Vec::with_capacity(profiles.len());
        for profile in profiles {
            match store.get_user(&profile.user).await? {
                Some(user) => populated.push(profile.populate(user.to_summary())),
                None => warn!("Profile {} references missing user {}", profile.id, profile.user),
            }
        }
        Ok(populated)
    }

    /// Create the caller's profile, or merge the given fields into it
    pub async fn upsert<S: Store>(
        store: &S,
        auth: &AuthUser,
        fields: &ProfileFields,
    ) -> OpResult<Profile> {
        validate::profile_fields(fields)?;

        match store.get_profile_by_user(&auth.user_id).await? {
            Some(mut profile) => {
                profile.apply_fields(fields);
                Ok(store.save_profile(profile).await?)
            }
            None => {
                let profile = Profile::from_fields(auth.user_id.clone(), fields);
                Ok(store.insert_profile(profile).await?)
            }
        }
    }

    pub async fn add_experience<S: Store>(
        store: &S,
        auth: &AuthUser,
        input: &NewExperience,
    ) -> OpResult<Profile> {
        let entry = validate::experience(input)?;
        let mut profile = Self::load_own(store, auth).await?;
        profile.experience.insert(0, entry);
        Ok(store.save_profile(profile).await?)
    }

    pub async fn remove_experience<S: Store>(
        store: &S,
        auth: &AuthUser,
        experience_id: &str,
    ) -> OpResult<Profile> {
        let mut profile = Self::load_own(store, auth).await?;
        let index = profile
            .experience
            .iter()
            .position(|e| e.id == experience_id)
            .ok_or_else(|| OpError::NotFound("Experience not found".to_string()))?;
        profile.experience.remove(index);
        Ok(store.save_profile(profile).await?)
    }

    pub async fn add_education<S: Store>(
        store: &S,
        auth: &AuthUser,
        input: &NewEducation,
    ) -> OpResult<Profile> {
        let entry = validate::education(input)?;
        let mut profile = Self::load_own(store, auth).await?;
        profile.education.insert(0, entry);
        Ok(store.save_profile(profile).await?)
    }

    pub async fn remove_education<S: Store>(
        store: &S,
        auth: &AuthUser,
        education_id: &str,
    ) -> OpResult<Profile> {
        let mut profile = Self::load_own(store, auth).await?;
        let index = profile
            .education
            .iter()
            .position(|e| e.id == education_id)
            .ok_or_else(|| OpError::NotFound("Education not found".to_string()))?;
        profile.education.remove(index);
        Ok(store.save_profile(profile).await?)
    }

    async fn load_own<S: Store>(store: &S, auth: &AuthUser) -> OpResult<Profile> {
        store
            .get_profile_by_user(&auth.user_id)
            .await?
            .ok_or_else(|| OpError::NotFound(NO_PROFILE.to_string()))
    }

    async fn populate<S: Store>(store: &S, profile: Profile) -> OpResult<PopulatedProfile> {
        let user = store
            .get_user(&profile.user)
            .await?
            .ok_or_else(|| OpError::NotFound("User not found".to_string()))?;
        Ok(profile.populate(user.to_summary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SkillsInput, User};
    use crate::store::{MemoryStore, ProfileStore, UserStore};

    async fn setup() -> (MemoryStore, AuthUser) {
        let store = MemoryStore::new();
        let user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            "//avatar".to_string(),
        );
        let auth = AuthUser::new(user.id.clone());
        store.insert_user(user).await.unwrap();
        (store, auth)
    }

    fn fields() -> ProfileFields {
        ProfileFields {
            status: Some("Developer".to_string()),
            skills: Some(SkillsInput::Csv("rust, sql".to_string())),
            company: Some("Acme".to_string()),
            ..Default::default()
        }
    }

    fn experience(title: &str) -> NewExperience {
        NewExperience {
            title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            from: Some("2020-01-01".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_merges() {
        let (store, auth) = setup().await;

        let created = ProfileOperations::upsert(&store, &auth, &fields()).await.unwrap();
        assert_eq!(created.company.as_deref(), Some("Acme"));

        let updated = ProfileOperations::upsert(
            &store,
            &auth,
            &ProfileFields {
                status: Some("Lead".to_string()),
                skills: Some(SkillsInput::Csv("rust".to_string())),
                bio: Some("Hi".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, "Lead");
        assert_eq!(updated.company.as_deref(), Some("Acme"));
        assert_eq!(updated.bio.as_deref(), Some("Hi"));
        assert_eq!(updated.skills, vec!["rust"]);
        assert_eq!(store.list_profiles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_validates_before_store_access() {
        let (store, auth) = setup().await;
        let err = ProfileOperations::upsert(&store, &auth, &ProfileFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Validation(_)));
        assert!(store.list_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove_experience_keeps_order() {
        let (store, auth) = setup().await;
        ProfileOperations::upsert(&store, &auth, &fields()).await.unwrap();

        for title in ["first", "second", "third"] {
            ProfileOperations::add_experience(&store, &auth, &experience(title))
                .await
                .unwrap();
        }
        let profile = ProfileOperations::add_experience(&store, &auth, &experience("fourth"))
            .await
            .unwrap();
        let titles: Vec<&str> = profile.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["fourth", "third", "second", "first"]);

        let target = profile.experience[1].id.clone();
        let profile = ProfileOperations::remove_experience(&store, &auth, &target)
            .await
            .unwrap();
        let titles: Vec<&str> = profile.experience.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["fourth", "second", "first"]);
        assert!(profile.experience.iter().all(|e| e.id != target));
    }

    #[tokio::test]
    async fn test_remove_unknown_experience_is_not_found() {
        let (store, auth) = setup().await;
        ProfileOperations::upsert(&store, &auth, &fields()).await.unwrap();
        ProfileOperations::add_experience(&store, &auth, &experience("only"))
            .await
            .unwrap();

        let err = ProfileOperations::remove_experience(&store, &auth, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::NotFound(_)));

        let profile = store.get_profile_by_user(&auth.user_id).await.unwrap().unwrap();
        assert_eq!(profile.experience.len(), 1);
    }

    #[tokio::test]
    async fn test_education_round_trip() {
        let (store, auth) = setup().await;
        ProfileOperations::upsert(&store, &auth, &fields()).await.unwrap();

        let profile = ProfileOperations::add_education(
            &store,
            &auth,
            &NewEducation {
                school: Some("MIT".to_string()),
                degree: Some("BSc".to_string()),
                fieldofstudy: Some("CS".to_string()),
                from: Some("2010-09-01".to_string()),
                current: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let id = profile.education[0].id.clone();

        let profile = ProfileOperations::remove_education(&store, &auth, &id)
            .await
            .unwrap();
        assert!(profile.education.is_empty());
    }

    #[tokio::test]
    async fn test_experience_without_profile_is_not_found() {
        let (store, auth) = setup().await;
        let err = ProfileOperations::add_experience(&store, &auth, &experience("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::NotFound(ref m) if m == NO_PROFILE));
    }

    #[tokio::test]
    async fn test_get_own_is_populated() {
        let (store, auth) = setup().await;
        ProfileOperations::upsert(&store, &auth, &fields()).await.unwrap();

        let profile = ProfileOperations::get_own(&store, &auth).await.unwrap();
        assert_eq!(profile.user.name, "Ada");
        assert_eq!(profile.user.id, auth.user_id);

        let all = ProfileOperations::list(&store).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user.avatar, "//avatar");
    }
}

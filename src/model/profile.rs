use crate::model::{generate_id, non_blank, now, Id, UserSummary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Developer profile, one per user.
///
/// `U` is the representation of the owning user: the raw id when stored, a
/// [`UserSummary`] once populated for a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile<U = Id> {
    #[serde(rename = "_id")]
    pub id: Id,
    pub user: U,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<Social>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub date: DateTime<Utc>,
    /// Optimistic concurrency token, bumped by the store on every save.
    #[serde(default)]
    pub version: i64,
}

pub type PopulatedProfile = Profile<UserSummary>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl Social {
    fn merge(&mut self, fields: &ProfileFields) {
        let pairs = [
            (&mut self.youtube, &fields.youtube),
            (&mut self.twitter, &fields.twitter),
            (&mut self.facebook, &fields.facebook),
            (&mut self.linkedin, &fields.linkedin),
            (&mut self.instagram, &fields.instagram),
        ];
        for (slot, incoming) in pairs {
            if let Some(value) = non_blank(incoming) {
                *slot = Some(value);
            }
        }
    }

    fn is_empty(&self) -> bool {
        self == &Social::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: Id,
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: Id,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Skills arrive either as the form's comma-separated string or as a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    Csv(String),
    List(Vec<String>),
}

impl SkillsInput {
    pub fn to_list(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            SkillsInput::Csv(csv) => csv.split(',').collect(),
            SkillsInput::List(list) => list.iter().map(String::as_str).collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of the create/update profile request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<SkillsInput>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

impl ProfileFields {
    pub fn skill_list(&self) -> Vec<String> {
        self.skills.as_ref().map(SkillsInput::to_list).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewExperience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEducation {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub fieldofstudy: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl Profile {
    /// Build a fresh profile for `user_id` from already validated fields.
    pub fn from_fields(user_id: Id, fields: &ProfileFields) -> Self {
        let mut profile = Self {
            id: generate_id(),
            user: user_id,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: String::new(),
            githubusername: None,
            skills: Vec::new(),
            social: None,
            experience: Vec::new(),
            education: Vec::new(),
            date: now(),
            version: 0,
        };
        profile.apply_fields(fields);
        profile
    }

    /// Field-level merge: only values present in `fields` overwrite.
    pub fn apply_fields(&mut self, fields: &ProfileFields) {
        let optional = [
            (&mut self.company, &fields.company),
            (&mut self.website, &fields.website),
            (&mut self.location, &fields.location),
            (&mut self.bio, &fields.bio),
            (&mut self.githubusername, &fields.githubusername),
        ];
        for (slot, incoming) in optional {
            if let Some(value) = non_blank(incoming) {
                *slot = Some(value);
            }
        }

        if let Some(status) = non_blank(&fields.status) {
            self.status = status;
        }

        let skills = fields.skill_list();
        if !skills.is_empty() {
            self.skills = skills;
        }

        let mut social = self.social.take().unwrap_or_default();
        social.merge(fields);
        self.social = if social.is_empty() { None } else { Some(social) };
    }

    pub fn populate(self, user: UserSummary) -> PopulatedProfile {
        Profile {
            id: self.id,
            user,
            company: self.company,
            website: self.website,
            location: self.location,
            bio: self.bio,
            status: self.status,
            githubusername: self.githubusername,
            skills: self.skills,
            social: self.social,
            experience: self.experience,
            education: self.education,
            date: self.date,
            version: self.version,
        }
    }
}

// src/photo.rs

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated point in decimal degrees.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AppError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidArgument(format!(
                "latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidArgument(format!(
                "longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// Stored coordinates are not re-validated here; the storage layer owns them.
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_name: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DateTaken {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photograph {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub location: Location,
    pub date_uploaded: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<DateTaken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub privacy: Privacy,
}

impl Photograph {
    pub fn is_public(&self) -> bool {
        self.privacy == Privacy::Public
    }
}

/// Upload payload: everything the storage layer does not stamp itself.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewPhotograph {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: String,
    pub location: Location,
    #[serde(default)]
    pub date_taken: Option<DateTaken>,
    #[serde(default)]
    pub user_tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub privacy: Privacy,
}

impl NewPhotograph {
    pub fn into_photograph(self, id: String, owner: String, now: DateTime<Utc>) -> Photograph {
        Photograph {
            id,
            user_id: owner,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            thumbnail_url: self.thumbnail_url,
            location: self.location,
            date_uploaded: now,
            date_taken: self.date_taken,
            user_tags: self.user_tags,
            comments: Vec::new(),
            privacy: self.privacy,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub photos_uploaded: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserSettings {
    pub privacy: Privacy,
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            privacy: Privacy::Public,
            notifications: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub stats: UserStats,
    #[serde(default)]
    pub settings: UserSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub settings: UserSettings,
}

impl NewUser {
    pub fn into_user(self, id: String, now: DateTime<Utc>) -> User {
        User {
            id,
            email: self.email,
            display_name: self.display_name,
            photo_url: self.photo_url,
            created_at: now,
            profile: self.profile,
            stats: UserStats::default(),
            settings: self.settings,
        }
    }
}

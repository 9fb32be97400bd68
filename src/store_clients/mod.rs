pub mod json_file;
pub mod memory;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::photo::{Photograph, User};
use crate::store::PhotoStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Builds the backend named by `store` in the configuration.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn PhotoStore>, AppError> {
    log::info!("Using {} document store", config.store);
    match config.store.as_str() {
        "json" => Ok(Arc::new(json_file::JsonFileStore::new(config)?)),
        "memory" => Ok(Arc::new(memory::MemoryStore::new())),
        other => Err(AppError::InvalidArgument(format!(
            "unknown store {:?}, expected \"json\" or \"memory\"",
            other
        ))),
    }
}

/// The whole document set both backends operate on.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Documents {
    #[serde(default)]
    pub photos: Vec<Photograph>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Documents {
    pub(crate) fn public_photos_by_upload_desc(&self, limit: usize) -> Vec<Photograph> {
        let mut photos: Vec<Photograph> = self.photos.iter().filter(|p| p.is_public()).cloned().collect();
        sort_by_upload_desc(&mut photos);
        photos.truncate(limit);
        photos
    }

    pub(crate) fn photos_by_user(&self, user_id: &str) -> Vec<Photograph> {
        let mut photos: Vec<Photograph> = self.photos.iter().filter(|p| p.user_id == user_id).cloned().collect();
        sort_by_upload_desc(&mut photos);
        photos
    }

    pub(crate) fn photo(&self, id: &str) -> Option<Photograph> {
        self.photos.iter().find(|p| p.id == id).cloned()
    }

    pub(crate) fn user(&self, id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub(crate) fn insert_photo(&mut self, photo: Photograph) -> Result<(), AppError> {
        if self.photos.iter().any(|p| p.id == photo.id) {
            return Err(AppError::InvalidArgument(format!("photo {} already exists", photo.id)));
        }
        if let Some(owner) = self.users.iter_mut().find(|u| u.id == photo.user_id) {
            owner.stats.photos_uploaded += 1;
        }
        self.photos.push(photo);
        Ok(())
    }

    pub(crate) fn insert_user(&mut self, user: User) -> Result<(), AppError> {
        if self.users.iter().any(|u| u.id == user.id) {
            return Err(AppError::InvalidArgument(format!("user {} already exists", user.id)));
        }
        self.users.push(user);
        Ok(())
    }
}

fn sort_by_upload_desc(photos: &mut [Photograph]) {
    photos.sort_by(|a, b| b.date_uploaded.cmp(&a.date_uploaded));
}

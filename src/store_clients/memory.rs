use crate::error::AppError;
use crate::photo::{Photograph, User};
use crate::store::PhotoStore;
use crate::store_clients::Documents;
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Documents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Documents) -> Self {
        log::debug!(
            "Seeding memory store with {} photos and {} users",
            documents.photos.len(),
            documents.users.len()
        );
        Self {
            documents: RwLock::new(documents),
        }
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn fetch_public_photos_ordered_by_upload_desc(&self, limit: usize) -> Result<Vec<Photograph>, AppError> {
        let photos = self.documents.read().await.public_photos_by_upload_desc(limit);
        log::trace!("Memory store returned {} public photos (limit {})", photos.len(), limit);
        Ok(photos)
    }

    async fn fetch_photos_by_user(&self, user_id: &str) -> Result<Vec<Photograph>, AppError> {
        Ok(self.documents.read().await.photos_by_user(user_id))
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photograph>, AppError> {
        Ok(self.documents.read().await.photo(id))
    }

    async fn add_photo(&self, photo: Photograph) -> Result<(), AppError> {
        log::debug!("Storing photo {} in memory", photo.id);
        self.documents.write().await.insert_photo(photo)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.documents.read().await.user(id))
    }

    async fn create_user(&self, user: User) -> Result<(), AppError> {
        log::debug!("Storing user {} in memory", user.id);
        self.documents.write().await.insert_user(user)
    }
}

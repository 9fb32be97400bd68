use crate::error::AppError;
use crate::photo::{Photograph, User};
use async_trait::async_trait;

/// Document storage for photographs and users.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn fetch_public_photos_ordered_by_upload_desc(&self, limit: usize) -> Result<Vec<Photograph>, AppError>;
    async fn fetch_photos_by_user(&self, user_id: &str) -> Result<Vec<Photograph>, AppError>;
    async fn get_photo(&self, id: &str) -> Result<Option<Photograph>, AppError>;
    async fn add_photo(&self, photo: Photograph) -> Result<(), AppError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn create_user(&self, user: User) -> Result<(), AppError>;
}

use crate::config::AppConfig;
use crate::error::AppError;
use crate::photo::{Photograph, User};
use crate::store::PhotoStore;
use crate::store_clients::Documents;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Keeps every document in memory and rewrites the JSON file after each write.
/// A write only becomes visible once the file has been replaced.
pub struct JsonFileStore {
    path: PathBuf,
    documents: RwLock<Documents>,
}

impl JsonFileStore {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::open(&config.data_file)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening JSON document store at: {:?}", path);

        let documents = if path.exists() {
            let bytes = std::fs::read(&path)?;
            let documents: Documents = serde_json::from_slice(&bytes)?;
            log::info!(
                "Loaded {} photos and {} users from {:?}",
                documents.photos.len(),
                documents.users.len(),
                path
            );
            documents
        } else {
            log::info!("Document file {:?} not found. Starting with an empty store.", path);
            Documents::default()
        };

        Ok(Self {
            path,
            documents: RwLock::new(documents),
        })
    }

    async fn persist(&self, documents: &Documents) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(documents)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        log::trace!("Persisted document store to {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl PhotoStore for JsonFileStore {
    async fn fetch_public_photos_ordered_by_upload_desc(&self, limit: usize) -> Result<Vec<Photograph>, AppError> {
        Ok(self.documents.read().await.public_photos_by_upload_desc(limit))
    }

    async fn fetch_photos_by_user(&self, user_id: &str) -> Result<Vec<Photograph>, AppError> {
        Ok(self.documents.read().await.photos_by_user(user_id))
    }

    async fn get_photo(&self, id: &str) -> Result<Option<Photograph>, AppError> {
        Ok(self.documents.read().await.photo(id))
    }

    async fn add_photo(&self, photo: Photograph) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        log::debug!("Storing photo {} in {:?}", photo.id, self.path);
        let mut next = documents.clone();
        next.insert_photo(photo)?;
        self.persist(&next).await?;
        *documents = next;
        Ok(())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.documents.read().await.user(id))
    }

    async fn create_user(&self, user: User) -> Result<(), AppError> {
        let mut documents = self.documents.write().await;
        log::debug!("Storing user {} in {:?}", user.id, self.path);
        let mut next = documents.clone();
        next.insert_user(user)?;
        self.persist(&next).await?;
        *documents = next;
        Ok(())
    }
}

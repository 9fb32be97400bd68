use crate::error::AppError;
use crate::photo::Photograph;

/// Identity of whoever is looking at the map, passed explicitly into every
/// operation that cares about ownership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Option<String>,
    pub loading: bool,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Identity not resolved yet; ownership checks treat it as anonymous.
    pub fn loading() -> Self {
        Self {
            user_id: None,
            loading: true,
        }
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            loading: false,
        }
    }

    pub fn is_owner(&self, photo: &Photograph) -> bool {
        self.user_id.as_deref() == Some(photo.user_id.as_str())
    }

    pub fn can_see(&self, photo: &Photograph) -> bool {
        photo.is_public() || self.is_owner(photo)
    }

    pub fn require_user(&self) -> Result<&str, AppError> {
        if self.loading {
            return Err(AppError::SessionLoading);
        }
        self.user_id
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("sign in required".into()))
    }
}

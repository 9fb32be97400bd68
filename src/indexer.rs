use crate::error::AppError;
use crate::photo::Photograph;
use crate::store::PhotoStore;
use std::sync::Arc;

/// Drains processed photographs into the store. Returns how many were written.
pub fn start_indexing(
    store: Arc<dyn PhotoStore>,
    photo_rx: crossbeam_channel::Receiver<Photograph>,
) -> Result<usize, AppError> {
    log::info!("Starting photo indexing");

    let mut stored = 0;
    for photo in photo_rx {
        let id = photo.id.clone();
        match futures::executor::block_on(store.add_photo(photo)) {
            Ok(()) => {
                stored += 1;
                log::debug!("Stored photo {}", id);
            }
            // the same file can appear twice in one scan
            Err(AppError::InvalidArgument(reason)) => log::warn!("Skipping photo {}: {}", id, reason),
            Err(e) => return Err(e),
        }
    }

    log::info!("Indexed {} photos.", stored);
    Ok(stored)
}

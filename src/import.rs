use crate::error::AppError;
use crate::photo::Privacy;
use crate::store::PhotoStore;
use crate::{indexer, processor, walker};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub owner: String,
    pub privacy: Privacy,
    pub media_base_url: String,
}

/// Walks `scan_directory` for geotagged photos and stores them for `options.owner`.
/// Returns the number of photographs written.
pub async fn run_import(
    scan_directory: PathBuf,
    allowed_extensions: HashSet<String>,
    options: ImportOptions,
    store: Arc<dyn PhotoStore>,
) -> Result<usize, AppError> {
    let existing_ids: HashSet<String> = store
        .fetch_photos_by_user(&options.owner)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    log::info!("Found {} photos already stored for {}.", existing_ids.len(), options.owner);

    let (paths_tx, paths_rx) = crossbeam_channel::unbounded();
    let (photo_tx, photo_rx) = crossbeam_channel::unbounded();

    let walker_handle = tokio::task::spawn_blocking(move || {
        walker::start_walking(&scan_directory, &allowed_extensions, paths_tx)
    });

    let processor_handle = tokio::task::spawn_blocking(move || {
        processor::start_processing(&options, paths_rx, photo_tx, existing_ids)
    });

    let indexer_handle = tokio::task::spawn_blocking(move || indexer::start_indexing(store, photo_rx));

    let (walked, processed, indexed) = tokio::try_join!(walker_handle, processor_handle, indexer_handle)?;
    walked?;
    processed?;
    let stored = indexed?;

    log::info!("All import tasks have completed.");
    Ok(stored)
}

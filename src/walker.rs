use crate::error::AppError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn start_walking(
    scan_directory: &Path,
    allowed_extensions: &HashSet<String>,
    paths_tx: crossbeam_channel::Sender<PathBuf>,
) -> Result<(), AppError> {
    log::info!("Starting photo discovery in {:?}", scan_directory);
    log::debug!("Configured allowed extensions: {:?}", allowed_extensions);

    for entry in WalkDir::new(scan_directory)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            log::trace!("Skipping non-file entry: {:?}", entry.path());
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if allowed_extensions.contains(&ext.to_lowercase()) => {
                log::debug!("Sending photo to processor: {:?}", path);
                paths_tx.send(path.to_path_buf())?;
            }
            Some(_) => log::trace!("Skipping file due to unsupported extension: {:?}", path),
            None => log::trace!("Skipping file with no extension: {:?}", path),
        }
    }

    log::info!("Photo discovery complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("nostos-walker-{}-{}", std::process::id(), seq));
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        dir
    }

    #[test]
    fn forwards_only_allowed_extensions_case_insensitively() {
        let dir = scratch_dir();
        std::fs::write(dir.join("a.jpg"), b"x").unwrap();
        std::fs::write(dir.join("nested").join("b.JPEG"), b"x").unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.join("README"), b"x").unwrap();

        let allowed: HashSet<String> = ["jpg", "jpeg"].iter().map(|s| s.to_string()).collect();
        let (tx, rx) = crossbeam_channel::unbounded();
        start_walking(&dir, &allowed, tx).unwrap();

        let mut names: Vec<String> = rx
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.jpg", "b.JPEG"]);

        std::fs::remove_dir_all(&dir).ok();
    }
}

use crate::error::AppError;
use crate::import::ImportOptions;
use crate::photo::{DateTaken, GeoPoint, Location, Photograph};
use chrono::Utc;
use exif::{Exif, In, Reader, Tag, Value};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

pub fn start_processing(
    options: &ImportOptions,
    paths_rx: crossbeam_channel::Receiver<PathBuf>,
    photo_tx: crossbeam_channel::Sender<Photograph>,
    existing_ids: HashSet<String>,
) -> Result<(), AppError> {
    log::info!("Starting photo processing for owner {}", options.owner);

    let paths: Vec<PathBuf> = paths_rx.iter().collect();
    log::info!("Received {} paths for processing.", paths.len());

    paths.into_par_iter().try_for_each(|path| {
        match process_photo(options, &path, &existing_ids) {
            Ok(Some(photo)) => {
                log::trace!("Built photo record for {:?}: {:?}", path, photo);
                photo_tx.send(photo)?;
                Ok::<(), AppError>(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                log::warn!("Failed to process photo {:?}: {}", path, e);
                // Keep going with the remaining files
                Ok(())
            }
        }
    })?;

    log::info!("All photos processed.");
    Ok(())
}

/// Builds a photograph record for one file, or `None` when the file is
/// already stored or carries no usable GPS position.
fn process_photo(
    options: &ImportOptions,
    path: &Path,
    existing_ids: &HashSet<String>,
) -> Result<Option<Photograph>, AppError> {
    let id = content_hash(path)?;
    if existing_ids.contains(&id) {
        log::debug!("Photo {:?} already stored as {}", path, id);
        return Ok(None);
    }

    let mut buf_reader = BufReader::new(File::open(path)?);
    let exif = match Reader::new().read_from_container(&mut buf_reader) {
        Ok(exif) => exif,
        Err(e) => {
            log::warn!("Skipping {:?}: no readable EXIF data ({})", path, e);
            return Ok(None);
        }
    };

    let point = match gps_point(&exif) {
        Some(point) => point,
        None => {
            log::warn!("Skipping {:?}: no GPS position in EXIF", path);
            return Ok(None);
        }
    };
    let point = GeoPoint::new(point.0, point.1)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.clone());
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.clone());
    let media_url = format!("{}/{}", options.media_base_url.trim_end_matches('/'), file_name);

    let photo = Photograph {
        id,
        user_id: options.owner.clone(),
        title,
        description: String::new(),
        image_url: media_url.clone(),
        thumbnail_url: media_url,
        location: Location {
            latitude: point.latitude,
            longitude: point.longitude,
            address: None,
        },
        date_uploaded: Utc::now(),
        date_taken: date_taken(&exif),
        user_tags: None,
        comments: Vec::new(),
        privacy: options.privacy,
    };
    log::debug!("Photo {:?} located at {:?}", path, point);
    Ok(Some(photo))
}

fn content_hash(path: &Path) -> Result<String, AppError> {
    log::trace!("Calculating hash for photo: {:?}", path);
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn gps_point(exif: &Exif) -> Option<(f64, f64)> {
    let latitude = coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let longitude = coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;
    Some((latitude, longitude))
}

fn coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let parts: Vec<f64> = match &field.value {
        Value::Rational(values) => values.iter().map(|v| v.to_f64()).collect(),
        _ => return None,
    };
    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| match &f.value {
            Value::Ascii(strings) => strings.first().and_then(|s| s.first().copied()),
            _ => None,
        });
    dms_to_degrees(&parts, reference)
}

/// Folds degrees/minutes/seconds into signed decimal degrees; `S` and `W`
/// references are negative.
pub(crate) fn dms_to_degrees(parts: &[f64], reference: Option<u8>) -> Option<f64> {
    if parts.is_empty() || parts.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let degrees = parts
        .iter()
        .zip([1.0, 60.0, 3600.0])
        .map(|(value, divisor)| value / divisor)
        .sum::<f64>();
    match reference.map(|r| r.to_ascii_uppercase()) {
        Some(b'S') | Some(b'W') => Some(-degrees),
        _ => Some(degrees),
    }
}

fn date_taken(exif: &Exif) -> Option<DateTaken> {
    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let raw = match &field.value {
        Value::Ascii(strings) => strings.first()?,
        _ => return None,
    };
    let parsed = exif::DateTime::from_ascii(raw).ok()?;
    Some(DateTaken {
        year: i32::from(parsed.year),
        month: Some(u32::from(parsed.month)).filter(|m| *m > 0),
        day: Some(u32::from(parsed.day)).filter(|d| *d > 0),
    })
}

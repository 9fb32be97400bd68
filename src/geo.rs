//! Geo-Filter: which photographs lie within a radius of a reference point.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. The spherical model is off by up to ~0.5% against the
//! WGS84 ellipsoid; that error is accepted.

use crate::error::AppError;
use crate::photo::{GeoPoint, Photograph};
use crate::session::Viewer;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Size of the candidate pool kept after the recency sort. The pool is cut
/// *before* the distance check, so with more than this many eligible
/// photographs a nearby but older one can be dropped.
pub const CANDIDATE_POOL_LIMIT: usize = 50;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push antipodal points just past 1
    let h = h.min(1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[derive(Debug, Clone, Copy)]
pub struct GeoFilter {
    pub candidate_limit: usize,
}

impl Default for GeoFilter {
    fn default() -> Self {
        Self {
            candidate_limit: CANDIDATE_POOL_LIMIT,
        }
    }
}

impl GeoFilter {
    pub fn new(candidate_limit: usize) -> Self {
        Self { candidate_limit }
    }

    /// Public photographs within `radius_km` of `reference`, newest upload first.
    pub fn filter_nearby(
        &self,
        reference: GeoPoint,
        candidates: &[Photograph],
        radius_km: f64,
    ) -> Result<Vec<Photograph>, AppError> {
        self.filter_eligible(reference, candidates, radius_km, Photograph::is_public)
    }

    /// Like [`GeoFilter::filter_nearby`], but the viewer's own private
    /// photographs are eligible too.
    pub fn filter_nearby_for(
        &self,
        viewer: &Viewer,
        reference: GeoPoint,
        candidates: &[Photograph],
        radius_km: f64,
    ) -> Result<Vec<Photograph>, AppError> {
        self.filter_eligible(reference, candidates, radius_km, |photo| viewer.can_see(photo))
    }

    fn filter_eligible<F>(
        &self,
        reference: GeoPoint,
        candidates: &[Photograph],
        radius_km: f64,
        eligible: F,
    ) -> Result<Vec<Photograph>, AppError>
    where
        F: Fn(&Photograph) -> bool,
    {
        let reference = GeoPoint::new(reference.latitude, reference.longitude)?;
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(AppError::InvalidArgument(format!(
                "radius_km must be > 0, got {}",
                radius_km
            )));
        }

        let mut pool: Vec<&Photograph> = candidates.iter().filter(|p| eligible(*p)).collect();
        // sort_by is stable: equal upload times keep their input order
        pool.sort_by(|a, b| b.date_uploaded.cmp(&a.date_uploaded));
        pool.truncate(self.candidate_limit);
        log::debug!(
            "Geo-filter pool: {} candidates, {} eligible after cap of {}",
            candidates.len(),
            pool.len(),
            self.candidate_limit
        );

        let nearby: Vec<Photograph> = pool
            .into_iter()
            .filter(|photo| {
                let distance = haversine_km(reference, photo.location.point());
                log::trace!("Photo {} is {:.3} km from reference", photo.id, distance);
                distance <= radius_km
            })
            .cloned()
            .collect();

        log::debug!("Geo-filter found {} photos within {} km", nearby.len(), radius_km);
        Ok(nearby)
    }
}

pub fn filter_nearby(
    reference: GeoPoint,
    candidates: &[Photograph],
    radius_km: f64,
) -> Result<Vec<Photograph>, AppError> {
    GeoFilter::default().filter_nearby(reference, candidates, radius_km)
}

pub fn filter_nearby_for(
    viewer: &Viewer,
    reference: GeoPoint,
    candidates: &[Photograph],
    radius_km: f64,
) -> Result<Vec<Photograph>, AppError> {
    GeoFilter::default().filter_nearby_for(viewer, reference, candidates, radius_km)
}

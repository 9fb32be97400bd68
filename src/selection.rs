//! Selection state machine: which photograph is open, in which panel, and
//! the camera moves that go with it.
//!
//! ```text
//! Idle      --marker(P)-------> Selected(P)   camera -> P
//! Selected  --marker(Q != P)--> Selected(Q)   camera -> Q
//! Selected  --view_full-------> FullView
//! FullView  --collapse--------> Selected
//! Selected  --close-----------> Idle
//! FullView  --close-----------> Idle
//! ```
//!
//! Any other event/state pair is ignored.

use crate::config::MapConfig;
use crate::photo::{GeoPoint, Photograph};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

pub const FOCUS_ZOOM: f64 = 15.0;
pub const FOCUS_DURATION_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMove {
    pub center: GeoPoint,
    pub zoom: f64,
    pub duration_ms: u64,
}

/// Map renderer side of the camera. Calls must return without waiting for
/// the animation; a newer move supersedes an older one.
pub trait MapCamera {
    fn move_camera(&self, command: CameraMove);
}

impl MapCamera for UnboundedSender<CameraMove> {
    fn move_camera(&self, command: CameraMove) {
        if self.send(command).is_err() {
            log::warn!("Map camera receiver is gone; dropping move to {:?}", command.center);
        }
    }
}

impl<C: MapCamera + ?Sized> MapCamera for &C {
    fn move_camera(&self, command: CameraMove) {
        (**self).move_camera(command)
    }
}

/// A click as delivered by the map renderer.
#[derive(Debug, Default, Clone)]
pub struct PointerEvent {
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// What to do when the selected photograph drops out of the marker set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleSelectionPolicy {
    #[default]
    Keep,
    AutoClose,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(Photograph),
    FullView(Photograph),
}

impl SelectionState {
    pub fn selected_photo(&self) -> Option<&Photograph> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected(photo) | SelectionState::FullView(photo) => Some(photo),
        }
    }

    pub fn selected_photo_id(&self) -> Option<&str> {
        self.selected_photo().map(|p| p.id.as_str())
    }

    pub fn full_view_active(&self) -> bool {
        matches!(self, SelectionState::FullView(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectionOptions {
    pub focus_zoom: f64,
    pub focus_duration_ms: u64,
    pub deselect_on_background_click: bool,
    pub stale_selection: StaleSelectionPolicy,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            focus_zoom: FOCUS_ZOOM,
            focus_duration_ms: FOCUS_DURATION_MS,
            deselect_on_background_click: false,
            stale_selection: StaleSelectionPolicy::Keep,
        }
    }
}

impl From<&MapConfig> for SelectionOptions {
    fn from(config: &MapConfig) -> Self {
        Self {
            focus_zoom: config.focus_zoom,
            focus_duration_ms: config.focus_duration_ms,
            deselect_on_background_click: config.deselect_on_background_click,
            stale_selection: config.stale_selection,
        }
    }
}

pub struct SelectionMachine<C: MapCamera> {
    state: SelectionState,
    camera: C,
    options: SelectionOptions,
}

impl<C: MapCamera> SelectionMachine<C> {
    pub fn new(camera: C) -> Self {
        Self::with_options(camera, SelectionOptions::default())
    }

    pub fn with_options(camera: C, options: SelectionOptions) -> Self {
        Self {
            state: SelectionState::Idle,
            camera,
            options,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_photo_id(&self) -> Option<&str> {
        self.state.selected_photo_id()
    }

    pub fn full_view_active(&self) -> bool {
        self.state.full_view_active()
    }

    /// Handles a marker click. The pointer event is always marked as
    /// consumed so the map background never sees it, even when the click
    /// itself is ignored. Returns whether the state changed.
    pub fn marker_clicked(&mut self, photo: &Photograph, pointer: &mut PointerEvent) -> bool {
        pointer.stop_propagation();

        let accept = match &self.state {
            SelectionState::Idle => true,
            SelectionState::Selected(current) => current.id != photo.id,
            SelectionState::FullView(_) => false,
        };
        if !accept {
            log::trace!("Ignoring marker click on {} while {}", photo.id, self.state_name());
            return false;
        }

        log::debug!("Selecting photo {} (was {:?})", photo.id, self.selected_photo_id());
        self.state = SelectionState::Selected(photo.clone());
        self.focus(photo);
        true
    }

    pub fn view_full(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SelectionState::Selected(photo) => {
                log::debug!("Opening full view for photo {}", photo.id);
                self.state = SelectionState::FullView(photo);
                true
            }
            other => {
                self.state = other;
                log::trace!("Ignoring view_full while {}", self.state_name());
                false
            }
        }
    }

    /// Leaves the full-screen overlay but keeps the compact panel open.
    pub fn collapse_full_view(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            SelectionState::FullView(photo) => {
                log::debug!("Collapsing full view for photo {}", photo.id);
                self.state = SelectionState::Selected(photo);
                true
            }
            other => {
                self.state = other;
                log::trace!("Ignoring collapse_full_view while {}", self.state_name());
                false
            }
        }
    }

    pub fn close(&mut self) -> bool {
        if matches!(self.state, SelectionState::Idle) {
            log::trace!("Ignoring close while idle");
            return false;
        }
        log::debug!("Closing selection of photo {:?}", self.selected_photo_id());
        self.state = SelectionState::Idle;
        true
    }

    pub fn background_clicked(&mut self, pointer: &PointerEvent) -> bool {
        if pointer.propagation_stopped() || !self.options.deselect_on_background_click {
            return false;
        }
        self.close()
    }

    /// Applies the stale-selection policy after the visible marker set changed.
    pub fn reconcile(&mut self, visible: &[Photograph]) -> bool {
        let stale = match self.state.selected_photo_id() {
            Some(id) => !visible.iter().any(|p| p.id == id),
            None => false,
        };
        if !stale {
            return false;
        }
        match self.options.stale_selection {
            StaleSelectionPolicy::Keep => {
                log::debug!("Selected photo {:?} left the marker set; keeping it open", self.selected_photo_id());
                false
            }
            StaleSelectionPolicy::AutoClose => {
                log::debug!("Selected photo {:?} left the marker set; closing", self.selected_photo_id());
                self.close()
            }
        }
    }

    fn focus(&self, photo: &Photograph) {
        self.camera.move_camera(CameraMove {
            center: photo.location.point(),
            zoom: self.options.focus_zoom,
            duration_ms: self.options.focus_duration_ms,
        });
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            SelectionState::Idle => "Idle",
            SelectionState::Selected(_) => "Selected",
            SelectionState::FullView(_) => "FullView",
        }
    }
}

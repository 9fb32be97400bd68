use crate::photo::{Comment, GeoPoint, Photograph, Tag};
use crate::selection::SelectionState;
use serde::Serialize;

pub const MINI_MAP_ZOOM: f64 = 16.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "panel", rename_all = "camelCase")]
pub enum PanelView {
    Hidden,
    Compact(DetailPanel),
    Full(FullViewPanel),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetailPanel {
    pub photo_id: String,
    pub image_url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub comment_count: usize,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct MiniMap {
    pub center: GeoPoint,
    pub zoom: f64,
    pub interactive: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FullViewPanel {
    pub photo_id: String,
    pub image_url: String,
    pub title: String,
    /// `None` hides the tag row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// `None` hides the year label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub mini_map: MiniMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub comments: Vec<Comment>,
}

impl DetailPanel {
    pub fn from_photo(photo: &Photograph) -> Self {
        Self {
            photo_id: photo.id.clone(),
            image_url: photo.image_url.clone(),
            title: photo.title.clone(),
            description: photo.description.clone(),
            address: photo.location.address.clone(),
            comment_count: photo.comments.len(),
            comments: photo.comments.clone(),
        }
    }
}

impl FullViewPanel {
    pub fn from_photo(photo: &Photograph, mini_map_zoom: f64) -> Self {
        let tags = photo
            .user_tags
            .as_ref()
            .filter(|tags| !tags.is_empty())
            .cloned();
        Self {
            photo_id: photo.id.clone(),
            image_url: photo.image_url.clone(),
            title: photo.title.clone(),
            tags,
            year: photo.date_taken.map(|d| d.year),
            mini_map: MiniMap {
                center: photo.location.point(),
                zoom: mini_map_zoom,
                interactive: false,
            },
            address: photo.location.address.clone(),
            comments: photo.comments.clone(),
        }
    }
}

impl PanelView {
    pub fn for_state(state: &SelectionState, mini_map_zoom: f64) -> Self {
        match state {
            SelectionState::Idle => PanelView::Hidden,
            SelectionState::Selected(photo) => PanelView::Compact(DetailPanel::from_photo(photo)),
            SelectionState::FullView(photo) => {
                PanelView::Full(FullViewPanel::from_photo(photo, mini_map_zoom))
            }
        }
    }
}

impl From<&SelectionState> for PanelView {
    fn from(state: &SelectionState) -> Self {
        PanelView::for_state(state, MINI_MAP_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{annotated, photo};
    use crate::photo::Privacy;

    fn bare() -> Photograph {
        photo("p", 38.10, 37.88, "2024-01-01T00:00:00Z", Privacy::Public)
    }

    #[test]
    fn idle_shows_no_panel() {
        assert_eq!(PanelView::from(&SelectionState::Idle), PanelView::Hidden);
    }

    #[test]
    fn compact_panel_lists_comments_in_insertion_order() {
        let view = PanelView::from(&SelectionState::Selected(annotated(bare())));
        let PanelView::Compact(panel) = view else {
            panic!("expected compact panel, got {:?}", view);
        };
        assert_eq!(panel.comment_count, 2);
        let ids: Vec<_> = panel.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(panel.address.as_deref(), Some("Address of p"));
    }

    #[test]
    fn full_panel_carries_tags_year_and_static_mini_map() {
        let view = PanelView::from(&SelectionState::FullView(annotated(bare())));
        let PanelView::Full(panel) = view else {
            panic!("expected full panel, got {:?}", view);
        };
        assert_eq!(panel.year, Some(1974));
        assert_eq!(panel.tags.as_ref().map(Vec::len), Some(2));
        assert_eq!(panel.mini_map.zoom, 16.0);
        assert!(!panel.mini_map.interactive);
        assert_eq!(panel.mini_map.center, bare().location.point());
    }

    #[test]
    fn absent_tags_and_year_are_omitted() {
        let mut photo = bare();
        photo.user_tags = Some(vec![]);
        let PanelView::Full(panel) = PanelView::for_state(&SelectionState::FullView(photo), 14.0) else {
            panic!("expected full panel");
        };
        assert_eq!(panel.tags, None);
        assert_eq!(panel.year, None);
        assert_eq!(panel.mini_map.zoom, 14.0);

        let json = serde_json::to_value(PanelView::Full(panel)).unwrap();
        assert_eq!(json["panel"], "full");
        assert!(json.get("tags").is_none());
        assert!(json.get("year").is_none());
    }
}

use crate::photo::{Comment, DateTaken, Location, Photograph, Privacy, Tag};
use chrono::{DateTime, Utc};

pub(crate) fn photo(id: &str, latitude: f64, longitude: f64, uploaded: &str, privacy: Privacy) -> Photograph {
    Photograph {
        id: id.to_string(),
        user_id: "owner".to_string(),
        title: format!("Photo {}", id),
        description: format!("Description of {}", id),
        image_url: format!("/media/{}.jpg", id),
        thumbnail_url: format!("/media/{}_thumb.jpg", id),
        location: Location {
            latitude,
            longitude,
            address: Some(format!("Address of {}", id)),
        },
        date_uploaded: uploaded.parse::<DateTime<Utc>>().unwrap(),
        date_taken: None,
        user_tags: None,
        comments: vec![],
        privacy,
    }
}

pub(crate) fn annotated(mut photo: Photograph) -> Photograph {
    photo.date_taken = Some(DateTaken { year: 1974, month: Some(6), day: None });
    photo.user_tags = Some(vec![
        Tag { id: "t1".into(), label: "Ayşe".into() },
        Tag { id: "t2".into(), label: "Mehmet".into() },
    ]);
    photo.comments = vec![
        Comment { id: "c1".into(), user_name: "ozan".into(), text: "first".into() },
        Comment { id: "c2".into(), user_name: "deniz".into(), text: "second".into() },
    ];
    photo
}

use std::collections::BTreeMap;

use tagsift::domain::models::{Candidate, MediaFile};

/// Candidate with general tags and a downloadable image
pub fn candidate(id: i64, tags: &[&str]) -> Candidate {
    let mut grouped = BTreeMap::new();
    grouped.insert(
        "general".to_string(),
        tags.iter().map(ToString::to_string).collect(),
    );

    Candidate {
        id,
        tags: grouped,
        file: MediaFile {
            url: Some(format!("https://static.example/{id}.png")),
            ext: "png".to_string(),
            width: 800,
            height: 600,
        },
        created_at: None,
    }
}

/// Candidate whose file is hidden by the remote
pub fn candidate_without_media(id: i64, tags: &[&str]) -> Candidate {
    let mut candidate = candidate(id, tags);
    candidate.file.url = None;
    candidate
}

pub fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

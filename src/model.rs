use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Anything the queue can hold: a value with a stable identity.
///
/// Two values are the same track when their ids match, even if the rest of
/// the value differs.
pub trait Identified {
    type Id: Eq + Hash + Clone + Debug;

    fn id(&self) -> &Self::Id;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub path: PathBuf,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

impl Track {
    /// Track with only an id and a title; the path is derived from the id.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: PathBuf::from(format!("{id}.mp3")),
            id,
            title: title.into(),
            artist: None,
            album: None,
        }
    }

    pub fn label(&self) -> String {
        match self.artist.as_deref() {
            Some(artist) if !artist.trim().is_empty() => {
                format!("{} - {}", artist.trim(), self.title)
            }
            _ => self.title.clone(),
        }
    }
}

impl Identified for Track {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//! Media-domain types shared between the Plex client and the page models.

use serde::{Deserialize, Serialize};

use crate::ids::RatingKey;

/// The kind of a library item as reported by the media server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
    Season,
    Episode,
    Artist,
    Album,
    Track,
    Clip,
    Photo,
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Parse the server's `type` attribute. Unknown values map to
    /// [`MediaKind::Other`].
    pub fn from_plex(value: &str) -> Self {
        match value {
            "movie" => Self::Movie,
            "show" => Self::Show,
            "season" => Self::Season,
            "episode" => Self::Episode,
            "artist" => Self::Artist,
            "album" => Self::Album,
            "track" => Self::Track,
            "clip" => Self::Clip,
            "photo" => Self::Photo,
            _ => Self::Other,
        }
    }

    /// Whether the universal transcoder can produce a stream for this kind.
    pub fn is_playable(&self) -> bool {
        matches!(self, Self::Movie | Self::Episode | Self::Track | Self::Clip)
    }

    /// Whether streams for this kind go through the audio transcoder.
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Track)
    }
}

/// A single library item (movie, show, season, episode, track, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub rating_key: RatingKey,
    pub kind: MediaKind,
    pub title: String,
    pub summary: Option<String>,
    pub year: Option<i32>,
    /// Relative thumbnail path on the media server (unsigned).
    pub thumb: Option<String>,
    /// Relative background art path on the media server (unsigned).
    pub art: Option<String>,
    pub parent_title: Option<String>,
    pub grandparent_title: Option<String>,
    pub index: Option<i32>,
    pub parent_index: Option<i32>,
    pub duration_ms: Option<u64>,
    pub view_offset_ms: Option<u64>,
    pub view_count: u32,
    pub leaf_count: Option<u32>,
    pub viewed_leaf_count: Option<u32>,
}

impl MediaItem {
    /// Minimal item with only the identifying fields set.
    pub fn new(rating_key: RatingKey, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            rating_key,
            kind,
            title: title.into(),
            summary: None,
            year: None,
            thumb: None,
            art: None,
            parent_title: None,
            grandparent_title: None,
            index: None,
            parent_index: None,
            duration_ms: None,
            view_offset_ms: None,
            view_count: 0,
            leaf_count: None,
            viewed_leaf_count: None,
        }
    }

    /// The server-side metadata path used by the transcoder and scrobbler.
    pub fn key(&self) -> String {
        format!("/library/metadata/{}", self.rating_key)
    }

    /// Containers (shows, seasons) are watched when every leaf is; leaves
    /// when they have been played at least once.
    pub fn is_watched(&self) -> bool {
        match (self.leaf_count, self.viewed_leaf_count) {
            (Some(total), Some(viewed)) if total > 0 => viewed >= total,
            _ => self.view_count > 0,
        }
    }
}

/// A selectable account identity: the admin account or a user it shares with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub uuid: Option<String>,
    pub title: String,
    pub username: Option<String>,
    /// Avatar reference, passed through as the server returns it.
    pub thumb: Option<String>,
    pub admin: bool,
    pub restricted: bool,
}

impl Identity {
    /// The name used in `/login/{username}`. Managed users have no account
    /// username, so their display title stands in for it.
    pub fn login_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.title,
        }
    }

    /// Case-insensitive match against either the username or the title.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.title.to_lowercase() == name
            || self
                .username
                .as_deref()
                .is_some_and(|u| !u.is_empty() && u.to_lowercase() == name)
    }
}

//! JSON response shapes returned by the media server and plex.tv.
//!
//! Only the fields this application reads are modeled; everything else in
//! the payloads is ignored.

use pd_core::{Identity, MediaItem, MediaKind, RatingKey};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Media server
// ---------------------------------------------------------------------------

/// Every media server response is wrapped in a `MediaContainer`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub media_container: T,
}

/// Root endpoint (`GET /`) payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub friendly_name: String,
    pub machine_identifier: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// A list of library items. Empty lists omit the `Metadata` key.
#[derive(Debug, Default, Deserialize)]
pub struct MetadataList {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

/// `GET /hubs/search` payload.
#[derive(Debug, Default, Deserialize)]
pub struct HubList {
    #[serde(rename = "Hub", default)]
    pub hubs: Vec<Hub>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Hub {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Metadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "string_or_number")]
    pub rating_key: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub title: String,
    pub summary: Option<String>,
    pub year: Option<i32>,
    pub thumb: Option<String>,
    pub art: Option<String>,
    pub parent_title: Option<String>,
    pub grandparent_title: Option<String>,
    pub index: Option<i32>,
    pub parent_index: Option<i32>,
    pub duration: Option<u64>,
    pub view_offset: Option<u64>,
    #[serde(default)]
    pub view_count: u32,
    pub leaf_count: Option<u32>,
    pub viewed_leaf_count: Option<u32>,
}

impl Metadata {
    /// Convert to the domain type. Entries without a usable rating key
    /// (tags, directories in search hubs) yield `None`.
    pub fn into_item(self) -> Option<MediaItem> {
        let rating_key: RatingKey = self.rating_key.as_deref()?.parse().ok()?;
        Some(MediaItem {
            rating_key,
            kind: MediaKind::from_plex(&self.item_type),
            title: self.title,
            summary: self.summary.filter(|s| !s.is_empty()),
            year: self.year,
            thumb: self.thumb,
            art: self.art,
            parent_title: self.parent_title,
            grandparent_title: self.grandparent_title,
            index: self.index,
            parent_index: self.parent_index,
            duration_ms: self.duration,
            view_offset_ms: self.view_offset,
            view_count: self.view_count,
            leaf_count: self.leaf_count,
            viewed_leaf_count: self.viewed_leaf_count,
        })
    }
}

impl MetadataList {
    pub fn into_items(self) -> Vec<MediaItem> {
        self.metadata
            .into_iter()
            .filter_map(Metadata::into_item)
            .collect()
    }
}

impl HubList {
    /// Flatten every hub's items in hub order.
    pub fn into_items(self) -> Vec<MediaItem> {
        self.hubs
            .into_iter()
            .flat_map(|hub| hub.metadata)
            .filter_map(Metadata::into_item)
            .collect()
    }
}

/// Rating keys arrive as strings from the server but as numbers from some
/// proxies; accept both.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// plex.tv
// ---------------------------------------------------------------------------

/// `GET /api/v2/user` payload.
#[derive(Debug, Deserialize)]
pub struct AccountInfo {
    pub id: u64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
}

impl AccountInfo {
    pub fn into_identity(self) -> Identity {
        let title = self
            .title
            .clone()
            .or_else(|| self.username.clone())
            .unwrap_or_default();
        Identity {
            id: self.id,
            uuid: self.uuid,
            title,
            username: self.username,
            thumb: self.thumb,
            admin: true,
            restricted: false,
        }
    }
}

/// `GET /api/users` payload: every user the admin shares with, Plex Home
/// members (managed users included) and friends alike.
#[derive(Debug, Default, Deserialize)]
pub struct UserList {
    #[serde(rename = "User", default)]
    pub users: Vec<AccountUser>,
}

#[derive(Debug, Deserialize)]
pub struct AccountUser {
    #[serde(deserialize_with = "id_string_or_number")]
    pub id: u64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub restricted: bool,
}

impl AccountUser {
    pub fn into_identity(self) -> Identity {
        let title = if self.title.is_empty() {
            self.username.clone().unwrap_or_default()
        } else {
            self.title
        };
        Identity {
            id: self.id,
            uuid: self.uuid,
            title,
            username: self.username,
            thumb: self.thumb,
            admin: false,
            restricted: self.restricted,
        }
    }
}

/// `GET /api/servers/{machineId}/shared_servers` payload, read with the
/// admin token.
#[derive(Debug, Default, Deserialize)]
pub struct SharedServerList {
    #[serde(rename = "SharedServer", default)]
    pub shared_servers: Vec<SharedServer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedServer {
    #[serde(rename = "userID", deserialize_with = "id_string_or_number")]
    pub user_id: u64,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl SharedServerList {
    /// The server access token shared with `user_id`, if any.
    pub fn token_for(self, user_id: u64) -> Option<String> {
        self.shared_servers
            .into_iter()
            .find(|s| s.user_id == user_id)
            .and_then(|s| s.access_token)
            .filter(|t| !t.is_empty())
    }
}

/// plex.tv account ids arrive as numbers or as numeric strings.
fn id_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Boolean attributes arrive as `true`/`false`, `1`/`0` or `"1"`/`"0"`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Num(u64),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Num(n) => n != 0,
        Raw::Str(s) => matches!(s.trim(), "1" | "true"),
    })
}

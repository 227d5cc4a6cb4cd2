//! Traits at the boundary between route handlers and the media server.

use std::sync::Arc;

use pd_core::{Identity, MediaItem, RatingKey, Result};

/// Outcome of a lookup that may legitimately miss.
///
/// Transport and server failures are still reported through `Err`; a
/// `NotFound` here means the server answered and the entity does not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    /// Convert into an `Option`, dropping the distinction from `Err`.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

/// The admin connection to a media server.
#[async_trait::async_trait]
pub trait MediaServer: Send + Sync {
    /// Human-readable server name.
    fn friendly_name(&self) -> &str;

    /// The account that owns the admin token.
    async fn account(&self) -> Result<Identity>;

    /// Users the admin account shares with, home and friends (admin excluded).
    async fn users(&self) -> Result<Vec<Identity>>;

    /// Derive a library handle that acts as the named identity.
    async fn switch_user(&self, username: &str) -> Result<Lookup<Arc<dyn UserLibrary>>>;
}

/// Library operations performed as a specific user.
#[async_trait::async_trait]
pub trait UserLibrary: Send + Sync {
    /// In-progress and next-up items.
    async fn on_deck(&self) -> Result<Vec<MediaItem>>;

    async fn recently_added(&self) -> Result<Vec<MediaItem>>;

    async fn fetch_item(&self, rating_key: RatingKey) -> Result<Lookup<MediaItem>>;

    /// Direct children: seasons of a show, episodes of a season.
    async fn children(&self, rating_key: RatingKey) -> Result<Vec<MediaItem>>;

    async fn mark_watched(&self, rating_key: RatingKey) -> Result<()>;

    async fn mark_unwatched(&self, rating_key: RatingKey) -> Result<()>;

    /// Streaming URL for a playable item. Fails with a validation error for
    /// containers such as shows and seasons.
    fn stream_url(&self, item: &MediaItem) -> Result<String>;

    async fn search(&self, query: &str) -> Result<Vec<MediaItem>>;
}

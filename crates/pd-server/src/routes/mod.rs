//! Route handlers. Each returns a JSON page model for presentation.

pub mod dashboard;
pub mod health;
pub mod items;
pub mod player;
pub mod search;
pub mod users;

use pd_core::{Error, MediaItem, RatingKey};
use pd_plex::{UrlSigner, UserLibrary};
use serde::Serialize;

/// A media item decorated with authenticated asset URLs.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: MediaItem,
    pub thumb_url: Option<String>,
    pub art_url: Option<String>,
    pub watched: bool,
}

impl ItemView {
    /// Sign the thumbnail only.
    pub fn with_thumb(item: MediaItem, signer: &UrlSigner) -> Self {
        Self {
            thumb_url: signer.sign(item.thumb.as_deref()),
            art_url: None,
            watched: item.is_watched(),
            item,
        }
    }

    /// Sign both thumbnail and background art.
    pub fn with_art(item: MediaItem, signer: &UrlSigner) -> Self {
        let art_url = signer.sign(item.art.as_deref());
        Self {
            art_url,
            ..Self::with_thumb(item, signer)
        }
    }
}

pub(crate) fn sign_all(items: Vec<MediaItem>, signer: &UrlSigner) -> Vec<ItemView> {
    items
        .into_iter()
        .map(|item| ItemView::with_thumb(item, signer))
        .collect()
}

/// Parse a `{rating_key}` path segment. Anything that is not a positive
/// integer cannot name an item, and reads the same as a missing one.
pub(crate) fn parse_rating_key(raw: &str) -> Result<RatingKey, Error> {
    raw.parse().map_err(|_| Error::media_not_found(raw))
}

/// Fetch an item that must exist.
pub(crate) async fn fetch_existing(
    library: &dyn UserLibrary,
    rating_key: RatingKey,
) -> Result<MediaItem, Error> {
    library
        .fetch_item(rating_key)
        .await?
        .found()
        .ok_or_else(|| Error::media_not_found(rating_key))
}

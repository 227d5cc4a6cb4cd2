//! Library operations against the media server, as one user.

use pd_core::{Error, MediaItem, RatingKey, Result};
use reqwest::{Method, Url};

use crate::api::{Lookup, UserLibrary};
use crate::http::Endpoint;
use crate::wire::{Envelope, HubList, MetadataList};

const LIBRARY_IDENTIFIER: &str = "com.plexapp.plugins.library";

/// A [`UserLibrary`] backed by the media server HTTP API.
///
/// Holds the server base URL and the token of the user it acts as. Built per
/// request by [`crate::PlexServer::switch_user`] and never cached.
#[derive(Debug, Clone)]
pub struct PlexLibrary {
    endpoint: Endpoint,
}

impl PlexLibrary {
    pub(crate) fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    async fn list(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<MediaItem>> {
        let env: Envelope<MetadataList> = self.endpoint.get(path, query).await?;
        Ok(env.media_container.into_items())
    }

    async fn scrobble(&self, action: &str, rating_key: RatingKey) -> Result<()> {
        let key = rating_key.to_string();
        let path = format!("/:/{action}");
        match self
            .endpoint
            .execute(
                Method::GET,
                &path,
                &[("key", key.as_str()), ("identifier", LIBRARY_IDENTIFIER)],
            )
            .await?
        {
            Lookup::Found(()) => Ok(()),
            Lookup::NotFound => Err(Error::media_not_found(rating_key)),
        }
    }
}

#[async_trait::async_trait]
impl UserLibrary for PlexLibrary {
    async fn on_deck(&self) -> Result<Vec<MediaItem>> {
        self.list("/library/onDeck", &[]).await
    }

    async fn recently_added(&self) -> Result<Vec<MediaItem>> {
        self.list("/library/recentlyAdded", &[]).await
    }

    async fn fetch_item(&self, rating_key: RatingKey) -> Result<Lookup<MediaItem>> {
        let path = format!("/library/metadata/{rating_key}");
        let env: Lookup<Envelope<MetadataList>> =
            self.endpoint.fetch(Method::GET, &path, &[]).await?;

        Ok(match env {
            Lookup::Found(env) => match env.media_container.into_items().into_iter().next() {
                Some(item) => Lookup::Found(item),
                None => Lookup::NotFound,
            },
            Lookup::NotFound => Lookup::NotFound,
        })
    }

    async fn children(&self, rating_key: RatingKey) -> Result<Vec<MediaItem>> {
        let path = format!("/library/metadata/{rating_key}/children");
        self.list(&path, &[("excludeAllLeaves", "1")]).await
    }

    async fn mark_watched(&self, rating_key: RatingKey) -> Result<()> {
        self.scrobble("scrobble", rating_key).await
    }

    async fn mark_unwatched(&self, rating_key: RatingKey) -> Result<()> {
        self.scrobble("unscrobble", rating_key).await
    }

    fn stream_url(&self, item: &MediaItem) -> Result<String> {
        if !item.kind.is_playable() {
            return Err(Error::Validation(format!(
                "'{}' is not a playable item",
                item.title
            )));
        }

        let stream_type = if item.kind.is_audio() { "audio" } else { "video" };
        let base = self
            .endpoint
            .url(&format!("/{stream_type}/:/transcode/universal/start.m3u8"));
        let key = item.key();

        let url = Url::parse_with_params(
            &base,
            &[
                ("path", key.as_str()),
                ("mediaIndex", "0"),
                ("partIndex", "0"),
                ("protocol", "hls"),
                ("offset", "0"),
                ("fastSeek", "1"),
                ("directPlay", "0"),
                ("directStream", "1"),
                ("copyts", "1"),
                ("X-Plex-Token", self.endpoint.token()),
            ],
        )
        .map_err(|e| Error::Internal(format!("invalid stream URL {base}: {e}")))?;

        Ok(url.into())
    }

    async fn search(&self, query: &str) -> Result<Vec<MediaItem>> {
        let env: Envelope<HubList> = self
            .endpoint
            .get("/hubs/search", &[("query", query)])
            .await?;
        Ok(env.media_container.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_client, ClientHeaders};
    use pd_core::MediaKind;
    use std::time::Duration;

    fn library() -> PlexLibrary {
        let headers = ClientHeaders {
            client_identifier: "test".into(),
            product: "Test".into(),
        };
        PlexLibrary::new(Endpoint::new(
            build_client(Duration::from_secs(1)),
            "http://nas:32400",
            "usertok",
            headers,
            "plex",
        ))
    }

    fn key(v: u64) -> RatingKey {
        RatingKey::new(v).unwrap()
    }

    #[test]
    fn video_stream_url() {
        let item = MediaItem::new(key(42), MediaKind::Movie, "Heat");
        let url = Url::parse(&library().stream_url(&item).unwrap()).unwrap();
        assert_eq!(url.path(), "/video/:/transcode/universal/start.m3u8");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("path".into(), "/library/metadata/42".into())));
        assert!(pairs.contains(&("protocol".into(), "hls".into())));
        assert!(pairs.contains(&("X-Plex-Token".into(), "usertok".into())));
    }

    #[test]
    fn audio_stream_url() {
        let item = MediaItem::new(key(7), MediaKind::Track, "Song");
        let url = Url::parse(&library().stream_url(&item).unwrap()).unwrap();
        assert_eq!(url.path(), "/audio/:/transcode/universal/start.m3u8");
    }

    #[test]
    fn containers_are_not_playable() {
        let item = MediaItem::new(key(3), MediaKind::Show, "Bluey");
        let err = library().stream_url(&item).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}

//! Test doubles for the media server boundary.
//!
//! [`FakeServer`] and [`FakeLibrary`] implement the pd-plex traits in memory
//! and record the calls handlers make, so router tests can assert on side
//! effects without a Plex instance. [`fixtures`] builds a small household.

pub mod fixtures;

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use pd_core::{Error, Identity, MediaItem, RatingKey, Result};
use pd_plex::{Lookup, MediaServer, UserLibrary};

// ---------------------------------------------------------------------------
// FakeLibrary
// ---------------------------------------------------------------------------

/// In-memory library shared by every identity of a [`FakeServer`].
#[derive(Default)]
pub struct FakeLibrary {
    items: BTreeMap<RatingKey, MediaItem>,
    children: HashMap<RatingKey, Vec<RatingKey>>,
    on_deck: Vec<RatingKey>,
    recently_added: Vec<RatingKey>,
    watch_marks: Mutex<Vec<(RatingKey, bool)>>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: MediaItem) -> Self {
        self.items.insert(item.rating_key, item);
        self
    }

    /// Register `children` (and the items themselves) under `parent`.
    pub fn with_children(mut self, parent: RatingKey, children: Vec<MediaItem>) -> Self {
        let keys = children.iter().map(|c| c.rating_key).collect();
        for child in children {
            self.items.insert(child.rating_key, child);
        }
        self.children.insert(parent, keys);
        self
    }

    pub fn with_on_deck(mut self, keys: Vec<RatingKey>) -> Self {
        self.on_deck = keys;
        self
    }

    pub fn with_recently_added(mut self, keys: Vec<RatingKey>) -> Self {
        self.recently_added = keys;
        self
    }

    /// Number of `search` calls that reached the library.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_item` calls that reached the library.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Every `mark_watched` (true) / `mark_unwatched` (false) call, in order.
    pub fn watch_marks(&self) -> Vec<(RatingKey, bool)> {
        self.watch_marks.lock().clone()
    }

    fn resolve(&self, keys: &[RatingKey]) -> Vec<MediaItem> {
        keys.iter()
            .filter_map(|k| self.items.get(k).cloned())
            .collect()
    }

    fn mark(&self, rating_key: RatingKey, watched: bool) -> Result<()> {
        if !self.items.contains_key(&rating_key) {
            return Err(Error::media_not_found(rating_key));
        }
        self.watch_marks.lock().push((rating_key, watched));
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserLibrary for FakeLibrary {
    async fn on_deck(&self) -> Result<Vec<MediaItem>> {
        Ok(self.resolve(&self.on_deck))
    }

    async fn recently_added(&self) -> Result<Vec<MediaItem>> {
        Ok(self.resolve(&self.recently_added))
    }

    async fn fetch_item(&self, rating_key: RatingKey) -> Result<Lookup<MediaItem>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.items.get(&rating_key) {
            Some(item) => Lookup::Found(item.clone()),
            None => Lookup::NotFound,
        })
    }

    async fn children(&self, rating_key: RatingKey) -> Result<Vec<MediaItem>> {
        Ok(self
            .children
            .get(&rating_key)
            .map(|keys| self.resolve(keys))
            .unwrap_or_default())
    }

    async fn mark_watched(&self, rating_key: RatingKey) -> Result<()> {
        self.mark(rating_key, true)
    }

    async fn mark_unwatched(&self, rating_key: RatingKey) -> Result<()> {
        self.mark(rating_key, false)
    }

    fn stream_url(&self, item: &MediaItem) -> Result<String> {
        if !item.kind.is_playable() {
            return Err(Error::Validation(format!(
                "'{}' is not a playable item",
                item.title
            )));
        }
        Ok(format!("http://fake-plex/stream/{}.m3u8", item.rating_key))
    }

    async fn search(&self, query: &str) -> Result<Vec<MediaItem>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let needle = query.to_lowercase();
        Ok(self
            .items
            .values()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// FakeServer
// ---------------------------------------------------------------------------

/// In-memory admin connection. Every known identity switches to the same
/// shared [`FakeLibrary`].
pub struct FakeServer {
    name: String,
    account: Identity,
    users: Vec<Identity>,
    library: Arc<FakeLibrary>,
    switch_fails: bool,
    switched_as: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn new(name: &str, account: Identity, library: FakeLibrary) -> Self {
        Self {
            name: name.to_string(),
            account,
            users: Vec::new(),
            library: Arc::new(library),
            switch_fails: false,
            switched_as: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(mut self, user: Identity) -> Self {
        self.users.push(user);
        self
    }

    /// Make every `switch_user` call fail with an upstream error.
    pub fn with_failing_switch(mut self) -> Self {
        self.switch_fails = true;
        self
    }

    pub fn library(&self) -> &Arc<FakeLibrary> {
        &self.library
    }

    /// Usernames passed to `switch_user`, in call order.
    pub fn switched_as(&self) -> Vec<String> {
        self.switched_as.lock().clone()
    }
}

#[async_trait::async_trait]
impl MediaServer for FakeServer {
    fn friendly_name(&self) -> &str {
        &self.name
    }

    async fn account(&self) -> Result<Identity> {
        Ok(self.account.clone())
    }

    async fn users(&self) -> Result<Vec<Identity>> {
        Ok(self.users.clone())
    }

    async fn switch_user(&self, username: &str) -> Result<Lookup<Arc<dyn UserLibrary>>> {
        self.switched_as.lock().push(username.to_string());
        if self.switch_fails {
            return Err(Error::upstream("plex.tv", "503 Service Unavailable"));
        }

        let known = self.account.matches(username) || self.users.iter().any(|u| u.matches(username));
        if !known {
            return Ok(Lookup::NotFound);
        }
        let library: Arc<dyn UserLibrary> = self.library.clone();
        Ok(Lookup::Found(library))
    }
}

//! A small household: one admin, one managed user, a movie, a show with two
//! seasons, and an album.

use pd_core::{Identity, MediaItem, MediaKind, RatingKey};

use crate::{FakeLibrary, FakeServer};

pub const SERVER_NAME: &str = "Living Room";

pub const MOVIE: u64 = 101;
pub const SHOW: u64 = 200;
pub const SEASON_ONE: u64 = 201;
pub const SEASON_TWO: u64 = 202;
pub const EPISODE_ONE: u64 = 211;
pub const EPISODE_TWO: u64 = 212;
pub const EPISODE_THREE: u64 = 221;
pub const ALBUM: u64 = 300;

pub fn key(value: u64) -> RatingKey {
    RatingKey::new(value).expect("fixture keys are non-zero")
}

pub fn admin() -> Identity {
    Identity {
        id: 1,
        uuid: Some("u1".into()),
        title: "House".into(),
        username: Some("house".into()),
        thumb: Some("https://plex.tv/users/u1/avatar".into()),
        admin: true,
        restricted: false,
    }
}

pub fn kids() -> Identity {
    Identity {
        id: 2,
        uuid: Some("u2".into()),
        title: "Kids".into(),
        username: None,
        thumb: Some("https://plex.tv/users/u2/avatar".into()),
        admin: false,
        restricted: true,
    }
}

fn item(value: u64, kind: MediaKind, title: &str) -> MediaItem {
    let mut item = MediaItem::new(key(value), kind, title);
    item.thumb = Some(format!("/library/metadata/{value}/thumb/1"));
    item
}

fn episode(value: u64, season: i32, index: i32, title: &str) -> MediaItem {
    let mut ep = item(value, MediaKind::Episode, title);
    ep.grandparent_title = Some("Bluey".into());
    ep.parent_index = Some(season);
    ep.index = Some(index);
    ep
}

pub fn library() -> FakeLibrary {
    let mut movie = item(MOVIE, MediaKind::Movie, "Heat");
    movie.year = Some(1995);
    movie.art = Some(format!("/library/metadata/{MOVIE}/art/1"));
    movie.summary = Some("A crew of thieves.".into());

    let mut show = item(SHOW, MediaKind::Show, "Bluey");
    show.art = Some(format!("/library/metadata/{SHOW}/art/1"));
    show.leaf_count = Some(3);
    show.viewed_leaf_count = Some(1);

    let mut season_one = item(SEASON_ONE, MediaKind::Season, "Season 1");
    season_one.index = Some(1);
    let mut season_two = item(SEASON_TWO, MediaKind::Season, "Season 2");
    season_two.index = Some(2);

    FakeLibrary::new()
        .with_item(movie)
        .with_item(show)
        .with_item(item(ALBUM, MediaKind::Album, "Blue Album"))
        .with_children(key(SHOW), vec![season_one, season_two])
        .with_children(
            key(SEASON_ONE),
            vec![
                episode(EPISODE_ONE, 1, 1, "Magic Xylophone"),
                episode(EPISODE_TWO, 1, 2, "Hospital"),
            ],
        )
        .with_children(key(SEASON_TWO), vec![episode(EPISODE_THREE, 2, 1, "Dance Mode")])
        .with_on_deck(vec![key(EPISODE_TWO)])
        .with_recently_added(vec![key(MOVIE), key(SHOW)])
}

/// The household server with [`admin`] and [`kids`] as selectable identities.
pub fn household() -> FakeServer {
    FakeServer::new(SERVER_NAME, admin(), library()).with_user(kids())
}

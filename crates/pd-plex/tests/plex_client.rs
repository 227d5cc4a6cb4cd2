//! Integration tests for the Plex HTTP client against mock servers.

use pd_core::config::PlexConfig;
use pd_core::{Error, MediaKind, RatingKey};
use pd_plex::{Lookup, MediaServer, PlexServer, UserLibrary};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADMIN_TOKEN: &str = "admintok";
const MACHINE_ID: &str = "machine-abc";

fn key(v: u64) -> RatingKey {
    RatingKey::new(v).unwrap()
}

fn config(pms: &MockServer, plextv: &MockServer) -> PlexConfig {
    PlexConfig {
        url: pms.uri(),
        token: ADMIN_TOKEN.into(),
        timeout_secs: 2,
        myplex_url: plextv.uri(),
        ..PlexConfig::default()
    }
}

async fn mount_identity(pms: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("X-Plex-Token", ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {
                "friendlyName": "Living Room",
                "machineIdentifier": MACHINE_ID,
                "version": "1.40.0"
            }
        })))
        .mount(pms)
        .await;
}

async fn mount_account(plextv: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .and(header("X-Plex-Token", ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "uuid": "u1", "username": "house", "title": "House",
            "thumb": "https://plex.tv/users/u1/avatar"
        })))
        .mount(plextv)
        .await;
}

async fn mount_users(plextv: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("X-Plex-Token", ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"User": [
                {"id": "2", "title": "Kids", "username": "", "restricted": "1", "home": "1",
                 "protected": "1", "thumb": "https://plex.tv/users/u2/avatar"},
                {"id": "3", "title": "pal", "username": "pal", "restricted": "0", "home": "0"}
            ]}
        })))
        .mount(plextv)
        .await;
}

async fn mount_shared_servers(plextv: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/api/servers/{MACHINE_ID}/shared_servers")))
        .and(header("X-Plex-Token", ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"SharedServer": [
                {"id": "7", "userID": "2", "username": "Kids", "accessToken": "kids-server"},
                {"id": "8", "userID": "3", "username": "pal", "accessToken": "pal-server"}
            ]}
        })))
        .mount(plextv)
        .await;
}

async fn connect() -> (MockServer, MockServer, PlexServer) {
    let pms = MockServer::start().await;
    let plextv = MockServer::start().await;
    mount_identity(&pms).await;
    mount_account(&plextv).await;
    mount_users(&plextv).await;
    mount_shared_servers(&plextv).await;
    let server = PlexServer::connect(&config(&pms, &plextv)).await.unwrap();
    (pms, plextv, server)
}

#[tokio::test]
async fn connect_reads_friendly_name() {
    let (_pms, _plextv, server) = connect().await;
    assert_eq!(server.friendly_name(), "Living Room");
    assert_eq!(server.machine_identifier(), MACHINE_ID);
}

#[tokio::test]
async fn connect_with_bad_token_is_upstream_error() {
    let pms = MockServer::start().await;
    let plextv = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&pms)
        .await;

    let err = PlexServer::connect(&config(&pms, &plextv)).await.unwrap_err();
    assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn connect_to_closed_port_fails() {
    let cfg = PlexConfig {
        url: "http://127.0.0.1:9".into(),
        token: ADMIN_TOKEN.into(),
        timeout_secs: 1,
        ..PlexConfig::default()
    };
    assert!(PlexServer::connect(&cfg).await.is_err());
}

#[tokio::test]
async fn account_and_users_include_friends_outside_home() {
    let (_pms, _plextv, server) = connect().await;

    let account = server.account().await.unwrap();
    assert!(account.admin);
    assert_eq!(account.login_name(), "house");

    let users = server.users().await.unwrap();
    let names: Vec<&str> = users.iter().map(|u| u.login_name()).collect();
    assert_eq!(names, ["Kids", "pal"]);
    assert!(users.iter().all(|u| !u.admin));
    assert!(users[0].restricted);
    assert_eq!(
        users[0].thumb.as_deref(),
        Some("https://plex.tv/users/u2/avatar")
    );
}

#[tokio::test]
async fn switch_to_admin_reuses_admin_token() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/library/onDeck"))
        .and(header("X-Plex-Token", ADMIN_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Metadata": [
                {"ratingKey": "10", "type": "episode", "title": "Pilot", "thumb": "/t/10"}
            ]}
        })))
        .mount(&pms)
        .await;

    let library = server.switch_user("House").await.unwrap().found().unwrap();
    let deck = library.on_deck().await.unwrap();
    assert_eq!(deck.len(), 1);
    assert_eq!(deck[0].kind, MediaKind::Episode);
}

#[tokio::test]
async fn switch_to_protected_home_user_uses_shared_token_without_pin() {
    let (pms, plextv, server) = connect().await;

    Mock::given(method("POST"))
        .and(path("/api/home/users/u2/switch"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&plextv)
        .await;
    Mock::given(method("GET"))
        .and(path("/library/recentlyAdded"))
        .and(header("X-Plex-Token", "kids-server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Metadata": [
                {"ratingKey": "20", "type": "movie", "title": "Up"},
                {"ratingKey": "21", "type": "movie", "title": "Cars"}
            ]}
        })))
        .mount(&pms)
        .await;

    let library = server.switch_user("kids").await.unwrap().found().unwrap();
    let recent = library.recently_added().await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Up", "Cars"]);
}

#[tokio::test]
async fn switch_to_friend_outside_home() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/library/onDeck"))
        .and(header("X-Plex-Token", "pal-server"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Metadata": []}
        })))
        .expect(1)
        .mount(&pms)
        .await;

    let library = server.switch_user("Pal").await.unwrap().found().unwrap();
    assert!(library.on_deck().await.unwrap().is_empty());
}

#[tokio::test]
async fn switch_to_user_without_share_is_not_found() {
    let pms = MockServer::start().await;
    let plextv = MockServer::start().await;
    mount_identity(&pms).await;
    mount_account(&plextv).await;
    mount_users(&plextv).await;
    Mock::given(method("GET"))
        .and(path(format!("/api/servers/{MACHINE_ID}/shared_servers")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"SharedServer": [
                {"id": "8", "userID": "3", "accessToken": "pal-server"}
            ]}
        })))
        .mount(&plextv)
        .await;
    let server = PlexServer::connect(&config(&pms, &plextv)).await.unwrap();

    assert!(!server.switch_user("kids").await.unwrap().is_found());
    assert!(server.switch_user("pal").await.unwrap().is_found());
}

#[tokio::test]
async fn admin_account_is_fetched_once() {
    let pms = MockServer::start().await;
    let plextv = MockServer::start().await;
    mount_identity(&pms).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1, "uuid": "u1", "username": "house", "title": "House"
        })))
        .expect(1)
        .mount(&plextv)
        .await;
    mount_users(&plextv).await;
    mount_shared_servers(&plextv).await;
    let server = PlexServer::connect(&config(&pms, &plextv)).await.unwrap();

    assert!(server.switch_user("house").await.unwrap().is_found());
    assert!(server.switch_user("kids").await.unwrap().is_found());
    assert_eq!(server.users().await.unwrap().len(), 2);
    assert_eq!(server.account().await.unwrap().id, 1);
}

#[tokio::test]
async fn switch_to_unknown_user_is_not_found() {
    let (_pms, _plextv, server) = connect().await;
    let result = server.switch_user("ghost").await.unwrap();
    assert!(!result.is_found());
}

#[tokio::test]
async fn fetch_item_found_and_missing() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/library/metadata/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Metadata": [
                {"ratingKey": "42", "type": "show", "title": "Bluey",
                 "thumb": "/library/metadata/42/thumb/1", "art": "/library/metadata/42/art/1",
                 "leafCount": 3, "viewedLeafCount": 1}
            ]}
        })))
        .mount(&pms)
        .await;
    Mock::given(method("GET"))
        .and(path("/library/metadata/99999999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&pms)
        .await;

    let library = server.switch_user("house").await.unwrap().found().unwrap();

    match library.fetch_item(key(42)).await.unwrap() {
        Lookup::Found(item) => {
            assert_eq!(item.kind, MediaKind::Show);
            assert_eq!(item.art.as_deref(), Some("/library/metadata/42/art/1"));
            assert!(!item.is_watched());
        }
        Lookup::NotFound => panic!("item 42 should exist"),
    }

    assert_eq!(
        library.fetch_item(key(99999999)).await.unwrap(),
        Lookup::NotFound
    );
}

#[tokio::test]
async fn children_exclude_all_leaves() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/library/metadata/42/children"))
        .and(query_param("excludeAllLeaves", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Metadata": [
                {"ratingKey": "43", "type": "season", "title": "Season 1", "index": 1}
            ]}
        })))
        .mount(&pms)
        .await;

    let library = server.switch_user("house").await.unwrap().found().unwrap();
    let seasons = library.children(key(42)).await.unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].index, Some(1));
}

#[tokio::test]
async fn mark_watched_and_unwatched_scrobble() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/:/scrobble"))
        .and(query_param("key", "42"))
        .and(query_param("identifier", "com.plexapp.plugins.library"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&pms)
        .await;
    Mock::given(method("GET"))
        .and(path("/:/unscrobble"))
        .and(query_param("key", "42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&pms)
        .await;

    let library = server.switch_user("house").await.unwrap().found().unwrap();
    library.mark_watched(key(42)).await.unwrap();
    library.mark_unwatched(key(42)).await.unwrap();
}

#[tokio::test]
async fn search_flattens_hubs() {
    let (pms, _plextv, server) = connect().await;
    Mock::given(method("GET"))
        .and(path("/hubs/search"))
        .and(query_param("query", "blu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MediaContainer": {"Hub": [
                {"type": "show", "Metadata": [{"ratingKey": "42", "type": "show", "title": "Bluey"}]},
                {"type": "episode", "Metadata": [{"ratingKey": "44", "type": "episode", "title": "Blue Mountains"}]}
            ]}
        })))
        .mount(&pms)
        .await;

    let library = server.switch_user("house").await.unwrap().found().unwrap();
    let results = library.search("blu").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].rating_key, key(44));
}

#[tokio::test]
async fn stream_url_uses_scoped_token() {
    let (pms, _plextv, server) = connect().await;
    let library = server.switch_user("house").await.unwrap().found().unwrap();

    let item = pd_core::MediaItem::new(key(42), MediaKind::Movie, "Heat");
    let url = library.stream_url(&item).unwrap();
    assert!(url.starts_with(&pms.uri()));
    assert!(url.contains("/video/:/transcode/universal/start.m3u8"));
    assert!(url.contains(&format!("X-Plex-Token={ADMIN_TOKEN}")));
}

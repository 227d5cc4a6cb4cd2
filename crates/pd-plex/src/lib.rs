//! pd-plex: client for the Plex Media Server and plex.tv account APIs.
//!
//! Route handlers only see the [`MediaServer`] and [`UserLibrary`] traits;
//! [`PlexServer`] implements them over the JSON HTTP API. Asset paths
//! returned by the server are turned into fetchable URLs with [`UrlSigner`].

pub mod api;
mod http;
pub mod library;
pub mod myplex;
pub mod server;
pub mod signer;
pub mod wire;

pub use api::{Lookup, MediaServer, UserLibrary};
pub use library::PlexLibrary;
pub use myplex::MyPlexClient;
pub use server::PlexServer;
pub use signer::UrlSigner;

//! # Spotify Integration Module
//!
//! This module provides the typed interface to the subset of the Spotify Web
//! API that playlist resolution consumes. It sits between the entry-expansion
//! logic and the throttled HTTP gateway, turning raw JSON values into the
//! structures in [`crate::types`].
//!
//! ## Overview
//!
//! Every function here follows the same pattern: build the endpoint URL from
//! the configured API base, issue it through a [`crate::gateway::Remote`]
//! implementation (the live gateway in production, a canned mock in tests),
//! and deserialize the JSON body into its response type. All throttling,
//! retry, and error-envelope handling lives in the gateway; this layer only
//! knows URLs and shapes.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! covers one API domain:
//!
//! ```text
//! Entry expansion (playlist layer)
//!          ↓
//! Spotify Integration Layer
//!     ├── Search (tracks, albums, artists)
//!     ├── Track Lookup (full track by id)
//!     ├── Album Lookup (album with track listing)
//!     └── Artist Discography (albums of an artist)
//!          ↓
//! Gateway (pacing, retries, error taxonomy)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /search?type=track&q=…` - first-hit track search
//! - `GET /search?type=album&q=…` - first-hit album search
//! - `GET /search?type=artist&q=…` - first-hit artist search
//! - `GET /tracks/{id}` - full track object including popularity
//! - `GET /albums/{id}` - album object with track listing
//! - `GET /artists/{id}/albums` - artist discography
//!
//! Only the fields the pipeline depends on are deserialized; everything else
//! in the responses is ignored.
//!
//! ## Not-found semantics
//!
//! A search returning zero items is not an error at this layer: the search
//! functions return `Ok(None)` and leave the soft-failure diagnostics to the
//! caller. Direct id lookups propagate gateway errors unchanged.
//!
//! ## Authentication
//!
//! Requests carry the pre-acquired bearer token attached by the gateway.
//! Acquiring that token (OAuth flows, refresh handling) is outside this
//! tool; see `.env.example`.

pub mod albums;
pub mod artists;
pub mod search;
pub mod tracks;

//! # Playlist Module
//!
//! This module implements the resolution and assembly pipeline that turns a
//! parsed playlist program into the final track sequence. It owns the three
//! layers the pipeline is built from: the heterogeneous [`Queue`] container
//! with its sequential resolver, the [`Entry`] variants that know how to
//! expand themselves into tracks, and the [`Playlist`] controller that runs
//! the whole assembly from expansion to rendering.
//!
//! ## Overview
//!
//! A playlist program yields a queue of entries (free-text track queries,
//! album expansions, artist expansions). Resolution walks that queue in
//! order, one remote lookup at a time, replacing each entry with the queue
//! of tracks it expands to. The controller then flattens the nested result
//! and applies the post-processing stages the program's directives selected.
//!
//! ## Architecture
//!
//! ```text
//! Parser output (Queue of entries)
//!     ↓
//! Playlist Controller
//!     ├── expand   (sequential resolver, one request in flight)
//!     ├── dedup    (stable, first occurrence wins)
//!     ├── order    (popularity / Last.fm play count, stable sort)
//!     ├── group    (stable partition by entry / artist / album)
//!     └── render   (newline-joined track URIs)
//!     ↓
//! Track URI list
//! ```
//!
//! ## Core Types
//!
//! ### Queue
//!
//! [`Queue`] - An ordered container of [`Node`]s (entry, track, or nested
//! queue) with the pipeline primitives: stable dedup, stable grouping,
//! stable sorting, recursive flattening, and the sequential `dispatch`
//! resolver that drives entry expansion one item at a time.
//!
//! ### Entries
//!
//! [`Entry`] - The three entry variants behind one expansion contract:
//! - **Track**: resolves a free-text query, URI, or track link to a track
//! - **Album**: resolves a query to an album and emits its track listing
//! - **Artist**: resolves a query to an artist and recursively expands the
//!   artist's whole discography
//!
//! ### Controller
//!
//! [`Playlist`] - Top-level state (entries, ordering, grouping, uniqueness)
//! and the pipeline driver; also renders the final URI list.
//!
//! ## Ordering Guarantees
//!
//! Expansion visits entries in parsed order; child tracks keep the order the
//! remote listed them in; every sort is stable; grouping preserves
//! intra-group order. Given fixed remote responses the output is therefore
//! fully deterministic.
//!
//! ## Failure Semantics
//!
//! Remote failures during expansion are confined to the entry that hit
//! them: the resolver logs a diagnostic and moves on, and the failed entry
//! contributes nothing to the output. The controller never raises; an input
//! whose every entry fails renders as the empty string.

mod controller;
mod entry;
mod queue;

pub use controller::{GroupBy, OrderBy, Playlist};
pub use entry::{Album, Artist, Entry, Track};
pub use queue::{Node, Queue};

//! # CLI Module
//!
//! This module provides the command-line interface layer for Spogencli, a
//! batch playlist generator that compiles a small declarative playlist
//! program into a list of Spotify track URIs. It implements the user-facing
//! commands and coordinates between the parser, the resolution pipeline, and
//! the output sinks.
//!
//! ## Overview
//!
//! The CLI is deliberately thin: all resolution logic lives in
//! [`crate::playlist`], and this layer only handles how the program text
//! gets in and how the URI list gets out.
//!
//! - **Program input**: a file argument, `-` for STDIN, or `--program` with
//!   inline text (where literal `\n` sequences are translated to newlines
//!   before parsing)
//! - **Output sink**: STDOUT by default, or a file via `--output`
//! - **Preview**: an optional table of the resolved tracks on the status
//!   channel before the URI list is rendered
//!
//! ## Command Categories
//!
//! ### Generation
//!
//! - [`generate`] - Parses the program, runs the resolution pipeline, and
//!   writes the URI list
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (input/output handling)
//!     ↓
//! Parser (program text → playlist + directives)
//!     ↓
//! Playlist Pipeline (expand → dedup → order → group)
//!     ↓
//! Gateway (throttled remote lookups)
//! ```
//!
//! ## Output Discipline
//!
//! The rendered URI list is the only thing written to STDOUT (or the output
//! file). All diagnostics - progress, warnings, the preview table - go to
//! STDERR, so piping the output into another tool stays clean.
//!
//! ## Cancellation
//!
//! Ctrl-C flips the gateway's cancellation flag: the in-flight request is
//! allowed to finish, no further requests are dispatched, and no output is
//! committed for the interrupted run.
//!
//! ## Error Handling Philosophy
//!
//! Per-entry resolution failures are soft: they are reported as warnings and
//! the run continues with whatever resolved. Only environment problems
//! (unreadable program file, unwritable output) terminate the command.

mod generate;

pub use generate::generate;

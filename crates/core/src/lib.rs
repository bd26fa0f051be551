//! Vitrine Core - Shared types library.
//!
//! This crate provides common types used across all Vitrine components:
//! - `server` - HTTP + websocket backend serving the virtual showroom
//! - `client` - Client-side shopping state container and socket channel
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no async runtime.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entity types, wire envelopes, and the socket event protocol

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

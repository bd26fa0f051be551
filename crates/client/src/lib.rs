//! Vitrine Client - Shopping state container and socket channel.
//!
//! This crate holds the client side of the showroom: the authoritative
//! in-memory shopping state ([`store::StoreState`]), best-effort local
//! persistence ([`persist`]), and the fire-and-forget socket channel to the
//! server ([`channel::SocketChannel`]).
//!
//! # Architecture
//!
//! State mutations are synchronous and total - no operation here can fail.
//! Derived totals are recomputed from the product list on every read rather
//! than kept as running sums. Everything network-facing lives in [`channel`]
//! and is deliberately lossy: a disconnected channel drops events instead of
//! queueing them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod channel;
pub mod persist;
pub mod store;

pub use channel::SocketChannel;
pub use persist::{LocalStorage, PersistedState, STORAGE_KEY};
pub use store::StoreState;

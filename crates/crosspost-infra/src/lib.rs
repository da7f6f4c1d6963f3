//! # Crosspost Infrastructure
//!
//! Concrete implementations of the ports defined in `crosspost-core`.
//! This crate contains local persistence backends, notification fan-out,
//! and caption-generation clients.
//!
//! ## Feature Flags
//!
//! - `http-captions` (default) - HTTP caption backend via reqwest

pub mod captions;
pub mod notify;
pub mod storage;

pub use captions::SimulatedCaptionService;
pub use notify::ChannelNotifier;
pub use storage::{FileStore, InMemoryStore};

#[cfg(feature = "http-captions")]
pub use captions::HttpCaptionService;

//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod captions;
mod kv;
mod notifier;

pub use captions::{CaptionError, CaptionService};
pub use kv::KeyValueStore;
pub use notifier::Notifier;

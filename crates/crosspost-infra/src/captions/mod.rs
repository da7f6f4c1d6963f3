//! Caption generation backends.

mod simulated;

#[cfg(feature = "http-captions")]
mod http;

pub use simulated::SimulatedCaptionService;

#[cfg(feature = "http-captions")]
pub use http::HttpCaptionService;

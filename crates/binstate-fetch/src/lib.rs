//! Blocking HTTP access for release metadata and asset downloads.
//!
//! # Architecture
//!
//! - [`HttpClient`] - the two operations the installer needs, as a trait seam
//! - [`ClientOptions`] - timeouts, user agent and default headers
//! - [`ReqwestClient`] - production implementation over `reqwest`
//! - `mock` - scripted in-memory client for tests (feature `mock`)

mod error;
mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod options;
#[cfg(feature = "reqwest")]
mod reqwest_client;

pub use error::{Error, Result};
pub use http::{HttpClient, Header};
pub use options::{ClientOptions, Timeouts};

#[cfg(feature = "reqwest")]
pub use reqwest_client::ReqwestClient;

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod client;
mod error;
mod http_client;
mod space;

pub use client::SpaceClient;
pub use error::{ClientError, Result};
pub use space::resolve_base_url;

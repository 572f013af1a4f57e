//! HTTP front end for `dirshare-core`.
//!
//! Serves an HTML directory browser under `/files/`, single-file downloads,
//! on-demand folder archives under `/download_folder/`, and multipart
//! uploads into any browsable directory.
//!
//! # Examples
//!
//! ```no_run
//! use dirshare_server::ServeConfig;
//! use dirshare_server::serve;
//!
//! # async fn run() -> anyhow::Result<()> {
//! serve(ServeConfig::new("/srv/share").with_port(8080)).await
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod serve;
pub mod state;

pub use config::ServeConfig;
pub use error::ApiError;
pub use routes::router;
pub use serve::serve;
pub use state::AppState;
pub use state::StartTime;

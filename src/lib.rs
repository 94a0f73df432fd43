//! Openwhyd Web API Client Library
//!
//! This library lets an application consume the Openwhyd social-music
//! platform's session-cookie web API as a typed, stable service. It covers
//! authentication (password and Facebook federated login), keyword search,
//! track/playlist/user reads, and the authenticated mutations (posting
//! tracks, managing playlists, following accounts), normalizing the
//! upstream's heterogeneous JSON shapes into one fixed record type per
//! resource kind.
//!
//! # Modules
//!
//! - `config` - Immutable configuration (base URL, headers, transport timeout)
//! - `convert` - Pure normalization of upstream JSON into domain records
//! - `error` - Failure taxonomy surfaced at the operation boundary
//! - `openwhyd` - The operation facade, one method per upstream capability
//! - `request` - Outgoing request construction with the fixed header set
//! - `session` - Session credential storage behind a get/set contract
//! - `types` - Domain records and upstream wire shapes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use openwhyd_client::{ApiConfig, FsSessionStore, OpenwhydClient};
//!
//! #[tokio::main]
//! async fn main() -> openwhyd_client::Result<()> {
//!     let client = OpenwhydClient::new(ApiConfig::default(), Arc::new(FsSessionStore::new()))?;
//!     let results = client.search("jazz", 10).await?;
//!     println!("{} results", results.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod openwhyd;
pub mod request;
pub mod session;
pub mod types;

pub use config::ApiConfig;
pub use error::{OpenwhydError, Result};
pub use openwhyd::OpenwhydClient;
pub use session::{FsSessionStore, MemorySessionStore, SessionStore};

//! Typed asynchronous client for the Clash Royale HTTP API: cards,
//! locations, leaderboards, player and clan profiles, clan wars,
//! tournaments, and token verification.
//!
//! Every operation funnels through one request pipeline: endpoint
//! resolution from a closed catalog, tag normalization, bearer-token
//! transport with a fixed timeout, and uniform error classification. The
//! client never retries; each call completes independently with a typed
//! result or exactly one [`Error`] kind.
//!
//! ```no_run
//! use cr_api::{CrApi, LocationId, PageRequest};
//!
//! # async fn run() -> Result<(), cr_api::Error> {
//! let api = CrApi::new("https://api.clashroyale.com/v1", "<token>")?;
//!
//! let germany = api.location_by_id(57000094).await?;
//! let top_players = api
//!     .player_leaderboard(LocationId::Global, PageRequest::with_limit(10))
//!     .await?;
//! let profile = api.player_profile("#2PPP").await?;
//! # Ok(())
//! # }
//! ```

pub mod api_models;
mod client;
mod config;
mod endpoints;
mod error;
pub mod tag;
mod transport;

pub use client::{ClanSearchOptions, CrApi, PageRequest};
pub use config::{ApiOptions, ClientConfig, DEFAULT_TIMEOUT_MS, apply_defaults};
pub use endpoints::LocationId;
pub use error::Error;

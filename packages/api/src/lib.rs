//! # API crate: configuration and backend calls for the SkyPlan web client
//!
//! Everything the browser client needs to talk to the SkyPlan backend lives
//! here. The crate has no UI dependency, so the flows built on top of it can be
//! tested natively.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`config`] | | Environment detection, per-environment base URLs (TOML settings), endpoint map |
//! | [`http`] | | [`HttpClient`] trait and the reqwest-backed [`ReqwestClient`] |
//! | [`auth`] | | `login` call and local email shape check |
//! | [`payment`] | | `create_vnpay_payment` call, transaction references, amount parsing |
//! | [`models`] | | Wire bodies (`Credentials`, `PaymentIntentRequest`, ...) |
//! | [`routes`] | | Page paths, protected routes, post-login redirect targets |
//! | [`clock`] | | Millisecond wall clock for WASM and native |
//! | [`testing`] | `testing` | Scripted [`HttpClient`] for tests |
//!
//! Both backend calls return [`ApiResult`], so callers handle every failure
//! (transport, status, undecodable body, server refusal) in one place.

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod payment;
pub mod routes;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ClientConfig, ClientSettings, DebugInfo, EndpointMap, Environment};
pub use error::{ApiError, ApiResult};
pub use http::{HttpClient, HttpReply, ReqwestClient};
pub use models::{Credentials, LoginSuccess, PaymentIntentRequest};

//! Asynchronous propagation of environment-variable updates to session
//! services over an IPC message bus.
//!
//! A desktop session has several independent services that cache the launch
//! environment: per-variable legacy launchers, the bus activation
//! environment, and the user service manager. When the environment changes
//! (a new `DISPLAY`, an updated `XDG_RUNTIME_DIR`), each of them has to be
//! told, each in its own payload shape, over asynchronous message passing.
//!
//! [`UpdateEnvironmentJob`] does the fan-out: it snapshots the variables,
//! validates names against the strictest peer's rules, builds one request
//! per peer (per-variable pairs, a batch map, and a sanitized `NAME=VALUE`
//! list), dispatches them all concurrently through a caller-supplied
//! [`BusTransport`], and resolves exactly once when every peer has
//! acknowledged or failed its update. Failures count as completions; there
//! are no retries and no per-peer results.
//!
//! # Examples
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use envsync::{
//!     BusTransport, EnvironmentSnapshot, OutboundRequest, Result, UpdateEnvironmentJob,
//! };
//!
//! /// Bind this to your session bus connection.
//! struct SessionBus;
//!
//! #[async_trait]
//! impl BusTransport for SessionBus {
//!     async fn call(&self, request: OutboundRequest) -> Result<()> {
//!         // marshal request.payload and invoke request.peer here
//!         # let _ = request;
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() {
//! let mut snapshot = EnvironmentSnapshot::new();
//! snapshot.insert("DISPLAY", ":0");
//! snapshot.insert("XDG_RUNTIME_DIR", "/run/user/1000");
//!
//! // Resolves once every peer has completed, success or failure alike.
//! UpdateEnvironmentJob::new(SessionBus, snapshot).run().await;
//! # }
//! ```
//!
//! Jobs can also be detached with [`UpdateEnvironmentJob::spawn`], which
//! hands back a [`JobHandle`] whose `finished()` future is the terminal
//! notification.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
pub mod error;
mod job;
pub mod transport;
pub mod types;
mod validate;

pub use error::{Error, Result, TransportError};
pub use job::{JobHandle, UpdateEnvironmentJob};
pub use transport::BusTransport;
pub use types::{EnvironmentSnapshot, OutboundRequest, Payload, PeerAddress, PeerSet};
pub use validate::{is_sanitized_value, is_valid_name};

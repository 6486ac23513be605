//! The bus transport seam.
//!
//! The crate does not open or manage bus connections itself; callers supply
//! an implementation of [`BusTransport`] bound to whatever IPC mechanism they
//! use. Each call's future is the completion handle: the job treats the
//! future resolving — `Ok` or `Err` — as the completion signal and never
//! retries.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::OutboundRequest;

/// Asynchronous message-bus transport.
///
/// Implementations deliver one [`OutboundRequest`] to the peer it addresses
/// and resolve when the peer has acknowledged or the call has failed.
/// Implementations must not block before their first await point: the job
/// dispatches every request before polling any of them, and a transport that
/// does blocking work eagerly would serialize the fan-out.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use envsync::{BusTransport, OutboundRequest, Result};
///
/// /// A transport that drops every request on the floor.
/// struct NullTransport;
///
/// #[async_trait]
/// impl BusTransport for NullTransport {
///     async fn call(&self, request: OutboundRequest) -> Result<()> {
///         let _ = request;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait BusTransport: Send + Sync {
    /// Deliver one request to its peer and resolve on completion.
    async fn call(&self, request: OutboundRequest) -> Result<()>;
}

#[async_trait]
impl<T: BusTransport + ?Sized> BusTransport for std::sync::Arc<T> {
    async fn call(&self, request: OutboundRequest) -> Result<()> {
        (**self).call(request).await
    }
}

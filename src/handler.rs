//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! [`wrap`](crate::wrap) accepts any
//! `async fn(Request) -> impl HandlerOutput`. Each such function has its own
//! anonymous future type and its own reply type, so the service stores it
//! behind a trait object (`dyn ErasedHandler`) and calls it through one
//! uniform signature.
//!
//! ```text
//! async fn get_user(req: Request) -> ApiError { … }   ← user writes this
//!        ↓ wrap(get_user)
//! get_user.into_boxed_handler()                        ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get_user))                        ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time                   ← one vtable dispatch
//!        ↓
//! Box::pin(async { get_user(req).await.dispatch(&mut writer) })
//! ```
//!
//! The reply is serialized inside the erased future, right after the
//! handler's own future resolves. The concrete reply type never has to
//! cross the trait-object boundary.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;

use crate::dispatch::{HandlerOutput, ResponseWriter};
use crate::error::Error;
use crate::request::Request;

// ── Internal types ────────────────────────────────────────────────────────────

/// What one handler invocation produces: the assembled response, or the
/// pipeline failure that prevented writing one.
pub(crate) type Outcome = Result<http::Response<Full<Bytes>>, Error>;

/// A heap-allocated, type-erased future that resolves to an [`Outcome`].
pub(crate) type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture<Outcome>;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl HandlerOutput
/// ```
///
/// where the output is a [`Reply`](crate::Reply) such as
/// [`Response`](crate::Response) or [`ApiError`](crate::ApiError), or a
/// `Result` of two replies.
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and implements [`ErasedHandler`] for it.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: HandlerOutput,
{
    fn call(&self, req: Request) -> BoxFuture<Outcome> {
        let fut = (self.0)(req);
        Box::pin(async move {
            let reply = fut.await;
            let mut writer = ResponseWriter::new();
            reply.dispatch(&mut writer)?;
            Ok(writer.into_response())
        })
    }
}

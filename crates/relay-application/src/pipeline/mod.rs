//! Interceptor pipeline
//!
//! Onion-style composition: each interceptor receives the context and a
//! [`Next`] continuation for the layers beneath it. Code before
//! `next.run(ctx).await` runs on the way in, code after it on the way out.
//!
//! ```ignore
//! let timing = interceptor_fn::<CallContext, _>(|ctx, next| {
//!     Box::pin(async move {
//!         let started = Instant::now();
//!         let result = next.run(ctx).await;
//!         tracing::debug!(elapsed_ms = started.elapsed().as_millis(), "call finished");
//!         result
//!     })
//! });
//! ```

/// Composition and dispatch
pub mod compose;

pub use compose::{Interceptor, InterceptorFn, Next, Pipeline, compose, interceptor_fn};

//! Interceptor composition and the re-entry guarded continuation

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicIsize, Ordering};

use async_trait::async_trait;
use futures::future::BoxFuture;
use relay_domain::error::{Error, Result};

/// One layer of the pipeline
///
/// An interceptor that returns without calling `next.run` short-circuits:
/// no deeper layer runs. Errors from deeper layers surface as the result of
/// `next.run`, so outer layers can observe them.
#[async_trait]
pub trait Interceptor<C: Send + 'static>: Send + Sync {
    /// Handle the context, optionally delegating to deeper layers
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<()>;
}

/// Continuation bound to the next layer of one pipeline run
pub struct Next<'a, C: Send + 'static> {
    chain: &'a Chain<'a, C>,
    index: usize,
}

impl<C: Send + 'static> Next<'_, C> {
    /// Run the remaining layers
    ///
    /// # Errors
    ///
    /// [`Error::ReentrantContinuation`] when called more than once.
    pub async fn run(&self, ctx: &mut C) -> Result<()> {
        self.chain.dispatch(self.index, ctx).await
    }
}

impl<C: Send + 'static> fmt::Debug for Next<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("index", &self.index).finish()
    }
}

// Per-run dispatch state. The cursor records the deepest layer entered so a
// second call to the same continuation is rejected.
struct Chain<'a, C: Send + 'static> {
    interceptors: &'a [Arc<dyn Interceptor<C>>],
    cursor: AtomicIsize,
}

impl<'a, C: Send + 'static> Chain<'a, C> {
    #[allow(clippy::cast_possible_wrap)]
    fn dispatch<'b>(&'b self, index: usize, ctx: &'b mut C) -> BoxFuture<'b, Result<()>> {
        Box::pin(async move {
            let entered = self.cursor.fetch_max(index as isize, Ordering::SeqCst);
            if entered >= index as isize {
                return Err(Error::ReentrantContinuation);
            }
            match self.interceptors.get(index) {
                Some(interceptor) => {
                    let next = Next {
                        chain: self,
                        index: index + 1,
                    };
                    interceptor.handle(ctx, next).await
                }
                None => Ok(()),
            }
        })
    }
}

/// Composed interceptor stack
///
/// Composition happens once; every [`Pipeline::run`] gets its own dispatch
/// state, so one pipeline can run concurrently over independent contexts.
pub struct Pipeline<C: Send + 'static> {
    interceptors: Arc<[Arc<dyn Interceptor<C>>]>,
}

impl<C: Send + 'static> Pipeline<C> {
    /// Run every layer over `ctx`
    pub async fn run(&self, ctx: &mut C) -> Result<()> {
        let chain = Chain {
            interceptors: &self.interceptors,
            cursor: AtomicIsize::new(-1),
        };
        chain.dispatch(0, ctx).await
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the pipeline has no layers
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl<C: Send + 'static> Clone for Pipeline<C> {
    fn clone(&self) -> Self {
        Self {
            interceptors: Arc::clone(&self.interceptors),
        }
    }
}

impl<C: Send + 'static> fmt::Debug for Pipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("layers", &self.interceptors.len())
            .finish()
    }
}

/// Compose interceptors, outermost first
pub fn compose<C: Send + 'static>(interceptors: Vec<Arc<dyn Interceptor<C>>>) -> Pipeline<C> {
    Pipeline {
        interceptors: interceptors.into(),
    }
}

/// Interceptor backed by a closure
pub struct InterceptorFn<F>(F);

#[async_trait]
impl<C, F> Interceptor<C> for InterceptorFn<F>
where
    C: Send + 'static,
    F: for<'a> Fn(&'a mut C, Next<'a, C>) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn handle(&self, ctx: &mut C, next: Next<'_, C>) -> Result<()> {
        (self.0)(ctx, next).await
    }
}

/// Lift a closure into an interceptor
pub fn interceptor_fn<C, F>(f: F) -> Arc<dyn Interceptor<C>>
where
    C: Send + 'static,
    F: for<'a> Fn(&'a mut C, Next<'a, C>) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
{
    Arc::new(InterceptorFn(f))
}

//! Route chain resolution

use std::fmt;
use std::sync::Arc;

use relay_domain::error::{Error, Result};
use tracing::debug;

use super::auto_loader::AutoLoader;
use super::matcher::RouteCondition;
use crate::context::CallContext;
use crate::ports::Provider;

/// Custom route function; `None` skips to the next entry
pub type RouteResolver = Arc<dyn Fn(&CallContext) -> Option<Arc<dyn Provider>> + Send + Sync>;

/// One rule in the route chain
#[derive(Clone)]
pub enum RouteEntry {
    /// Bind `provider` when `condition` matches
    Condition {
        /// Which identifier part to match, and how
        condition: RouteCondition,
        /// Provider bound on match
        provider: Arc<dyn Provider>,
    },
    /// Ask a function for the provider
    Resolver(RouteResolver),
    /// Look the provider up through the auto-discovery cache
    Auto,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition {
                condition,
                provider,
            } => f
                .debug_struct("Condition")
                .field("condition", condition)
                .field("provider", &provider.name())
                .finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
            Self::Auto => f.write_str("Auto"),
        }
    }
}

/// Bind a provider and handler onto the context
///
/// Entries are tried in order. A matching condition or a resolver that
/// returns a provider commits: if that provider has no handler for the
/// capability the call fails with [`Error::UnsupportedCapability`] instead of
/// trying later entries. An auto-discovered provider without a handler is
/// skipped.
///
/// # Errors
///
/// [`Error::NoProviderFound`] when the chain is exhausted.
pub async fn resolve_route(
    ctx: &mut CallContext,
    entries: &[RouteEntry],
    auto_loader: &AutoLoader,
) -> Result<()> {
    for entry in entries {
        match entry {
            RouteEntry::Condition {
                condition,
                provider,
            } => {
                if !condition.matches(&ctx.target) {
                    continue;
                }
                return bind(ctx, Arc::clone(provider));
            }
            RouteEntry::Resolver(resolve) => {
                let Some(provider) = resolve(ctx) else {
                    continue;
                };
                return bind(ctx, provider);
            }
            RouteEntry::Auto => {
                let Some(key) = AutoLoader::discovery_key(&ctx.target.norm_provider) else {
                    continue;
                };
                let Some(provider) = auto_loader.discover(&key).await else {
                    continue;
                };
                if provider.handler(ctx).is_none() {
                    debug!(
                        provider = provider.name(),
                        capability = %ctx.capability,
                        "Discovered provider has no handler; skipping"
                    );
                    continue;
                }
                return bind(ctx, provider);
            }
        }
    }

    Err(Error::no_provider_found(&ctx.target.id))
}

fn bind(ctx: &mut CallContext, provider: Arc<dyn Provider>) -> Result<()> {
    let handler = provider
        .handler(ctx)
        .ok_or_else(|| Error::unsupported_capability(provider.name(), ctx.capability.as_str()))?;
    debug!(
        identifier = %ctx.target,
        provider = provider.name(),
        "Route resolved"
    );
    ctx.provider = Some(provider);
    ctx.handler = Some(handler);
    Ok(())
}

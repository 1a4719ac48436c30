//! Dispatcher construction from process configuration

use std::sync::Arc;

use relay_application::{Dispatcher, DispatcherBuilder};
use relay_domain::error::Result;
use relay_domain::value_objects::Capability;
use tracing::debug;

use crate::config::RelayConfig;
use crate::http::ReqwestTransport;

/// Builder over the reqwest transport with the configured engine layers
///
/// The `defaults` section becomes the global layer and each
/// `capabilities.<name>` section the layer of that capability. No routes are
/// registered, so callers add their own before building.
pub fn dispatcher_builder(config: &RelayConfig) -> Result<DispatcherBuilder> {
    let transport = Arc::new(ReqwestTransport::new(&config.http)?);
    let mut builder = DispatcherBuilder::new(transport).configure(config.defaults.clone());
    for (name, layer) in &config.capabilities {
        debug!(capability = %name, "Registering capability configuration");
        builder = builder.configure_for(Capability::new(name.clone()), layer.clone());
    }
    Ok(builder)
}

/// Dispatcher whose route chain is auto-discovery only
pub fn build_dispatcher(config: &RelayConfig) -> Result<Dispatcher> {
    Ok(dispatcher_builder(config)?.auto_route().build())
}

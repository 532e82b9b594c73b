use crate::layer::FacadeLayer;
use crate::logger::Logger;
use std::io;
use std::sync::Arc;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Options for [`init_tracing_with_config`].
///
/// **Fields**
/// - `enable_stderr`: if `true`, a `tracing_subscriber::fmt` layer on
///   stderr is added on top of [`FacadeLayer`], giving a human readable
///   echo of every event next to the JSON lines on stdout.
///
/// Notices about failed writes never pass through either layer; they are
/// printed to stderr directly.
#[derive(Clone, Debug, Default)]
pub struct LayerConfig {
    pub enable_stderr: bool,
}

/// Install a global `tracing` subscriber that writes every INFO, WARN and
/// ERROR event through `logger`.
///
/// **Returns**
/// - `Err(..)` if a global subscriber was already installed.
pub fn init_tracing_with_config<C>(
    logger: Arc<Logger<C>>,
    config: LayerConfig,
) -> Result<(), SetGlobalDefaultError>
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = FacadeLayer::new(logger);

    if config.enable_stderr {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)
    }
}

/// [`init_tracing_with_config`] with [`LayerConfig::default`].
pub fn init_tracing<C>(logger: Arc<Logger<C>>) -> Result<(), SetGlobalDefaultError>
where
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    init_tracing_with_config(logger, LayerConfig::default())
}

use serde::Serialize;
use time::{macros::format_description, UtcOffset};
use tracing_subscriber::{fmt::time::OffsetTime, EnvFilter};

/// One intermediate pair emitted by a map step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

/// The map half of a map/reduce app. A driver hands each input split to
/// `map` and groups the returned pairs by key.
pub trait Mapper {
    fn map(&self, filename: &str, contents: &str) -> Vec<KeyValue>;
}

/// Installs the global fmt subscriber. Filter comes from `RUST_LOG`,
/// defaulting to `info`. Fails if a subscriber is already set.
pub fn init_logger() -> anyhow::Result<()> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(
        offset,
        format_description!("[hour]:[minute]:[second].[subsecond digits:3]"),
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_timer(timer)
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

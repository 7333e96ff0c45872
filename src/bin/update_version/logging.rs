use std::io;

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Warnings and errors go to `errors`, everything else to `rest`.
pub(crate) fn subscriber<E, EW, O, OW>(
    filter: EnvFilter,
    errors: E,
    rest: O,
) -> impl Subscriber + Send + Sync + 'static
where
    E: Fn() -> EW + Send + Sync + 'static,
    EW: io::Write,
    O: Fn() -> OW + Send + Sync + 'static,
    OW: io::Write,
{
    tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .with_writer(errors.with_max_level(Level::WARN).or_else(rest))
        .finish()
}

pub(crate) fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    subscriber(filter, io::stderr, io::stdout).init();
}

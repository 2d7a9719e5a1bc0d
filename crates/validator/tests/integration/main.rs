//! Integration tests for tessera-validator, one module per validator plus
//! cross-cutting behavior (error payloads, builder, concurrency).

mod any;
mod boolean;
mod builder;
mod date;
mod errors;
mod file;
mod object;
mod string;

use tessera_validator::prelude::Value;

/// Builds a [`Value`] from a JSON literal.
pub fn json(value: serde_json::Value) -> Value {
    value.into()
}

/// Routes `tracing` output through the test harness so `debug!` lines from
/// composite validators show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

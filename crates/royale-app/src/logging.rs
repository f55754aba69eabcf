//! Logger setup for the binary. Library crates only use the `log` facade.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Install the global logger. `RUST_LOG` wins over `verbosity`, which maps
/// 0 to info, 1 to debug and anything higher to trace.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let env = Env::default().default_filter_or(level.to_string());
    // Fails only when a logger is already installed, e.g. across tests.
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Routes the crate's `tracing` events to the test output.
///
/// Defaults to `warn`; set `RUST_LOG=zset_tree=trace` to see every mutation.
pub fn init_logs() {
    INIT.call_once(|| {
        let filter = EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
            .from_env_lossy();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}

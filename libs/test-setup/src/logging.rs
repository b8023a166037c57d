use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Installs a global subscriber printing through the test harness. Controlled
/// by `RUST_LOG`, safe to call from every test.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| eprintln!("Error initializing the global logger: {err}"))
            .ok();
    });
}

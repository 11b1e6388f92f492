use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Filter comes from `RUST_LOG`, falling back to `info`. Safe to call more
/// than once; only the first call installs anything.
pub fn init_tracing() {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::info!("still alive");
    }
}

#![allow(dead_code)]

//! Shared helpers for the integration tests.

/// Installs a `tracing` subscriber writing through the test harness, once per binary.
///
/// Filtered by `RUST_LOG`, defaulting to `evp_digest=trace`.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("evp_digest=trace"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_test_writer()
            .init();
    });
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing() {}

/// Decode a hex test vector, panicking on malformed input.
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|err| panic!("bad test vector {s:?}: {err}"))
}

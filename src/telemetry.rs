/// Tracing initialization.
///
/// JSON-formatted subscriber with an env-filter; `RUST_LOG` overrides the
/// default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "aeminium_identity=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();
}

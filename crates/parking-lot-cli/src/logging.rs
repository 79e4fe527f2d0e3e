use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Logs go to stderr so stdout only carries the menu. `PARKING_LOG` takes an
/// `EnvFilter` directive (default `warn`), `LOG_FORMAT=json` switches to JSON
/// lines.
pub fn init() {
    let filter = EnvFilter::try_from_env("PARKING_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let use_json = std::env::var("LOG_FORMAT").as_deref() == Ok("json");

    if use_json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    }
}

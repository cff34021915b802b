/// Logger setup
///
/// Uses `RUST_LOG` when it is set. Otherwise this crate logs at `debug` in
/// debug builds and `info` in release builds, and every other crate is held
/// to `warn` so iced/wgpu chatter stays out of the console.
use chrono::Utc;
use log::LevelFilter;
use std::io::Write;

const CRATE_NAME: &str = "tryptiq";

pub fn setup_logger() {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter(None, LevelFilter::Warn);
        if cfg!(debug_assertions) {
            builder.filter(Some(CRATE_NAME), LevelFilter::Debug);
        } else {
            builder.filter(Some(CRATE_NAME), LevelFilter::Info);
        }
    }

    builder.format(|buf, record| {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        let location = match (record.module_path(), record.line()) {
            (Some(module), Some(line)) => format!("{module}:{line}"),
            (Some(module), None) => module.to_string(),
            _ => "unknown".to_string(),
        };
        writeln!(
            buf,
            "{timestamp} {:<5} [{location}] {}",
            record.level(),
            record.args()
        )
    });

    // A second init (e.g. from tests) is harmless; keep the first logger.
    let _ = builder.try_init();
}

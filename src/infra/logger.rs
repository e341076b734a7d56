use env_logger::{Builder, Target};
use log::Level;
use std::io::Write;

pub const LOG_LEVEL_ENV: &str = "CONTEXT_CLI_LOG_LEVEL";

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    }
}

/// Installs the global logger. Records go to stderr; stdout is reserved for
/// the prompt document.
pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().filter_or(LOG_LEVEL_ENV, level_for(verbosity));

    Builder::from_env(env)
        .target(Target::Stderr)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31", // Red
                Level::Warn => "33",  // Yellow
                Level::Info => "32",  // Green
                Level::Debug => "36", // Cyan
                Level::Trace => "35", // Magenta
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m [{}] {}",
                level_color,
                record.level(),
                buf.timestamp(),
                record.args()
            )
        })
        .format_timestamp_secs()
        .try_init()
}

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::LevelFilter;
use log::Level;
use env_logger::{Builder, Env, fmt::Color};
use std::io::Write;
use once_cell::sync::OnceCell;

mod error;
pub use error::LoggerError;

/// Environment variable overriding the verbosity filters set through the command line.
pub const LOG_ENV_VAR: &str = "CKMR_LOG";

static INSTANCE: OnceCell<Logger> = OnceCell::new();

#[derive(Debug)]
pub struct Logger {
    multi_pg: MultiProgress,
}

impl Logger {
    /// Initialize the global logger. Subsequent calls only update the verbosity.
    ///
    /// Directives found in `CKMR_LOG` take precedence over `verbosity`, and may raise the global max level.
    ///
    /// # Errors
    /// if another logger was already registered within the `log` facade.
    pub fn init(verbosity: u8) -> Result<(), LoggerError> {
        if INSTANCE.get().is_some() {
            Self::set_level(verbosity);
            return Ok(())
        }

        let log_level = Self::u8_to_loglevel(verbosity);
        let env = Env::default()
            .filter(LOG_ENV_VAR);

        let logger = Builder::new().filter_level(log_level)
            .format(|buf, record| {
                let (traceback, set_intensity) = match record.level() {
                    Level::Error => (
                        format!("(@ {}:{}) ", record.file().unwrap_or("unknown"), record.line().unwrap_or(0)),
                        true
                    ),
                    _ => (String::new(), false)
                };

                let mut arg_style = buf.style();
                arg_style.set_intense(set_intensity);

                let mut level_style = buf.style();
                let color = match record.level() {
                    Level::Error => Color::Red,
                    Level::Warn  => Color::Yellow,
                    Level::Info  => Color::Green,
                    Level::Debug => Color::Blue,
                    Level::Trace => Color::Cyan
                };
                level_style.set_color(color).set_bold(true);

                writeln!(
                    buf,
                    "[{} {: <5} {}] {traceback}{}",
                    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                    level_style.value(record.level()),
                    record.target(),
                    arg_style.value(record.args())
                )
            })
            .parse_env(env)
            .build();

        // CKMR_LOG directives may raise the level above the command line's.
        let max_level = logger.filter().max(log_level);

        // Progress bar support.
        let multi_pg = MultiProgress::new();
        LogWrapper::new(multi_pg.clone(), logger)
            .try_init()
            .map_err(LoggerError::SetLogger)?;
        log::set_max_level(max_level);

        INSTANCE.set(Self{multi_pg}).map_err(|_| LoggerError::AlreadyInitialized)
    }

    fn u8_to_loglevel(verbosity: u8) -> LevelFilter {
        match verbosity {
            0            => LevelFilter::Error,
            1            => LevelFilter::Warn,
            2            => LevelFilter::Info,
            3            => LevelFilter::Debug,
            4..= u8::MAX => LevelFilter::Trace
        }
    }

    pub fn set_level(verbosity: u8) {
        log::set_max_level(Self::u8_to_loglevel(verbosity));
    }

    /// Access the shared `MultiProgress`, if the logger was initialized.
    pub fn multi() -> Option<&'static MultiProgress> {
        INSTANCE.get().map(|logger| &logger.multi_pg)
    }

    /// Create a progress bar of `len` steps. The bar is attached to the logger, so that log records
    /// do not tear it apart. Falls back to a hidden bar when the logger was never initialized.
    pub fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
        let Some(multi) = Self::multi() else {
            return ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template("{msg:<16} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let pg = multi.add(ProgressBar::new(len));
        pg.set_style(style);
        pg.set_message(message);
        pg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level(){
        Logger::init(0).expect("Failed to initialize logger");
        for level in 0..u8::MAX {
            Logger::set_level(level);

            let expected_level = match level {
                0           => LevelFilter::Error,
                1           => LevelFilter::Warn,
                2           => LevelFilter::Info,
                3           => LevelFilter::Debug,
                4..=u8::MAX => LevelFilter::Trace
            };

            assert_eq!(log::max_level(), expected_level);
        }
        // Re-initializing is a no-op.
        Logger::init(2).expect("Second initialization should be a no-op");
        assert_eq!(log::max_level(), LevelFilter::Info);
        assert!(Logger::multi().is_some());
    }
}

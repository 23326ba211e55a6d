//! `log` backend writing to the SBI console.
//!
//! The maximum level is fixed at build time by the `LOG` environment
//! variable (`off`, `error`, `warn`, `info`, `debug` or `trace`), e.g.
//! `LOG=debug cargo build`. It defaults to `warn`.

use log::LevelFilter;

/// Level used when `LOG` is unset or not a level name.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Parses a `LOG` value, case-insensitively.
pub fn level_from(spec: Option<&str>) -> LevelFilter {
    spec.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

#[cfg(target_arch = "riscv64")]
mod backend {
    use log::{Log, Metadata, Record};

    struct SbiLogger;

    impl Log for SbiLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                crate::println!("[{:>5}] {}", record.level(), record.args());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: SbiLogger = SbiLogger;

    /// Installs the console logger. Later calls are no-ops.
    pub fn init() {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(super::level_from(option_env!("LOG")));
        }
    }
}

#[cfg(target_arch = "riscv64")]
pub use backend::init;

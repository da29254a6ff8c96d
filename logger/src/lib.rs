//! Default logging setup for the chain table binaries
#![warn(missing_docs)]

use std::{sync::Mutex, time::Instant};

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Environment variable holding the log filter, in `env_logger` syntax.
pub const FILTER_ENV: &str = "CHAIN_TABLE_LOG";

/// Environment variable controlling colored output (`auto`, `always` or `never`).
pub const STYLE_ENV: &str = "CHAIN_TABLE_LOG_STYLE";

/// Perform the default logging setup, logging at `info` level unless overridden by
/// [`FILTER_ENV`].
pub fn setup() {
    setup_with_filter("info")
}

/// Perform the default logging setup with the given fallback filter, which is used when
/// [`FILTER_ENV`] is not set.
///
/// Every record is prefixed with the time elapsed since this call. Whenever the target of a
/// record differs from the one before, a header line naming the new target is printed first.
pub fn setup_with_filter(default_filter: &str) {
    let start_time = Instant::now();
    let last_target = Mutex::new(String::new());

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or(FILTER_ENV, default_filter)
            .write_style(STYLE_ENV),
    )
    .format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        let level = record.level();
        let target = record.target();

        // a poisoned lock only means another thread panicked while logging
        let mut last_target = last_target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if target != *last_target {
            last_target.clear();
            last_target.push_str(target);

            writeln!(
                buf,
                "{} {}",
                format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
            )?;
        }
        writeln!(
            buf,
            "{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{level:<5}{style:#}",
                style = buf.default_level_style(level),
            ),
            record.args(),
        )
    })
    .init();
}

use std::ops::Deref;
use std::panic;

use anyhow::Context;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

pub const LOG_FILE: &str = "/tmp/patchwork.log";

/// Sends log output to `path` and installs a panic hook that restores the
/// terminal before logging the panic.
pub fn setup(path: &std::path::Path, debug: bool) -> anyhow::Result<()> {
    panic::set_hook(Box::new(|panic_info| {
        terminal::screen::restore();

        let backtrace = std::backtrace::Backtrace::capture();
        log::error!("{backtrace}");

        let (filename, line) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line()))
            .unwrap_or(("<unknown>", 0));

        let cause = panic_info
            .payload()
            .downcast_ref::<String>()
            .map(String::deref);

        let cause = cause.unwrap_or_else(|| {
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .unwrap_or("<cause unknown>")
        });

        log::error!("a panic occurred at {filename}:{line}: {cause}");
        eprintln!("patchwork panicked at {filename}:{line}: {cause}");
    }));

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{l} {d(%H:%M:%S.%3f)} {f}:{L} {m}{n}",
        )))
        .build(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = Config::builder()
        .appender(Appender::builder().build("file-appender", Box::new(file_appender)))
        .build(Root::builder().appender("file-appender").build(level))?;

    log4rs::init_config(config)?;

    Ok(())
}

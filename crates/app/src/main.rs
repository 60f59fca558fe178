mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use editor_state::session::{Outcome, Session};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "patchwork", author, version, about, long_about = None)]
struct Cli {
    /// File to open. Without one the editor starts on an empty document
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long)]
    debug: bool,

    /// Read settings from this TOML file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the log here
    #[arg(long, value_name = "PATH", default_value = logging::LOG_FILE)]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::setup(&cli.log_file, cli.debug)?;

    let config = editor_state::config::Config::load(cli.config.as_deref())
        .context("cannot load configuration")?;
    let session = match &cli.file {
        Some(path) => Session::open(path, config)?,
        None => Session::from_bytes(Vec::new(), config),
    };

    let result = run(session);

    if let Err(e) = &result {
        log::error!("{e:#}");
    }

    log::info!("bye");

    result
}

fn run(mut session: Session) -> anyhow::Result<()> {
    let mut screen = terminal::screen::Screen::new().context("cannot set up the terminal")?;
    let (width, height) = terminal::screen::Screen::size();

    session.resize(width, height);

    loop {
        screen.paint(&session.frame())?;

        let Some(input) = terminal::input::next_input(POLL_TIMEOUT, session.mode())? else {
            continue;
        };

        match input {
            terminal::input::Input::Resize { width, height } => session.resize(width, height),
            terminal::input::Input::Keys(keys) => {
                for key in keys {
                    if session.dispatch(key) == Outcome::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

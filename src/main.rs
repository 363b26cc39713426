mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod options;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::options::Difficulty;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    difficulty: Option<Difficulty>,
    log_file: Option<PathBuf>,
    debug: bool,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('d') | Arg::Long("difficulty") => {
                    args.difficulty = Some(parser.value()?.parse()?);
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("debug") => args.debug = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>       Read configuration from the given file\n",
    "  -d, --difficulty <LEVEL>  Play at the given difficulty\n",
    "                            [easy, normal, hard, insane]\n",
    "  -l, --log-file <PATH>     Write log messages to the given file\n",
    "      --debug               Log debug messages\n",
    "  -h, --help                Display this help message and exit\n",
    "  -V, --version             Show the program version and exit\n",
);

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => io_exit(run(args)),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    if let Some(ref path) = args.log_file {
        logging::init(path, logging::level(args.debug))
            .with_context(|| format!("failed to set up logging to {}", path.display()))?;
    }
    let mut config = match args.config {
        Some(ref path) => Config::load(path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load_default().context("failed to load configuration")?,
    };
    if let Some(difficulty) = args.difficulty {
        config.options.difficulty = difficulty;
    }
    log::info!(
        "starting {}x{} game at {} difficulty",
        config.options.field_width,
        config.options.field_height,
        config.options.difficulty
    );
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .and_then(|()| App::new(config.options).run(terminal))
        .and(execute!(io::stdout(), DisableFocusChange));
    ratatui::restore();
    r?;
    Ok(())
}

fn io_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

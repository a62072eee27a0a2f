mod app;
mod help;
mod jumpto;
mod logging;
mod palette;
use crate::app::App;
use anyhow::Context;
use calpager::{CalendarPager, Config, PeriodKind, SelectionLog};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunArgs),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunArgs {
    week: bool,
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    verbosity: u8,
    date: Option<Date>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = RunArgs::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week") => args.week = true,
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('v') | Arg::Long("verbose") => {
                    args.verbosity = args.verbosity.saturating_add(1);
                }
                Arg::Value(value) if args.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => args.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                if let Some(path) = &args.log_file {
                    logging::init(path, args.verbosity)?;
                }
                let mut config = args
                    .config
                    .as_deref()
                    .map(Config::load)
                    .transpose()
                    .context("failed to load configuration")?
                    .unwrap_or_default();
                if args.week {
                    config = config.with_view(PeriodKind::Week);
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                tracing::info!(%today, selected = ?args.date, view = ?config.options.kind, "starting");
                let calendar =
                    CalendarPager::new(today, args.date, config.options, SelectionLog::new())
                        .with_marked_dates(config.marked)
                        .with_theme(config.theme);
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(calendar)
                        .run(terminal)
                        .context("error running calendar")
                })
            }
            Command::Help => {
                println!("Usage: calpager [<options>] [YYYY-MM-DD]");
                println!();
                println!("Paged terminal calendar");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>   Read settings from the given TOML file");
                println!("      --log-file <FILE> Write log messages to the given file");
                println!("  -v, --verbose         Log more; may be given up to three times");
                println!("  -w, --week            Page by week instead of by month");
                println!();
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

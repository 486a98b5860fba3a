use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use linefind::cli::{self, Cli, Command, FindArgs, MatchArgs, ReplaceArgs};
use linefind::EditSession;
use linefind_buffer::{LineBuffer, TextBuffer};
use linefind_config::Config;
use linefind_logger::LogLevel;
use linefind_text_search::{
    Feedback, FindResult, NotificationSink, SearchDirection, SearchFlags, SearchOptions,
};

/// Rings the terminal bell when a search comes up empty
struct BellSink;

impl NotificationSink for BellSink {
    fn notify(&mut self, feedback: Feedback) {
        let mut stderr = io::stderr();
        if feedback == Feedback::NotFound && stderr.is_terminal() {
            let _ = stderr.write_all(b"\x07");
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = cli::parse_args(std::env::args().skip(1))?;

    match cli.command {
        Command::Help => {
            println!("{}", cli::USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Version => {
            println!("linefind v{}", env!("CARGO_PKG_VERSION"));
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = load_config(&cli)?;
    init_logging(&config);

    match cli.command {
        Command::Find(args) => run_find(&config, args),
        Command::Replace(args) => run_replace(&config, args),
        Command::Help | Command::Version => Ok(ExitCode::SUCCESS),
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => Config::load_from(path),
        // A broken or unwritable default config should not block a search
        None => Ok(Config::load().unwrap_or_else(|e| {
            eprintln!("Warning: using default settings: {:#}", e);
            Config::default()
        })),
    }
}

fn init_logging(config: &Config) {
    let min_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    linefind_logger::init(config.log_file_path(), min_level);
    log::info!("linefind started");
}

fn search_flags(config: &Config, args: &MatchArgs) -> SearchFlags {
    SearchFlags::new(
        args.match_case.unwrap_or(config.search.match_case),
        args.whole_word.unwrap_or(config.search.whole_word),
    )
}

fn open_buffer(path: &Path) -> Result<TextBuffer> {
    let buffer = TextBuffer::from_file(path)?;
    log::info!(
        "Opened {} ({} lines, {:?})",
        path.display(),
        buffer.line_count(),
        buffer.line_ending()
    );
    Ok(buffer)
}

fn run_find(config: &Config, args: FindArgs) -> Result<ExitCode> {
    let buffer = open_buffer(&args.file)?;
    let start = buffer.checked_position(args.from)?;

    let direction = args.direction.unwrap_or_else(|| {
        SearchDirection::from_str(&config.search.direction).unwrap_or_else(|e| {
            log::warn!("{}, searching forward", e);
            SearchDirection::Forward
        })
    });
    let options = SearchOptions {
        wrap_around: args.wrap.unwrap_or(config.search.wrap_around),
    };

    let mut session = EditSession::new(buffer)
        .with_options(options)
        .with_sink(Box::new(BellSink));
    session.set_cursor(start);

    let first = session.start_find(&args.pattern, search_flags(config, &args.matching), direction);
    if !first.is_found() {
        println!("Not found: {}", args.pattern);
        return Ok(ExitCode::from(1));
    }
    print_hit(&session);

    if args.all {
        // With wrap-around the scan comes back to the first hit
        while let FindResult::Found(pos) = session.find_next() {
            if Some(pos) == first.position() {
                break;
            }
            print_hit(&session);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_hit(session: &EditSession) {
    let row = session.cursor().row;
    let line = session.buffer().line_text(row).unwrap_or_default();
    println!("{}\t{}", session.status().unwrap_or_default(), line);
}

fn run_replace(config: &Config, args: ReplaceArgs) -> Result<ExitCode> {
    let buffer = open_buffer(&args.file)?;
    let mut session = EditSession::new(buffer);

    let count = session.replace_all(
        &args.pattern,
        &args.replacement,
        search_flags(config, &args.matching),
    );

    if args.write {
        if session.buffer().is_modified() {
            session.buffer_mut().save()?;
        }
        eprintln!("Replaced {} occurrence(s) in {}", count, args.file.display());
    } else {
        print!("{}", session.buffer().text());
        io::stdout().flush()?;
        eprintln!("Replaced {} occurrence(s)", count);
    }

    Ok(ExitCode::SUCCESS)
}

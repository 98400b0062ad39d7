//! Battle narration CLI
//!
//! Run with: cargo run -p narrate-cli
//!
//! Examples:
//!   cargo run -p narrate-cli -- battle.log
//!   cargo run -p narrate-cli -- --perspective 1 --format jsonl events.jsonl
//!   cat battle.log | cargo run -p narrate-cli -- --templates text.json

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use battle_protocol::Event;
use clap::{Parser, ValueEnum};
use narrator::{
    bundled_templates_toml, default_config_toml, NarratorConfig, NarratorError, Renderer,
    WriterSink,
};
use tracing_subscriber::filter::EnvFilter;

/// Battle log narration
#[derive(Parser, Debug)]
#[command(name = "narrate")]
#[command(about = "Turns a battle protocol log into play-by-play text")]
struct Args {
    /// Battle log to read (stdin if omitted)
    input: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Protocol)]
    format: InputFormat,

    /// Side narrated as "own": 0 for player 1, 1 for player 2
    #[arg(long)]
    perspective: Option<u8>,

    /// Override template dictionary (.toml or .json)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,

    /// Print the bundled template set and exit
    #[arg(long)]
    print_default_templates: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// `|command|arg|...` lines
    Protocol,
    /// One JSON event per line
    Jsonl,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }
    if args.print_default_templates {
        print!("{}", bundled_templates_toml());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("narrate: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout only carries narration.
fn init_logging(verbose: bool) {
    let default = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Errors that end a run.
#[derive(Debug)]
enum CliError {
    Narrator(NarratorError),
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Narrator(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<NarratorError> for CliError {
    fn from(e: NarratorError) -> Self {
        CliError::Narrator(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Loads the configuration file (if any) with the template override applied.
fn load_config(args: &Args) -> Result<NarratorConfig, NarratorError> {
    let mut config = match &args.config {
        Some(path) => NarratorConfig::from_file(path)?,
        None => NarratorConfig::default(),
    };
    if let Some(path) = &args.templates {
        config.templates.path = Some(path.clone());
    }
    Ok(config)
}

/// Builds the renderer. `--perspective` wins over the configured one and is
/// validated here.
fn build_renderer<W: Write>(
    args: &Args,
    config: &NarratorConfig,
    writer: W,
) -> Result<Renderer<WriterSink<W>>, NarratorError> {
    let mut builder = Renderer::builder()
        .sink(WriterSink::new(writer))
        .templates(config.load_templates()?)
        .config(&config.renderer);
    if let Some(index) = args.perspective {
        builder = builder.perspective_index(index);
    }
    Ok(builder.build()?)
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = load_config(args)?;
    let mut renderer = build_renderer(args, &config, io::stdout().lock())?;

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(open(path)?)),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    let rendered = render_stream(&mut renderer, reader, args.format)?;
    tracing::debug!("Rendered {} events", rendered);

    let mut sink = renderer.into_sink();
    sink.flush()?;
    Ok(())
}

fn open(path: &Path) -> io::Result<File> {
    File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}

/// Renders every event in `reader`, returning how many were rendered.
///
/// Stops at the first write failure reported by the sink.
fn render_stream<W: Write>(
    renderer: &mut Renderer<WriterSink<W>>,
    reader: impl BufRead,
    format: InputFormat,
) -> io::Result<usize> {
    let mut rendered = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let event = match format {
            InputFormat::Protocol => Event::parse_line(&line),
            InputFormat::Jsonl => parse_jsonl(&line, index + 1),
        };
        let Some(event) = event else {
            continue;
        };
        renderer.render(&event);
        rendered += 1;
        if let Some(e) = renderer.sink_mut().take_error() {
            return Err(e);
        }
    }
    Ok(rendered)
}

fn parse_jsonl(line: &str, line_number: usize) -> Option<Event> {
    if line.trim().is_empty() {
        return None;
    }
    match Event::from_jsonl(line) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Skipping line {}: {}", line_number, e);
            None
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use number_filter::{
    CountingSink, Pipeline, PipelineError, PredicateRegistry, PrintingSink, ResultSink,
    RunOutcome, SkipReason,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Wrong arguments or a filter expression the registry rejects
const EXIT_USAGE: u8 = 1;
/// The run started but could not write its output
const EXIT_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "numfilter", version)]
#[command(about = "Print the integers of a file that pass a filter, then count them")]
struct Cli {
    /// Filter expression: EVEN, ODD or GT<n> (e.g. GT5). Case-sensitive.
    filter: String,

    /// Text file of whitespace-separated integers
    file: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Log filter directives, e.g. `number_filter=trace`
    #[arg(long, env = "NUMFILTER_LOG", value_name = "DIRECTIVES")]
    log: Option<String>,
}

fn main() -> ExitCode {
    let registry = PredicateRegistry::new();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Nothing else to report to if stderr is gone
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => {
                    print_filter_options(&registry);
                    ExitCode::from(EXIT_USAGE)
                }
            };
        }
    };

    if let Err(err) = init_tracing(&cli) {
        eprintln!("Error: invalid log directives: {err}");
        return ExitCode::from(EXIT_USAGE);
    }

    run(&cli, &registry)
}

fn init_tracing(cli: &Cli) -> Result<(), tracing_subscriber::filter::ParseError> {
    let filter = match (&cli.log, cli.verbose) {
        (Some(directives), _) => EnvFilter::try_new(directives)?,
        (None, true) => EnvFilter::new("debug"),
        (None, false) => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    };

    // Already installed is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    Ok(())
}

fn run(cli: &Cli, registry: &PredicateRegistry) -> ExitCode {
    let mut printer = PrintingSink::stdout();
    let mut counter = CountingSink::stdout();

    match execute(cli, registry, &mut printer, &mut counter) {
        Ok(RunOutcome::Completed(stats)) => {
            debug!("{}", stats.format());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Skipped(SkipReason::SourceUnavailable(err))) => {
            eprintln!("{err}");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Skipped(SkipReason::EmptySource)) => {
            eprintln!("No valid integers found in {}", cli.file.display());
            ExitCode::SUCCESS
        }
        Err(err @ PipelineError::InvalidFilter(_)) => {
            eprintln!("Error: {err}");
            print_filter_options(registry);
            ExitCode::from(EXIT_USAGE)
        }
        Err(err) => {
            error!(error = %err, "run failed");
            eprintln!("Error: {err}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn execute(
    cli: &Cli,
    registry: &PredicateRegistry,
    printer: &mut dyn ResultSink,
    counter: &mut dyn ResultSink,
) -> number_filter::Result<RunOutcome> {
    Pipeline::builder()
        .filter(registry, &cli.filter)?
        .sink(printer)
        .sink(counter)
        .build()?
        .run(&cli.file)
}

fn print_filter_options(registry: &PredicateRegistry) {
    eprintln!("FILTER options: {}", registry.kinds().join(", "));
}

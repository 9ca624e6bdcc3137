use clap::{CommandFactory, Parser, ValueEnum};
use csv_tail::{Error, LineBreak, WatchConfig, open_at_end, watch};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// csvtail - follow a CSV file like `tail -f`, printing only the columns you ask for.
#[derive(Parser, Debug)]
#[command(name = "csvtail")]
#[command(
    version,
    about,
    long_about = r#"csvtail follows a CSV file like `tail -f`. Its distinguishing feature is
printing only selected columns of each newly appended row.

Examples:
    csvtail file.csv                       # like tail -f file.csv
    csvtail file.csv -c 1,2,3              # only columns 1, 2 and 3
    csvtail file.csv -c 1,2,3 -d ";"       # with a custom delimiter
    csvtail file.csv -c 1,2,3 -d "," -s 5  # poll every 5 seconds
"#
)]
struct Cli {
    /// File to watch.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Zero-based column numbers to print (comma separated).
    #[arg(short, long, value_delimiter = ',', value_name = "N,...")]
    columns: Vec<usize>,

    /// Field delimiter (a single character).
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Poll interval in seconds; zero or less polls as fast as practical.
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    seconds: i64,

    /// Line terminator for emitted rows (defaults to the platform's).
    #[arg(short, long, value_enum)]
    line_break: Option<LineBreakArg>,

    /// Diagnostic log filter (trace, debug, info, warn, error), written to stderr.
    #[arg(long, env = "CSVTAIL_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LineBreakArg {
    Lf,
    Crlf,
}

impl From<LineBreakArg> for LineBreak {
    fn from(arg: LineBreakArg) -> Self {
        match arg {
            LineBreakArg::Lf => LineBreak::Lf,
            LineBreakArg::Crlf => LineBreak::CrLf,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let Some(path) = cli.file else {
        let _ = Cli::command().print_help();
        return Err(Error::Configuration {
            message: "no file to watch was given".to_string(),
        });
    };

    let config = WatchConfig::builder()
        .columns(cli.columns)
        .delimiter(cli.delimiter)
        .line_break(cli.line_break.map(LineBreak::from).unwrap_or_default())
        .seconds(cli.seconds)
        .build()?;

    let file = open_at_end(&path).await?;
    watch(file, &config, &mut tokio::io::stdout()).await
}

/// Parse the `--log-level` / `CSVTAIL_LOG` value into a tracing filter.
fn log_filter(level: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(level).map_err(|e| format!("invalid log level {:?}: {}", level, e))
}

/// Initialize the tracing subscriber; stdout is reserved for csv output.
fn init_logging(level: &str) -> Result<(), String> {
    let filter = log_filter(level)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    Ok(())
}

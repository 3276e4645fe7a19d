use clap::{ArgAction, Parser, ValueEnum};
use stlzero::reader::read_header;
use stlzero::report::{self, ReportOptions};
use stlzero::TagDecoding;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stlzero", about = "Print the tag and zero point stored in an STL file header")]
struct Cli {
    /// Files to inspect, processed in order
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
    /// Emit one JSON object per file instead of labelled lines
    #[arg(long)]
    json: bool,
    /// Also print the tag and trailer bytes as hex
    #[arg(long)]
    raw: bool,
    /// How invalid bytes in the tag are shown
    #[arg(long, value_enum, default_value = "ignore")]
    tag_decoding: TagMode,
    /// Report a failed file and continue with the rest
    #[arg(short, long)]
    keep_going: bool,
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum TagMode {
    /// Drop invalid sequences
    Ignore,
    /// Show invalid sequences as U+FFFD
    Replace,
}

impl From<TagMode> for TagDecoding {
    fn from(m: TagMode) -> Self {
        match m {
            TagMode::Ignore  => TagDecoding::Ignore,
            TagMode::Replace => TagDecoding::Replace,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = ReportOptions {
        tag_decoding: cli.tag_decoding.into(),
        raw: cli.raw,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0usize;

    for path in &cli.paths {
        let rec = match read_header(path) {
            Ok(rec) => rec,
            Err(e) if cli.keep_going => {
                error!(path = %path.display(), "{}", e);
                failed += 1;
                continue;
            }
            Err(e) => return Err(e.to_string().into()),
        };
        info!(path = %path.display(), "header decoded");
        if cli.json {
            report::write_json(&mut out, path, &rec, &opts)?;
        } else {
            report::write_text(&mut out, &rec, &opts)?;
        }
        out.flush()?;
    }

    if failed > 0 {
        return Err(format!("{} of {} file(s) could not be read", failed, cli.paths.len()).into());
    }
    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

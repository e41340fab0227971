use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use crossterm::style::{style, Color, Stylize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pubscope::audit::DEFAULT_SOURCE_DIR;
use pubscope::export::{self, ExportFormat, ExportOptions};
use pubscope::parser::ManifestError;
use pubscope::{check_project, AuditOptions};

#[derive(Parser)]
#[command(name = "pubscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Flags unused and git-sourced dependencies in Dart/Flutter projects", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Options for the default `check` run
    #[command(flatten)]
    check: CheckArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the dependencies of a project (the default)
    Check(CheckArgs),
    /// Show version information
    Version,
}

#[derive(Args)]
struct CheckArgs {
    /// Project root holding pubspec.yaml and pubspec.lock
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Directory scanned for imports, relative to the project root
    #[arg(short, long, default_value = DEFAULT_SOURCE_DIR)]
    source_dir: PathBuf,

    /// Output format: text, json, csv, markdown
    #[arg(short, long, default_value = "text")]
    format: ExportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also list dependencies missing from pubspec.lock
    #[arg(long)]
    show_unlocked: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl CheckArgs {
    fn use_color(&self) -> bool {
        !self.no_color
            && self.output.is_none()
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Check(args)) => run_check(&args),
        Some(Commands::Version) => {
            println!("pubscope v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        None => run_check(&cli.check),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pubscope=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_check(args: &CheckArgs) -> ExitCode {
    let color = args.use_color();

    match check(args, color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let paint = |text: String, c: Color| {
                if color {
                    style(text).with(c).to_string()
                } else {
                    text
                }
            };
            eprintln!("{}", paint(format!("❌ Error: {}", e), Color::Red));
            if let Some(hint) = e.downcast_ref::<ManifestError>().and_then(ManifestError::hint) {
                eprintln!("{}", paint(format!("⚠️  {}", hint), Color::Yellow));
            }
            ExitCode::FAILURE
        }
    }
}

fn check(args: &CheckArgs, color: bool) -> anyhow::Result<()> {
    let options = AuditOptions::new(&args.path).with_source_dir(&args.source_dir);
    let report = check_project(&options)?;

    let export_options = ExportOptions {
        color,
        show_unlocked: args.show_unlocked,
    };

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(args.format, &report, export_options, &mut writer)
                .and_then(|()| writer.flush())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), format = %args.format, "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export::export(args.format, &report, export_options, &mut handle)
                .context("Failed to write report")?;
        }
    }

    Ok(())
}

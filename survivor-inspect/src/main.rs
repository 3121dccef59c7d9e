mod reports;
mod source;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use reports::InspectionReport;
use source::FileSource;
use survivor_game::{GameStateSource, SquareRootCurve, catalog};
use survivor_view::{TooltipCache, present_log};

#[derive(Debug, Parser)]
#[command(name = "survivor-inspect", version)]
#[command(about = "Render Loot Survivor explore logs and item tooltips from exported game state")]
struct Args {
    /// Explore log export (JSON array, newest event first)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Items export: {"seed": N, "items": [{"id": .., "xp": ..}]}
    #[arg(long)]
    items: Option<PathBuf>,

    /// Override the specials seed from the items export
    #[arg(long)]
    seed: Option<u64>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// List the obstacle table and exit
    #[arg(long)]
    list_obstacles: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    if args.output.is_some() {
        colored::control::set_override(false);
    }

    if maybe_list_obstacles(&args)? {
        return Ok(());
    }

    if args.log.is_none() && args.items.is_none() {
        bail!("nothing to inspect: pass --log and/or --items");
    }

    if args.report == "console" && args.output.is_none() {
        announce_banner();
    }

    let report = build_report(&args)?;
    write_report(&args, &report)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn maybe_list_obstacles(args: &Args) -> Result<bool> {
    if !args.list_obstacles {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available obstacles:")?;
    for (id, name) in catalog().obstacles() {
        writeln!(output_target.writer(), "  {id:>3} - {name}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🗝️ Loot Survivor Inspector".bright_cyan().bold());
    println!("{}", "==========================".cyan());
}

fn file_source(args: &Args) -> FileSource {
    FileSource {
        log_path: args.log.clone(),
        items_path: args.items.clone(),
        seed_override: args.seed,
    }
}

fn build_report(args: &Args) -> Result<InspectionReport> {
    let source = file_source(args);
    let log = source.load_explore_log()?;
    let (items, seed) = source.load_items()?;

    let mut cache = TooltipCache::new(catalog(), SquareRootCurve::ITEMS);
    let items = items
        .into_iter()
        .map(|item| {
            cache
                .present(item, seed)
                .with_context(|| format!("cannot present item {}", item.id))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(InspectionReport {
        log: present_log(catalog(), &log),
        items,
    })
}

fn write_report(args: &Args, report: &InspectionReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, report)?,
        _ => {
            if report.is_empty() {
                writeln!(&mut output_target, "Nothing recorded yet.")?;
            } else {
                reports::generate_console_report(&mut output_target, report)?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

use clap::{Parser, Subcommand};
use seisio::skills::{BoundsCheck, HeaderReader, TraceMeta, TraceReader};
use seisio::{Config, IlByte, TraceFile, Volume, XlByte};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seisio", about = "Inspect SEG-Y seismic trace files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show file metadata from the binary header
    Info {
        input: PathBuf,
    },
    /// Dump one trace header
    Header {
        input: PathBuf,
        /// Trace index
        #[arg(short, long, default_value = "0")]
        index: i32,
    },
    /// Dump the sample values of one trace
    Trace {
        input: PathBuf,
        /// Trace index
        #[arg(short, long, default_value = "0")]
        index: i32,
    },
    /// Classify cube geometry: sorting, line and offset counts
    Cube {
        input: PathBuf,
        /// Trace-header byte position of the inline number
        #[arg(long, default_value = "189")]
        iline: i32,
        /// Trace-header byte position of the crossline number
        #[arg(long, default_value = "193")]
        xline: i32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let f = TraceFile::<TraceMeta>::open(&input)?;
            println!("── {} ──────────────────────────────────────────", input.display());
            println!("  Samples/trace  {}", f.samples());
            println!("  Format         {}", f.format());
            println!("  First trace    {} B", f.trace0());
            println!("  Trace size     {} B", f.tracesize());
            println!("  Traces         {}", f.tracecount());
        }

        // ── Header ───────────────────────────────────────────────────────────
        Commands::Header { input, index } => {
            let mut f = TraceFile::<(TraceMeta, BoundsCheck, HeaderReader)>::open(&input)?;
            let th = f.get_th(index)?;
            println!("Trace {index} of {}", input.display());
            println!("  sequence_line   {:>12}", th.sequence_line);
            println!("  sequence_file   {:>12}", th.sequence_file);
            println!("  field_record    {:>12}", th.field_record);
            println!("  trace_id        {:>12}", th.trace_id);
            println!("  offset          {:>12}", th.offset);
            println!("  source_x        {:>12}", th.source_x);
            println!("  source_y        {:>12}", th.source_y);
            println!("  group_x         {:>12}", th.group_x);
            println!("  group_y         {:>12}", th.group_y);
            println!("  samples         {:>12}", th.samples);
            println!("  sample_interval {:>12}", th.sample_interval);
            println!("  cdp_x           {:>12}", th.cdp_x);
            println!("  cdp_y           {:>12}", th.cdp_y);
            println!("  iline           {:>12}", th.iline);
            println!("  xline           {:>12}", th.xline);
        }

        // ── Trace ────────────────────────────────────────────────────────────
        Commands::Trace { input, index } => {
            let mut f = TraceFile::<(TraceMeta, BoundsCheck, TraceReader)>::open(&input)?;
            let samples: Vec<f64> = f.get(index)?.collect();
            println!("Trace {index}: {} samples", samples.len());
            for row in samples.chunks(8) {
                let line: Vec<String> = row.iter().map(|v| format!("{v:>12.4}")).collect();
                println!("  {}", line.join(" "));
            }
        }

        // ── Cube ─────────────────────────────────────────────────────────────
        Commands::Cube { input, iline, xline } => {
            let cfg = Config::new()
                .with_iline(IlByte::from_code(iline)?)
                .with_xline(XlByte::from_code(xline)?);
            let f = Volume::open_with(&input, cfg)?;
            println!("── {} ──────────────────────────────────────────", input.display());
            println!("  Sorting        {}", f.sorting());
            println!("  Inlines        {}", f.inlinecount());
            println!("  Crosslines     {}", f.crosslinecount());
            println!("  Offsets        {}", f.offsetcount());
        }
    }

    Ok(())
}

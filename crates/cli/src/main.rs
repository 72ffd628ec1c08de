use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use miekit_core::Measure;
use miekit_driver::{BatchDriver, BatchResult, SweepConfig};

#[derive(Parser, Debug)]
#[command(name = "miekit", about = "Mie scattering parameter-sweep CLI")]
struct Cli {
    /// Path to a TOML sweep configuration file
    #[arg(short, long)]
    config: PathBuf,
    /// Path to CSV output (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Measure to evaluate (Qsca, Qext, Qabs, g, coupling, ...)
    #[arg(short, long, default_value = "Qsca")]
    measure: String,
    /// Zip the axes elementwise instead of taking their Cartesian product
    #[arg(long)]
    sequential: bool,
    /// Worker threads (defaults to the number of logical CPUs)
    #[arg(short, long)]
    threads: Option<usize>,
    /// Suppress the pre-run report and progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let measure: Measure = cli.measure.parse()?;
    if !cli.quiet {
        eprintln!("[cli] loading config {}", cli.config.display());
    }
    let config = SweepConfig::from_path(&cli.config)?;
    let driver = BatchDriver::new(config, cli.threads)?.quiet(cli.quiet);
    let result = if cli.sequential {
        driver.run_sequential(measure)?
    } else {
        driver.run(measure)?
    };
    emit_csv(&result, measure, cli.output.as_deref())?;
    if !cli.quiet {
        if let Some(path) = cli.output {
            eprintln!("wrote {} rows to {}", result.values.len(), path.display());
        } else {
            eprintln!("wrote {} rows to stdout", result.values.len());
        }
    }
    if result.stats.failed > 0 {
        eprintln!("[cli] {} points failed (NaN in output)", result.stats.failed);
    }
    Ok(())
}

fn emit_csv(result: &BatchResult, measure: Measure, dest: Option<&Path>) -> io::Result<()> {
    let mut writer: Box<dyn Write> = match dest {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write!(writer, "index")?;
    for column in &result.columns {
        write!(writer, ",{column}")?;
    }
    writeln!(writer, ",{measure}")?;

    for (idx, (row, value)) in result.rows.iter().zip(result.values.iter()).enumerate() {
        write!(writer, "{idx}")?;
        for field in row {
            write!(writer, ",{field}")?;
        }
        writeln!(writer, ",{value}")?;
    }

    writer.flush()
}

mod validation_coreshell;
mod validation_energy;
mod validation_quadrature;
mod validation_rayleigh;
mod validation_truncation;
mod validation_utils;

use clap::{Parser, Subcommand};
use validation_coreshell::CoreshellArgs;
use validation_energy::EnergyArgs;
use validation_quadrature::QuadratureArgs;
use validation_rayleigh::RayleighArgs;
use validation_truncation::TruncationArgs;

fn main() {
    if let Err(err) = run() {
        eprintln!("validation error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::EnergyData(args) => validation_energy::run(args),
        Command::CoreshellData(args) => validation_coreshell::run(args),
        Command::RayleighData(args) => validation_rayleigh::run(args),
        Command::TruncationData(args) => validation_truncation::run(args),
        Command::QuadratureData(args) => validation_quadrature::run(args),
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Module-level validation helpers for the Mie engine."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check Qsca + Qabs = Qext across a size-parameter sweep.
    EnergyData(EnergyArgs),
    /// Compare degenerate coated spheres against the homogeneous solution.
    CoreshellData(CoreshellArgs),
    /// Compare small spheres against the Rayleigh closed form.
    RayleighData(RayleighArgs),
    /// Check the Wiscombe truncation order is nondecreasing in x.
    TruncationData(TruncationArgs),
    /// Track detector coupling convergence under quadrature refinement.
    QuadratureData(QuadratureArgs),
}

mod error;
mod scenario;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use pf_core::pa;
use pf_solver::SteadyFlowSolution;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PipeFlow CLI - steady hydraulics of oil pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a scenario file without solving it
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Solve for the flow rate between the boundary pressures
    Solve {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Solve and export the hydraulic state at every profile node
    Profile {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Solve over a range of inlet pressures
    Sweep {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// First inlet pressure [Pa]
        #[arg(long)]
        from: f64,
        /// Last inlet pressure [Pa]
        #[arg(long)]
        to: f64,
        /// Number of inlet pressures
        #[arg(long, default_value_t = 10)]
        steps: usize,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Solve { scenario_path } => cmd_solve(&scenario_path),
        Commands::Profile {
            scenario_path,
            output,
        } => cmd_profile(&scenario_path, output.as_deref()),
        Commands::Sweep {
            scenario_path,
            from,
            to,
            steps,
        } => cmd_sweep(&scenario_path, from, to, steps),
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario::load_yaml(scenario_path)?;
    let pipe = scenario.pipe()?;
    scenario.fluid(pipe.profile.point_count())?;
    println!(
        "✓ Scenario is valid ({} nodes, {:.1} m)",
        pipe.profile.point_count(),
        pipe.profile.length()
    );
    Ok(())
}

fn cmd_solve(scenario_path: &Path) -> CliResult<()> {
    let scenario = scenario::load_yaml(scenario_path)?;
    let pipe = scenario.pipe()?;
    let fluid = scenario.fluid(pipe.profile.point_count())?;
    let (p_in, p_out) = scenario.boundaries();

    let solution = scenario
        .solver()
        .solve_profile(&pipe, fluid.as_ref(), p_in, p_out)?;

    println!("✓ Converged in {} iterations", solution.iterations);
    println!("  Flow rate:      {:.6} m³/s", solution.flow_rate);
    println!("  Flow rate:      {:.1} m³/h", solution.flow_rate * 3600.0);
    if let Some(inlet) = solution.points.first() {
        println!("  Inlet velocity: {:.4} m/s", inlet.velocity);
        println!("  Inlet Re:       {:.0} ({:?})", inlet.reynolds, inlet.regime);
    }
    println!("  Residual:       {:.3e} Pa", solution.residual);
    Ok(())
}

fn cmd_profile(scenario_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let scenario = scenario::load_yaml(scenario_path)?;
    let pipe = scenario.pipe()?;
    let fluid = scenario.fluid(pipe.profile.point_count())?;
    let (p_in, p_out) = scenario.boundaries();

    let solution = scenario
        .solver()
        .solve_profile(&pipe, fluid.as_ref(), p_in, p_out)?;

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            write_profile_csv(&mut file, &solution)?;
            println!(
                "✓ Exported {} nodes to {}",
                solution.points.len(),
                path.display()
            );
        }
        None => write_profile_csv(&mut io::stdout().lock(), &solution)?,
    }
    Ok(())
}

fn cmd_sweep(scenario_path: &Path, from: f64, to: f64, steps: usize) -> CliResult<()> {
    if steps < 2 {
        return Err(CliError::Argument {
            what: format!("sweep needs at least 2 steps, got {steps}"),
        });
    }

    let scenario = scenario::load_yaml(scenario_path)?;
    let pipe = scenario.pipe()?;
    let fluid = scenario.fluid(pipe.profile.point_count())?;
    let (_, p_out) = scenario.boundaries();

    let boundaries: Vec<_> = (0..steps)
        .map(|i| {
            let p_in = from + (to - from) * i as f64 / (steps - 1) as f64;
            (pa(p_in), p_out)
        })
        .collect();

    let results = scenario
        .solver()
        .solve_many(&pipe, fluid.as_ref(), &boundaries);

    let mut out = io::stdout().lock();
    writeln!(out, "inlet_pressure,flow_rate,iterations")?;
    for ((p_in, _), result) in boundaries.iter().zip(results) {
        match result {
            Ok(solution) => writeln!(
                out,
                "{},{},{}",
                p_in.value, solution.flow_rate, solution.iterations
            )?,
            Err(e) => {
                tracing::warn!(p_in = p_in.value, error = %e, "sweep point failed");
                writeln!(out, "{},,", p_in.value)?;
            }
        }
    }
    Ok(())
}

fn write_profile_csv<W: Write>(out: &mut W, solution: &SteadyFlowSolution) -> io::Result<()> {
    writeln!(
        out,
        "x,height,pressure,density,velocity,reynolds,friction_factor,regime,\
         speed_of_sound,heat_capacity"
    )?;
    for p in &solution.points {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{:?},{},{}",
            p.coordinate,
            p.height,
            p.pressure,
            p.density,
            p.velocity,
            p.reynolds,
            p.friction_factor,
            p.regime,
            p.speed_of_sound,
            p.heat_capacity
        )?;
    }
    Ok(())
}

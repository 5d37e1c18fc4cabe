use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

use cf_model::{RateMechanism, RateModel, TableAxis};
use cf_sim::{run_sweep, RunOutcome, TemperatureRun};

mod error;
mod scenario;

use error::{CliError, CliResult};
use scenario::Scenario;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "cellfade CLI - battery capacity-fade simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Run the temperature sweep described by a scenario
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a rate-coefficient table over a temperature grid
    Rates {
        /// Mechanism to tabulate
        #[arg(long, value_enum, default_value = "calendar")]
        mechanism: MechanismArg,
        /// Grid axis: SOC (percent) or charging current (A)
        #[arg(long, value_enum, default_value = "soc")]
        axis: AxisArg,
        #[arg(long, default_value_t = 0.0)]
        temp_min_c: f64,
        #[arg(long, default_value_t = 60.0)]
        temp_max_c: f64,
        #[arg(long, default_value_t = 7)]
        temp_steps: usize,
        #[arg(long, default_value_t = 0.0)]
        axis_min: f64,
        #[arg(long, default_value_t = 100.0)]
        axis_max: f64,
        #[arg(long, default_value_t = 6)]
        axis_steps: usize,
        /// SOC held fixed when the axis varies current, percent
        #[arg(long, default_value_t = 50.0)]
        fixed_soc: f64,
        /// Current held fixed when the axis varies SOC, A
        #[arg(long, default_value_t = 0.0)]
        fixed_current: f64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MechanismArg {
    Calendar,
    CycHighTemp,
    CycLowTemp,
    CycLowTempHighSoc,
}

impl From<MechanismArg> for RateMechanism {
    fn from(arg: MechanismArg) -> Self {
        match arg {
            MechanismArg::Calendar => RateMechanism::Calendar,
            MechanismArg::CycHighTemp => RateMechanism::CycHighTemp,
            MechanismArg::CycLowTemp => RateMechanism::CycLowTemp,
            MechanismArg::CycLowTempHighSoc => RateMechanism::CycLowTempHighSoc,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisArg {
    Soc,
    Current,
}

impl From<AxisArg> for TableAxis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Soc => TableAxis::SocPercent,
            AxisArg::Current => TableAxis::CurrentAmps,
        }
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            output,
        } => cmd_run(&scenario_path, output.as_deref()),
        Commands::Rates {
            mechanism,
            axis,
            temp_min_c,
            temp_max_c,
            temp_steps,
            axis_min,
            axis_max,
            axis_steps,
            fixed_soc,
            fixed_current,
        } => cmd_rates(
            mechanism.into(),
            axis.into(),
            (temp_min_c, temp_max_c, temp_steps),
            (axis_min, axis_max, axis_steps),
            fixed_soc,
            fixed_current,
        ),
    }
}

fn cmd_validate(scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = Scenario::load(scenario_path)?;
    scenario.validate()?;
    let profile = scenario.build_profile()?;
    println!(
        "✓ Scenario is valid ({} temperatures, {} samples per cycle, {:.2} h per cycle)",
        scenario.temperatures_c.len(),
        profile.len(),
        profile.duration_h()
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let scenario = Scenario::load(scenario_path)?;
    scenario.validate()?;
    let profile = scenario.build_profile()?;
    let temperatures_k = scenario.temperatures_k();

    info!(
        temperatures = temperatures_k.len(),
        max_cycles = scenario.max_cycles,
        "starting sweep"
    );

    let rates = RateModel::new(scenario.parameters);
    let runs = run_sweep(rates, &profile, &scenario.sim_options(), &temperatures_k);

    println!("Sweep results:");
    for run in &runs {
        let temp_c = run.temperature_k - 273.15;
        match &run.result {
            Ok(r) => {
                let retention = r
                    .trajectory
                    .last()
                    .map_or(100.0, |p| p.retention_pct());
                match r.outcome {
                    RunOutcome::Completed => println!(
                        "  {:6.1} °C: {} cycles, cumulative loss {:.5} ({:.1}% retention)",
                        temp_c,
                        r.trajectory.len(),
                        r.final_loss(),
                        retention
                    ),
                    RunOutcome::StoppedByThreshold { cycle } => println!(
                        "  {:6.1} °C: loss threshold reached at cycle {} ({:.1}% retention)",
                        temp_c, cycle, retention
                    ),
                }
            }
            Err(e) => println!("  {:6.1} °C: run failed: {}", temp_c, e),
        }
    }

    let csv = trajectories_csv(&runs);
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported trajectories to {}", path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}

/// One row per (temperature, repetition); failed runs contribute no rows.
fn trajectories_csv(runs: &[TemperatureRun]) -> String {
    let mut csv = String::from(
        "temperature_k,cycle,calendar,cyc_high_temp,cyc_low_temp,cyc_low_temp_high_soc,cumulative_loss,retention_pct\n",
    );
    for run in runs {
        if let Ok(r) = &run.result {
            for point in &r.trajectory {
                let c = &point.contribution;
                csv.push_str(&format!(
                    "{},{},{},{},{},{},{},{}\n",
                    run.temperature_k,
                    point.cycle,
                    c.calendar,
                    c.cyc_high_temp,
                    c.cyc_low_temp,
                    c.cyc_low_temp_high_soc,
                    point.cumulative_loss,
                    point.retention_pct()
                ));
            }
        }
    }
    csv
}

fn cmd_rates(
    mechanism: RateMechanism,
    axis: TableAxis,
    (temp_min_c, temp_max_c, temp_steps): (f64, f64, usize),
    (axis_min, axis_max, axis_steps): (f64, f64, usize),
    fixed_soc: f64,
    fixed_current: f64,
) -> CliResult<()> {
    if temp_steps == 0 || axis_steps == 0 {
        return Err(CliError::InvalidScenario {
            what: "grid steps must be positive",
        });
    }

    let temperatures_k: Vec<f64> = linspace(temp_min_c, temp_max_c, temp_steps)
        .into_iter()
        .map(|c| c + 273.15)
        .collect();
    let axis_values = linspace(axis_min, axis_max, axis_steps);

    let rates = RateModel::new(Default::default());
    let table = rates.tabulate(
        mechanism,
        &temperatures_k,
        axis,
        &axis_values,
        fixed_soc,
        fixed_current,
    )?;

    let axis_label = match axis {
        TableAxis::SocPercent => "SOC %",
        TableAxis::CurrentAmps => "I (A)",
    };
    print!("{:>10}", "T (°C)");
    for a in &axis_values {
        print!("  {:>10.3}", a);
    }
    println!("  [{}]", axis_label);
    for (ti, t_k) in table.temperatures_k.iter().enumerate() {
        print!("{:>10.2}", t_k - 273.15);
        for ai in 0..axis_values.len() {
            print!("  {:>10.4e}", table.get(ti, ai));
        }
        println!();
    }

    Ok(())
}

fn linspace(min: f64, max: f64, steps: usize) -> Vec<f64> {
    if steps == 1 {
        return vec![min];
    }
    (0..steps)
        .map(|i| min + (max - min) * i as f64 / (steps - 1) as f64)
        .collect()
}

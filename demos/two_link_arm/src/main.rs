use clap::Parser;
use colored::Colorize;
use manipulator::{
    ConfigErrors, JointVelocity, ModelConfig, TwoLinkDynamicsModel,
    validation::{CANONICAL_CONFIGURATIONS, Comparison, cross_check},
};
use newton_euler::TwoLinkChain;
use std::{path::PathBuf, process::ExitCode};
use thiserror::Error;
use tolerance::Tolerances;
use tracing::Level;
use utilities::format_pair;

const ARM_RON: &str = include_str!("../resources/arm.ron");

/// Compares closed-form gravity load and velocity coupling torques of a
/// two-link planar arm against recursive Newton-Euler
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Arm description in RON, defaults to unit links with the center of mass at mid-length
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Joint velocity used for the velocity coupling comparison
    #[arg(long, num_args = 2, value_names = ["QD0", "QD1"], default_values_t = [1.0, 1.0], allow_negative_numbers = true)]
    qd: Vec<f64>,
    /// Absolute agreement tolerance
    #[arg(short, long, default_value_t = 1e-9)]
    tolerance: f64,
    /// Write the arm description in use to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum DemoErrors {
    #[error("{0}")]
    Config(#[from] ConfigErrors),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every comparison agreed
fn run(cli: &Cli) -> Result<bool, DemoErrors> {
    let config = match &cli.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::from_ron(ARM_RON)?,
    };

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        println!("wrote arm description to {}", path.display());
        return Ok(true);
    }

    let model = config.build()?;
    let oracle = TwoLinkChain::from(&model);
    let qd = JointVelocity::new(cli.qd[0], cli.qd[1]);
    let tolerances = Tolerances::absolute(cli.tolerance);

    print_parameters(&model);
    let comparisons = cross_check(&model, &oracle, &qd, &tolerances);
    for (quantity, rows) in [
        ("Gravity load", &comparisons[..4]),
        ("Velocity coupling", &comparisons[4..]),
    ] {
        println!();
        if quantity == "Velocity coupling" {
            println!("{} at qd = {}", quantity.bold(), format_pair(qd.to_tuple()));
        } else {
            println!("{}", quantity.bold());
        }
        print_rows(rows);
    }

    println!();
    println!("{}", "Bias torque (gravity + coupling)".bold());
    for (label, q) in CANONICAL_CONFIGURATIONS {
        let tau = model.bias_torque(&q, &qd);
        println!("  {}  {:<24}", label, format_pair(tau.to_tuple()));
    }

    let agreed = comparisons.iter().all(|c| c.agrees);
    println!();
    if agreed {
        println!("{}", "closed form matches recursive Newton-Euler".green());
    } else {
        let n = comparisons.iter().filter(|c| !c.agrees).count();
        println!(
            "{}",
            format!("{} of {} comparisons disagree", n, comparisons.len()).red()
        );
    }
    Ok(agreed)
}

fn print_parameters(model: &TwoLinkDynamicsModel) {
    let (l1, l2) = (model.link1(), model.link2());
    println!(
        "m1 = {}, l1 = {}, lc1 = {}, m2 = {}, l2 = {}, lc2 = {}, g = {}",
        l1.mass,
        l1.length,
        l1.center_of_mass,
        l2.mass,
        l2.length,
        l2.center_of_mass,
        model.environment().gravity
    );
}

fn print_rows(rows: &[Comparison]) {
    println!(
        "  {:<4}{:<24}{:<24}{:<24}",
        "", "q", "closed form", "newton-euler"
    );
    for c in rows {
        let status = if c.agrees {
            "ok".green()
        } else {
            "MISMATCH".red().bold()
        };
        println!(
            "  {:<4}{:<24}{:<24}{:<24}{}",
            c.label,
            format_pair(c.configuration.to_tuple()),
            format_pair(c.closed_form.to_tuple()),
            format_pair(c.reference.to_tuple()),
            status
        );
    }
}

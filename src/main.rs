use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rs_dh_kinematics::jacobian::AxisFrame;
use rs_dh_kinematics::kinematic_traits::Convention;
use rs_dh_kinematics::kinematics_impl::DhKinematics;
use rs_dh_kinematics::parameters_from_file::ChainFile;
use rs_dh_kinematics::utils::{dump_derivatives, dump_frames, dump_jacobian, dump_velocity};
use rs_dh_kinematics::value::Value;

/// Forward kinematics, Jacobian and velocities of a DH chain read from a YAML file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Chain file with `links`, and optionally `joint_rates` and `symbols`
    chain: PathBuf,

    /// DH convention of the Jacobian: a (standard) or d (modified)
    #[arg(long, value_enum, ignore_case = true, default_value_t = Convention::A)]
    convention: Convention,

    /// Frame each Jacobian column is built from: joint (frame i) or previous (frame i-1 in
    /// convention a)
    #[arg(long, value_enum, ignore_case = true, default_value_t = AxisFrame::Joint)]
    axis_frame: AxisFrame,

    /// Symbols to differentiate the end effector position by, comma separated
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Joint rates, one per link, comma separated (numbers or expressions)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    rates: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let file = ChainFile::from_yaml_file(&args.chain)
        .with_context(|| format!("Failed to read chain from {}", args.chain.display()))?;

    let symbols = if args.symbols.is_empty() { file.symbols.clone() } else { args.symbols.clone() };
    let symbols: Vec<&str> = symbols.iter().map(|s| s.trim()).collect();

    let rates = if args.rates.is_empty() {
        file.joint_rates.clone()
    } else {
        let parsed = args
            .rates
            .iter()
            .map(|rate| Value::parse(rate))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid joint rate")?;
        Some(parsed)
    };

    println!("Chain:\n{}", file.chain.to_yaml());
    let robot = DhKinematics::new(file.chain).with_axis_frame(args.axis_frame);
    let analysis = robot
        .analyze(args.convention, rates.as_deref(), &symbols)
        .context("Analysis failed")?;

    for convention in Convention::ALL {
        dump_frames(analysis.frames(convention));
        println!();
    }
    dump_jacobian(&analysis.jacobian);
    if let Some(velocity) = &analysis.velocity {
        println!();
        dump_velocity(velocity);
    }
    if !symbols.is_empty() {
        println!();
        dump_derivatives(&analysis.derivatives);
        println!("Determinant: {}", analysis.determinant);
    }
    Ok(())
}

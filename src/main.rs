//! Demo runner: the operator battery against the reference scheme context.

use clap::Parser;
use homcheck_core::{
    present, Driver, FixtureMode, FixtureSet, PlainScheme, SchemeContext, SchemeParams,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Homomorphic operator consistency harness", long_about = None)]
struct Args {
    /// Run the tests on the fixed vectors [1,2,3,4,5] and [2,2,2,2,2].
    #[arg(short, long)]
    fixed: bool,

    /// Run the tests on random vectors.
    #[arg(short, long)]
    random: bool,

    /// Display a proportion chart of successful versus failed tests.
    #[arg(short, long)]
    graph: bool,

    /// Export the per-test records to a CSV file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Mode resolution happens before any scheme work so a usage error never
    // touches the encryption pipeline.
    let mode = FixtureMode::from_flags(args.fixed, args.random)?;
    let fixtures = FixtureSet::generate_with_thread_rng(mode);

    let params = SchemeParams::default();
    println!("Configuring scheme context with:");
    println!(
        "t = {}, degree = {}, sec = {}, depth budget = {}",
        params.plain_modulus, params.poly_degree, params.security_bits, params.depth_budget
    );
    println!("v1: {:?}", fixtures.chain_a);
    println!("v2: {:?}", fixtures.chain_b);

    let scheme = PlainScheme::configure(params)?;
    let report = Driver::new(&scheme).run(&fixtures)?;
    let summary = report.summary();

    present::print_report(&summary);
    if args.graph {
        present::render_chart(&summary);
    }
    if let Some(path) = &args.csv {
        present::export_csv(&summary, path)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

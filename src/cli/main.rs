#![warn(clippy::all, clippy::pedantic)]

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use csv::{Reader, Writer};
use flownet::algo::feasible_flow::feasible_flow;
use flownet::algo::max_flow::ford_fulkerson;
use flownet::algo::min_cost_flow::minimum_cost_flow;
use flownet::algo::min_flow::minimum_flow;
use flownet::search::{Bfs, Dfs, Widest};
use flownet::{Edge, FlowAssignment, FlowNetwork};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Algorithm {
    MaxFlow,
    FeasibleFlow,
    MinCostFlow,
    MinFlow,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Strategy {
    Bfs,
    Dfs,
    Widest,
}

/// Runs a flow engine over an edge-list CSV and writes the resulting flow
/// assignment as CSV to stdout.
#[derive(Parser, Debug)]
#[command(name = "flownet-cli", version)]
struct Args {
    /// Edge-list CSV with columns from,to,capacity,cost,lower_bound;
    /// an empty capacity cell means unbounded
    input: PathBuf,

    #[arg(long)]
    source: u64,

    #[arg(long)]
    sink: u64,

    #[arg(long, value_enum, default_value_t = Algorithm::MaxFlow)]
    algorithm: Algorithm,

    /// Augmenting-path strategy (ignored by min-cost-flow, which picks its
    /// own cost-aware searches)
    #[arg(long, value_enum, default_value_t = Strategy::Bfs)]
    strategy: Strategy,

    /// Exact flow value for min-cost-flow; maximum if omitted
    #[arg(long)]
    target: Option<i64>,

    /// Log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn read_network(path: &PathBuf) -> Result<FlowNetwork<u64, i64>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut network = FlowNetwork::new();
    for record in reader.deserialize() {
        let edge: Edge<u64, i64> = record?;
        network.add_edge(edge).map_err(|e| e.to_string())?;
    }
    Ok(network)
}

fn run(
    network: &FlowNetwork<u64, i64>,
    args: &Args,
) -> Result<(FlowAssignment<u64, i64>, String), flownet::Error> {
    let (source, sink) = (args.source, args.sink);
    match args.algorithm {
        Algorithm::MaxFlow => {
            let outcome = match args.strategy {
                Strategy::Bfs => ford_fulkerson(network, source, sink, &mut Bfs, None),
                Strategy::Dfs => ford_fulkerson(network, source, sink, &mut Dfs, None),
                Strategy::Widest => ford_fulkerson(network, source, sink, &mut Widest, None),
            }?;
            let summary = format!("maximum flow value: {}", outcome.value);
            Ok((outcome.flow, summary))
        }
        Algorithm::FeasibleFlow => {
            let outcome = match args.strategy {
                Strategy::Bfs => feasible_flow(network, source, sink, &mut Bfs),
                Strategy::Dfs => feasible_flow(network, source, sink, &mut Dfs),
                Strategy::Widest => feasible_flow(network, source, sink, &mut Widest),
            }?;
            let summary = format!("feasible flow value: {}", outcome.value);
            Ok((outcome.flow, summary))
        }
        Algorithm::MinCostFlow => {
            let outcome = minimum_cost_flow(network, source, sink, args.target)?;
            let summary = format!(
                "minimum-cost flow value: {}, cost: {}",
                outcome.value, outcome.cost
            );
            Ok((outcome.flow, summary))
        }
        Algorithm::MinFlow => {
            let outcome = match args.strategy {
                Strategy::Bfs => minimum_flow(network, source, sink, &mut Bfs),
                Strategy::Dfs => minimum_flow(network, source, sink, &mut Dfs),
                Strategy::Widest => minimum_flow(network, source, sink, &mut Widest),
            }?;
            let summary = format!("minimum flow value: {}", outcome.value);
            Ok((outcome.flow, summary))
        }
    }
}

fn write_flow(flow: &FlowAssignment<u64, i64>) -> Result<(), Box<dyn Error>> {
    let mut writer = Writer::from_writer(io::stdout());
    writer.write_record(["from", "to", "flow"])?;
    for ((u, v), f) in flow.iter().filter(|(_, f)| **f != 0) {
        writer.write_record([u.to_string(), v.to_string(), f.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let network = read_network(&args.input)?;
    let (flow, summary) = run(&network, &args).map_err(|e| e.to_string())?;
    write_flow(&flow)?;
    log::info!("{summary}");
    Ok(())
}

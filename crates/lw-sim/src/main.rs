//! lwsim — Lucky Wood batch spin simulator CLI

use clap::Parser;

use lw_sim::{SimConfig, run};

#[derive(Debug, Parser)]
#[command(name = "lwsim", about = "Batch spin simulator for the Lucky Wood slot engine")]
struct Args {
    /// Independent sessions to run
    #[arg(long, default_value_t = 8)]
    sessions: u32,

    /// Spins per session
    #[arg(long, default_value_t = 10_000)]
    spins: u32,

    /// Base RNG seed (session i uses seed + i)
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Bet per line
    #[arg(long, default_value_t = 0.05)]
    bet_per_line: f64,

    /// Active paylines (1-20)
    #[arg(long, default_value_t = 20)]
    paylines: u8,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = SimConfig {
        sessions: args.sessions,
        spins_per_session: args.spins,
        seed: args.seed,
        bet_per_line: args.bet_per_line,
        paylines: args.paylines,
    };

    let report = run(&config);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };

    match json {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("failed to serialize report: {err}");
            std::process::exit(1);
        }
    }
}

mod cli;
mod commands;

use cli::{CheckParams, DumpParams, ExpandParams, build_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            init_logging(m.get_count("verbose"));
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("expand", m)) => {
            init_logging(m.get_count("verbose"));
            let params = ExpandParams::from_matches(m);
            commands::expand::run(params.into());
        }
        Some(("dump", m)) => {
            init_logging(m.get_count("verbose"));
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `QUERYCHECK_LOG` overrides the level picked by `-v`.
fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env("QUERYCHECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

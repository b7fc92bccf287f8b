use clap::Parser;
use tracing_subscriber::EnvFilter;
use wireframe_replay::cli::commands::{cmd_diff, cmd_flatten, cmd_record};
use wireframe_replay::cli::config::{Cli, Commands, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Record {
            input,
            output,
            full_snapshot_interval_ms,
        } => {
            let written = cmd_record(&input, output.as_deref(), full_snapshot_interval_ms, &config)?;
            if cli.verbose > 0 {
                eprintln!("Wrote {} record bundles", written);
            }
        }
        Commands::Diff { old, new } => match cmd_diff(&old, &new, config.output.pretty)? {
            Some(json) => println!("{}", json),
            None => eprintln!("No changes"),
        },
        Commands::Flatten { input } => {
            println!("{}", cmd_flatten(&input, config.output.pretty)?);
        }
    }

    Ok(())
}

/// Logs go to stderr so they never mix with records on stdout.
/// `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use clap::{Parser, Subcommand};
use ndnc::{analyzer::parse_source, config::NdncConfig, runtime::Runner, Error};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interpret and run a script
    Run {
        source: PathBuf,

        /// Forwarder address, e.g. unix:///run/nfd/nfd.sock or tcp://127.0.0.1:6363
        #[arg(long, env = "NDN_CLIENT_TRANSPORT")]
        face: Option<String>,

        /// Never open a session; interests use local or synthetic data
        #[arg(long)]
        offline: bool,
    },
}

fn load_config(cli: &Cli) -> Result<NdncConfig, Error> {
    let config = match &cli.config {
        Some(path) => NdncConfig::from_file(path)?,
        None => NdncConfig::default(),
    };
    debug!("config: {:?}", config);
    Ok(config)
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let mut config = load_config(cli)?;
    let Command::Run {
        source,
        face,
        offline,
    } = &cli.command;
    if let Some(face) = face {
        config.face = face.clone();
    }

    let script = std::fs::read_to_string(source).map_err(|e| Error::Io {
        path: source.display().to_string(),
        source: e,
    })?;
    let program = parse_source(&script)?;

    let runner = if *offline {
        Runner::offline(&config)
    } else {
        Runner::new(&config)
    };
    let mut stdout = std::io::stdout().lock();
    let report = runner.run(&program, &mut stdout).await?;
    debug!(mode = %report.mode, degraded = report.degraded, "run finished");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

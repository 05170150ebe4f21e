use clap::Parser;
use convoy::commands;
use convoy::Shutdown;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt};

/// Distance, ETA and deployment simulation for the transport fleet
#[derive(clap::Parser)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct Opts {
    /// A level of verbosity, and can be used multiple times
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Parser)]
enum Command {
    Route(commands::route::Opts),
    Simulate(commands::simulate::Opts),
    Routes(commands::routes::Opts),
    Report(commands::report::Opts),
}

#[tokio::main]
async fn main() {
    // settings such as CONVOY_SPEED_KMH may come from a .env file
    let dotenv = dotenv::dotenv();

    let opts: Opts = Opts::parse();
    let max_level = match opts.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(filter::filter_fn(move |m| {
            m.target().starts_with("convoy") && m.level() <= &max_level
        }))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    // shutdown gracefully on CTRL+C
    let shutdown = Shutdown::new();
    let shutdown_handle = shutdown.handle();
    tokio::task::spawn(async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for CTRL+C");
            return;
        }
        shutdown.shutdown().await;
    });

    let result = match opts.command {
        Command::Route(opts) => commands::route::execute(opts),
        Command::Simulate(opts) => commands::simulate::execute(opts, shutdown_handle).await,
        Command::Routes(opts) => commands::routes::execute(opts),
        Command::Report(opts) => commands::report::execute(opts),
    };

    if let Err(err) = result {
        tracing::error!(%err, "command failed");
        std::process::exit(1);
    }
}

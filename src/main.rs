use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tickctl::{
    ConfigDraft, ConfigPatch, ConfigStore, Dispatcher, HttpGateway, Poller, LOG_PERIOD,
    TICKET_COUNT_PERIOD,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tickctl", version, about = "Supervise a remote ticket-issuing simulation")]
struct Cli {
    /// Base URL of the simulation engine API.
    #[arg(long, default_value = "http://localhost:8080/api/tickets")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a configuration and submit it to the engine.
    Submit(ConfigArgs),
    /// Start the simulation.
    Start,
    /// Stop the simulation.
    Stop,
    /// Reset the engine and the local configuration.
    Reset,
    /// Persist a configuration on the engine side.
    Save(ConfigArgs),
    /// Fetch the engine's saved configuration.
    Load,
    /// Poll the live ticket count and event log until interrupted.
    Watch,
}

#[derive(Args)]
struct ConfigArgs {
    #[arg(long)]
    total_tickets: Option<u64>,
    #[arg(long)]
    max_ticket_capacity: Option<u64>,
    #[arg(long)]
    ticket_release_rate: Option<u64>,
    #[arg(long)]
    customer_retrieval_rate: Option<u64>,
    #[arg(long)]
    release_interval: Option<u64>,
    #[arg(long)]
    retrieval_interval: Option<u64>,
    #[arg(long)]
    no_of_vendors: Option<u64>,
    #[arg(long)]
    no_of_customers: Option<u64>,
}

impl ConfigArgs {
    fn draft(&self) -> ConfigDraft {
        ConfigDraft {
            total_tickets: self.total_tickets,
            max_ticket_capacity: self.max_ticket_capacity,
            ticket_release_rate: self.ticket_release_rate,
            customer_retrieval_rate: self.customer_retrieval_rate,
            release_interval: self.release_interval,
            retrieval_interval: self.retrieval_interval,
            no_of_vendors: self.no_of_vendors,
            no_of_customers: self.no_of_customers,
        }
    }

    fn patch(&self) -> ConfigPatch {
        ConfigPatch {
            total_tickets: self.total_tickets,
            max_ticket_capacity: self.max_ticket_capacity,
            ticket_release_rate: self.ticket_release_rate,
            customer_retrieval_rate: self.customer_retrieval_rate,
            release_interval: self.release_interval,
            retrieval_interval: self.retrieval_interval,
            no_of_vendors: self.no_of_vendors,
            no_of_customers: self.no_of_customers,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let store = ConfigStore::new();
    let gateway = HttpGateway::new(&cli.base_url);
    let dispatcher = Dispatcher::new(gateway.clone(), store.clone());

    match cli.command {
        Command::Submit(args) => println!("{}", dispatcher.submit(&args.draft()).await?),
        Command::Start => println!("{}", dispatcher.start().await?),
        Command::Stop => println!("{}", dispatcher.stop().await?),
        Command::Reset => println!("{}", dispatcher.reset().await?),
        Command::Save(args) => {
            store.set(&args.patch());
            println!("{}", dispatcher.save_config().await?);
        }
        Command::Load => {
            let config = dispatcher.load_config().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Watch => watch(gateway).await,
    }

    Ok(())
}

/// Run both synchronizers, printing every update until Ctrl-C.
async fn watch(gateway: HttpGateway) {
    let counts = Poller::ticket_counts(gateway.clone(), TICKET_COUNT_PERIOD);
    let logs = Poller::logs(gateway, LOG_PERIOD);

    let mut count_rx = counts.subscribe();
    let mut log_rx = logs.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Ok(()) = count_rx.changed() => {
                println!("tickets available: {}", *count_rx.borrow_and_update());
            }
            Ok(()) = log_rx.changed() => {
                for line in log_rx.borrow_and_update().iter() {
                    println!("{line}");
                }
            }
        }
    }

    counts.stop();
    logs.stop();
}

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bmdl_modeler::api;
use bmdl_modeler::db::{seed, DocumentStore};

#[derive(Parser)]
#[command(name = "bmdl")]
#[command(about = "Business-model variability modeling on a feature-model formalism")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the modeler server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Reset the document store to the canned example models
    Seed,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "bmdl_modeler=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let store = DocumentStore::open_default()?;
    store.migrate()?;

    let app = api::create_router(store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("bmdl-modeler listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => serve(port).await?,
        Some(Commands::Seed) => {
            let store = DocumentStore::open_default()?;
            store.migrate()?;

            let seeds = seed::example_documents()?;
            let inserted = store.destroy_and_reseed(seeds)?;
            for model in &inserted {
                tracing::info!("Seeded \"{}\" ({})", model.name, model.id);
            }
            println!("Seeded {} example model(s)", inserted.len());
        }
        None => serve(3000).await?,
    }

    Ok(())
}

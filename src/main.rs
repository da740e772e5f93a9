use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use launchpad::config::AppConfig;
use launchpad::models::LaunchId;
use launchpad::pagination::{Feed, FixtureSource};
use launchpad::render::render_tiles;
use launchpad::resolvers::{toggle_reservation, LocalQueryField, LocalResolvers};
use launchpad::store::{self, LocalStore, TokenStore};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Browse launches and manage a local cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page through a launch catalog and print it
    Browse {
        /// JSON array of launches to serve
        #[arg(short, long)]
        catalog: PathBuf,

        /// Number of pages to load
        #[arg(short, long, default_value = "1")]
        pages: usize,

        /// Toggle these launch ids in the cart before printing
        #[arg(short, long)]
        reserve: Vec<String>,
    },
    /// Toggle launch ids in the cart, printing the cart after each step
    Cart {
        ids: Vec<String>,
    },
    /// Store a login token
    Login {
        #[arg(short, long)]
        token: String,
    },
    /// Remove the stored login token
    Logout,
    /// Show whether a login token is stored
    Status,
}

/// Initialize tracing with output to stderr so stdout carries only results
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "launchpad=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::load();
    config.validate()?;

    let tokens = match &config.token_path {
        Some(path) => TokenStore::new(path),
        None => TokenStore::default_location()?,
    };

    let local = LocalStore::new();
    local.initialize(store::seed_state(&tokens, config.seed_cart.clone()))?;
    let resolvers = LocalResolvers::new(local.clone());

    match cli.command {
        Commands::Browse {
            catalog,
            pages,
            reserve,
        } => {
            let source = FixtureSource::from_file(&catalog)
                .with_context(|| format!("Failed to load catalog {}", catalog.display()))?;
            tracing::info!("Loaded {} launches from {}", source.len(), catalog.display());

            let feed = Feed::new(source, config.page_size)?;
            let loaded = feed.load_pages(pages).await?;
            tracing::info!("Loaded {} page(s)", loaded);

            for id in reserve {
                toggle_reservation(&LaunchId::from(id), &local);
            }

            print!("{}", render_tiles(&feed.snapshot(), &resolvers));
        }
        Commands::Cart { ids } => {
            for id in ids {
                let cart = resolvers.mutate_named(
                    "addOrRemoveFromCart",
                    &serde_json::json!({ "id": id }),
                )?;
                println!("{} -> {}", id, cart);
            }
        }
        Commands::Login { token } => {
            store::login(&local, &tokens, &token)?;
            println!("Logged in (token at {})", tokens.path().display());
        }
        Commands::Logout => {
            store::logout(&local, &tokens)?;
            println!("Logged out");
        }
        Commands::Status => {
            let logged_in = resolvers.read_local(LocalQueryField::IsLoggedIn);
            println!("isLoggedIn: {}", logged_in);
        }
    }

    Ok(())
}

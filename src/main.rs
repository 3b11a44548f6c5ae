use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saved_homes::ledger::{update_interaction, FileLedgerStore, LedgerStore};
use saved_homes::{CancellationToken, Config, Interaction, PropertyId, SavedHomes, UserId};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "saved-homes", about = "Inspect and update saved homes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show a user's saved homes
    List {
        /// Omit to list as a signed-out user
        #[arg(long)]
        user: Option<String>,
        /// Only loved homes
        #[arg(long)]
        loved: bool,
        /// Also write the list as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Mark a home as liked
    Like {
        #[arg(long)]
        user: String,
        id: String,
    },
    /// Mark a home as loved
    Love {
        #[arg(long)]
        user: String,
        id: String,
    },
    /// Move a loved home back to liked
    Unlove {
        #[arg(long)]
        user: String,
        id: String,
    },
    /// Dump the raw ledger rows for a user
    Ledger {
        #[arg(long)]
        user: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List { user, loved, json } => {
            let config = Config::from_env().context("Failed to load configuration")?;
            list(&config, user.map(UserId::new), loved, json).await
        }
        Command::Like { user, id } => mark(&user, &id, Interaction::like).await,
        Command::Love { user, id } => mark(&user, &id, Interaction::love).await,
        Command::Unlove { user, id } => mark(&user, &id, Interaction::unlove).await,
        Command::Ledger { user } => show_ledger(&Config::ledger_dir_from_env(), &user).await,
    }
}

async fn list(
    config: &Config,
    user: Option<UserId>,
    loved: bool,
    json: Option<PathBuf>,
) -> Result<()> {
    let mut homes =
        SavedHomes::from_config(config, user).context("Failed to create listings client")?;
    homes.set_filter(loved);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let reconciled = homes.refresh(&cancel).await.context("Refresh cancelled")?;
    let visible = homes.visible();
    info!(
        "Loaded {} saved homes ({} placeholders), showing {}",
        reconciled.properties.len(),
        reconciled.placeholders,
        visible.len()
    );

    for (i, property) in visible.iter().enumerate() {
        let heart = if property.loved { "♥" } else { " " };
        println!("{}. {} {} (${})", i + 1, heart, property.address, property.price);
        println!(
            "   {} bd, {} ba, {} sqft - {}",
            property.beds, property.baths, property.sqft, property.status
        );
        if let Some(year) = property.year_built {
            println!("   Built: {}", year);
        }
        if let Some(office) = &property.listing_office {
            println!("   Office: {}", office);
        }
        println!("   ID: {}", property.id);
        if property.is_placeholder {
            println!("   (listing unavailable, placeholder data)");
        }
        println!();
    }

    if let Some(path) = json {
        let out = serde_json::to_string_pretty(&visible)?;
        tokio::fs::write(&path, out)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} homes to {}", visible.len(), path.display());
    }

    Ok(())
}

async fn mark(user: &str, id: &str, transition: fn(Interaction) -> Interaction) -> Result<()> {
    let store = FileLedgerStore::new(Config::ledger_dir_from_env());
    let state = update_interaction(&store, &UserId::new(user), &PropertyId::new(id), transition)
        .await
        .context("Failed to update ledger")?;
    println!("{} is now {:?}", id, state);
    Ok(())
}

async fn show_ledger(dir: &Path, user: &str) -> Result<()> {
    let store = FileLedgerStore::new(dir);
    let Some(document) = store
        .load(&UserId::new(user))
        .await
        .context("Failed to read ledger")?
    else {
        println!("No ledger for {} in {}", user, dir.display());
        return Ok(());
    };

    for entry in document.entries() {
        println!("{:?}\t{}\t{}", entry.kind, entry.position, entry.id);
    }
    Ok(())
}

use agora_core::config::RootConfig;
use agora_core::directory::{GenderFilter, ProfileTypeFilter};
use agora_infrastructure::ConfigService;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "agora")]
#[command(about = "Agora CLI - browse the voter directory and top rankings", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/agora/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed file to serve profiles from, overriding `store.seed_path`
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one directory page, most recent voters first
    Page {
        /// any, male, female, other or prefer_not
        #[arg(long, default_value = "any")]
        gender: GenderFilter,

        /// all, public or politician
        #[arg(long = "type", default_value = "all")]
        profile_type: ProfileTypeFilter,

        /// Defaults to `directory.default_page_size`
        #[arg(long)]
        page_size: Option<usize>,

        /// `next_cursor` of the previous page
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Rank opted-in profiles by top score
    Top {
        /// Rank politicians only
        #[arg(long)]
        politicians: bool,

        /// Defaults to `directory.top_default_limit`
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show a single profile
    Profile {
        /// Profile document id
        id: String,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the default location falls back to
    // defaults, reported once logging is up.
    let (mut config, default_load_error) = match &cli.config {
        Some(path) => (commands::utils::load_explicit_config(path)?, None),
        None => match ConfigService::new().try_get_config() {
            Ok(config) => (config, None),
            Err(e) => (RootConfig::default(), Some(e)),
        },
    };
    if let Some(seed) = cli.seed {
        config.store.seed_path = Some(seed);
    }

    init_tracing(&config.logging.level);
    if let Some(e) = default_load_error {
        tracing::warn!(error = %e, "Failed to load configuration, using defaults");
    }
    tracing::debug!(
        seed = ?config.store.seed_path,
        collection = %config.store.collection,
        "Configuration loaded"
    );
    let service = commands::utils::build_service(&config).await?;

    match cli.command {
        Commands::Page {
            gender,
            profile_type,
            page_size,
            cursor,
        } => commands::page::run(&service, gender, profile_type, page_size, cursor).await?,
        Commands::Top { politicians, limit } => {
            commands::top::run(&service, politicians, limit).await?
        }
        Commands::Profile { id } => commands::profile::run(&service, &id).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::profile::Gender;

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::try_parse_from([
            "agora",
            "--seed",
            "demos/seed.json",
            "page",
            "--gender",
            "Female",
            "--type",
            "politician",
            "--page-size",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(PathBuf::from("demos/seed.json")));
        match cli.command {
            Commands::Page {
                gender,
                profile_type,
                page_size,
                cursor,
            } => {
                assert_eq!(gender, GenderFilter::Only(Gender::Female));
                assert_eq!(profile_type, ProfileTypeFilter::Politician);
                assert_eq!(page_size, Some(5));
                assert!(cursor.is_none());
            }
            _ => panic!("expected page command"),
        }
    }

    #[test]
    fn test_parse_top_defaults() {
        let cli = Cli::try_parse_from(["agora", "top"]).unwrap();
        match cli.command {
            Commands::Top { politicians, limit } => {
                assert!(!politicians);
                assert!(limit.is_none());
            }
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["agora", "page", "--type", "celebrity"]).is_err());
    }
}

// ABOUTME: Recipe CLI - command-line front end for the recipe catalog backend
// ABOUTME: Handles schema migration, recipe resolution, external search, and user creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Create the schema
//! recipe-cli migrate
//!
//! # Previews for a mix of local and external ids (output keeps this order)
//! recipe-cli preview 1 716429 2
//!
//! # Full recipe with ingredients and numbered steps
//! recipe-cli details 716429
//!
//! # External search
//! recipe-cli search pasta --limit 10 --diet vegetarian --sort popularity
//!
//! # Register a user
//! recipe-cli user create --username tomer --password secret --email t@example.com
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use recipe_catalog::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    errors::{AppError, AppResult},
    external::SpoonacularClient,
    logging::LoggingConfig,
    models::NewUser,
    services::RecipeCatalog,
};
use std::sync::Arc;
use tracing::info;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "recipe-cli",
    about = "Recipe Catalog CLI",
    long_about = "Command-line tool for the recipe catalog: resolve local and external recipes, search, and manage users."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create or update the database schema
    Migrate,

    /// Resolve recipe previews, local first then external
    Preview {
        /// Recipe ids (malformed ids are skipped)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Resolve the full detail of one recipe
    Details {
        /// Recipe id
        id: String,
    },

    /// Search the external recipe API
    Search {
        /// Free-text query
        query: String,

        /// Number of results (defaults to DEFAULT_SEARCH_LIMIT)
        #[arg(long)]
        limit: Option<u32>,

        /// Cuisine filter
        #[arg(long)]
        cuisine: Option<String>,

        /// Diet filter
        #[arg(long)]
        diet: Option<String>,

        /// Intolerances filter (comma-separated)
        #[arg(long)]
        intolerances: Option<String>,

        /// Sort order: popularity or time
        #[arg(long)]
        sort: Option<String>,
    },

    /// Pick a random recipe
    Random,

    /// User management commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum UserCommand {
    /// Register a new user
    Create {
        /// Unique username
        #[arg(long)]
        username: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Given name
        #[arg(long, default_value = "")]
        firstname: String,

        /// Family name
        #[arg(long, default_value = "")]
        lastname: String,

        /// Country
        #[arg(long, default_value = "")]
        country: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Profile picture URL
        #[arg(long)]
        profile_pic: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    if matches!(cli.command, Command::Migrate) {
        info!("Running database migrations...");
        database.migrate().await?;
        println!("Database schema is up to date: {}", config.database.url);
        return Ok(());
    }

    let client = SpoonacularClient::new(config.spoonacular.clone())?;
    let catalog = RecipeCatalog::new(&database, Arc::new(client), config.catalog);

    match cli.command {
        Command::Migrate => {}
        Command::Preview { ids } => commands::recipes::preview(&catalog, ids).await?,
        Command::Details { id } => commands::recipes::details(&catalog, &id).await?,
        Command::Search {
            query,
            limit,
            cuisine,
            diet,
            intolerances,
            sort,
        } => {
            commands::recipes::search(&catalog, query, limit, cuisine, diet, intolerances, sort)
                .await?;
        }
        Command::Random => commands::recipes::random(&catalog).await?,
        Command::User { action } => match action {
            UserCommand::Create {
                username,
                password,
                firstname,
                lastname,
                country,
                email,
                profile_pic,
            } => {
                let user = NewUser {
                    username,
                    firstname,
                    lastname,
                    country,
                    email,
                    password,
                    profile_pic,
                };
                commands::user::create(&catalog, user).await?;
            }
        },
    }

    Ok(())
}

use anyhow::Result;
use application::config::AppConfig;
use application::{open_db, AiModels, AppError, CatCircleApp};
use clap::{Parser, Subcommand};
use common::{init_structured_logging, LoggingConfig};
use domain::constants::{CAT_BREEDS, CAT_PERSONALITIES, HEALTH_TAGS};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod progress;
mod render;

use progress::{with_spinner, ProgressType};

#[derive(Parser)]
#[command(name = "catcircle")]
#[command(about = "🐾 CatCircle - social network for cat owners")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to ./catcircle.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file, `:memory:` for a throwaway session
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the local database and show what was loaded
    Init,
    /// Sign in with an account name or email
    Login {
        identifier: String,
        /// Bearer token for a remote backend
        #[arg(long)]
        token: Option<String>,
    },
    /// Create an account with its first cat
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        cat: String,
        #[arg(long, default_value = "")]
        breed: String,
    },
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// Show the feed, optionally filtered (`#tag` or free text)
    Feed {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Publish a post (+10 coins)
    Post {
        content: String,
        /// daily, care_tips or problem
        #[arg(short = 't', long = "type", default_value = "daily", value_parser = commands::parse_post_type)]
        post_type: domain::PostType,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        cat: Option<String>,
        #[arg(long)]
        media: Option<String>,
        #[arg(long)]
        community: Option<String>,
    },
    Like {
        post_id: String,
    },
    Comment {
        post_id: String,
        text: String,
    },
    /// Tip coins to a post
    Tip {
        post_id: String,
        amount: u64,
    },
    /// Follow or unfollow an owner
    Follow {
        owner_id: String,
    },
    /// Recommended owners to connect with
    Matches,
    /// Ask the AI assistant (interactive when no question is given)
    Ask {
        question: Option<String>,
    },
    /// Ask the assistant and share the advice to the feed
    Share {
        question: String,
    },
    /// Polish a post with AI before publishing
    Draft {
        content: String,
        #[arg(short = 't', long = "type", default_value = "daily", value_parser = commands::parse_post_type)]
        post_type: domain::PostType,
        /// Cute, Witty, Pro or Story
        #[arg(short, long, default_value = "Cute")]
        style: application::DraftStyle,
        /// Publish the polished text
        #[arg(long)]
        publish: bool,
    },
    /// Classify a concern as health or behavior
    Triage {
        query: String,
    },
    /// Browse the Cat Mall
    Products,
    /// Buy a product with coins or a card
    Buy {
        product_id: String,
        #[arg(long, conflicts_with_all = ["card_name", "card_number"])]
        coins: bool,
        #[arg(long)]
        card_name: Option<String>,
        #[arg(long)]
        card_number: Option<String>,
    },
    /// Rate a product 1-5
    Review {
        product_id: String,
        rating: u8,
        #[arg(default_value = "")]
        comment: String,
    },
    /// Buy a coin pack (500, 1200, 3000 or 7000)
    Topup {
        coins: u64,
        #[arg(long)]
        card_name: String,
        #[arg(long)]
        card_number: String,
    },
    /// Purchase history
    Purchases,
    /// List chats, show one, or send a direct message
    Chat {
        peer_id: Option<String>,
        message: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Show or post to a community group chat
    Group {
        community_id: String,
        message: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    Communities {
        /// Only communities you belong to
        #[arg(long)]
        mine: bool,
    },
    #[command(name = "community-create")]
    CommunityCreate {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Join a community (or leave it with --leave)
    Join {
        community_id: String,
        #[arg(long)]
        leave: bool,
    },
    /// Show or edit the profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// Comma-separated interests
        #[arg(long, value_delimiter = ',')]
        interests: Option<Vec<String>>,
    },
    /// Add a cat to the signed-in account
    #[command(name = "cat-add", after_help = vocabulary_help())]
    CatAdd {
        name: String,
        /// Listed breeds are matched ignoring case; others are kept as typed
        #[arg(long, default_value = "")]
        breed: String,
        #[arg(long, default_value_t = 1)]
        age: u32,
        #[arg(long)]
        male: bool,
        #[arg(long)]
        neutered: bool,
        #[arg(long = "trait")]
        personality: Vec<String>,
        #[arg(long = "health")]
        health_tags: Vec<String>,
    },
    #[command(name = "cat-remove")]
    CatRemove {
        cat_id: String,
    },
    /// Verify the Gemini API key
    #[command(name = "check-key")]
    CheckKey,
}

fn vocabulary_help() -> String {
    format!(
        "Breeds: {}\nTraits: {}\nHealth tags: {}",
        CAT_BREEDS.join(", "),
        CAT_PERSONALITIES.join(", "),
        HEALTH_TAGS.join(", ")
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = match e.downcast_ref::<AppError>() {
                Some(app_error) => {
                    tracing::debug!(category = app_error.category(), error = %app_error, "Command failed");
                    app_error.user_message()
                }
                None => format!("{:#}", e),
            };
            render::error(&message);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (mut config, rejected_overrides) = AppConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.storage.database_path = (db.as_os_str() != ":memory:").then_some(db);
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_structured_logging(
        LoggingConfig::default()
            .with_level_name(level)
            .with_json(config.logging.json),
    )?;
    for rejected in &rejected_overrides {
        rejected.log();
    }

    if let Commands::CheckKey = cli.command {
        return commands::assistant::check_key(&config).await;
    }

    let db = open_db(&config.storage)?;
    let ai = AiModels::gemini(&config.assistant)?;
    let mut app = with_spinner(
        ProgressType::Api,
        "Loading CatCircle...",
        CatCircleApp::boot(config, db, ai),
    )
    .await?;

    commands::dispatch(&mut app, cli.command).await
}

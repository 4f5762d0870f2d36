use std::path::PathBuf;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;

mod config;
mod dates;
mod db;
mod entries;
mod error;
mod nutrition;
mod photos;
mod profile;
mod recommend;
mod report;
mod state;
mod storage;

use crate::config::{AppConfig, LogFormat};
use crate::entries::{services::record_entry, MealType, NewEntry};
use crate::error::ValidationError;
use crate::profile::{GoalUpdate, UserProfile};
use crate::report::build_daily_report;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "foodie-tracker")]
#[command(about = "Log meals, track daily nutrition against your goal, get simple suggestions")]
struct Cli {
    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the daily summary and entries grouped by meal
    Today {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<String>,
        /// Print the whole report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a food entry
    Add {
        #[arg(long)]
        name: String,
        /// Energy in kcal
        #[arg(long)]
        calories: Option<String>,
        #[arg(long, default_value = "lunch")]
        meal: MealType,
        #[arg(long)]
        portion: Option<String>,
        /// Grams; non-numeric input counts as 0
        #[arg(long)]
        protein: Option<String>,
        #[arg(long)]
        carbs: Option<String>,
        #[arg(long)]
        fat: Option<String>,
        /// Image file to attach
        #[arg(long, value_name = "PATH")]
        photo: Option<PathBuf>,
    },
    /// Delete an entry by id
    Delete { id: String },
    /// Show recommendations and suggested foods
    Recommend {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<String>,
    },
    /// Show or change the daily goal
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// Dump the raw entries as JSON
    List {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    Show,
    Set {
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        protein: Option<f64>,
        #[arg(long)]
        carbs: Option<f64>,
        #[arg(long)]
        fat: Option<f64>,
    },
}

fn parse_date_arg(s: &str) -> Result<String, ValidationError> {
    dates::parse_date_key(s).map(|_| s.trim().to_string())
}

fn init_tracing(format: LogFormat) {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "foodie_tracker=warn,sqlx=warn".to_string());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.with_target(false).json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    init_tracing(config.log_format);

    let state = AppState::init(config).await?;
    tracing::debug!(database_url = %state.config.database_url, "store opened");
    let result = run(&state, cli.command).await;
    state.close().await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "command failed");
    }
    result
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Today { date, json } => {
            let date = date.unwrap_or_else(dates::today_key);
            if json {
                let report = build_daily_report(&state.store, &date).await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_day(state, &date).await?;
            }
        }
        Command::Add {
            name,
            calories,
            meal,
            portion,
            protein,
            carbs,
            fat,
            photo,
        } => {
            let photo = match photo {
                Some(path) => Some(photos::load_photo(&path).await?.to_data_url()),
                None => None,
            };
            let form = NewEntry {
                name,
                meal_type: meal,
                portion,
                calories,
                protein,
                carbs,
                fat,
                photo,
            };
            let entry = record_entry(&state.store, form, OffsetDateTime::now_utc()).await?;
            println!("Added {} ({}).\n", entry.name, entry.id);
            print_day(state, &entry.date).await?;
        }
        Command::Delete { id } => {
            let date = state
                .store
                .find_entry(&id)
                .await?
                .map(|e| e.date)
                .unwrap_or_else(dates::today_key);
            let removed = state.store.delete_entry(&id).await?;
            if removed == 0 {
                println!("No entry with id {id}.\n");
            } else {
                println!("Entry deleted.\n");
            }
            print_day(state, &date).await?;
        }
        Command::Recommend { date } => {
            let date = date.unwrap_or_else(dates::today_key);
            let report = build_daily_report(&state.store, &date).await?;
            print!("{}", report.advice());
        }
        Command::Goal { action } => {
            let current = state.store.profile_or_default().await?;
            let profile = match action {
                GoalAction::Show => current,
                GoalAction::Set {
                    calories,
                    protein,
                    carbs,
                    fat,
                } => {
                    let update = GoalUpdate {
                        calories,
                        protein,
                        carbs,
                        fat,
                    };
                    let profile = UserProfile {
                        daily_goal: update.apply(current.daily_goal)?,
                        preferences: current.preferences,
                    };
                    state.store.save_profile(&profile).await?;
                    profile
                }
            };
            let g = profile.daily_goal;
            println!(
                "Daily goal: {} kcal · protein {}g · carbs {}g · fat {}g",
                g.calories, g.protein, g.carbs, g.fat
            );
        }
        Command::List { date } => {
            let entries = match date {
                Some(date) => state.store.list_entries_by_date(&date).await?,
                None => state.store.list_entries().await?,
            };
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

/// Always re-reads the store; there is no cached view to patch.
async fn print_day(state: &AppState, date: &str) -> anyhow::Result<()> {
    let report = build_daily_report(&state.store, date).await?;
    let today = OffsetDateTime::now_utc().date();
    print!("{}\n{}", report.summary(today), report.entries());
    Ok(())
}

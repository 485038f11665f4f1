//! ptplan - Physical-therapy daily plan generator
//!
//! Picks today's exercises per body region and tracks session weights.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ptplan::config::{CATALOG_ENV, Config, DAY_ENV};
use ptplan::exercises::{Category, format_weight};
use ptplan::session::Session;
use ptplan::tui::App;

#[derive(Parser)]
#[command(name = "ptplan")]
#[command(author, version, about = "Physical-therapy daily plan generator")]
struct Cli {
    /// JSON catalog file (defaults to the built-in exercises)
    #[arg(long, global = true, env = CATALOG_ENV)]
    catalog: Option<PathBuf>,

    /// Session day label (defaults to today, YYYY-MM-DD)
    #[arg(long, global = true, env = DAY_ENV)]
    day: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI
    Tui,

    /// Generate today's plan and print it
    Plan {
        /// Fixed RNG seed for a reproducible plan
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List exercises by category
    Exercises {
        /// Include inactive exercises
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Serialize)]
struct PlanEntry<'a> {
    id: &'a str,
    name: &'a str,
    category: Category,
    weight: f64,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
    day: &'a str,
    exercises: Vec<PlanEntry<'a>>,
    notices: Vec<String>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.catalog, cli.day);
    let session = Session::new(config.load_catalog()?, config.day_label());

    match cli.command {
        Some(Commands::Plan { seed, json }) => print_plan(session, seed, json)?,

        Some(Commands::Exercises { all }) => print_exercises(&session, all),

        Some(Commands::Tui) | None => {
            let mut app = App::new(session);
            app.run()?;
        }
    }

    Ok(())
}

fn print_plan(mut session: Session, seed: Option<u64>, json: bool) -> Result<()> {
    match seed {
        Some(seed) => session.generate_plan_with(&mut StdRng::seed_from_u64(seed)),
        None => session.generate_plan(),
    };

    let mut entries = Vec::new();
    for ex in session.plan_exercises() {
        entries.push(PlanEntry {
            id: &ex.id,
            name: &ex.name,
            category: ex.category,
            weight: session.current_weight(&ex.id)?,
        });
    }
    let notices: Vec<String> = session.plan().notices.iter().map(|n| n.to_string()).collect();

    if json {
        let output = PlanOutput {
            day: session.day(),
            exercises: entries,
            notices,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Plan for {} ({})", session.day(), session.quota());
    println!("{:-<50}", "");
    if entries.is_empty() {
        println!("No exercises available.");
    }
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{}. {} {:22} | {:10} | {}",
            i + 1,
            e.category.emoji(),
            e.name,
            e.category,
            format_weight(e.weight)
        );
    }
    for notice in &notices {
        println!("! {}", notice);
    }

    Ok(())
}

fn print_exercises(session: &Session, all: bool) {
    let groups = session.list_active_by_category();

    for category in Category::all() {
        println!("{} {}", category.emoji(), category);

        if all {
            for ex in session.catalog().iter().filter(|e| e.category == *category) {
                let status = if ex.is_active { "" } else { " (inactive)" };
                println!("   {:6} {:22} {}{}", ex.id, ex.name, format_weight(ex.default_weight), status);
            }
        } else {
            let active = groups.get(category).map(Vec::as_slice).unwrap_or_default();
            if active.is_empty() {
                println!("   -");
            }
            for ex in active {
                println!("   {:6} {:22} {}", ex.id, ex.name, format_weight(ex.default_weight));
            }
        }
    }
}

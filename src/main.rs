//! Macrolog CLI
//!
//! Command-line interface for the nutrition ledger:
//! - Show a day's totals and meals
//! - Log catalog or custom foods, remove them, clear a day
//! - Manage daily goals
//! - Export per-day totals

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use macrolog::catalog::{build_custom_item, CatalogItem, CustomFoodForm, FoodCatalog};
use macrolog::config::Config;
use macrolog::confirm::{AssumeYes, Confirmation, StdinConfirmation};
use macrolog::date::{parse_log_date, SystemDate};
use macrolog::export::write_daily_totals_csv;
use macrolog::goals::{GoalStore, GoalUpdate, Goals};
use macrolog::ledger::{DailyLog, FoodEntry, LedgerStore, MealSlot};
use macrolog::progress::DayProgress;
use macrolog::storage::{FileStore, KeyValueStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "macrolog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily calorie and macro log for cyclists")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show totals, progress and meals for a day
    Show {
        /// Date (YYYY-MM-DD or "today")
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Log a food from the catalog
    Add {
        /// Meal: breakfast, training, lunch, dinner, snacks
        slot: String,
        /// Food name or a unique part of it
        food: String,
        /// Serving multiplier
        #[arg(short, long, default_value_t = 1.0)]
        servings: f64,
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Log a food that is not in the catalog
    Custom {
        /// Meal: breakfast, training, lunch, dinner, snacks
        slot: String,
        #[arg(long)]
        name: String,
        /// kcal per serving
        #[arg(long)]
        calories: String,
        /// Carbs per serving (g)
        #[arg(long, default_value = "")]
        carbs: String,
        /// Protein per serving (g)
        #[arg(long, default_value = "")]
        protein: String,
        /// Fat per serving (g)
        #[arg(long, default_value = "")]
        fat: String,
        /// Serving unit (e.g. 100g, 1 cup, 1 bar)
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(short, long, default_value_t = 1.0)]
        servings: f64,
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Remove a logged food by id
    Remove {
        slot: String,
        id: u64,
        #[arg(short, long, default_value = "today")]
        date: String,
    },

    /// Delete every entry of a day
    Clear {
        #[arg(short, long, default_value = "today")]
        date: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Search the food catalog
    Foods {
        /// Name fragment (empty lists everything)
        query: Option<String>,
    },

    /// Show or change daily goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Export per-day totals as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// Print current goals
    Show,
    /// Change some goals
    Set {
        #[arg(long)]
        calories: Option<u32>,
        #[arg(long)]
        carbs: Option<u32>,
        #[arg(long)]
        protein: Option<u32>,
        #[arg(long)]
        fat: Option<u32>,
    },
    /// Restore the default goals
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.to_string_lossy().to_string();
    }

    let mut logging = config.logging.clone();
    if !cli.verbose {
        logging.level = "warn".to_string();
    }
    macrolog::logging::init(&logging);

    let today = SystemDate::new(config.ledger.day_boundary);
    let medium: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage.data_path()));
    let json = cli.format.eq_ignore_ascii_case("json");

    match cli.command {
        Commands::Show { date } => {
            let date = parse_log_date(&date, &today)?;
            let ledger = LedgerStore::load(Arc::clone(&medium)).context("Failed to load food logs")?;
            let goals = GoalStore::load(medium).context("Failed to load goals")?;
            print_day(date, &ledger.daily_log(date), &goals.goals(), json)?;
        }

        Commands::Add {
            slot,
            food,
            servings,
            date,
        } => {
            let date = parse_log_date(&date, &today)?;
            let slot: MealSlot = slot.parse()?;
            let catalog = FoodCatalog::builtin();
            let item = resolve_food(&catalog, &food)?;

            let mut ledger = LedgerStore::load(medium).context("Failed to load food logs")?;
            let entry = ledger.add_entry(date, slot, &item, servings)?;
            print_added(date, slot, &entry, json)?;
        }

        Commands::Custom {
            slot,
            name,
            calories,
            carbs,
            protein,
            fat,
            unit,
            servings,
            date,
        } => {
            let date = parse_log_date(&date, &today)?;
            let slot: MealSlot = slot.parse()?;
            let item = build_custom_item(&CustomFoodForm {
                name,
                calories,
                carbs,
                protein,
                fat,
                serving_unit: unit,
            })?;

            let mut ledger = LedgerStore::load(medium).context("Failed to load food logs")?;
            let entry = ledger.add_entry(date, slot, &item, servings)?;
            print_added(date, slot, &entry, json)?;
        }

        Commands::Remove { slot, id, date } => {
            let date = parse_log_date(&date, &today)?;
            let slot: MealSlot = slot.parse()?;

            let mut ledger = LedgerStore::load(Arc::clone(&medium)).context("Failed to load food logs")?;
            let before = ledger.daily_log(date).entries(slot).len();
            let log = ledger.remove_entry(date, slot, id)?;

            if log.entries(slot).len() == before {
                eprintln!("No entry {} in {} on {}", id, slot.label(), date);
            }

            let goals = GoalStore::load(medium).context("Failed to load goals")?;
            print_day(date, &log, &goals.goals(), json)?;
        }

        Commands::Clear { date, yes } => {
            let date = parse_log_date(&date, &today)?;
            let confirmation: Box<dyn Confirmation> = if yes {
                Box::new(AssumeYes)
            } else {
                Box::new(StdinConfirmation)
            };

            if !confirmation.confirm(&format!("Clear all logs for {}?", date)) {
                println!("Cancelled.");
                return Ok(());
            }

            let mut ledger = LedgerStore::load(medium).context("Failed to load food logs")?;
            ledger.clear_day(date)?;
            println!("Cleared {}", date);
        }

        Commands::Foods { query } => {
            let catalog = FoodCatalog::builtin();
            let items = catalog.search(query.as_deref().unwrap_or(""));

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else if items.is_empty() {
                println!("No foods found.");
                println!();
                println!("Log it anyway with:");
                println!("  macrolog custom <meal> --name \"...\" --calories 100");
            } else {
                print_catalog(&items);
            }
        }

        Commands::Goals { action } => {
            let mut store = GoalStore::load(medium).context("Failed to load goals")?;

            let goals = match action.unwrap_or(GoalsAction::Show) {
                GoalsAction::Show => store.goals(),
                GoalsAction::Set {
                    calories,
                    carbs,
                    protein,
                    fat,
                } => {
                    let update = GoalUpdate {
                        calories,
                        carbs,
                        protein,
                        fat,
                    };
                    if update.is_empty() {
                        bail!("Nothing to set. Use --calories, --carbs, --protein or --fat");
                    }

                    let mut draft = store.draft();
                    draft.apply(&update);
                    draft.commit(&mut store)?
                }
                GoalsAction::Reset => store.reset_to_defaults()?,
            };

            print_goals(&goals, json)?;
        }

        Commands::Export { output } => {
            let ledger = LedgerStore::load(medium).context("Failed to load food logs")?;

            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Cannot create {:?}", path))?;
                    write_daily_totals_csv(ledger.logs(), file)?;
                    println!("Exported {} days to {:?}", ledger.logs().len(), path);
                }
                None => {
                    write_daily_totals_csv(ledger.logs(), std::io::stdout().lock())?;
                }
            }
        }

        Commands::Config { output } => {
            let config = macrolog::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Exact name first, then a unique search hit
fn resolve_food(catalog: &FoodCatalog, query: &str) -> anyhow::Result<CatalogItem> {
    if let Some(item) = catalog.find(query) {
        return Ok(item.clone());
    }

    match catalog.search(query).as_slice() {
        [] => bail!(
            "No food matching '{}'. Use `macrolog custom` for foods outside the catalog",
            query
        ),
        [item] => Ok((*item).clone()),
        many => {
            let names: Vec<&str> = many.iter().map(|i| i.name.as_str()).collect();
            bail!("'{}' matches several foods: {}", query, names.join(", "))
        }
    }
}

fn serving_label(entry: &FoodEntry) -> String {
    if entry.serving_multiplier == 1.0 {
        entry.serving_unit.clone()
    } else {
        format!("{}x {}", entry.serving_multiplier, entry.serving_unit)
    }
}

fn progress_bar(percent: f64) -> String {
    const WIDTH: usize = 20;
    let filled = ((percent / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}

fn print_day(date: NaiveDate, log: &DailyLog, goals: &Goals, json: bool) -> anyhow::Result<()> {
    let progress = DayProgress::new(log, goals);

    if json {
        let body = serde_json::json!({
            "date": date.to_string(),
            "log": log,
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let totals = &progress.totals;
    println!("{}", date.format("%A %Y-%m-%d"));
    println!();

    let remaining = if progress.over_calorie_goal {
        format!("{} over", -progress.calories_remaining)
    } else {
        format!("{} left", progress.calories_remaining)
    };
    println!(
        "{:<9} {} {:>5} / {} kcal ({})",
        "Calories",
        progress_bar(progress.percent.calories),
        totals.calories,
        goals.calories,
        remaining
    );
    for (label, current, target, percent) in [
        ("Carbs", totals.carbs, goals.carbs, progress.percent.carbs),
        ("Protein", totals.protein, goals.protein, progress.percent.protein),
        ("Fat", totals.fat, goals.fat, progress.percent.fat),
    ] {
        println!(
            "{:<9} {} {:>5} / {}g",
            label,
            progress_bar(percent),
            current,
            target
        );
    }

    for (slot, entries) in log.slots() {
        println!();
        println!("{} ({} kcal)", slot.label(), log.slot_calories(slot));
        if entries.is_empty() {
            println!("  -");
        }
        for entry in entries {
            println!(
                "  {:<15} {:<28} {:<14} {:>5} kcal  C {:>3}g  P {:>3}g  F {:>3}g",
                entry.id,
                entry.name,
                serving_label(entry),
                entry.calories,
                entry.carbs,
                entry.protein,
                entry.fat
            );
        }
    }

    Ok(())
}

fn print_added(date: NaiveDate, slot: MealSlot, entry: &FoodEntry, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        println!(
            "Logged {} ({}) to {} on {}: {} kcal, C {}g, P {}g, F {}g [id {}]",
            entry.name,
            serving_label(entry),
            slot.label(),
            date,
            entry.calories,
            entry.carbs,
            entry.protein,
            entry.fat,
            entry.id
        );
    }
    Ok(())
}

fn print_catalog(items: &[&CatalogItem]) {
    println!(
        "{:<28} {:<9} {:>5} {:>6} {:>6} {:>6}  {}",
        "Name", "Unit", "kcal", "Carbs", "Prot", "Fat", "Group"
    );
    println!("{}", "-".repeat(78));

    for item in items {
        println!(
            "{:<28} {:<9} {:>5} {:>5}g {:>5}g {:>5}g  {}",
            item.name, item.serving_unit, item.calories, item.carbs, item.protein, item.fat, item.group
        );
    }
}

fn print_goals(goals: &Goals, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(goals)?);
    } else {
        println!("Calories: {} kcal", goals.calories);
        println!("Carbs:    {} g", goals.carbs);
        println!("Protein:  {} g", goals.protein);
        println!("Fat:      {} g", goals.fat);
    }
    Ok(())
}

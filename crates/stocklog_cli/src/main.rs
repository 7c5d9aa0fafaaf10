//! Stocklog command-line front end.
//!
//! # Responsibility
//! - Inspect history and statistics from a database file or the demo dataset.
//! - Record registrations and seed fresh databases.

use clap::{Parser, Subcommand};
use log::warn;
use std::error::Error;
use std::path::PathBuf;
use stocklog_core::db::open_db;
use stocklog_core::{
    init_logging, parse_date_bound, AppConfig, AppState, DataOrigin, FilterCriteria,
    RegistrationRequest, RegistrationService, Scope, SortKey, SortOrder,
    SqliteReferenceRepository, SqliteRegistrationRepository,
};

#[derive(Parser, Debug)]
#[command(name = "stocklog")]
#[command(about = "Product registration history and statistics")]
struct Args {
    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Database file (overrides the config)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Use the built-in demonstration dataset
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print core linkage info
    Ping,
    /// List registrations, filtered and sorted
    History {
        #[arg(short, long, default_value = "")]
        search: String,
        /// User name or `all`
        #[arg(long, default_value = "all")]
        user: String,
        /// Location name or `all`
        #[arg(long, default_value = "all")]
        location: String,
        /// Inclusive lower bound, YYYY-MM-DD
        #[arg(long, default_value = "")]
        from: String,
        /// Inclusive upper bound, YYYY-MM-DD
        #[arg(long, default_value = "")]
        to: String,
        /// date | user | product | location
        #[arg(long)]
        sort: Option<String>,
        /// newest | oldest
        #[arg(long)]
        order: Option<String>,
    },
    /// Show top users, products and locations
    Stats {
        #[arg(long)]
        top: Option<usize>,
    },
    /// Record one registration
    Register {
        #[arg(long)]
        user: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        purpose: String,
    },
    /// Write the demonstration dataset into an empty database
    SeedDemo,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match args.config.as_deref() {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if args.db.is_some() {
        config.db_path = args.db.clone();
    }
    config.use_demo_data |= args.demo;

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir)?;
    }

    match args.command {
        Command::Ping => {
            println!("stocklog_core ping={}", stocklog_core::ping());
            println!("stocklog_core version={}", stocklog_core::core_version());
        }
        Command::History {
            search,
            user,
            location,
            from,
            to,
            sort,
            order,
        } => {
            let state = load_state(&config)?;
            let criteria = FilterCriteria::new()
                .with_search(search)
                .with_user(Scope::parse(&user))
                .with_location(Scope::parse(&location))
                .with_date_range(parse_date_bound(&from), parse_date_bound(&to));
            let sort_by = sort
                .as_deref()
                .map_or(config.default_sort_by, SortKey::parse);
            let order = order
                .as_deref()
                .map_or(config.default_sort_order, SortOrder::parse);

            let rows = state.history(&criteria, sort_by, order);
            for row in &rows {
                println!(
                    "{} {}\t{}\t{}\t{}\t{}\t{}",
                    row.date,
                    row.time,
                    row.user,
                    row.product,
                    row.location,
                    row.purpose,
                    row.qr_code.as_deref().unwrap_or("-")
                );
            }
            println!(
                "{} of {} registrations",
                rows.len(),
                state.registrations().len()
            );
        }
        Command::Stats { top } => {
            let state = load_state(&config)?;
            let stats = state.statistics(top.unwrap_or(config.top_n));
            println!("registrations={}", stats.total_registrations);
            print_ranking("users", stats.distinct_users, &stats.top_users);
            print_ranking("products", stats.distinct_products, &stats.top_products);
            print_ranking("locations", stats.distinct_locations, &stats.top_locations);
            println!("chart:");
            for segment in state.product_chart() {
                println!(
                    "  {} {:>6.1}deg +{:>6.1}deg {}",
                    segment.color, segment.start_angle, segment.sweep_angle, segment.product
                );
            }
        }
        Command::Register {
            user,
            product,
            location,
            purpose,
        } => {
            let db_path = config
                .db_path
                .as_deref()
                .ok_or("register needs a database (--db or db_path in config)")?;
            let conn = open_db(db_path)?;
            let references = SqliteReferenceRepository::new(&conn);
            let registrations = SqliteRegistrationRepository::new(&conn);
            let mut state = AppState::load(&references, &registrations);

            let service = RegistrationService::new(SqliteRegistrationRepository::new(&conn));
            let request = RegistrationRequest {
                user,
                product,
                location,
                purpose,
            };
            let saved = service.register_now(&request, &state.reference().products)?;
            state.refresh_registrations(&registrations)?;
            println!(
                "registered {} ({} total)",
                saved.id,
                state.registrations().len()
            );
        }
        Command::SeedDemo => {
            let db_path = config
                .db_path
                .as_deref()
                .ok_or("seed-demo needs a database (--db or db_path in config)")?;
            let conn = open_db(db_path)?;
            stocklog_core::demo::seed(
                &SqliteReferenceRepository::new(&conn),
                &SqliteRegistrationRepository::new(&conn),
            )?;
            println!("seeded demo dataset into {}", db_path.display());
        }
    }

    Ok(())
}

fn load_state(config: &AppConfig) -> Result<AppState, Box<dyn Error>> {
    let db_path = match config.db_path.as_deref() {
        Some(path) if !config.use_demo_data => path,
        _ => return Ok(AppState::demo()),
    };

    let conn = open_db(db_path)?;
    let state = AppState::load(
        &SqliteReferenceRepository::new(&conn),
        &SqliteRegistrationRepository::new(&conn),
    );
    if state.origin() == DataOrigin::Demo {
        warn!("event=cli_load module=cli status=fallback source=demo");
        eprintln!("warning: data source unavailable, showing demo data");
    }
    Ok(state)
}

fn print_ranking(label: &str, distinct: usize, ranking: &[(String, usize)]) {
    println!("{label} (distinct {distinct}):");
    for (value, count) in ranking {
        println!("  {count:>4}  {value}");
    }
}

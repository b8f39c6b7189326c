use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use firstlast::Error;
use firstlast::check::HeadsignCheck;
use firstlast::config::{DATA_ROOT_VAR, FeedDir, RunConfig, STOPS_FILE};
use firstlast::domain::StopId;
use firstlast::feed::{Feed, StopRecord, load_file};
use firstlast::headsign::MappingTable;
use firstlast::index::StationIndex;
use firstlast::pipeline::first_last_map;
use firstlast::report::{OrderingStrategy, TableLayout, render_list, render_report};
use firstlast::store::FeedStore;

/// Rows shown by the store inspection commands unless `--limit` says otherwise.
const DEFAULT_SAMPLE_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding stops.txt, trips.txt, stop_times.txt and routes.txt
    /// [default: $BART_DATA_ROOT]
    #[arg(long, global = true)]
    feed_dir: Option<PathBuf>,

    /// Headsign mapping table (JSON) to use instead of the built-in one
    #[arg(long, global = true)]
    mapping: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// First and last trains as two destination × service tables (default)
    Table {
        /// Station name substring [default: 19th]
        #[arg(long)]
        station: Option<String>,
        /// Fail on services or destinations the table has no slot for
        #[arg(long)]
        strict: bool,
        /// Don't verify headsign mappings first
        #[arg(long)]
        skip_check: bool,
    },
    /// First and last trains as a flat list of canonical labels
    List {
        /// Station name substring [default: 19th]
        #[arg(long, conflicts_with = "all_stations")]
        station: Option<String>,
        /// Report on every stop in the feed
        #[arg(long)]
        all_stations: bool,
        /// Don't verify headsign mappings first
        #[arg(long)]
        skip_check: bool,
    },
    /// Check that every headsign in the feed has a mapping
    Check,
    /// List the stops whose name contains a substring
    Stations { substring: String },
    /// SQLite copy of the feed
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum DbCommands {
    /// Drop, recreate and load all feed tables
    Load {
        /// Database file [default: <feed dir>/bartdb.db]
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Earliest departure per service, headsign and route at a station
    First {
        #[arg(long)]
        db: Option<PathBuf>,
        /// Station name substring [default: 19th]
        #[arg(long)]
        station: Option<String>,
    },
    /// Show the first rows of a table
    Sample {
        /// One of stops, trips, stop_times, routes
        table: String,
        #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        limit: usize,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Show stop times joined with their stop, trip and route
    Joined {
        #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        limit: usize,
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

/// How a command finished, when it didn't fail outright.
enum Outcome {
    Done,
    MissingMappings,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::MissingMappings) => ExitCode::from(HeadsignCheck::FAILURE_STATUS),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<Outcome, Error> {
    let dir = FeedDir::resolve(args.feed_dir, std::env::var_os(DATA_ROOT_VAR))?;
    let mapping = args.mapping;

    let command = args.command.unwrap_or(Commands::Table {
        station: None,
        strict: false,
        skip_check: false,
    });

    match command {
        Commands::Table {
            station,
            strict,
            skip_check,
        } => {
            let config = run_config(station, !skip_check, strict);
            let feed = Feed::load(&dir)?;
            let table = mapping_table(mapping)?;
            if config.check_headsigns && !headsigns_mapped(&feed, &table) {
                return Ok(Outcome::MissingMappings);
            }
            let map = first_last_map(&feed, &table, config.station.as_deref())?;
            let layout = TableLayout::from_table(&table, config.ordering);
            print!("{}", render_report(&map, &layout)?);
        }
        Commands::List {
            station,
            all_stations,
            skip_check,
        } => {
            let mut config = run_config(station, !skip_check, false);
            if all_stations {
                config.station = None;
            }
            let feed = Feed::load(&dir)?;
            let table = mapping_table(mapping)?;
            if config.check_headsigns && !headsigns_mapped(&feed, &table) {
                return Ok(Outcome::MissingMappings);
            }
            let map = first_last_map(&feed, &table, config.station.as_deref())?;
            print!("{}", render_list(&map));
        }
        Commands::Check => {
            let feed = Feed::load(&dir)?;
            let table = mapping_table(mapping)?;
            if !headsigns_mapped(&feed, &table) {
                return Ok(Outcome::MissingMappings);
            }
            println!("All headsigns mapped (table {}).", table.version());
        }
        Commands::Stations { substring } => {
            let stops: Vec<StopRecord> = load_file(&dir.path(STOPS_FILE))?;
            let index = StationIndex::new(&stops);
            for (stop_id, name) in index.matching(&substring) {
                println!("{stop_id}\t{name}");
            }
        }
        Commands::Db { command } => run_db(&dir, mapping, command)?,
    }

    Ok(Outcome::Done)
}

fn run_db(dir: &FeedDir, mapping: Option<PathBuf>, command: DbCommands) -> Result<(), Error> {
    match command {
        DbCommands::Load { db } => {
            let mut store = FeedStore::new(db.unwrap_or_else(|| dir.store_path()));
            store.connect()?;
            let summary = store.load_feed(dir)?;
            store.disconnect()?;
            println!(
                "Loaded {} stops, {} trips, {} stop times, {} routes into {}",
                summary.stops,
                summary.trips,
                summary.stop_times,
                summary.routes,
                store.path().display()
            );
        }
        DbCommands::First { db, station } => {
            let station = station.or(RunConfig::default().station);
            let stops: Vec<StopRecord> = load_file(&dir.path(STOPS_FILE))?;
            let stop_ids: Vec<StopId> = match station.as_deref() {
                Some(name) => StationIndex::new(&stops).lookup(name).into_iter().collect(),
                None => Vec::new(),
            };
            let table = mapping_table(mapping)?;

            let mut store = FeedStore::new(db.unwrap_or_else(|| dir.store_path()));
            store.connect()?;
            let rows = store.first_departures(&stop_ids)?;
            store.disconnect()?;

            for row in rows {
                println!(
                    "{} {} - {} [{}]",
                    row.departure_time,
                    table.service_label(&row.service_id),
                    table.resolve(&row.headsign, station.as_deref()),
                    row.route_short_name.as_deref().unwrap_or("?")
                );
            }
        }
        DbCommands::Sample { table, limit, db } => {
            let mut store = FeedStore::new(db.unwrap_or_else(|| dir.store_path()));
            store.connect()?;
            let sample = store.sample_rows(&table, limit)?;
            store.disconnect()?;

            println!("{}", sample.columns.join(" | "));
            for row in sample.rows {
                println!("{}", row.join(" | "));
            }
        }
        DbCommands::Joined { limit, db } => {
            let mut store = FeedStore::new(db.unwrap_or_else(|| dir.store_path()));
            store.connect()?;
            let rows = store.joined_stop_times(limit)?;
            store.disconnect()?;

            for row in rows {
                println!(
                    "{} | {} | {} | {} | {}",
                    row.stop_name,
                    row.service_id,
                    row.departure_time.as_ref().map_or("NULL", |t| t.as_str()),
                    row.headsign,
                    row.route_short_name.as_deref().unwrap_or("NULL")
                );
            }
        }
    }
    Ok(())
}

/// Apply CLI flags over the defaults.
fn run_config(station: Option<String>, check_headsigns: bool, strict: bool) -> RunConfig {
    let defaults = RunConfig::default();
    RunConfig {
        station: station.or(defaults.station),
        check_headsigns,
        ordering: if strict {
            OrderingStrategy::Strict
        } else {
            defaults.ordering
        },
    }
}

fn mapping_table(path: Option<PathBuf>) -> Result<MappingTable, Error> {
    let table = match path {
        Some(path) => MappingTable::load(&path)?,
        None => MappingTable::embedded()?,
    };
    info!(version = table.version(), "Loaded headsign mapping table");
    Ok(table)
}

/// Print every unmapped headsign. True when there were none.
fn headsigns_mapped(feed: &Feed, table: &MappingTable) -> bool {
    let check = HeadsignCheck::run(feed, table);
    print!("{check}");
    check.passed()
}

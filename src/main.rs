use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use golocal_lib::exporters::export_places;
use golocal_lib::matchers::{
    filter_places, in_category, parse_condition, published, rank_by_traveller_path,
};
use golocal_lib::models::{AppError, Category, ExportFormat, Place};
use golocal_lib::storage::dictionary::save_dictionary;
use golocal_lib::storage::preferences::{load_traveller_path, save_traveller_path};
use golocal_lib::storage::{Favorites, JsonFileStore};
use golocal_lib::utils::text::parse_tp_codes;
use golocal_lib::{AppConfig, PlaceFetcher};

#[derive(Parser)]
#[command(name = "golocal")]
#[command(version)]
#[command(about = "Load Golocal explore places from a sheet export", long_about = None)]
struct Cli {
    /// Directory holding header_aliases.json / category_table.json
    #[arg(long, global = true)]
    dictionary_dir: Option<PathBuf>,
    /// JSON file keeping favorites and Traveller Path answers
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the sheet CSV and print its places
    Fetch {
        /// Defaults to GOLOCAL_SHEET_URL
        url: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Read a local .csv/.xlsx/.ods export and print its places
    Parse {
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Show the saved Traveller Path answers, or replace them with CODES
    TravellerPath { codes: Option<String> },
    Dictionary {
        #[command(subcommand)]
        action: DictionaryAction,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// json or csv
    #[arg(short, long, default_value = "json")]
    format: String,
    /// Only places whose status is "published"
    #[arg(long)]
    published: bool,
    #[arg(long)]
    category: Option<String>,
    /// field:match_type:value, repeatable
    #[arg(long = "where")]
    conditions: Vec<String>,
    /// Rank by Traveller Path codes, e.g. "1,4"
    #[arg(long)]
    tp: Option<String>,
    /// Rank by the saved Traveller Path answers
    #[arg(long, conflicts_with = "tp")]
    saved_tp: bool,
    /// Only favorited places, in favorite order
    #[arg(long)]
    favorites: bool,
}

#[derive(Subcommand)]
enum FavoritesAction {
    List,
    Add { id: String },
    Remove { id: String },
    Toggle { id: String },
}

#[derive(Subcommand)]
enum DictionaryAction {
    /// Validate FILE and store it as dictionary NAME (header_aliases | category_table)
    Import { name: String, file: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.dictionary_dir.clone() {
        config.dictionary_dir = Some(dir);
    }
    if let Some(store) = cli.store.clone() {
        config.store_path = store;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &AppConfig) -> Result<(), AppError> {
    match command {
        Command::Fetch { url, output } => {
            let url = url
                .or_else(|| config.sheet_url.clone())
                .ok_or_else(|| AppError::config("no sheet URL given and GOLOCAL_SHEET_URL is unset"))?;
            let client = reqwest::Client::builder()
                .build()
                .map_err(|err| AppError::network(format!("failed to build HTTP client: {err}")))?;
            let fetcher = PlaceFetcher::new(client, config.place_parser()?);
            let places = fetcher.fetch_places(&url).await?;
            print_places(places, &output, config)
        }
        Command::Parse { file, output } => {
            let places = config.place_parser()?.parse_file(&file)?;
            print_places(places, &output, config)
        }
        Command::Favorites { action } => {
            let mut favorites = Favorites::new(JsonFileStore::open(&config.store_path)?);
            match action {
                FavoritesAction::List => {
                    for id in favorites.ids()? {
                        println!("{id}");
                    }
                }
                FavoritesAction::Add { id } => {
                    if !favorites.add(&id)? {
                        println!("{id} is already a favorite");
                    }
                }
                FavoritesAction::Remove { id } => {
                    if !favorites.remove(&id)? {
                        println!("{id} was not a favorite");
                    }
                }
                FavoritesAction::Toggle { id } => {
                    let now = favorites.toggle(&id)?;
                    println!("{id}: {}", if now { "favorite" } else { "not favorite" });
                }
            }
            Ok(())
        }
        Command::TravellerPath { codes } => {
            let mut store = JsonFileStore::open(&config.store_path)?;
            if let Some(codes) = codes {
                let answers = parse_tp_codes(&codes).unwrap_or_default();
                save_traveller_path(&mut store, &answers)?;
            }
            let answers: Vec<String> = load_traveller_path(&store)?
                .iter()
                .map(|code| code.to_string())
                .collect();
            println!("{}", answers.join(","));
            Ok(())
        }
        Command::Dictionary { action } => match action {
            DictionaryAction::Import { name, file } => {
                let dir = config
                    .dictionary_dir
                    .as_deref()
                    .ok_or_else(|| AppError::config("set --dictionary-dir or GOLOCAL_DICTIONARY_DIR"))?;
                let content = std::fs::read_to_string(&file).map_err(|err| {
                    AppError::io(format!("failed to read {}: {err}", file.display()))
                })?;
                save_dictionary(dir, &name, &content)
            }
        },
    }
}

fn print_places(places: Vec<Place>, output: &OutputArgs, config: &AppConfig) -> Result<(), AppError> {
    let format: ExportFormat = output.format.parse()?;

    let mut places = if output.published {
        published(&places)
    } else {
        places
    };

    if let Some(category) = &output.category {
        let category: Category = category.parse()?;
        places = in_category(&places, category);
    }

    let conditions = output
        .conditions
        .iter()
        .map(|raw| {
            parse_condition(raw).ok_or_else(|| {
                AppError::config(format!("invalid --where '{raw}', expected field:match_type:value"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    places = filter_places(&places, &conditions);

    if output.favorites || output.saved_tp {
        let store = JsonFileStore::open(&config.store_path)?;
        let answers = load_traveller_path(&store)?;
        if output.favorites {
            places = Favorites::new(store).resolve(&places)?;
        }
        if output.saved_tp {
            places = rank_by_traveller_path(&places, &answers);
        }
    }

    if let Some(codes) = &output.tp {
        let answers = parse_tp_codes(codes).unwrap_or_default();
        places = rank_by_traveller_path(&places, &answers);
    }

    println!("{}", export_places(&places, format)?);
    Ok(())
}

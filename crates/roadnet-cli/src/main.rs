use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadnet_cli::commands::path::handle_path;
use roadnet_cli::commands::place::{
    handle_place_add, handle_place_remove, handle_place_rename, AddPlaceArgs,
};
use roadnet_cli::commands::road::{handle_road_add, handle_road_remove};
use roadnet_cli::commands::search::{handle_search_places, handle_search_towns};
use roadnet_cli::commands::show::{
    handle_show_places, handle_show_roads, handle_show_towns, RoadFilter,
};
use roadnet_cli::commands::town::{handle_town_add, handle_town_remove, handle_town_rename};
use roadnet_cli::output::OutputFormat;
use roadnet_cli::session::MapSession;
use roadnet_lib::TownId;

#[derive(Parser, Debug)]
#[command(author, version, about = "Edit road network maps and find paths between places")]
struct Cli {
    /// Map file to operate on (defaults to $ROADNET_MAP, then the platform data directory).
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add, remove or rename towns.
    #[command(subcommand)]
    Town(TownCommand),
    /// Add, remove or rename places inside a town.
    #[command(subcommand)]
    Place(PlaceCommand),
    /// Add or remove roads between places.
    #[command(subcommand)]
    Road(RoadCommand),
    /// Case-insensitive substring search over names.
    #[command(subcommand)]
    Search(SearchCommand),
    /// Find the shortest path between two places.
    Path {
        /// Starting place (composite id or name).
        from: String,
        /// Destination place (composite id or name).
        to: String,
    },
    /// List towns, places or roads.
    #[command(subcommand)]
    Show(ShowCommand),
}

#[derive(Subcommand, Debug)]
enum TownCommand {
    /// Create a new town.
    Add { id: TownId, name: String },
    /// Remove a town and all of its places.
    Remove { town: String },
    /// Rename a town.
    Rename { town: String, name: String },
}

#[derive(Subcommand, Debug)]
enum PlaceCommand {
    /// Create a place inside a town.
    Add {
        town: String,
        /// Serial number of the place within the town.
        serial: u32,
        name: String,
        /// Longitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Latitude in decimal degrees.
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
    },
    /// Remove a place from its town.
    Remove { town: String, place: String },
    /// Rename a place.
    Rename {
        town: String,
        place: String,
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum RoadCommand {
    /// Add a road; its length is the projected distance between the places.
    Add(RoadArgs),
    /// Remove a road.
    Remove(RoadArgs),
}

#[derive(Args, Debug)]
struct RoadArgs {
    /// Source place (composite id or name).
    from: String,
    /// Target place (composite id or name).
    to: String,
    /// Apply the change in both directions.
    #[arg(long)]
    bidirectional: bool,
}

#[derive(Subcommand, Debug)]
enum SearchCommand {
    /// Search places by town and place name.
    Places { keyword: String },
    /// Search towns by name.
    Towns { keyword: String },
}

#[derive(Subcommand, Debug)]
enum ShowCommand {
    /// List all towns.
    Towns,
    /// List places, optionally restricted to one town.
    Places { town: Option<String> },
    /// List roads of a town, from a place, or into a place.
    Roads(ShowRoadsArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("filter").required(true).args(["of", "from", "to", "all"])))]
struct ShowRoadsArgs {
    /// Roads starting in this town.
    #[arg(long)]
    of: Option<String>,
    /// Roads leaving this place.
    #[arg(long)]
    from: Option<String>,
    /// Roads arriving at this place.
    #[arg(long)]
    to: Option<String>,
    /// Every road, grouped by town.
    #[arg(long)]
    all: bool,
}

impl ShowRoadsArgs {
    fn filter(self) -> RoadFilter {
        match (self.of, self.from, self.to) {
            (Some(town), _, _) => RoadFilter::OfTown(town),
            (None, Some(place), _) => RoadFilter::From(place),
            (None, None, Some(place)) => RoadFilter::To(place),
            // The argument group is required, so only `--all` is left.
            (None, None, None) => RoadFilter::All,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format;

    let mut session = MapSession::open(cli.map.as_deref())?;
    match cli.command {
        Command::Town(command) => match command {
            TownCommand::Add { id, name } => handle_town_add(&mut session, format, id, &name)?,
            TownCommand::Remove { town } => handle_town_remove(&mut session, format, &town)?,
            TownCommand::Rename { town, name } => {
                handle_town_rename(&mut session, format, &town, &name)?
            }
        },
        Command::Place(command) => match command {
            PlaceCommand::Add {
                town,
                serial,
                name,
                longitude,
                latitude,
            } => {
                let args = AddPlaceArgs {
                    town,
                    serial,
                    name,
                    longitude,
                    latitude,
                };
                handle_place_add(&mut session, format, &args)?
            }
            PlaceCommand::Remove { town, place } => {
                handle_place_remove(&mut session, format, &town, &place)?
            }
            PlaceCommand::Rename { town, place, name } => {
                handle_place_rename(&mut session, format, &town, &place, &name)?
            }
        },
        Command::Road(command) => match command {
            RoadCommand::Add(args) => {
                handle_road_add(&mut session, format, &args.from, &args.to, args.bidirectional)?
            }
            RoadCommand::Remove(args) => {
                handle_road_remove(&mut session, format, &args.from, &args.to, args.bidirectional)?
            }
        },
        Command::Search(command) => match command {
            SearchCommand::Places { keyword } => {
                handle_search_places(&session, format, &keyword)?
            }
            SearchCommand::Towns { keyword } => handle_search_towns(&session, format, &keyword)?,
        },
        Command::Path { from, to } => handle_path(&session, format, &from, &to)?,
        Command::Show(command) => match command {
            ShowCommand::Towns => handle_show_towns(&session, format)?,
            ShowCommand::Places { town } => {
                handle_show_places(&session, format, town.as_deref())?
            }
            ShowCommand::Roads(args) => handle_show_roads(&session, format, &args.filter())?,
        },
    }

    session.commit()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::Verbosity;
use hideseek_core::*;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a single board and print it
    Generate {
        #[command(flatten)]
        arena: ArenaArgs,

        /// How to print the board
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the seeds in a range that produce valid boards
    Scan {
        #[command(flatten)]
        arena: ArenaArgs,

        /// How many consecutive seeds to try, starting at --seed
        #[arg(short, long, default_value_t = 100)]
        count: u64,
    },
}

#[derive(Args, Debug)]
struct ArenaArgs {
    #[arg(long, default_value_t = CANONICAL_SIZE.0)]
    width: Coord,

    #[arg(long, default_value_t = CANONICAL_SIZE.1)]
    height: Coord,

    /// Seed for wall placement
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Wall placement strategy: coherent-noise (or perlin), open
    #[arg(long, default_value = "coherent-noise")]
    strategy: Strategy,

    /// Seeker start as `x,y`, defaults to two cells in from the top-left corner
    #[arg(long, value_parser = parse_coords)]
    seeker: Option<Coord2>,

    /// Hider start as `x,y`, defaults to two cells in from the bottom-right corner
    #[arg(long, value_parser = parse_coords)]
    hider: Option<Coord2>,

    /// Longest path the reachability check follows
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Boundary samples per cell when casting vision rays
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: u32,
}

impl ArenaArgs {
    fn config(&self) -> ArenaConfig {
        let config = ArenaConfig::new((self.width, self.height), self.seed, self.strategy);
        let seeker = self.seeker.unwrap_or(config.seeker_start);
        let hider = self.hider.unwrap_or(config.hider_start);
        config
            .with_starts(seeker, hider)
            .with_max_depth(self.max_depth)
            .with_resolution(self.resolution)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One character per cell
    Text,
    /// Snapshot with dense cell codes and the reproducing config
    Json,
}

fn parse_coords(value: &str) -> Result<Coord2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<Coord>()
            .map_err(|err| format!("bad coordinate `{part}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn init_logging(verbose: &Verbosity) -> Result<()> {
    let level = match verbose.log_level() {
        None => LevelFilter::OFF,
        Some(log::Level::Error) => LevelFilter::ERROR,
        Some(log::Level::Warn) => LevelFilter::WARN,
        Some(log::Level::Info) => LevelFilter::INFO,
        Some(log::Level::Debug) => LevelFilter::DEBUG,
        Some(log::Level::Trace) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
}

fn generate(arena: &ArenaArgs, format: Format) -> Result<()> {
    let config = arena.config();
    let board =
        Board::new(&config).with_context(|| format!("could not build a board from {config:?}"))?;

    match format {
        Format::Text => {
            print!("{board}");
            println!(
                "seed {} ({}): {}",
                config.seed,
                config.strategy,
                if board.is_valid() { "valid" } else { "not valid" }
            );
        }
        Format::Json => {
            let snapshot = BoardSnapshot::from_board(&board);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}

fn scan(arena: &ArenaArgs, count: u64) -> Result<()> {
    let config = arena.config();
    let seeds = config.seed..config.seed.saturating_add(count);

    let mut valid = 0u64;
    for seed in seeds {
        let board = Board::new(&config.with_seed(seed))
            .with_context(|| format!("could not build a board for seed {seed}"))?;
        if board.is_valid() {
            println!("{seed}");
            valid += 1;
        }
    }
    log::info!("{} of {} seeds produced a valid board", valid, count);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.verbose)?;
    log::debug!("{:?}", cli.command);

    match &cli.command {
        Command::Generate { arena, format } => generate(arena, *format),
        Command::Scan { arena, count } => scan(arena, *count),
    }
}

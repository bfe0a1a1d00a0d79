use std::io::{self, Write};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::filter::LevelFilter;
use turnsweep_core::*;
use turnsweep_protocol::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hold the mine layout read from stdin and referee actions until the game ends
    Authority,
    /// Play against an authority, reading the opening cell and renderings from stdin
    Agent {
        #[arg(long)]
        rows: Coord,
        #[arg(long)]
        columns: Coord,
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Run both sides in this process and print the authority's output
    Play {
        /// Force a seed instead of random
        #[arg(short, long)]
        seed: Option<u64>,
        /// Generate a random `ROWSxCOLUMNS` board instead of reading one from stdin
        #[arg(long, value_parser = parse_size)]
        generate: Option<Coord2>,
        #[arg(long, default_value_t = 10, requires = "generate")]
        mines: CellCount,
        /// Also print the summary as a JSON line
        #[arg(long)]
        json: bool,
    },
}

fn parse_size(value: &str) -> std::result::Result<Coord2, String> {
    let (rows, columns) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLUMNS, got {:?}", value))?;
    let parse = |part: &str| part.trim().parse::<Coord>().map_err(|err| err.to_string());
    Ok((parse(rows)?, parse(columns)?))
}

fn init_logger(verbose: &Verbosity<WarnLevel>) -> anyhow::Result<()> {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("Error initializing logger")
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    log::debug!("seed: {:?}", seed);
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args.verbose)?;

    let mut input = LineReader::new(io::stdin().lock());
    let mut output = io::stdout().lock();

    match args.command {
        Command::Authority => {
            let layout = read_layout(&mut input).context("Could not read the board setup")?;
            let mut board = Board::new(&layout);
            let summary = run_authority(&mut board, &mut input, &mut output)
                .context("Authority session failed")?;
            log::info!("authority finished: {:?}", summary);
        }
        Command::Agent {
            rows,
            columns,
            seed,
        } => {
            let mut rng = make_rng(seed);
            let mut agent = Agent::new((rows, columns)).context("Invalid board size")?;
            let opening = read_opening(&mut input).context("Could not read the opening cell")?;
            let summary = run_agent(&mut agent, opening, &mut input, &mut output, &mut rng)
                .context("Agent session failed")?;
            log::info!("agent finished: {:?}", summary);
        }
        Command::Play {
            seed,
            generate,
            mines,
            json,
        } => {
            let mut rng = make_rng(seed);
            let (layout, opening) = match generate {
                Some(size) => {
                    let config = GameConfig::new(size, mines);
                    let size = config.size;
                    let opening = (rng.random_range(0..size.0), rng.random_range(0..size.1));
                    let generator =
                        RandomLayoutGenerator::new(rng.random(), opening, StartCell::AlwaysZero);
                    (generator.generate(config), opening)
                }
                None => {
                    let layout =
                        read_layout(&mut input).context("Could not read the board setup")?;
                    let opening =
                        read_opening(&mut input).context("Could not read the opening cell")?;
                    (layout, opening)
                }
            };

            let summary = self_play(&layout, opening, &mut rng, &mut output)
                .context("Self-play session failed")?;
            if json {
                let line = serde_json::to_string(&summary).context("Could not encode summary")?;
                writeln!(output, "{}", line)?;
            }
        }
    }

    Ok(())
}

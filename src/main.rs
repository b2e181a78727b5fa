//! # Caverns Command-Line Driver
//!
//! Runs a headless game: generates floor 1 from a seed, feeds button edges
//! from a seeded random source through the turn engine, and reports what
//! happened.

use caverns::{
    render_game_state, AsciiRenderer, CavernsError, CavernsResult, DungeonGenerator, GameMode,
    GameState, GenerationConfig, Generator, InputHandler, RandomInput,
};
use clap::Parser;
use log::{error, info, LevelFilter};
use std::path::PathBuf;

/// Command line arguments for the Caverns driver.
#[derive(Parser, Debug)]
#[command(name = "caverns")]
#[command(about = "Headless driver for the Caverns dungeon crawler core")]
#[command(version)]
struct Args {
    /// Seed for the first floor
    #[arg(short, long, default_value_t = caverns::config::INITIAL_SEED)]
    seed: u32,

    /// Input frames to simulate
    #[arg(short, long, default_value_t = 500)]
    turns: u32,

    /// Seed for the random button source
    #[arg(long, default_value_t = 1)]
    input_seed: u64,

    /// JSON file overriding generation parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,

    /// Print the final screen as text
    #[arg(long)]
    render: bool,

    /// Check the structural invariants of the first floor and exit
    #[arg(long)]
    validate: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level).and_then(|()| run(&args)) {
        error!("{}", e);
        eprintln!("caverns: {}", e);
        std::process::exit(1);
    }
}

/// Initializes `env_logger`; `RUST_LOG` still takes precedence.
fn initialize_logging(log_level: &str) -> CavernsResult<()> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        other => {
            return Err(CavernsError::InvalidConfig(format!(
                "unknown log level '{}'",
                other
            )))
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();

    Ok(())
}

fn run(args: &Args) -> CavernsResult<()> {
    info!("Starting Caverns v{}", caverns::VERSION);

    let config = match &args.config {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::default(),
    };

    if args.validate {
        return validate_first_floor(args.seed, config);
    }

    let mut game_state = GameState::with_config(args.seed, config);
    let mut input = InputHandler::new(RandomInput::new(args.input_seed));

    info!(
        "Simulating {} frames on seed {:#010x} (input seed {})",
        args.turns, args.seed, args.input_seed
    );

    for _ in 0..args.turns {
        let pressed = input.poll();
        game_state.handle_input(pressed);
        if game_state.is_game_over() {
            break;
        }
    }

    print_summary(&game_state);

    if args.render {
        let mut renderer = AsciiRenderer::new();
        render_game_state(&game_state, &mut renderer);
        print!("{}", renderer);
    }

    if args.dump_state {
        println!("{}", game_state.to_json()?);
    }

    Ok(())
}

/// Regenerates the first floor for `seed` and checks it.
fn validate_first_floor(seed: u32, config: GenerationConfig) -> CavernsResult<()> {
    let generator = DungeonGenerator::new(config);
    let mut rng = caverns::Lcg::new(seed);
    let level = generator.generate(&config, &mut rng)?;
    generator.validate(&level, &config)?;

    println!(
        "{}: seed {:#010x} ok ({} rooms, stairs at ({}, {}))",
        generator.generator_type(),
        seed,
        level.num_rooms(),
        level.stairs.x,
        level.stairs.y
    );
    Ok(())
}

fn print_summary(game_state: &GameState) {
    let stats = &game_state.statistics;
    let player = &game_state.player.stats;

    let outcome = match game_state.mode {
        GameMode::GameOver => "died",
        GameMode::Title => "never started",
        GameMode::Playing | GameMode::Inventory => "alive",
    };

    println!("=== Caverns run ===");
    println!("Outcome:          {}", outcome);
    println!("Floor:            {}", game_state.level.level_num);
    println!("Deepest floor:    {}", stats.max_depth_reached);
    println!(
        "Player:           level {} hp {}/{} atk {} def {} hunger {}",
        player.level, player.hp, player.max_hp, player.attack, player.defense, player.hunger
    );
    println!("Turns taken:      {}", stats.turns_taken);
    println!("Enemies defeated: {}", stats.enemies_defeated);
    println!("Items collected:  {}", stats.items_collected);
    println!("Items used:       {}", stats.items_used);
    println!("Damage dealt:     {}", stats.damage_dealt);
    println!("Damage taken:     {}", stats.damage_taken);
}

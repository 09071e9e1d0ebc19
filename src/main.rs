mod colors;
mod config;
mod error;
mod game;
mod lobby;
mod scores;
mod settings;
mod terminal;

use clap::{Parser, Subcommand};
use config::{Difficulty, GameMode, Slot};
use error::Result;
use game::SessionOptions;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scores::ScoreFile;
use settings::{Settings, MAX_TICK_MS, MIN_TICK_MS};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use terminal::Terminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightcycle")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "lightcycle: terminal light-cycle arena (duel, free-for-all, teams, endless, autotron)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a round with the given mode
    Play {
        /// Game mode: duel, ffa, teams, endless
        #[arg(short, long, default_value = "duel")]
        mode: String,

        /// Number of human players (1-2); the rest are CPUs
        #[arg(short = 'H', long)]
        humans: Option<usize>,

        /// CPU difficulty: easy, medium, hard
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Tick length in milliseconds (20-150)
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Replay the last mode and lineup
    Quick {
        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// AutoTron: CPUs race forever
    Auto {
        /// Follow the action on a large scrolling arena
        #[arg(short, long)]
        camera: bool,

        /// Tick length in milliseconds (20-150)
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show lifetime scores
    Scores,

    /// Show or change saved settings
    Settings {
        /// Set the tick length in milliseconds (20-150)
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Shorten the tick by 5 ms
        #[arg(long, conflicts_with = "slower")]
        faster: bool,

        /// Lengthen the tick by 5 ms
        #[arg(long)]
        slower: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = dispatch(cli.command) {
        tracing::error!("{}", e);
        eprintln!("lightcycle: {}", e);
        std::process::exit(1);
    }
}

/// Log to a file in the config dir; the terminal belongs to the game
fn init_logging() {
    let dir = Settings::config_dir();
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(dir.join("lightcycle.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lightcycle=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn dispatch(command: Commands) -> Result<()> {
    let mut settings = Settings::load();

    match command {
        Commands::Play {
            mode,
            humans,
            difficulty,
            tick_ms,
            seed,
        } => {
            let mode = GameMode::from_name(&mode).unwrap_or_else(|| {
                eprintln!("Unknown mode: {}. Using duel.", mode);
                eprintln!("Available: duel, ffa, teams, endless, auto");
                GameMode::Duel
            });
            let difficulty = difficulty.map(|d| {
                Difficulty::from_name(&d).unwrap_or_else(|| {
                    eprintln!("Unknown difficulty: {}. Using medium.", d);
                    Difficulty::Medium
                })
            });
            customize(&mut settings.slots, humans, difficulty);
            if let Some(ms) = tick_ms {
                settings.tick_ms = ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
            }
            let slots = lobby::slots_for(mode, &settings.slots);
            lobby::validate(mode, &slots)?;

            settings.last_mode = mode;
            if let Err(e) = settings.save() {
                tracing::warn!("could not save settings: {}", e);
            }
            play(mode, &slots, settings.tick_ms, false, seed)
        }

        Commands::Quick { seed } => {
            let mode = settings.last_mode;
            let slots = lobby::slots_for(mode, &settings.slots);
            lobby::validate(mode, &slots)?;
            play(mode, &slots, settings.tick_ms, false, seed)
        }

        Commands::Auto { camera, tick_ms, seed } => {
            let tick_ms = tick_ms.unwrap_or(settings.tick_ms).clamp(MIN_TICK_MS, MAX_TICK_MS);
            let slots = lobby::slots_for(GameMode::Auto, &[]);
            play(GameMode::Auto, &slots, tick_ms, camera, seed)
        }

        Commands::Scores => {
            let scores = ScoreFile::load();
            let data = &scores.data;
            println!("Rounds played:  {}", data.rounds_played);
            match data.win_rate() {
                Some(rate) => println!("Wins:           {} ({:.0}%)", data.total_wins, rate),
                None => println!("Wins:           {}", data.total_wins),
            }
            println!("Best streak:    {}", data.best_streak);
            println!("Current streak: {}", data.current_streak);
            println!("Longest round:  {:.1}s", data.best_round_time);
            println!("Best endless:   {:.1}s", data.best_endless_time);
            Ok(())
        }

        Commands::Settings {
            tick_ms,
            faster,
            slower,
        } => {
            let changed = tick_ms.is_some() || faster || slower;
            if let Some(ms) = tick_ms {
                settings.tick_ms = ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
            }
            if faster || slower {
                settings.adjust_tick(faster);
            }
            if changed {
                settings.save()?;
            }

            println!("Speed:     {} ms/tick", settings.tick_ms);
            println!("Last mode: {}", settings.last_mode.name());
            for (i, slot) in settings.slots.iter().enumerate() {
                let who = if slot.human {
                    format!("Human ({})", config::keyset(slot.keyset).name)
                } else {
                    format!("CPU {}", slot.difficulty.name())
                };
                println!("  {}. {:<8} {:<16} team {}", i + 1, slot.color.name(), who, slot.team + 1);
            }
            println!("File:      {}", Settings::config_path().display());
            Ok(())
        }
    }
}

/// Apply command-line lineup overrides to the saved slots
fn customize(slots: &mut [Slot], humans: Option<usize>, difficulty: Option<Difficulty>) {
    if let Some(n) = humans {
        for (i, slot) in slots.iter_mut().enumerate() {
            slot.human = i < n;
            if slot.human {
                slot.keyset = i;
            }
        }
    }
    if let Some(d) = difficulty {
        for slot in slots.iter_mut().filter(|s| !s.human) {
            slot.difficulty = d;
        }
    }
}

fn play(mode: GameMode, slots: &[Slot], tick_ms: u64, auto_camera: bool, seed: Option<u64>) -> Result<()> {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    tracing::info!(seed, mode = mode.name(), tick_ms, "session start");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scores = ScoreFile::load();
    let options = SessionOptions { tick_ms, auto_camera };

    let mut term = Terminal::new(true)?;
    let last = game::run(&mut term, &mut scores, &mut rng, mode, slots, options)?;
    drop(term);

    if let Some(result) = last {
        tracing::info!(?result, "session end");
    }
    Ok(())
}

use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use battle_royale::audio::AudioManager;
use battle_royale::compute::init_arena;
use battle_royale::config::GameConfig;
use battle_royale::display::{TerminalRenderer, Viewport};
use battle_royale::game_loop::{run_match, Collaborators, MatchOutcome, SystemClock};
use battle_royale::input::{default_bindings, TerminalInput};

const TITLE: &str = "Epic Battle Royale";

#[derive(Parser, Debug)]
#[command(name = "battle_royale")]
#[command(about = "Two-player local top-down shooter for the terminal")]
struct Cli {
    /// Sound played on every shot; audio is disabled if it can't be loaded
    #[arg(long, default_value = "./shot.wav")]
    sound: PathBuf,
    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Seed for the actor colour roll
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(cli: &Cli) -> Result<()> {
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
    }
    Ok(())
}

/// Switch to the game screen. Returns whether key-release events were
/// enabled; the caller restores the terminal whatever this returns.
fn enter_screen<W: Write>(out: &mut W) -> io::Result<bool> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::SetTitle(TITLE))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to hold windows.
    if !terminal::supports_keyboard_enhancement().unwrap_or(false) {
        return Ok(false);
    }
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    log::info!("{} starting...", TITLE);

    // Load assets before the alternate screen so a warning stays readable.
    let mut audio = AudioManager::from_asset(stdout(), &cli.sound);

    let config = GameConfig {
        ticks_per_second: cli.fps,
        ..GameConfig::default()
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let arena = init_arena(config, &mut rng);

    terminal::enable_raw_mode()?;
    let mut out = BufWriter::new(stdout());
    let setup = enter_screen(&mut out);
    let keyboard_enhanced = matches!(setup, Ok(true));

    let result = match setup {
        Ok(enhanced) => {
            let (width, height) = (arena.config.width, arena.config.height);
            let mut renderer =
                TerminalRenderer::new(out, Viewport::FollowTerminal, width, height);
            let mut input = TerminalInput::new(enhanced);
            let mut clock = SystemClock::new();

            let result = run_match(
                arena,
                &default_bindings(),
                Collaborators {
                    input: &mut input,
                    renderer: &mut renderer,
                    audio: &mut audio,
                    clock: &mut clock,
                },
            );
            out = renderer.into_inner();
            result
        }
        Err(e) => Err(e),
    };

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result.context("match loop failed")? {
        MatchOutcome::Finished { winner } => println!("{} wins!", winner),
        MatchOutcome::Quit => log::info!("Quit before a winner was decided"),
    }
    Ok(())
}

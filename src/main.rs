//! Portfolio Panic - headless game driver.
//!
//! Builds one seeded session and plays it to completion with a fixed script:
//! spread the bankroll at the open, lean short mid-game, take profits into
//! the final round. The whole game is narrated to stdout as it unfolds, so a
//! run doubles as an end-to-end exercise of the engine and a way to eyeball
//! how a given seed plays out.
//!
//! ```text
//! cargo run -- --difficulty hard --mode meltdown --seed 42
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use engine::{
    GameSession, Phase, PriceUpdate, SessionConfig, SessionError, SessionEvent, TradeReceipt,
    TradeSide, TradeSpec,
};
use storage::{SaveFile, StorageError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::{Difficulty, GameMode};

/// Portfolio Panic - market survival simulator
#[derive(Parser, Debug)]
#[command(name = "portfolio-panic")]
#[command(about = "Plays one scripted Portfolio Panic session to completion")]
#[command(version)]
struct Args {
    /// Difficulty tier (easy|normal|hard)
    #[arg(long, env = "PANIC_DIFFICULTY", default_value = "normal")]
    difficulty: Difficulty,

    /// Game mode (classic|bull_run|meltdown)
    #[arg(long, env = "PANIC_MODE", default_value = "classic")]
    mode: GameMode,

    /// Session seed; the same seed replays the same game
    #[arg(long, env = "PANIC_SEED", default_value_t = 7)]
    seed: u64,

    /// Save file to fold this run's achievements into
    #[arg(long, env = "PANIC_SAVE")]
    save: Option<PathBuf>,

    /// Suppress log output (the game narration still prints)
    #[arg(long, env = "PANIC_QUIET")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    let config = SessionConfig::default()
        .with_difficulty(args.difficulty)
        .with_mode(args.mode)
        .with_seed(args.seed);
    let mut session = match GameSession::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("invalid session config: {e}");
            return ExitCode::FAILURE;
        }
    };

    print_banner(&args, &session);
    run_scripted_session(&mut session);
    print_summary(&session);

    if let Some(path) = &args.save {
        if let Err(e) = persist_results(path, &args, &session) {
            eprintln!("failed to update save file {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        info!("save file updated: {}", path.display());
    }

    ExitCode::SUCCESS
}

/// Print the session configuration box before the game starts.
fn print_banner(args: &Args, session: &GameSession) {
    let config = session.config();
    let mode = config.mode.settings();
    let universe = config
        .universe
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ");

    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║  Portfolio Panic - {:<44}║", format!("{} mode", mode.name));
    println!("║  {:<62}║", mode.description);
    println!("╠════════════════════════════════════════════════════════════════╣");
    println!(
        "║  Difficulty: {:<8} │ Seed: {:<33}║",
        args.difficulty.to_string(),
        args.seed
    );
    println!(
        "║  Bankroll: ${:<9.2} │ Rounds: {:<2} │ Market update every {:2}s   ║",
        config.starting_cash().raw(),
        config.total_rounds(),
        config.update_interval_secs()
    );
    println!("║  Universe: {:<52}║", universe);
    println!("╚════════════════════════════════════════════════════════════════╝");
}

/// Play one full game with a fixed script: spread the bankroll at the open,
/// short the most volatile name mid-game, then cover and trim into the close.
fn run_scripted_session(session: &mut GameSession) {
    let universe = session.config().universe.clone();
    let total_rounds = session.config().total_rounds();
    let short_round = total_rounds / 2 + 1;
    let Some(short_target) = universe
        .iter()
        .copied()
        .max_by(|a, b| a.base_volatility().total_cmp(&b.base_volatility()))
    else {
        return;
    };

    for event in session.start() {
        print_event(&event);
    }

    // Opening book: one equal slice per asset, one slice held back in cash.
    let slices = universe.len() + 1;
    for (i, &asset) in universe.iter().enumerate() {
        let fraction = 1.0 / (slices - i) as f64;
        report(session.buy(asset, TradeSpec::Fraction(fraction)), "buy");
    }

    while session.phase() != Phase::GameComplete {
        for event in session.step() {
            print_event(&event);
            match event {
                SessionEvent::RoundStarted { round } if round == short_round => {
                    report(session.open_short(short_target, 0.5), "short");
                }
                SessionEvent::RoundStarted { round } if round == total_rounds => {
                    if session.ledger().short(short_target).is_some() {
                        report(session.close_short(short_target), "cover");
                    }
                    for &asset in &universe {
                        if !session.ledger().quantity(asset).is_zero() {
                            report(session.sell(asset, TradeSpec::Fraction(0.5)), "sell");
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

/// One narration line per session event.
fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::SessionStarted {
            difficulty,
            mode,
            starting_cash,
        } => println!(">> {difficulty} {mode} session, bankroll {starting_cash}"),
        SessionEvent::RoundStarted { round } => println!("\n-- round {round} --"),
        SessionEvent::RoundCompleted { .. } => {}
        SessionEvent::MarketUpdated { updates } => println!("   {}", format_updates(updates)),
        SessionEvent::NewsPublished { event } => {
            println!("   NEWS: {}", event.headline);
            println!("         tip: {}", event.tip);
        }
        SessionEvent::NewsImpactApplied {
            headline,
            updates,
            is_crash,
        } => {
            if *is_crash {
                println!("   !! CRASH !! {headline}");
            } else {
                println!("   impact: {headline}");
            }
            println!("   {}", format_updates(updates));
        }
        SessionEvent::AchievementsUnlocked { achievements } => {
            for achievement in achievements {
                println!("   * unlocked: {}", achievement.title());
            }
        }
        SessionEvent::GameCompleted { final_value } => {
            println!("\n== game over: final portfolio value {final_value}");
        }
    }
}

fn format_updates(updates: &[PriceUpdate]) -> String {
    updates
        .iter()
        .map(|u| format!("{} {} ({:+.2}%)", u.asset, u.price, u.change_percent))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Print a trade receipt, or log why the trade was skipped.
fn report(result: Result<TradeReceipt, SessionError>, verb: &str) {
    match result {
        Ok(receipt) => {
            let mut line = match receipt.side {
                TradeSide::Buy | TradeSide::Sell => format!(
                    "   {verb}: {} {} at {}, cash flow {}",
                    receipt.quantity, receipt.asset, receipt.price, receipt.cash_flow
                ),
                TradeSide::ShortOpen | TradeSide::ShortClose => format!(
                    "   {verb}: {} at {}, cash flow {}",
                    receipt.asset, receipt.price, receipt.cash_flow
                ),
            };
            if let Some(pnl) = receipt.realized {
                line.push_str(&format!(", realized {pnl}"));
            }
            println!("{line}");
        }
        Err(e) => warn!("{verb} skipped: {e}"),
    }
}

/// Print the final results box, the closing book, and unlocked achievements.
fn print_summary(session: &GameSession) {
    let snapshot = session.snapshot();
    let starting = session.config().starting_cash();
    let final_value = snapshot.portfolio_value;
    let return_pct = (final_value.raw() / starting.raw() - 1.0) * 100.0;
    let stats = &snapshot.stats;

    println!();
    println!("╔════════════════════════════════════════════════════════════════╗");
    println!("║  {:<62}║", "Game complete");
    println!("╠════════════════════════════════════════════════════════════════╣");
    println!(
        "║  Final value: {:<12} │ Return: {:<26}║",
        final_value.to_string(),
        format!("{return_pct:+.1}%")
    );
    println!(
        "║  Closing cash: {:<10} │ Trades: {:<2} │ Profitable: {:<10}║",
        snapshot.cash.to_string(),
        stats.trades_executed,
        stats.profitable_trades
    );
    println!(
        "║  Best trade: {:<10} │ Worst trade: {:<10} │ Crashes: {:<2}║",
        stats.biggest_gain.to_string(),
        stats.biggest_loss.to_string(),
        stats.market_crashes_weathered
    );
    println!("╚════════════════════════════════════════════════════════════════╝");

    println!();
    println!("  {:<12} {:>10} {:>12} {:>12}", "asset", "price", "held", "value");
    for a in &snapshot.assets {
        println!(
            "  {:<12} {:>10} {:>12} {:>12}",
            a.asset.name(),
            a.price.to_string(),
            a.quantity.to_string(),
            (a.quantity * a.price).to_string()
        );
    }
    println!(
        "  {:<12} {:>10} {:>12} {:>12}",
        "cash",
        "",
        "",
        snapshot.cash.to_string()
    );

    println!();
    if snapshot.unlocked.is_empty() {
        println!("  no achievements unlocked this run");
    } else {
        println!("  achievements:");
        for achievement in &snapshot.unlocked {
            println!("    * {:<16} {}", achievement.title(), achievement.description());
        }
    }
}

/// Fold this run's unlocks into the save file, creating it if absent.
fn persist_results(path: &Path, args: &Args, session: &GameSession) -> Result<(), StorageError> {
    let file = SaveFile::new(path);
    let mut state = file.load()?;
    state.difficulty = args.difficulty;
    state.game_mode = args.mode;
    state.game_in_progress = false;
    for achievement in session.unlocked_achievements() {
        state.record_achievement(achievement.id());
    }
    file.save(&state)
}

//! Terminal front-end for the simulator: runs the engine plus the fake
//! deposit feed and renders each lifecycle event as the round display text.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use jackpot_sim::{engine, feed, EngineConfig, FeedConfig, RoundEvent};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let (handle, engine_task) = engine::spawn(EngineConfig::default());
    let feed_task = tokio::spawn(feed::run_feed(handle.clone(), FeedConfig::default()));

    let events = handle.subscribe();
    tokio::select! {
        _ = render(events) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            handle.shutdown().await;
        }
    }

    feed_task.abort();
    engine_task.await?;
    Ok(())
}

async fn render(mut events: tokio::sync::broadcast::Receiver<RoundEvent>) {
    let mut pot = 0.0;
    while let Ok(event) = events.recv().await {
        match event {
            RoundEvent::RoundStarted { round_id } => {
                pot = 0.0;
                println!("=== NEW ROUND! (#{round_id}) — place your deposits now ===");
            }
            RoundEvent::DepositAccepted {
                deposit, pot_after, ..
            } => {
                pot = pot_after;
                println!(
                    "  {} deposited ${:.0} {} (pot ${:.0})",
                    deposit.user, deposit.amount, deposit.token, pot
                );
            }
            RoundEvent::CountdownTick { seconds } => {
                if seconds % 10 == 0 || seconds <= 5 {
                    println!("  ${pot:.0} — round ends in {}", format_clock(seconds));
                }
            }
            RoundEvent::RoundLocked { .. } => println!("  Selecting Winner"),
            RoundEvent::SpinStarted {
                rotation, scenario, ..
            } => {
                println!("  wheel spinning to {rotation:.1}° ({scenario:?})");
            }
            RoundEvent::RoundSettled { winner, amount, .. } => {
                println!("  🎉 {winner} WINS! ${amount:.0} 🎉");
            }
            RoundEvent::NewRoundTick { seconds } => println!("  New round in {seconds}s"),
            RoundEvent::WheelReset => {}
        }
    }
}

fn format_clock(seconds: u32) -> String {
    format!("0:{seconds:02}")
}

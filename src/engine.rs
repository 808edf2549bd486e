//! The round state machine. A single tokio task owns every piece of round
//! state; commands arrive over an mpsc channel and lifecycle events leave
//! over a broadcast channel, so there is exactly one writer and one timer
//! purpose live at any moment.
//!
//! Phase cycle: `Active -> Ending -> Ended -> Starting -> Active`. No other
//! transition exists.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::constants::SELF_USER;
use crate::errors::EngineError;
use crate::events::{RoundEvent, SoundCue};
use crate::history::DrawHistory;
use crate::state::{unix_now, Deposit, DepositRequest, PastDraw, RoundPhase, RoundSnapshot};
use crate::wheel;

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

enum Command {
    Deposit {
        req: DepositRequest,
        reply: oneshot::Sender<Result<Deposit, EngineError>>,
    },
    Snapshot {
        reply: oneshot::Sender<RoundSnapshot>,
    },
    History {
        reply: oneshot::Sender<Vec<PastDraw>>,
    },
    Shutdown,
}

/// Cloneable front door to a running engine task.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Command>,
    events: broadcast::Sender<RoundEvent>,
}

impl EngineHandle {
    /// Submits a deposit. Rejected outside the active phase and while a
    /// chart transition is still settling.
    pub async fn deposit(&self, req: DepositRequest) -> Result<Deposit, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Deposit { req, reply: tx })
            .await
            .map_err(|_| EngineError::EngineClosed)?;
        rx.await.map_err(|_| EngineError::EngineClosed)?
    }

    pub async fn snapshot(&self) -> Result<RoundSnapshot, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot { reply: tx })
            .await
            .map_err(|_| EngineError::EngineClosed)?;
        rx.await.map_err(|_| EngineError::EngineClosed)
    }

    /// Settled rounds, newest first.
    pub async fn history(&self) -> Result<Vec<PastDraw>, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::History { reply: tx })
            .await
            .map_err(|_| EngineError::EngineClosed)?;
        rx.await.map_err(|_| EngineError::EngineClosed)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.events.subscribe()
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(Command::Shutdown).await;
    }
}

/// Spawns the engine task and returns its handle.
pub fn spawn(cfg: EngineConfig) -> (EngineHandle, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, _) = broadcast::channel(EVENT_BUFFER);
    let handle = EngineHandle {
        cmd_tx,
        events: event_tx.clone(),
    };
    let engine = JackpotEngine::new(cfg, cmd_rx, event_tx);
    let task = tokio::spawn(engine.run());
    (handle, task)
}

struct JackpotEngine {
    cfg: EngineConfig,
    rng: ChaCha20Rng,
    cmd_rx: mpsc::Receiver<Command>,
    events: broadcast::Sender<RoundEvent>,

    round_id: u64,
    phase: RoundPhase,
    deposits: Vec<Deposit>,
    seconds: u32,
    new_round_countdown: u32,
    winner: Option<Deposit>,
    win_amount: f64,
    spin_rotation: f64,
    /// While set and in the future, the chart transition from the last
    /// accepted deposit is still in flight and new deposits are rejected.
    animating_until: Option<Instant>,
    history: DrawHistory,
}

impl JackpotEngine {
    fn new(
        cfg: EngineConfig,
        cmd_rx: mpsc::Receiver<Command>,
        events: broadcast::Sender<RoundEvent>,
    ) -> Self {
        let rng = match cfg.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let seconds = cfg.round_duration_secs;
        let new_round_countdown = cfg.new_round_countdown_secs;
        let history = DrawHistory::new(cfg.history_limit);
        Self {
            cfg,
            rng,
            cmd_rx,
            events,
            round_id: 1,
            phase: RoundPhase::Active,
            deposits: Vec::new(),
            seconds,
            new_round_countdown,
            winner: None,
            win_amount: 0.0,
            spin_rotation: 0.0,
            animating_until: None,
            history,
        }
    }

    async fn run(mut self) {
        tracing::info!(round_id = self.round_id, "engine started");
        let _ = self.events.send(RoundEvent::RoundStarted {
            round_id: self.round_id,
        });
        loop {
            let keep_running = match self.phase {
                RoundPhase::Active => self.run_active().await,
                RoundPhase::Ending => self.run_ending().await,
                RoundPhase::Ended => self.run_ended().await,
                RoundPhase::Starting => self.run_starting().await,
            };
            if !keep_running {
                break;
            }
        }
        tracing::info!("engine stopped");
    }

    async fn run_active(&mut self) -> bool {
        let mut tick = time::interval_at(
            Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.seconds = self.seconds.saturating_sub(1);
                    let _ = self.events.send(RoundEvent::CountdownTick { seconds: self.seconds });
                    if self.seconds == 0 {
                        self.phase = RoundPhase::Ending;
                        return true;
                    }
                }
                cmd = self.cmd_rx.recv() => {
                    if !self.handle_command(cmd) {
                        return false;
                    }
                }
            }
        }
    }

    async fn run_ending(&mut self) -> bool {
        // The whole sequence counts as one long animation: the feed and any
        // external depositor are locked out until the next active phase.
        self.animating_until = Some(Instant::now() + self.cfg.spin_duration);
        let _ = self.events.send(RoundEvent::RoundLocked {
            round_id: self.round_id,
        });

        if self.deposits.is_empty() {
            tracing::info!(round_id = self.round_id, "round ended with no deposits");
            self.phase = RoundPhase::Ended;
            return true;
        }

        // Uniform over deposits, not amount-weighted. Chosen before any
        // angle math: the spin only dramatizes this pick.
        let pick = self.rng.gen_range(0..self.deposits.len());
        let chosen = self.deposits[pick].clone();
        let pot = self.pot();

        if !self.idle_for(self.cfg.spin_start_delay).await {
            return false;
        }

        match wheel::plan_spin(
            &self.deposits,
            &chosen.id,
            pot,
            self.cfg.capacity,
            &mut self.rng,
        ) {
            Ok(plan) => {
                self.spin_rotation = plan.rotation;
                let _ = self.events.send(RoundEvent::SpinStarted {
                    round_id: self.round_id,
                    rotation: plan.rotation,
                    scenario: plan.scenario,
                });
            }
            Err(err) => tracing::warn!(%err, "spin plan failed, revealing without animation"),
        }

        if !self.idle_for(self.cfg.spin_duration + self.cfg.spin_buffer).await {
            return false;
        }

        self.winner = Some(chosen.clone());
        self.win_amount = pot;
        self.history.record(PastDraw {
            round_id: self.round_id,
            winner: chosen.user.clone(),
            amount: pot,
            settled_at: unix_now(),
        });
        tracing::info!(
            round_id = self.round_id,
            winner = %chosen.user,
            amount = pot,
            "round settled"
        );
        let _ = self.events.send(RoundEvent::RoundSettled {
            round_id: self.round_id,
            winner: chosen.user,
            amount: pot,
            sound: SoundCue::Win,
        });

        self.phase = RoundPhase::Ended;
        true
    }

    async fn run_ended(&mut self) -> bool {
        let mut tick = time::interval_at(
            Instant::now() + Duration::from_secs(1),
            Duration::from_secs(1),
        );
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    self.new_round_countdown = self.new_round_countdown.saturating_sub(1);
                    let _ = self.events.send(RoundEvent::NewRoundTick {
                        seconds: self.new_round_countdown,
                    });
                    if self.new_round_countdown == 0 {
                        self.phase = RoundPhase::Starting;
                        return true;
                    }
                }
                cmd = self.cmd_rx.recv() => {
                    if !self.handle_command(cmd) {
                        return false;
                    }
                }
            }
        }
    }

    async fn run_starting(&mut self) -> bool {
        self.reset_round();
        let _ = self.events.send(RoundEvent::WheelReset);
        if !self.idle_for(self.cfg.round_restart_delay).await {
            return false;
        }
        self.round_id += 1;
        self.phase = RoundPhase::Active;
        tracing::info!(round_id = self.round_id, "new round started");
        let _ = self.events.send(RoundEvent::RoundStarted {
            round_id: self.round_id,
        });
        true
    }

    /// Waits out `dur` while still answering commands. Deposits submitted
    /// here go through the same gate as everywhere else and get rejected.
    async fn idle_for(&mut self, dur: Duration) -> bool {
        let deadline = Instant::now() + dur;
        loop {
            tokio::select! {
                _ = time::sleep_until(deadline) => return true,
                cmd = self.cmd_rx.recv() => {
                    if !self.handle_command(cmd) {
                        return false;
                    }
                }
            }
        }
    }

    /// Returns false when the engine should stop.
    fn handle_command(&mut self, cmd: Option<Command>) -> bool {
        match cmd {
            Some(Command::Deposit { req, reply }) => {
                let _ = reply.send(self.accept_deposit(req));
                true
            }
            Some(Command::Snapshot { reply }) => {
                let _ = reply.send(self.snapshot());
                true
            }
            Some(Command::History { reply }) => {
                let _ = reply.send(self.history.recent().cloned().collect());
                true
            }
            Some(Command::Shutdown) | None => false,
        }
    }

    fn accept_deposit(&mut self, req: DepositRequest) -> Result<Deposit, EngineError> {
        if self.phase != RoundPhase::Active {
            return Err(EngineError::RoundNotActive);
        }
        if req.amount.is_nan() || req.amount <= 0.0 {
            return Err(EngineError::InvalidDepositAmount);
        }
        if self.animation_in_flight() {
            return Err(EngineError::AnimationInFlight);
        }

        let deposit = Deposit {
            id: Uuid::new_v4().to_string(),
            user: req.user,
            token: req.token,
            amount: req.amount,
            timestamp: unix_now(),
        };
        self.deposits.push(deposit.clone());
        self.animating_until = Some(Instant::now() + self.cfg.deposit_settle_window);

        let sound = if deposit.user == SELF_USER {
            SoundCue::UserDeposit
        } else {
            SoundCue::Deposit
        };
        tracing::debug!(
            user = %deposit.user,
            token = %deposit.token,
            amount = deposit.amount,
            pot = self.pot(),
            "deposit accepted"
        );
        let _ = self.events.send(RoundEvent::DepositAccepted {
            deposit: deposit.clone(),
            pot_after: self.pot(),
            sound,
        });
        Ok(deposit)
    }

    fn animation_in_flight(&self) -> bool {
        self.animating_until
            .map(|until| Instant::now() < until)
            .unwrap_or(false)
    }

    fn pot(&self) -> f64 {
        self.deposits.iter().map(|d| d.amount).sum()
    }

    fn reset_round(&mut self) {
        self.deposits.clear();
        self.winner = None;
        self.win_amount = 0.0;
        self.seconds = self.cfg.round_duration_secs;
        self.new_round_countdown = self.cfg.new_round_countdown_secs;
        self.spin_rotation = 0.0;
        self.animating_until = None;
    }

    fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round_id: self.round_id,
            phase: self.phase,
            deposits: self.deposits.clone(),
            pot: self.pot(),
            seconds: self.seconds,
            new_round_countdown: self.new_round_countdown,
            winner: self.winner.clone(),
            win_amount: self.win_amount,
            spin_rotation: self.spin_rotation,
            animation_in_flight: self.animation_in_flight(),
        }
    }
}

//! Session - single-writer owner of a running game
//!
//! A session spawns one worker task that owns the [`GameState`] outright.
//! Player actions arrive over a bounded command channel and gravity ticks come
//! from the session's [`GravityScheduler`]; the worker handles one of them at a
//! time, to completion, inside a `select!` loop. Nothing else ever touches the
//! state, so a tick can never interleave with an action.
//!
//! After every committed mutation the worker publishes, in this order:
//!
//! 1. the new [`GameSnapshot`] on a `watch` channel (latest value wins)
//! 2. a [`Notification`] with the mutation's events on a `broadcast` channel
//! 3. the reply to the command that caused it, if any
//!
//! Dropping the [`Session`] aborts the worker, which also stops gravity.

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::core::{ConfigError, GameConfig, GameEvent, GameSnapshot, GameState};
use crate::scheduler::GravityScheduler;
use crate::types::Action;

/// Capacity of the notification fan-out; slow subscribers lose old entries
const NOTIFICATION_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("session is closed")]
    Closed,

    #[error("command queue is full")]
    Backpressure,
}

/// Events of one committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub revision: u64,
    pub events: Vec<GameEvent>,
}

/// Command delivered to the worker
#[derive(Debug)]
enum Command {
    Action {
        action: Action,
        reply: Option<oneshot::Sender<bool>>,
    },
    Shutdown,
}

/// Handle to a running game session
pub struct Session {
    cmd_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    notify_tx: broadcast::Sender<Notification>,
    worker: Option<JoinHandle<GameState>>,
}

impl Session {
    /// Validate `config`, build a game and start its worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: GameConfig) -> Result<Self, SessionError> {
        let state = GameState::new(config)?;
        Ok(Self::from_state(state))
    }

    /// Start a worker around an already built game
    pub fn from_state(mut state: GameState) -> Self {
        let config = state.config().clone();
        // Creation events are reflected by the initial snapshot
        state.take_events();

        let (cmd_tx, cmd_rx) = mpsc::channel(config.command_buffer.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let (notify_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);

        info!(
            "session started: {}x{} grid, difficulty {}, gravity every {:?}",
            config.width,
            config.height,
            config.difficulty,
            config.gravity_interval()
        );

        let worker = tokio::spawn(run_worker(
            state,
            cmd_rx,
            snapshot_tx,
            notify_tx.clone(),
            config,
        ));

        Self {
            cmd_tx,
            snapshot_rx,
            notify_tx,
            worker: Some(worker),
        }
    }

    /// Submit an action and wait until it has been applied or refused
    pub async fn submit(&self, action: Action) -> Result<bool, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Action {
                action,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Enqueue an action without waiting for the outcome
    pub fn try_submit(&self, action: Action) -> Result<(), SessionError> {
        self.cmd_tx
            .try_send(Command::Action {
                action,
                reply: None,
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => SessionError::Backpressure,
                mpsc::error::TrySendError::Closed(_) => SessionError::Closed,
            })
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that always holds the latest snapshot
    pub fn watch(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Subscribe to per-mutation notifications
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    /// Stop gravity and the worker, returning the final game state
    pub async fn shutdown(mut self) -> Result<GameState, SessionError> {
        let _ = self.cmd_tx.send(Command::Shutdown).await;
        let worker = self.worker.take().ok_or(SessionError::Closed)?;
        worker.await.map_err(|_| SessionError::Closed)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

async fn run_worker(
    mut state: GameState,
    mut cmd_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    notify_tx: broadcast::Sender<Notification>,
    config: GameConfig,
) -> GameState {
    let mut gravity = GravityScheduler::start(config.initial_delay(), config.gravity_interval());
    if state.game_over() {
        gravity.cancel();
    }

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(Command::Action { action, reply }) => {
                    let applied = state.apply_action(action);
                    publish(&mut state, &snapshot_tx, &notify_tx);
                    if let Some(reply) = reply {
                        let _ = reply.send(applied);
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            _ = gravity.tick() => {
                state.tick();
                publish(&mut state, &snapshot_tx, &notify_tx);
            }
        }

        if state.game_over() && gravity.is_active() {
            info!("game over at revision {}, gravity stopped", state.revision());
            gravity.cancel();
        }
    }

    debug!("session worker exiting at revision {}", state.revision());
    state
}

/// Push the snapshot and events of the mutation that just completed
fn publish(
    state: &mut GameState,
    snapshot_tx: &watch::Sender<GameSnapshot>,
    notify_tx: &broadcast::Sender<Notification>,
) {
    let events = state.take_events();
    if events.is_empty() {
        return;
    }

    let current = &*state;
    snapshot_tx.send_modify(|snapshot| current.snapshot_into(snapshot));

    // No subscribers is not an error
    if notify_tx
        .send(Notification {
            revision: state.revision(),
            events,
        })
        .is_err()
        && notify_tx.receiver_count() > 0
    {
        warn!("notification dropped at revision {}", state.revision());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, PoolWrap};
    use crate::types::ShapeKind;
    use std::time::Duration;
    use tokio::time::{self, Instant};

    fn quiet_config() -> GameConfig {
        GameConfig {
            initial_delay_ms: 60_000,
            ..GameConfig::default()
        }
    }

    fn fixed(config: GameConfig, pool: &[ShapeKind]) -> Session {
        Session::from_state(GameState::with_pool(config, pool.to_vec()).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_respects_initial_delay_and_period() {
        let config = GameConfig {
            difficulty: 4,
            ..GameConfig::default()
        };
        let session = fixed(config, &[ShapeKind::T]);
        let mut rx = session.watch();
        let start = Instant::now();

        rx.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(rx.borrow_and_update().active.as_ref().unwrap().y, 1);

        rx.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1250));
        assert_eq!(rx.borrow_and_update().active.as_ref().unwrap().y, 2);
    }

    #[tokio::test]
    async fn test_submit_reports_refusal() {
        let session = fixed(quiet_config(), &[ShapeKind::O]);

        let mut moves = 0;
        while session.submit(Action::MoveLeft).await.unwrap() {
            moves += 1;
            assert!(moves < 10);
        }

        // O covers columns x..=x+1 and started at 5
        assert_eq!(moves, 5);
        assert_eq!(session.snapshot().active.unwrap().x, 0);
    }

    #[tokio::test]
    async fn test_snapshot_published_before_reply() {
        let session = fixed(quiet_config(), &[ShapeKind::T]);
        let before = session.snapshot().revision;

        assert!(session.submit(Action::MoveRight).await.unwrap());
        let after = session.snapshot();
        assert_eq!(after.revision, before + 1);
        assert_eq!(after.active.unwrap().x, 6);
    }

    #[tokio::test]
    async fn test_subscribers_receive_lock_events() {
        let config = GameConfig {
            pool_wrap: PoolWrap::Full,
            ..quiet_config()
        };
        let session = fixed(config, &[ShapeKind::O, ShapeKind::I]);
        let mut events = session.subscribe();

        assert!(session.submit(Action::HardDrop).await.unwrap());

        let notification = events.recv().await.unwrap();
        assert_eq!(notification.revision, session.snapshot().revision);
        assert!(notification.events.iter().any(GameEvent::is_lock));
        assert!(notification
            .events
            .contains(&GameEvent::Spawned { kind: ShapeKind::I }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gravity_stops_after_game_over() {
        let config = GameConfig {
            width: 4,
            height: 2,
            frozen_top_rows: 0,
            difficulty: 1000,
            initial_delay_ms: 0,
            ..GameConfig::default()
        };
        let session = fixed(config, &[ShapeKind::O]);
        let mut rx = session.watch();

        rx.wait_for(|s| s.phase == Phase::GameOver).await.unwrap();
        let revision = session.snapshot().revision;

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(session.snapshot().revision, revision);
        assert!(!session.submit(Action::HardDrop).await.unwrap());
    }

    #[tokio::test]
    async fn test_try_submit_backpressure() {
        let config = GameConfig {
            command_buffer: 1,
            ..quiet_config()
        };
        let session = fixed(config, &[ShapeKind::T]);

        // The worker cannot run until this task yields
        session.try_submit(Action::MoveLeft).unwrap();
        assert!(matches!(
            session.try_submit(Action::MoveLeft),
            Err(SessionError::Backpressure)
        ));
    }

    #[tokio::test]
    async fn test_drop_stops_worker() {
        let session = fixed(quiet_config(), &[ShapeKind::T]);
        let mut rx = session.watch();

        drop(session);
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_returns_final_state() {
        let session = fixed(quiet_config(), &[ShapeKind::T]);
        assert!(session.submit(Action::SoftDrop).await.unwrap());
        assert!(session.submit(Action::SoftDrop).await.unwrap());

        let state = session.shutdown().await.unwrap();
        assert_eq!(state.active().unwrap().y, 2);
        assert_eq!(state.revision(), 2);
    }

    #[tokio::test]
    async fn test_start_rejects_malformed_config() {
        let config = GameConfig {
            difficulty: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::start(config),
            Err(SessionError::Config(ConfigError::Difficulty { .. }))
        ));
    }
}

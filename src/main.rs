//! Terminal runner (default binary).
//!
//! Starts a session from `BLOCKFALL_*` environment settings, forwards key
//! presses as actions and redraws the board whenever a new snapshot is
//! published. Logging goes to stderr via `RUST_LOG`, e.g.
//! `RUST_LOG=debug blockfall 2>blockfall.log`.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use log::{info, warn};
use tokio::sync::mpsc;

use blockfall::core::GameConfig;
use blockfall::engine::{Session, SessionError};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::view::TerminalView;

/// How often the input thread checks whether the runner is gone
const INPUT_POLL: Duration = Duration::from_millis(100);

enum Input {
    Key(KeyEvent),
    Resize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = GameConfig::from_env()?;
    let session = Session::start(config)?;

    let mut view = TerminalView::new();
    view.enter()?;

    let result = run(&session, &mut view).await;

    // Always try to restore terminal state.
    let _ = view.exit();

    let final_state = session.shutdown().await?;
    info!("session ended at revision {}", final_state.revision());
    result
}

async fn run(session: &Session, view: &mut TerminalView) -> Result<()> {
    let mut inputs = spawn_input_thread();
    let mut snapshots = session.watch();

    view.draw(&snapshots.borrow_and_update())?;

    loop {
        tokio::select! {
            input = inputs.recv() => match input {
                Some(Input::Key(key)) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        match session.try_submit(action) {
                            Ok(()) => {}
                            Err(SessionError::Backpressure) => {
                                warn!("dropped {}: command queue full", action.as_str());
                            }
                            Err(e) => return Err(e.into()),
                        }
                    }
                }
                Some(Input::Resize) => {
                    view.clear()?;
                    view.draw(&snapshots.borrow_and_update())?;
                }
                None => return Ok(()),
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = snapshots.borrow_and_update().clone();
                view.draw(&snapshot)?;
            }
        }
    }
}

/// Read terminal events on a dedicated thread; crossterm reads block.
fn spawn_input_thread() -> mpsc::Receiver<Input> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || loop {
        if tx.is_closed() {
            return;
        }
        match event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!("terminal poll failed: {e}");
                return;
            }
        }
        let input = match event::read() {
            Ok(Event::Key(key)) => Input::Key(key),
            Ok(Event::Resize(_, _)) => Input::Resize,
            Ok(_) => continue,
            Err(e) => {
                warn!("terminal read failed: {e}");
                return;
            }
        };
        if tx.blocking_send(input).is_err() {
            return;
        }
    });
    rx
}

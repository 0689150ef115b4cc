//! Full-screen terminal front end
//!
//! Queries run on the streaming loop in a background task; tokens are drawn
//! as they arrive. Keyboard input and run events are multiplexed with
//! `tokio::select!` so the screen stays responsive while a query runs.

mod input;
mod state;
mod terminal;
mod ui;

use crate::agent::{event_channel, AgentError, AgentEvent, ReactAgent, RunOutcome};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use input::{handle_key, InputAction};
use state::ChatState;
use std::error::Error;
use terminal::{init_terminal, restore_terminal, Tui};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A query running in the background
struct ActiveRun {
    events: mpsc::Receiver<AgentEvent>,
    handle: JoinHandle<Result<RunOutcome, AgentError>>,
}

enum RunUpdate {
    Event(AgentEvent),
    Finished(Result<RunOutcome, String>),
}

impl ActiveRun {
    fn start(agent: &ReactAgent, query: String) -> Self {
        let (tx, events) = event_channel();
        let agent = agent.clone();
        let handle = tokio::spawn(async move { agent.run_streaming(&query, tx).await });
        Self { events, handle }
    }

    /// Next event, or the run's result once its events are drained
    async fn next_update(&mut self) -> RunUpdate {
        if let Some(event) = self.events.recv().await {
            return RunUpdate::Event(event);
        }
        // Sender dropped: the task has returned or is about to
        let result = match (&mut self.handle).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("Query task failed: {e}")),
        };
        RunUpdate::Finished(result)
    }
}

/// Waits forever when nothing is running
async fn next_update(active: &mut Option<ActiveRun>) -> RunUpdate {
    match active {
        Some(run) => run.next_update().await,
        None => std::future::pending().await,
    }
}

/// Run the terminal UI until the user quits
pub async fn run_tui(agent: &ReactAgent) -> Result<(), Box<dyn Error>> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, agent).await;
    restore_terminal()?;
    result
}

async fn event_loop(terminal: &mut Tui, agent: &ReactAgent) -> Result<(), Box<dyn Error>> {
    let model = agent.model_id().to_string();
    let mut state = ChatState::new();
    let mut keys = EventStream::new();
    let mut active: Option<ActiveRun> = None;

    loop {
        terminal.draw(|frame| ui::render(frame, &mut state, &model))?;

        tokio::select! {
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) => match handle_key(&mut state, key) {
                    InputAction::Submit(query) => {
                        tracing::info!(query_len = query.len(), "Query submitted");
                        active = Some(ActiveRun::start(agent, query));
                    }
                    InputAction::Quit => break,
                    InputAction::None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    abort(active.take());
                    return Err(e.into());
                }
                None => break,
            },
            update = next_update(&mut active) => match update {
                RunUpdate::Event(event) => state.apply_event(event),
                RunUpdate::Finished(result) => {
                    if let Err(e) = &result {
                        tracing::warn!(error = %e, "Query failed");
                    }
                    state.finish(result);
                    active = None;
                }
            },
        }
    }

    abort(active);
    Ok(())
}

fn abort(active: Option<ActiveRun>) {
    if let Some(run) = active {
        tracing::info!("Aborting in-flight query");
        run.handle.abort();
    }
}

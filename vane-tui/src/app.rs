//! The terminal event loop.
//!
//! Keyboard input and async completions both land here as [`Msg`]s, get
//! folded into the state by [`update`], and every iteration ends with a
//! redraw. Commands returned by the reducer are spawned as tasks that
//! report back over the message channel.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::warn;

use vane_core::{IpLocator, WeatherProvider};

use crate::input::{InputEvent, QueryInput};
use crate::state::ViewState;
use crate::update::{self, Cmd, Msg};
use crate::view;

/// Terminal events forwarded by the poller task.
#[derive(Debug)]
enum RawEvent {
    Key(KeyEvent),
    Resize,
}

/// Polls crossterm events off the main task so the loop can await both
/// input and completions in one place.
fn spawn_event_poller(tx: UnboundedSender<RawEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(16)).await;
            while matches!(event::poll(Duration::ZERO), Ok(true)) {
                let raw = match event::read() {
                    Ok(Event::Key(key)) => RawEvent::Key(key),
                    Ok(Event::Resize(..)) => RawEvent::Resize,
                    Ok(_) => continue,
                    Err(_) => return,
                };
                if tx.send(raw).is_err() {
                    return;
                }
            }
        }
    })
}

pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut ViewState,
    provider: Arc<dyn WeatherProvider>,
    locator: Arc<IpLocator>,
    locate_on_start: bool,
) -> Result<()> {
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();
    let (raw_tx, mut raw_rx) = mpsc::unbounded_channel::<RawEvent>();
    let poller = spawn_event_poller(raw_tx);

    let mut input = QueryInput::at_end(&state.query_text);

    if locate_on_start
        && let Some(cmd) = update::update(state, Msg::LocateRequested)
    {
        run_cmd(cmd, &provider, &locator, &msg_tx);
    }

    terminal.draw(|frame| view::draw(frame, state, &mut input))?;

    loop {
        let msg = tokio::select! {
            raw = raw_rx.recv() => match raw {
                Some(RawEvent::Key(key)) => map_key(&key, &mut input, &state.query_text),
                Some(RawEvent::Resize) => None,
                None => break,
            },
            msg = msg_rx.recv() => msg,
        };

        if let Some(msg) = msg {
            if matches!(msg, Msg::Quit) {
                break;
            }
            let typed = matches!(msg, Msg::QueryChanged(_));
            let text_before = state.query_text.clone();

            if let Some(cmd) = update::update(state, msg) {
                run_cmd(cmd, &provider, &locator, &msg_tx);
            }

            // Completions can rewrite the query text under the cursor.
            if !typed && state.query_text != text_before {
                input.move_to_end(&state.query_text);
            }
        }

        terminal.draw(|frame| view::draw(frame, state, &mut input))?;
    }

    poller.abort();
    Ok(())
}

fn map_key(key: &KeyEvent, input: &mut QueryInput, query_text: &str) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Esc {
        return Some(Msg::Quit);
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }
    match input.handle_key(key, query_text)? {
        InputEvent::Changed(text) => Some(Msg::QueryChanged(text)),
        InputEvent::Submitted => Some(Msg::FetchRequested),
    }
}

fn run_cmd(
    cmd: Cmd,
    provider: &Arc<dyn WeatherProvider>,
    locator: &Arc<IpLocator>,
    tx: &UnboundedSender<Msg>,
) {
    match cmd {
        Cmd::Locate => {
            let locator = Arc::clone(locator);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = locator.current_position().await;
                let _ = tx.send(Msg::LocateFinished(result));
            });
        }
        Cmd::Fetch { seq, origin, query } => {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = match provider.current_weather(&query).await {
                    Ok(report) => Some(report),
                    Err(err) => {
                        warn!("Weather fetch failed: {}", err);
                        None
                    }
                };
                let _ = tx.send(Msg::FetchFinished { seq, origin, outcome });
            });
        }
    }
}

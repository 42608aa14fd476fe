//! Message handling: every state transition lives here.
//!
//! `update` mutates the state and may hand back a command for the runtime
//! to execute. No side effects happen in this module itself, which keeps
//! the whole state machine testable without a network or a terminal.

use tracing::{debug, warn};
use vane_core::{Coordinates, LocateError, WeatherQuery, WeatherReport};

use crate::state::{LocateState, ViewState};

/// Where a fetch was started from. Startup fetches come from the position
/// lookup and additionally rewrite the query text when they land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Startup,
    Manual,
}

#[derive(Debug)]
pub enum Msg {
    /// The query input's text changed.
    QueryChanged(String),
    /// The user asked for a fetch of whatever the input holds right now.
    FetchRequested,
    /// Ask for the device position (sent once at startup).
    LocateRequested,
    LocateFinished(Result<Coordinates, LocateError>),
    /// A fetch task finished. `outcome` is `None` when the fetch failed;
    /// the distinction was already logged by the task.
    FetchFinished {
        seq: u64,
        origin: FetchOrigin,
        outcome: Option<WeatherReport>,
    },
    Quit,
}

/// Work for the runtime to start after a transition.
#[derive(Debug, PartialEq)]
pub enum Cmd {
    Locate,
    Fetch {
        seq: u64,
        origin: FetchOrigin,
        query: WeatherQuery,
    },
}

pub fn update(state: &mut ViewState, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::QueryChanged(text) => {
            state.query_text = text;
            None
        }

        Msg::FetchRequested => {
            state.is_loading = true;
            // Any earlier fetch still in flight is superseded from here on,
            // even if no new request goes out.
            state.fetch_seq += 1;

            match WeatherQuery::by_name(&state.query_text) {
                Some(query) => Some(Cmd::Fetch {
                    seq: state.fetch_seq,
                    origin: FetchOrigin::Manual,
                    query,
                }),
                None => {
                    // Nothing to ask for: the lookup settles immediately
                    // as absent.
                    state.report = None;
                    state.is_loading = false;
                    None
                }
            }
        }

        Msg::LocateRequested => {
            if state.locate != LocateState::NotRequested {
                return None;
            }
            state.locate = LocateState::Requested;
            Some(Cmd::Locate)
        }

        Msg::LocateFinished(Ok(coords)) => {
            state.locate = LocateState::Granted;
            state.fetch_seq += 1;
            // The position-driven fetch does not touch the loading flag;
            // only user-initiated fetches do.
            Some(Cmd::Fetch {
                seq: state.fetch_seq,
                origin: FetchOrigin::Startup,
                query: WeatherQuery::ByCoords {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                },
            })
        }

        Msg::LocateFinished(Err(err)) => {
            warn!("Position lookup failed: {}", err);
            state.locate = LocateState::Failed;
            None
        }

        Msg::FetchFinished {
            seq,
            origin,
            outcome,
        } => {
            if seq != state.fetch_seq {
                debug!(seq, latest = state.fetch_seq, "dropping superseded fetch result");
                return None;
            }

            if origin == FetchOrigin::Startup {
                // Mirror the located place back into the input, or clear
                // it when the fetch came back empty.
                state.query_text = outcome
                    .as_ref()
                    .map(|r| r.location_name.clone())
                    .unwrap_or_default();
            }

            state.report = outcome;
            state.is_loading = false;
            None
        }

        // Quit is handled in the main loop, not here.
        Msg::Quit => None,
    }
}

//! View state, the single source of truth for what the page displays.
//!
//! Only `update` mutates it; everything shown on screen is derived from
//! it by pure functions in `view`.

use vane_core::WeatherReport;

/// Progress of the one-shot startup position lookup. Once it leaves
/// `NotRequested` it is never requested again for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocateState {
    #[default]
    NotRequested,
    Requested,
    Granted,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    /// Text in the query input. Seeded at startup, then owned by the
    /// user except when the position flow rewrites it.
    pub query_text: String,

    /// Last applied fetch outcome (None = nothing shown / last fetch failed).
    pub report: Option<WeatherReport>,

    /// True while a user-initiated fetch is outstanding.
    pub is_loading: bool,

    /// Generation token. Each issued fetch carries the value at issue
    /// time; only a completion with the current value is applied.
    pub fetch_seq: u64,

    pub locate: LocateState,
}

impl ViewState {
    pub fn new(seed_city: impl Into<String>) -> Self {
        Self {
            query_text: seed_city.into(),
            report: None,
            is_loading: false,
            fetch_seq: 0,
            locate: LocateState::default(),
        }
    }
}

//! Rendering: pure functions of the view state.
//!
//! Every displayed string is recomputed from `ViewState` on each draw.
//! The three summary labels react to the loading flag; the three metric
//! labels only ever look at whether a report is present. That asymmetry
//! is intentional and covered by tests.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::input::QueryInput;
use crate::state::ViewState;

const PROMPT: &str = "Enter a city to get weather";

pub fn location_label(state: &ViewState) -> String {
    if state.is_loading {
        return "Loading...".to_string();
    }
    match &state.report {
        Some(report) if !report.location_name.is_empty() => report.location_name.clone(),
        _ => "City: Loading...".to_string(),
    }
}

pub fn temperature_label(state: &ViewState) -> String {
    if state.is_loading {
        return "Loading...".to_string();
    }
    match &state.report {
        // Whole degrees, truncated towards zero.
        Some(report) => format!("Temperature: {}°C", report.temperature_c as i64),
        None => PROMPT.to_string(),
    }
}

pub fn condition_label(state: &ViewState) -> String {
    if state.is_loading {
        return "Loading...".to_string();
    }
    match state.report.as_ref().and_then(|r| r.condition.as_deref()) {
        Some(condition) => condition.to_string(),
        None => PROMPT.to_string(),
    }
}

pub fn humidity_label(state: &ViewState) -> String {
    match &state.report {
        Some(report) => format!("{}%", report.humidity_pct),
        None => "Humidity: Loading...".to_string(),
    }
}

pub fn wind_label(state: &ViewState) -> String {
    match &state.report {
        Some(report) => format!("{} km/h", report.wind_speed),
        None => "Wind Speed: Loading...".to_string(),
    }
}

pub fn clouds_label(state: &ViewState) -> String {
    match &state.report {
        Some(report) => format!("{}%", report.cloud_cover_pct),
        None => "Clouds: Loading...".to_string(),
    }
}

pub fn draw(frame: &mut Frame, state: &ViewState, input: &mut QueryInput) {
    let [title_row, input_row, summary_row, metrics_row, _, footer_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new("Weather App").style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, title_row);

    input.render(frame, input_row, &state.query_text);

    let [city_area, temp_area, cond_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(summary_row);

    render_card(frame, city_area, "City", &location_label(state));
    render_card(frame, temp_area, "Temperature", &temperature_label(state));
    render_card(frame, cond_area, "Condition", &condition_label(state));

    let [humidity_area, wind_area, clouds_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(metrics_row);

    render_card(frame, humidity_area, "Humidity", &humidity_label(state));
    render_card(frame, wind_area, "Wind Speed", &wind_label(state));
    render_card(frame, clouds_area, "Clouds", &clouds_label(state));

    frame.render_widget(footer(state), footer_row);
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let card = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {title} ")),
    );
    frame.render_widget(card, area);
}

fn footer(state: &ViewState) -> Paragraph<'static> {
    let mut hints = String::from("enter fetch  esc quit");
    if let Some(report) = &state.report {
        hints.push_str(&format!(
            "  observed {} UTC",
            report.observation_time.format("%H:%M")
        ));
    }
    Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::DarkGray))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use ratatui::{Terminal, backend::TestBackend};
    use vane_core::WeatherReport;

    fn report() -> WeatherReport {
        WeatherReport {
            location_name: "Pune".to_string(),
            temperature_c: 24.84,
            humidity_pct: 74,
            condition: Some("haze".to_string()),
            wind_speed: 3.6,
            cloud_cover_pct: 40,
            observation_time: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn loaded_state() -> ViewState {
        let mut state = ViewState::new("pune");
        state.report = Some(report());
        state
    }

    #[test]
    fn location_shows_loading_while_fetching() {
        let mut state = loaded_state();
        state.is_loading = true;

        assert_eq!(location_label(&state), "Loading...");
    }

    #[test]
    fn location_shows_place_name_when_loaded() {
        assert_eq!(location_label(&loaded_state()), "Pune");
    }

    #[test]
    fn location_falls_back_when_absent_or_nameless() {
        let mut state = ViewState::new("pune");
        assert_eq!(location_label(&state), "City: Loading...");

        // An empty provider name falls back the same way.
        let mut nameless = report();
        nameless.location_name = String::new();
        state.report = Some(nameless);
        assert_eq!(location_label(&state), "City: Loading...");
    }

    #[test]
    fn temperature_truncates_towards_zero() {
        let mut state = loaded_state();
        assert_eq!(temperature_label(&state), "Temperature: 24°C");

        state.report.as_mut().unwrap().temperature_c = -3.7;
        assert_eq!(temperature_label(&state), "Temperature: -3°C");

        state.report.as_mut().unwrap().temperature_c = 0.0;
        assert_eq!(temperature_label(&state), "Temperature: 0°C");
    }

    #[test]
    fn temperature_prompts_when_no_report() {
        let state = ViewState::new("pune");
        assert_eq!(temperature_label(&state), PROMPT);
    }

    #[test]
    fn temperature_shows_loading_while_fetching() {
        let mut state = ViewState::new("pune");
        state.is_loading = true;
        assert_eq!(temperature_label(&state), "Loading...");
    }

    #[test]
    fn condition_shows_description_or_prompt() {
        let mut state = loaded_state();
        assert_eq!(condition_label(&state), "haze");

        state.report.as_mut().unwrap().condition = None;
        assert_eq!(condition_label(&state), PROMPT);

        state.report = None;
        assert_eq!(condition_label(&state), PROMPT);
    }

    #[test]
    fn metric_labels_ignore_the_loading_flag() {
        let mut state = ViewState::new("pune");
        state.is_loading = true;

        // Still the per-field placeholders, not "Loading...".
        assert_eq!(humidity_label(&state), "Humidity: Loading...");
        assert_eq!(wind_label(&state), "Wind Speed: Loading...");
        assert_eq!(clouds_label(&state), "Clouds: Loading...");

        state.report = Some(report());
        assert_eq!(humidity_label(&state), "74%");
        assert_eq!(wind_label(&state), "3.6 km/h");
        assert_eq!(clouds_label(&state), "40%");
    }

    #[test]
    fn wind_label_drops_trailing_zero() {
        let mut state = loaded_state();
        state.report.as_mut().unwrap().wind_speed = 4.0;

        assert_eq!(wind_label(&state), "4 km/h");
    }

    fn render_to_text(state: &ViewState) -> String {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = QueryInput::at_end(&state.query_text);

        terminal.draw(|frame| draw(frame, state, &mut input)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_idle_page_with_prompts() {
        let output = render_to_text(&ViewState::new("pune"));

        assert!(output.contains("Weather App"));
        assert!(output.contains("pune"));
        assert!(output.contains("City: Loading..."));
        assert!(output.contains(PROMPT));
        assert!(output.contains("Humidity: Loading..."));
        assert!(output.contains("Wind Speed: Loading..."));
        assert!(output.contains("Clouds: Loading..."));
    }

    #[test]
    fn renders_loaded_page_with_values() {
        let output = render_to_text(&loaded_state());

        assert!(output.contains("Pune"));
        assert!(output.contains("Temperature: 24°C"));
        assert!(output.contains("haze"));
        assert!(output.contains("74%"));
        assert!(output.contains("3.6 km/h"));
        assert!(output.contains("40%"));
        assert!(output.contains("observed"));
    }

    #[test]
    fn renders_loading_page() {
        let mut state = ViewState::new("pune");
        state.is_loading = true;

        let output = render_to_text(&state);

        assert!(output.contains("Loading..."));
        // Metric cards keep their own placeholders while loading.
        assert!(output.contains("Humidity: Loading..."));
    }

    #[test]
    fn renders_placeholder_when_query_empty() {
        let output = render_to_text(&ViewState::new(""));

        assert!(output.contains("Enter city name"));
    }
}

//! TUI rendering with ratatui
//!
//! Constraint rows on top, matches and the usage chart below.

use super::app::{App, MessageStyle, WordListState};
use super::state::Region;
use crate::output::formatters::format_frequency;
use crate::trends::{TrendPoint, TrendState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph,
        Wrap,
    },
};

/// One color per charted word, spaced evenly around the hue wheel
const SERIES_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

const HELP: &str = "a-z: fill | ←→: move | Tab: next row | Bksp/Del: clear | Ctrl-L: reset | Esc: quit";

#[must_use]
pub const fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(12), // Constraint rows
            Constraint::Min(10),    // Main content
            Constraint::Length(3),  // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_form(f, app, chunks[1]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Matches
            Constraint::Percentage(60), // Trends
        ])
        .split(chunks[2]);

    render_results(f, app, main_chunks[0]);
    render_trends(f, app, main_chunks[1]);

    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🟩 WORDLE BUTLER - Constraint Helper")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

const fn region_colors(region: Region) -> (Color, Color) {
    match region {
        Region::Correct => (Color::Black, Color::Green),
        Region::WrongSpot => (Color::Black, Color::Yellow),
        Region::Excluded => (Color::White, Color::DarkGray),
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4); 3])
        .split(area);

    let focus = app.form.focus();
    for (region, row) in Region::ALL.into_iter().zip(rows.iter()) {
        let (fg, bg) = region_colors(region);
        let mut spans = Vec::with_capacity(region.len() * 2);

        for (index, cell) in app.form.cells(region).into_iter().enumerate() {
            let text = cell.map_or_else(
                || " · ".to_string(),
                |letter| format!(" {} ", letter.as_char().to_ascii_uppercase()),
            );
            let mut style = Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD);
            if focus.region == region && focus.index == index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
        }

        let border = if focus.region == region {
            Style::default().fg(bg)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let content = vec![
            Line::from(spans),
            Line::from(Span::styled(
                region.helper(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .title(format!(" {} ", region.title()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border),
        );
        f.render_widget(paragraph, *row);
    }
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let block = |title: String| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Green))
    };

    let notice = match (&app.words, &app.results) {
        (WordListState::Loading, _) => Some("Loading words…".to_string()),
        (WordListState::Failed(err), _) => Some(format!("Could not load words: {err}")),
        (WordListState::Ready(_), None) => {
            Some("Enter some constraints to see matches.".to_string())
        }
        (WordListState::Ready(_), Some(results)) if results.is_empty() => {
            Some("No matches. Adjust your constraints.".to_string())
        }
        (WordListState::Ready(_), Some(_)) => None,
    };

    if let Some(text) = notice {
        let paragraph = Paragraph::new(text)
            .block(block(" Matches ".to_string()))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let results = app.results.as_deref().unwrap_or_default();
    let charted = app.top_words().len();
    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let marker = if i < charted {
                Span::styled("● ", Style::default().fg(series_color(i)))
            } else {
                Span::raw("  ")
            };
            ListItem::new(Line::from(vec![
                marker,
                Span::styled(word.to_uppercase(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block(format!(
        " Matches ({} results found) ",
        results.len()
    )));
    f.render_widget(list, area);
}

fn render_trends(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Usage over time ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let text = match app.trends.state() {
        TrendState::Ready(points) => {
            render_chart(f, app, points, block, area);
            return;
        }
        TrendState::Loading => "Loading trend data…",
        TrendState::Failed(_) => "Unable to fetch trend data at the moment",
        TrendState::Idle => "",
    };

    let style = if matches!(app.trends.state(), TrendState::Failed(_)) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(text).style(style).block(block);
    f.render_widget(paragraph, area);
}

/// Plot one line per top match that the table has a column for
fn render_chart(f: &mut Frame, app: &App, points: &[TrendPoint], block: Block, area: Rect) {
    let range = app.trends.range();
    let words: Vec<&String> = app
        .top_words()
        .iter()
        .filter(|word| points.first().is_some_and(|p| p.values.contains_key(*word)))
        .collect();

    let series: Vec<Vec<(f64, f64)>> = words
        .iter()
        .map(|word| {
            points
                .iter()
                .map(|p| (f64::from(p.year), p.value(word)))
                .collect()
        })
        .collect();

    let max = series
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max } else { 1.0 };

    let datasets: Vec<Dataset> = words
        .iter()
        .zip(&series)
        .enumerate()
        .map(|(i, (word, data))| {
            Dataset::default()
                .name(word.to_uppercase())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(i)))
                .data(data)
        })
        .collect();

    let x_start = f64::from(range.start);
    let x_end = f64::from(range.end).max(x_start + 1.0);
    let mid_year = range.start + (range.end.saturating_sub(range.start)) / 2;

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Year")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_start, x_end])
                .labels([
                    range.start.to_string(),
                    mid_year.to_string(),
                    range.end.to_string(),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Frequency")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels([
                    format_frequency(0.0),
                    format_frequency(y_max / 2.0),
                    format_frequency(y_max),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    if let Some(msg) = app.messages.last() {
        let style = match msg.style {
            MessageStyle::Info => Style::default().fg(Color::White),
            MessageStyle::Success => Style::default().fg(Color::Green),
            MessageStyle::Error => Style::default().fg(Color::Red),
        };
        let message = Paragraph::new(msg.text.as_str())
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, chunks[0]);
    }

    let help = Paragraph::new(HELP)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

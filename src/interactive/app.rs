//! TUI application state and logic

use super::state::ConstraintForm;
use crate::core::filter_words;
use crate::trends::{TrendFetcher, TrendUpdate};
use crate::wordlists::{WordListError, WordSource};
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How many of the top matches get a trend line
pub const TOP_TRENDS: usize = 5;

/// Word list lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordListState {
    Loading,
    Ready(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub words: WordListState,
    pub form: ConstraintForm,
    /// `None` while no constraint is entered, as opposed to `Some(vec![])`
    pub results: Option<Vec<String>>,
    pub trends: TrendFetcher,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(trends: TrendFetcher) -> Self {
        Self {
            words: WordListState::Loading,
            form: ConstraintForm::new(),
            results: None,
            trends,
            messages: vec![Message {
                text: "Type letters into the green, yellow and gray rows.".to_string(),
                style: MessageStyle::Info,
            }],
            should_quit: false,
        }
    }

    #[must_use]
    pub const fn is_loading_words(&self) -> bool {
        matches!(self.words, WordListState::Loading)
    }

    /// True when at least one constraint cell is filled
    #[must_use]
    pub fn has_constraints(&self) -> bool {
        !self.form.is_empty()
    }

    /// Words currently charted (a prefix of the results)
    #[must_use]
    pub fn top_words(&self) -> &[String] {
        self.results
            .as_deref()
            .map_or(&[], |results| &results[..results.len().min(TOP_TRENDS)])
    }

    pub fn on_words_loaded(&mut self, loaded: Result<Vec<String>, WordListError>) {
        match loaded {
            Ok(words) => {
                self.add_message(
                    &format!("Loaded {} words", words.len()),
                    MessageStyle::Success,
                );
                self.words = WordListState::Ready(words);
            }
            Err(err) => {
                warn!(error = %err, "word list unavailable");
                self.add_message("Could not load words", MessageStyle::Error);
                self.words = WordListState::Failed(err.to_string());
            }
        }
        self.recompute();
    }

    pub fn on_trend_update(&mut self, update: TrendUpdate) {
        self.trends.apply(update);
    }

    /// Replace the form, refiltering only when a cell actually changed
    pub fn set_form(&mut self, form: ConstraintForm) {
        let changed = !self.form.same_cells(&form);
        self.form = form;
        if changed {
            self.recompute();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        let next = match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') if ctrl => {
                self.add_message("Cleared all constraints", MessageStyle::Info);
                self.form.cleared()
            }
            KeyCode::Char(c) if !ctrl && !alt => self.form.with_input(&c.to_string()),
            KeyCode::Backspace => self.form.with_backspace(),
            KeyCode::Delete => self.form.with_delete(),
            KeyCode::Left => self.form.moved_left(),
            KeyCode::Right => self.form.moved_right(),
            KeyCode::Tab | KeyCode::Down => self.form.next_region(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_region(),
            _ => return,
        };

        self.set_form(next);
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Refilter and, when the top words changed, request their trends
    fn recompute(&mut self) {
        let WordListState::Ready(words) = &self.words else {
            self.results = None;
            return;
        };

        if self.form.is_empty() {
            self.results = None;
            self.trends.clear();
            return;
        }

        let constraints = self.form.constraints();
        let matches: Vec<String> = filter_words(words, &constraints)
            .into_iter()
            .map(str::to_owned)
            .collect();
        debug!(matches = matches.len(), "constraints applied");

        self.results = Some(matches);
        let top = self.top_words().to_vec();
        self.trends.request(&top);
    }
}

/// Run the TUI application
///
/// Loads the word list in the background while the UI is already up.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub async fn run_tui(app: App, source: WordSource, client: reqwest::Client) -> Result<()> {
    let (words_tx, words_rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let loaded = source.load(&client).await;
        if words_tx.send(loaded).await.is_err() {
            debug!("UI closed before the word list arrived");
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app, words_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut words_rx: mpsc::Receiver<Result<Vec<String>, WordListError>>,
) -> Result<()> {
    let mut events = EventStream::new();
    info!("interactive session started");

    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        tokio::select! {
            event = events.next() => match event {
                // Only process key press events (fixes Windows double-input bug)
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => app.should_quit = true,
            },
            Some(update) = app.trends.recv() => app.on_trend_update(update),
            Some(loaded) = words_rx.recv(), if app.is_loading_words() => app.on_words_loaded(loaded),
        }

        if app.should_quit {
            break;
        }
    }

    info!("interactive session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::state::Region;
    use crate::trends::{GatedSource, TrendState, YearRange};
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_words(words: &[&str]) -> (Arc<GatedSource>, App) {
        let source = Arc::new(GatedSource::default());
        let fetcher = TrendFetcher::new(source.clone(), YearRange::default());
        let mut app = App::new(fetcher);
        app.on_words_loaded(Ok(words.iter().map(ToString::to_string).collect()));
        (source, app)
    }

    #[tokio::test]
    async fn no_constraints_means_no_results() {
        let (source, app) = app_with_words(&["crane", "slate"]);

        assert!(!app.has_constraints());
        assert!(app.results.is_none());
        assert_eq!(app.trends.state(), &TrendState::Idle);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn typing_filters_and_requests_trends() {
        let (source, mut app) = app_with_words(&["crane", "slate", "crate", "point"]);

        app.handle_key(key(KeyCode::Char('c')));

        assert_eq!(
            app.results.as_deref(),
            Some(&["crane".to_string(), "crate".to_string()][..])
        );
        assert!(app.trends.is_loading());

        source.release("crane,crate");
        app.trends.settle().await;
        assert_eq!(app.trends.points().len(), 7);
    }

    #[tokio::test]
    async fn zero_matches_is_distinct_from_no_constraints() {
        let (_source, mut app) = app_with_words(&["crane"]);

        app.handle_key(key(KeyCode::Char('z')));

        assert_eq!(app.results.as_deref(), Some(&[][..]));
        assert_eq!(app.trends.state(), &TrendState::Idle);
    }

    #[tokio::test]
    async fn top_words_capped_at_five() {
        let words = ["aaaab", "aaaac", "aaaad", "aaaae", "aaaaf", "aaaag", "bbbbb"];
        let (_source, mut app) = app_with_words(&words);

        app.handle_key(key(KeyCode::Char('a')));

        assert_eq!(app.results.as_ref().map(Vec::len), Some(6));
        assert_eq!(app.top_words(), &words[..5]);
        assert_eq!(
            app.trends.last_key().map(|k| k.as_str()),
            Some("aaaab,aaaac,aaaad,aaaae,aaaaf")
        );
    }

    #[tokio::test]
    async fn focus_moves_do_not_refilter() {
        let (source, mut app) = app_with_words(&["crane"]);

        app.handle_key(key(KeyCode::Char('c')));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Left));

        assert_eq!(app.form.focus().region, Region::WrongSpot);
        source.release("crane");
        app.trends.settle().await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn clear_all_returns_to_empty_state() {
        let (_source, mut app) = app_with_words(&["crane"]);

        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.results.is_some());

        app.handle_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(app.form.is_empty());
        assert!(app.results.is_none());
        assert_eq!(app.trends.state(), &TrendState::Idle);
    }

    #[tokio::test]
    async fn word_list_failure_suppresses_filtering() {
        let fetcher = TrendFetcher::new(Arc::new(GatedSource::default()), YearRange::default());
        let mut app = App::new(fetcher);
        app.on_words_loaded(Err(WordListError::Status(404)));

        app.handle_key(key(KeyCode::Char('c')));

        assert!(matches!(app.words, WordListState::Failed(_)));
        assert!(app.results.is_none());
    }

    #[tokio::test]
    async fn modified_letters_are_not_typed() {
        let (_source, mut app) = app_with_words(&["crane"]);

        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert!(app.form.is_empty());
        assert_eq!(app.form.focus().index, 0);

        app.handle_key(KeyEvent::new(KeyCode::Char('C'), KeyModifiers::SHIFT));
        assert_eq!(app.form.constraints().correct.to_string(), "c....");
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let fetcher = TrendFetcher::new(Arc::new(GatedSource::default()), YearRange::default());
        let mut app = App::new(fetcher);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);

        let fetcher = TrendFetcher::new(Arc::new(GatedSource::default()), YearRange::default());
        let mut app = App::new(fetcher);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::session::Session;
use crate::tui::{message::UiMessage, ui::render_ui};

/// Input mode for the TUI
enum InputMode {
    Normal,
    Editing,
}

/// TUI application state. The session loop has two states: idle (editing)
/// and processing (one query in flight); processing always completes with a
/// real or fallback reply and the loop re-arms.
pub struct MentorApp {
    session: Session,

    // Rendered transcript, one entry per session message
    messages: Vec<UiMessage>,

    // Input state
    input: String,
    input_history: Vec<String>,
    input_history_index: usize,

    // Query currently in flight, if any
    pending: Option<String>,
}

impl MentorApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            messages: Vec::new(),
            input: String::new(),
            input_history: Vec::new(),
            input_history_index: 0,
            pending: None,
        }
    }

    pub fn messages(&self) -> &[UiMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn backend_name(&self) -> &str {
        self.session.agent().backend_name()
    }

    pub fn session_id(&self) -> String {
        self.session.id().to_string()
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.session
            .agent()
            .registry()
            .iter()
            .map(|tool| tool.name())
            .collect()
    }

    pub fn log(&self) -> &[String] {
        self.session.log()
    }

    fn handle_input(&mut self, c: char) {
        self.input.push(c);
    }

    fn backspace(&mut self) {
        self.input.pop();
    }

    fn previous_input(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        if self.input_history_index > 0 {
            self.input_history_index -= 1;
            self.input = self.input_history[self.input_history_index].clone();
        }
    }

    fn next_input(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        if self.input_history_index < self.input_history.len() - 1 {
            self.input_history_index += 1;
            self.input = self.input_history[self.input_history_index].clone();
        } else {
            self.input_history_index = self.input_history.len();
            self.input.clear();
        }
    }

    /// Submit the current input as a query: idle -> processing.
    fn submit_message(&mut self) {
        if self.input.trim().is_empty() || self.is_loading() {
            return;
        }

        let query = self.input.clone();
        self.messages.push(UiMessage::user(query.clone()));
        self.input_history.push(query.clone());
        self.input_history_index = self.input_history.len();

        self.input.clear();
        self.pending = Some(query);
    }

    /// Run the in-flight query to completion: processing -> idle.
    async fn process_pending(&mut self) {
        let Some(query) = self.pending.take() else {
            return;
        };
        let outcome = self.session.process(&query).await;
        self.messages.push(UiMessage::assistant(&outcome));
    }

    #[cfg(test)]
    pub fn push_message(&mut self, message: UiMessage) {
        self.messages.push(message);
    }
}

/// Run the TUI application
pub async fn run(session: Session) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = MentorApp::new(session);
    let mut input_mode = InputMode::Editing;

    let tick_rate = Duration::from_millis(100);
    let result = run_app(&mut terminal, &mut app, &mut input_mode, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut MentorApp,
    input_mode: &mut InputMode,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input_mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('e') => {
                                *input_mode = InputMode::Editing;
                            }
                            KeyCode::Char('q') => {
                                return Ok(());
                            }
                            _ => {}
                        },
                        InputMode::Editing => match key.code {
                            KeyCode::Enter => {
                                app.submit_message();
                            }
                            KeyCode::Esc => {
                                *input_mode = InputMode::Normal;
                            }
                            KeyCode::Char(c) => {
                                app.handle_input(c);
                            }
                            KeyCode::Backspace => {
                                app.backspace();
                            }
                            KeyCode::Up => {
                                app.previous_input();
                            }
                            KeyCode::Down => {
                                app.next_input();
                            }
                            _ => {}
                        },
                    }
                }
            }
        }

        // One query in flight at most; it always completes with a reply.
        if app.is_loading() {
            app.process_pending().await;
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{KeywordRouter, TutorAgent};
    use crate::tools::{ToolRegistry, WebSearchTool};

    fn app() -> MentorApp {
        let registry = ToolRegistry::standard(WebSearchTool::new(3, Duration::from_secs(1)));
        MentorApp::new(Session::new(TutorAgent::new(
            Box::new(KeywordRouter),
            registry,
        )))
    }

    #[tokio::test]
    async fn submit_and_process_append_one_exchange() {
        let mut app = app();
        for c in "What is Newton's second law?".chars() {
            app.handle_input(c);
        }
        app.submit_message();
        assert!(app.is_loading());
        assert_eq!(app.messages().len(), 1);
        assert!(app.input().is_empty());

        app.process_pending().await;
        assert!(!app.is_loading());
        assert_eq!(app.messages().len(), 2);
        assert_eq!(app.log().len(), 1);
    }

    #[tokio::test]
    async fn blank_input_is_not_submitted() {
        let mut app = app();
        app.handle_input(' ');
        app.submit_message();
        assert!(!app.is_loading());
        assert!(app.messages().is_empty());
    }

    #[test]
    fn input_history_walks_backwards_and_forwards() {
        let mut app = app();
        app.input_history = vec!["first".to_string(), "second".to_string()];
        app.input_history_index = 2;

        app.previous_input();
        assert_eq!(app.input(), "second");
        app.previous_input();
        assert_eq!(app.input(), "first");
        app.next_input();
        assert_eq!(app.input(), "second");
        app.next_input();
        assert!(app.input().is_empty());
    }
}

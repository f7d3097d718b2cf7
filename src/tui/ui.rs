use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::tui::{app::MentorApp, message::MessageRole};

/// Render the whole screen. Pure function of the app state: the same state
/// always draws the same frame.
pub fn render_ui(f: &mut Frame, app: &MentorApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(5),    // Transcript + log
            Constraint::Length(3), // Input box
        ])
        .split(f.size());

    render_status_bar(f, app, chunks[0]);
    render_transcript(f, app, chunks[1]);
    render_input_box(f, app, chunks[2]);
}

fn render_status_bar(f: &mut Frame, app: &MentorApp, area: Rect) {
    let status_text = Line::from(vec![
        Span::styled("Backend: ", Style::default().fg(Color::Gray)),
        Span::styled(app.backend_name().to_string(), Style::default().fg(Color::Green)),
        Span::styled(" | Session: ", Style::default().fg(Color::Gray)),
        Span::styled(app.session_id(), Style::default().fg(Color::DarkGray)),
    ]);

    let tools_line = Line::from(
        app.tool_names()
            .iter()
            .enumerate()
            .flat_map(|(i, name)| {
                let mut spans = Vec::new();
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(*name, Style::default().fg(Color::Cyan)));
                spans
            })
            .collect::<Vec<_>>(),
    );

    let status_bar = Paragraph::new(Text::from(vec![status_text, tools_line]))
        .block(Block::default().borders(Borders::ALL).title("Mentor"));

    f.render_widget(status_bar, area);
}

fn render_transcript(f: &mut Frame, app: &MentorApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Transcript
            Constraint::Percentage(30), // Diagnostic log
        ])
        .split(area);

    let messages: Vec<ListItem> = app
        .messages()
        .iter()
        .map(|msg| {
            let (role_name, color) = match msg.role {
                MessageRole::User => ("You", Color::Cyan),
                MessageRole::Assistant => ("Tutor", Color::Green),
            };

            let role_span = Span::styled(
                format!("{}: ", role_name),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
            let content_span = Span::raw(msg.content.as_str());

            let mut lines = vec![Line::from(vec![role_span, content_span])];

            if let Some(tool) = &msg.routed_tool {
                let annotation = if msg.fell_back {
                    format!("fallback: {tool}")
                } else {
                    format!("via {tool}")
                };
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        annotation,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ]));
            }

            ListItem::new(Text::from(lines))
        })
        .collect();

    let transcript = List::new(messages)
        .block(Block::default().borders(Borders::ALL).title("Conversation"));

    f.render_widget(transcript, chunks[0]);

    render_log_panel(f, app, chunks[1]);
}

fn render_log_panel(f: &mut Frame, app: &MentorApp, area: Rect) {
    let lines: Vec<Line> = app
        .log()
        .iter()
        .map(|entry| Line::from(Span::styled(entry.as_str(), Style::default().fg(Color::Gray))))
        .collect();

    let log = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Log"))
        .wrap(Wrap { trim: true });

    f.render_widget(log, area);
}

fn render_input_box(f: &mut Frame, app: &MentorApp, area: Rect) {
    let input = Paragraph::new(app.input()).style(Style::default()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Ask a question")
            .style(Style::default().fg(if app.is_loading() {
                Color::DarkGray
            } else {
                Color::White
            })),
    );

    f.render_widget(input, area);

    if !app.is_loading() {
        f.set_cursor(area.x + app.input().len() as u16 + 1, area.y + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{KeywordRouter, TutorAgent};
    use crate::session::{ProcessOutcome, Session};
    use crate::tools::{ToolRegistry, WebSearchTool};
    use crate::tui::message::UiMessage;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn populated_app() -> MentorApp {
        let registry = ToolRegistry::standard(WebSearchTool::new(3, Duration::from_secs(1)));
        let session = Session::new(TutorAgent::new(Box::new(KeywordRouter), registry));
        let mut app = MentorApp::new(session);
        app.push_message(UiMessage::user("What is Newton's second law?".to_string()));
        app.push_message(UiMessage::assistant(&ProcessOutcome {
            reply: "Which topic in physics is troubling you? Let's figure it out!".to_string(),
            routed_tool: Some("Physics Tutor".to_string()),
            fell_back: false,
        }));
        app
    }

    fn draw(app: &MentorApp) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(100, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn rendering_the_same_state_twice_is_identical() {
        let app = populated_app();
        assert_eq!(draw(&app), draw(&app));
    }

    fn screen_text(buffer: &ratatui::buffer::Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(&buffer.get(x, y).symbol);
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn transcript_shows_roles_and_routing_annotation() {
        let buffer = draw(&populated_app());
        let screen = screen_text(&buffer);
        assert!(screen.contains("You: What is Newton's second law?"));
        assert!(screen.contains("Tutor: "));
        assert!(screen.contains("via Physics Tutor"));
    }
}

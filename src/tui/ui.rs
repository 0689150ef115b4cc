//! Rendering

use super::state::{ChatState, Entry};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub const PLACEHOLDER: &str = "Type your question...";

/// Draw the whole screen. Updates `state.max_scroll` for the current size.
pub fn render(frame: &mut Frame, state: &mut ChatState, model: &str) {
    // Header, conversation, input, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], model);
    render_conversation(frame, chunks[1], state);
    render_input(frame, chunks[2], state);
    render_footer(frame, chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect, model: &str) {
    let title = Line::from(vec![
        Span::styled(
            " Research Assistant ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(model.to_string(), Style::default().fg(Color::Magenta)),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(title).block(block), area);
}

fn prefixed<'a>(prefix: &'static str, style: Style, text: &'a str, body: Style) -> Vec<Line<'a>> {
    let indent = " ".repeat(prefix.len());
    let mut lines: Vec<Line<'a>> = text
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let lead = if i == 0 {
                Span::styled(prefix, style)
            } else {
                Span::raw(indent.clone())
            };
            Line::from(vec![lead, Span::styled(line, body)])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(prefix, style)));
    }
    lines
}

fn conversation_lines(state: &ChatState) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    for entry in &state.entries {
        let block = match entry {
            Entry::Query(text) => prefixed(
                "You: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                text,
                Style::default(),
            ),
            Entry::Response(text) => prefixed(
                "Assistant: ",
                Style::default().fg(Color::Green),
                text,
                Style::default(),
            ),
            Entry::Observation { tool, content } => {
                let mut block = vec![Line::from(Span::styled(
                    format!("[{tool}]"),
                    Style::default().fg(Color::Yellow),
                ))];
                block.extend(content.lines().map(|line| {
                    Line::from(Span::styled(
                        line,
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    ))
                }));
                block
            }
            Entry::Error(text) => prefixed(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                text,
                Style::default().fg(Color::Red),
            ),
            Entry::Notice(text) => vec![Line::from(Span::styled(
                text.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))],
        };
        lines.extend(block);
        lines.push(Line::default());
    }

    if state.running && !matches!(state.entries.last(), Some(Entry::Response(_))) {
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default().fg(Color::Yellow),
        )));
    }

    lines
}

fn render_conversation(frame: &mut Frame, area: Rect, state: &mut ChatState) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    // Measured before the block is attached, with the same word wrapping
    // the renderer uses
    let paragraph = Paragraph::new(conversation_lines(state)).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width.max(1));
    let max_scroll = u16::try_from(total.saturating_sub(usize::from(inner.height))).unwrap_or(u16::MAX);
    let scroll = state.scroll.unwrap_or(max_scroll).min(max_scroll);

    frame.render_widget(paragraph.block(block).scroll((scroll, 0)), area);

    state.max_scroll = max_scroll;
}

fn render_input(frame: &mut Frame, area: Rect, state: &ChatState) {
    let text = if state.input.is_empty() {
        Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(format!("{}_", state.input))
    };
    let line = Line::from(vec![
        Span::styled(
            "> ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        text,
    ]);

    let border = if state.running {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Question ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &ChatState) {
    let key = Style::default().fg(Color::Green);
    let help = Line::from(vec![
        Span::styled(" Enter", key),
        Span::raw(": Ask │ "),
        Span::styled("PageUp/Down", key),
        Span::raw(": Scroll │ "),
        Span::styled("Esc/Ctrl+C", Style::default().fg(Color::Red)),
        Span::raw(": Quit │ "),
        Span::styled(state.status.as_str(), Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(help), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &mut ChatState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(frame, state, "gpt-4.1-mini"))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_screen() {
        let mut state = ChatState::new();
        let screen = draw(&mut state, 80, 20);

        assert!(screen.contains("Research Assistant"));
        assert!(screen.contains("gpt-4.1-mini"));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_conversation_is_shown() {
        let mut state = ChatState::new();
        state.input = "What is Rust?".to_string();
        state.submit();
        state.apply_event(AgentEvent::token("Answer: a language", 1));

        let screen = draw(&mut state, 80, 20);
        assert!(screen.contains("You: What is Rust?"));
        assert!(screen.contains("Assistant: Answer: a language"));
        assert!(!screen.contains("Thinking..."));
    }

    #[test]
    fn test_thinking_shown_before_first_token() {
        let mut state = ChatState::new();
        state.input = "q".to_string();
        state.submit();

        assert!(draw(&mut state, 80, 20).contains("Thinking..."));
    }

    #[test]
    fn test_max_scroll_tracks_content() {
        let mut state = ChatState::new();
        let screen_height = 20;
        draw(&mut state, 80, screen_height);
        assert_eq!(state.max_scroll, 0);

        for i in 0..30 {
            state.entries.push(Entry::Notice(format!("line {i}")));
        }
        let screen = draw(&mut state, 80, screen_height);
        assert!(state.max_scroll > 0);
        // Following the bottom shows the newest entry
        assert!(screen.contains("line 29"));
        assert!(!screen.contains("line 0 "));
    }

    #[test]
    fn test_follow_shows_newest_word_wrapped_token() {
        let mut state = ChatState::new();
        state.input = "q".to_string();
        state.submit();

        // Word wrapping leaves ragged line ends, so these take more rows
        // than their width alone suggests
        for i in 0..40 {
            state.apply_event(AgentEvent::token(format!("wordy{i:02}xx "), 1));
            draw(&mut state, 30, 16);
        }
        state.apply_event(AgentEvent::token(" FINALTOKEN", 1));

        let screen = draw(&mut state, 30, 16);
        assert!(state.max_scroll > 0);
        assert!(screen.contains("FINALTOKEN"), "newest token not on screen");
    }

    #[test]
    fn test_scrolled_view_hides_newest_token() {
        let mut state = ChatState::new();
        for i in 0..40 {
            state.append_token(&format!("wordy{i:02}xx "));
        }
        state.append_token("FINALTOKEN");
        draw(&mut state, 30, 16);

        state.scroll = Some(0);
        let screen = draw(&mut state, 30, 16);
        assert!(screen.contains("wordy00xx"));
        assert!(!screen.contains("FINALTOKEN"));
    }
}

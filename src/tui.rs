//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface` implements `GameInterface`: every prompt runs a small
//!   line-editing loop, every display call updates the view and redraws.
//!
//! # Views
//! - `Menu`: the four main menu choices
//! - `Round`: gallows, revealed pattern, guessed letters, score and hint

use crate::cli::format_guessed_letters;
use crate::engine::{GuessOutcome, MAX_ATTEMPTS, RoundState, RoundStatus};
use crate::figure::figure_for;
use crate::game_state::{GameInterface, Prompt};
use crate::wordbank::Difficulty;
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LEN: usize = 32;
const MAX_LOG_LINES: usize = 200;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const FIGURE_PANEL_WIDTH: u16 = 24;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

const MENU_LINES: [&str; 4] = [
    "(1) Play",
    "(2) Play with Custom Words",
    "(3) Add to Custom Words",
    "(4) Exit",
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum LogKind {
    Info,
    Success,
    Error,
    Hint,
}

impl LogKind {
    /// Repeats and invalid input change nothing, so they read as plain info.
    fn for_outcome(outcome: &GuessOutcome) -> Self {
        match outcome {
            _ if !outcome.is_new_guess() => Self::Info,
            GuessOutcome::CorrectLetter { .. } | GuessOutcome::CorrectWord(_) => Self::Success,
            _ => Self::Error,
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Info => MESSAGE_STYLE,
            Self::Success => SUCCESS_STYLE,
            Self::Error => ERROR_STYLE,
            Self::Hint => INFO_STYLE,
        }
    }
}

#[derive(Debug)]
struct LogLine {
    text: String,
    kind: LogKind,
}

#[derive(Debug, Clone)]
struct RoundView {
    attempts_remaining: u8,
    pattern: String,
    guessed_letters: String,
    score: i32,
    difficulty: Difficulty,
    hint: Option<String>,
    status: RoundStatus,
}

impl RoundView {
    fn from_state(round: &RoundState) -> Self {
        Self {
            attempts_remaining: round.attempts_remaining(),
            pattern: round
                .pattern()
                .chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" "),
            guessed_letters: format_guessed_letters(round.guessed_letters()),
            score: round.score(),
            difficulty: round.target().difficulty,
            hint: round
                .hint_revealed()
                .then(|| round.target().hint.clone()),
            status: round.status(),
        }
    }
}

#[derive(Debug)]
enum View {
    Menu,
    Round(RoundView),
}

enum LineEvent {
    Submit(String),
    Cancel,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: &'a View,
    log: &'a [LogLine],
    prompt: &'a str,
    input: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, line input and the game view.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: View,
    log: Vec<LogLine>,
    prompt: String,
    input: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            view: View::Menu,
            log: Vec::new(),
            prompt: String::new(),
            input: String::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn push_log(&mut self, text: impl Into<String>, kind: LogKind) {
        self.log.push(LogLine {
            text: text.into(),
            kind,
        });
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: &self.view,
            log: &self.log,
            prompt: &self.prompt,
            input: &self.input,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(12), // Board
                Constraint::Min(5),     // Messages
                Constraint::Length(3),  // Prompt
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.status);
        match ctx.view {
            View::Menu => Self::render_menu(f, chunks[1]),
            View::Round(round) => Self::render_round(f, chunks[1], round),
        }
        Self::render_log(f, chunks[2], ctx.log);
        Self::render_prompt(f, chunks[3], ctx.prompt, ctx.input);
        Self::render_instructions(f, chunks[4]);
    }

    fn render_title(f: &mut Frame, area: Rect, status: &str) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled("HANGMAN", HEADER_STYLE),
            Span::raw("  "),
            Span::styled(status.to_string(), Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_menu(f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled("HANGMAN MENU", HEADER_STYLE)),
            Line::from(""),
        ];
        lines.extend(MENU_LINES.iter().map(|l| Line::from(format!("  {l}"))));

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Menu").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_round(f: &mut Frame, area: Rect, round: &RoundView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FIGURE_PANEL_WIDTH), Constraint::Min(20)])
            .split(area);

        let figure_style = match round.status {
            RoundStatus::Lost => ERROR_STYLE,
            RoundStatus::Won => SUCCESS_STYLE,
            RoundStatus::InProgress => Style::default(),
        };
        let figure = Paragraph::new(figure_for(round.attempts_remaining))
            .style(figure_style)
            .block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(figure, columns[0]);

        let mut lines = vec![
            Line::from(Span::styled(round.pattern.clone(), HEADER_STYLE)),
            Line::from(""),
            Line::from(format!("Guessed letters: {}", round.guessed_letters)),
            Line::from(format!(
                "Attempts left:   {} / {}",
                round.attempts_remaining, MAX_ATTEMPTS
            )),
            Line::from(format!("Score:           {}", round.score)),
            Line::from(format!("Difficulty:      {}", round.difficulty)),
        ];
        if let Some(hint) = &round.hint {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("Hint: {hint}"), INFO_STYLE)));
        }

        let info = Paragraph::new(lines)
            .block(Block::default().title("Word").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(info, columns[1]);
    }

    fn render_log(f: &mut Frame, area: Rect, log: &[LogLine]) {
        let visible = usize::from(area.height.saturating_sub(2));
        let skip = log.len().saturating_sub(visible);
        let lines: Vec<Line> = log
            .iter()
            .skip(skip)
            .map(|line| Line::from(Span::styled(line.text.clone(), line.kind.style())))
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Messages").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_prompt(f: &mut Frame, area: Rect, prompt: &str, input: &str) {
        let line = Line::from(vec![
            Span::styled(prompt.to_string(), INFO_STYLE),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        let paragraph =
            Paragraph::new(line).block(Block::default().title("Input").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new("Type your answer | ENTER: Submit | BACKSPACE: Delete | ESC: Quit")
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<LineEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                Ok(self.handle_key(key))
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<LineEvent> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if has_ctrl => Some(LineEvent::Cancel),
            KeyCode::Esc => {
                info_log!("handle_key() - ESC pressed, closing input");
                Some(LineEvent::Cancel)
            }
            KeyCode::Enter => Some(LineEvent::Submit(std::mem::take(&mut self.input))),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Char(c)
                if !has_ctrl
                    && !key.modifiers.contains(KeyModifiers::ALT)
                    && !c.is_control()
                    && self.input.chars().count() < MAX_INPUT_LEN =>
            {
                self.input.push(c);
                None
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn read_line(&mut self, prompt: Prompt) -> Option<String> {
        self.prompt = prompt.text().to_string();
        self.input.clear();

        loop {
            if self.draw().is_err() {
                info_log!("read_line() - Draw failed, closing input");
                return None;
            }
            match self.handle_input() {
                Ok(Some(LineEvent::Submit(line))) => {
                    debug_log!("read_line() - {:?} -> {:?}", prompt, line);
                    self.prompt.clear();
                    return Some(line.trim().to_string());
                }
                Ok(Some(LineEvent::Cancel)) => return None,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_line() - Input error: {}", e);
                    return None;
                }
            }
        }
    }

    fn display_welcome(&mut self) {
        self.push_log("Welcome to Hangman!", LogKind::Success);
        self.draw_or_log();
    }

    fn display_menu(&mut self) {
        self.view = View::Menu;
        self.status = "Main menu".to_string();
        self.draw_or_log();
    }

    fn display_round(&mut self, round: &RoundState) {
        self.view = View::Round(RoundView::from_state(round));
        self.status = format!("{} letters to find", round.revealed().len());
        self.draw_or_log();
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome) {
        self.push_log(outcome.to_string(), LogKind::for_outcome(outcome));
        self.draw_or_log();
    }

    fn display_hint(&mut self, hint: &str) {
        if let View::Round(round) = &mut self.view {
            round.hint = Some(hint.to_string());
        }
        self.push_log(format!("Hint: {hint}"), LogKind::Hint);
        self.draw_or_log();
    }

    fn display_round_over(&mut self, round: &RoundState) {
        self.view = View::Round(RoundView::from_state(round));
        let kind = if round.status() == RoundStatus::Won {
            LogKind::Success
        } else {
            LogKind::Error
        };
        self.push_log(round.summary(), kind);
        self.status = "Round over".to_string();
        self.draw_or_log();
    }

    fn display_message(&mut self, message: &str) {
        self.push_log(message, LogKind::Info);
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_log_kinds() {
        assert_eq!(LogKind::for_outcome(&GuessOutcome::InvalidInput), LogKind::Info);
        assert_eq!(
            LogKind::for_outcome(&GuessOutcome::AlreadyGuessedLetter('C')),
            LogKind::Info
        );
        assert_eq!(
            LogKind::for_outcome(&GuessOutcome::CorrectWord("CAT".to_string())),
            LogKind::Success
        );
        assert_eq!(
            LogKind::for_outcome(&GuessOutcome::IncorrectLetter('Q')),
            LogKind::Error
        );
    }
}

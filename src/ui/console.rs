// Append-only console holding ffmpeg output and status messages

use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Messages from ffopt itself
    Info,
    /// Relayed ffmpeg output
    Output,
    Success,
    Error,
}

impl LineKind {
    fn style(self) -> Style {
        match self {
            Self::Info => Style::default().fg(Color::Cyan),
            Self::Output => Style::default().fg(Color::White),
            Self::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            Self::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub at: DateTime<Local>,
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug)]
pub struct ConsoleState {
    lines: VecDeque<ConsoleLine>,
    max_lines: usize,
    /// Lines scrolled up from the bottom; 0 follows new output
    scroll_offset: usize,
    /// Visible rows at the last render, used for paging
    page_height: usize,
}

impl ConsoleState {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            scroll_offset: 0,
            page_height: 10,
        }
    }

    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        if self.lines.len() == self.max_lines {
            self.lines.pop_front();
        }
        self.lines.push_back(ConsoleLine {
            at: Local::now(),
            kind,
            text: text.into(),
        });
        // Keep the same lines on screen while the user is scrolled up
        if self.scroll_offset > 0 {
            self.scroll_offset = (self.scroll_offset + 1).min(self.max_scroll());
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_following(&self) -> bool {
        self.scroll_offset == 0
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = (self.scroll_offset + n).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_height.max(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = self.max_scroll();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.page_height)
    }

    /// Range of line indices visible in a window of `height` rows
    fn visible_range(&self, height: usize) -> (usize, usize) {
        let total = self.lines.len();
        let offset = self.scroll_offset.min(total.saturating_sub(height));
        let end = total - offset;
        let start = end.saturating_sub(height);
        (start, end)
    }
}

pub struct ConsoleView;

impl ConsoleView {
    pub fn render(frame: &mut Frame, area: Rect, state: &mut ConsoleState, focused: bool) {
        let title = if state.is_following() {
            " Console ".to_string()
        } else {
            format!(" Console (scrolled, {} lines) [End] follow ", state.len())
        };

        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        state.page_height = inner.height as usize;

        let (start, end) = state.visible_range(inner.height as usize);
        let lines: Vec<Line> = state
            .lines
            .range(start..end)
            .map(|line| {
                Line::from(vec![
                    Span::styled(
                        line.at.format("%H:%M:%S ").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(line.text.clone(), line.kind.style()),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

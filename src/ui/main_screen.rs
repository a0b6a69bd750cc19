// Main screen: controls row, selection summary, console and footer

use crate::engine::{ProfileKind, derive_output_path};
use crate::ui::components::{Footer, render_button, render_radio};
use crate::ui::console::ConsoleView;
use crate::ui::state::{AppState, ControlAreas, Focus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct MainScreen;

impl MainScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Controls
                Constraint::Length(2), // Selection summary
                Constraint::Min(0),    // Console
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(17),
                Constraint::Length(24),
                Constraint::Length(24),
                Constraint::Length(13),
                Constraint::Min(0),
            ])
            .split(chunks[0]);

        state.areas = ControlAreas {
            select_file: controls[0],
            software: controls[1],
            hardware: controls[2],
            process: controls[3],
            console: chunks[2],
        };

        let buf = frame.buffer_mut();
        render_button(
            "Select File",
            state.focus == Focus::SelectFile,
            !state.runner.is_running(),
            controls[0],
            buf,
        );
        for (kind, rect, focus) in [
            (ProfileKind::Software, controls[1], Focus::Software),
            (ProfileKind::Hardware, controls[2], Focus::Hardware),
        ] {
            render_radio(
                kind.label(),
                state.profile == kind,
                state.focus == focus,
                rect,
                buf,
            );
        }
        render_button(
            "Process",
            state.focus == Focus::Process,
            state.process_enabled(),
            controls[3],
            buf,
        );

        Self::render_selection(frame, chunks[1], state);

        let console_focused = state.focus == Focus::Console;
        ConsoleView::render(frame, chunks[2], &mut state.console, console_focused);

        Footer::main_screen(state.runner.is_running()).render(chunks[3], frame.buffer_mut());
    }

    fn render_selection(frame: &mut Frame, area: Rect, state: &AppState) {
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::White);

        let lines = match &state.selected_file {
            Some(path) => vec![
                Line::from(vec![
                    Span::styled(" Input:  ", label),
                    Span::styled(path.display().to_string(), value),
                ]),
                Line::from(vec![
                    Span::styled(" Output: ", label),
                    Span::styled(derive_output_path(path).display().to_string(), value),
                ]),
            ],
            None => vec![Line::from(Span::styled(
                " No file selected. Press [O] to choose a video.",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        frame.render_widget(Paragraph::new(lines), area);
    }
}

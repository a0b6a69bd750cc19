// Error and quit-confirmation modals

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn render_frame(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn key_hint(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(
        key,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

pub struct ErrorModal;

impl ErrorModal {
    pub fn render(frame: &mut Frame, message: &str) {
        let modal_area = centered(frame.area(), 56, 7);
        let inner = render_frame(frame, modal_area, " Error ", Color::Red);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![key_hint("[Enter]", Color::Yellow), Span::raw(" OK")]),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            inner,
        );
    }
}

pub struct QuitModal;

impl QuitModal {
    pub fn render(frame: &mut Frame) {
        let modal_area = centered(frame.area(), 50, 7);
        let inner = render_frame(frame, modal_area, " Quit Confirmation ", Color::Yellow);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "An encode is currently running.",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "Quitting will abandon it.",
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                key_hint("[Y]", Color::Green),
                Span::raw(" Quit   "),
                key_hint("[N]", Color::Red),
                Span::raw(" Cancel"),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }
}

// Reusable UI components

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct Footer {
    content: Line<'static>,
}

impl Footer {
    pub fn main_screen(running: bool) -> Self {
        let status = if running { "Encoding…  |  " } else { "Idle  |  " };
        let mut spans = vec![Span::raw(status)];

        let controls = [
            ("[O]", "pen"),
            ("[S]", "oftware"),
            ("[W]", " Hardware"),
            ("[P]", "rocess"),
            ("[Tab]", " Focus"),
            ("[↑/↓]", " Scroll"),
            ("[Q]", "uit"),
        ];

        for (i, (hotkey, desc)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*hotkey, Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(*desc));
        }

        Self {
            content: Line::from(spans),
        }
    }
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.content)
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

/// Bordered push button. Disabled buttons are dimmed and ignore focus.
pub fn render_button(label: &str, focused: bool, enabled: bool, area: Rect, buf: &mut Buffer) {
    let (border, text) = if !enabled {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else if focused {
        (
            Style::default().fg(Color::Yellow),
            Style::default().bg(Color::Blue).fg(Color::White).bold(),
        )
    } else {
        (Style::default().fg(Color::Gray), Style::default().fg(Color::White))
    };

    Paragraph::new(Line::from(Span::styled(label.to_string(), text)))
        .centered()
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .render(area, buf);
}

/// One option of a radio group, vertically centered in `area`
pub fn render_radio(label: &str, selected: bool, focused: bool, area: Rect, buf: &mut Buffer) {
    let symbol = if selected { "(•)" } else { "( )" };
    let symbol_style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if focused {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::White)
    };

    let text = Line::from(vec![
        Span::styled(symbol, symbol_style),
        Span::raw(" "),
        Span::styled(label.to_string(), label_style),
    ]);

    let row = area.y + area.height / 2;
    buf.set_line(area.x + 1, row, &text, area.width.saturating_sub(1));
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

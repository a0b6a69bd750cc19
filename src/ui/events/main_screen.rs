use super::*;
use crate::engine::ProfileKind;
use crate::ui::components::contains;
use crate::ui::state::Focus;
use crossterm::event::{MouseButton, MouseEventKind};

const WHEEL_LINES: usize = 3;

pub(super) fn handle_main_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Tab => state.focus = state.focus.next(),
        KeyCode::BackTab => state.focus = state.focus.prev(),
        KeyCode::Enter | KeyCode::Char(' ') => activate(state.focus, state),

        KeyCode::Char('o') | KeyCode::Char('O') => activate(Focus::SelectFile, state),
        KeyCode::Char('s') | KeyCode::Char('S') => state.set_profile(ProfileKind::Software),
        KeyCode::Char('w') | KeyCode::Char('W') => state.set_profile(ProfileKind::Hardware),
        KeyCode::Char('p') | KeyCode::Char('P') => activate(Focus::Process, state),

        // Arrows flip the radio pair when it has focus
        KeyCode::Left | KeyCode::Right
            if matches!(state.focus, Focus::Software | Focus::Hardware) =>
        {
            let next = state.profile.toggled();
            state.set_profile(next);
            state.focus = match next {
                ProfileKind::Software => Focus::Software,
                ProfileKind::Hardware => Focus::Hardware,
            };
        }

        KeyCode::Up => state.console.scroll_up(1),
        KeyCode::Down => state.console.scroll_down(1),
        KeyCode::PageUp => state.console.page_up(),
        KeyCode::PageDown => state.console.page_down(),
        KeyCode::Home => state.console.scroll_to_top(),
        KeyCode::End => state.console.scroll_to_bottom(),
        _ => {}
    }
}

fn activate(target: Focus, state: &mut AppState) {
    match target {
        Focus::SelectFile => {
            // Changing the selection mid-run would not affect the running job,
            // but keep the controls consistent with the disabled look
            if !state.runner.is_running() {
                state.open_file_picker();
            }
        }
        Focus::Software => state.set_profile(ProfileKind::Software),
        Focus::Hardware => state.set_profile(ProfileKind::Hardware),
        Focus::Process => {
            if state.process_enabled() {
                state.process_selected_file();
            }
        }
        Focus::Console => state.console.scroll_to_bottom(),
    }
}

pub(super) fn handle_main_mouse(mouse: MouseEvent, state: &mut AppState) {
    let areas = state.areas;
    match mouse.kind {
        MouseEventKind::ScrollUp if contains(areas.console, mouse.column, mouse.row) => {
            state.console.scroll_up(WHEEL_LINES);
        }
        MouseEventKind::ScrollDown if contains(areas.console, mouse.column, mouse.row) => {
            state.console.scroll_down(WHEEL_LINES);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let targets = [
                (areas.select_file, Focus::SelectFile),
                (areas.software, Focus::Software),
                (areas.hardware, Focus::Hardware),
                (areas.process, Focus::Process),
                (areas.console, Focus::Console),
            ];
            if let Some((_, focus)) = targets
                .into_iter()
                .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))
            {
                state.focus = focus;
                if focus != Focus::Console {
                    activate(focus, state);
                }
            }
        }
        _ => {}
    }
}

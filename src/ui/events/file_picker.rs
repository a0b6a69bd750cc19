use super::*;
use crate::ui::file_picker::PickerAction;
use crossterm::event::MouseEventKind;

const PAGE: usize = 10;

pub(super) fn handle_picker_key(key: KeyEvent, state: &mut AppState) {
    let Some(picker) = state.file_picker.as_mut() else {
        return;
    };

    let action = match key.code {
        KeyCode::Esc => {
            state.file_picker = None;
            return;
        }
        KeyCode::Up => {
            picker.move_up(1);
            PickerAction::None
        }
        KeyCode::Down => {
            picker.move_down(1);
            PickerAction::None
        }
        KeyCode::PageUp => {
            picker.move_up(PAGE);
            PickerAction::None
        }
        KeyCode::PageDown => {
            picker.move_down(PAGE);
            PickerAction::None
        }
        KeyCode::Backspace | KeyCode::Left => {
            picker.go_up();
            PickerAction::None
        }
        KeyCode::Enter | KeyCode::Right => picker.activate(),
        _ => PickerAction::None,
    };

    if let PickerAction::Selected(path) = action {
        state.file_picker = None;
        state.select_file(path);
    }
}

pub(super) fn handle_picker_mouse(mouse: MouseEvent, state: &mut AppState) {
    let Some(picker) = state.file_picker.as_mut() else {
        return;
    };

    match mouse.kind {
        MouseEventKind::ScrollUp => picker.move_up(1),
        MouseEventKind::ScrollDown => picker.move_down(1),
        _ => {}
    }
}

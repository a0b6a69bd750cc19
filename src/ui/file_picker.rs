// File-open modal: one directory at a time, showing folders and .mp4 files

use crate::engine::{is_media_file, job::MEDIA_EXTENSION};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Dir,
    File,
}

#[derive(Debug, Clone)]
pub struct PickerEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
}

/// What activating the highlighted entry did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Selected(PathBuf),
}

/// List `dir`: parent link, then sub-directories, then media files, each sorted by name.
/// Hidden entries are skipped.
pub fn list_dir(dir: &Path) -> Result<Vec<PickerEntry>, walkdir::Error> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be read
            Err(e) if e.depth() == 0 => return Err(e),
            Err(_) => continue,
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        // Follow symlinks for the dir/file decision only
        let path = entry.path().to_path_buf();
        if path.is_dir() {
            dirs.push(PickerEntry {
                path,
                name,
                kind: EntryKind::Dir,
            });
        } else if is_media_file(&path) {
            files.push(PickerEntry {
                path,
                name,
                kind: EntryKind::File,
            });
        }
    }

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = dir.parent() {
        entries.push(PickerEntry {
            path: parent.to_path_buf(),
            name: "..".to_string(),
            kind: EntryKind::Parent,
        });
    }
    entries.extend(dirs);
    entries.extend(files);
    Ok(entries)
}

#[derive(Debug)]
pub struct FilePickerState {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub list_state: ListState,
    pub error: Option<String>,
}

impl FilePickerState {
    pub fn open(dir: &Path) -> Self {
        let dir = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
        let mut state = Self {
            dir,
            entries: Vec::new(),
            list_state: ListState::default(),
            error: None,
        };
        state.refresh();
        state
    }

    pub fn refresh(&mut self) {
        match list_dir(&self.dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "cannot list directory");
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }

        // Land on the first real entry rather than ".."
        let first = match self.entries.first() {
            Some(entry) if entry.kind == EntryKind::Parent && self.entries.len() > 1 => 1,
            Some(_) => 0,
            None => {
                self.list_state.select(None);
                return;
            }
        };
        self.list_state.select(Some(first));
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn move_up(&mut self, n: usize) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(n)));
        }
    }

    pub fn move_down(&mut self, n: usize) {
        if let Some(i) = self.list_state.selected() {
            let last = self.entries.len().saturating_sub(1);
            self.list_state.select(Some((i + n).min(last)));
        }
    }

    pub fn go_to(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.refresh();
    }

    pub fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.go_to(parent);
        }
    }

    /// Enter a directory or pick a file
    pub fn activate(&mut self) -> PickerAction {
        let Some(entry) = self.selected().cloned() else {
            return PickerAction::None;
        };

        match entry.kind {
            EntryKind::Parent | EntryKind::Dir => {
                self.go_to(entry.path);
                PickerAction::None
            }
            EntryKind::File => PickerAction::Selected(entry.path),
        }
    }
}

pub struct FilePicker;

impl FilePicker {
    pub fn render(frame: &mut Frame, state: &mut FilePickerState) {
        let area = frame.area();

        let modal_width = 80.min(area.width.saturating_sub(4));
        let modal_height = 24.min(area.height.saturating_sub(2));
        let modal_area = Rect {
            x: (area.width.saturating_sub(modal_width)) / 2,
            y: (area.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" Select File (*.{}) ", MEDIA_EXTENSION))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Current directory
                Constraint::Min(0),    // Entries
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(state.dir.display().to_string())
                .style(Style::default().fg(Color::Gray)),
            chunks[0],
        );

        if let Some(err) = &state.error {
            frame.render_widget(
                Paragraph::new(format!("Cannot read directory: {}", err))
                    .style(Style::default().fg(Color::Red)),
                chunks[1],
            );
        } else if state.entries.is_empty() {
            frame.render_widget(
                Paragraph::new("No folders or video files here")
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        } else {
            let items: Vec<ListItem> = state
                .entries
                .iter()
                .map(|entry| {
                    let (icon, style) = match entry.kind {
                        EntryKind::Parent => ("↑ ", Style::default().fg(Color::Gray)),
                        EntryKind::Dir => ("▸ ", Style::default().fg(Color::Cyan)),
                        EntryKind::File => ("  ", Style::default().fg(Color::White)),
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(icon, style),
                        Span::styled(entry.name.clone(), style),
                    ]))
                })
                .collect();

            let list = List::new(items).highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
            frame.render_stateful_widget(list, chunks[1], &mut state.list_state);
        }

        let controls = Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Open/Select  "),
            Span::styled("[Backspace]", Style::default().fg(Color::Yellow)),
            Span::raw(" Up  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]);
        frame.render_widget(
            Paragraph::new(controls).style(Style::default().bg(Color::DarkGray)),
            chunks[2],
        );
    }
}

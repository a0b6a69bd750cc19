// Event handling and main UI loop

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::ui::{
    ErrorModal, FilePicker, MainScreen, QuitModal, UiOptions,
    state::AppState,
};

mod file_picker;
mod main_screen;

// Event types sent from dedicated event thread to main loop
enum UiEvent {
    Input(Event), // Keyboard, mouse, or other terminal events
    Tick,         // Periodic wake-up to pick up encoder output
}

/// Spawn a dedicated thread for event polling.
fn spawn_event_thread(tx: mpsc::Sender<UiEvent>) {
    let tick_rate = Duration::from_millis(33);

    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(UiEvent::Input(evt)).is_err() {
                        break; // Main thread dropped the receiver
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.send(UiEvent::Tick).is_err() {
                    break; // Main thread dropped the receiver
                }
                last_tick = Instant::now();
            }
        }
    });
}

pub fn run_ui(options: UiOptions) -> io::Result<()> {
    // Setup terminal with alternate screen (full terminal)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(options);

    let (event_tx, event_rx) = mpsc::channel();
    spawn_event_thread(event_tx);

    tracing::info!("ui started");
    let result = run_app(&mut terminal, &mut app_state, event_rx);

    // Restore terminal: leave alternate screen and disable mouse capture
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    event_rx: Receiver<UiEvent>,
) -> io::Result<()> {
    loop {
        let mut pending_inputs: Vec<Event> = Vec::new();

        // Always block for at least one event, then drain the queue
        match event_rx.recv() {
            Ok(UiEvent::Input(ev)) => pending_inputs.push(ev),
            Ok(UiEvent::Tick) => {}
            Err(_) => return Ok(()), // Channel closed, exit
        }
        while let Ok(evt) = event_rx.try_recv() {
            if let UiEvent::Input(ev) = evt {
                pending_inputs.push(ev);
            }
        }

        // Process input events first so user commands are never stuck behind output
        for input in pending_inputs {
            match input {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if handle_key(key, state) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(mouse, state),
                _ => {}
            }
        }

        // Encoder output is only ever applied here, on the UI thread
        state.poll_runner();

        terminal.draw(|frame| draw(frame, state))?;
    }
}

/// Render the whole UI for one frame
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    MainScreen::render(frame, state);

    if let Some(ref mut picker) = state.file_picker {
        FilePicker::render(frame, picker);
    }
    if let Some(ref message) = state.error_modal {
        ErrorModal::render(frame, message);
    }
    if state.quit_confirmation {
        QuitModal::render(frame);
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Returns true when the application should exit
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> bool {
    // Modals take all keys, topmost first
    if state.quit_confirmation {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => return true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.quit_confirmation = false;
            }
            _ => {}
        }
        return false;
    }

    if state.error_modal.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.error_modal = None;
        }
        return false;
    }

    if state.file_picker.is_some() {
        file_picker::handle_picker_key(key, state);
        return false;
    }

    if is_quit_key(&key) {
        if state.runner.is_running() {
            state.quit_confirmation = true;
            return false;
        }
        return true;
    }

    main_screen::handle_main_key(key, state);
    false
}

pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) {
    if state.quit_confirmation || state.error_modal.is_some() {
        return;
    }
    if state.file_picker.is_some() {
        file_picker::handle_picker_mouse(mouse, state);
        return;
    }
    main_screen::handle_main_mouse(mouse, state);
}

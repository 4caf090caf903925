use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A logical input event, decoupled from raw key codes.
///
/// The editor state machine consumes these; [`map_key`] produces them
/// from crossterm key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PrintableChar(char),
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    DeleteForward,
    DeleteBackward,
    TriggerFind,
    TriggerUndo,
    TriggerSave,
    TriggerQuit,
    Escape,
    ScreenResized,
}

/// Translate a key event into a logical input. Keys outside the editor's
/// set map to `None` and are dropped by the event loop.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    match key.code {
        KeyCode::Char('f') if key.modifiers == KeyModifiers::CONTROL => Some(Input::TriggerFind),
        KeyCode::Char('z') if key.modifiers == KeyModifiers::CONTROL => Some(Input::TriggerUndo),
        KeyCode::Char('s') if key.modifiers == KeyModifiers::CONTROL => Some(Input::TriggerSave),
        KeyCode::Char('q') if key.modifiers == KeyModifiers::CONTROL => Some(Input::TriggerQuit),
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            Some(Input::PrintableChar(c))
        }
        KeyCode::Left => Some(Input::MoveLeft),
        KeyCode::Right => Some(Input::MoveRight),
        KeyCode::Up => Some(Input::MoveUp),
        KeyCode::Down => Some(Input::MoveDown),
        KeyCode::Home => Some(Input::Home),
        KeyCode::End => Some(Input::End),
        KeyCode::PageUp => Some(Input::PageUp),
        KeyCode::PageDown => Some(Input::PageDown),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Delete => Some(Input::DeleteForward),
        KeyCode::Backspace => Some(Input::DeleteBackward),
        KeyCode::Esc => Some(Input::Escape),
        _ => None,
    }
}

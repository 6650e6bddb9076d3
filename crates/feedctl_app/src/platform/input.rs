use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use feedctl_core::{
    AppState, ControlAction, GuardVerdict, Msg, NavigationEvent, NavigationGuard,
};
use feedctl_logging::feed_debug;

/// What the event loop should do with one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Dispatch(Msg),
    /// A navigation attempt the guard consumed.
    Suppressed(NavigationEvent),
    /// A navigation attempt the guard let through.
    Navigate(NavigationEvent),
    Redraw,
    Ignored,
}

/// Routes a terminal event. Navigation attempts are checked first and never
/// reach the form or the action keys.
pub fn handle_event(guard: &mut NavigationGuard, state: &AppState, event: &Event) -> InputOutcome {
    if let Some(navigation) = navigation_event(event) {
        return match guard.intercept(navigation) {
            GuardVerdict::Suppress => {
                feed_debug!(
                    "suppressed {:?} (total {})",
                    navigation,
                    guard.suppressed_count()
                );
                InputOutcome::Suppressed(navigation)
            }
            GuardVerdict::Allow => InputOutcome::Navigate(navigation),
        };
    }

    match event {
        Event::Key(key) => match key_to_msg(state, key) {
            Some(msg) => InputOutcome::Dispatch(msg),
            None => InputOutcome::Ignored,
        },
        Event::Paste(text) => {
            let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
            if pasted.is_empty() {
                InputOutcome::Ignored
            } else {
                InputOutcome::Dispatch(append_to_focused(state, &pasted))
            }
        }
        Event::Resize(..) | Event::FocusGained => InputOutcome::Redraw,
        _ => InputOutcome::Ignored,
    }
}

fn navigation_event(event: &Event) -> Option<NavigationEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            let command = key.modifiers.intersects(
                KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META,
            );
            match key.code {
                KeyCode::F(5) => Some(NavigationEvent::ReloadShortcut),
                KeyCode::Char('r' | 'R') if command => Some(NavigationEvent::ReloadShortcut),
                KeyCode::Char('c' | 'd' | 'q' | 'w' | 'z')
                    if key.modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    Some(NavigationEvent::UnloadRequested)
                }
                KeyCode::Esc => Some(NavigationEvent::UnloadRequested),
                KeyCode::Menu => Some(NavigationEvent::ContextMenu),
                _ => None,
            }
        }
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Right) => {
            Some(NavigationEvent::ContextMenu)
        }
        _ => None,
    }
}

fn key_to_msg(state: &AppState, key: &KeyEvent) -> Option<Msg> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    let msg = match key.code {
        KeyCode::F(2) => Msg::ActionClicked(ControlAction::StartScheduler),
        KeyCode::F(3) => Msg::ActionClicked(ControlAction::RunNow),
        KeyCode::F(4) => Msg::ActionClicked(ControlAction::StopScheduler),
        KeyCode::Char('s') if alt => Msg::ActionClicked(ControlAction::StartScheduler),
        KeyCode::Char('n') if alt => Msg::ActionClicked(ControlAction::RunNow),
        KeyCode::Char('x') if alt => Msg::ActionClicked(ControlAction::StopScheduler),
        KeyCode::Tab | KeyCode::Down | KeyCode::Enter => Msg::FocusNext,
        KeyCode::BackTab | KeyCode::Up => Msg::FocusPrevious,
        KeyCode::Char('u') if control => Msg::FieldChanged {
            field: state.focus(),
            value: String::new(),
        },
        KeyCode::Backspace => {
            let mut value = state.draft().get(state.focus()).to_string();
            value.pop()?;
            Msg::FieldChanged {
                field: state.focus(),
                value,
            }
        }
        KeyCode::Char(c) if !alt && !control => append_to_focused(state, &c.to_string()),
        _ => return None,
    };
    Some(msg)
}

fn append_to_focused(state: &AppState, text: &str) -> Msg {
    let field = state.focus();
    let mut value = state.draft().get(field).to_string();
    value.push_str(text);
    Msg::FieldChanged { field, value }
}

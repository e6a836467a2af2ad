//! Input adapter: keyboard, touch, pointer and overlay buttons to game actions
//!
//! All inputs are edge-triggered. Anything that does not apply to the current
//! phase maps to [`Action::None`].

use crate::sim::Phase;

/// Keys the game listens to, from `KeyboardEvent.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowUp,
    Escape,
    Other,
}

impl Key {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Raw input from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Touch start on the canvas
    Touch,
    /// Mouse button down on the canvas
    PointerDown,
    StartButton,
    RestartButton,
    SoundButton,
}

/// What the game should do about an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Jump,
    ReturnToMenu,
    ToggleSound,
    None,
}

/// Map an input to an action for the given phase
pub fn map_input(event: InputEvent, phase: Phase) -> Action {
    match (event, phase) {
        (InputEvent::Key(Key::Space | Key::ArrowUp), Phase::Idle) => Action::Start,
        (InputEvent::Key(Key::Space | Key::ArrowUp), Phase::Running) => Action::Jump,
        (InputEvent::Key(Key::Escape), Phase::Over) => Action::ReturnToMenu,
        (InputEvent::Touch | InputEvent::PointerDown, Phase::Running) => Action::Jump,
        (InputEvent::StartButton, Phase::Idle) => Action::Start,
        (InputEvent::RestartButton, Phase::Over) => Action::Start,
        (InputEvent::SoundButton, _) => Action::ToggleSound,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("Space"), Key::Space);
        assert_eq!(Key::from_code("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_code("Escape"), Key::Escape);
        assert_eq!(Key::from_code("KeyW"), Key::Other);
    }

    #[test]
    fn test_keyboard_starts_then_jumps() {
        let space = InputEvent::Key(Key::Space);
        assert_eq!(map_input(space, Phase::Idle), Action::Start);
        assert_eq!(map_input(space, Phase::Running), Action::Jump);
        assert_eq!(map_input(space, Phase::Over), Action::None);
        let up = InputEvent::Key(Key::ArrowUp);
        assert_eq!(map_input(up, Phase::Running), Action::Jump);
    }

    #[test]
    fn test_pointer_only_jumps_while_running() {
        for event in [InputEvent::Touch, InputEvent::PointerDown] {
            assert_eq!(map_input(event, Phase::Idle), Action::None);
            assert_eq!(map_input(event, Phase::Running), Action::Jump);
            assert_eq!(map_input(event, Phase::Over), Action::None);
        }
    }

    #[test]
    fn test_buttons() {
        assert_eq!(map_input(InputEvent::StartButton, Phase::Idle), Action::Start);
        assert_eq!(map_input(InputEvent::StartButton, Phase::Running), Action::None);
        assert_eq!(map_input(InputEvent::RestartButton, Phase::Over), Action::Start);
        assert_eq!(map_input(InputEvent::RestartButton, Phase::Idle), Action::None);
        for phase in [Phase::Idle, Phase::Running, Phase::Over] {
            assert_eq!(map_input(InputEvent::SoundButton, phase), Action::ToggleSound);
        }
    }

    #[test]
    fn test_escape_returns_to_menu_after_game_over() {
        let esc = InputEvent::Key(Key::Escape);
        assert_eq!(map_input(esc, Phase::Over), Action::ReturnToMenu);
        assert_eq!(map_input(esc, Phase::Running), Action::None);
        assert_eq!(map_input(InputEvent::Key(Key::Other), Phase::Idle), Action::None);
    }
}

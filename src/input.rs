#![warn(clippy::all, clippy::pedantic)]

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Discrete gameplay inputs the session understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    RotateCw,
    SoftDrop,
    HardDrop,
    ActivateSkill,
}

/// Everything a key press can mean: a gameplay input or a request for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Game(InputEvent),
    Restart,
    ToggleLeaderboard,
    ClearLeaderboard,
    Quit,
}

/// Maps a key press to a command. Releases and unbound keys map to `None`.
#[must_use]
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Game(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Game(InputEvent::MoveRight),
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Game(InputEvent::RotateCw),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Game(InputEvent::SoftDrop),
        KeyCode::Enter => Command::Game(InputEvent::HardDrop),
        KeyCode::Char(' ') => Command::Game(InputEvent::ActivateSkill),
        KeyCode::Char('r' | 'R') => Command::Restart,
        KeyCode::Char('l' | 'L') => Command::ToggleLeaderboard,
        KeyCode::Char('c' | 'C') => Command::ClearLeaderboard,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };

    Some(command)
}

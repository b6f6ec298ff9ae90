/// Screen state machine.
///
/// A single dispatcher maps `(screen, key)` to a `Command`; the session applies
/// the command.  Each screen's bindings live in one `match` arm here, so
/// moving between screens never stacks up extra handlers.
use crate::input::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
    Leaderboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    None,
    /// Reset all game state and enter `Playing`.
    StartGame,
    ShowLeaderboard,
    ShowMenu,
    Quit,
}

/// Key bindings for each screen.  Movement and fire keys are not commands;
/// they are read from the held-key tracker every frame.
pub fn dispatch(screen: Screen, key: Key) -> Command {
    if matches!(key, Key::Esc | Key::Char('q')) {
        return Command::Quit;
    }
    match (screen, key) {
        (Screen::Menu, Key::Char('s')) => Command::StartGame,
        (Screen::Menu, Key::Char('l')) => Command::ShowLeaderboard,
        (Screen::GameOver, Key::Char('r')) => Command::StartGame,
        (Screen::GameOver, Key::Char('m')) => Command::ShowMenu,
        (Screen::Leaderboard, Key::Char('m')) => Command::ShowMenu,
        _ => Command::None,
    }
}

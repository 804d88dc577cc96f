//! Top-level menu commands.
//!
//! # Invariants
//! - `Command::ALL` is the display order of the menu.
//! - Every command carries its own key and label; adding a variant forces
//!   both through the exhaustive matches below.
//! - `q` is reserved for quitting and never maps to a command.

/// Reserved key that ends the session from the top-level menu.
pub const QUIT_KEY: char = 'q';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    View,
    Search,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::Add, Command::View, Command::Search];

    pub fn key(self) -> char {
        match self {
            Self::Add => 'a',
            Self::View => 'v',
            Self::Search => 's',
        }
    }

    /// One-line menu description.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add an entry.",
            Self::View => "View previous entries.",
            Self::Search => "Search entries by keyword.",
        }
    }

    /// Resolves normalized (trimmed, lowercased) menu input.
    pub fn from_input(input: &str) -> Option<Self> {
        let mut chars = input.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|command| command.key() == key)
    }

    /// Menu line as shown to the user, e.g. `a) Add an entry.`.
    pub fn menu_line(self) -> String {
        format!("{}) {}", self.key(), self.label())
    }
}

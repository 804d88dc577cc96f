//! Interactive journal shell.
//!
//! # Responsibility
//! - Drive the menu / compose / browse cycle over a blocking console.
//! - Translate user choices into journal service calls.
//!
//! # Invariants
//! - Malformed input never ends the session; it re-prompts.
//! - End of input at the menu ends the session cleanly.
//! - Only I/O and storage failures surface as errors.

use crate::command::{Command, QUIT_KEY};
use crate::console::Console;
use crate::render;
use journal_core::{EntryFilter, EntryRepository, JournalService, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const COMPOSE_HINT: &str = "Enter your entry. Press ctrl+d when finished.";
const SAVE_PROMPT: &str = "\nSave Entry? [Yn] ";
const SAVED_MESSAGE: &str = "Saved successfully!";
const SEARCH_PROMPT: &str = "Search query: ";
const MENU_PROMPT: &str = "Action: ";
const BROWSE_PROMPT: &str = "Action: [Nq] ";

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    Repo(RepoError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
            Self::Repo(err) => write!(f, "journal storage failed: {err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ShellError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellState {
    MenuPrompt,
    Composing,
    Browsing(EntryFilter),
    Terminated,
}

pub struct Shell<R: EntryRepository, I, O> {
    service: JournalService<R>,
    console: Console<I, O>,
}

impl<R, I, O> Shell<R, I, O>
where
    R: EntryRepository,
    I: BufRead,
    O: Write,
{
    pub fn new(service: JournalService<R>, input: I, output: O) -> Self {
        Self {
            service,
            console: Console::new(input, output),
        }
    }

    /// Runs until the user quits or input ends.
    pub fn run(&mut self) -> ShellResult<()> {
        let mut state = ShellState::MenuPrompt;
        loop {
            state = match state {
                ShellState::MenuPrompt => self.menu_prompt()?,
                ShellState::Composing => self.compose()?,
                ShellState::Browsing(filter) => self.browse(&filter)?,
                ShellState::Terminated => {
                    info!("event=session_end module=shell status=ok");
                    return Ok(());
                }
            };
        }
    }

    #[cfg(test)]
    fn into_output(self) -> O {
        self.console.into_output()
    }

    fn menu_prompt(&mut self) -> ShellResult<ShellState> {
        self.console.line("")?;
        self.console.line(format!("Enter '{QUIT_KEY}' to quit."))?;
        for command in Command::ALL {
            self.console.line(command.menu_line())?;
        }

        let Some(choice) = self.console.prompt_line(MENU_PROMPT)? else {
            return Ok(ShellState::Terminated);
        };
        let choice = choice.trim().to_lowercase();
        if choice == QUIT_KEY.to_string() {
            return Ok(ShellState::Terminated);
        }

        let Some(command) = Command::from_input(&choice) else {
            return Ok(ShellState::MenuPrompt);
        };
        debug!("event=command_dispatch module=shell command={command:?}");

        let next = match command {
            Command::Add => ShellState::Composing,
            Command::View => ShellState::Browsing(EntryFilter::all()),
            Command::Search => match self.console.prompt_line(SEARCH_PROMPT)? {
                Some(query) => ShellState::Browsing(EntryFilter::containing(query)),
                None => ShellState::MenuPrompt,
            },
        };
        Ok(next)
    }

    fn compose(&mut self) -> ShellResult<ShellState> {
        self.console.line(COMPOSE_HINT)?;
        let draft = self.console.read_until_eof()?;
        let draft = draft.trim();
        if draft.is_empty() {
            return Ok(ShellState::MenuPrompt);
        }

        // End of input while confirming counts as "no".
        let confirmed = self.console.choose(SAVE_PROMPT, &['y', 'n'])? == Some('y');
        if !confirmed {
            debug!("event=entry_compose module=shell status=discarded");
            return Ok(ShellState::MenuPrompt);
        }

        if self.service.create_entry(draft)?.is_some() {
            self.console.line(SAVED_MESSAGE)?;
        }
        Ok(ShellState::MenuPrompt)
    }

    fn browse(&mut self, filter: &EntryFilter) -> ShellResult<ShellState> {
        for entry in self.service.browse(filter) {
            let entry = entry?;
            self.console.line(render::entry_block(&entry))?;
            self.console.line("\nn) for next entry")?;
            self.console.line("q) to return to main menu")?;

            match self.console.choose(BROWSE_PROMPT, &['n', 'q'])? {
                Some('n') => continue,
                _ => break,
            }
        }
        Ok(ShellState::MenuPrompt)
    }
}

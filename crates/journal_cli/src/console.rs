//! Line-oriented terminal I/O used by the shell.
//!
//! # Invariants
//! - Every prompt is flushed before input is read.
//! - End of input is reported as `None`, never as an error.
//! - Input that is not valid UTF-8 is decoded lossily, never rejected.

use std::io::{self, BufRead, Read, Write};

pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Shows `prompt` and reads one line with its terminator removed.
    ///
    /// Returns `None` at end of input.
    pub fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Re-prompts until the trimmed, case-folded answer is one of `choices`.
    ///
    /// Returns `None` at end of input.
    pub fn choose(&mut self, prompt: &str, choices: &[char]) -> io::Result<Option<char>> {
        loop {
            let Some(answer) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            if let Some(choice) = single_choice(&answer, choices) {
                return Ok(Some(choice));
            }
        }
    }

    /// Reads everything up to the next end-of-input signal (Ctrl+D on a
    /// terminal). Input after the signal stays available for later prompts.
    pub fn read_until_eof(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut raw = Vec::new();
        self.input.read_to_end(&mut raw)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

fn single_choice(answer: &str, choices: &[char]) -> Option<char> {
    let normalized = answer.trim().to_lowercase();
    let mut chars = normalized.chars();
    let choice = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    choices.contains(&choice).then_some(choice)
}


#[cfg(test)]
mod tests {
    use super::scripted::ScriptedInput;
    use super::{single_choice, Console};
    use std::io::BufReader;

    fn console(chunks: &[&str]) -> Console<BufReader<ScriptedInput>, Vec<u8>> {
        Console::new(BufReader::new(ScriptedInput::new(chunks)), Vec::new())
    }

    #[test]
    fn prompt_line_strips_only_the_terminator() {
        let mut console = console(&["  spaced query \r\n"]);

        let line = console.prompt_line("Search query: ").unwrap();
        assert_eq!(line.as_deref(), Some("  spaced query "));
        assert_eq!(
            String::from_utf8(console.into_output()).unwrap(),
            "Search query: "
        );
    }

    #[test]
    fn prompt_line_reports_end_of_input() {
        let mut console = console(&[""]);
        assert_eq!(console.prompt_line("Action: ").unwrap(), None);
    }

    #[test]
    fn choose_reprompts_until_valid_answer() {
        let mut console = console(&["maybe\nyes\n Y \n"]);

        assert_eq!(console.choose("? ", &['y', 'n']).unwrap(), Some('y'));
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "? ? ? ");
    }

    #[test]
    fn choose_returns_none_at_end_of_input() {
        let mut console = console(&["x\n"]);
        assert_eq!(console.choose("? ", &['n', 'q']).unwrap(), None);
    }

    #[test]
    fn read_until_eof_leaves_later_input_available() {
        let mut console = console(&["line one\nline two\n", "after\n"]);

        assert_eq!(console.read_until_eof().unwrap(), "line one\nline two\n");
        assert_eq!(console.prompt_line("").unwrap().as_deref(), Some("after"));
    }

    #[test]
    fn prompt_line_replaces_invalid_utf8() {
        let mut console = Console::new(
            BufReader::new(ScriptedInput::new(&[&b"\xff\xfe\nnext\n"[..]])),
            Vec::new(),
        );

        assert_eq!(
            console.prompt_line("").unwrap().as_deref(),
            Some("\u{fffd}\u{fffd}")
        );
        assert_eq!(console.prompt_line("").unwrap().as_deref(), Some("next"));
    }

    #[test]
    fn read_until_eof_replaces_invalid_utf8() {
        let mut console = Console::new(
            BufReader::new(ScriptedInput::new(&[&b"caf\xe9 notes\n"[..]])),
            Vec::new(),
        );
        assert_eq!(console.read_until_eof().unwrap(), "caf\u{fffd} notes\n");
    }

    #[test]
    fn single_choice_is_case_insensitive_and_exact() {
        assert_eq!(single_choice("N", &['n', 'q']), Some('n'));
        assert_eq!(single_choice(" q ", &['n', 'q']), Some('q'));
        assert_eq!(single_choice("no", &['n', 'q']), None);
        assert_eq!(single_choice("", &['n', 'q']), None);
    }
}

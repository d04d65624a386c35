// a3update-rs: Arma 3 Server Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-based terminal prompts for the setup wizard.
//!
//! ```text
//! Question [default]: <answer>     empty answer -> default
//! Question (y/n) [y]: <answer>     y/yes/n/no, anything else asks again
//! EOF on the reader                -> SetupError::NoInput
//! Password: <hidden>               raw mode on a terminal, Ctrl+C/Ctrl+D abort
//! ```
//!
//! The `ask_*` helpers repeat a question until the answer parses:
//!
//! ```text
//! ask_list      "1681170, 1042220" -> Vec<T>
//! ask_parsed    "2302"             -> T
//! ask_existing_file                -> PathBuf of an existing file
//! ```

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::error::{A3Error, Result, SetupError};

/// Source of answers for interactive questions.
pub trait Prompter {
    /// Asks for free text. An empty answer yields `default` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoInput`] if input ended before an answer.
    fn input(&mut self, question: &str, default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoInput`] if input ended before an answer.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Asks for a secret. On a terminal the typed characters are not echoed.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoInput`] if input ended before an answer.
    fn password(&mut self, question: &str) -> Result<String>;

    /// Asks for a path, relative answers are kept as typed.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::NoInput`] if input ended before an answer.
    fn path(&mut self, question: &str, default: &str) -> Result<PathBuf> {
        self.input(question, Some(default)).map(PathBuf::from)
    }

    /// Prints a line that is not a question.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn notice(&mut self, message: &str) -> Result<()>;
}

/// Asks for a comma or space separated list until every element parses.
///
/// # Errors
///
/// Returns [`SetupError::NoInput`] if input ended before an answer.
pub fn ask_list<T: FromStr>(prompter: &mut dyn Prompter, question: &str) -> Result<Vec<T>> {
    loop {
        let answer = prompter.input(question, Some(""))?;
        match parse_list(&answer) {
            Some(values) => return Ok(values),
            None => prompter.notice(&format!("could not read '{answer}', try again"))?,
        }
    }
}

/// Asks until the answer parses as `T`.
///
/// # Errors
///
/// Returns [`SetupError::NoInput`] if input ended before an answer.
pub fn ask_parsed<T: FromStr>(
    prompter: &mut dyn Prompter,
    question: &str,
    default: &str,
) -> Result<T> {
    loop {
        let answer = prompter.input(question, Some(default))?;
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => prompter.notice(&format!("could not read '{answer}', try again"))?,
        }
    }
}

/// Asks for a path until it names an existing file.
///
/// # Errors
///
/// Returns [`SetupError::NoInput`] if input ended before an answer.
pub fn ask_existing_file(
    prompter: &mut dyn Prompter,
    question: &str,
    default: Option<&str>,
) -> Result<PathBuf> {
    loop {
        let path = PathBuf::from(prompter.input(question, default)?);
        if path.is_file() {
            return Ok(path);
        }
        prompter.notice(&format!("{} does not exist, try again", path.display()))?;
    }
}

/// Splits on commas and whitespace, `None` if any element fails to parse.
#[must_use]
pub fn parse_list<T: FromStr>(answer: &str) -> Option<Vec<T>> {
    answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// What a key press does to a hidden answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HiddenKey {
    Continue,
    Submit,
    Abort,
}

/// Applies one key press to the hidden answer typed so far.
pub(crate) fn apply_hidden_key(answer: &mut String, key: KeyEvent) -> HiddenKey {
    if key.kind == KeyEventKind::Release {
        return HiddenKey::Continue;
    }
    match key.code {
        KeyCode::Enter => HiddenKey::Submit,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            HiddenKey::Abort
        }
        KeyCode::Char(c) => {
            answer.push(c);
            HiddenKey::Continue
        }
        KeyCode::Backspace => {
            answer.pop();
            HiddenKey::Continue
        }
        _ => HiddenKey::Continue,
    }
}

/// Reads one line from the terminal in raw mode, so nothing is echoed.
/// `None` when the user aborted.
fn read_hidden_line() -> std::io::Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let result = read_hidden_keys();
    terminal::disable_raw_mode()?;
    result
}

fn read_hidden_keys() -> std::io::Result<Option<String>> {
    let mut answer = String::new();
    loop {
        if let Event::Key(key) = event::read()? {
            match apply_hidden_key(&mut answer, key) {
                HiddenKey::Continue => {}
                HiddenKey::Submit => return Ok(Some(answer)),
                HiddenKey::Abort => return Ok(None),
            }
        }
    }
}

/// [`Prompter`] reading answers line by line.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
    hide_input: bool,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            hide_input: false,
        }
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ask(&mut self, prompt: &str, question: &str) -> Result<String> {
        write!(self.writer, "{prompt}: ")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(A3Error::from(SetupError::NoInput {
                question: question.to_string(),
            })
            .into());
        }
        Ok(line.trim().to_string())
    }
}

impl LinePrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompter on the process terminal. Passwords are read without echo
    /// when stdin is a terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin = std::io::stdin();
        let hide_input = stdin.is_terminal();
        Self {
            hide_input,
            ..Self::new(stdin.lock(), std::io::stdout())
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        let prompt = match default {
            Some(d) if !d.is_empty() => format!("{question} [{d}]"),
            _ => question.to_string(),
        };

        loop {
            let answer = self.ask(&prompt, question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            if let Some(d) = default {
                return Ok(d.to_string());
            }
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let prompt = format!("{question} (y/n) [{}]", if default { "y" } else { "n" });

        loop {
            let answer = self.ask(&prompt, question)?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.notice("please answer y or n")?,
            }
        }
    }

    fn password(&mut self, question: &str) -> Result<String> {
        if !self.hide_input {
            return self.ask(question, question);
        }

        write!(self.writer, "{question}: ")?;
        self.writer.flush()?;
        let answer = read_hidden_line()?;
        writeln!(self.writer)?;

        answer.ok_or_else(|| {
            A3Error::from(SetupError::NoInput {
                question: question.to_string(),
            })
            .into()
        })
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }
}

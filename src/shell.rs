//! Interactive command shell over a word dictionary.
//!
//! The shell reads one command per line, runs it against the dictionary and
//! reports the outcome with colored status messages. It works over any
//! reader/writer pair, so it can be driven by a terminal or by a test.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crossterm::style::Stylize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::dictionary::{BatchOutcome, BulkOp, Dictionary};
use crate::loader;
use crate::set::OrderedSet;

/// A parsed shell command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(String),
    Delete(String),
    Search(String),
    BatchInsert(PathBuf),
    BatchDelete(PathBuf),
    Size,
    Height,
    Help,
    Exit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("Please specify {0}.")]
    MissingArgument(&'static str),
    #[error("Unknown command. Type 'help' for available commands.")]
    Unknown(String),
}

impl Command {
    /// Parses a command line: a case-insensitive command name, then the rest
    /// of the line as its argument.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let word = |what| {
            if arg.is_empty() {
                Err(ParseError::MissingArgument(what))
            } else {
                Ok(arg.to_string())
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "insert" => word("a word to insert").map(Command::Insert),
            "delete" => word("a word to delete").map(Command::Delete),
            "search" => word("a word to search for").map(Command::Search),
            "batch-insert" => word("a filename").map(|path| Command::BatchInsert(path.into())),
            "batch-delete" => word("a filename").map(|path| Command::BatchDelete(path.into())),
            "size" => Ok(Command::Size),
            "height" => Ok(Command::Height),
            "help" => Ok(Command::Help),
            "exit" => Ok(Command::Exit),
            _ => Err(ParseError::Unknown(name.to_string())),
        }
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<R, W> {
    dictionary: Dictionary<String>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(dictionary: Dictionary<String>, input: R, output: W) -> Self {
        Self {
            dictionary,
            input,
            output,
        }
    }

    pub fn dictionary(&self) -> &Dictionary<String> {
        &self.dictionary
    }

    pub fn into_dictionary(self) -> Dictionary<String> {
        self.dictionary
    }

    /// Runs the read-eval-print loop until `exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_banner()?;
        self.print_help()?;
        let mut line = String::new();
        loop {
            write!(self.output, "{} ", "➤".yellow().bold())?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }

            let flow = match Command::parse(&line) {
                Ok(command) => self.execute(command)?,
                Err(ParseError::Empty) => Flow::Continue,
                Err(err) => {
                    writeln!(self.output, "{}", err.to_string().red().bold())?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Insert(word) => {
                if self.dictionary.insert(word.clone()) {
                    self.report_word(true, "✓ Word '", &word, "' inserted successfully.")?;
                } else {
                    self.report_word(false, "⚠ Failed to insert word '", &word, "'. It may already exist.")?;
                }
            }
            Command::Delete(word) => {
                if self.dictionary.delete(&word) {
                    self.report_word(true, "✓ Word '", &word, "' deleted successfully.")?;
                } else {
                    self.report_word(false, "⚠ Word '", &word, "' not found.")?;
                }
            }
            Command::Search(word) => {
                if self.dictionary.search(&word) {
                    self.report_word(true, "✓ Word '", &word, "' found in dictionary.")?;
                } else {
                    self.report_word(false, "⚠ Word '", &word, "' not found in dictionary.")?;
                }
            }
            Command::BatchInsert(path) => self.batch(path, BulkOp::Insert)?,
            Command::BatchDelete(path) => self.batch(path, BulkOp::Delete)?,
            Command::Size => {
                writeln!(
                    self.output,
                    "{}{}{}",
                    "Dictionary size: ".blue().bold(),
                    self.dictionary.size().to_string().cyan().bold(),
                    " words".blue().bold()
                )?;
            }
            Command::Height => {
                writeln!(
                    self.output,
                    "{}{}",
                    "Tree height: ".blue().bold(),
                    self.dictionary.height().to_string().cyan().bold()
                )?;
            }
            Command::Help => self.print_help()?,
            Command::Exit => {
                writeln!(self.output, "{}", "Exiting...".blue().bold())?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn batch(&mut self, path: PathBuf, op: BulkOp) -> io::Result<()> {
        let verbs = match op {
            BulkOp::Insert => ("insert", "inserting", "inserted"),
            BulkOp::Delete => ("delete", "deleting", "deleted"),
        };
        let (_, doing, _) = verbs;
        writeln!(
            self.output,
            "{}{}",
            format!("Batch {doing} words from file: ").blue().bold(),
            path.display().to_string().cyan().bold()
        )?;

        match loader::apply_file(&mut self.dictionary, &path, op) {
            Ok(outcome) => self.report_batch(outcome, verbs),
            Err(err) => {
                warn!(error = %err, "batch command failed");
                writeln!(self.output, "{}", format!("Error: {err}").red().bold())
            }
        }
    }

    fn report_batch(&mut self, outcome: BatchOutcome, verbs: (&str, &str, &str)) -> io::Result<()> {
        let (verb, _, done) = verbs;
        write!(
            self.output,
            "{}{}{}",
            format!("✓ Successfully {done} ").green().bold(),
            outcome.succeeded.to_string().cyan().bold(),
            " words".green().bold()
        )?;
        if outcome.rejected > 0 {
            writeln!(
                self.output,
                "{}{}{}",
                format!(", failed to {verb} ").red().bold(),
                outcome.rejected.to_string().cyan().bold(),
                " words.".red().bold()
            )
        } else {
            writeln!(self.output, ".")
        }
    }

    fn report_word(&mut self, success: bool, before: &'static str, word: &str, after: &'static str) -> io::Result<()> {
        let (before, after) = if success {
            (before.green().bold(), after.green().bold())
        } else {
            (before.red().bold(), after.red().bold())
        };
        writeln!(self.output, "{}{}{}", before, word.to_string().cyan().bold(), after)
    }

    fn print_banner(&mut self) -> io::Result<()> {
        let banner = format!(
            "╔══════════════════════════════════════╗\n\
             ║  Self-Balancing Tree Dictionary      ║\n\
             ╚══════════════════════════════════════╝\n\
             Backed by the {} tree.",
            self.dictionary.strategy()
        );
        writeln!(self.output, "{}", banner.magenta().bold())
    }

    fn print_help(&mut self) -> io::Result<()> {
        const COMMANDS: [(&str, &str, &str); 9] = [
            ("insert", "<word>", "Insert a word into the dictionary"),
            ("delete", "<word>", "Delete a word from the dictionary"),
            ("search", "<word>", "Search for a word in the dictionary"),
            ("batch-insert", "<file>", "Insert words from file"),
            ("batch-delete", "<file>", "Delete words from file"),
            ("size", "", "Print the current dictionary size"),
            ("height", "", "Print the current height of the used tree"),
            ("help", "", "Print this help message"),
            ("exit", "", "Exit the program"),
        ];

        writeln!(self.output, "{}", "Available Commands:".magenta().bold())?;
        for (name, arg, about) in COMMANDS {
            let padding = " ".repeat(20usize.saturating_sub(name.len() + arg.len() + 1));
            writeln!(
                self.output,
                "  {} {}{} - {}",
                name.cyan().bold(),
                arg.cyan(),
                padding,
                about
            )?;
        }
        writeln!(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("insert apple"), Ok(Command::Insert("apple".into())));
        assert_eq!(Command::parse("  DELETE   apple pie "), Ok(Command::Delete("apple pie".into())));
        assert_eq!(Command::parse("Search\tpear"), Ok(Command::Search("pear".into())));
        assert_eq!(
            Command::parse("batch-insert words.txt"),
            Ok(Command::BatchInsert("words.txt".into()))
        );
        assert_eq!(Command::parse("size"), Ok(Command::Size));
        assert_eq!(Command::parse("height"), Ok(Command::Height));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
        assert_eq!(Command::parse("exit"), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("insert"),
            Err(ParseError::MissingArgument("a word to insert"))
        );
        assert_eq!(
            Command::parse("batch-delete  "),
            Err(ParseError::MissingArgument("a filename"))
        );
        assert_eq!(Command::parse("frobnicate x"), Err(ParseError::Unknown("frobnicate".into())));
    }
}

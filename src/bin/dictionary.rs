// Interactive word dictionary backed by an AVL or red-black tree

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use balanced_dict::shell::Shell;
use balanced_dict::{loader, BulkOp, Dictionary, Strategy};
use clap::Parser;
use crossterm::style::Stylize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dictionary", version, about = "Word dictionary on a self-balancing tree")]
struct Options {
    /// Tree type: "AVL" or "Red-Black". Prompted for when omitted.
    #[arg(short, long, env = "DICT_TREE")]
    tree: Option<Strategy>,

    /// Word list to batch-insert before the shell starts
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let options = Options::parse();

    let default_level = if options.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let strategy = match options.tree {
        Some(strategy) => strategy,
        None => match prompt_strategy(&mut input, &mut output)? {
            Some(strategy) => strategy,
            None => return Ok(()),
        },
    };
    writeln!(
        output,
        "{}{}{}",
        "Initializing ".blue().bold(),
        strategy.to_string().cyan().bold(),
        " Tree".blue().bold()
    )?;

    let mut dictionary = Dictionary::new(strategy);
    if let Some(path) = options.load.as_ref() {
        let outcome = loader::apply_file(&mut dictionary, path, BulkOp::Insert)
            .with_context(|| format!("failed to load {}", path.display()))?;
        info!(loaded = outcome.succeeded, duplicates = outcome.rejected, "initial word list loaded");
    }

    Shell::new(dictionary, input, output)
        .run()
        .context("shell I/O failed")
}

/// Asks for a tree type until a valid choice is made.
/// Returns `None` on end of input.
fn prompt_strategy<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Strategy>> {
    let mut line = String::new();
    loop {
        writeln!(output, "{}", "Select tree type:".blue().bold())?;
        writeln!(output, "{}", "1. AVL Tree".cyan().bold())?;
        writeln!(output, "{}", "2. Red-Black Tree".cyan().bold())?;
        write!(output, "{}", "Enter your choice (1 or 2): ".yellow().bold())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim() {
            "1" => return Ok(Some(Strategy::Avl)),
            "2" => return Ok(Some(Strategy::RedBlack)),
            choice => match choice.parse::<Strategy>() {
                Ok(strategy) => return Ok(Some(strategy)),
                Err(_) => writeln!(output, "{}", "Invalid choice. Please enter 1 or 2.".red().bold())?,
            },
        }
    }
}

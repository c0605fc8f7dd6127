//! Command-line driver: index a word list and query it.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use reduced_trie::{ingest, Config};

#[derive(Parser, Debug)]
#[command(name = "reduced-trie", version, about = "Index a word list and query it")]
struct Args {
    /// Whitespace-separated word list
    words: PathBuf,

    /// Verify the tree structure after every insert and delete
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every word in alphabetical order with its depth
    Alphabetical,
    /// Every word with its occurrence count, most frequent first
    Frequency,
    /// Positions at which a word occurs
    Search { word: String },
    /// Words starting with a prefix
    Complete { prefix: String },
    /// Delete words, then print the tree
    Delete {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print the tree
    Tree,
    /// Print the tree as a Graphviz digraph
    Dot,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let stdout = std::io::stdout();
    if let Err(e) = run(args, &mut stdout.lock()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args, out: &mut impl Write) -> anyhow::Result<()> {
    let config = Config {
        check_invariants: args.check,
        ..Config::default()
    };
    let (mut trie, stats) = ingest::load_words_with(&args.words, config)
        .with_context(|| format!("cannot index {}", args.words.display()))?;
    log::info!("{stats:?}");

    match args.command {
        Command::Alphabetical => {
            for (word, depth) in trie.alphabetical_order() {
                writeln!(out, "{depth}: {word}")?;
            }
        }
        Command::Frequency => {
            for (word, count) in trie.frequency_order() {
                writeln!(out, "{word}: {count}x")?;
            }
        }
        Command::Search { word } => {
            anyhow::ensure!(!word.is_empty(), "word must not be empty");
            match trie.search(&word) {
                Some(positions) => writeln!(out, "{word}: {positions}")?,
                None => writeln!(out, "{word}: not found")?,
            }
        }
        Command::Complete { prefix } => {
            for word in trie.autocomplete(&prefix) {
                writeln!(out, "{word}")?;
            }
        }
        Command::Delete { words } => {
            for word in &words {
                anyhow::ensure!(!word.is_empty(), "word must not be empty");
                match trie.delete(word) {
                    Some(positions) => log::info!("deleted {word} {positions}"),
                    None => log::warn!("{word} is not indexed"),
                }
            }
            write!(out, "{}", trie.pretty())?;
        }
        Command::Tree => write!(out, "{}", trie.pretty())?,
        Command::Dot => write!(out, "{}", trie.to_dot())?,
    }
    Ok(())
}

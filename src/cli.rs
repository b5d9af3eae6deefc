use crate::debug_log;
use crate::engine::{DEFAULT_SCORE, GuessOutcome, RoundState};
use crate::figure::figure_for;
use crate::game_state::{GameConfig, GameInterface, Prompt};
use crate::wordbank::{CustomWordStore, DEFAULT_CUSTOM_WORDS_PATH, WordBank};
use clap::Parser;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a CSV word bank (word,difficulty,hint). Uses the built-in bank when omitted
    #[arg(short = 'w', long = "words")]
    pub word_bank_path: Option<PathBuf>,

    /// Path to the custom word bank, created on first use
    #[arg(short = 'c', long = "custom-words", default_value = DEFAULT_CUSTOM_WORDS_PATH)]
    pub custom_words_path: PathBuf,

    /// Score each new game starts with
    #[arg(short = 's', long = "score", default_value_t = DEFAULT_SCORE, allow_negative_numbers = true)]
    pub initial_score: i32,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            word_bank: WordBank::from_path(self.word_bank_path.clone()),
            custom_words: CustomWordStore::new(self.custom_words_path.clone()),
            initial_score: self.initial_score,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const MENU: &str = "\
=========================
     HANGMAN MENU
=========================
(1) Play
(2) Play with Custom Words
(3) Add to Custom Words
(4) Exit
=========================";

/// Render guessed letters the way the classic game prints them: `A B C`.
#[must_use]
pub fn format_guessed_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// CLI implementation of the `GameInterface` trait.
///
/// Reads answers line by line from `reader` and writes everything to `writer`,
/// so tests can drive it with a `Cursor` and inspect the output.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn emit(&mut self, args: fmt::Arguments) {
        if let Err(e) = self.writer.write_fmt(args) {
            debug_log!("Failed to write output: {}", e);
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_line(&mut self, prompt: Prompt) -> Option<String> {
        self.emit(format_args!("{}", prompt.text()));
        if let Err(e) = self.writer.flush() {
            debug_log!("Failed to flush prompt: {}", e);
        }

        // Bytes first: a line that is not UTF-8 is a bad answer, not closed input.
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(&buf).trim().to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            }
        }
    }

    fn display_welcome(&mut self) {
        self.emit(format_args!("Welcome to Hangman!\n"));
    }

    fn display_menu(&mut self) {
        self.emit(format_args!("\n{MENU}\n"));
    }

    fn display_round(&mut self, round: &RoundState) {
        self.emit(format_args!(
            "{}\nGuessed letters:  {}\nCurrent word:  {}\nScore: {}\n\n",
            figure_for(round.attempts_remaining()),
            format_guessed_letters(round.guessed_letters()),
            round.pattern(),
            round.score()
        ));
    }

    fn display_outcome(&mut self, outcome: &GuessOutcome) {
        self.emit(format_args!("{outcome}\n"));
    }

    fn display_hint(&mut self, hint: &str) {
        self.emit(format_args!("Hint: {hint}\n"));
    }

    fn display_round_over(&mut self, round: &RoundState) {
        self.emit(format_args!("{}\n", round.summary()));
    }

    fn display_message(&mut self, message: &str) {
        self.emit(format_args!("{message}\n"));
    }
}

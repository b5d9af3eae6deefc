use crate::wordbank::Difficulty;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the word banks and the guess engine.
///
/// None of these are fatal during play: the session and menu loops report
/// them and carry on.
#[derive(Error, Debug)]
pub enum HangmanError {
    #[error("Error: {} file not found.", .0.display())]
    BackingStoreMissing(PathBuf),

    #[error("No {difficulty} words found in the {source_name}.")]
    NoWordsForDifficulty {
        difficulty: Difficulty,
        source_name: String,
    },

    #[error("Word cannot be empty.")]
    EmptyWord,

    #[error("Word '{0}' must contain letters only.")]
    NonAlphabeticWord(String),

    #[error("The round is already over.")]
    RoundFinished,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HangmanError>;

// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod figure;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{GuessEngine, GuessOutcome, RoundState, RoundStatus};
pub use error::{HangmanError, Result};
pub use game_state::{GameConfig, GameInterface, SessionOutcome, game_loop, play_session};
pub use wordbank::{CustomWordStore, Difficulty, WordBank, WordEntry, WordSource};

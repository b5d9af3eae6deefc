//! Round state and the guess state machine.
//!
//! A round starts `InProgress` and ends `Won` once every position of the
//! target word is revealed, or `Lost` once the attempts run out first.
//! Only new guesses change the state; repeats and malformed input leave it
//! untouched.

use crate::debug_log;
use crate::error::{HangmanError, Result};
use crate::wordbank::WordEntry;
use std::fmt;

pub const MAX_ATTEMPTS: u8 = 6;
pub const DEFAULT_SCORE: i32 = 100;
pub const SCORE_DELTA: i32 = 10;
pub const HINT_THRESHOLD: u32 = 3;
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    AlreadyGuessedLetter(char),
    AlreadyGuessedWord(String),
    CorrectLetter { letter: char, positions: Vec<usize> },
    IncorrectLetter(char),
    CorrectWord(String),
    IncorrectWord(String),
    InvalidInput,
}

impl GuessOutcome {
    /// Whether applying the guess changed the round.
    #[must_use]
    pub fn is_new_guess(&self) -> bool {
        !matches!(
            self,
            Self::AlreadyGuessedLetter(_) | Self::AlreadyGuessedWord(_) | Self::InvalidInput
        )
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyGuessedLetter(c) => write!(f, "You already guessed the letter {c}"),
            Self::AlreadyGuessedWord(w) => write!(f, "You already guessed the word {w}"),
            Self::CorrectLetter { letter, .. } => write!(f, "Good job, {letter} is in the word!"),
            Self::IncorrectLetter(c) => write!(f, "{c} is not in the word."),
            Self::CorrectWord(w) => write!(f, "{w} is the word!"),
            Self::IncorrectWord(w) => write!(f, "{w} is not the word."),
            Self::InvalidInput => write!(f, "Not a valid guess."),
        }
    }
}

/// Everything one round knows. Only `GuessEngine` mutates it.
#[derive(Debug, Clone)]
pub struct RoundState {
    target: WordEntry,
    revealed: Vec<char>,
    guessed_letters: Vec<char>,
    guessed_words: Vec<String>,
    attempts_remaining: u8,
    wrong_guess_count: u32,
    hint_offered: bool,
    hint_revealed: bool,
    score: i32,
    status: RoundStatus,
}

impl RoundState {
    fn new(target: WordEntry, initial_score: i32) -> Self {
        let revealed = vec![PLACEHOLDER; target.word.chars().count()];
        Self {
            target,
            revealed,
            guessed_letters: Vec::new(),
            guessed_words: Vec::new(),
            attempts_remaining: MAX_ATTEMPTS,
            wrong_guess_count: 0,
            hint_offered: false,
            hint_revealed: false,
            score: initial_score,
            status: RoundStatus::InProgress,
        }
    }

    #[must_use]
    pub fn target(&self) -> &WordEntry {
        &self.target
    }

    #[must_use]
    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    /// The revealed pattern as a string, e.g. `"_E__E_"`.
    #[must_use]
    pub fn pattern(&self) -> String {
        self.revealed.iter().collect()
    }

    /// Guessed letters in the order they were tried.
    #[must_use]
    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    #[must_use]
    pub fn guessed_words(&self) -> &[String] {
        &self.guessed_words
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn wrong_guess_count(&self) -> u32 {
        self.wrong_guess_count
    }

    #[must_use]
    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// End-of-round message with the final score.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.status {
            RoundStatus::Won => format!(
                "Congrats, you guessed the word! You win! Your score is: {}",
                self.score
            ),
            RoundStatus::Lost => format!(
                "Sorry, you ran out of attempts. The word was {}. Maybe next time! Your score is: {}",
                self.target.word, self.score
            ),
            RoundStatus::InProgress => format!("Round in progress. Your score is: {}", self.score),
        }
    }
}

enum GuessKind {
    Letter(char),
    Word(String),
}

/// Drives a single round, one guess at a time.
#[derive(Debug, Clone)]
pub struct GuessEngine {
    state: RoundState,
}

impl GuessEngine {
    #[must_use]
    pub fn new(target: WordEntry, initial_score: i32) -> Self {
        debug_log!(
            "New round: {} letters, {}, score {}",
            target.word.len(),
            target.difficulty,
            initial_score
        );
        Self {
            state: RoundState::new(target, initial_score),
        }
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    #[must_use]
    pub fn into_state(self) -> RoundState {
        self.state
    }

    /// True exactly while the hint may be offered: three wrong guesses have
    /// been made and no offer has been made yet this round.
    #[must_use]
    pub fn hint_available(&self) -> bool {
        self.state.status == RoundStatus::InProgress
            && self.state.wrong_guess_count >= HINT_THRESHOLD
            && !self.state.hint_offered
    }

    /// Consume the one hint offer. Returns the hint when the player accepted.
    pub fn resolve_hint_offer(&mut self, accepted: bool) -> Option<&str> {
        if !self.hint_available() {
            return None;
        }
        self.state.hint_offered = true;
        if accepted {
            self.state.hint_revealed = true;
            Some(self.state.target.hint.as_str())
        } else {
            None
        }
    }

    fn classify(&self, guess: &str) -> Option<GuessKind> {
        if !guess.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let len = guess.chars().count();
        if len == 1 {
            guess.chars().next().map(GuessKind::Letter)
        } else if len == self.state.revealed.len() {
            Some(GuessKind::Word(guess.to_string()))
        } else {
            None
        }
    }

    /// Apply one raw guess.
    ///
    /// # Errors
    /// Returns `RoundFinished` if the round is already won or lost.
    pub fn apply(&mut self, raw_guess: &str) -> Result<GuessOutcome> {
        if self.state.status != RoundStatus::InProgress {
            return Err(HangmanError::RoundFinished);
        }
        let guess = raw_guess.trim().to_uppercase();

        let outcome = match self.classify(&guess) {
            Some(GuessKind::Letter(letter)) => self.apply_letter(letter),
            Some(GuessKind::Word(word)) => self.apply_word(word),
            None => GuessOutcome::InvalidInput,
        };

        if self.state.attempts_remaining == 0 && self.state.status != RoundStatus::Won {
            self.state.status = RoundStatus::Lost;
        }
        debug_log!(
            "Guess {:?} -> {:?} (pattern {}, attempts {}, score {})",
            guess,
            outcome,
            self.state.pattern(),
            self.state.attempts_remaining,
            self.state.score
        );
        Ok(outcome)
    }

    fn apply_letter(&mut self, letter: char) -> GuessOutcome {
        if self.state.guessed_letters.contains(&letter) {
            return GuessOutcome::AlreadyGuessedLetter(letter);
        }
        self.state.guessed_letters.push(letter);

        let positions: Vec<usize> = self
            .state
            .target
            .word
            .chars()
            .enumerate()
            .filter_map(|(i, c)| (c == letter).then_some(i))
            .collect();

        if positions.is_empty() {
            self.record_miss();
            return GuessOutcome::IncorrectLetter(letter);
        }

        for &i in &positions {
            self.state.revealed[i] = letter;
        }
        self.state.score += SCORE_DELTA;
        if !self.state.revealed.contains(&PLACEHOLDER) {
            self.state.status = RoundStatus::Won;
        }
        GuessOutcome::CorrectLetter { letter, positions }
    }

    fn apply_word(&mut self, word: String) -> GuessOutcome {
        if self.state.guessed_words.contains(&word) {
            return GuessOutcome::AlreadyGuessedWord(word);
        }
        self.state.guessed_words.push(word.clone());

        if word != self.state.target.word {
            self.record_miss();
            return GuessOutcome::IncorrectWord(word);
        }

        self.state.revealed = self.state.target.word.chars().collect();
        self.state.score += SCORE_DELTA;
        self.state.status = RoundStatus::Won;
        GuessOutcome::CorrectWord(word)
    }

    fn record_miss(&mut self) {
        self.state.attempts_remaining = self.state.attempts_remaining.saturating_sub(1);
        self.state.wrong_guess_count += 1;
        self.state.score -= SCORE_DELTA;
    }
}

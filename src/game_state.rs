use crate::engine::{DEFAULT_SCORE, GuessEngine, GuessOutcome, RoundState, RoundStatus};
use crate::wordbank::{CustomWordStore, Difficulty, WordBank, WordEntry, WordSource};
use crate::{debug_log, info_log};
use rand::Rng;

/// Every line of input the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    MenuChoice,
    Difficulty,
    Hint,
    Guess,
    PlayAgain,
    NewWord,
    NewWordHint,
}

impl Prompt {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::MenuChoice => "Enter your choice (1-4): ",
            Self::Difficulty => "Select difficulty level: Easy (E), Medium (M), Hard (H): ",
            Self::Hint => "Would you like a hint? (Y/N): ",
            Self::Guess => "Please guess a letter or word: ",
            Self::PlayAgain => "Play Again? (Y/N) ",
            Self::NewWord => "Enter the word: ",
            Self::NewWordHint => "Enter a hint for the word: ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    PlayCustom,
    AddWord,
    Exit,
}

impl MenuChoice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Play),
            "2" => Some(Self::PlayCustom),
            "3" => Some(Self::AddWord),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// How a session handed control back to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// At least one round was played and the player declined a replay.
    Finished,
    /// No word could be selected; no round was started.
    NoWordsAvailable,
    /// Input was closed mid-session.
    Quit,
}

impl SessionOutcome {
    #[must_use]
    pub fn succeeded(self) -> bool {
        self == Self::Finished
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub word_bank: WordBank,
    pub custom_words: CustomWordStore,
    pub initial_score: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_bank: WordBank::Embedded,
            custom_words: CustomWordStore::default(),
            initial_score: DEFAULT_SCORE,
        }
    }
}

/// Trait for game UI implementations.
///
/// The game logic only ever talks to the player through this trait, so the
/// same loop drives both the line-oriented CLI and the full-screen TUI.
pub trait GameInterface {
    /// Ask for one line of input. `None` means input is closed and the game should end.
    fn read_line(&mut self, prompt: Prompt) -> Option<String>;

    fn display_welcome(&mut self);

    fn display_menu(&mut self);

    /// Show the gallows for the remaining attempts, the guessed letters and the pattern.
    fn display_round(&mut self, round: &RoundState);

    fn display_outcome(&mut self, outcome: &GuessOutcome);

    fn display_hint(&mut self, hint: &str);

    fn display_round_over(&mut self, round: &RoundState);

    fn display_message(&mut self, message: &str);
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("Y")
}

/// Prompt until a valid difficulty is entered.
fn read_difficulty<I: GameInterface + ?Sized>(interface: &mut I) -> Option<Difficulty> {
    loop {
        let input = interface.read_line(Prompt::Difficulty)?;
        match Difficulty::from_choice(&input) {
            Some(difficulty) => return Some(difficulty),
            None => interface.display_message("Invalid choice."),
        }
    }
}

/// Play one round to completion. Returns `None` if input closed mid-round.
pub fn play_round<I: GameInterface + ?Sized>(
    interface: &mut I,
    target: WordEntry,
    score: i32,
) -> Option<RoundState> {
    let mut engine = GuessEngine::new(target, score);
    interface.display_round(engine.state());

    while engine.status() == RoundStatus::InProgress {
        if engine.hint_available() {
            let accepted = is_yes(&interface.read_line(Prompt::Hint)?);
            if let Some(hint) = engine.resolve_hint_offer(accepted) {
                interface.display_hint(hint);
            }
        }

        let guess = interface.read_line(Prompt::Guess)?;
        let outcome = match engine.apply(&guess) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug_log!("Guess rejected: {}", e);
                break;
            }
        };
        interface.display_outcome(&outcome);
        interface.display_round(engine.state());
    }

    let round = engine.into_state();
    info_log!(
        "Round over: {:?}, word {}, score {}",
        round.status(),
        round.target().word,
        round.score()
    );
    interface.display_round_over(&round);
    Some(round)
}

/// Play rounds from `source` until the player declines a replay.
///
/// The score carries from round to round within one session; every session
/// starts again at `initial_score`. Each replay asks for the difficulty again.
pub fn play_session<I, S, R>(
    interface: &mut I,
    source: &S,
    initial_score: i32,
    rng: &mut R,
) -> SessionOutcome
where
    I: GameInterface + ?Sized,
    S: WordSource,
    R: Rng + ?Sized,
{
    let mut score = initial_score;
    loop {
        let Some(difficulty) = read_difficulty(interface) else {
            return SessionOutcome::Quit;
        };

        if let Err(e) = source.check_store() {
            interface.display_message(&e.to_string());
        }

        let target = match source.select_by_difficulty(difficulty, rng) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("No word selected from {}: {}", source.name(), e);
                interface.display_message(&e.to_string());
                return SessionOutcome::NoWordsAvailable;
            }
        };

        let Some(round) = play_round(interface, target, score) else {
            return SessionOutcome::Quit;
        };
        score = round.score();

        match interface.read_line(Prompt::PlayAgain) {
            Some(answer) if is_yes(&answer) => {}
            Some(_) => return SessionOutcome::Finished,
            None => return SessionOutcome::Quit,
        }
    }
}

/// Ask for a new word, difficulty and hint, then append it to `store`.
/// Returns `None` if input closed, otherwise whether a word was added.
pub fn add_custom_word<I: GameInterface + ?Sized>(
    interface: &mut I,
    store: &CustomWordStore,
) -> Option<bool> {
    let word = interface.read_line(Prompt::NewWord)?;
    let word = word.trim();
    if word.is_empty() {
        interface.display_message("Word cannot be empty.");
        return Some(false);
    }

    let difficulty = read_difficulty(interface)?;
    let hint = interface.read_line(Prompt::NewWordHint)?;

    match store.append(word, difficulty, &hint) {
        Ok(_) => {
            interface.display_message(&format!("Word '{word}' added successfully!"));
            Some(true)
        }
        Err(e) => {
            log::warn!("Could not add custom word: {e}");
            interface.display_message(&e.to_string());
            Some(false)
        }
    }
}

/// Main menu loop. Runs until the player exits or input closes.
pub fn game_loop<I, R>(interface: &mut I, config: &GameConfig, rng: &mut R)
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    interface.display_welcome();

    loop {
        interface.display_menu();
        let Some(input) = interface.read_line(Prompt::MenuChoice) else {
            info_log!("Input closed at the menu");
            break;
        };

        let choice = MenuChoice::parse(&input);
        debug_log!("Menu choice {:?} from {:?}", choice, input);
        match choice {
            Some(MenuChoice::Play) => {
                if play_session(interface, &config.word_bank, config.initial_score, rng)
                    == SessionOutcome::Quit
                {
                    break;
                }
            }
            Some(MenuChoice::PlayCustom) => {
                let outcome =
                    play_session(interface, &config.custom_words, config.initial_score, rng);
                if outcome == SessionOutcome::Quit {
                    break;
                }
                if !outcome.succeeded() {
                    interface.display_message("Returning to menu...");
                }
            }
            Some(MenuChoice::AddWord) => {
                if add_custom_word(interface, &config.custom_words).is_none() {
                    break;
                }
            }
            Some(MenuChoice::Exit) => {
                interface.display_message("Thank you for playing Hangman! Goodbye!");
                break;
            }
            None => {
                interface.display_message("Invalid choice. Please enter a number from 1 to 4.");
            }
        }
    }
}

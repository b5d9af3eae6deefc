// Integration tests for the hangman application
// These tests drive the whole game through the CLI interface with scripted input

use hangman::cli::CliInterface;
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn run(input: &str, config: &GameConfig) -> String {
    run_bytes(input.as_bytes(), config)
}

fn run_bytes(input: &[u8], config: &GameConfig) -> String {
    let mut interface = CliInterface::new(Cursor::new(input), Vec::new());
    let mut rng = StdRng::seed_from_u64(1);
    game_loop(&mut interface, config, &mut rng);
    String::from_utf8(interface.into_writer()).unwrap()
}

fn config_with_custom(dir: &TempDir, custom: &str) -> GameConfig {
    let path = dir.path().join("custom_words.csv");
    fs::write(&path, custom).unwrap();
    GameConfig {
        custom_words: CustomWordStore::new(path),
        ..GameConfig::default()
    }
}

#[test]
fn test_full_game_win_with_custom_words() {
    let dir = TempDir::new().unwrap();
    let config = config_with_custom(&dir, "CAT,EASY,A feline\n");

    let out = run("2\nE\nD\nC\nA\nT\nN\n4\n", &config);

    assert!(out.starts_with("Welcome to Hangman!"));
    assert!(out.contains("D is not in the word."));
    assert!(out.contains("Current word:  C__"));
    assert!(out.contains("Current word:  CA_"));
    assert!(out.contains("Congrats, you guessed the word! You win! Your score is: 120"));
    assert!(out.contains("Thank you for playing Hangman! Goodbye!"));
}

#[test]
fn test_full_game_loss_reveals_word() {
    let dir = TempDir::new().unwrap();
    let config = config_with_custom(&dir, "CAT,EASY,A feline\n");

    let out = run("2\nE\nB\nD\nE\nY\nF\nG\nH\nN\n4\n", &config);

    assert!(out.contains("Would you like a hint? (Y/N): "));
    assert!(out.contains("Hint: A feline"));
    assert_eq!(out.matches("Would you like a hint?").count(), 1);
    assert!(out.contains(
        "Sorry, you ran out of attempts. The word was CAT. Maybe next time! Your score is: 40"
    ));
    assert!(out.contains(hangman::figure::STAGES[0]));
}

#[test]
fn test_add_word_then_play_it() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig {
        custom_words: CustomWordStore::new(dir.path().join("custom_words.csv")),
        ..GameConfig::default()
    };

    let out = run(
        "3\nferris\nh\nThe Rust mascot, a crab\n2\nH\nFERRIS\nN\n4\n",
        &config,
    );

    assert!(out.contains("Word 'ferris' added successfully!"));
    assert!(out.contains("Your score is: 110"));

    let stored = fs::read_to_string(config.custom_words.path()).unwrap();
    assert_eq!(stored, "ferris,HARD,\"The Rust mascot, a crab\"\n");
}

#[test]
fn test_empty_custom_word_rejected() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig {
        custom_words: CustomWordStore::new(dir.path().join("custom_words.csv")),
        ..GameConfig::default()
    };

    let out = run("3\n   \n4\n", &config);

    assert!(out.contains("Word cannot be empty."));
    assert!(!config.custom_words.path().exists());
}

#[test]
fn test_missing_custom_store_is_created_and_reports_no_words() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom_words.csv");
    let config = GameConfig {
        custom_words: CustomWordStore::new(&path),
        ..GameConfig::default()
    };

    let out = run("2\nH\n4\n", &config);

    assert!(path.exists());
    assert!(out.contains("No HARD words found in the custom words list."));
    assert!(out.contains("Returning to menu..."));
    assert!(!out.contains("Please guess a letter or word"));
}

#[test]
fn test_missing_default_bank_reports_and_returns() {
    let dir = TempDir::new().unwrap();
    let config = GameConfig {
        word_bank: WordBank::File(dir.path().join("words.csv")),
        ..GameConfig::default()
    };

    let out = run("1\nE\n4\n", &config);

    assert!(out.contains("file not found."));
    assert!(out.contains("No EASY words found in the default word list."));
    assert!(!out.contains("Returning to menu..."));
    assert!(out.contains("Thank you for playing Hangman! Goodbye!"));
}

#[test]
fn test_garbled_guess_line_does_not_end_game() {
    let dir = TempDir::new().unwrap();
    let config = config_with_custom(&dir, "CAT,EASY,A feline\n");

    let mut input = b"2\nE\n".to_vec();
    input.extend_from_slice(&[0xff, 0xfe, b'\n']);
    input.extend_from_slice(b"C\nA\nT\nN\n4\n");
    let out = run_bytes(&input, &config);

    assert!(out.contains("Not a valid guess."));
    assert!(out.contains("Congrats, you guessed the word! You win! Your score is: 130"));
    assert!(out.contains("Thank you for playing Hangman! Goodbye!"));
}

#[test]
fn test_replay_keeps_score_within_session() {
    let dir = TempDir::new().unwrap();
    let config = config_with_custom(&dir, "CAT,EASY,A feline\nOWL,HARD,Hoots\n");

    let out = run("2\nE\nCAT\nY\nH\nOWL\nN\n4\n", &config);

    assert!(out.contains("Your score is: 110"));
    assert!(out.contains("Your score is: 120"));
    assert_eq!(out.matches("Select difficulty level").count(), 2);
}

#[test]
fn test_invalid_menu_choice_reprompts() {
    let out = run("0\nplay\n4\n", &GameConfig::default());

    assert_eq!(
        out.matches("Invalid choice. Please enter a number from 1 to 4.")
            .count(),
        2
    );
    assert_eq!(out.matches("Enter your choice (1-4): ").count(), 3);
}

#[test]
fn test_closed_input_ends_game() {
    let out = run("1\n", &GameConfig::default());

    assert!(!out.contains("Goodbye"));
}

#[test]
fn test_default_bank_round_is_playable() {
    let words = WordBank::Embedded.load().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let target = WordBank::Embedded
        .select_by_difficulty(Difficulty::Medium, &mut rng)
        .unwrap();
    assert!(words.contains(&target));

    let mut engine = GuessEngine::new(target.clone(), 100);
    for c in target.word.chars() {
        if engine.status() != RoundStatus::InProgress {
            break;
        }
        engine.apply(&c.to_string()).unwrap();
    }
    assert_eq!(engine.status(), RoundStatus::Won);
    assert_eq!(engine.state().pattern(), target.word);
}

use crate::error::{HangmanError, Result};
use crate::debug_log;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.csv");

pub const DEFAULT_CUSTOM_WORDS_PATH: &str = "custom_words.csv";

const FIELD_DELIMITER: char = ',';
const QUOTE: char = '"';
const REQUIRED_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The token stored in the word bank.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Parse a prompt answer (`E`, `M` or `H`, any case).
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim().to_uppercase().as_str() {
            "E" => Some(Self::Easy),
            "M" => Some(Self::Medium),
            "H" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored tokens are matched case-sensitively.
impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub difficulty: Difficulty,
    pub hint: String,
}

impl WordEntry {
    /// Build an entry from raw fields, uppercasing the word.
    ///
    /// # Errors
    /// Returns `EmptyWord` or `NonAlphabeticWord` when the trimmed word is unusable.
    pub fn new(word: &str, difficulty: Difficulty, hint: &str) -> Result<Self> {
        let word = word.trim();
        if word.is_empty() {
            return Err(HangmanError::EmptyWord);
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(HangmanError::NonAlphabeticWord(word.to_string()));
        }
        Ok(Self {
            word: word.to_uppercase(),
            difficulty,
            hint: hint.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    MissingFields(usize),
    EmptyWord,
    NonAlphabeticWord(String),
    UnknownDifficulty(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "blank line"),
            Self::MissingFields(n) => write!(f, "expected {REQUIRED_FIELDS} fields, found {n}"),
            Self::EmptyWord => write!(f, "empty word"),
            Self::NonAlphabeticWord(w) => write!(f, "word '{w}' is not alphabetic"),
            Self::UnknownDifficulty(d) => write!(f, "unknown difficulty '{d}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedRecord {
    Word(WordEntry),
    Skipped(SkipReason),
}

/// Split one CSV line into trimmed fields. Quoted fields may contain commas,
/// and a doubled quote inside them is a literal quote.
#[must_use]
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            FIELD_DELIMITER if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Join fields into a CSV line, quoting only where needed.
#[must_use]
pub fn format_record(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| {
            if field.contains([FIELD_DELIMITER, QUOTE, '\n', '\r']) {
                format!("{QUOTE}{}{QUOTE}", field.replace(QUOTE, "\"\""))
            } else {
                (*field).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[must_use]
pub fn parse_record(line: &str) -> ParsedRecord {
    if line.trim().is_empty() {
        return ParsedRecord::Skipped(SkipReason::Blank);
    }
    let fields = split_fields(line);
    if fields.len() < REQUIRED_FIELDS {
        return ParsedRecord::Skipped(SkipReason::MissingFields(fields.len()));
    }
    let Ok(difficulty) = fields[1].parse::<Difficulty>() else {
        return ParsedRecord::Skipped(SkipReason::UnknownDifficulty(fields[1].clone()));
    };
    match WordEntry::new(&fields[0], difficulty, &fields[2]) {
        Ok(entry) => ParsedRecord::Word(entry),
        Err(HangmanError::NonAlphabeticWord(word)) => {
            ParsedRecord::Skipped(SkipReason::NonAlphabeticWord(word))
        }
        Err(_) => ParsedRecord::Skipped(SkipReason::EmptyWord),
    }
}

#[must_use]
pub fn load_wordbank_from_str(data: &str) -> Vec<WordEntry> {
    data.lines()
        .enumerate()
        .filter_map(|(i, line)| match parse_record(line) {
            ParsedRecord::Word(entry) => Some(entry),
            ParsedRecord::Skipped(SkipReason::Blank) => None,
            ParsedRecord::Skipped(reason) => {
                debug_log!("Skipping word bank line {}: {}", i + 1, reason);
                None
            }
        })
        .collect()
}

/// Read and parse a CSV word bank file.
///
/// # Errors
/// Returns the underlying I/O error, including `NotFound` for a missing file.
pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<WordEntry>> {
    let data = fs::read_to_string(path)?;
    Ok(load_wordbank_from_str(&data))
}

/// A store of word records that can hand out a random word of a given difficulty.
pub trait WordSource {
    /// Human-readable name used in messages.
    fn name(&self) -> &str;

    /// Read every well-formed record from the backing store.
    ///
    /// A missing or unreadable store yields an empty list; `check_store`
    /// is where a missing store gets reported.
    ///
    /// # Errors
    /// Left to implementors. `WordBank` and `CustomWordStore` never fail here.
    fn load(&self) -> Result<Vec<WordEntry>>;

    /// Report a backing store that should exist but does not.
    ///
    /// # Errors
    /// `BackingStoreMissing` with the path that was looked for.
    fn check_store(&self) -> Result<()> {
        Ok(())
    }

    /// Pick one entry of exactly `difficulty`, uniformly at random.
    ///
    /// # Errors
    /// `NoWordsForDifficulty` when nothing matches, or whatever `load` reports.
    fn select_by_difficulty<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<WordEntry> {
        let words = self.load()?;
        let matching: Vec<&WordEntry> = words
            .iter()
            .filter(|entry| entry.difficulty == difficulty)
            .collect();
        debug_log!(
            "{}: {} of {} words are {}",
            self.name(),
            matching.len(),
            words.len(),
            difficulty
        );
        matching
            .choose(rng)
            .map(|entry| (*entry).clone())
            .ok_or_else(|| HangmanError::NoWordsForDifficulty {
                difficulty,
                source_name: self.name().to_string(),
            })
    }
}

/// The read-only default word bank.
#[derive(Debug, Clone)]
pub enum WordBank {
    Embedded,
    File(PathBuf),
}

impl WordBank {
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Embedded, Self::File)
    }
}

impl WordSource for WordBank {
    fn name(&self) -> &str {
        "default word list"
    }

    fn load(&self) -> Result<Vec<WordEntry>> {
        match self {
            Self::Embedded => Ok(load_wordbank_from_str(EMBEDDED_WORDBANK)),
            Self::File(path) => match load_wordbank_from_file(path) {
                Ok(words) => Ok(words),
                Err(e) => {
                    log::warn!("Failed to read word bank {}: {}", path.display(), e);
                    Ok(Vec::new())
                }
            },
        }
    }

    fn check_store(&self) -> Result<()> {
        match self {
            Self::File(path) if !path.exists() => {
                log::warn!("Word bank {} not found", path.display());
                Err(HangmanError::BackingStoreMissing(path.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// The user-extensible word bank. Created empty on first read.
#[derive(Debug, Clone)]
pub struct CustomWordStore {
    path: PathBuf,
}

impl CustomWordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate and append one entry, opening and closing the file per call.
    ///
    /// # Errors
    /// `EmptyWord`/`NonAlphabeticWord` for a bad word (nothing is written),
    /// or `Io` if the file cannot be written.
    pub fn append(&self, word: &str, difficulty: Difficulty, hint: &str) -> Result<WordEntry> {
        let entry = WordEntry::new(word, difficulty, hint)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{}",
            format_record(&[word.trim(), difficulty.as_str(), hint.trim()])
        )?;
        log::info!(
            "Added custom word {} ({}) to {}",
            entry.word,
            difficulty,
            self.path.display()
        );
        Ok(entry)
    }
}

impl Default for CustomWordStore {
    fn default() -> Self {
        Self::new(DEFAULT_CUSTOM_WORDS_PATH)
    }
}

impl WordSource for CustomWordStore {
    fn name(&self) -> &str {
        "custom words list"
    }

    fn load(&self) -> Result<Vec<WordEntry>> {
        match load_wordbank_from_file(&self.path) {
            Ok(words) => Ok(words),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "No custom words file at {}, creating an empty one",
                    self.path.display()
                );
                if let Err(e) = fs::File::create(&self.path) {
                    log::warn!("Could not create {}: {}", self.path.display(), e);
                }
                Ok(Vec::new())
            }
            Err(e) => {
                log::warn!("Failed to read custom words {}: {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_difficulty_tokens_are_case_sensitive() {
        assert_eq!("EASY".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("easy".parse::<Difficulty>().is_err());
        assert!("Medium".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_from_choice() {
        assert_eq!(Difficulty::from_choice("e"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_choice(" M "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_choice("H"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_choice("X"), None);
        assert_eq!(Difficulty::from_choice(""), None);
        assert_eq!(Difficulty::from_choice("EASY"), None);
    }

    #[test]
    fn test_parse_record_valid() {
        let parsed = parse_record("cat,EASY,A feline");
        assert_eq!(
            parsed,
            ParsedRecord::Word(WordEntry {
                word: "CAT".to_string(),
                difficulty: Difficulty::Easy,
                hint: "A feline".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_record_quoted_hint_with_comma() {
        match parse_record(r#"banana,MEDIUM,"Yellow, curved, ""tasty"" fruit""#) {
            ParsedRecord::Word(entry) => {
                assert_eq!(entry.word, "BANANA");
                assert_eq!(entry.hint, r#"Yellow, curved, "tasty" fruit"#);
            }
            ParsedRecord::Skipped(reason) => panic!("Unexpected skip: {reason}"),
        }
    }

    #[test]
    fn test_parse_record_extra_fields_ignored() {
        assert!(matches!(
            parse_record("DOG,EASY,Barks,extra"),
            ParsedRecord::Word(_)
        ));
    }

    #[test]
    fn test_parse_record_skips_malformed() {
        assert_eq!(parse_record(""), ParsedRecord::Skipped(SkipReason::Blank));
        assert_eq!(
            parse_record("CAT,EASY"),
            ParsedRecord::Skipped(SkipReason::MissingFields(2))
        );
        assert_eq!(
            parse_record("word,difficulty,hint"),
            ParsedRecord::Skipped(SkipReason::UnknownDifficulty("difficulty".to_string()))
        );
        assert_eq!(
            parse_record("CAT,easy,lowercase"),
            ParsedRecord::Skipped(SkipReason::UnknownDifficulty("easy".to_string()))
        );
        assert_eq!(
            parse_record(" ,HARD,nothing"),
            ParsedRecord::Skipped(SkipReason::EmptyWord)
        );
        assert_eq!(
            parse_record("ice cream,HARD,cold"),
            ParsedRecord::Skipped(SkipReason::NonAlphabeticWord("ice cream".to_string()))
        );
    }

    #[test]
    fn test_format_record_quotes_when_needed() {
        assert_eq!(format_record(&["CAT", "EASY", "A feline"]), "CAT,EASY,A feline");
        assert_eq!(
            format_record(&["CAT", "EASY", "Meows, purrs"]),
            "CAT,EASY,\"Meows, purrs\""
        );
        assert_eq!(
            split_fields(&format_record(&["OWL", "HARD", "Says \"hoo\", at night"])),
            vec!["OWL", "HARD", "Says \"hoo\", at night"]
        );
    }

    #[test]
    fn test_load_wordbank_from_str_skips_bad_rows() {
        let data = "word,difficulty,hint\nCAT,EASY,A feline\n\nBROKEN\nDOG,EASY,Barks\n";
        let words = load_wordbank_from_str(data);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "CAT");
        assert_eq!(words[1].word, "DOG");
    }

    #[test]
    fn test_embedded_wordbank_covers_every_difficulty() {
        let words = WordBank::Embedded.load().unwrap();
        for difficulty in Difficulty::ALL {
            assert!(
                words.iter().any(|w| w.difficulty == difficulty),
                "no {difficulty} words embedded"
            );
        }
        assert!(words.iter().all(|w| w.word.chars().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_select_by_difficulty_filters_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.csv");
        fs::write(&path, "CAT,EASY,A feline\nPYTHON,HARD,A snake\n").unwrap();
        let bank = WordBank::File(path);

        let mut rng = rng();
        for _ in 0..10 {
            let entry = bank.select_by_difficulty(Difficulty::Hard, &mut rng).unwrap();
            assert_eq!(entry.word, "PYTHON");
        }
        assert!(matches!(
            bank.select_by_difficulty(Difficulty::Medium, &mut rng),
            Err(HangmanError::NoWordsForDifficulty {
                difficulty: Difficulty::Medium,
                ..
            })
        ));
    }

    #[test]
    fn test_select_by_difficulty_reaches_every_match() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.csv");
        fs::write(&path, "CAT,EASY,a\nDOG,EASY,b\nCOW,EASY,c\n").unwrap();
        let bank = WordBank::File(path);

        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(bank.select_by_difficulty(Difficulty::Easy, &mut rng).unwrap().word);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_missing_default_bank_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");
        let bank = WordBank::File(path.clone());

        match bank.check_store() {
            Err(HangmanError::BackingStoreMissing(p)) => assert_eq!(p, path),
            other => panic!("Expected BackingStoreMissing, got {other:?}"),
        }
        assert!(bank.load().unwrap().is_empty());
        assert!(matches!(
            bank.select_by_difficulty(Difficulty::Easy, &mut rng()),
            Err(HangmanError::NoWordsForDifficulty { difficulty: Difficulty::Easy, .. })
        ));
        assert!(!path.exists());
        assert!(WordBank::Embedded.check_store().is_ok());
    }

    #[test]
    fn test_custom_store_created_on_first_read() {
        let dir = TempDir::new().unwrap();
        let store = CustomWordStore::new(dir.path().join("custom_words.csv"));
        assert!(!store.path().exists());

        assert!(store.load().unwrap().is_empty());
        assert!(store.path().exists());
    }

    #[test]
    fn test_empty_custom_store_has_no_hard_words() {
        let dir = TempDir::new().unwrap();
        let store = CustomWordStore::new(dir.path().join("custom_words.csv"));

        let result = store.select_by_difficulty(Difficulty::Hard, &mut rng());
        assert!(matches!(
            result,
            Err(HangmanError::NoWordsForDifficulty { .. })
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No HARD words found in the custom words list."
        );
    }

    #[test]
    fn test_append_then_select() {
        let dir = TempDir::new().unwrap();
        let store = CustomWordStore::new(dir.path().join("custom_words.csv"));

        let entry = store
            .append("  rustacean ", Difficulty::Hard, "Crab, but for code")
            .unwrap();
        assert_eq!(entry.word, "RUSTACEAN");

        let selected = store.select_by_difficulty(Difficulty::Hard, &mut rng()).unwrap();
        assert_eq!(selected.word, "RUSTACEAN");
        assert_eq!(selected.hint, "Crab, but for code");
    }

    #[test]
    fn test_append_rejects_empty_word() {
        let dir = TempDir::new().unwrap();
        let store = CustomWordStore::new(dir.path().join("custom_words.csv"));

        assert!(matches!(
            store.append("   ", Difficulty::Easy, "nothing"),
            Err(HangmanError::EmptyWord)
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_append_rejects_non_alphabetic_word() {
        let dir = TempDir::new().unwrap();
        let store = CustomWordStore::new(dir.path().join("custom_words.csv"));

        assert!(matches!(
            store.append("r2d2", Difficulty::Easy, "droid"),
            Err(HangmanError::NonAlphabeticWord(_))
        ));
        assert!(store.load().unwrap().is_empty());
    }
}

use crate::results::*;
use log::debug;
use log::warn;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// Column holding a word's level in a tab-separated dictionary row.
const LEVEL_COLUMN: usize = 1;
/// Column holding a word's prior in a tab-separated dictionary row.
const PRIOR_COLUMN: usize = 8;

/// A single dictionary word, along with its most recent score.
///
/// Entries are compared and hashed by their letters only. Deserialized entries are checked the
/// same way as [`WordEntry::with_metadata`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawWordEntry"))]
pub struct WordEntry {
    word: Arc<str>,
    score: u32,
    level: Option<u32>,
    prior: Option<u32>,
}

impl WordEntry {
    /// Creates an entry for the given word without any dictionary metadata.
    ///
    /// The word is converted to lower case, and must only contain the letters `a` through `z`.
    pub fn new(word: &str) -> Result<WordEntry, WordleError> {
        WordEntry::with_metadata(word, None, None)
    }

    /// Creates an entry with the dictionary's commonness `level` (`0` is the most common) and
    /// `prior`.
    pub fn with_metadata(
        word: &str,
        level: Option<u32>,
        prior: Option<u32>,
    ) -> Result<WordEntry, WordleError> {
        Ok(WordEntry {
            word: Arc::from(normalize_word(word)?),
            score: 0,
            level,
            prior,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.word.as_bytes()
    }

    /// The number of letters in this word.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// The score from the most recent scoring pass, or zero if this entry has not been scored.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn level(&self) -> Option<u32> {
        self.level
    }

    pub fn prior(&self) -> Option<u32> {
        self.prior
    }

    /// Whether this is a common word. Words without a level are treated as common.
    pub fn is_common(&self) -> bool {
        self.level.map_or(true, |level| level == 0)
    }

    /// Returns the number of times `letter` appears in this word.
    pub fn count_letter(&self, letter: char) -> usize {
        self.word
            .chars()
            .filter(|other_letter| *other_letter == letter)
            .count()
    }
}

/// An entry as written by a serializer, before its word has been checked.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawWordEntry {
    word: String,
    #[serde(default)]
    score: u32,
    #[serde(default)]
    level: Option<u32>,
    #[serde(default)]
    prior: Option<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWordEntry> for WordEntry {
    type Error = WordleError;

    fn try_from(raw: RawWordEntry) -> Result<Self, Self::Error> {
        let mut entry = WordEntry::with_metadata(&raw.word, raw.level, raw.prior)?;
        entry.set_score(raw.score);
        Ok(entry)
    }
}

impl PartialEq for WordEntry {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordEntry {}

impl PartialEq<str> for WordEntry {
    fn eq(&self, other: &str) -> bool {
        self.word.as_ref() == other
    }
}

impl PartialEq<&str> for WordEntry {
    fn eq(&self, other: &&str) -> bool {
        self.word.as_ref() == *other
    }
}

impl Hash for WordEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl Borrow<str> for WordEntry {
    fn borrow(&self) -> &str {
        &self.word
    }
}

impl fmt::Display for WordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

/// Contains all the possible words for a Wordle game. Every word has the same length, and no word
/// appears more than once.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    all_words: Vec<WordEntry>,
    word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Blank lines are skipped, and each word is
    /// trimmed and converted to lower case.
    ///
    /// A line may instead be a tab-separated row, where the first column is the word, the second
    /// its level (an integer, where `0` marks a common word), and the ninth, if present, its
    /// prior. If the first such row does not have an integer level, it is treated as a header and
    /// skipped.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let mut entries = Vec::new();
        let mut may_be_header = true;
        for (index, maybe_line) in word_reader.lines().enumerate() {
            let line = maybe_line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if !line.contains('\t') {
                entries.push(WordEntry::new(line)?);
                may_be_header = false;
                continue;
            }
            match parse_row(line, index + 1) {
                Ok(entry) => entries.push(entry),
                Err(WordleError::InvalidDictionaryEntry { .. }) if may_be_header => {
                    debug!("Skipping dictionary header: {:?}", line);
                }
                Err(e) => return Err(e),
            }
            may_be_header = false;
        }
        WordBank::from_entries(entries)
    }

    /// Constructs a new `WordBank` using the words from the given iterator.
    ///
    /// Each word is trimmed and converted to lower case. Empty words are skipped.
    ///
    /// ```
    /// use wordle_filter::WordBank;
    ///
    /// let bank = WordBank::from_iterator(&["Ratio", "", "snoop "]).unwrap();
    ///
    /// assert_eq!(bank.len(), 2);
    /// assert_eq!(bank.word_length(), 5);
    /// ```
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
    {
        let entries = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                Some(WordEntry::new(word))
            })
            .collect::<Result<Vec<WordEntry>, WordleError>>()?;
        WordBank::from_entries(entries)
    }

    /// Constructs a new `WordBank` from existing entries, such as a previously cached dictionary.
    ///
    /// Every word is checked again, scores are cleared, empty words are skipped, and only the first
    /// copy of a repeated word is kept.
    pub fn from_entries(
        entries: impl IntoIterator<Item = WordEntry>,
    ) -> Result<Self, WordleError> {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words = Vec::new();
        let mut word_length = 0;
        for entry in entries {
            let entry = WordEntry::with_metadata(entry.word(), entry.level, entry.prior)?;
            if entry.is_empty() {
                continue;
            }
            if all_words.is_empty() {
                word_length = entry.len();
            } else if entry.len() != word_length {
                return Err(WordleError::WordLength(word_length));
            }
            if !seen.insert(Arc::clone(&entry.word)) {
                warn!("Dropping repeated dictionary word: {}", entry.word());
                continue;
            }
            all_words.push(entry);
        }
        debug!(
            "Loaded {} words of length {}",
            all_words.len(),
            word_length
        );
        Ok(WordBank {
            all_words,
            word_length,
        })
    }

    /// Returns the length of each word in the bank, or zero if the bank is empty.
    pub fn word_length(&self) -> usize {
        self.word_length
    }

    /// Returns `true` iff the given word is in the bank.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.all_words.iter().any(|entry| entry.word() == word)
    }
}

impl Deref for WordBank {
    type Target = [WordEntry];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

fn parse_row(line: &str, line_number: usize) -> Result<WordEntry, WordleError> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    let parse_number = |column: usize, name: &str| -> Result<Option<u32>, WordleError> {
        match fields.get(column) {
            None => Ok(None),
            Some(field) if field.is_empty() => Ok(None),
            Some(field) => field.parse::<u32>().map(Some).map_err(|e| {
                WordleError::InvalidDictionaryEntry {
                    line: line_number,
                    reason: format!("{} {:?} is not an integer: {}", name, field, e),
                }
            }),
        }
    };
    let level = parse_number(LEVEL_COLUMN, "level")?;
    let prior = parse_number(PRIOR_COLUMN, "prior")?;
    WordEntry::with_metadata(fields[0], level, prior)
}

/// Counts how often each letter appears at each location, and overall, across a list of words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterCounter {
    num_by_location: Vec<[u32; NUM_LETTERS]>,
    num_by_letter: [u32; NUM_LETTERS],
    num_words: usize,
}

impl LetterCounter {
    /// Counts the letters in the given words. Letters past `word_length` are ignored.
    pub fn new(words: &[WordEntry], word_length: usize) -> LetterCounter {
        let mut num_by_location = vec![[0; NUM_LETTERS]; word_length];
        for word in words {
            for (location, letter) in word.as_bytes().iter().take(word_length).enumerate() {
                num_by_location[location][letter_index(*letter)] += 1;
            }
        }
        let mut num_by_letter = [0; NUM_LETTERS];
        for counts in &num_by_location {
            for (total, count) in num_by_letter.iter_mut().zip(counts) {
                *total += count;
            }
        }
        LetterCounter {
            num_by_location,
            num_by_letter,
            num_words: words.len(),
        }
    }

    /// Returns how many times `letter` appears at `location`, or across all locations if
    /// `location` is `None`.
    ///
    /// Letters outside of `a` through `z`, and locations past the end of the word, count zero.
    pub fn count(&self, letter: char, location: Option<usize>) -> u32 {
        if !letter.is_ascii_lowercase() {
            return 0;
        }
        let letter = letter_index(letter as u8);
        match location {
            None => self.num_by_letter[letter],
            Some(location) => self
                .num_by_location
                .get(location)
                .map_or(0, |counts| counts[letter]),
        }
    }

    /// The number of words that were counted.
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    pub fn word_length(&self) -> usize {
        self.num_by_location.len()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Cursor;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|word| WordEntry::new(word).unwrap())
            .collect()
    }

    #[test]
    fn word_entry_equality_ignores_metadata() -> Result<(), WordleError> {
        let mut scored = WordEntry::with_metadata("Shark", Some(3), Some(12))?;
        scored.set_score(42);

        assert_eq!(scored, WordEntry::new("shark")?);
        assert_eq!(scored, "shark");
        assert!(!scored.is_common());
        Ok(())
    }

    #[test]
    fn word_entry_commonness() -> Result<(), WordleError> {
        assert!(WordEntry::new("shark")?.is_common());
        assert!(WordEntry::with_metadata("shark", Some(0), None)?.is_common());
        assert!(!WordEntry::with_metadata("shark", Some(1), None)?.is_common());
        Ok(())
    }

    #[test]
    fn word_entry_count_letter() -> Result<(), WordleError> {
        let entry = WordEntry::new("sassy")?;

        assert_eq!(entry.count_letter('s'), 3);
        assert_eq!(entry.count_letter('y'), 1);
        assert_eq!(entry.count_letter('z'), 0);
        assert_eq!(entry.count_letter('S'), 0);
        Ok(())
    }

    #[test]
    fn word_bank_from_reader_with_metadata() -> Result<(), WordleError> {
        let cursor = Cursor::new(String::from(
            "word\tlevel\tentropy\tpercentile\ta\tb\tc\td\tprior\n\
             aback\t1\t0.1\t5\t1.0\t2.0\t3\t4\t17\n\
             abase\t0\n\
             \n\
             abate\t0\t\t\t\t\t\t\t\n",
        ));

        let bank = WordBank::from_reader(cursor)?;

        assert_eq!(bank.len(), 3);
        assert_eq!(bank[0].level(), Some(1));
        assert_eq!(bank[0].prior(), Some(17));
        assert_eq!(bank[1].level(), Some(0));
        assert_eq!(bank[1].prior(), None);
        assert_eq!(bank[2], "abate");
        Ok(())
    }

    #[test]
    fn word_bank_from_reader_rejects_bad_row() {
        let cursor = Cursor::new(String::from("aback\t1\nabase\tcommon\n"));

        assert!(matches!(
            WordBank::from_reader(cursor),
            Err(WordleError::InvalidDictionaryEntry { line: 2, .. })
        ));
    }

    #[test]
    fn word_bank_drops_repeated_words() -> Result<(), WordleError> {
        let bank = WordBank::from_iterator(vec!["shark", "SHARK", "spend"])?;

        assert_eq!(bank.len(), 2);
        assert!(bank.contains("Spend"));
        assert!(!bank.contains("snoop"));
        Ok(())
    }

    #[test]
    fn letter_counter_counts_by_location() {
        let counter = LetterCounter::new(&entries(&["hello", "hallo", "worda"]), 5);

        assert_eq!(counter.count('h', Some(0)), 2);
        assert_eq!(counter.count('e', Some(1)), 1);
        assert_eq!(counter.count('l', Some(2)), 2);
        assert_eq!(counter.count('l', Some(3)), 2);
        assert_eq!(counter.count('o', Some(4)), 2);
        assert_eq!(counter.count('o', Some(1)), 1);
        assert_eq!(counter.count('a', Some(4)), 1);

        // Missing letters:
        assert_eq!(counter.count('h', Some(1)), 0);
        assert_eq!(counter.count('z', Some(0)), 0);
        assert_eq!(counter.count('h', Some(7)), 0);
    }

    #[test]
    fn letter_counter_counts_every_occurrence() {
        let counter = LetterCounter::new(&entries(&["hello", "hallo", "worda"]), 5);

        assert_eq!(counter.count('l', None), 4);
        assert_eq!(counter.count('o', None), 3);
        assert_eq!(counter.count('a', None), 2);
        assert_eq!(counter.count('h', None), 2);
        assert_eq!(counter.count('z', None), 0);
        assert_eq!(counter.count('?', None), 0);
        assert_eq!(counter.num_words(), 3);
        assert_eq!(counter.word_length(), 5);
    }
}

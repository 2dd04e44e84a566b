use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The canonical number of letters in a Wordle word.
pub const WORD_LENGTH: usize = 5;

/// Number of distinct letters supported in a word (`a` through `z`).
pub(crate) const NUM_LETTERS: usize = 26;

/// The verdict given to a letter at a specific location in a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The letter is at this location in the objective word.
    Correct,
    /// The letter is in the objective word, but not at this location.
    Present,
    /// The letter is not in the objective word, once every occurrence already explained by a
    /// `Correct` or `Present` verdict has been accounted for.
    Absent,
}

impl Verdict {
    /// All verdicts, in the order used to group a [`Feedback`]'s indices.
    pub const ALL: [Verdict; 3] = [Verdict::Correct, Verdict::Present, Verdict::Absent];

    /// Parses a verdict from a single pattern character.
    ///
    /// * `g`, `2`: [`Verdict::Correct`]
    /// * `y`, `1`: [`Verdict::Present`]
    /// * `.`, `-`, `b`, `x`, `0`: [`Verdict::Absent`]
    ///
    /// Letters are matched case-insensitively.
    pub fn from_char(symbol: char) -> Result<Verdict, WordleError> {
        match symbol.to_ascii_lowercase() {
            'g' | '2' => Ok(Verdict::Correct),
            'y' | '1' => Ok(Verdict::Present),
            '.' | '-' | 'b' | 'x' | '0' => Ok(Verdict::Absent),
            _ => Err(WordleError::InvalidVerdict(symbol)),
        }
    }

    /// Renders this verdict as `g`, `y`, or `.`.
    pub fn to_char(self) -> char {
        match self {
            Verdict::Correct => 'g',
            Verdict::Present => 'y',
            Verdict::Absent => '.',
        }
    }

    fn group(self) -> usize {
        match self {
            Verdict::Correct => 0,
            Verdict::Present => 1,
            Verdict::Absent => 2,
        }
    }
}

/// Indicates that an error occurred while filtering or ranking words.
#[derive(Debug, Error)]
pub enum WordleError {
    /// A word or verdict sequence did not have the required length. Contains the required length.
    #[error("words and verdicts must have length {0}")]
    WordLength(usize),
    /// A word contained a character outside of `a` through `z`.
    #[error("unsupported character {0:?}: words may only contain the letters a-z")]
    UnsupportedCharacter(char),
    /// A verdict pattern contained an unknown symbol.
    #[error("unknown verdict {0:?}: use 'g' for correct, 'y' for present, or '.' for absent")]
    InvalidVerdict(char),
    /// No candidate word is consistent with the feedback given so far. Either the feedback is
    /// contradictory, or the objective word is not in the dictionary.
    #[error("no remaining candidate matches the given feedback")]
    NoCandidatesRemaining,
    /// The requested functionality has not been built.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    /// A dictionary line could not be parsed.
    #[error("invalid dictionary entry on line {line}: {reason}")]
    InvalidDictionaryEntry { line: usize, reason: String },
    /// The dictionary could not be read.
    #[error("could not read the dictionary")]
    Io(#[from] std::io::Error),
}

/// Lower-cases the given word, and checks that it only contains the letters `a` through `z`.
pub(crate) fn normalize_word(word: &str) -> Result<String, WordleError> {
    let normalized = word.to_lowercase();
    if let Some(bad_letter) = normalized.chars().find(|letter| !letter.is_ascii_lowercase()) {
        return Err(WordleError::UnsupportedCharacter(bad_letter));
    }
    Ok(normalized)
}

#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

/// One guessed word, along with the verdict for each of its letters.
///
/// The indices of each verdict are grouped when the feedback is constructed, and can be retrieved
/// with [`Feedback::indices`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback {
    guess: Arc<str>,
    verdicts: Vec<Verdict>,
    /// Indices grouped in `Verdict::ALL` order. Every index appears in exactly one group.
    indices_by_verdict: [Vec<usize>; 3],
}

impl Feedback {
    /// Constructs feedback for a guess of [`WORD_LENGTH`] letters.
    ///
    /// ```
    /// use wordle_filter::Feedback;
    /// use wordle_filter::Verdict;
    ///
    /// let feedback = Feedback::new(
    ///     "RATIO",
    ///     vec![Verdict::Present, Verdict::Present, Verdict::Absent, Verdict::Absent, Verdict::Absent],
    /// ).unwrap();
    ///
    /// assert_eq!(feedback.guess(), "ratio");
    /// assert_eq!(feedback.indices(Verdict::Present), &[0, 1]);
    /// ```
    pub fn new(guess: &str, verdicts: Vec<Verdict>) -> Result<Feedback, WordleError> {
        Feedback::with_word_length(guess, verdicts, WORD_LENGTH)
    }

    /// Constructs feedback for a guess of `word_length` letters.
    ///
    /// Fails with [`WordleError::WordLength`] unless both the guess and the verdicts have exactly
    /// `word_length` entries. No check is made that the verdicts could be produced by a real
    /// objective word.
    pub fn with_word_length(
        guess: &str,
        verdicts: Vec<Verdict>,
        word_length: usize,
    ) -> Result<Feedback, WordleError> {
        let guess = normalize_word(guess)?;
        if guess.len() != word_length || verdicts.len() != word_length {
            return Err(WordleError::WordLength(word_length));
        }
        let mut indices_by_verdict: [Vec<usize>; 3] = Default::default();
        for (index, verdict) in verdicts.iter().enumerate() {
            indices_by_verdict[verdict.group()].push(index);
        }
        Ok(Feedback {
            guess: Arc::from(guess),
            verdicts,
            indices_by_verdict,
        })
    }

    /// Constructs feedback from a guess and a pattern string such as `"g.gy."`. See
    /// [`Verdict::from_char`] for the accepted symbols. The pattern must be as long as the guess.
    pub fn from_pattern(guess: &str, pattern: &str) -> Result<Feedback, WordleError> {
        let verdicts = pattern
            .chars()
            .map(Verdict::from_char)
            .collect::<Result<Vec<Verdict>, WordleError>>()?;
        Feedback::with_word_length(guess, verdicts, guess.chars().count())
    }

    /// The guessed word, in lower case.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Returns the locations in the guess that were given the `verdict`, in increasing order.
    pub fn indices(&self, verdict: Verdict) -> &[usize] {
        &self.indices_by_verdict[verdict.group()]
    }

    /// The number of letters in the guess.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Returns `true` iff every letter was [`Verdict::Correct`].
    pub fn is_correct(&self) -> bool {
        self.verdicts
            .iter()
            .all(|verdict| *verdict == Verdict::Correct)
    }

    /// Renders the verdicts as a pattern string, e.g. `"g.gy."`.
    pub fn pattern(&self) -> String {
        self.verdicts.iter().map(|verdict| verdict.to_char()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.guess, self.pattern())
    }
}

/// Determines the feedback for `guess` when the objective word is `objective`.
///
/// Letters that exactly match are marked correct first. The remaining letters are then marked,
/// left to right, as present while the objective still has unmatched copies of that letter, and
/// absent after that.
///
/// ```
/// use wordle_filter::get_result_for_guess;
///
/// let feedback = get_result_for_guess("mesas", "sassy").unwrap();
///
/// assert_eq!(feedback.pattern(), "yyg..");
/// ```
pub fn get_result_for_guess(objective: &str, guess: &str) -> Result<Feedback, WordleError> {
    let objective = normalize_word(objective)?;
    let guess = normalize_word(guess)?;
    if objective.len() != guess.len() {
        return Err(WordleError::WordLength(objective.len()));
    }
    let mut verdicts = vec![Verdict::Absent; guess.len()];
    compute_verdicts(objective.as_bytes(), guess.as_bytes(), &mut verdicts);
    Feedback::with_word_length(&guess, verdicts, objective.len())
}

/// Writes the verdicts for `guess` against `objective` into `verdicts`.
///
/// All three slices must have the same length, and both words must be lower-case ASCII letters.
pub(crate) fn compute_verdicts(objective: &[u8], guess: &[u8], verdicts: &mut [Verdict]) {
    let mut unmatched_counts = [0u32; NUM_LETTERS];
    for (index, (objective_letter, guess_letter)) in objective.iter().zip(guess).enumerate() {
        if objective_letter == guess_letter {
            verdicts[index] = Verdict::Correct;
        } else {
            verdicts[index] = Verdict::Absent;
            unmatched_counts[letter_index(*objective_letter)] += 1;
        }
    }
    for (index, guess_letter) in guess.iter().enumerate() {
        if verdicts[index] == Verdict::Correct {
            continue;
        }
        let count = &mut unmatched_counts[letter_index(*guess_letter)];
        if *count > 0 {
            verdicts[index] = Verdict::Present;
            *count -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_from_char() {
        assert_eq!(Verdict::from_char('g').unwrap(), Verdict::Correct);
        assert_eq!(Verdict::from_char('Y').unwrap(), Verdict::Present);
        assert_eq!(Verdict::from_char('.').unwrap(), Verdict::Absent);
        assert_eq!(Verdict::from_char('0').unwrap(), Verdict::Absent);
        assert!(matches!(
            Verdict::from_char('q'),
            Err(WordleError::InvalidVerdict('q'))
        ));
    }

    #[test]
    fn feedback_partitions_indices() -> Result<(), WordleError> {
        let feedback = Feedback::from_pattern("snoop", "g.g..")?;

        assert_eq!(feedback.indices(Verdict::Correct), &[0, 2]);
        assert_eq!(feedback.indices(Verdict::Present), &[] as &[usize]);
        assert_eq!(feedback.indices(Verdict::Absent), &[1, 3, 4]);
        Ok(())
    }

    #[test]
    fn feedback_rejects_wrong_lengths() {
        assert!(matches!(
            Feedback::new("best", vec![Verdict::Correct; 4]),
            Err(WordleError::WordLength(5))
        ));
        assert!(matches!(
            Feedback::new("ratio", vec![Verdict::Correct; 6]),
            Err(WordleError::WordLength(5))
        ));
        assert!(matches!(
            Feedback::from_pattern("ratio", "gg"),
            Err(WordleError::WordLength(5))
        ));
    }

    #[test]
    fn feedback_rejects_unsupported_characters() {
        assert!(matches!(
            Feedback::new("ca fe", vec![Verdict::Absent; 5]),
            Err(WordleError::UnsupportedCharacter(' '))
        ));
    }

    #[test]
    fn compute_verdicts_marks_extra_copies_absent() {
        let mut verdicts = vec![Verdict::Absent; 5];

        compute_verdicts(b"briar", b"arars", &mut verdicts);

        assert_eq!(
            verdicts,
            vec![
                Verdict::Present,
                Verdict::Correct,
                Verdict::Absent,
                Verdict::Present,
                Verdict::Absent,
            ]
        );
    }

    #[test]
    fn compute_verdicts_prefers_exact_matches() {
        let mut verdicts = vec![Verdict::Absent; 5];

        // Both of the objective's 'l's are matched exactly, so the leading 'l' is absent.
        compute_verdicts(b"hello", b"lolly", &mut verdicts);

        assert_eq!(
            verdicts,
            vec![
                Verdict::Absent,
                Verdict::Present,
                Verdict::Correct,
                Verdict::Correct,
                Verdict::Absent,
            ]
        );
    }
}

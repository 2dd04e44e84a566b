use crate::data::LetterCounter;
use crate::data::WordEntry;
use crate::results::WordleError;
use log::debug;
use rayon::prelude::*;
use std::result::Result;

/// The lowest score given after normalization.
pub const MIN_SCORE: u32 = 0;
/// The highest score given after normalization.
pub const MAX_SCORE: u32 = 99;

/// Gives words a raw score, where the maximum score indicates the best guess.
///
/// Raw scores are only comparable within a single call. [`CandidateScorer`] rescales them into
/// `MIN_SCORE..=MAX_SCORE` before attaching them to the words.
pub trait WordScorer {
    /// Returns a raw score for each of the given words, in the same order.
    fn raw_scores(&self, words: &[WordEntry]) -> Result<Vec<u64>, WordleError>;
}

/// Multipliers applied to letter counts by the [`LetterFrequencyScorer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringWeights {
    /// Applied to the number of words with the same letter at the same location.
    pub position: u32,
    /// Applied to the number of times the letter appears anywhere in the words.
    pub overall: u32,
}

impl ScoringWeights {
    /// The weights used by earlier versions of this scorer.
    pub const LEGACY: ScoringWeights = ScoringWeights {
        position: 3,
        overall: 1,
    };
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            position: 5,
            overall: 1,
        }
    }
}

/// Scores words by how common their letters are among the words being scored. Each letter is
/// scored as follows, and the letter scores are summed:
///
/// * `position` points for every word with this letter at this location.
/// * If the letter only appears once in the scored word, `overall` points for every occurrence of
///   the letter anywhere in the words.
///
/// Only counting the overall frequency of unrepeated letters stops words like `arars` from
/// winning on the strength of one common letter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterFrequencyScorer {
    weights: ScoringWeights,
}

impl LetterFrequencyScorer {
    pub fn new(weights: ScoringWeights) -> LetterFrequencyScorer {
        LetterFrequencyScorer { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Determines the raw score for the given word using letter counts from the scored words.
    pub fn score_word(&self, word: &WordEntry, counter: &LetterCounter) -> u64 {
        let mut sum = 0;
        for (index, letter) in word.word().char_indices() {
            sum += counter.count(letter, Some(index)) as u64 * self.weights.position as u64;
            if word.count_letter(letter) == 1 {
                sum += counter.count(letter, None) as u64 * self.weights.overall as u64;
            }
        }
        sum
    }
}

impl WordScorer for LetterFrequencyScorer {
    fn raw_scores(&self, words: &[WordEntry]) -> Result<Vec<u64>, WordleError> {
        let word_length = words.first().map_or(0, WordEntry::len);
        let counter = LetterCounter::new(words, word_length);
        debug!(
            "Counted letters in {} words of length {}",
            counter.num_words(),
            counter.word_length()
        );
        Ok(words
            .par_iter()
            .map(|word| self.score_word(word, &counter))
            .collect())
    }
}

/// Reserved for scoring words by how evenly their possible feedback splits the remaining words.
///
/// This has not been built yet, so every call fails with [`WordleError::NotImplemented`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyScorer;

impl WordScorer for EntropyScorer {
    fn raw_scores(&self, _words: &[WordEntry]) -> Result<Vec<u64>, WordleError> {
        Err(WordleError::NotImplemented("entropy scoring"))
    }
}

/// Selects how [`CandidateScorer`] computes raw scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringMethod {
    /// Uses the [`LetterFrequencyScorer`].
    #[default]
    Heuristic,
    /// Uses the [`EntropyScorer`], which is not implemented.
    Entropy,
}

impl ScoringMethod {
    pub fn from_use_entropy(use_entropy: bool) -> ScoringMethod {
        if use_entropy {
            ScoringMethod::Entropy
        } else {
            ScoringMethod::Heuristic
        }
    }
}

/// Attaches normalized scores to candidate words and ranks them, best first.
///
/// ```
/// use wordle_filter::CandidateScorer;
/// use wordle_filter::ScoringMethod;
/// use wordle_filter::WordBank;
///
/// let bank = WordBank::from_iterator(&["crane", "crate", "trace"]).unwrap();
/// let scorer = CandidateScorer::default();
///
/// let best = scorer.best_guess(&bank, ScoringMethod::Heuristic).unwrap();
///
/// assert_eq!(best.word(), "crate");
/// assert_eq!(best.score(), 99);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateScorer {
    heuristic: LetterFrequencyScorer,
}

impl CandidateScorer {
    pub fn new(weights: ScoringWeights) -> CandidateScorer {
        CandidateScorer {
            heuristic: LetterFrequencyScorer::new(weights),
        }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.heuristic.weights()
    }

    /// Scores the words in place, then sorts them from highest to lowest score. Uses the entropy
    /// scorer iff `use_entropy` is true.
    pub fn score_words(
        &self,
        words: &mut [WordEntry],
        use_entropy: bool,
    ) -> Result<(), WordleError> {
        self.score_with(words, ScoringMethod::from_use_entropy(use_entropy))
    }

    /// Scores the words in place with the given method, then sorts them from highest to lowest
    /// score. Words with equal scores keep their relative order.
    pub fn score_with(
        &self,
        words: &mut [WordEntry],
        method: ScoringMethod,
    ) -> Result<(), WordleError> {
        let raw_scores = match method {
            ScoringMethod::Heuristic => self.heuristic.raw_scores(words)?,
            ScoringMethod::Entropy => EntropyScorer.raw_scores(words)?,
        };
        for (word, score) in words.iter_mut().zip(normalize_scores(&raw_scores)) {
            word.set_score(score);
        }
        sort_by_score(words);
        debug!("Scored {} words using {:?}", words.len(), method);
        Ok(())
    }

    /// Returns a scored copy of the given words, sorted from highest to lowest score.
    pub fn rank(
        &self,
        words: &[WordEntry],
        method: ScoringMethod,
    ) -> Result<Vec<WordEntry>, WordleError> {
        let mut ranked = words.to_vec();
        self.score_with(&mut ranked, method)?;
        Ok(ranked)
    }

    /// Returns the highest-scoring word. Among equal scores, the earliest word wins.
    ///
    /// Fails with [`WordleError::NoCandidatesRemaining`] if `words` is empty.
    pub fn best_guess(
        &self,
        words: &[WordEntry],
        method: ScoringMethod,
    ) -> Result<WordEntry, WordleError> {
        self.rank(words, method)?
            .into_iter()
            .next()
            .ok_or(WordleError::NoCandidatesRemaining)
    }
}

/// Linearly rescales the raw scores into `MIN_SCORE..=MAX_SCORE`, rounding to the nearest integer.
///
/// If every raw score is the same, every word gets `MIN_SCORE`.
pub fn normalize_scores(raw_scores: &[u64]) -> Vec<u32> {
    let (Some(min), Some(max)) = (raw_scores.iter().min(), raw_scores.iter().max()) else {
        return Vec::new();
    };
    if min == max {
        return vec![MIN_SCORE; raw_scores.len()];
    }
    let raw_range = (max - min) as f64;
    let target_range = (MAX_SCORE - MIN_SCORE) as f64;
    raw_scores
        .iter()
        .map(|raw| {
            let scaled = (raw - min) as f64 / raw_range * target_range + MIN_SCORE as f64;
            (scaled.round() as u32).clamp(MIN_SCORE, MAX_SCORE)
        })
        .collect()
}

/// Sorts the words from highest to lowest score. Words with equal scores keep their relative
/// order.
pub fn sort_by_score(words: &mut [WordEntry]) {
    words.sort_by(|a, b| b.score().cmp(&a.score()));
}

/// Returns only the common words, e.g. to avoid suggesting obscure words that are unlikely to be
/// the answer.
pub fn filter_common(words: &[WordEntry]) -> Vec<WordEntry> {
    words
        .iter()
        .filter(|word| word.is_common())
        .cloned()
        .collect()
}

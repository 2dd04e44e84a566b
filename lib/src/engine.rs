use crate::data::*;
use crate::restrictions::filter_candidates;
use crate::results::*;
use crate::scorers::*;
use log::debug;
use log::info;
use log::warn;
use std::result::Result;

/// Configures how a [`Session`] ranks its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    /// Weights used by the letter frequency scorer.
    pub weights: ScoringWeights,
    /// If true, [`Session::get_best_guess`] only suggests common words, as long as any common
    /// word remains possible.
    pub suggest_common_only: bool,
}

/// What happened when feedback was submitted to a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The feedback was recorded and the candidates were filtered. Contains the number of
    /// remaining candidates.
    Applied { remaining: usize },
    /// The same feedback had already been submitted, so nothing changed.
    Duplicate,
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Box<str>>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Box<str>>),
    /// Indicates that the given word was not in the word bank.
    UnknownWord,
}

/// Tracks a single game: the full dictionary, the words that are still possible, and the feedback
/// submitted so far.
///
/// ```
/// use wordle_filter::Feedback;
/// use wordle_filter::Session;
/// use wordle_filter::WordBank;
///
/// let bank = WordBank::from_iterator(&["snoop", "scoff", "stood", "spend"]).unwrap();
/// let mut session = Session::new(bank);
///
/// session.add_guess(Feedback::from_pattern("snoop", "g.g..").unwrap()).unwrap();
///
/// assert_eq!(session.remaining_count(), 1);
/// assert_eq!(session.get_best_guess().unwrap().word(), "scoff");
/// ```
pub struct Session {
    bank: WordBank,
    candidates: Vec<WordEntry>,
    history: Vec<Feedback>,
    scorer: CandidateScorer,
    config: SessionConfig,
}

impl Session {
    /// Starts a session with the default configuration.
    pub fn new(bank: WordBank) -> Session {
        Session::with_config(bank, SessionConfig::default())
    }

    pub fn with_config(bank: WordBank, config: SessionConfig) -> Session {
        Session {
            candidates: bank.to_vec(),
            bank,
            history: Vec::new(),
            scorer: CandidateScorer::new(config.weights),
            config,
        }
    }

    /// Records the feedback and removes every candidate that is inconsistent with it.
    ///
    /// Submitting feedback that is already in the history does nothing, and returns
    /// [`GuessOutcome::Duplicate`].
    ///
    /// If no candidate survives, the feedback is still recorded, the candidates are left empty,
    /// and this returns [`WordleError::NoCandidatesRemaining`].
    pub fn add_guess(&mut self, feedback: Feedback) -> Result<GuessOutcome, WordleError> {
        if !self.bank.is_empty() && feedback.len() != self.bank.word_length() {
            return Err(WordleError::WordLength(self.bank.word_length()));
        }
        if self.history.contains(&feedback) {
            warn!("Feedback {} was already submitted, ignoring it", feedback);
            return Ok(GuessOutcome::Duplicate);
        }
        self.candidates = filter_candidates(&feedback, &self.candidates);
        self.history.push(feedback);
        if self.candidates.is_empty() {
            return Err(WordleError::NoCandidatesRemaining);
        }
        Ok(GuessOutcome::Applied {
            remaining: self.candidates.len(),
        })
    }

    /// Returns the words that are still consistent with every submitted feedback, in dictionary
    /// order.
    pub fn get_remaining(&self) -> &[WordEntry] {
        &self.candidates
    }

    pub fn remaining_count(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the submitted feedback, oldest first.
    pub fn history(&self) -> &[Feedback] {
        &self.history
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Returns `true` iff the latest feedback marked every letter as correct.
    pub fn is_solved(&self) -> bool {
        self.history.last().map_or(false, Feedback::is_correct)
    }

    /// Returns a scored copy of the remaining candidates, best first. The candidates themselves
    /// keep their order.
    pub fn ranked_candidates(&self, method: ScoringMethod) -> Result<Vec<WordEntry>, WordleError> {
        self.scorer.rank(&self.candidates, method)
    }

    /// Suggests the remaining candidate with the highest heuristic score.
    ///
    /// Fails with [`WordleError::NoCandidatesRemaining`] if no candidate is left.
    pub fn get_best_guess(&self) -> Result<WordEntry, WordleError> {
        if self.config.suggest_common_only {
            let common = filter_common(&self.candidates);
            if !common.is_empty() {
                return self.scorer.best_guess(&common, ScoringMethod::Heuristic);
            }
            debug!("No common candidates remain, suggesting from all candidates");
        }
        self.scorer
            .best_guess(&self.candidates, ScoringMethod::Heuristic)
    }

    /// Restores every dictionary word as a candidate and clears the history.
    pub fn reset(&mut self) {
        info!(
            "Resetting session after {} guesses",
            self.history.len()
        );
        self.candidates = self.bank.to_vec();
        self.history.clear();
    }
}

/// Plays the session's game against a known objective word, submitting the true feedback for each
/// suggested guess until the word is found or `max_num_guesses` guesses have been made.
///
/// The game continues from the session's current state.
pub fn play_game(
    objective: &str,
    max_num_guesses: u32,
    session: &mut Session,
) -> Result<GameResult, WordleError> {
    if !session.word_bank().contains(objective) {
        return Ok(GameResult::UnknownWord);
    }
    let mut guesses: Vec<Box<str>> = Vec::new();
    for _ in 0..max_num_guesses {
        let guess = session.get_best_guess()?;
        let feedback = get_result_for_guess(objective, guess.word())?;
        guesses.push(Box::from(guess.word()));
        let is_correct = feedback.is_correct();
        session.add_guess(feedback)?;
        if is_correct {
            return Ok(GameResult::Success(guesses));
        }
    }
    Ok(GameResult::Failure(guesses))
}

//! Helps a Wordle player by narrowing a dictionary down to the words that are consistent with the
//! feedback received so far, and by ranking the remaining words to suggest the next guess.
//!
//! ```
//! use wordle_filter::Feedback;
//! use wordle_filter::Session;
//! use wordle_filter::WordBank;
//!
//! let bank = WordBank::from_iterator(&["briar", "friar", "radar", "rarer"]).unwrap();
//! let mut session = Session::new(bank);
//!
//! session.add_guess(Feedback::from_pattern("arars", "yg.y.").unwrap()).unwrap();
//!
//! assert_eq!(session.remaining_count(), 2);
//! ```

mod data;
mod engine;
mod restrictions;
mod results;
pub mod scorers;

pub use data::LetterCounter;
pub use data::WordBank;
pub use data::WordEntry;
pub use engine::*;
pub use restrictions::*;
pub use results::*;
pub use scorers::CandidateScorer;
pub use scorers::ScoringMethod;
pub use scorers::ScoringWeights;

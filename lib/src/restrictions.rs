use crate::data::WordEntry;
use crate::results::compute_verdicts;
use crate::results::Feedback;
use crate::results::Verdict;
use log::debug;
use rayon::prelude::*;

/// Returns `true` iff guessing `feedback`'s word against the objective `candidate` would produce
/// exactly `feedback`'s verdicts.
///
/// ```
/// use wordle_filter::Feedback;
/// use wordle_filter::WordEntry;
/// use wordle_filter::is_consistent;
///
/// let feedback = Feedback::from_pattern("arars", "yg.y.").unwrap();
///
/// assert!(is_consistent(&feedback, &WordEntry::new("briar").unwrap()));
/// assert!(!is_consistent(&feedback, &WordEntry::new("radar").unwrap()));
/// ```
pub fn is_consistent(feedback: &Feedback, candidate: &WordEntry) -> bool {
    let mut scratch = vec![Verdict::Absent; feedback.len()];
    is_consistent_with_scratch(feedback, candidate, &mut scratch)
}

fn is_consistent_with_scratch(
    feedback: &Feedback,
    candidate: &WordEntry,
    scratch: &mut [Verdict],
) -> bool {
    if candidate.len() != feedback.len() {
        return false;
    }
    compute_verdicts(candidate.as_bytes(), feedback.guess().as_bytes(), scratch);
    *scratch == *feedback.verdicts()
}

/// Returns the candidates that are consistent with the given feedback, in their original order.
///
/// Neither the feedback nor the given candidates are modified.
pub fn filter_candidates(feedback: &Feedback, candidates: &[WordEntry]) -> Vec<WordEntry> {
    let remaining: Vec<WordEntry> = candidates
        .par_iter()
        .map_init(
            || vec![Verdict::Absent; feedback.len()],
            |scratch, candidate| {
                if is_consistent_with_scratch(feedback, candidate, scratch) {
                    return Some(candidate.clone());
                }
                None
            },
        )
        .filter_map(|maybe_candidate| maybe_candidate)
        .collect();
    debug!(
        "Feedback {} kept {} of {} candidates",
        feedback,
        remaining.len(),
        candidates.len()
    );
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::get_result_for_guess;
    use crate::results::WordleError;

    fn entries(words: &[&str]) -> Vec<WordEntry> {
        words
            .iter()
            .map(|word| WordEntry::new(word).unwrap())
            .collect()
    }

    fn words(entries: &[WordEntry]) -> Vec<&str> {
        entries.iter().map(WordEntry::word).collect()
    }

    #[test]
    fn filter_keeps_exact_match_only() -> Result<(), WordleError> {
        let candidates = entries(&["shark", "share", "shard", "spark"]);
        let feedback = Feedback::from_pattern("shark", "ggggg")?;

        assert_eq!(words(&filter_candidates(&feedback, &candidates)), vec!["shark"]);
        Ok(())
    }

    #[test]
    fn filter_requires_present_letter_elsewhere() -> Result<(), WordleError> {
        let candidates = entries(&["oxide", "poise", "noise", "oxbow"]);
        let feedback = get_result_for_guess("oxide", "poise")?;

        assert_eq!(feedback.pattern(), ".yg.g");
        assert_eq!(words(&filter_candidates(&feedback, &candidates)), vec!["oxide"]);
        Ok(())
    }

    #[test]
    fn filter_absent_copy_only_excludes_its_location() -> Result<(), WordleError> {
        let candidates = entries(&["scoff", "sworn", "stood", "shook", "spend"]);
        let feedback = Feedback::from_pattern("snoop", "g.g..")?;

        let remaining = filter_candidates(&feedback, &candidates);

        // 'stood' and 'shook' repeat the 'o' at index 3, so that 'o' would have been correct.
        assert_eq!(words(&remaining), vec!["scoff"]);
        assert!(remaining.iter().all(|entry| entry.as_bytes()[3] != b'o'));
        Ok(())
    }

    #[test]
    fn filter_absent_letter_removes_every_copy() -> Result<(), WordleError> {
        let candidates = entries(&["slate", "rummy", "plate", "merit", "style"]);
        let feedback = Feedback::from_pattern("rummy", ".....")?;

        let remaining = filter_candidates(&feedback, &candidates);

        assert_eq!(words(&remaining), vec!["slate", "plate"]);
        Ok(())
    }

    #[test]
    fn filter_counts_repeated_letters() -> Result<(), WordleError> {
        let candidates = entries(&["briar", "radar", "rarer", "friar", "barra"]);
        let feedback = get_result_for_guess("briar", "arars")?;

        let remaining = filter_candidates(&feedback, &candidates);

        assert!(remaining.contains(&WordEntry::new("briar")?));
        assert_eq!(words(&remaining), vec!["briar", "friar"]);
        Ok(())
    }

    #[test]
    fn filter_skips_words_of_other_lengths() -> Result<(), WordleError> {
        let candidates = entries(&["shark", "sharks"]);
        let feedback = Feedback::from_pattern("shark", "ggggg")?;

        assert_eq!(words(&filter_candidates(&feedback, &candidates)), vec!["shark"]);
        Ok(())
    }

    #[test]
    fn filter_with_impossible_feedback_is_empty() -> Result<(), WordleError> {
        let candidates = entries(&["shark", "spend", "snoop"]);
        // Every letter is present, but none are where they were guessed: no real word does this.
        let feedback = Feedback::from_pattern("sssss", "yyyyy")?;

        assert!(filter_candidates(&feedback, &candidates).is_empty());
        Ok(())
    }
}

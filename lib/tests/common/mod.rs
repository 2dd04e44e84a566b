use wordle_filter::*;

/// A small dictionary with plenty of repeated letters.
pub const WORDS: &[&str] = &[
    "alpha", "allot", "arars", "begot", "below", "briar", "crane", "crate", "cumin", "endow",
    "friar", "hello", "ingot", "lolly", "merit", "messy", "noise", "other", "oxide", "plate",
    "poise", "radar", "rarer", "ratio", "rocky", "roomy", "rummy", "sassy", "scoff", "shard",
    "share", "shark", "shook", "silly", "sissy", "slate", "snoop", "spark", "spend", "stood",
    "style", "sworn", "trace",
];

pub fn create_session() -> Session {
    Session::new(WordBank::from_iterator(WORDS).unwrap())
}

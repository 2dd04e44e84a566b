use clap::{Parser, Subcommand};
use log::info;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io;
use std::io::Write;
use std::time::Instant;
use wordle_filter::*;

/// The number of guesses allowed when simulating a game.
const MAX_NUM_GUESSES: u32 = 6;
/// The number of ranked candidates printed after each round of an interactive session.
const NUM_SUGGESTIONS: usize = 5;

/// Narrows down the possible answers to a Wordle puzzle from the feedback you've received, and
/// suggests what to guess next.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to a file that contains a list of possible words, with one word on each line. Lines
    /// may also be tab-separated rows of word, level, and further metadata.
    #[clap(short = 'f', long)]
    words_file: String,

    /// Points given for each word with the same letter at the same location.
    #[clap(long, default_value_t = 5)]
    position_weight: u32,

    /// Points given for each occurrence of an unrepeated letter anywhere in the words.
    #[clap(long, default_value_t = 1)]
    overall_weight: u32,

    /// Only suggest common words, as long as any common word is still possible.
    #[clap(long)]
    common_only: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter the feedback for each of your guesses, and get suggestions for the next one.
    Interactive,
    /// Simulate a game against the given word.
    Single { word: String },
    /// Simulate a game against a random word from the words file.
    Random,
}

fn main() -> Result<(), WordleError> {
    env_logger::init();
    let start_time = Instant::now();
    let args = Args::parse();
    println!("File: {}", args.words_file);

    let words_reader = io::BufReader::new(File::open(&args.words_file)?);
    let word_bank = WordBank::from_reader(words_reader)?;
    println!("There are {} possible words.", word_bank.len());

    let config = SessionConfig {
        weights: ScoringWeights {
            position: args.position_weight,
            overall: args.overall_weight,
        },
        suggest_common_only: args.common_only,
    };
    info!("Using {:?}", config);

    match args.command {
        Command::Interactive => run_interactive_session(word_bank, config)?,
        Command::Single { word } => play_single_game(&word, word_bank, config)?,
        Command::Random => {
            let Some(word) = word_bank.choose(&mut rand::thread_rng()).cloned() else {
                eprintln!("Error: the words file is empty.");
                std::process::exit(1);
            };
            println!("The word is: {}", word);
            play_single_game(word.word(), word_bank, config)?;
        }
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn play_single_game(
    word: &str,
    word_bank: WordBank,
    config: SessionConfig,
) -> Result<(), WordleError> {
    let mut session = Session::with_config(word_bank, config);
    match play_game(word, MAX_NUM_GUESSES, &mut session)? {
        GameResult::Success(guesses) => {
            println!("Solved it! It took me {} guesses.", guesses.len());
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
        }
        GameResult::Failure(guesses) => {
            println!(
                "I still couldn't solve it after {} guesses :(",
                guesses.len()
            );
            for guess in guesses.iter() {
                println!("\t{}", guess);
            }
            println!("{} words were still possible.", session.remaining_count());
        }
        GameResult::UnknownWord => {
            eprintln!("Error: given word not in the word list.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn run_interactive_session(word_bank: WordBank, config: SessionConfig) -> Result<(), WordleError> {
    let mut session = Session::with_config(word_bank, config);
    println!(
        "After each guess, enter the word you guessed followed by the feedback you received.\n\n\
         Enter the feedback for each letter as:\n\n\
           * '.' = this letter is not in the word\n\
           * 'y' = this letter is in the word, but not in this location\n\
           * 'g' = this letter is in the word and in the right location.\n\n\
         For example, if the word was \"spade\" and you guessed \"soapy\", you would enter \
         \"soapy g.gy.\".\n\n\
         Other commands: 'reset', 'history', 'list', 'quit'.");
    print_suggestion(&session)?;

    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut buffer = String::new();
        if io::stdin().read_line(&mut buffer)? == 0 {
            return Ok(());
        }
        let input: Vec<&str> = buffer.split_whitespace().collect();
        match input.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => return Ok(()),
            ["reset"] => {
                session.reset();
                println!("Starting over with {} words.", session.remaining_count());
            }
            ["history"] => {
                for (round, feedback) in session.history().iter().enumerate() {
                    println!("\t{}: {}", round + 1, feedback);
                }
            }
            ["list"] => {
                for entry in session.ranked_candidates(ScoringMethod::Heuristic)? {
                    println!("\t{} ({})", entry, entry.score());
                }
            }
            [word, pattern] => {
                if !apply_feedback(&mut session, word, pattern) {
                    continue;
                }
                if session.is_solved() {
                    println!("Solved in {} guesses!", session.history().len());
                    return Ok(());
                }
                print_suggestion(&session)?;
            }
            _ => println!("Enter a guess and its feedback, e.g. \"soapy g.gy.\"."),
        }
    }
}

/// Submits the given feedback, printing any problem with it. Returns `true` iff the session
/// changed.
fn apply_feedback(session: &mut Session, word: &str, pattern: &str) -> bool {
    let feedback = match Feedback::from_pattern(word, pattern) {
        Ok(feedback) => feedback,
        Err(e) => {
            println!("{}. Try again.", e);
            return false;
        }
    };
    match session.add_guess(feedback) {
        Ok(GuessOutcome::Applied { remaining }) => {
            println!("{} words remain.", remaining);
            true
        }
        Ok(GuessOutcome::Duplicate) => {
            println!("You already entered that.");
            false
        }
        Err(WordleError::NoCandidatesRemaining) => {
            println!(
                "No words match all of that feedback. Check what you entered, or 'reset' to start \
                 over."
            );
            true
        }
        Err(e) => {
            println!("{}. Try again.", e);
            false
        }
    }
}

fn print_suggestion(session: &Session) -> Result<(), WordleError> {
    if session.remaining_count() == 0 {
        return Ok(());
    }
    let best = session.get_best_guess()?;
    println!("Try: {}", best);
    let ranked = session.ranked_candidates(ScoringMethod::Heuristic)?;
    let top: Vec<String> = ranked
        .iter()
        .take(NUM_SUGGESTIONS)
        .map(|entry| format!("{} ({})", entry, entry.score()))
        .collect();
    println!("Top candidates: {}", top.join(", "));
    Ok(())
}

//! vocab-quiz: turn a word list spreadsheet into a multiple-choice quiz
//!
//! `vocab-quiz words.xlsx -q 100 -n 3 -o quiz.xlsx`

use std::path::PathBuf;
use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::error;

use vocab_quiz::{AnswerMode, CoveragePolicy, HeaderStyle, PromptSource, QuizConfig, QuizError, Result};

const DEFAULT_OUTPUT: &str = "generated_questions.xlsx";

fn build_cli() -> Command {
    Command::new("vocab-quiz")
        .about("Generate multiple-choice vocabulary quizzes from a word list")
        .arg(
            Arg::new("input")
                .help("Word list (.xlsx, .xls, .ods or .csv) with word and translation columns")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file; format follows the extension (.xlsx, .csv, .json)")
                .default_value(DEFAULT_OUTPUT)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("questions")
                .short('q')
                .long("questions")
                .help("Number of questions (default: 10)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("options")
                .short('n')
                .long("options")
                .help("Options per question (default: 4)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("answer-mode")
                .long("answer-mode")
                .help("Correct-answer column: option label or word text")
                .value_parser(["label", "text"]),
        )
        .arg(
            Arg::new("prompt")
                .long("prompt")
                .help("Prompt column: the word or its translation")
                .value_parser(["word", "translation"]),
        )
        .arg(
            Arg::new("headers")
                .long("headers")
                .help("Column header language")
                .value_parser(["english", "chinese"]),
        )
        .arg(
            Arg::new("coverage")
                .long("coverage")
                .help("When questions < words: warn, ignore, or deny")
                .value_parser(["warn", "ignore", "deny"]),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Random seed for reproducible output")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON config file; flags override its values")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("preview")
                .long("preview")
                .help("Print the first N rows to stdout")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging")
                .action(ArgAction::SetTrue),
        )
}

/// Config file (if any) with command-line overrides applied
fn resolve_config(matches: &ArgMatches) -> Result<QuizConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };

    if let Some(&n) = matches.get_one::<usize>("questions") {
        config.question_count = n;
    }
    if let Some(&n) = matches.get_one::<usize>("options") {
        config.option_count = n;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    if let Some(mode) = matches.get_one::<String>("answer-mode") {
        config.answer_mode = match mode.as_str() {
            "text" => AnswerMode::Text,
            _ => AnswerMode::Label,
        };
    }
    if let Some(source) = matches.get_one::<String>("prompt") {
        config.prompt_source = match source.as_str() {
            "translation" => PromptSource::Translation,
            _ => PromptSource::Word,
        };
    }
    if let Some(style) = matches.get_one::<String>("headers") {
        config.headers = match style.as_str() {
            "chinese" => HeaderStyle::Chinese,
            _ => HeaderStyle::English,
        };
    }
    if let Some(policy) = matches.get_one::<String>("coverage") {
        config.coverage_policy = match policy.as_str() {
            "ignore" => CoveragePolicy::Ignore,
            "deny" => CoveragePolicy::Deny,
            _ => CoveragePolicy::Warn,
        };
    }

    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let input = matches
        .get_one::<PathBuf>("input")
        .ok_or_else(|| QuizError::InvalidRequest("no input file given".to_string()))?;
    let output = matches
        .get_one::<PathBuf>("output")
        .ok_or_else(|| QuizError::InvalidRequest("no output file given".to_string()))?;

    let quiz = vocab_quiz::run(&config, input, output)?;
    println!("{}", quiz.summary);
    if !quiz.summary.is_full_coverage() {
        println!("Not asked: {}", quiz.summary.uncovered_words.join(", "));
    }

    if let Some(&rows) = matches.get_one::<usize>("preview") {
        for row in quiz.table().iter().take(rows + 1) {
            println!("{}", row.join("\t"));
        }
    }

    Ok(())
}

fn main() {
    let matches = build_cli().get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let matches = build_cli().get_matches_from([
            "vocab-quiz",
            "words.csv",
            "-q",
            "25",
            "-n",
            "3",
            "--answer-mode",
            "text",
            "--headers",
            "chinese",
            "--coverage",
            "deny",
            "--seed",
            "5",
        ]);
        let config = resolve_config(&matches).unwrap();

        assert_eq!(config.question_count, 25);
        assert_eq!(config.option_count, 3);
        assert_eq!(config.answer_mode, AnswerMode::Text);
        assert_eq!(config.headers, HeaderStyle::Chinese);
        assert_eq!(config.coverage_policy, CoveragePolicy::Deny);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.prompt_source, PromptSource::Word);
    }
}

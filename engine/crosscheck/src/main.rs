//! Crosscheck CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crosscheck::{
    drivers, tracing_setup, CliError, EvaluateOptions, GenerateOptions,
};

#[derive(Parser)]
#[command(
    name = "crosscheck",
    version,
    about = "Evaluate machine-generated code against reference tests across many languages"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Generate per-language test drivers and prompt info from a question
    /// corpus.
    GenerateTests {
        /// Questions file (JSON Lines).
        #[arg(long)]
        input: PathBuf,
        /// Output directory.
        #[arg(long)]
        output: PathBuf,
        /// Comma-separated list of languages (default: all).
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,
        /// Emit extra diagnostics from generated drivers.
        #[arg(long)]
        debug: bool,
    },
    /// Execute a predictions file against generated test code.
    ///
    /// Requires ALLOW_EXECUTION=true in the environment.
    EvaluatePredictions {
        /// Predictions file (JSON Lines).
        #[arg(long)]
        predictions: PathBuf,
        /// Directory containing testing_code.jsonl (or the file itself).
        #[arg(long)]
        test_code: PathBuf,
        /// Output directory; also holds resume state.
        #[arg(long)]
        output: PathBuf,
        /// Comma-separated list of languages (default: those present in the
        /// predictions file).
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,
        /// Predictions per question, used to pad question-result vectors.
        #[arg(long)]
        samples: Option<usize>,
        /// Worker threads.
        #[arg(long, default_value_t = 1)]
        cpu_count: usize,
        /// Discard prior results instead of resuming from them.
        #[arg(long)]
        overwrite: bool,
        /// Force the question's entry points over per-prediction overrides.
        #[arg(long)]
        use_question_entry: bool,
        /// Keep generated driver directories here for debugging.
        #[arg(long)]
        keep_code: Option<PathBuf>,
    },
    /// List the supported target languages.
    ListLanguages,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        CliCommand::GenerateTests {
            input,
            output,
            languages,
            debug,
        } => drivers::generate_tests(&GenerateOptions {
            input,
            output,
            languages,
            debug,
        }),
        CliCommand::EvaluatePredictions {
            predictions,
            test_code,
            output,
            languages,
            samples,
            cpu_count,
            overwrite,
            use_question_entry,
            keep_code,
        } => drivers::evaluate_predictions(&EvaluateOptions {
            predictions,
            test_code,
            output,
            languages,
            samples,
            cpu_count,
            overwrite,
            use_question_entry,
            keep_code_dir: keep_code,
        }),
        CliCommand::ListLanguages => {
            for language in xc_langs::list_languages() {
                println!("{language}");
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_setup::init();
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

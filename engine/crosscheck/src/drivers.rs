//! The two batch drivers behind the CLI: test-code generation and
//! prediction evaluation.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{info, warn};
use xc_codegen::{
    generate_prompt_info, generated_question, setup_prediction_dirs, GenError, GeneratedQuestion,
    GeneratorConfig, PromptInfo, TemplateSet,
};
use xc_data::{read_questions, Command, Prediction, PredictionRecord, Question};
use xc_exec::{
    ensure_execution_allowed, execute_predictions as run_batch, load_prior_results,
    ExecutionConfig,
};
use xc_langs::{lookup_pack, LanguagePack};
use xc_results::{PredictionResult, QuestionResult};
use xc_schema::{lookup_spec, BoundSchema, LangTypeSpec};

use crate::error::CliError;
use crate::keywords::rename_reserved_params;

/// Options for `crosscheck generate-tests`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Restrict generation to these languages; all registered otherwise.
    pub languages: Option<Vec<String>>,
    pub debug: bool,
}

/// Options for `crosscheck evaluate-predictions`.
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub predictions: PathBuf,
    pub test_code: PathBuf,
    pub output: PathBuf,
    pub languages: Option<Vec<String>>,
    /// Predictions per question; question-result vectors are padded to this.
    pub samples: Option<usize>,
    pub cpu_count: usize,
    pub overwrite: bool,
    /// Use the question's entry points instead of per-prediction overrides.
    pub use_question_entry: bool,
    /// Keep generated driver directories here instead of a temp dir.
    pub keep_code_dir: Option<PathBuf>,
}

/// Generate test drivers and prompt info for every question and language.
///
/// Writes `testing_code.jsonl`, `prompt_info.jsonl`, and per-language
/// failure files under `failures/`. A question that fails for one language
/// still generates for the others.
pub fn generate_tests(opts: &GenerateOptions) -> Result<(), CliError> {
    if !opts.input.is_file() {
        return Err(CliError::MissingInput(opts.input.clone()));
    }
    std::fs::create_dir_all(&opts.output)?;
    let failures_dir = opts.output.join("failures");
    if failures_dir.exists() {
        std::fs::remove_dir_all(&failures_dir)?;
    }
    std::fs::create_dir_all(&failures_dir)?;

    let (questions, failed_rows) = read_questions(&opts.input)?;
    info!(
        questions = questions.len(),
        failed_rows = failed_rows.len(),
        "read question corpus"
    );
    let mut read_failed = std::fs::File::create(failures_dir.join("read_failed.txt"))?;
    for (row, reason) in &failed_rows {
        writeln!(read_failed, "{reason}: {row}")?;
    }

    let languages = resolve_languages(opts.languages.as_deref())?;
    let config = GeneratorConfig {
        debug: opts.debug,
        ..GeneratorConfig::default()
    };

    let mut testing_code = jsonl_writer(&opts.output.join("testing_code.jsonl"))?;
    let mut prompt_info = jsonl_writer(&opts.output.join("prompt_info.jsonl"))?;

    for language in &languages {
        let (pack, spec) = language_handles(language)?;
        let templates =
            TemplateSet::for_language(language).map_err(|e| fatal_gen(language, &e))?;

        let mut failures = 0_usize;
        let mut failed_file = jsonl_writer(&failures_dir.join(format!("{language}_failed.jsonl")))?;
        for question in &questions {
            match generate_for_question(question, pack, spec, &templates, &config) {
                Ok((generated, prompt)) => {
                    write_jsonl(&mut testing_code, &serde_json::to_value(&generated)?)?;
                    let mut row = serde_json::to_value(&prompt)?;
                    if let Value::Object(obj) = &mut row {
                        obj.insert("language".to_string(), Value::String(language.clone()));
                    }
                    write_jsonl(&mut prompt_info, &row)?;
                }
                Err(e) => {
                    failures += 1;
                    write_jsonl(
                        &mut failed_file,
                        &serde_json::json!({
                            "qid": question.qid,
                            "reason": e.to_string(),
                            "error": error_kind(&e),
                            "question": question,
                        }),
                    )?;
                }
            }
        }
        info!(
            %language,
            failures,
            total = questions.len(),
            "finished generating test code"
        );
    }
    Ok(())
}

fn generate_for_question(
    question: &Question,
    pack: &LanguagePack,
    spec: &LangTypeSpec,
    templates: &TemplateSet,
    config: &GeneratorConfig,
) -> Result<(GeneratedQuestion, PromptInfo), GenError> {
    let question = rename_reserved_params(question)?;
    let params: Vec<(&str, &str)> = question
        .schema
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.type_str.as_str()))
        .collect();
    let schema = BoundSchema::parse(&params, &question.schema.return_type.type_str, spec)?;
    let generated = generated_question(&question, pack, &schema, templates, config)?;
    let prompt = generate_prompt_info(&question, pack, &schema, templates, false)?;
    Ok((generated, prompt))
}

/// Evaluate a predictions file against previously generated test code.
///
/// Per language: skip predictions already present in the output journals,
/// materialize work dirs with the candidate substituted into its driver,
/// run the batch, then assemble per-prediction and per-question result
/// files from the journal.
pub fn evaluate_predictions(opts: &EvaluateOptions) -> Result<(), CliError> {
    ensure_execution_allowed()?;
    if !opts.predictions.is_file() {
        return Err(CliError::MissingInput(opts.predictions.clone()));
    }

    let questions_by_lang = read_testing_code(&opts.test_code)?;
    let mut preds_by_lang = read_prediction_records(&opts.predictions)?;

    if opts.overwrite && opts.output.exists() {
        std::fs::remove_dir_all(&opts.output)?;
    }
    std::fs::create_dir_all(&opts.output)?;
    let prior = load_prior_results(&opts.output)?;

    let languages = match &opts.languages {
        Some(requested) => {
            for language in requested {
                if lookup_pack(language).is_none() {
                    return Err(CliError::UnknownLanguage(language.clone()));
                }
            }
            requested.clone()
        }
        None => {
            let mut found: Vec<String> = preds_by_lang.keys().cloned().collect();
            found.sort_unstable();
            found
        }
    };

    for language in &languages {
        let pack =
            lookup_pack(language).ok_or_else(|| CliError::UnknownLanguage(language.clone()))?;
        let Some(questions) = questions_by_lang.get(language) else {
            warn!(%language, "no generated test code for language, skipping");
            continue;
        };
        let records = preds_by_lang.remove(language).unwrap_or_default();
        let executed_keys: Vec<String> = prior
            .get(language)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();

        let total = records.len();
        let remaining: Vec<PredictionRecord> = records
            .into_iter()
            .filter(|r| !executed_keys.contains(&format!("{}/{}", r.qid, r.id)))
            .collect();
        info!(
            %language,
            total,
            resumed = total - remaining.len(),
            "evaluating predictions"
        );

        if !remaining.is_empty() {
            // Driver files live in a scratch dir unless the caller wants to
            // keep them for debugging. The tempdir guard must outlive the
            // batch: driver files are deleted only after execution.
            let scratch = match &opts.keep_code_dir {
                Some(_) => None,
                None => Some(tempfile::tempdir()?),
            };
            let code_dir: PathBuf = match (&opts.keep_code_dir, &scratch) {
                (Some(dir), _) => {
                    let dir = dir.join(language);
                    std::fs::create_dir_all(&dir)?;
                    dir
                }
                (None, Some(tmp)) => tmp.path().to_path_buf(),
                (None, None) => unreachable!("scratch exists when no keep dir is set"),
            };

            let predictions = setup_prediction_dirs(
                &code_dir,
                pack,
                remaining,
                questions,
                opts.use_question_entry,
            )
            .map_err(|e| fatal_gen(language, &e))?;

            let batch: Vec<(Prediction, Vec<Command>)> = predictions
                .into_values()
                .map(|p| {
                    let commands = pack.commands(&p.file_path);
                    (p, commands)
                })
                .collect();

            let config = ExecutionConfig {
                num_workers: opts.cpu_count.max(1),
                ..ExecutionConfig::default()
            };
            run_batch(batch, language, &opts.output, &config)?;
        }

        assemble_language_results(language, questions, opts)?;
    }
    Ok(())
}

/// Build `<Lang>_results.jsonl` and `<Lang>_question_results.jsonl` from the
/// journal.
fn assemble_language_results(
    language: &str,
    questions: &FxHashMap<String, GeneratedQuestion>,
    opts: &EvaluateOptions,
) -> Result<(), CliError> {
    let journal = load_prior_results(&opts.output)?;
    let Some(executions) = journal.get(language) else {
        return Ok(());
    };

    let mut results: Vec<PredictionResult> = executions
        .values()
        .filter_map(|execution| {
            let question = questions.get(&execution.prediction.qid)?;
            Some(PredictionResult::from_execution(
                execution,
                &question.test_case_ids,
            ))
        })
        .collect();
    results.sort_by(|a, b| (&a.qid, &a.id).cmp(&(&b.qid, &b.id)));

    let mut results_file =
        jsonl_writer(&opts.output.join(format!("{language}_results.jsonl")))?;
    for result in &results {
        write_jsonl(&mut results_file, &serde_json::to_value(result)?)?;
    }

    let mut by_question: FxHashMap<&str, Vec<&PredictionResult>> = FxHashMap::default();
    for result in &results {
        by_question.entry(&result.qid).or_default().push(result);
    }

    let mut question_rows: Vec<Value> = Vec::new();
    for (qid, question) in questions {
        let Some(group) = by_question.get(qid.as_str()) else {
            continue;
        };
        let mut aggregate =
            QuestionResult::new(qid, language, question.test_case_ids.len());
        for result in group {
            aggregate.update(result);
        }
        if let Some(samples) = opts.samples {
            if aggregate.num_predictions < samples {
                warn!(
                    language,
                    %qid,
                    have = aggregate.num_predictions,
                    want = samples,
                    "question has fewer predictions than --samples; padding"
                );
            }
            aggregate.pad_to(samples);
        }
        question_rows.push(aggregate.to_record(&question.title, &question.metadata));
    }
    question_rows.sort_by_key(|row| row["qid"].as_str().map(str::to_string));

    let mut question_file =
        jsonl_writer(&opts.output.join(format!("{language}_question_results.jsonl")))?;
    for row in &question_rows {
        write_jsonl(&mut question_file, row)?;
    }

    info!(
        language,
        predictions = results.len(),
        questions = question_rows.len(),
        "assembled results"
    );
    Ok(())
}

/// Map language names to validated pack + type-spec handles.
fn language_handles(
    language: &str,
) -> Result<(&'static LanguagePack, &'static LangTypeSpec), CliError> {
    let pack = lookup_pack(language).ok_or_else(|| CliError::UnknownLanguage(language.to_string()))?;
    let spec = lookup_spec(language).ok_or_else(|| CliError::UnknownLanguage(language.to_string()))?;
    Ok((pack, spec))
}

fn resolve_languages(requested: Option<&[String]>) -> Result<Vec<String>, CliError> {
    match requested {
        Some(languages) => {
            for language in languages {
                if lookup_pack(language).is_none() {
                    return Err(CliError::UnknownLanguage(language.clone()));
                }
            }
            Ok(languages.to_vec())
        }
        None => Ok(xc_langs::list_languages()
            .into_iter()
            .map(str::to_string)
            .collect()),
    }
}

/// Load `testing_code.jsonl`: `language -> qid -> generated question`.
fn read_testing_code(
    test_code: &Path,
) -> Result<FxHashMap<String, FxHashMap<String, GeneratedQuestion>>, CliError> {
    let path = if test_code.is_dir() {
        test_code.join("testing_code.jsonl")
    } else {
        test_code.to_path_buf()
    };
    if !path.is_file() {
        return Err(CliError::MissingInput(path));
    }

    let mut out: FxHashMap<String, FxHashMap<String, GeneratedQuestion>> = FxHashMap::default();
    for line in BufReader::new(std::fs::File::open(&path)?).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let question: GeneratedQuestion = serde_json::from_str(&line)?;
        out.entry(question.language.clone())
            .or_default()
            .insert(question.qid.clone(), question);
    }
    Ok(out)
}

/// Load the predictions corpus grouped by language. Rows that fail to parse
/// are logged and skipped.
fn read_prediction_records(
    path: &Path,
) -> Result<FxHashMap<String, Vec<PredictionRecord>>, CliError> {
    let mut out: FxHashMap<String, Vec<PredictionRecord>> = FxHashMap::default();
    for (line_number, line) in BufReader::new(std::fs::File::open(path)?).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<PredictionRecord>(&line) {
            Ok(record) => {
                let Some(language) = record.language.clone() else {
                    warn!(line_number, "prediction row has no language, skipping");
                    continue;
                };
                out.entry(language).or_default().push(record);
            }
            Err(e) => warn!(line_number, error = %e, "bad prediction row, skipping"),
        }
    }
    Ok(out)
}

fn jsonl_writer(path: &Path) -> std::io::Result<std::io::BufWriter<std::fs::File>> {
    Ok(std::io::BufWriter::new(std::fs::File::create(path)?))
}

fn write_jsonl<W: Write>(writer: &mut W, value: &Value) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writer.write_all(b"\n")
}

fn fatal_gen(language: &str, error: &GenError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "code generation failed for {language}: {error}"
    )))
}

fn error_kind(error: &GenError) -> &'static str {
    match error {
        GenError::Schema(_) => "SchemaError",
        GenError::Question(xc_data::QuestionError::Parsing(_)) => "QuestionParsingError",
        GenError::Question(xc_data::QuestionError::Validation(_)) => "QuestionValidationError",
        GenError::Question(xc_data::QuestionError::IoPair(_)) => "IOPairError",
        GenError::MissingTemplate(..) | GenError::Template(_) => "TemplateError",
        GenError::UnknownLanguage(_) => "UnknownLanguageError",
        GenError::Io(_) => "IOError",
    }
}

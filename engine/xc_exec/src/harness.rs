//! The worker pool and coordinator.

use std::path::Path;
use std::time::Instant;

use crossbeam::channel::unbounded;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_json::json;
use tracing::{info, warn};
use xc_data::{Command, ExecutionResult, Prediction};

use crate::error::ExecError;
use crate::gate::ensure_execution_allowed;
use crate::runner::execute_prediction;
use crate::sys::{memory_percent, CpuSample};
use crate::writer::{spawn_writer, WriterMsg};
use crate::{execution_results_file, runtime_tracking_file};

/// Harness tunables.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Worker threads; each drives one prediction's child processes at a
    /// time.
    pub num_workers: usize,
    /// How many completions between progress logs / tracking records.
    pub update_freq: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            num_workers: 1,
            update_freq: 250,
        }
    }
}

/// Batch summary returned once every prediction has been journalled.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub completed: usize,
    pub skipped_missing_file: usize,
    pub had_error: usize,
    pub timed_out: usize,
    pub elapsed_secs: f64,
}

/// Execute a batch of predictions for one language.
///
/// Results stream to `<lang>_execution_results.jsonl` in completion order as
/// they arrive — consumers key by `(qid, id)`, never by position. Progress
/// metrics go to `<lang>_runtime_tracking.jsonl` every `update_freq`
/// completions. The returned stats summarize the batch; the journal is the
/// source of truth for individual results.
pub fn execute_predictions(
    predictions: Vec<(Prediction, Vec<Command>)>,
    language: &str,
    output_dir: &Path,
    config: &ExecutionConfig,
) -> Result<ExecutionStats, ExecError> {
    ensure_execution_allowed()?;

    let mut stats = ExecutionStats::default();
    let mut runnable = Vec::with_capacity(predictions.len());
    for (prediction, commands) in predictions {
        if prediction.file_path.exists() {
            runnable.push((prediction, commands));
        } else {
            warn!(key = %prediction.key(), "driver file missing, skipping");
            stats.skipped_missing_file += 1;
        }
    }
    let total = runnable.len();
    info!(total, language, workers = config.num_workers, "executing predictions");

    let (writer_tx, writer_rx) = unbounded();
    let writer = spawn_writer(
        writer_rx,
        output_dir.join(execution_results_file(language)),
        output_dir.join(runtime_tracking_file(language)),
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_workers)
        .build()
        .map_err(|e| ExecError::Pool(e.to_string()))?;

    let (result_tx, result_rx) = unbounded::<ExecutionResult>();
    let producer = std::thread::spawn(move || {
        pool.install(|| {
            runnable
                .into_par_iter()
                .for_each_with(result_tx, |tx, (prediction, commands)| {
                    match execute_prediction(&prediction, commands) {
                        Ok(result) => {
                            let _ = tx.send(result);
                        }
                        Err(e) => {
                            warn!(key = %prediction.key(), error = %e, "prediction failed to execute");
                        }
                    }
                });
        });
    });

    let started = Instant::now();
    let mut batch_started = started;
    let mut cpu_sample = CpuSample::take();
    let mut counts: FxHashMap<&'static str, usize> = FxHashMap::default();

    // The producer's sender clones drop as workers finish; the loop ends
    // when the last one is gone.
    for result in result_rx {
        stats.completed += 1;
        let errored = result.had_error || result.return_code != 0;
        if errored {
            stats.had_error += 1;
        }
        if result.timed_out {
            stats.timed_out += 1;
        }
        *counts.entry(outcome_label(&result)).or_default() += 1;

        writer_tx
            .send(WriterMsg::Execution(serde_json::to_value(&result)?))
            .ok();

        if stats.completed % config.update_freq == 0 {
            let now = Instant::now();
            let net_elapsed = now.duration_since(started).as_secs_f64();
            let batch_elapsed = now.duration_since(batch_started).as_secs_f64();
            batch_started = now;

            let net_rate = stats.completed as f64 / net_elapsed.max(f64::EPSILON);
            let batch_rate = config.update_freq as f64 / batch_elapsed.max(f64::EPSILON);
            let pct_done = stats.completed as f64 / (total.max(1)) as f64 * 100.0;

            let next_sample = CpuSample::take();
            let cpu_used = match (cpu_sample, next_sample) {
                (Some(earlier), Some(current)) => current.percent_since(earlier),
                _ => None,
            };
            cpu_sample = next_sample;

            info!(
                completed = stats.completed,
                total,
                pct = format!("{pct_done:.2}"),
                batch_rate = format!("{batch_rate:.2}/s"),
                net_rate = format!("{net_rate:.2}/s"),
                "execution progress"
            );

            writer_tx
                .send(WriterMsg::Runtime(json!({
                    "completed": stats.completed,
                    "pct_done": pct_done,
                    "net_elapsed": net_elapsed,
                    "net_rate": net_rate,
                    "batch_elapsed": batch_elapsed,
                    "batch_rate": batch_rate,
                    "cpu_used": cpu_used,
                    "memory_used": memory_percent(),
                    "outcomes": counts.iter().map(|(k, v)| ((*k).to_string(), *v)).collect::<std::collections::BTreeMap<_, _>>(),
                })))
                .ok();
        }
    }

    producer.join().map_err(|_| {
        ExecError::Pool("worker pool panicked".to_string())
    })?;
    writer_tx.send(WriterMsg::Shutdown).ok();
    drop(writer_tx);
    writer
        .join()
        .map_err(|_| ExecError::Pool("writer thread panicked".to_string()))??;

    stats.elapsed_secs = started.elapsed().as_secs_f64();
    info!(
        completed = stats.completed,
        elapsed = format!("{:.1}s", stats.elapsed_secs),
        "finished executing batch"
    );
    Ok(stats)
}

fn outcome_label(result: &ExecutionResult) -> &'static str {
    if result.timed_out {
        "timed_out"
    } else if result.had_error || result.return_code != 0 {
        "had_error"
    } else {
        "executed"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn prediction(dir: &Path, qid: &str, id: &str) -> (Prediction, Vec<Command>) {
        let file = dir.join(format!("{qid}_{id}.sh"));
        std::fs::write(&file, "").unwrap();
        (
            Prediction {
                id: id.to_string(),
                qid: qid.to_string(),
                lang: "Python".to_string(),
                code: String::new(),
                file_path: file,
                entry_fn_name: None,
                entry_cls_name: None,
            },
            vec![Command::with_timeout(
                vec![
                    "sh".to_string(),
                    "-c".to_string(),
                    format!("echo TEST-{id}...PASSED"),
                ],
                5,
            )],
        )
    }

    #[test]
    fn runs_a_batch_and_journals_every_result() {
        let _guard = crate::gate::env_guard();
        std::env::set_var(crate::gate::ALLOW_EXECUTION_VAR, "true");

        let work = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let predictions: Vec<_> = (0..8)
            .map(|i| prediction(work.path(), "q1", &i.to_string()))
            .collect();

        let config = ExecutionConfig {
            num_workers: 4,
            update_freq: 2,
        };
        let stats =
            execute_predictions(predictions, "Python", out.path(), &config).unwrap();
        std::env::remove_var(crate::gate::ALLOW_EXECUTION_VAR);

        assert_eq!(stats.completed, 8);
        assert_eq!(stats.had_error, 0);

        let journal =
            std::fs::read_to_string(out.path().join(execution_results_file("Python"))).unwrap();
        assert_eq!(journal.lines().count(), 8);
        // Every line parses back into a result.
        for line in journal.lines() {
            let parsed: ExecutionResult = serde_json::from_str(line).unwrap();
            assert_eq!(parsed.prediction.qid, "q1");
        }
        let tracking =
            std::fs::read_to_string(out.path().join(runtime_tracking_file("Python"))).unwrap();
        assert!(!tracking.is_empty());
    }

    #[test]
    fn missing_files_are_skipped() {
        let _guard = crate::gate::env_guard();
        std::env::set_var(crate::gate::ALLOW_EXECUTION_VAR, "true");
        let out = tempfile::tempdir().unwrap();
        let pred = Prediction {
            id: "0".to_string(),
            qid: "q".to_string(),
            lang: "Python".to_string(),
            code: String::new(),
            file_path: PathBuf::from("/nonexistent/q_0.py"),
            entry_fn_name: None,
            entry_cls_name: None,
        };
        let stats = execute_predictions(
            vec![(pred, vec![Command::new(["true"])])],
            "Python",
            out.path(),
            &ExecutionConfig::default(),
        )
        .unwrap();
        std::env::remove_var(crate::gate::ALLOW_EXECUTION_VAR);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.skipped_missing_file, 1);
    }
}

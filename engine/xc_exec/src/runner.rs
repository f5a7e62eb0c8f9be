//! Per-prediction command execution.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command as OsCommand, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;
use xc_data::{Command, ExecutionResult, Prediction};

use crate::error::ExecError;
use crate::gate::ensure_execution_allowed;
use crate::limits::{peak_rss_bytes, renice};

/// Grace added on top of a command's own timeout before the child is killed.
const TIMEOUT_BUFFER: Duration = Duration::from_millis(5);

/// How often the monitor loop polls the child.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Everything captured from one command.
#[derive(Debug)]
pub struct CommandOutcome {
    pub return_code: i32,
    pub runtime_ms: u64,
    pub peak_rss_bytes: Option<u64>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

/// Run one command with `cwd`, under its wall-clock timeout.
///
/// The child runs at niceness 19 in its own process group; on timeout the
/// whole group is killed. Peak RSS is sampled on every poll tick (bytes;
/// a lower bound only on platforms without a kernel high-water mark).
pub fn run_command(command: &Command, cwd: &Path) -> std::io::Result<CommandOutcome> {
    let Some((program, args)) = command.args.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty command",
        ));
    };

    let mut os_command = OsCommand::new(program);
    os_command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // Own process group, so a timeout kill reaps grandchildren too.
        os_command.process_group(0);
    }

    let start = Instant::now();
    let mut child = os_command.spawn()?;
    renice(child.id());

    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let deadline = Duration::from_secs(command.timeout_secs) + TIMEOUT_BUFFER;
    let mut peak_rss = peak_rss_bytes(child.id());
    let mut timed_out = false;
    let return_code = loop {
        if let Some(status) = child.try_wait()? {
            break status.code().unwrap_or(-1);
        }
        if let Some(sample) = peak_rss_bytes(child.id()) {
            peak_rss = Some(peak_rss.map_or(sample, |prev| prev.max(sample)));
        }
        if start.elapsed() > deadline {
            timed_out = true;
            kill_process_group(&mut child);
            child.wait()?;
            break -1;
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let runtime_ms = if timed_out {
        command.timeout_secs * 1000
    } else {
        start.elapsed().as_millis() as u64
    };

    Ok(CommandOutcome {
        return_code,
        runtime_ms,
        peak_rss_bytes: peak_rss,
        stdout: join_reader(stdout_reader),
        stderr: join_reader(stderr_reader),
        timed_out,
    })
}

/// Run a prediction's full command sequence and assemble the journal record.
///
/// Commands run in order; a non-zero exit stops the sequence with
/// `had_error`, a timeout stops it with `timed_out`. Only the stdout/stderr
/// of the last command that ran are kept. Timeouts deliberately report exit
/// status 0 so classification lands on the timeout, not on a phantom error.
pub fn execute_prediction(
    prediction: &Prediction,
    commands: Vec<Command>,
) -> Result<ExecutionResult, ExecError> {
    ensure_execution_allowed()?;

    let cwd = prediction
        .file_path
        .parent()
        .map_or_else(|| prediction.file_path.clone(), Path::to_path_buf);

    debug!(key = %prediction.key(), n_commands = commands.len(), "executing prediction");

    let mut runtimes: Vec<Option<u64>> = vec![None; commands.len()];
    let mut memory: Vec<Option<u64>> = vec![None; commands.len()];
    let mut stdout = String::new();
    let mut stderr = String::new();
    let mut return_code = -1;
    let mut had_error = false;
    let start = Instant::now();

    for (i, command) in commands.iter().enumerate() {
        let outcome = match run_command(command, &cwd) {
            Ok(outcome) => outcome,
            Err(e) => {
                // Spawn failure (missing toolchain, bad cwd): surface as an
                // ordinary error result rather than crashing the worker.
                runtimes[i] = Some(0);
                return Ok(ExecutionResult::new(
                    prediction.clone(),
                    commands.clone(),
                    String::new(),
                    e.to_string(),
                    127,
                    Some(start.elapsed().as_millis() as u64),
                    i as i64,
                    runtimes,
                    memory,
                    true,
                    false,
                ));
            }
        };

        runtimes[i] = Some(outcome.runtime_ms);
        memory[i] = outcome.peak_rss_bytes;

        if outcome.timed_out {
            return Ok(ExecutionResult::new(
                prediction.clone(),
                commands.clone(),
                String::new(),
                String::new(),
                0,
                Some(runtimes.iter().flatten().sum()),
                i as i64,
                runtimes,
                memory,
                false,
                true,
            ));
        }

        stdout = outcome.stdout;
        stderr = outcome.stderr;
        return_code = outcome.return_code;
        if return_code != 0 {
            had_error = true;
            let last = i as i64;
            return Ok(ExecutionResult::new(
                prediction.clone(),
                commands.clone(),
                stdout,
                stderr,
                return_code,
                Some(start.elapsed().as_millis() as u64),
                last,
                runtimes,
                memory,
                had_error,
                false,
            ));
        }
    }

    let last = commands.len() as i64 - 1;
    Ok(ExecutionResult::new(
        prediction.clone(),
        commands,
        stdout,
        stderr,
        return_code,
        Some(start.elapsed().as_millis() as u64),
        last,
        runtimes,
        memory,
        had_error,
        false,
    ))
}

/// Read a pipe to the end on a separate thread, so a chatty child can never
/// deadlock against the monitor loop.
fn drain<R: Read + Send + 'static>(
    source: Option<R>,
) -> Option<std::thread::JoinHandle<Vec<u8>>> {
    source.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn join_reader(reader: Option<std::thread::JoinHandle<Vec<u8>>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    {
        // SAFETY: kill(2) with a negative pid signals the process group; the
        // group exists because the child was spawned with process_group(0).
        unsafe {
            libc::kill(-(child.id() as libc::pid_t), libc::SIGKILL);
        }
    }
    let _ = child.kill();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sh(script: &str, timeout_secs: u64) -> Command {
        Command::with_timeout(["sh", "-c", script], timeout_secs)
    }

    fn prediction(dir: &Path) -> Prediction {
        Prediction {
            id: "0".to_string(),
            qid: "q".to_string(),
            lang: "Python".to_string(),
            code: String::new(),
            file_path: dir.join("q_0.py"),
            entry_fn_name: None,
            entry_cls_name: None,
        }
    }

    fn with_gate<T>(f: impl FnOnce() -> T) -> T {
        let _guard = crate::gate::env_guard();
        std::env::set_var(crate::gate::ALLOW_EXECUTION_VAR, "true");
        let out = f();
        std::env::remove_var(crate::gate::ALLOW_EXECUTION_VAR);
        out
    }

    #[test]
    fn captures_stdout_and_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = run_command(&sh("echo hello; exit 3", 5), tmp.path()).unwrap();
        assert_eq!(outcome.stdout.trim(), "hello");
        assert_eq!(outcome.return_code, 3);
        assert!(!outcome.timed_out);
    }

    #[test]
    fn kills_on_timeout() {
        let tmp = tempfile::tempdir().unwrap();
        let start = Instant::now();
        let outcome = run_command(&sh("sleep 30", 1), tmp.path()).unwrap();
        assert!(outcome.timed_out);
        assert_eq!(outcome.runtime_ms, 1000);
        // Killed promptly, not after the full sleep.
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn prediction_stops_after_failing_command() {
        let tmp = tempfile::tempdir().unwrap();
        let pred = prediction(tmp.path());
        let commands = vec![sh("exit 1", 5), sh("echo never", 5)];
        let result = with_gate(|| execute_prediction(&pred, commands)).unwrap();
        assert!(result.had_error);
        assert_eq!(result.last_ran_command_idx, 0);
        assert!(!result.all_commands_ran);
        assert_eq!(result.command_runtimes_ms[1], None);
    }

    #[test]
    fn prediction_timeout_reports_clean_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let pred = prediction(tmp.path());
        let result = with_gate(|| execute_prediction(&pred, vec![sh("sleep 30", 1)])).unwrap();
        assert!(result.timed_out);
        assert_eq!(result.return_code, 0);
        assert_eq!(result.stdout, "");
        assert_eq!(result.command_runtimes_ms[0], Some(1000));
    }

    #[test]
    fn prediction_success_keeps_last_output() {
        let tmp = tempfile::tempdir().unwrap();
        let pred = prediction(tmp.path());
        let commands = vec![sh("echo compile-noise", 5), sh("echo TEST-0...PASSED", 5)];
        let result = with_gate(|| execute_prediction(&pred, commands)).unwrap();
        assert!(!result.had_error);
        assert!(result.all_commands_ran);
        assert_eq!(result.stdout.trim(), "TEST-0...PASSED");
    }

    #[test]
    fn missing_program_becomes_error_result() {
        let tmp = tempfile::tempdir().unwrap();
        let pred = prediction(tmp.path());
        let commands = vec![Command::new(["definitely-not-a-real-binary-xyz"])];
        let result = with_gate(|| execute_prediction(&pred, commands)).unwrap();
        assert!(result.had_error);
        assert_eq!(result.return_code, 127);
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn gate_blocks_execution() {
        let tmp = tempfile::tempdir().unwrap();
        let _guard = crate::gate::env_guard();
        std::env::remove_var(crate::gate::ALLOW_EXECUTION_VAR);
        let pred = Prediction {
            file_path: PathBuf::from(tmp.path()),
            ..prediction(tmp.path())
        };
        assert!(matches!(
            execute_prediction(&pred, vec![sh("true", 1)]),
            Err(ExecError::SafetyGate)
        ));
    }
}

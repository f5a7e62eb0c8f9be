//! The result writer thread.
//!
//! Owns the two append-only journal files exclusively and flushes after
//! every record, so a crash anywhere else in the process loses at most the
//! record in flight.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crossbeam::channel::Receiver;
use serde_json::Value;
use tracing::debug;

/// Messages accepted by the writer.
pub(crate) enum WriterMsg {
    /// One serialized `ExecutionResult`.
    Execution(Value),
    /// One batch-metrics record.
    Runtime(Value),
    /// Poison pill; the writer closes its files and exits.
    Shutdown,
}

pub(crate) fn spawn_writer(
    rx: Receiver<WriterMsg>,
    execution_path: PathBuf,
    runtime_path: PathBuf,
) -> std::thread::JoinHandle<std::io::Result<()>> {
    std::thread::spawn(move || {
        let mut execution_file = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&execution_path)?,
        );
        let mut runtime_file = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&runtime_path)?,
        );

        let mut written = 0_u64;
        loop {
            match rx.recv() {
                Ok(WriterMsg::Execution(record)) => {
                    serde_json::to_writer(&mut execution_file, &record)?;
                    execution_file.write_all(b"\n")?;
                    execution_file.flush()?;
                    written += 1;
                    if written % 1000 == 0 {
                        debug!(written, "journalled records");
                    }
                }
                Ok(WriterMsg::Runtime(record)) => {
                    serde_json::to_writer(&mut runtime_file, &record)?;
                    runtime_file.write_all(b"\n")?;
                    runtime_file.flush()?;
                }
                Ok(WriterMsg::Shutdown) | Err(_) => break,
            }
        }
        execution_file.flush()?;
        runtime_file.flush()?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::unbounded;
    use serde_json::json;

    #[test]
    fn writes_and_flushes_each_record() {
        let tmp = tempfile::tempdir().unwrap();
        let exec_path = tmp.path().join("exec.jsonl");
        let runtime_path = tmp.path().join("runtime.jsonl");
        let (tx, rx) = unbounded();
        let handle = spawn_writer(rx, exec_path.clone(), runtime_path.clone());

        tx.send(WriterMsg::Execution(json!({"qid": "1"}))).unwrap();
        tx.send(WriterMsg::Runtime(json!({"completed": 1}))).unwrap();
        tx.send(WriterMsg::Shutdown).unwrap();
        handle.join().unwrap().unwrap();

        let exec = std::fs::read_to_string(&exec_path).unwrap();
        assert_eq!(exec, "{\"qid\":\"1\"}\n");
        let runtime = std::fs::read_to_string(&runtime_path).unwrap();
        assert!(runtime.contains("\"completed\":1"));
    }

    #[test]
    fn dropping_the_sender_is_a_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let (tx, rx) = unbounded();
        let handle = spawn_writer(
            rx,
            tmp.path().join("exec.jsonl"),
            tmp.path().join("runtime.jsonl"),
        );
        drop(tx);
        handle.join().unwrap().unwrap();
    }
}

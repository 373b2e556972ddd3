//! Parallel linting of many files.
//!
//! Workers pull `(index, path)` jobs from a shared channel and send
//! results back tagged with the same index; the caller gets them in
//! input order no matter which worker finished first.

use std::fs;
use std::path::PathBuf;

use crossbeam::channel;
use linter::{analyze_bytes, Analysis};

use crate::error::{CliError, CliResult};
use crate::settings::Settings;

/// Result of linting one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path as given or discovered
    pub path: PathBuf,
    /// Diagnostics and binding summary
    pub analysis: Analysis,
}

/// Worker count for `jobs` requested threads and `files` inputs.
pub fn worker_count(jobs: Option<usize>, files: usize) -> usize {
    let wanted = match jobs {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
    };
    wanted.min(files).max(1)
}

fn lint_file(path: &PathBuf, settings: &Settings) -> CliResult<Analysis> {
    let bytes = fs::read(path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let analysis = analyze_bytes(&bytes, &settings.config, &settings.known);
    tracing::trace!(path = %path.display(), diagnostics = analysis.diagnostics.len(), "linted");
    Ok(analysis)
}

/// Lint every file on `workers` threads.
///
/// Fails with the first unreadable file in input order.
pub fn lint_files(files: &[PathBuf], settings: &Settings, workers: usize) -> CliResult<Vec<FileReport>> {
    let (job_tx, job_rx) = channel::unbounded::<(usize, &PathBuf)>();
    let (result_tx, result_rx) = channel::unbounded();

    for job in files.iter().enumerate() {
        // receiver is alive until the scope below ends
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    tracing::debug!(files = files.len(), workers, "starting lint workers");

    crossbeam::thread::scope(|s| {
        for id in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move |_| {
                for (index, path) in job_rx.iter() {
                    let outcome = lint_file(path, settings);
                    if result_tx.send((index, outcome)).is_err() {
                        break;
                    }
                }
                tracing::trace!(worker = id, "worker done");
            });
        }
    })
    .map_err(|_| CliError::WorkerPanicked)?;
    drop(result_tx);

    let mut slots: Vec<Option<CliResult<Analysis>>> = files.iter().map(|_| None).collect();
    for (index, outcome) in result_rx.iter() {
        slots[index] = Some(outcome);
    }

    files
        .iter()
        .zip(slots)
        .map(|(path, slot)| {
            let analysis = slot.ok_or(CliError::WorkerPanicked)??;
            Ok(FileReport {
                path: path.clone(),
                analysis,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_count_bounds() {
        assert_eq!(worker_count(Some(8), 3), 3);
        assert_eq!(worker_count(Some(2), 10), 2);
        assert_eq!(worker_count(Some(4), 0), 1);
        assert!(worker_count(None, 100) >= 1);
    }

    #[test]
    fn test_results_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..12)
            .map(|i| {
                let path = dir.path().join(format!("f{:02}.js", i));
                let body = if i % 3 == 0 { "a = 1\n" } else { "var a = 1;\n" };
                fs::write(&path, body).unwrap();
                path
            })
            .collect();

        let reports = lint_files(&files, &Settings::default(), 4).unwrap();

        assert_eq!(reports.len(), 12);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.path, files[i]);
            let expected: Vec<&str> = if i % 3 == 0 { vec!["W033"] } else { vec![] };
            assert_eq!(report.analysis.codes(), expected);
        }
    }

    #[test]
    fn test_unreadable_file_fails() {
        let missing = vec![PathBuf::from("/no/such/file.js")];
        let result = lint_files(&missing, &Settings::default(), 1);
        assert!(matches!(result, Err(CliError::Io { .. })));
    }
}

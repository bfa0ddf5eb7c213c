//! Subprocess execution for lifecycle actions
//!
//! Only success or failure is reported; the child's output is never parsed.

use crate::{OutputMode, ProcessFinished, ProcessSpec};
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::mpsc;

/// Run a lifecycle command to completion
pub async fn run(spec: &ProcessSpec) -> ProcessFinished {
    tracing::info!("{} {}: {}", spec.verb.progressive(), spec.session, spec.command_line());

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    let result = match spec.output {
        OutputMode::Inherit => cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map(|status| (status, String::new())),
        OutputMode::Discard => cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map(|out| (out.status, String::from_utf8_lossy(&out.stderr).to_string())),
    };

    let finished = match result {
        Ok((status, _)) if status.success() => ProcessFinished::success(spec),
        Ok((status, stderr)) => {
            let detail = stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} exited with {}", spec.program, status));
            ProcessFinished::failure(spec, detail)
        }
        Err(e) => ProcessFinished::failure(spec, format!("failed to run {}: {}", spec.program, e)),
    };

    match &finished.error {
        None => tracing::info!("{} {} finished", spec.verb, spec.session),
        Some(e) => tracing::warn!("{} {} failed: {}", spec.verb, spec.session, e),
    }
    finished
}

/// Run a lifecycle command on a background task, reporting on `tx`
pub fn spawn_detached(
    spec: ProcessSpec,
    tx: mpsc::UnboundedSender<ProcessFinished>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let finished = run(&spec).await;
        // The receiver is gone only when the dashboard is shutting down
        let _ = tx.send(finished);
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::{LifecycleController, LifecycleVerb};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Fake distrobox that appends its arguments to a log next to it
    fn fake_wrapper(dir: &Path, body: &str) -> String {
        let path = dir.join("distrobox");
        let log = dir.join("calls.log");
        std::fs::write(
            &path,
            format!("#!/bin/sh\necho \"$*\" >> '{}'\n{}\n", log.display(), body),
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    fn calls(dir: &Path) -> String {
        std::fs::read_to_string(dir.join("calls.log")).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_run_success() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(tmp.path(), "exit 0"));

        let deferred = ctl.stop("devbox");
        let finished = run(deferred.process().unwrap()).await;

        assert!(finished.is_success());
        assert_eq!(finished.verb, LifecycleVerb::Stop);
        assert_eq!(calls(tmp.path()).trim(), "stop devbox --yes");
    }

    #[tokio::test]
    async fn test_run_enter_in_foreground() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(tmp.path(), "exit 0"));

        let deferred = ctl.enter("devbox");
        let spec = deferred.process().unwrap();
        assert_eq!(spec.output, OutputMode::Inherit);

        let finished = run(spec).await;
        assert!(finished.is_success());
        assert_eq!(finished.verb, LifecycleVerb::Enter);
        assert_eq!(calls(tmp.path()).trim(), "enter devbox");
    }

    #[tokio::test]
    async fn test_run_enter_failure_has_exit_status() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(tmp.path(), "exit 2"));

        let deferred = ctl.enter("devbox");
        let finished = run(deferred.process().unwrap()).await;

        // inherited stderr is not captured, so only the status is known
        let error = finished.error.unwrap();
        assert!(error.contains("exited with"), "got: {}", error);
    }

    #[tokio::test]
    async fn test_run_failure_reports_last_stderr_line() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(
            tmp.path(),
            "echo 'working' >&2; echo 'Error: no such container' >&2; exit 1",
        ));

        let deferred = ctl.remove("ghost");
        let finished = run(deferred.process().unwrap()).await;

        assert_eq!(finished.error.as_deref(), Some("Error: no such container"));
    }

    #[tokio::test]
    async fn test_run_failure_without_stderr() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(tmp.path(), "exit 3"));

        let deferred = ctl.stop("devbox");
        let finished = run(deferred.process().unwrap()).await;

        let error = finished.error.unwrap();
        assert!(error.contains("exited with"), "got: {}", error);
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let ctl = LifecycleController::new("/nonexistent/boxdeck/distrobox");
        let deferred = ctl.stop("devbox");
        let finished = run(deferred.process().unwrap()).await;

        assert!(finished.error.unwrap().starts_with("failed to run"));
    }

    #[tokio::test]
    async fn test_spawn_detached_reports_on_channel() {
        let tmp = TempDir::new().unwrap();
        let ctl = LifecycleController::new(fake_wrapper(tmp.path(), "exit 0"));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let deferred = ctl.remove("devbox");
        let spec = deferred.process().unwrap().clone();
        spawn_detached(spec, tx).await.unwrap();

        let finished = rx.recv().await.unwrap();
        assert_eq!(finished.session, "devbox");
        assert!(finished.is_success());
        assert_eq!(calls(tmp.path()).trim(), "rm devbox --force");
    }
}

//! Blocking viewer session around a written plot

use anyhow::{Context, Result};
use std::future::Future;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::surface::ViewerOutcome;

/// Ask the desktop to open `path` with its default application
pub fn open_in_browser(path: &Path) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    let mut launcher = command
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {} in a browser", path.display()))?;

    // Launchers usually hand off and exit at once; reap it if so. One still
    // running is left detached and outlives the viewer.
    if let Ok(Some(status)) = launcher.try_wait()
        && !status.success()
    {
        eprintln!("Warning: browser launcher exited with {}", status);
    }

    Ok(())
}

/// Block until the user presses Enter or interrupts with Ctrl-C
///
/// End of input on stdin counts as dismissal, so non-interactive runs
/// return straight away.
pub fn wait_for_dismissal() -> Result<ViewerOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start viewer runtime")?;

    let outcome = runtime.block_on(async {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let mut line = String::new();
        race_viewer(tokio::signal::ctrl_c(), stdin.read_line(&mut line)).await
    });

    // the stdin reader sits on a blocking thread that will not return on its own
    runtime.shutdown_background();
    outcome
}

/// Resolve with whichever of `cancel` and `dismiss` finishes first.
/// A cancel that is ready at the same time as a dismissal wins.
async fn race_viewer<C, D>(cancel: C, dismiss: D) -> Result<ViewerOutcome>
where
    C: Future<Output = io::Result<()>>,
    D: Future<Output = io::Result<usize>>,
{
    tokio::select! {
        biased;
        signal = cancel => {
            signal.context("Failed to listen for Ctrl-C")?;
            Ok(ViewerOutcome::Cancelled)
        }
        read = dismiss => {
            read.context("Failed to read from stdin")?;
            Ok(ViewerOutcome::Dismissed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::{pending, ready};

    #[tokio::test]
    async fn test_interrupt_cancels_viewer() {
        let outcome = race_viewer(ready(Ok(())), pending()).await.unwrap();
        assert_eq!(outcome, ViewerOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_enter_dismisses_viewer() {
        let outcome = race_viewer(pending(), ready(Ok(1))).await.unwrap();
        assert_eq!(outcome, ViewerOutcome::Dismissed);
    }

    #[tokio::test]
    async fn test_end_of_input_dismisses_viewer() {
        let outcome = race_viewer(pending(), ready(Ok(0))).await.unwrap();
        assert_eq!(outcome, ViewerOutcome::Dismissed);
    }

    #[tokio::test]
    async fn test_interrupt_wins_over_simultaneous_enter() {
        let outcome = race_viewer(ready(Ok(())), ready(Ok(1))).await.unwrap();
        assert_eq!(outcome, ViewerOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_signal_failure_is_an_error() {
        let failed = ready(Err(io::Error::other("no signal handler")));
        let err = race_viewer(failed, pending()).await.unwrap_err();
        assert!(err.to_string().contains("Ctrl-C"));
    }
}

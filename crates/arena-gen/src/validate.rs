//! Headless-browser validation of generated artifacts.
//!
//! An artifact is loaded from a `file://` URL in headless Chrome with
//! console logging routed to stderr. Two defect categories are
//! collected in first-seen order: error-level console messages, and
//! uncaught script exceptions (Chrome reports both as `ERROR:CONSOLE`
//! lines; uncaught exceptions carry an `Uncaught` message prefix). The
//! page gets a 30-second idle budget plus a 2-second settle delay to
//! surface late asynchronous failures.
//!
//! Headless Chrome is an optional capability. When no browser binary
//! can be found the validator reports [`ValidationOutcome::Unavailable`]
//! and callers explicitly fail open — the degradation is logged, never
//! disguised as a real pass.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

/// How long the page gets to go network- and script-idle.
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra delay after idleness to catch late asynchronous failures.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Wall-clock grace beyond the virtual-time budget before a wedged
/// browser process is killed.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// Browser binaries probed on `PATH`, in order.
const BROWSER_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

/// Environment variable overriding browser discovery with an explicit path.
const BROWSER_ENV: &str = "ARENA_CHROME";

/// Marker distinguishing error-level console lines in Chrome's stderr log.
const CONSOLE_ERROR_MARKER: &str = ":ERROR:CONSOLE";

/// Outcome of loading one artifact headlessly.
///
/// Recomputed on every check; never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Error strings in first-seen order. Empty means the load was clean.
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn clean() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn with_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// What a validator call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The artifact was actually loaded and checked.
    Checked(ValidationResult),
    /// The headless-browser capability is missing; the caller decides
    /// what that means (this orchestrator fails open, loudly).
    Unavailable,
}

/// Validation seam; tests inject deterministic stubs.
#[async_trait]
pub trait ArtifactValidator: Send + Sync {
    async fn check(&self, artifact: &Path) -> ValidationOutcome;
}

/// Validator backed by a headless Chrome/Chromium subprocess.
#[derive(Debug, Clone)]
pub struct HeadlessChrome {
    browser: PathBuf,
}

impl HeadlessChrome {
    /// Probe for a usable browser binary.
    ///
    /// `ARENA_CHROME` takes precedence; otherwise the candidate names
    /// are searched on `PATH`. `None` means the capability is absent in
    /// this environment.
    pub fn discover() -> Option<Self> {
        let browser = discover_browser(
            std::env::var_os(BROWSER_ENV).map(PathBuf::from),
            std::env::var_os("PATH"),
        )?;
        debug!(browser = %browser.display(), "headless browser found");
        Some(Self { browser })
    }

    /// Build a validator around a known browser binary.
    pub fn with_browser(browser: impl Into<PathBuf>) -> Self {
        Self {
            browser: browser.into(),
        }
    }

    async fn load_and_collect(&self, artifact: &Path) -> std::io::Result<Vec<String>> {
        let url = file_url(artifact);
        let budget_ms = (IDLE_TIMEOUT + SETTLE_DELAY).as_millis();

        let mut cmd = Command::new(&self.browser);
        cmd.arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--enable-logging=stderr")
            .arg("--v=1")
            .arg(format!("--virtual-time-budget={budget_ms}"))
            .arg("--dump-dom")
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("no stderr handle on browser process"))?;

        let mut lines = BufReader::new(stderr).lines();
        let mut errors = Vec::new();

        // The virtual-time budget makes the browser exit on its own;
        // the wall-clock deadline only bounds a wedged process.
        let deadline = tokio::time::sleep(IDLE_TIMEOUT + SETTLE_DELAY + KILL_GRACE);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if let Some(message) = console_error(&line) {
                            errors.push(message);
                        }
                    }
                    None => break,
                },
                _ = &mut deadline => {
                    warn!(url = %url, "browser exceeded wall-clock budget; killing");
                    let _ = child.start_kill();
                    break;
                }
            }
        }

        let _ = child.wait().await;
        Ok(errors)
    }
}

#[async_trait]
impl ArtifactValidator for HeadlessChrome {
    async fn check(&self, artifact: &Path) -> ValidationOutcome {
        match self.load_and_collect(artifact).await {
            Ok(errors) => {
                debug!(
                    artifact = %artifact.display(),
                    defects = errors.len(),
                    "headless check finished"
                );
                ValidationOutcome::Checked(ValidationResult::with_errors(errors))
            }
            Err(error) => {
                // A browser that was found but cannot run is the same
                // degradation as one that was never found.
                warn!(
                    browser = %self.browser.display(),
                    error = %error,
                    "headless browser failed to run; validation unavailable"
                );
                ValidationOutcome::Unavailable
            }
        }
    }
}

/// Validator used when no browser exists: every check is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBrowser;

#[async_trait]
impl ArtifactValidator for NoBrowser {
    async fn check(&self, _artifact: &Path) -> ValidationOutcome {
        ValidationOutcome::Unavailable
    }
}

fn discover_browser(
    explicit: Option<PathBuf>,
    path_var: Option<std::ffi::OsString>,
) -> Option<PathBuf> {
    if let Some(explicit) = explicit {
        if explicit.is_file() {
            return Some(explicit);
        }
        warn!(path = %explicit.display(), "{BROWSER_ENV} does not point at a file; ignoring");
    }

    let path_var = path_var?;
    for dir in std::env::split_paths(&path_var) {
        for candidate in BROWSER_CANDIDATES {
            let full = dir.join(candidate);
            if full.is_file() {
                return Some(full);
            }
        }
    }
    None
}

/// Local-file URL for the artifact. Sandbox paths are plain ASCII, so
/// no percent-encoding is needed.
fn file_url(artifact: &Path) -> String {
    let absolute = artifact
        .canonicalize()
        .unwrap_or_else(|_| artifact.to_path_buf());
    format!("file://{}", absolute.display())
}

/// Extract the message from an error-level console line, if this is one.
///
/// Chrome's stderr format:
/// `[pid:tid:0131/123456.789:ERROR:CONSOLE(12)] "Uncaught ReferenceError: x", source: file:///... (12)`
fn console_error(line: &str) -> Option<String> {
    if !line.contains(CONSOLE_ERROR_MARKER) {
        return None;
    }

    // Drop the log header, then the quotes and trailing source location.
    let body = line.split_once(")] ").map(|(_, rest)| rest).unwrap_or(line);
    let message = body
        .strip_prefix('"')
        .and_then(|rest| rest.rsplit_once("\", source:"))
        .map(|(message, _)| message)
        .unwrap_or(body);
    Some(message.to_string())
}

//! Ephemeral per-task working directories for vendor CLI runs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

const SANDBOX_PREFIX: &str = "arena-gen-";
const OUTPUT_DIR: &str = "output";
const ARTIFACT_FILE: &str = "index.html";

/// Isolated working directory owned by exactly one task.
///
/// The directory lives under the system temp root with a randomly
/// suffixed name, so concurrently created sandboxes never collide and
/// no shared source tree is ever touched. A fresh git repository is
/// initialized inside it because the vendor CLIs refuse to operate
/// outside a VCS root; nothing is ever committed. Retries reuse the
/// same sandbox, so partial state from the first attempt remains
/// visible to the repair attempt.
#[derive(Debug)]
pub struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    /// Create a sandbox with the fixed `output/` subdirectory and a git
    /// repository at its root.
    pub async fn create() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(SANDBOX_PREFIX).tempdir()?;
        std::fs::create_dir_all(dir.path().join(OUTPUT_DIR))?;

        let status = Command::new("git")
            .args(["init", "--quiet"])
            .current_dir(dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        if !status.success() {
            return Err(std::io::Error::other(format!(
                "git init failed in sandbox '{}'",
                dir.path().display()
            )));
        }

        debug!(path = %dir.path().display(), "sandbox created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The fixed relative output location the vendor CLI is instructed
    /// to write to. The sandbox never inspects the file's contents.
    pub fn artifact_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_DIR).join(ARTIFACT_FILE)
    }

    /// Recursively remove the sandbox.
    ///
    /// Removal failures are logged and never escalated; a leaked temp
    /// directory must not turn a finished task into a failed one.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(error) = self.dir.close() {
            warn!(path = %path.display(), error = %error, "failed to remove sandbox");
        } else {
            debug!(path = %path.display(), "sandbox removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sandbox_has_output_dir_and_git_root() {
        let sandbox = Sandbox::create().await.unwrap();
        assert!(sandbox.path().join(OUTPUT_DIR).is_dir());
        assert!(sandbox.path().join(".git").is_dir());
        assert_eq!(
            sandbox.artifact_path(),
            sandbox.path().join("output/index.html")
        );
        sandbox.cleanup();
    }

    #[tokio::test]
    async fn concurrently_created_sandboxes_never_share_a_path() {
        let (a, b, c) = tokio::join!(Sandbox::create(), Sandbox::create(), Sandbox::create());
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
        assert_ne!(a.path(), b.path());
        assert_ne!(a.path(), c.path());
        assert_ne!(b.path(), c.path());
        a.cleanup();
        b.cleanup();
        c.cleanup();
    }

    #[tokio::test]
    async fn cleanup_removes_the_directory_and_its_contents() {
        let sandbox = Sandbox::create().await.unwrap();
        let path = sandbox.path().to_path_buf();
        std::fs::write(sandbox.artifact_path(), "<html></html>").unwrap();
        sandbox.cleanup();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn sandbox_name_carries_the_run_prefix() {
        let sandbox = Sandbox::create().await.unwrap();
        let name = sandbox
            .path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .to_string();
        assert!(name.starts_with(SANDBOX_PREFIX));
        sandbox.cleanup();
    }
}

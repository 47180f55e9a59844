use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio::time::timeout;

const DEFAULT_SHELL: &str = "bash";

/// How long a command may take to produce its single output line before the
/// read is abandoned and the subprocess discarded.
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// A long-lived interactive interpreter subprocess with strict
/// request/response semantics: one command line in, one output line back.
///
/// Commands are serialized through an internal mutex, so a shared
/// `Arc<ShellSession>` is safe to use from multiple tasks; at most one
/// command is ever in flight. The subprocess is spawned on first use and
/// killed (best effort) when the session drops. Components that share the
/// session never terminate it themselves.
pub struct ShellSession {
    shell: String,
    read_timeout: Duration,
    inner: Mutex<Option<SessionInner>>,
}

struct SessionInner {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl ShellSession {
    pub fn new() -> Self {
        Self::with_shell(DEFAULT_SHELL)
    }

    pub fn with_shell(shell: impl ToString) -> Self {
        Self {
            shell: shell.to_string(),
            read_timeout: DEFAULT_READ_TIMEOUT,
            inner: Mutex::new(None),
        }
    }

    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Writes `cmdline` to the interpreter and returns the first line it
    /// prints, verbatim.
    ///
    /// Every failure mode resolves to an empty string: spawn failure, a dead
    /// subprocess, a closed output stream, or a read timeout. A timed-out
    /// subprocess is killed and discarded, because a line arriving late
    /// would otherwise be paired with the next command; the following call
    /// respawns the interpreter.
    pub async fn run_command(&self, cmdline: &str) -> String {
        let mut guard = self.inner.lock().await;

        if guard.is_none() {
            match self.spawn() {
                Ok(inner) => *guard = Some(inner),
                Err(err) => {
                    tracing::warn!(shell = %self.shell, error = %err, "Failed to spawn shell session");
                    return String::new();
                }
            }
        }

        let Some(inner) = guard.as_mut() else {
            return String::new();
        };

        tracing::debug!(command = cmdline, "Issuing shell session command");

        let request = format!("{cmdline}\n");
        if let Err(err) = inner.stdin.write_all(request.as_bytes()).await {
            tracing::warn!(error = %err, "Shell session write failed");
            *guard = None;
            return String::new();
        }
        if let Err(err) = inner.stdin.flush().await {
            tracing::warn!(error = %err, "Shell session flush failed");
            *guard = None;
            return String::new();
        }

        match timeout(self.read_timeout, inner.stdout.next_line()).await {
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => {
                tracing::warn!(command = cmdline, "Shell session output stream closed");
                *guard = None;
                String::new()
            }
            Ok(Err(err)) => {
                tracing::warn!(command = cmdline, error = %err, "Shell session read failed");
                *guard = None;
                String::new()
            }
            Err(_) => {
                tracing::warn!(
                    command = cmdline,
                    timeout = ?self.read_timeout,
                    "Shell session read timed out"
                );
                if let Some(mut dead) = guard.take() {
                    let _ = dead.child.start_kill();
                }
                String::new()
            }
        }
    }

    fn spawn(&self) -> std::io::Result<SessionInner> {
        let mut child = Command::new(&self.shell)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| std::io::Error::other("shell stdin not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("shell stdout not piped"))?;

        Ok(SessionInner {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
        })
    }
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        // Best effort; kill failures are swallowed.
        if let Some(inner) = self.inner.get_mut().as_mut() {
            let _ = inner.child.start_kill();
        }
    }
}

use std::{io, process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::Command,
    task::JoinHandle,
    time::Instant,
};

use crate::{
    domain::{CommandRunner, Invocation, ProcessOutput},
    errors::{ShellError, ShellResult},
};

/// Runs invocations as child processes of this server
///
/// The child inherits the environment, reads from `/dev/null`, and has stdout
/// and stderr drained into separate buffers while it runs. On unix it leads its
/// own process group, and that group is killed once the command exits or its
/// time runs out, so nothing it started is left behind.
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation, timeout: Duration) -> ShellResult<ProcessOutput> {
        let program = invocation.program.clone();
        let deadline = Instant::now() + timeout;

        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(|source| ShellError::Spawn {
            command: program.clone(),
            source,
        })?;
        let pid = child.id();

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            kill_group(pid, &program);
            return Err(ShellError::Spawn {
                command: program,
                source: io::Error::other("output pipes were not captured"),
            });
        };

        tracing::debug!(program = %program, pid = ?pid, "spawned child process");

        let mut stdout = drain(stdout);
        let mut stderr = drain(stderr);

        let status = match tokio::time::timeout_at(deadline, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(source)) => {
                kill_group(pid, &program);
                stdout.abort();
                stderr.abort();
                return Err(ShellError::Io {
                    command: program,
                    source,
                });
            }
            Err(_) => {
                tracing::warn!(program = %program, ?timeout, "killing process group after timeout");
                kill_group(pid, &program);
                if let Err(e) = child.kill().await {
                    tracing::debug!(program = %program, error = %e, "kill after timeout failed");
                }
                stdout.abort();
                stderr.abort();
                return Err(ShellError::Timeout {
                    command: program,
                    timeout,
                });
            }
        };

        // Background processes still in the group would otherwise keep the
        // pipes open past the command's own exit
        kill_group(pid, &program);

        let collected = tokio::time::timeout_at(deadline, async {
            tokio::try_join!(collect(&mut stdout), collect(&mut stderr))
        })
        .await;

        match collected {
            Ok(Ok((out, err))) => Ok(ProcessOutput {
                exit_code: status.code(),
                stdout: String::from_utf8_lossy(&out).trim().to_string(),
                stderr: String::from_utf8_lossy(&err).trim().to_string(),
            }),
            Ok(Err(source)) => Err(ShellError::Io {
                command: program,
                source,
            }),
            Err(_) => {
                tracing::warn!(program = %program, ?timeout, "output still held open after timeout");
                stdout.abort();
                stderr.abort();
                Err(ShellError::Timeout {
                    command: program,
                    timeout,
                })
            }
        }
    }
}

fn drain<R>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).await?;
        Ok(buf)
    })
}

async fn collect(handle: &mut JoinHandle<io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle.await.map_err(io::Error::other)?
}

/// SIGKILL every process in the group led by `pid`
#[cfg(unix)]
fn kill_group(pid: Option<u32>, program: &str) {
    use nix::{
        sys::signal::{Signal, killpg},
        unistd::Pid,
    };

    let Some(pid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    if let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        tracing::trace!(program, pid, error = %e, "process group already gone");
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>, _program: &str) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;
    use tempfile::TempDir;

    fn invocation(dir: &TempDir, program: &str, args: &[&str]) -> Invocation {
        Invocation {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            cwd: dir.path().to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_captures_trimmed_output_and_exit_code() {
        let dir = TempDir::new().unwrap();
        let output = ProcessRunner::new()
            .run(
                &invocation(&dir, "sh", &["-c", "echo '  out  '; echo err >&2; exit 3"]),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
    }

    #[tokio::test]
    async fn test_runs_in_requested_directory() {
        let dir = TempDir::new().unwrap();
        let output = ProcessRunner::new()
            .run(&invocation(&dir, "pwd", &[]), Duration::from_secs(10))
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(
            std::path::Path::new(&output.stdout).canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let err = ProcessRunner::new()
            .run(
                &invocation(&dir, "definitely-not-a-real-binary-xyz", &[]),
                Duration::from_secs(10),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ShellError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process_and_discards_output() {
        let dir = TempDir::new().unwrap();
        let started = Instant::now();

        let err = ProcessRunner::new()
            .run(
                &invocation(&dir, "sh", &["-c", "echo partial; exec sleep 30"]),
                Duration::from_millis(300),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ShellError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_timeout_kills_background_children() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("marker");

        let err = ProcessRunner::new()
            .run(
                &invocation(&dir, "sh", &["-c", "(sleep 1; touch marker) & exec sleep 30"]),
                Duration::from_millis(200),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShellError::Timeout { .. }));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_exit_is_not_held_up_by_background_children() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let started = Instant::now();

        let output = ProcessRunner::new()
            .run(
                &invocation(&dir, "sh", &["-c", "(sleep 1; touch marker) & echo done"]),
                Duration::from_secs(10),
            )
            .await
            .unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout, "done");
        assert!(started.elapsed() < Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!marker.exists());
    }
}

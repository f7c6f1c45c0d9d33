// src/utils/process.rs
use std::io::{self, BufRead, BufReader};
use std::process::Stdio;
use async_trait::async_trait;
use os_pipe::PipeReader;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::core::CommandLine;

/// Status reported when a process has no exit code (killed by a signal)
pub const NO_EXIT_CODE: i32 = -1;

/// Starts external processes
#[cfg_attr(test, mockall::automock)]
pub trait Launcher: Send + Sync {
    fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn RunningProcess>>;
}

/// A started process: its merged output lines, then its exit status
#[async_trait]
pub trait RunningProcess: Send {
    /// Next output line including its newline, `None` once the output is exhausted
    async fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Block until the process exits
    async fn wait(&mut self) -> io::Result<i32>;
}

/// Launches real OS processes through tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, command: &CommandLine) -> io::Result<Box<dyn RunningProcess>> {
        debug!("Spawning: {}", command);

        // stdout and stderr share one pipe, so the child's write order is kept
        let (reader, writer) = os_pipe::pipe()?;
        let child = {
            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args)
                .stdin(Stdio::null())
                .stdout(writer.try_clone()?)
                .stderr(writer);
            cmd.spawn()?
            // `cmd` drops here, closing the parent's write ends so EOF can arrive
        };

        let (tx, rx) = mpsc::channel(64);
        tokio::task::spawn_blocking(move || pump_lines(reader, tx));

        Ok(Box::new(SystemProcess { child, lines: rx }))
    }
}

struct SystemProcess {
    child: Child,
    lines: mpsc::Receiver<io::Result<String>>,
}

#[async_trait]
impl RunningProcess for SystemProcess {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.lines.recv().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    async fn wait(&mut self) -> io::Result<i32> {
        // The pump stops on its next send and drops the read end, so a child
        // still writing gets EPIPE instead of blocking on a full pipe
        self.lines.close();
        let status = self.child.wait().await?;
        trace!(?status, "Process exited");
        Ok(status.code().unwrap_or(NO_EXIT_CODE))
    }
}

fn pump_lines(stream: PipeReader, tx: mpsc::Sender<io::Result<String>>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).into_owned();
                if tx.blocking_send(Ok(line)).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                let _ = tx.blocking_send(Err(e));
                break;
            }
        }
    }
}

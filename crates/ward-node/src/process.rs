// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-backed node: owns an OS child process, placed in its own
//! session/process-group so a graceful-then-forceful stop can reach every
//! descendant it spawns.

use crate::events::{ReadyEvent, ShutdownEvent};
use crate::node::{BoxFuture, Node, NodeHandle};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use ward_core::{ControlMessage, NodeError, Outcome};

/// A line emitted on stdout/stderr past this length is truncated, never
/// buffered in full — a runaway child must not grow supervisor memory.
const LOG_LINE_CAP: usize = 2000;

/// Declarative subprocess command. Immutable per `start` call; the same
/// value is reused across every restart of a given node.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommand {
    pub exe: PathBuf,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
}

impl ProcessCommand {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into(), args: Vec::new(), cwd: None, env: HashMap::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// A readiness or health probe a concrete process node can supply beyond
/// the default "the process started" check — e.g. a TCP connect to a
/// side-channel control port.
pub type Probe = Arc<dyn Fn() -> BoxFuture<'static, Outcome> + Send + Sync>;

struct Running {
    child: Child,
    stdout_task: JoinHandle<()>,
    stderr_task: JoinHandle<()>,
}

/// Concrete [`Node`] that spawns and supervises a single OS child process.
pub struct ProcessNode {
    name: String,
    command: ProcessCommand,
    extra_env: HashMap<String, String>,
    ready_probe: Option<Probe>,
    health_probe: Option<Probe>,
    ready_timeout: Duration,
    stop_timeout: Duration,
    kill_timeout: Duration,
    health_interval: Duration,
    health_fail_threshold: u32,
    // `wait_or_shutdown` takes `running` out of the mutex for the whole
    // duration of its wait, so `check()` cannot peek at the child through
    // it without racing that ownership transfer. Liveness is tracked here
    // instead: set once in `start`, cleared exactly where the process is
    // actually known to be gone (`kill_and_finish`, `drain_and_finish`, and
    // the pid-only fallback in `stop`).
    alive: AtomicBool,
    running: tokio::sync::Mutex<Option<Running>>,
}

impl ProcessNode {
    pub fn new(name: impl Into<String>, command: ProcessCommand) -> Self {
        Self {
            name: name.into(),
            command,
            extra_env: HashMap::new(),
            ready_probe: None,
            health_probe: None,
            ready_timeout: Duration::from_secs(20),
            stop_timeout: Duration::from_secs(15),
            kill_timeout: Duration::from_secs(5),
            health_interval: Duration::ZERO,
            health_fail_threshold: 3,
            alive: AtomicBool::new(false),
            running: tokio::sync::Mutex::new(None),
        }
    }

    pub fn with_extra_env(mut self, env: HashMap<String, String>) -> Self {
        self.extra_env = env;
        self
    }

    pub fn with_ready_probe(mut self, probe: Probe) -> Self {
        self.ready_probe = Some(probe);
        self
    }

    pub fn with_health_probe(mut self, probe: Probe) -> Self {
        self.health_probe = Some(probe);
        self
    }

    pub fn with_ready_timeout(mut self, d: Duration) -> Self {
        self.ready_timeout = d;
        self
    }

    pub fn with_stop_timeout(mut self, d: Duration) -> Self {
        self.stop_timeout = d;
        self
    }

    pub fn with_kill_timeout(mut self, d: Duration) -> Self {
        self.kill_timeout = d;
        self
    }

    pub fn with_health_interval(mut self, d: Duration) -> Self {
        self.health_interval = d;
        self
    }

    pub fn with_health_fail_threshold(mut self, n: u32) -> Self {
        self.health_fail_threshold = n;
        self
    }

    /// The command this node spawns, for introspection (e.g. tests
    /// confirming a configured override took effect).
    pub fn command(&self) -> &ProcessCommand {
        &self.command
    }

    /// Send SIGTERM to the process group, wait up to `stop_timeout`, escalate
    /// to SIGKILL and wait up to `kill_timeout`, then reap the drain tasks.
    /// Called with an owned `Running` so no lock is held across any await.
    async fn kill_and_finish(&self, mut running: Running, reason: &str) {
        let pid = running.child.id().map(|p| p as i32);
        if let Some(pid) = pid {
            #[cfg(unix)]
            signal_group(pid, nix::sys::signal::Signal::SIGTERM);
        }

        let exited = tokio::time::timeout(self.stop_timeout, running.child.wait()).await;
        if exited.is_err() {
            if let Some(pid) = pid {
                #[cfg(unix)]
                signal_group(pid, nix::sys::signal::Signal::SIGKILL);
            }
            if tokio::time::timeout(self.kill_timeout, running.child.wait()).await.is_err() {
                tracing::warn!(node = %self.name, reason, "proc.kill_timeout");
            }
        }

        running.stdout_task.abort();
        running.stderr_task.abort();
        let _ = running.stdout_task.await;
        let _ = running.stderr_task.await;
        self.alive.store(false, Ordering::SeqCst);
        tracing::info!(node = %self.name, reason, "proc.stopped");
    }

    /// The child already exited on its own; just reap the drain tasks.
    async fn drain_and_finish(&self, mut running: Running, reason: &str) {
        let _ = running.child.wait().await;
        running.stdout_task.abort();
        running.stderr_task.abort();
        let _ = running.stdout_task.await;
        let _ = running.stderr_task.await;
        self.alive.store(false, Ordering::SeqCst);
        tracing::debug!(node = %self.name, reason, "proc.reaped");
    }

    fn spawn_drainer(name: String, stream_name: &'static str, reader: impl tokio::io::AsyncRead + Unpin + Send + 'static) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = clamp_line(&line);
                        tracing::info!(node = %name, stream = stream_name, %line, "proc.output");
                    }
                    Ok(None) => break,
                    Err(err) => {
                        tracing::warn!(node = %name, stream = stream_name, error = %err, "proc.drain_error");
                        break;
                    }
                }
            }
        })
    }
}

fn clamp_line(line: &str) -> String {
    if line.chars().count() <= LOG_LINE_CAP {
        return line.to_string();
    }
    let truncated: String = line.chars().take(LOG_LINE_CAP).collect();
    format!("{truncated}…(truncated)")
}

#[cfg(unix)]
fn signal_group(pid: i32, signal: nix::sys::signal::Signal) {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    // A negative pid addresses the whole process group, per POSIX kill(2).
    if let Err(err) = kill(Pid::from_raw(-pid), signal) {
        tracing::debug!(pid, ?signal, error = %err, "proc.signal_failed");
    }
}

/// Signal 0 sends nothing but still reports ESRCH if the group is gone.
#[cfg(unix)]
fn process_group_alive(pid: i32) -> bool {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;
    kill(Pid::from_raw(-pid), None).is_ok()
}

/// Polls `process_group_alive` until the group is gone or `timeout`
/// elapses, returning as soon as it can rather than always blocking for
/// the full timeout — used by the `stop()` fallback path, which has no
/// `Child` handle left to `.wait()` on directly.
#[cfg(unix)]
async fn wait_for_group_exit(pid: i32, timeout: Duration) -> bool {
    const POLL_INTERVAL: Duration = Duration::from_millis(20);
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if !process_group_alive(pid) {
            return true;
        }
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            return false;
        }
        tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
    }
}

#[async_trait]
impl Node for ProcessNode {
    async fn start(&self) -> Option<NodeHandle> {
        let mut cmd = Command::new(&self.command.exe);
        cmd.args(&self.command.args);
        if let Some(cwd) = &self.command.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.command.env {
            cmd.env(k, v);
        }
        for (k, v) in &self.extra_env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        #[cfg(unix)]
        {
            // New session/process-group so a stop can signal every descendant.
            cmd.process_group(0);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                tracing::error!(node = %self.name, exe = %self.command.exe.display(), error = %err, "proc.spawn_failed");
                return None;
            }
        };

        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_task = stdout
            .map(|s| Self::spawn_drainer(self.name.clone(), "stdout", s))
            .unwrap_or_else(|| tokio::spawn(async {}));
        let stderr_task = stderr
            .map(|s| Self::spawn_drainer(self.name.clone(), "stderr", s))
            .unwrap_or_else(|| tokio::spawn(async {}));

        *self.running.lock().await = Some(Running { child, stdout_task, stderr_task });
        self.alive.store(true, Ordering::SeqCst);
        tracing::info!(node = %self.name, ?pid, "proc.started");
        Some(NodeHandle::new(Instant::now(), pid))
    }

    async fn mark_ready(&self, _handle: &NodeHandle, ready: &ReadyEvent) -> Outcome {
        let outcome = match &self.ready_probe {
            Some(probe) => probe().await,
            // Default readiness for a process node is simply "it started".
            None => Ok("process started".to_string()),
        };
        if outcome.is_ok() {
            ready.set();
        }
        outcome
    }

    async fn check(&self, _handle: &NodeHandle) -> Outcome {
        if let Some(probe) = &self.health_probe {
            return probe().await;
        }
        // `running` is owned by `wait_or_shutdown` for virtually this node's
        // entire life, so `check` can't `try_wait` the child directly
        // without racing that ownership transfer — `alive` is the
        // last-known-liveness flag `wait_or_shutdown`'s own exit paths
        // (`kill_and_finish`, `drain_and_finish`) clear the instant the
        // process is actually known to be gone.
        if self.alive.load(Ordering::SeqCst) {
            Ok("alive".to_string())
        } else {
            Err(NodeError::new("process not running"))
        }
    }

    async fn receive(&self, _ready: &ReadyEvent, _message: &ControlMessage) -> Outcome {
        // Process nodes communicate over their own side channel, if any;
        // the generic node contract has nothing to route here by default.
        Ok("ignored".to_string())
    }

    async fn wait_or_shutdown(&self, _handle: &NodeHandle, shutdown: &ShutdownEvent) -> Option<i32> {
        // Take exclusive ownership of the child for the duration of this
        // wait rather than holding the mutex across the whole await: a
        // concurrent `stop()` (e.g. from the health watchdog) must still be
        // able to signal the process group by pid without blocking on us.
        let running = self.running.lock().await.take();
        let Some(mut running) = running else { return None };
        tokio::select! {
            status = running.child.wait() => {
                self.drain_and_finish(running, "exit").await;
                match status {
                    Ok(status) => status.code(),
                    Err(err) => {
                        tracing::warn!(node = %self.name, error = %err, "proc.wait_failed");
                        None
                    }
                }
            }
            _ = shutdown.wait() => {
                self.kill_and_finish(running, "shutdown").await;
                None
            }
        }
    }

    async fn stop(&self, handle: &NodeHandle, reason: &str) {
        let running = self.running.lock().await.take();
        match running {
            Some(running) => self.kill_and_finish(running, reason).await,
            None => {
                // Never started, already stopped, or `wait_or_shutdown` is
                // currently holding the child. Either way signaling by pid
                // is all that's left to do from here: it will make that
                // in-flight wait resolve, or is a harmless no-op on a
                // process that's already gone.
                if let Some(pid) = handle.pid {
                    #[cfg(unix)]
                    {
                        let pid = pid as i32;
                        signal_group(pid, nix::sys::signal::Signal::SIGTERM);
                        if !wait_for_group_exit(pid, self.stop_timeout).await {
                            signal_group(pid, nix::sys::signal::Signal::SIGKILL);
                            wait_for_group_exit(pid, self.kill_timeout).await;
                        }
                    }
                }
                tracing::debug!(node = %self.name, reason, "proc.stop_signal_only");
            }
        }
    }

    fn ready_timeout(&self) -> Duration {
        self.ready_timeout
    }

    fn stop_timeout(&self) -> Duration {
        self.stop_timeout
    }

    fn kill_timeout(&self) -> Duration {
        self.kill_timeout
    }

    fn health_interval(&self) -> Duration {
        self.health_interval
    }

    fn health_fail_threshold(&self) -> u32 {
        self.health_fail_threshold
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

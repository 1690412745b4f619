//! VPN status checker.
//!
//! Runs the VPN client's CLI (`vpn status` for AnyConnect) and looks for a
//! marker string in its output.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};
use vpnclick_core::{ConnectionState, StatusProbe};

/// Configuration for the status command.
#[derive(Debug, Clone)]
pub struct StatusConfig {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
    /// Substring of stdout that means the tunnel is up.
    pub marker: String,
    /// Upper bound on a single invocation.
    pub timeout: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/opt/cisco/anyconnect/bin/vpn"),
            args: vec!["status".to_string()],
            marker: "state: Connected".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Status checker that shells out to the VPN client CLI.
pub struct CliStatusChecker {
    config: StatusConfig,
}

impl CliStatusChecker {
    pub fn new(config: StatusConfig) -> Self {
        Self { config }
    }

    /// Run the command once, returning its exit success and stdout.
    async fn invoke(&self) -> Result<(bool, String), String> {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Dropping the `output` future on timeout kills the child.
        let output = tokio::time::timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| format!("timed out after {:?}", self.config.timeout))?
            .map_err(|e| format!("failed to run {}: {}", self.config.program.display(), e))?;

        if !output.stderr.is_empty() {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Status command wrote to stderr"
            );
        }

        Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    }
}

#[async_trait]
impl StatusProbe for CliStatusChecker {
    async fn check(&self) -> ConnectionState {
        match self.invoke().await {
            Ok((success, stdout)) => {
                let state = parse_status(success, &stdout, &self.config.marker);
                debug!(%state, exit_ok = success, "VPN status checked");
                state
            }
            Err(reason) => {
                error!(program = %self.config.program.display(), "VPN status check failed: {}", reason);
                ConnectionState::Unknown(reason)
            }
        }
    }
}

/// Interpret one completed status invocation.
pub fn parse_status(success: bool, stdout: &str, marker: &str) -> ConnectionState {
    if success && stdout.contains(marker) {
        ConnectionState::Connected
    } else {
        ConnectionState::Disconnected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> CliStatusChecker {
        CliStatusChecker::new(StatusConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), script.to_string()],
            ..Default::default()
        })
    }

    #[test]
    fn test_parse_requires_success_and_marker() {
        let marker = "state: Connected";
        let up = "  >> state: Connected\n  >> notice: Connected to vpn.example.com.";
        assert_eq!(parse_status(true, up, marker), ConnectionState::Connected);
        assert_eq!(parse_status(false, up, marker), ConnectionState::Disconnected);
        assert_eq!(
            parse_status(true, "  >> state: Disconnected", marker),
            ConnectionState::Disconnected
        );
        assert_eq!(parse_status(true, "", marker), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connected_output() {
        let checker = shell("echo '  >> state: Connected'");
        assert_eq!(checker.check().await, ConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_marker_with_failing_exit() {
        let checker = shell("echo '  >> state: Connected'; exit 3");
        assert_eq!(checker.check().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_marker_absent() {
        let checker = shell("echo '  >> state: Disconnected'");
        assert_eq!(checker.check().await, ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_missing_executable() {
        let checker = CliStatusChecker::new(StatusConfig {
            program: PathBuf::from("/nonexistent/vpnclick/vpn"),
            ..Default::default()
        });
        let state = checker.check().await;
        assert!(matches!(state, ConnectionState::Unknown(_)));
        assert!(!state.is_connected());
    }

    #[tokio::test]
    async fn test_timeout_is_not_connected() {
        let checker = CliStatusChecker::new(StatusConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), "sleep 5; echo 'state: Connected'".to_string()],
            timeout: Duration::from_millis(200),
            ..Default::default()
        });
        match checker.check().await {
            ConnectionState::Unknown(reason) => assert!(reason.contains("timed out")),
            other => panic!("Expected unknown state, got {}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_checks_agree() {
        let checker = shell("echo 'state: Connected'");
        let first = checker.check().await;
        let second = checker.check().await;
        assert_eq!(first, second);
    }
}

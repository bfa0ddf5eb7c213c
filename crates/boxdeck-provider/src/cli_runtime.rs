//! CLI-based container listing for Docker and Podman
//!
//! Shells out to `<runtime> ps -a` rather than talking to the API socket:
//! rootless podman, docker contexts and remote engines all work without any
//! socket configuration, and the CLI is what distrobox itself drives.

use crate::{ContainerQuery, ContainerRecord, ProviderError, ResponseParser, Result, Runtime};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Container listing through the runtime's command line
#[derive(Debug, Clone)]
pub struct CliRuntime {
    runtime: Runtime,
    parser: ResponseParser,
}

impl CliRuntime {
    /// Probe the runtime once and fix the response parser for the lifetime
    /// of this value
    pub async fn connect(runtime: Runtime) -> Result<Self> {
        let parser = Self::probe_parser(&runtime).await?;
        tracing::debug!("Using {} parser for {}", parser, runtime.kind);
        Ok(Self { runtime, parser })
    }

    /// Skip probing and use a known parser
    pub fn with_parser(runtime: Runtime, parser: ResponseParser) -> Self {
        Self { runtime, parser }
    }

    pub fn parser(&self) -> ResponseParser {
        self.parser
    }

    async fn probe_parser(runtime: &Runtime) -> Result<ResponseParser> {
        let args = ["ps", "-a", "--no-trunc", "--format", "json"];
        match run_cmd(runtime, &args).await {
            Ok(output) => Ok(ResponseParser::detect(&output, runtime.kind)),
            Err(ProviderError::QueryFailed(stderr)) => {
                tracing::debug!(
                    "{} rejected JSON output ({}), falling back to text listing",
                    runtime.kind,
                    stderr.trim()
                );
                Ok(ResponseParser::DelimitedText)
            }
            Err(e) => Err(e),
        }
    }
}

/// Run a runtime command and capture stdout
async fn run_cmd(runtime: &Runtime, args: &[&str]) -> Result<String> {
    tracing::debug!("Running {} {}", runtime.path.display(), args.join(" "));
    let output = Command::new(&runtime.path)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            ProviderError::RuntimeError(format!("failed to run {}: {}", runtime.path.display(), e))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            format!("{} exited with {}", runtime.kind, output.status)
        } else {
            stderr.trim().to_string()
        };
        return Err(ProviderError::QueryFailed(detail));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[async_trait]
impl ContainerQuery for CliRuntime {
    async fn list_all(&self) -> Result<Vec<ContainerRecord>> {
        let args = ["ps", "-a", "--no-trunc", "--format", self.parser.format_arg()];
        let output = run_cmd(&self.runtime, &args).await?;
        let records = self.parser.parse(&output)?;
        tracing::debug!("{} reported {} containers", self.runtime.kind, records.len());
        Ok(records)
    }
}

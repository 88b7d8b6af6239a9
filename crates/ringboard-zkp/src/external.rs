//! # External Process Verifier
//!
//! Runs the verifier binary as
//!
//! ```text
//! <binary> <circuit_file> <proof_file> <public_input_file>
//! ```
//!
//! Each call writes three uniquely named files into the work directory. The
//! files are `NamedTempFile`s held for the duration of the call, so they are
//! removed on every exit path: acceptance, rejection, spawn failure and
//! timeout alike.
//!
//! The only accepted outcome is exit status 0, stdout exactly
//! [`SUCCESS_MARKER`] and nothing on stderr.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use serde::Serialize;
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::payload::VerificationRequest;
use crate::traits::{Acceptance, ProofVerifier, Verdict, VerifyError};

/// The verifier's entire stdout on success.
pub const SUCCESS_MARKER: &[u8] = b"success\n";

/// Longest stretch of verifier output kept in a rejection reason.
const DIAGNOSTIC_LIMIT: usize = 512;

/// Where the verifier lives and how long it may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalVerifierConfig {
    pub binary: PathBuf,
    pub work_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for ExternalVerifierConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("./verify"),
            work_dir: PathBuf::from("data/tmp"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Verifier backed by an external binary.
#[derive(Debug, Clone)]
pub struct ExternalVerifier {
    config: ExternalVerifierConfig,
}

/// The three per-call files. Dropping this removes them.
struct Artifacts {
    circuit: NamedTempFile,
    proof: NamedTempFile,
    public_input: NamedTempFile,
}

impl ExternalVerifier {
    pub fn new(config: ExternalVerifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExternalVerifierConfig {
        &self.config
    }

    fn write_artifacts(&self, request: &VerificationRequest) -> Result<Artifacts, VerifyError> {
        std::fs::create_dir_all(&self.config.work_dir).map_err(VerifyError::Artifact)?;
        Ok(Artifacts {
            circuit: write_artifact(&self.config.work_dir, "circuit_", &request.circuit)?,
            proof: write_artifact(&self.config.work_dir, "proof_", &request.proof)?,
            public_input: write_artifact(
                &self.config.work_dir,
                "public_input_",
                &request.public_input,
            )?,
        })
    }
}

impl ProofVerifier for ExternalVerifier {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn verify(&self, request: &VerificationRequest) -> Result<Verdict, VerifyError> {
        let artifacts = self.write_artifacts(request)?;

        let child = Command::new(&self.config.binary)
            .arg(artifacts.circuit.path())
            .arg(artifacts.proof.path())
            .arg(artifacts.public_input.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(VerifyError::Spawn)?;

        // On timeout the child is dropped with the future, which kills it.
        let output = match tokio::time::timeout(self.config.timeout, child.wait_with_output()).await
        {
            Ok(result) => result.map_err(VerifyError::Io)?,
            Err(_) => return Err(VerifyError::Timeout(self.config.timeout)),
        };

        drop(artifacts);
        Ok(interpret(&output))
    }
}

fn write_artifact<T: Serialize>(
    dir: &Path,
    prefix: &str,
    payload: &T,
) -> Result<NamedTempFile, VerifyError> {
    let bytes = serde_json::to_vec(payload)?;
    let mut file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".json")
        .tempfile_in(dir)
        .map_err(VerifyError::Artifact)?;
    file.write_all(&bytes).map_err(VerifyError::Artifact)?;
    file.flush().map_err(VerifyError::Artifact)?;
    Ok(file)
}

/// Map a finished process to a verdict. Strict: see [`SUCCESS_MARKER`].
pub fn interpret(output: &Output) -> Verdict {
    if output.status.success() && output.stdout == SUCCESS_MARKER && output.stderr.is_empty() {
        return Verdict::Accepted(Acceptance::new());
    }
    Verdict::rejected(format!(
        "status={} stdout={:?} stderr={:?}",
        output.status,
        clip(&output.stdout),
        clip(&output.stderr),
    ))
}

fn clip(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= DIAGNOSTIC_LIMIT {
        return text.into_owned();
    }
    let mut end = DIAGNOSTIC_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

//! Invokes the external traceroute utility.

use crate::utils::config::{DEFAULT_MAX_HOPS, TRACEROUTE_PROGRAM};
use crate::utils::error::ProbeError;
use log::{debug, info};
use std::process::Command;

/// Runs one traceroute per call and returns its raw transcript
#[derive(Debug, Clone)]
pub struct TracerouteRunner {
    program: String,
    max_hops: u8,
}

impl Default for TracerouteRunner {
    fn default() -> Self {
        Self {
            program: TRACEROUTE_PROGRAM.to_string(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl TracerouteRunner {
    pub fn new(max_hops: u8) -> Self {
        Self {
            max_hops,
            ..Self::default()
        }
    }

    /// Use a different executable (must accept `<target> -m <hops>`)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn max_hops(&self) -> u8 {
        self.max_hops
    }

    /// Execute `<program> <target> -m <max_hops>` and capture stdout
    ///
    /// **Public** - one call per capture run
    ///
    /// # Errors
    /// * `ProbeError::SpawnFailed` - program missing or not executable
    /// * `ProbeError::NonZeroExit` - program reported failure
    /// * `ProbeError::InvalidOutput` - stdout is not UTF-8
    pub fn run(&self, target: &str) -> Result<String, ProbeError> {
        info!(
            "Running {} to {} (max {} hops)",
            self.program, target, self.max_hops
        );

        let output = Command::new(&self.program)
            .arg(target)
            .arg("-m")
            .arg(self.max_hops.to_string())
            .output()?;

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let transcript = String::from_utf8(output.stdout)?;
        debug!("{} produced {} lines", self.program, transcript.lines().count());

        Ok(transcript)
    }
}

//! # Blender Runner
//!
//! Runs a generated script in a headless Blender subprocess.
//!
//! ## Discovery
//!
//! The executable is looked up in order:
//!
//! 1. `RunnerConfig::blender_path`
//! 2. the `BLENDER_PATH` environment variable
//! 3. `blender` on `PATH`
//! 4. common install locations
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use paragen_blender::{BlenderRunner, RunnerConfig};
//!
//! let runner = BlenderRunner::with_config(
//!     RunnerConfig::new()
//!         .timeout(Duration::from_secs(60))
//!         .save_as("/tmp/scene.blend"),
//! );
//! let report = runner.run_source("print('hello')").unwrap();
//! println!("{}", report.stderr);
//! ```

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use config::constants::{BLENDER_PATH_ENV, DEFAULT_BLENDER_TIMEOUT_SECS};
use log::{debug, info};

use crate::error::{BlenderError, BlenderResult};
use crate::script::{py_str, PythonScript};

/// Poll interval while waiting for Blender to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Runtime settings for [`BlenderRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Explicit executable; skips discovery when it exists.
    pub blender_path: Option<PathBuf>,
    pub timeout: Duration,
    /// Start from Blender's factory settings instead of the user's.
    pub factory_startup: bool,
    /// Save the resulting scene to this `.blend` file.
    pub save_as: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            blender_path: None,
            timeout: Duration::from_secs(DEFAULT_BLENDER_TIMEOUT_SECS),
            factory_startup: true,
            save_as: None,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blender_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.blender_path = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn factory_startup(mut self, enabled: bool) -> Self {
        self.factory_startup = enabled;
        self
    }

    pub fn save_as(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_as = Some(path.into());
        self
    }
}

// =============================================================================
// RUNNER
// =============================================================================

/// Outcome of a successful Blender run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub blender: PathBuf,
    /// Everything Blender wrote to stderr.
    pub stderr: String,
    pub elapsed: Duration,
}

/// Executes scripts in a Blender subprocess.
#[derive(Debug, Clone, Default)]
pub struct BlenderRunner {
    config: RunnerConfig,
}

impl BlenderRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Locates the Blender executable.
    pub fn find_blender(&self) -> BlenderResult<PathBuf> {
        if let Some(ref path) = self.config.blender_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        if let Ok(path) = std::env::var(BLENDER_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        let names: &[&str] = if cfg!(windows) {
            &["blender.exe", "blender"]
        } else {
            &["blender"]
        };
        for name in names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        let common: &[&str] = if cfg!(windows) {
            &[
                "C:\\Program Files\\Blender Foundation\\Blender 4.2\\blender.exe",
                "C:\\Program Files\\Blender Foundation\\Blender\\blender.exe",
            ]
        } else if cfg!(target_os = "macos") {
            &["/Applications/Blender.app/Contents/MacOS/Blender"]
        } else {
            &[
                "/usr/bin/blender",
                "/usr/local/bin/blender",
                "/snap/bin/blender",
            ]
        };
        common
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .ok_or(BlenderError::NotFound)
    }

    /// Runs a script recorded by a script host.
    pub fn run_script(&self, script: &PythonScript) -> BlenderResult<RunReport> {
        self.run_source(&script.render())
    }

    /// Runs raw Python source.
    pub fn run_source(&self, source: &str) -> BlenderResult<RunReport> {
        let blender = self.find_blender()?;

        let mut file = tempfile::Builder::new()
            .prefix("paragen_")
            .suffix(".py")
            .tempfile()
            .map_err(BlenderError::WriteScriptFailed)?;
        file.write_all(source.as_bytes())
            .map_err(BlenderError::WriteScriptFailed)?;
        if let Some(ref target) = self.config.save_as {
            let line = save_statement(target);
            writeln!(file, "\n{line}").map_err(BlenderError::WriteScriptFailed)?;
        }
        file.flush().map_err(BlenderError::WriteScriptFailed)?;

        let mut cmd = Command::new(&blender);
        cmd.arg("--background");
        if self.config.factory_startup {
            cmd.arg("--factory-startup");
        }
        cmd.arg("--python-exit-code")
            .arg("1")
            .arg("--python")
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!("running {} on {}", blender.display(), file.path().display());
        let start = Instant::now();
        let child = cmd.spawn().map_err(BlenderError::SpawnFailed)?;
        let (status, stderr) = wait_with_timeout(child, self.config.timeout)?;
        let elapsed = start.elapsed();

        if !status.success() {
            return Err(BlenderError::process_failed(
                status.code().unwrap_or(-1),
                stderr,
            ));
        }
        info!("blender finished in {:.1}s", elapsed.as_secs_f64());
        Ok(RunReport {
            blender,
            stderr,
            elapsed,
        })
    }
}

fn save_statement(target: &Path) -> String {
    format!(
        "bpy.ops.wm.save_as_mainfile(filepath={})",
        py_str(&target.to_string_lossy())
    )
}

/// Waits for `child`, killing it once `timeout` has passed.
///
/// Stderr is drained on a separate thread so a chatty process cannot block on
/// a full pipe.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> BlenderResult<(ExitStatus, String)> {
    let reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).ok();
            String::from_utf8_lossy(&buf).into_owned()
        })
    });
    let collect = |reader: Option<thread::JoinHandle<String>>| {
        reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    };

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status, collect(reader))),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    collect(reader);
                    return Err(BlenderError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(BlenderError::Io(e)),
        }
    }
}

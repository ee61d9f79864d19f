// src/supervisor/manager.rs

//! The `Supervisor`: resolves, launches, tracks and terminates the configured
//! helper binaries.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::BinariesConfig;
use crate::config::validate::validate_binaries;
use crate::errors::{BinherdError, Result};
use crate::payload::PayloadSource;
use crate::supervisor::waiter;

/// Directory under the user cache root that embedded binaries extract into.
const CACHE_SUBDIR: &str = "binherd";

/// Cache directory used in embedded mode under the given root.
pub fn embedded_cache_dir(cache_root: &Path) -> PathBuf {
    cache_root.join(CACHE_SUBDIR).join("bin")
}

/// Where binary bytes come from. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Extract from the embedded payload into the user cache directory.
    Embedded,
    /// Run binaries already present in the configured local directory.
    Local,
}

/// One successfully launched helper process.
///
/// Once appended to the supervisor's running list, the supervisor is the sole
/// owner responsible for terminating the process; the waiter task only
/// observes its exit.
pub struct ProcessHandle {
    name: String,
    pid: Option<u32>,
    kill_tx: Option<oneshot::Sender<()>>,
    exit_observed: Arc<AtomicBool>,
}

impl ProcessHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Whether the waiter has seen this process exit (by any cause).
    pub fn exit_observed(&self) -> bool {
        self.exit_observed.load(Ordering::SeqCst)
    }
}

/// Supervises the configured helper binaries for the lifetime of the process.
///
/// Created once from validated settings, drives startup via [`start_all`],
/// and is torn down via [`cleanup`]. The running list is shared with nothing
/// except this struct; the mutex exists because cleanup (e.g. an abrupt
/// shutdown signal) may race with an in-flight startup loop.
///
/// [`start_all`]: Supervisor::start_all
/// [`cleanup`]: Supervisor::cleanup
pub struct Supervisor {
    mode: Mode,
    cache_dir: PathBuf,
    exec_order: Vec<String>,
    payload: Box<dyn PayloadSource>,
    running: Mutex<Vec<ProcessHandle>>,
}

impl Supervisor {
    /// Build a supervisor from validated settings.
    ///
    /// Fails with `Config` if the feature is disabled, the startup order is
    /// empty or malformed, or the cache directory cannot be resolved. In
    /// embedded mode the cache directory is created here; no binary is
    /// touched until [`start_all`](Supervisor::start_all).
    pub fn new(cfg: &BinariesConfig, payload: Box<dyn PayloadSource>) -> Result<Self> {
        let cache_root = dirs::cache_dir().ok_or_else(|| {
            BinherdError::Config("user cache directory is not available".to_string())
        })?;
        Self::with_cache_root(cfg, payload, &cache_root)
    }

    /// Like [`new`](Supervisor::new), with an explicit cache root instead of
    /// the OS user cache location. Local mode ignores `cache_root`.
    pub fn with_cache_root(
        cfg: &BinariesConfig,
        payload: Box<dyn PayloadSource>,
        cache_root: &Path,
    ) -> Result<Self> {
        // Validate before creating any directory, so a rejected config has no
        // filesystem side effects.
        validate_binaries(cfg)?;

        let mode = if cfg.use_embedded {
            Mode::Embedded
        } else {
            Mode::Local
        };

        let cache_dir = match mode {
            Mode::Embedded => {
                let dir = embedded_cache_dir(cache_root);
                std::fs::create_dir_all(&dir).map_err(|e| {
                    BinherdError::Config(format!(
                        "failed to create cache directory {}: {e}",
                        dir.display()
                    ))
                })?;
                dir
            }
            Mode::Local => std::path::absolute(&cfg.bin_path).map_err(|e| {
                BinherdError::Config(format!(
                    "failed to resolve bin path '{}': {e}",
                    cfg.bin_path
                ))
            })?,
        };

        info!(
            mode = ?mode,
            cache_dir = %cache_dir.display(),
            binaries = cfg.startup_order.len(),
            "supervisor initialised"
        );

        Ok(Self {
            mode,
            cache_dir,
            exec_order: cfg.startup_order.clone(),
            payload,
            running: Mutex::new(Vec::new()),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Extraction target (embedded) or source directory (local). Also the
    /// working directory of every launched process.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Launch every configured binary, in order, best-effort.
    ///
    /// A per-binary failure is logged and skipped; the loop always proceeds
    /// to the next name. Launch attempts are strictly sequential. Returns
    /// `NoBinariesStarted` only when every single attempt failed.
    pub async fn start_all(&self) -> Result<()> {
        let mut started = 0usize;

        for name in &self.exec_order {
            match self.resolve_and_launch(name).await {
                Ok(()) => started += 1,
                Err(err) => {
                    warn!(
                        binary = %name,
                        error = %err,
                        "failed to start binary; continuing with next"
                    );
                }
            }
        }

        if started == 0 {
            return Err(BinherdError::NoBinariesStarted {
                attempted: self.exec_order.len(),
            });
        }

        info!(
            started,
            total = self.exec_order.len(),
            "binary startup complete"
        );
        Ok(())
    }

    /// Resolve one binary to an on-disk path and spawn it.
    ///
    /// Returns as soon as the spawn succeeds; the exit waiter runs in the
    /// background and is never awaited here.
    async fn resolve_and_launch(&self, name: &str) -> Result<()> {
        let executable = match self.mode {
            Mode::Embedded => self.extract_embedded(name)?,
            Mode::Local => self.resolve_local(name)?,
        };

        // Inherit the parent's environment and stdio; no capture or
        // multiplexing is imposed on helper output.
        let child = Command::new(&executable)
            .current_dir(&self.cache_dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BinherdError::Launch {
                name: name.to_string(),
                source: e,
            })?;

        let pid = child.id();
        info!(binary = %name, pid, "binary started");

        let (kill_tx, kill_rx) = oneshot::channel();
        let exit_observed = Arc::new(AtomicBool::new(false));

        {
            let mut running = self.running.lock().expect("running list mutex poisoned");
            running.push(ProcessHandle {
                name: name.to_string(),
                pid,
                kill_tx: Some(kill_tx),
                exit_observed: Arc::clone(&exit_observed),
            });
        }

        waiter::spawn_waiter(name.to_string(), child, kill_rx, exit_observed);

        Ok(())
    }

    /// Embedded mode: read bytes from the payload and write them to
    /// `cache_dir/name` with executable permissions. Overwrites whatever a
    /// previous run left there.
    fn extract_embedded(&self, name: &str) -> Result<PathBuf> {
        let data = self.payload.read(name)?;

        let target = self.cache_dir.join(name);
        write_executable(&target, &data).map_err(|e| BinherdError::Extraction {
            name: name.to_string(),
            source: e,
        })?;

        debug!(
            binary = %name,
            target = %target.display(),
            bytes = data.len(),
            "extracted embedded binary"
        );
        Ok(target)
    }

    /// Local mode: the binary must already exist at `cache_dir/name`. A chmod
    /// failure is not fatal; the file may already carry execute bits.
    fn resolve_local(&self, name: &str) -> Result<PathBuf> {
        let path = self.cache_dir.join(name);

        if !path.exists() {
            return Err(BinherdError::BinaryNotFound {
                name: name.to_string(),
                path,
            });
        }

        if let Err(err) = make_executable(&path) {
            warn!(
                binary = %name,
                error = %err,
                "failed to set executable permission; launching anyway"
            );
        }

        debug!(binary = %name, path = %path.display(), "using local binary");
        Ok(path)
    }

    /// Snapshot of how many processes were launched. A process may have
    /// exited since; handles are never removed from the list.
    pub fn process_count(&self) -> usize {
        self.running.lock().expect("running list mutex poisoned").len()
    }

    /// Names of launched processes, in launch order.
    pub fn running_names(&self) -> Vec<String> {
        self.running
            .lock()
            .expect("running list mutex poisoned")
            .iter()
            .map(|h| h.name.clone())
            .collect()
    }

    /// How many launched processes have had their exit observed by a waiter.
    pub fn observed_exits(&self) -> usize {
        self.running
            .lock()
            .expect("running list mutex poisoned")
            .iter()
            .filter(|h| h.exit_observed())
            .count()
    }

    /// Request forceful termination of every launched process, in launch
    /// order.
    ///
    /// Each attempt is independent: a process that already exited is logged
    /// and skipped. Idempotent; the contract is "termination requested", not
    /// "termination confirmed" — waiters observe the actual exits.
    pub fn cleanup(&self) {
        let mut running = self.running.lock().expect("running list mutex poisoned");

        for handle in running.iter_mut() {
            match handle.kill_tx.take() {
                Some(tx) => {
                    info!(
                        binary = %handle.name,
                        pid = handle.pid,
                        "requesting termination"
                    );
                    if tx.send(()).is_err() {
                        debug!(
                            binary = %handle.name,
                            "waiter already finished; process exited on its own"
                        );
                    }
                }
                None => {
                    debug!(binary = %handle.name, "termination already requested");
                }
            }
        }
    }
}

/// Write `data` to `path` and ensure the file carries execute permission.
fn write_executable(path: &Path, data: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, data)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    // Execute permission is not a distinct bit on this platform.
    Ok(())
}

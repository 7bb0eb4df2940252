//! OS entropy devices.
//!
//! A device is a readable path such as `/dev/urandom`. [`DeviceRegistry`]
//! keeps the ordered candidate list and the lazily resolved default;
//! [`DeviceEntropyProvider`] reads bytes from one device.
//!
//! Resolution never substitutes a device silently. Opening an unreadable
//! path is an error, and falling back to the default is a separate,
//! explicit call.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use super::EntropyProvider;
use crate::error::{ConfigError, EntropyError};

struct DeviceState {
    devices: Vec<PathBuf>,
    default: Option<PathBuf>,
}

/// Candidate entropy devices and the process default among them.
pub struct DeviceRegistry {
    state: Mutex<DeviceState>,
}

impl DeviceRegistry {
    /// A registry over `devices`, in priority order. No default is
    /// resolved until first use.
    pub fn new(devices: Vec<PathBuf>) -> Self {
        Self {
            state: Mutex::new(DeviceState {
                devices,
                default: None,
            }),
        }
    }

    /// Whether `path` can currently be opened for reading.
    ///
    /// On Unix the check opens non-blocking, so a FIFO without a writer
    /// still counts as readable.
    pub fn is_readable(path: &Path) -> bool {
        let mut options = OpenOptions::new();
        options.read(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NONBLOCK);
        }

        options.open(path).is_ok()
    }

    /// The candidate devices, in order.
    pub fn devices(&self) -> Vec<PathBuf> {
        self.state.lock().devices.clone()
    }

    /// Returns the default device, resolving it on first use.
    ///
    /// Resolution scans the candidates in order and caches the first
    /// readable one. Once cached, the default only changes through
    /// [`DeviceRegistry::set_default`].
    pub fn default_device(&self) -> Result<PathBuf, EntropyError> {
        let mut state = self.state.lock();

        if let Some(device) = &state.default {
            return Ok(device.clone());
        }

        let device = state
            .devices
            .iter()
            .find(|device| Self::is_readable(device))
            .cloned()
            .ok_or_else(|| EntropyError::unreadable("device", "no readable entropy device"))?;

        log::info!("default entropy device: {}", device.display());
        state.default = Some(device.clone());

        Ok(device)
    }

    /// Makes `path` the default device.
    ///
    /// The device must be readable now. On success it is appended to the
    /// candidate list if absent. On failure the previous default stays.
    pub fn set_default(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if !Self::is_readable(path) {
            return Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
            });
        }

        let mut state = self.state.lock();

        if !state.devices.iter().any(|device| device == path) {
            state.devices.push(path.to_path_buf());
        }

        log::info!("default entropy device set to {}", path.display());
        state.default = Some(path.to_path_buf());

        Ok(())
    }
}

enum DeviceSource {
    Path(PathBuf),
    Default(Arc<DeviceRegistry>),
}

/// Reads random bytes from an entropy device.
pub struct DeviceEntropyProvider {
    source: DeviceSource,
    read_timeout: Option<Duration>,
}

impl DeviceEntropyProvider {
    /// Uses `path`, which must be readable now.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !DeviceRegistry::is_readable(path) {
            return Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            source: DeviceSource::Path(path.to_path_buf()),
            read_timeout: None,
        })
    }

    /// Reads from whatever `devices` reports as its default at read time.
    pub fn following_default(devices: Arc<DeviceRegistry>) -> Self {
        Self {
            source: DeviceSource::Default(devices),
            read_timeout: None,
        }
    }

    /// Uses `path` if it is given and readable, the registry default
    /// otherwise.
    pub fn open_or_default(path: Option<&Path>, devices: &Arc<DeviceRegistry>) -> Self {
        match path.map(Self::open) {
            Some(Ok(provider)) => provider,
            Some(Err(err)) => {
                log::warn!("{err}; falling back to the default device");
                Self::following_default(Arc::clone(devices))
            }
            None => Self::following_default(Arc::clone(devices)),
        }
    }

    /// Fails reads that take longer than `timeout` with
    /// [`EntropyError::Timeout`].
    ///
    /// Every read then spawns a reader thread. A timed-out reader stays
    /// blocked until the device delivers or the process exits, so repeated
    /// stalls leave one blocked thread per attempt.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// The device this provider currently reads from.
    pub fn source(&self) -> Result<PathBuf, EntropyError> {
        match &self.source {
            DeviceSource::Path(path) => Ok(path.clone()),
            DeviceSource::Default(devices) => devices.default_device(),
        }
    }
}

impl EntropyProvider for DeviceEntropyProvider {
    fn random_bytes(&self, count: usize) -> Result<Vec<u8>, EntropyError> {
        let path = self.source()?;

        log::trace!("reading {count} bytes from {}", path.display());

        match self.read_timeout {
            Some(timeout) => read_with_timeout(path, count, timeout),
            None => read_device(&path, count),
        }
    }
}

fn read_device(path: &Path, count: usize) -> Result<Vec<u8>, EntropyError> {
    let name = path.display().to_string();
    let mut file = File::open(path).map_err(|err| EntropyError::unreadable(&*name, err))?;

    let mut buf = vec![0u8; count];
    file.read_exact(&mut buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => {
            EntropyError::unreadable(&*name, format!("yielded fewer than {count} bytes"))
        }
        _ => EntropyError::unreadable(&*name, err),
    })?;

    Ok(buf)
}

// A stalled reader thread is left behind; it ends with the device or the
// process.
fn read_with_timeout(path: PathBuf, count: usize, timeout: Duration) -> Result<Vec<u8>, EntropyError> {
    let (tx, rx) = mpsc::channel();
    let reader_path = path.clone();

    thread::spawn(move || {
        let _ = tx.send(read_device(&reader_path, count));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            log::warn!("read from {} timed out after {timeout:?}", path.display());
            Err(EntropyError::Timeout {
                provider: path.display().to_string(),
                after: timeout,
            })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EntropyError::unreadable(
            path.display().to_string(),
            "reader thread exited without a result",
        )),
    }
}

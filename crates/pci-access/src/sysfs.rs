use crate::{AccessError, Address, DeviceAccess};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const DEVICES_DIR: &str = "sys/bus/pci/devices";

/// Reads devices from `<root>/sys/bus/pci/devices`.
///
/// The root is `/` on a live system; any other root points at a copied sysfs tree.
#[derive(Clone, Debug)]
pub struct SysfsAccess {
    devices: PathBuf,
}

impl SysfsAccess {
    pub fn new(root: impl AsRef<Path>) -> Self {
        SysfsAccess {
            devices: root.as_ref().join(DEVICES_DIR),
        }
    }

    pub fn host() -> Self {
        Self::new("/")
    }

    pub fn devices_dir(&self) -> &Path {
        &self.devices
    }

    pub fn modalias_path(&self, address: &Address) -> PathBuf {
        self.devices.join(address.to_string()).join("modalias")
    }
}

impl DeviceAccess for SysfsAccess {
    fn addresses(&self) -> Result<Vec<String>, AccessError> {
        let read_dir_error = |source| AccessError::ReadDir {
            path: self.devices.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.devices).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn modalias(&self, address: &Address) -> Option<Vec<u8>> {
        let path = self.modalias_path(address);
        match fs::read(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }
}

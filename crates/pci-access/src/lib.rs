use core::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

mod address;
mod memory;
mod modalias;
mod sysfs;

pub use address::{Address, AddressError};
pub use memory::StaticAccess;
pub use modalias::{Field, FieldLayout, Modalias, LAYOUT, MIN_LEN};
pub use sysfs::SysfsAccess;

pub enum AccessError {
    ReadDir { path: PathBuf, source: io::Error },
}

impl Debug for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessError::ReadDir { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessError::ReadDir { source, .. } => Some(source),
        }
    }
}

/// Where device addresses and their identifier blobs come from.
pub trait DeviceAccess {
    /// Names of every candidate device, not necessarily valid addresses.
    fn addresses(&self) -> Result<Vec<String>, AccessError>;

    /// Raw `modalias` contents of the device, `None` if it cannot be read.
    fn modalias(&self, address: &Address) -> Option<Vec<u8>>;

    fn read_modalias(&self, address: &Address) -> Option<Modalias> {
        Modalias::decode(&self.modalias(address)?)
    }
}

impl<T: DeviceAccess + ?Sized> DeviceAccess for &T {
    fn addresses(&self) -> Result<Vec<String>, AccessError> {
        (**self).addresses()
    }

    fn modalias(&self, address: &Address) -> Option<Vec<u8>> {
        (**self).modalias(address)
    }
}

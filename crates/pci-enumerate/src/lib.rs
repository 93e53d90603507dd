use log::debug;
use pciscan_access::{Address, DeviceAccess};
use pciscan_db::PciDatabase;

mod device;
mod report;
pub mod resolve;

pub use device::Device;
pub use report::{Diagnostic, LogReporter, Reporter};

/// Resolves devices from an access against a database, reporting what it skips.
pub struct Enumerator<'db, A, D: ?Sized, R = LogReporter> {
    access: A,
    db: &'db D,
    reporter: R,
}

impl<'db, A: DeviceAccess, D: PciDatabase + ?Sized> Enumerator<'db, A, D> {
    pub fn new(access: A, db: &'db D) -> Self {
        Enumerator {
            access,
            db,
            reporter: LogReporter,
        }
    }
}

impl<'db, A: DeviceAccess, D: PciDatabase + ?Sized, R: Reporter> Enumerator<'db, A, D, R> {
    pub fn reporter<T: Reporter>(self, reporter: T) -> Enumerator<'db, A, D, T> {
        Enumerator {
            access: self.access,
            db: self.db,
            reporter,
        }
    }

    /// `None` if the address is malformed or the device's identifier cannot be decoded.
    pub fn device(&self, address: &str) -> Option<Device<'db>> {
        let address = Address::parse(address)?;
        let modalias = self.access.read_modalias(&address)?;
        Some(resolve::device(self.db, address, &modalias))
    }

    /// One device per listed address, in listing order.
    ///
    /// Addresses that fail are reported and skipped. A listing that fails is
    /// reported and yields no devices.
    pub fn list(&self) -> Vec<Device<'db>> {
        let addresses = match self.access.addresses() {
            Ok(addresses) => addresses,
            Err(e) => {
                self.reporter.report(&Diagnostic::SourceUnavailable(e));
                return Vec::new();
            }
        };

        let mut devices = Vec::with_capacity(addresses.len());
        for address in addresses {
            match self.device(&address) {
                Some(device) => {
                    debug!(
                        "{} => {} {}",
                        device.address(),
                        device.vendor().name,
                        device.product().name
                    );
                    devices.push(device)
                }
                None => self
                    .reporter
                    .report(&Diagnostic::DeviceUnavailable { address }),
            }
        }
        devices
    }
}

pub fn get_device<'db, A: DeviceAccess, D: PciDatabase + ?Sized>(
    access: A,
    db: &'db D,
    address: &str,
) -> Option<Device<'db>> {
    Enumerator::new(access, db).device(address)
}

pub fn list_devices<'db, A: DeviceAccess, D: PciDatabase + ?Sized>(
    access: A,
    db: &'db D,
) -> Vec<Device<'db>> {
    Enumerator::new(access, db).list()
}

use pci_types::device_type::DeviceType;
use pciscan_access::Address;
use pciscan_db::{Class, Product, ProgrammingInterface, Subclass, Vendor};
use serde::Serialize;
use std::borrow::Cow;

/// A fully described PCI function. Every record is populated, either from the
/// database or as an `unknown` placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Device<'db> {
    address: Address,
    vendor: Cow<'db, Vendor>,
    product: Cow<'db, Product>,
    subsystem: Cow<'db, Product>,
    class: Cow<'db, Class>,
    subclass: Cow<'db, Subclass>,
    programming_interface: Cow<'db, ProgrammingInterface>,
}

impl<'db> Device<'db> {
    pub fn new(
        address: Address,
        vendor: Cow<'db, Vendor>,
        product: Cow<'db, Product>,
        subsystem: Cow<'db, Product>,
        class: Cow<'db, Class>,
        subclass: Cow<'db, Subclass>,
        programming_interface: Cow<'db, ProgrammingInterface>,
    ) -> Self {
        Device {
            address,
            vendor,
            product,
            subsystem,
            class,
            subclass,
            programming_interface,
        }
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    #[inline]
    pub fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    #[inline]
    pub fn subsystem(&self) -> &Product {
        &self.subsystem
    }

    #[inline]
    pub fn class(&self) -> &Class {
        &self.class
    }

    #[inline]
    pub fn subclass(&self) -> &Subclass {
        &self.subclass
    }

    #[inline]
    pub fn programming_interface(&self) -> &ProgrammingInterface {
        &self.programming_interface
    }

    /// Generic device kind derived from the raw class and subclass codes.
    ///
    /// `None` when either code is not hex.
    pub fn device_type(&self) -> Option<DeviceType> {
        let base = u8::from_str_radix(&self.class.id, 16).ok()?;
        let sub = u8::from_str_radix(&self.subclass.id, 16).ok()?;
        Some(DeviceType::from((base, sub)))
    }

    /// Detaches the device from the database it was resolved against.
    pub fn into_owned(self) -> Device<'static> {
        Device {
            address: self.address,
            vendor: Cow::Owned(self.vendor.into_owned()),
            product: Cow::Owned(self.product.into_owned()),
            subsystem: Cow::Owned(self.subsystem.into_owned()),
            class: Cow::Owned(self.class.into_owned()),
            subclass: Cow::Owned(self.subclass.into_owned()),
            programming_interface: Cow::Owned(self.programming_interface.into_owned()),
        }
    }
}

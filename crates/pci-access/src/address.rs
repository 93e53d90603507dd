use core::fmt::{Debug, Display, Formatter};
use core::str::FromStr;
use serde::{Serialize, Serializer};

/// Location of a function on the PCI bus, as named by sysfs: `dddd:bb:ss.f`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug)]
pub struct Address {
    domain: u16,
    bus: u8,
    slot: u8,
    function: u8,
}

#[derive(Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The string is not made of `[domain:]bus:slot.function` segments
    Segments,
    Component {
        field: &'static str,
        value: String,
    },
}

impl Debug for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            AddressError::Segments => write!(f, "expected [domain:]bus:slot.function"),
            AddressError::Component { field, value } => {
                write!(f, "invalid {} component {:?}", field, value)
            }
        }
    }
}

impl Display for AddressError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for AddressError {}

fn component(field: &'static str, value: &str, min: usize, max: usize) -> Result<u16, AddressError> {
    let valid = (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_hexdigit());
    if !valid {
        return Err(AddressError::Component {
            field,
            value: value.to_owned(),
        });
    }
    u16::from_str_radix(value, 16).map_err(|_| AddressError::Component {
        field,
        value: value.to_owned(),
    })
}

impl Address {
    pub const fn new(domain: u16, bus: u8, slot: u8, function: u8) -> Self {
        Address {
            domain,
            bus,
            slot,
            function,
        }
    }

    /// Parses `dddd:bb:ss.f` or the short `bb:ss.f` form (domain `0000`).
    ///
    /// Returns `None` for anything else; there is no partially parsed address.
    pub fn parse(address: &str) -> Option<Self> {
        address.parse().ok()
    }

    #[inline]
    pub fn domain(&self) -> u16 {
        self.domain
    }

    #[inline]
    pub fn bus(&self) -> u8 {
        self.bus
    }

    #[inline]
    pub fn slot(&self) -> u8 {
        self.slot
    }

    #[inline]
    pub fn function(&self) -> u8 {
        self.function
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(':').collect();
        let (domain, bus, rest) = match segments.as_slice() {
            [bus, rest] => ("0000", *bus, *rest),
            [domain, bus, rest] => (*domain, *bus, *rest),
            _ => return Err(AddressError::Segments),
        };
        let (slot, function) = rest.split_once('.').ok_or(AddressError::Segments)?;

        Ok(Address {
            domain: component("domain", domain, 1, 4)?,
            bus: component("bus", bus, 2, 2)? as u8,
            slot: component("slot", slot, 2, 2)? as u8,
            function: component("function", function, 1, 1)? as u8,
        })
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04x}:{:02x}:{:02x}.{:x}",
            self.domain, self.bus, self.slot, self.function
        )
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

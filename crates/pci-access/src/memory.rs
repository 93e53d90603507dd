use crate::{AccessError, Address, DeviceAccess};
use hashbrown::HashMap;

/// Devices kept in memory: a listing plus the blobs that can be read.
///
/// Listed names without a blob behave like devices whose `modalias` is unreadable.
#[derive(Clone, Debug, Default)]
pub struct StaticAccess {
    names: Vec<String>,
    blobs: HashMap<Address, Vec<u8>>,
    unavailable: bool,
}

impl StaticAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// An access whose listing always fails.
    pub fn unavailable() -> Self {
        StaticAccess {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn device(mut self, name: impl Into<String>, modalias: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        if let Some(address) = Address::parse(&name) {
            self.blobs.insert(address, modalias.into());
        }
        self.names.push(name);
        self
    }

    pub fn unreadable(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }
}

impl DeviceAccess for StaticAccess {
    fn addresses(&self) -> Result<Vec<String>, AccessError> {
        if self.unavailable {
            return Err(AccessError::ReadDir {
                path: "<memory>".into(),
                source: std::io::ErrorKind::NotFound.into(),
            });
        }
        Ok(self.names.clone())
    }

    fn modalias(&self, address: &Address) -> Option<Vec<u8>> {
        self.blobs.get(address).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_listing_order() {
        let access = StaticAccess::new()
            .device("0000:01:00.0", "x")
            .unreadable("0000:00:00.0")
            .device("garbage", "y");
        assert_eq!(
            access.addresses().unwrap(),
            vec!["0000:01:00.0", "0000:00:00.0", "garbage"]
        );
        assert_eq!(access.modalias(&Address::new(0, 1, 0, 0)), Some(b"x".to_vec()));
        assert_eq!(access.modalias(&Address::new(0, 0, 0, 0)), None);
    }

    #[test]
    fn short_names_share_the_canonical_blob() {
        let access = StaticAccess::new().device("01:00.0", "x");
        assert!(access.modalias(&Address::parse("0000:01:00.0").unwrap()).is_some());
    }

    #[test]
    fn unavailable_listing_fails() {
        assert!(StaticAccess::unavailable().addresses().is_err());
    }
}

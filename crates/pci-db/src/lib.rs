mod error;
mod ids;

pub use error::DbError;
pub use ids::{PciIds, SEARCH_PATHS};

use serde::Serialize;

/// Name given to every record the database does not know.
pub const UNKNOWN: &str = "unknown";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub products: Vec<Product>,
}

/// A device model. Subsystems are products too, with `vendor_id` set to the subvendor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    pub vendor_id: String,
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub subsystems: Vec<Product>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub subclasses: Vec<Subclass>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Subclass {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub programming_interfaces: Vec<ProgrammingInterface>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProgrammingInterface {
    pub id: String,
    pub name: String,
}

impl Vendor {
    pub fn unknown(id: impl Into<String>) -> Self {
        Vendor {
            id: id.into(),
            name: UNKNOWN.into(),
            products: Vec::new(),
        }
    }
}

impl Product {
    pub fn unknown(vendor_id: impl Into<String>, id: impl Into<String>) -> Self {
        Product {
            vendor_id: vendor_id.into(),
            id: id.into(),
            name: UNKNOWN.into(),
            subsystems: Vec::new(),
        }
    }
}

impl Class {
    pub fn unknown(id: impl Into<String>) -> Self {
        Class {
            id: id.into(),
            name: UNKNOWN.into(),
            subclasses: Vec::new(),
        }
    }
}

impl Subclass {
    pub fn unknown(id: impl Into<String>) -> Self {
        Subclass {
            id: id.into(),
            name: UNKNOWN.into(),
            programming_interfaces: Vec::new(),
        }
    }
}

impl ProgrammingInterface {
    pub fn unknown(id: impl Into<String>) -> Self {
        ProgrammingInterface {
            id: id.into(),
            name: UNKNOWN.into(),
        }
    }
}

/// Read-only lookups over a loaded vendor/product/class table.
///
/// Lists inside records are expected to hold unique IDs.
pub trait PciDatabase: Sync {
    fn vendor(&self, vendor_id: &str) -> Option<&Vendor>;

    fn product(&self, vendor_id: &str, product_id: &str) -> Option<&Product>;

    fn class(&self, class_id: &str) -> Option<&Class>;
}

//! Lookups that never fail: every miss becomes an `unknown` record carrying the raw ID.
//!
//! Hits borrow from the database, placeholders are owned.

use crate::Device;
use pciscan_access::{Address, Modalias};
use pciscan_db::{Class, PciDatabase, Product, ProgrammingInterface, Subclass, Vendor};
use std::borrow::Cow;

pub fn vendor<'db, D: PciDatabase + ?Sized>(db: &'db D, vendor_id: &str) -> Cow<'db, Vendor> {
    match db.vendor(vendor_id) {
        Some(vendor) => Cow::Borrowed(vendor),
        None => Cow::Owned(Vendor::unknown(vendor_id)),
    }
}

pub fn product<'db, D: PciDatabase + ?Sized>(
    db: &'db D,
    vendor_id: &str,
    product_id: &str,
) -> Cow<'db, Product> {
    match db.product(vendor_id, product_id) {
        Some(product) => Cow::Borrowed(product),
        None => Cow::Owned(Product::unknown(vendor_id, product_id)),
    }
}

/// Subsystem entries are only searched when both the product and the subvendor are known.
pub fn subsystem<'db, D: PciDatabase + ?Sized>(
    db: &'db D,
    vendor_id: &str,
    product_id: &str,
    subvendor_id: &str,
    subproduct_id: &str,
) -> Cow<'db, Product> {
    let found = match (db.product(vendor_id, product_id), db.vendor(subvendor_id)) {
        (Some(product), Some(_)) => product
            .subsystems
            .iter()
            .find(|subsystem| subsystem.id == subproduct_id),
        _ => None,
    };
    match found {
        Some(subsystem) => Cow::Borrowed(subsystem),
        None => Cow::Owned(Product::unknown(subvendor_id, subproduct_id)),
    }
}

pub fn class<'db, D: PciDatabase + ?Sized>(db: &'db D, class_id: &str) -> Cow<'db, Class> {
    match db.class(class_id) {
        Some(class) => Cow::Borrowed(class),
        None => Cow::Owned(Class::unknown(class_id)),
    }
}

pub fn subclass<'db, D: PciDatabase + ?Sized>(
    db: &'db D,
    class_id: &str,
    subclass_id: &str,
) -> Cow<'db, Subclass> {
    let found = db
        .class(class_id)
        .and_then(|class| class.subclasses.iter().find(|subclass| subclass.id == subclass_id));
    match found {
        Some(subclass) => Cow::Borrowed(subclass),
        None => Cow::Owned(Subclass::unknown(subclass_id)),
    }
}

pub fn programming_interface<'db, D: PciDatabase + ?Sized>(
    db: &'db D,
    class_id: &str,
    subclass_id: &str,
    prog_iface_id: &str,
) -> Cow<'db, ProgrammingInterface> {
    let found = match subclass(db, class_id, subclass_id) {
        Cow::Borrowed(subclass) => subclass
            .programming_interfaces
            .iter()
            .find(|interface| interface.id == prog_iface_id),
        // placeholders have no interfaces
        Cow::Owned(_) => None,
    };
    match found {
        Some(interface) => Cow::Borrowed(interface),
        None => Cow::Owned(ProgrammingInterface::unknown(prog_iface_id)),
    }
}

/// Resolves every decoded field and assembles the device.
pub fn device<'db, D: PciDatabase + ?Sized>(
    db: &'db D,
    address: Address,
    modalias: &Modalias,
) -> Device<'db> {
    Device::new(
        address,
        vendor(db, &modalias.vendor_id),
        product(db, &modalias.vendor_id, &modalias.product_id),
        subsystem(
            db,
            &modalias.vendor_id,
            &modalias.product_id,
            &modalias.subvendor_id,
            &modalias.subproduct_id,
        ),
        class(db, &modalias.class_id),
        subclass(db, &modalias.class_id, &modalias.subclass_id),
        programming_interface(
            db,
            &modalias.class_id,
            &modalias.subclass_id,
            &modalias.prog_iface_id,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pciscan_db::{PciIds, UNKNOWN};

    const IDS: &str = "\
10de  NVIDIA Corporation
\t1c82  GP107 [GeForce GTX 1050 Ti]
\t\t1043 8613  Phoenix GeForce GTX 1050 Ti
\t\t1458 3747  GV-N105TOC-4GD
1043  ASUSTeK Computer Inc.
C 03  Display controller
\t00  VGA compatible controller
\t\t00  VGA controller
\t\t01  8514 controller
C 0c  Serial bus controller
\t03  USB controller
\t\t30  XHCI
";

    fn db() -> PciIds {
        PciIds::parse(IDS)
    }

    fn modalias(blob: &str) -> Modalias {
        Modalias::decode(blob.as_bytes()).unwrap()
    }

    #[test]
    fn known_fields_borrow_from_the_database() {
        let db = db();
        assert!(matches!(vendor(&db, "10de"), Cow::Borrowed(v) if v.name == "NVIDIA Corporation"));
        assert!(matches!(product(&db, "10de", "1c82"), Cow::Borrowed(p) if p.id == "1c82"));
        let sub = subsystem(&db, "10de", "1c82", "1043", "8613");
        assert!(matches!(&sub, Cow::Borrowed(_)));
        assert_eq!(sub.name, "Phoenix GeForce GTX 1050 Ti");
        assert_eq!(class(&db, "03").name, "Display controller");
        assert_eq!(subclass(&db, "0c", "03").name, "USB controller");
        assert_eq!(programming_interface(&db, "0c", "03", "30").name, "XHCI");
    }

    #[test]
    fn unknown_vendor_is_a_placeholder() {
        let db = db();
        let vendor = vendor(&db, "abcd");
        assert!(matches!(vendor, Cow::Owned(_)));
        assert_eq!(*vendor, Vendor::unknown("abcd"));
        assert_eq!(vendor.name, UNKNOWN);
        assert!(vendor.products.is_empty());
    }

    #[test]
    fn unknown_product_keeps_its_ids() {
        let db = db();
        assert_eq!(*product(&db, "10de", "ffff"), Product::unknown("10de", "ffff"));
        assert_eq!(*product(&db, "1043", "1c82"), Product::unknown("1043", "1c82"));
    }

    #[test]
    fn subsystem_needs_both_parents() {
        let db = db();
        let missing = Product::unknown("1043", "8613");
        // product missing, subvendor known
        assert_eq!(*subsystem(&db, "10de", "ffff", "1043", "8613"), missing);
        // product known, subvendor missing from the vendor table
        assert_eq!(
            *subsystem(&db, "10de", "1c82", "1458", "3747"),
            Product::unknown("1458", "3747")
        );
        // both missing
        assert_eq!(*subsystem(&db, "abcd", "ffff", "dcba", "8613"), Product::unknown("dcba", "8613"));
        // both known, no such subsystem entry
        assert_eq!(*subsystem(&db, "10de", "1c82", "1043", "0001"), Product::unknown("1043", "0001"));
    }

    #[test]
    fn class_family_misses() {
        let db = db();
        assert_eq!(*class(&db, "ff"), Class::unknown("ff"));
        assert_eq!(*subclass(&db, "ff", "00"), Subclass::unknown("00"));
        assert_eq!(*subclass(&db, "03", "80"), Subclass::unknown("80"));
        assert_eq!(
            *programming_interface(&db, "03", "00", "02"),
            ProgrammingInterface::unknown("02")
        );
        assert_eq!(
            *programming_interface(&db, "03", "80", "00"),
            ProgrammingInterface::unknown("00")
        );
        assert_eq!(
            *programming_interface(&db, "ff", "00", "00"),
            ProgrammingInterface::unknown("00")
        );
    }

    #[test]
    fn class_ids_are_matched_case_sensitively() {
        // Vendor IDs are lowercased by the decoder, class IDs are not, so an
        // uppercase class code misses a lowercase pci.ids entry.
        let db = db();
        let device = device(
            &db,
            Address::new(0, 0, 0x14, 0),
            &modalias("pci:v000010DEd00001C82sv00001043sd00008613bc0Csc03i30"),
        );
        assert_eq!(device.vendor().name, "NVIDIA Corporation");
        assert_eq!(device.class().name, UNKNOWN);
        assert_eq!(device.class().id, "0C");
        assert_eq!(device.subclass().name, UNKNOWN);
        assert_eq!(device.programming_interface().name, UNKNOWN);
    }

    #[test]
    fn branches_resolve_independently() {
        let db = db();
        let vendor_first = (vendor(&db, "10de"), class(&db, "03"), subclass(&db, "03", "00"));
        let class_first = {
            let class = class(&db, "03");
            let subclass = subclass(&db, "03", "00");
            (vendor(&db, "10de"), class, subclass)
        };
        assert_eq!(vendor_first, class_first);
        assert_eq!(
            programming_interface(&db, "03", "00", "01").name,
            "8514 controller"
        );
    }

    #[test]
    fn device_resolution_is_idempotent() {
        let db = db();
        let blob = modalias("pci:v000010DEd00001C82sv00001043sd00008613bc03sc00i00");
        let address = Address::new(0, 3, 0, 0);
        let first = device(&db, address, &blob);
        let second = device(&db, address, &blob);
        assert_eq!(first, second);
        assert_eq!(first.product().name, "GP107 [GeForce GTX 1050 Ti]");
        assert_eq!(first.subsystem().name, "Phoenix GeForce GTX 1050 Ti");
        assert_eq!(first.programming_interface().name, "VGA controller");
        assert_eq!(first.clone().into_owned(), second);
    }
}

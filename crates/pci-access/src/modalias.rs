use serde::Serialize;

/// Identity fields of one device, cut out of its `modalias` line.
///
/// ```text
/// pci:v000010DEd00001C82sv00001043sd00008613bc03sc00i00
///     |vendor  |product |subvendor |subproduct|bc|sc|i
/// ```
///
/// Vendor-family IDs are lowercased, class-family IDs are kept as written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Modalias {
    pub vendor_id: String,
    pub product_id: String,
    pub subvendor_id: String,
    pub subproduct_id: String,
    pub class_id: String,
    pub subclass_id: String,
    pub prog_iface_id: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Vendor,
    Product,
    Subvendor,
    Subproduct,
    Class,
    Subclass,
    ProgIface,
}

pub struct FieldLayout {
    pub field: Field,
    pub start: usize,
    pub end: usize,
    pub lowercase: bool,
}

const fn layout(field: Field, start: usize, end: usize, lowercase: bool) -> FieldLayout {
    FieldLayout {
        field,
        start,
        end,
        lowercase,
    }
}

/// Byte ranges (end exclusive) of every field in the kernel's `pci:` modalias.
pub const LAYOUT: [FieldLayout; 7] = [
    layout(Field::Vendor, 9, 13, true),
    layout(Field::Product, 18, 22, true),
    layout(Field::Subvendor, 28, 32, true),
    layout(Field::Subproduct, 38, 42, true),
    layout(Field::Class, 44, 46, false),
    layout(Field::Subclass, 48, 50, false),
    layout(Field::ProgIface, 51, 53, false),
];

/// Shortest blob that still holds every field of [`LAYOUT`].
pub const MIN_LEN: usize = 53;

impl Modalias {
    /// Extracts the fields by offset. Blobs shorter than [`MIN_LEN`] are not decoded.
    ///
    /// The prefix and field markers are not checked; a garbled blob gives
    /// garbled IDs, which simply miss in the database later on.
    pub fn decode(blob: &[u8]) -> Option<Modalias> {
        if blob.len() < MIN_LEN {
            return None;
        }

        let mut modalias = Modalias {
            vendor_id: String::new(),
            product_id: String::new(),
            subvendor_id: String::new(),
            subproduct_id: String::new(),
            class_id: String::new(),
            subclass_id: String::new(),
            prog_iface_id: String::new(),
        };
        for row in LAYOUT.iter() {
            let raw = String::from_utf8_lossy(&blob[row.start..row.end]);
            let value = if row.lowercase {
                raw.to_ascii_lowercase()
            } else {
                raw.into_owned()
            };
            *modalias.field_mut(row.field) = value;
        }
        Some(modalias)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Vendor => &self.vendor_id,
            Field::Product => &self.product_id,
            Field::Subvendor => &self.subvendor_id,
            Field::Subproduct => &self.subproduct_id,
            Field::Class => &self.class_id,
            Field::Subclass => &self.subclass_id,
            Field::ProgIface => &self.prog_iface_id,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Vendor => &mut self.vendor_id,
            Field::Product => &mut self.product_id,
            Field::Subvendor => &mut self.subvendor_id,
            Field::Subproduct => &mut self.subproduct_id,
            Field::Class => &mut self.class_id,
            Field::Subclass => &mut self.subclass_id,
            Field::ProgIface => &mut self.prog_iface_id,
        }
    }
}

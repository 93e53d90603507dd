use crate::{Class, DbError, PciDatabase, Product, ProgrammingInterface, Subclass, Vendor};
use hashbrown::HashMap;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of `pci.ids`, relative to the filesystem root, in search order.
pub const SEARCH_PATHS: [&str; 4] = [
    "usr/share/hwdata/pci.ids",
    "usr/share/misc/pci.ids",
    "usr/share/pci.ids",
    "usr/local/share/pci.ids",
];

/// The `pci.ids` table, indexed for lookups.
#[derive(Clone, Debug, Default)]
pub struct PciIds {
    vendors: HashMap<String, Vendor>,
    /// `vendor_id + product_id` => index in the vendor's product list
    products: HashMap<String, usize>,
    classes: HashMap<String, Class>,
}

enum Section {
    None,
    Vendor(Vendor),
    Class(Class),
}

fn split_id(line: &str) -> Option<(&str, &str)> {
    let (id, name) = line.split_once(char::is_whitespace)?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some((id, name.trim()))
}

fn split_subsystem(line: &str) -> Option<(&str, &str, &str)> {
    let (subvendor, rest) = line.split_once(char::is_whitespace)?;
    let (subdevice, name) = split_id(rest.trim_start())?;
    if subvendor.is_empty() || !subvendor.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some((subvendor, subdevice, name))
}

impl PciIds {
    /// Reads the first `pci.ids` found under `root`.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self, DbError> {
        let candidates: Vec<PathBuf> = SEARCH_PATHS
            .iter()
            .map(|path| root.as_ref().join(path))
            .collect();
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Self::open(path),
            None => Err(DbError::NotFound(candidates)),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| DbError::Io {
            path: path.to_owned(),
            source,
        })?;
        let ids = Self::parse(&String::from_utf8_lossy(&data));
        info!(
            "Loaded {} vendors and {} classes from {}",
            ids.vendors.len(),
            ids.classes.len(),
            path.display()
        );
        Ok(ids)
    }

    /// Parses `pci.ids` text. Malformed or orphaned lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut ids = PciIds::default();
        let mut section = Section::None;

        for (number, line) in text.lines().enumerate() {
            let number = number + 1;
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let depth = line.bytes().take_while(|b| *b == b'\t').count();
            let body = &line[depth..];

            let parsed = match depth {
                0 => {
                    let next = if let Some(class) = body.strip_prefix("C ") {
                        split_id(class).map(|(id, name)| {
                            Section::Class(Class {
                                id: id.to_owned(),
                                name: name.to_owned(),
                                subclasses: Vec::new(),
                            })
                        })
                    } else {
                        split_id(body).map(|(id, name)| {
                            Section::Vendor(Vendor {
                                id: id.to_owned(),
                                name: name.to_owned(),
                                products: Vec::new(),
                            })
                        })
                    };
                    next.map(|next| ids.close(core::mem::replace(&mut section, next)))
                }
                1 => match &mut section {
                    Section::Vendor(vendor) => split_id(body).map(|(id, name)| {
                        vendor.products.push(Product {
                            vendor_id: vendor.id.clone(),
                            id: id.to_owned(),
                            name: name.to_owned(),
                            subsystems: Vec::new(),
                        })
                    }),
                    Section::Class(class) => split_id(body).map(|(id, name)| {
                        class.subclasses.push(Subclass {
                            id: id.to_owned(),
                            name: name.to_owned(),
                            programming_interfaces: Vec::new(),
                        })
                    }),
                    Section::None => None,
                },
                2 => match &mut section {
                    Section::Vendor(vendor) => vendor.products.last_mut().and_then(|product| {
                        split_subsystem(body).map(|(subvendor, subdevice, name)| {
                            product.subsystems.push(Product {
                                vendor_id: subvendor.to_owned(),
                                id: subdevice.to_owned(),
                                name: name.to_owned(),
                                subsystems: Vec::new(),
                            })
                        })
                    }),
                    Section::Class(class) => class.subclasses.last_mut().and_then(|subclass| {
                        split_id(body).map(|(id, name)| {
                            subclass.programming_interfaces.push(ProgrammingInterface {
                                id: id.to_owned(),
                                name: name.to_owned(),
                            })
                        })
                    }),
                    Section::None => None,
                },
                _ => None,
            };

            if parsed.is_none() {
                warn!("pci.ids:{}: skipping {:?}", number, line);
            }
        }
        ids.close(section);
        debug!("Indexed {} products", ids.products.len());
        ids
    }

    fn close(&mut self, section: Section) {
        match section {
            Section::None => {}
            // A repeated vendor or class is folded into the first one so the
            // product index keeps pointing into a single list.
            Section::Vendor(Vendor { id, name, products }) => {
                let vendor = self.vendors.entry(id.clone()).or_insert_with(|| Vendor {
                    id: id.clone(),
                    name,
                    products: Vec::new(),
                });
                for product in products {
                    let index = vendor.products.len();
                    self.products
                        .entry(format!("{}{}", id, product.id))
                        .or_insert(index);
                    vendor.products.push(product);
                }
            }
            Section::Class(Class {
                id,
                name,
                subclasses,
            }) => {
                let class = self.classes.entry(id.clone()).or_insert_with(|| Class {
                    id,
                    name,
                    subclasses: Vec::new(),
                });
                class.subclasses.extend(subclasses);
            }
        }
    }

    pub fn vendors(&self) -> impl Iterator<Item = &Vendor> {
        self.vendors.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }
}

impl PciDatabase for PciIds {
    fn vendor(&self, vendor_id: &str) -> Option<&Vendor> {
        self.vendors.get(vendor_id)
    }

    fn product(&self, vendor_id: &str, product_id: &str) -> Option<&Product> {
        let index = *self.products.get(&format!("{}{}", vendor_id, product_id))?;
        self.vendors.get(vendor_id)?.products.get(index)
    }

    fn class(&self, class_id: &str) -> Option<&Class> {
        self.classes.get(class_id)
    }
}

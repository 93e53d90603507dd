use clap::Parser;
use log::LevelFilter;
use pciscan_access::SysfsAccess;
use pciscan_db::{DbError, PciIds};
use std::path::PathBuf;

/// List PCI devices with their vendor, product and class names
#[derive(Parser, Debug)]
#[command(name = "pciscan", version)]
pub struct Config {
    /// Filesystem root holding `sys/bus/pci` and `usr/share`
    #[arg(long, env = "PCISCAN_ROOT", default_value = "/")]
    pub root: PathBuf,

    /// pci.ids file to load instead of searching under the root
    #[arg(long, env = "PCIDB_PATH")]
    pub pci_ids: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "PCISCAN_LOG", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Show a single device, as `dddd:bb:ss.f` or `bb:ss.f`
    pub address: Option<String>,
}

impl Config {
    pub fn access(&self) -> SysfsAccess {
        SysfsAccess::new(&self.root)
    }

    pub fn load_database(&self) -> Result<PciIds, DbError> {
        match &self.pci_ids {
            Some(path) => PciIds::open(path),
            None => PciIds::discover(&self.root),
        }
    }
}

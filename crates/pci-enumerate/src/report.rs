use core::fmt::{Display, Formatter};
use log::error;
use pciscan_access::AccessError;

/// Something enumeration had to skip.
#[derive(Debug)]
pub enum Diagnostic {
    /// The candidate list could not be obtained at all
    SourceUnavailable(AccessError),
    /// The address did not parse or its identifier could not be decoded
    DeviceUnavailable { address: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Diagnostic::SourceUnavailable(e) => write!(f, "failed to list PCI devices: {}", e),
            Diagnostic::DeviceUnavailable { address } => write!(
                f,
                "failed to get device information for PCI address {}",
                address
            ),
        }
    }
}

pub trait Reporter {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        error!("{}", diagnostic);
    }
}

impl<F: Fn(&Diagnostic)> Reporter for F {
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

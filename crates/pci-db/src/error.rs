use core::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::PathBuf;

pub enum DbError {
    /// None of the searched locations holds a `pci.ids` file
    NotFound(Vec<PathBuf>),
    Io { path: PathBuf, source: io::Error },
}

impl Debug for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            DbError::NotFound(paths) => {
                write!(f, "pci.ids not found, searched:")?;
                for path in paths {
                    write!(f, " {}", path.display())?;
                }
                Ok(())
            }
            DbError::Io { path, source } => write!(f, "failed to read {}: {}", path.display(), source),
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::NotFound(_) => None,
            DbError::Io { source, .. } => Some(source),
        }
    }
}

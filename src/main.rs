#[macro_use]
extern crate log;

use clap::Parser;
use log::LevelFilter;
use core::fmt::{Debug, Display, Formatter};
use pciscan_db::DbError;
use pciscan_enumerate::Enumerator;
use pciscan_logging::Logger;
use std::io::{self, Stderr, Write};
use std::process::ExitCode;

mod config;
mod output;

use config::Config;

enum CliError {
    Database(DbError),
    NoDevice(String),
    Output(io::Error),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CliError::Database(e) => write!(f, "{}", e),
            CliError::NoDevice(address) => write!(f, "no readable PCI device at {}", address),
            CliError::Output(e) => write!(f, "failed to write output: {}", e),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        CliError::Database(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Output(err)
    }
}

fn run(config: &Config) -> Result<(), CliError> {
    let db = config.load_database()?;
    let enumerator = Enumerator::new(config.access(), &db);
    let devices = match &config.address {
        Some(address) => {
            let device = enumerator
                .device(address)
                .ok_or_else(|| CliError::NoDevice(address.clone()))?;
            vec![device]
        }
        None => enumerator.list(),
    };
    debug!("Resolved {} devices", devices.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (config.json, &config.address) {
        (true, Some(_)) => output::write_json(&mut out, &devices[0])?,
        (true, None) => output::write_json(&mut out, &devices)?,
        (false, _) => output::write_text(&mut out, &db, &devices)?,
    }
    out.flush()?;
    Ok(())
}

/// Whether a panic written through the logger would reach stderr.
fn panics_are_logged(installed: bool, level: LevelFilter) -> bool {
    installed && level >= LevelFilter::Error
}

fn main() -> ExitCode {
    let config = Config::parse();
    let installed = match Logger::new(io::stderr())
        .set_max_level(config.log_level)
        .init()
    {
        Ok(()) => true,
        Err(e) => {
            eprintln!("pciscan: cannot install logger: {}", e);
            false
        }
    };
    let logged = panics_are_logged(installed, config.log_level);
    std::panic::set_hook(Box::new(move |info| {
        if logged {
            Logger::<Stderr>::panic(info)
        } else {
            eprintln!("pciscan: PANIC! {}", info)
        }
    }));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

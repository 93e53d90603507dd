use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;
use std::io::Write;
use std::panic::PanicHookInfo;

pub struct Logger<T> {
    level: LevelFilter,
    writer: Mutex<T>,
}

impl<T: Write + Send + 'static> Logger<T> {
    pub fn new(target: T) -> Logger<T> {
        Logger {
            level: LevelFilter::Warn,
            writer: Mutex::new(target),
        }
    }

    pub fn set_max_level(mut self, level: LevelFilter) -> Logger<T> {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Writes the panic through the installed logger, for use in a panic hook.
    pub fn panic(info: &PanicHookInfo<'_>) {
        log::logger().log(
            &Record::builder()
                .level(log::Level::Error)
                .target("panic")
                .args(format_args!("PANIC! {}", info))
                .build(),
        );
        log::logger().flush();
    }
}

impl<T: Write + Send> Log for Logger<T> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = if !record.target().is_empty() {
            record.target()
        } else {
            record.module_path().unwrap_or_default()
        };

        let mut writer = self.writer.lock();
        // a logger has nowhere to report its own write failures
        let _ = writeln!(writer, "[{}] {} {}", record.level(), target, record.args());
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}

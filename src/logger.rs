use std::{fs::{File, OpenOptions}, io::Write, path::Path, sync::{Mutex, OnceLock}};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

// stdout belongs to the game screen, so records go to a file
pub struct Logger {
    file: Mutex<File>,
}

impl Logger {
    fn new(file: File) -> Self {
        Self { file: Mutex::new(file) }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        if let Ok(mut out) = self.file.lock() {
            let _ = writeln!(out, "[{}][{}:{}] {}", timestamp, file_name, line, message);
        }
    }
}

pub fn init_logger(path: &Path) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    LOGGER.get_or_init(|| Logger::new(file));
    Ok(())
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Info,
    Error,
}

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        let line_text = self.format_line(level, file, line, message);
        match level {
            LogLevel::Info => println!("{}", line_text),
            LogLevel::Error => eprintln!("{}", line_text),
        }
    }

    fn format_line(&self, level: LogLevel, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let marker = match level {
            LogLevel::Info => "",
            LogLevel::Error => "[ERROR]",
        };
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}][{}:{}]{} {}", timestamp, prefix, file_name, line, marker, message)
        } else {
            format!("[{}][{}:{}]{} {}", timestamp, file_name, line, marker, message)
        }
    }
}

pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

/// Library code may log before the binary calls [`init_logger`] (tests do);
/// such lines go through an unprefixed logger.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    LOGGER
        .get_or_init(|| Logger::new(None))
        .log(level, file, line, message);
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Error, file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_strips_directories() {
        let logger = Logger::new(Some("Arcade".to_string()));
        let line = logger.format_line(LogLevel::Info, "src/games/memory/session.rs", 12, "hello");
        assert!(line.ends_with("[Arcade][session.rs:12] hello"));
    }

    #[test]
    fn test_format_line_marks_errors() {
        let logger = Logger::new(None);
        let line = logger.format_line(LogLevel::Error, "C:\\src\\store.rs", 7, "boom");
        assert!(line.ends_with("[store.rs:7][ERROR] boom"));
    }
}

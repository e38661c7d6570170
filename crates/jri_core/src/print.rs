use std::{
    fmt::Display,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    sync::{LazyLock, Mutex},
};

use chrono::{Datelike, Timelike};
use regex::Regex;

use crate::file_utils;

#[derive(Clone, Copy)]
pub enum LogType {
    Info,
    Error,
    Point,
}

impl Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LogType::Info => "[info]",
                LogType::Error => "[error]",
                LogType::Point => "-",
            }
        )
    }
}

static LOG_FILE: LazyLock<Option<Mutex<BufWriter<File>>>> =
    LazyLock::new(|| Some(Mutex::new(BufWriter::new(get_logs_file()?))));

fn get_logs_file() -> Option<File> {
    let logs_dir = file_utils::get_data_dir()?.join("logs");
    std::fs::create_dir_all(&logs_dir).ok()?;
    let now = chrono::Local::now();
    let log_file_name = format!(
        "{}-{}-{}-{}-{}-{}.log",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    );
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join(log_file_name))
        .ok()
}

pub fn print_to_file(msg: &str, t: LogType) {
    if let Some(file) = LOG_FILE.as_ref() {
        if let Ok(mut lock) = file.lock() {
            _ = writeln!(lock, "{t} {msg}");
            _ = lock.flush();
        } else {
            eprintln!("jri_core::print::print_to_file(): Logger poisoned!\n[msg]: {msg}");
        }
    }
}

/// Removes ANSI escape codes (colors, formatting) from a string.
pub fn strip_ansi_codes(input: &str) -> String {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[A-Za-z]").expect("valid regex literal"));
    RE.replace_all(input, "").to_string()
}

/// Print an informational message.
/// Saved to a log file.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        let plain_text = $crate::print::strip_ansi_codes(&format!("{}", format_args!($($arg)*)));
        println!("{} {}", owo_colors::OwoColorize::yellow(&"[info]"), format_args!($($arg)*));
        $crate::print::print_to_file(&plain_text, $crate::print::LogType::Info);
    }};
}

/// Print an error message.
/// Saved to a log file.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {{
        let plain_text = $crate::print::strip_ansi_codes(&format!("{}", format_args!($($arg)*)));
        eprintln!("{} {}", owo_colors::OwoColorize::red(&"[error]"), format_args!($($arg)*));
        $crate::print::print_to_file(&plain_text, $crate::print::LogType::Error);
    }};
}

/// Print a point message, i.e. a small step in some process.
/// Saved to a log file.
#[macro_export]
macro_rules! pt {
    ($($arg:tt)*) => {{
        let plain_text = $crate::print::strip_ansi_codes(&format!("{}", format_args!($($arg)*)));
        println!("{} {}", owo_colors::OwoColorize::bold(&"-"), format_args!($($arg)*));
        $crate::print::print_to_file(&plain_text, $crate::print::LogType::Point);
    }};
}

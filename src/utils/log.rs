// src/utils/log.rs

//! Console reporting for user-facing messages.
//!
//! Diagnostics go through the `log` facade. This module is for the lines a
//! person at the terminal is meant to read: toasts, section headers and
//! summaries, stamped with local time.

use std::sync::OnceLock;

use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "warn" | "warning" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

static THRESHOLD: OnceLock<LogLevel> = OnceLock::new();

/// Set the minimum level shown. Only the first call has an effect.
pub fn init(level: &str) {
    let _ = THRESHOLD.set(LogLevel::parse(level));
}

fn enabled(level: LogLevel) -> bool {
    level >= THRESHOLD.get().copied().unwrap_or(LogLevel::Info)
}

fn line(level: LogLevel, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level.tag(),
        message
    )
}

pub fn debug(message: &str) {
    if enabled(LogLevel::Debug) {
        eprintln!("{}", line(LogLevel::Debug, message));
    }
}

pub fn info(message: &str) {
    if enabled(LogLevel::Info) {
        println!("{}", line(LogLevel::Info, message));
    }
}

pub fn warn(message: &str) {
    if enabled(LogLevel::Warn) {
        eprintln!("{}", line(LogLevel::Warn, message));
    }
}

pub fn error(message: &str) {
    if enabled(LogLevel::Error) {
        eprintln!("{}", line(LogLevel::Error, message));
    }
}

/// Confirmation shown regardless of threshold.
pub fn success(message: &str) {
    println!("{}", line(LogLevel::Info, &format!("✓ {}", message)));
}

pub fn header(title: &str) {
    if enabled(LogLevel::Info) {
        let border = "═".repeat(60);
        println!("{}", line(LogLevel::Info, &border));
        println!("{}", line(LogLevel::Info, &format!("  {}", title)));
        println!("{}", line(LogLevel::Info, &border));
    }
}

pub fn sub_item(message: &str) {
    if enabled(LogLevel::Info) {
        println!("{}", line(LogLevel::Info, &format!("    {}", message)));
    }
}

/// Titled key/value block.
pub fn summary(title: &str, items: &[(&str, String)]) {
    if !enabled(LogLevel::Info) {
        return;
    }
    println!("{}", line(LogLevel::Info, &format!("[SUMMARY] {}", title)));
    let width = items.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in items {
        let item = format!("    {:<width$}  {}", key, value, width = width);
        println!("{}", line(LogLevel::Info, &item));
    }
}

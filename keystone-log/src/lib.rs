//! Keystone Logging
//!
//! Progress and diagnostic logging for Keystone feature composition.
//!
//! Mutators report what they are doing at the `lifecycle` level, which sits
//! between `info` and `warn` and is shown by default. Everything below it is
//! opt-in through the environment.
//!
//! # Usage
//!
//! ```rust
//! use keystone_log::{debug, lifecycle, warn};
//!
//! lifecycle!("Apply kotlin support");
//! debug!(target: "keystone::registry", "capability {} already installed", "org.sonarqube");
//! warn!("devtools requested without bootJar");
//! ```
//!
//! # Environment Variables
//!
//! - `KEYSTONE_DEBUG=1` - Enable debug logging
//! - `KEYSTONE_LOG_LEVEL=trace|debug|info|lifecycle|warn|error|off`
//! - `KEYSTONE_LOG_FORMAT=pretty|compact|json`
//! - `KEYSTONE_LOG_COLOR=1|0` - Enable/disable colors
//! - `KEYSTONE_LOG_TIMESTAMPS=1|0`

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Log level for Keystone logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    /// Progress of feature application, shown by default
    Lifecycle = 3,
    Warn = 4,
    Error = 5,
    Off = 6,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "lifecycle" | "quiet" => Some(Level::Lifecycle),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Lifecycle => "LIFECYCLE",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Lifecycle,
            4 => Level::Warn,
            5 => Level::Error,
            _ => Level::Off,
        }
    }

    #[cfg(feature = "color")]
    fn colored(&self) -> colored::ColoredString {
        use colored::Colorize;
        match self {
            Level::Trace => "TRACE".magenta(),
            Level::Debug => "DEBUG".blue(),
            Level::Info => "INFO".green(),
            Level::Lifecycle => "LIFECYCLE".cyan(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERROR".red().bold(),
            Level::Off => "OFF".white(),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Trace,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-column format with timestamp, level and target
    Pretty,
    /// Bare message lines, the way a build tool prints progress
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Lifecycle as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration.
#[derive(Debug)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Lifecycle,
            format: Format::Compact,
            color: false,
            timestamps: false,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Read the configuration from `KEYSTONE_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("KEYSTONE_DEBUG").unwrap_or(defaults.debug);

        let level = env::var("KEYSTONE_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("KEYSTONE_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(defaults.format);

        let color = env_flag("KEYSTONE_LOG_COLOR")
            .unwrap_or_else(|| env::var("NO_COLOR").is_err() && env::var("TERM").is_ok());

        let timestamps = env_flag("KEYSTONE_LOG_TIMESTAMPS").unwrap_or(format == Format::Pretty);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            color,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Eagerly read the environment configuration.
///
/// Called implicitly by the first level check and by the runtime setters,
/// so the environment is applied before anything is filtered and an
/// explicit `set_level` always wins over it.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    init();
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    init();
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    init();
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Enable or disable debug mode at runtime.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

/// Write a message at the given level. Used by the macros.
#[doc(hidden)]
pub fn emit(level: Level, target: &str, message: &str) {
    let config = config();
    if !is_level_enabled(level) {
        return;
    }

    let mut stderr = std::io::stderr().lock();
    let _ = match config.format {
        Format::Pretty => write_pretty(&mut stderr, level, target, message, config),
        Format::Compact => write_compact(&mut stderr, level, message, config),
        Format::Json => write_json(&mut stderr, level, target, message),
    };
}

fn write_pretty(
    out: &mut impl Write,
    level: Level,
    target: &str,
    message: &str,
    config: &LogConfig,
) -> std::io::Result<()> {
    if config.timestamps {
        write!(out, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))?;
    }

    #[cfg(feature = "color")]
    if config.color {
        write!(out, "{:9} ", level.colored())?;
    } else {
        write!(out, "{:9} ", level.as_str())?;
    }
    #[cfg(not(feature = "color"))]
    write!(out, "{:9} ", level.as_str())?;

    if !target.is_empty() {
        write!(out, "[{}] ", target)?;
    }
    writeln!(out, "{}", message)
}

fn write_compact(
    out: &mut impl Write,
    level: Level,
    message: &str,
    config: &LogConfig,
) -> std::io::Result<()> {
    if config.timestamps {
        write!(out, "{} ", chrono::Local::now().format("%H:%M:%S"))?;
    }
    // Progress lines print bare, everything else carries its level.
    if level == Level::Lifecycle {
        writeln!(out, "{}", message)
    } else {
        writeln!(out, "{}: {}", level.as_str().to_lowercase(), message)
    }
}

#[cfg(feature = "json")]
fn write_json(
    out: &mut impl Write,
    level: Level,
    target: &str,
    message: &str,
) -> std::io::Result<()> {
    #[derive(serde::Serialize)]
    struct LogEntry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = LogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    match serde_json::to_string(&entry) {
        Ok(json) => writeln!(out, "{}", json),
        Err(_) => Ok(()),
    }
}

#[cfg(not(feature = "json"))]
fn write_json(
    out: &mut impl Write,
    level: Level,
    target: &str,
    message: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target.escape_default(),
        message.escape_default()
    )
}

// ============================================================================
// `log` crate bridge
// ============================================================================

struct Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        is_level_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            emit(
                record.level().into(),
                record.target(),
                &record.args().to_string(),
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static BRIDGE: Bridge = Bridge;

/// Route records emitted through the `log` crate into Keystone's output.
///
/// Returns `false` when another logger was installed first.
pub fn init_log_bridge() -> bool {
    init();
    if log::set_logger(&BRIDGE).is_err() {
        return false;
    }
    log::set_max_level(log::LevelFilter::Trace);
    true
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::emit($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__log_at!($level, target: module_path!(), $($arg)+)
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Trace, $($arg)+) };
}

/// Log a debug message.
///
/// Enabled by `KEYSTONE_DEBUG=1` or `KEYSTONE_LOG_LEVEL=debug`.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Debug, $($arg)+) };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Info, $($arg)+) };
}

/// Log a progress message, e.g. `Apply ktlint support`.
#[macro_export]
macro_rules! lifecycle {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Lifecycle, $($arg)+) };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Warn, $($arg)+) };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log_at!($crate::Level::Error, $($arg)+) };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! A `tracing` subscriber that honors the Keystone log level.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let config = config();
        let level = match config.level {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            // tracing has no progress level; lifecycle lines are info events
            Level::Lifecycle => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(config.color))
    }
}

// ============================================================================
// Tests
// ============================================================================

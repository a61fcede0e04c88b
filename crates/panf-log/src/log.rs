use std::{
    io::Write,
    sync::{OnceLock, Mutex, PoisonError},
};

use core::{
    fmt::Arguments,
    str::FromStr,
};

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::*;

use crate::fmt::SegmentSpec;

/// Handle to a format registered with [`custom_fmt`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CustomFmt(usize);

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {

    pub fn label(self) -> &'static str {
        match self {
            Self::Always => "LOG",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("off") {
            Ok(Self::Always)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

pub enum LevelFmt {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl LevelFmt {

    #[inline(always)]
    pub fn level(&self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Warn => Level::Warn,
            Self::Info => Level::Info,
            Self::Debug => Level::Debug,
            Self::Trace => Level::Trace,
            Self::Other(_, level) => *level,
        }
    }
}

/// Per-target verbosity parsed from a `RUST_LOG` style string.
///
/// The string is a comma separated list of `level` or `module::path=level`
/// directives. A bare level sets the base level, which defaults to `error`.
/// Repeated directives for one module keep the least verbose level.
struct Filters {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filters {

    fn parse(spec: &str) -> Self {
        let mut filters = Self::default();
        for arg in spec.split(',') {
            let arg = arg.trim();
            if arg.is_empty() {
                continue
            }
            let (module, level) = match arg.split_once('=') {
                Some((module, level)) => (Some(module.trim()), level.trim()),
                None => (None, arg),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            if let Some(module) = module {
                let entry = filters.target_levels
                    .entry(CompactString::new(module))
                    .or_insert(level);
                *entry = (*entry).min(level);
            } else {
                filters.base_level = level;
            }
        }
        filters
    }

    fn from_env() -> Self {
        std::env::var("RUST_LOG")
            .map(|env| Self::parse(&env))
            .unwrap_or_default()
    }

    fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }
}

struct Logger<W: WriteColor> {
    out: W,
    error_fmt: LogFmt,
    warn_fmt: LogFmt,
    info_fmt: LogFmt,
    debug_fmt: LogFmt,
    trace_fmt: LogFmt,
    custom_fmt: Vec<LogFmt>,
    filters: Filters,
}

impl<W: WriteColor> Logger<W> {

    fn new(out: W, filters: Filters) -> Self {
        Self {
            out,
            error_fmt: LogFmt::labeled(Color::Red),
            warn_fmt: LogFmt::labeled(Color::Yellow),
            info_fmt: LogFmt::labeled(Color::Green),
            debug_fmt: LogFmt::labeled(Color::Blue),
            trace_fmt: LogFmt::labeled(Color::Magenta),
            custom_fmt: Vec::new(),
            filters,
        }
    }

    fn register(&mut self, fmt: LogFmt) -> CustomFmt {
        self.custom_fmt.push(fmt);
        CustomFmt(self.custom_fmt.len() - 1)
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: Arguments) -> Result<bool> {
        let record_level = level.level();
        if self.filters.target_level(target) < record_level {
            return Ok(false)
        }
        let fmt = match level {
            LevelFmt::Error => &self.error_fmt,
            LevelFmt::Warn => &self.warn_fmt,
            LevelFmt::Info => &self.info_fmt,
            LevelFmt::Debug => &self.debug_fmt,
            LevelFmt::Trace => &self.trace_fmt,
            LevelFmt::Other(CustomFmt(index), _) => {
                self.custom_fmt
                    .get(index)
                    .ok_or(LogError::UnknownFormat { index })?
            },
        };
        for segment in fmt {
            match segment {
                SegmentSpec::Message(spec) => {
                    write_segment(&mut self.out, spec, msg)?
                },
                SegmentSpec::Text(text, spec) => {
                    write_segment(&mut self.out, spec, format_args!("{}", text))?
                },
                SegmentSpec::Target(spec) => {
                    write_segment(&mut self.out, spec, format_args!("{}", target))?
                },
                SegmentSpec::Level(spec) => {
                    write_segment(&mut self.out, spec, format_args!("{}", record_level.label()))?
                },
            }
        }
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(true)
    }
}

fn write_segment<W: WriteColor>(out: &mut W, spec: &LogSpec, args: Arguments) -> Result<()> {
    if let Some(color_spec) = &spec.color_spec {
        out.set_color(color_spec)?;
        out.write_fmt(args)?;
        out.reset()?;
    } else {
        out.write_fmt(args)?;
    }
    Ok(())
}

static LOGGER: OnceLock<Mutex<Logger<StandardStream>>> = OnceLock::new();

/// Installs the global stderr logger, reading `RUST_LOG` once. Later calls do nothing.
pub fn init() {
    LOGGER.get_or_init(|| {
        Mutex::new(Logger::new(
            StandardStream::stderr(ColorChoice::Auto),
            Filters::from_env(),
        ))
    });
}

#[inline(always)]
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

fn with_logger<R>(f: impl FnOnce(&mut Logger<StandardStream>) -> R) -> Option<R> {
    let logger = LOGGER.get()?;
    let mut guard = logger
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Some(f(&mut guard))
}

macro_rules! level_fmt_setters {
    ($($level:ident),+ $(,)?) => {
        paste::paste! {
            $(
                #[inline(always)]
                pub fn [<$level _fmt>](f: impl FnOnce(&mut LogFmtBuilder)) -> Result<()> {
                    with_logger(|logger| {
                        let mut builder = LogFmtBuilder::new(&mut logger.[<$level _fmt>]);
                        f(&mut builder);
                    }).ok_or(LogError::Uninitialized)
                }
            )+
        }
    };
}

level_fmt_setters!(error, warn, info, debug, trace);

#[inline(always)]
pub fn custom_fmt(fmt: LogFmt) -> Result<CustomFmt> {
    with_logger(|logger| logger.register(fmt))
        .ok_or(LogError::Uninitialized)
}

/// Writes one record. Returns `Ok(false)` when the record was filtered out
/// or the logger has not been initialized.
#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: Arguments) -> Result<bool> {
    with_logger(|logger| logger.log(target, level, args))
        .unwrap_or(Ok(false))
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

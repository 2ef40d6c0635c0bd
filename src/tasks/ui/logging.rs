/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use log::{Level, LevelFilter};
use std::fmt;
use std::path::{Path, PathBuf};

/// Builder-style setup for logging
#[derive(Debug, Clone)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
    color: bool,
}

impl Default for GlobalLogger {
    fn default() -> Self {
        GlobalLogger { path: None, verbosity: Verbosity::Default, color: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Quiet, Default, Loud }

const OUR_CRATES: &[&str] = &["lupfit_tasks", "lupfit_polyfit", "lupfit_linalg"];

impl GlobalLogger {
    /// Also write the log to this file.  It is created or truncated on `apply()`.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Negative is quiet, zero is the default, positive is loud.
    pub fn verbosity(&mut self, level: i32) -> &mut Self
    {
        self.verbosity = match level {
            l if l < 0 => Verbosity::Quiet,
            0 => Verbosity::Default,
            _ => Verbosity::Loud,
        };
        self
    }

    pub fn color(&mut self, color: bool) -> &mut Self
    { self.color = color; self }

    fn crate_level(&self) -> LevelFilter {
        match self.verbosity {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Default => LevelFilter::Debug,
            Verbosity::Loud => LevelFilter::Trace,
        }
    }

    /// Install the global logger.  Fails if one is already installed.
    pub fn apply(&mut self) -> FailResult<()>
    {
        use std::time::Instant;

        let start = Instant::now();
        let color = self.color;
        let mut fern = ::fern::Dispatch::new();
        fern = fern.format(move |out, message, record| {
                let t = start.elapsed();
                out.finish(format_args!("[{:>4}.{:03}s][{}][{}] {}",
                    t.as_secs(),
                    t.subsec_millis(),
                    record.target(),
                    ColorizedLevel { level: record.level(), color },
                    message))
            })
            .level(match self.verbosity {
                Verbosity::Quiet => LevelFilter::Warn,
                _ => LevelFilter::Info,
            });
        for name in OUR_CRATES {
            fern = fern.level_for(*name, self.crate_level());
        }
        // stdout is reserved for results
        fern = fern.chain(::std::io::stderr());

        if let Some(path) = self.path.as_ref() {
            fern = fern.chain(::fern::log_file(path)?);
        }

        fern.apply()?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel {
    pub level: Level,
    pub color: bool,
}

impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.color {
            return write!(f, "{}", self.level);
        }
        let style = match self.level {
            Level::Error => ::ansi_term::Colour::Red.bold(),
            Level::Warn  => ::ansi_term::Colour::Red.normal(),
            Level::Info  => ::ansi_term::Colour::Cyan.bold(),
            Level::Debug => ::ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ::ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", style.paint(self.level.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        let mut logger = GlobalLogger::default();
        assert_eq!(logger.crate_level(), LevelFilter::Debug);
        assert_eq!(logger.verbosity(2).crate_level(), LevelFilter::Trace);
        assert_eq!(logger.verbosity(-1).crate_level(), LevelFilter::Warn);
        assert_eq!(logger.verbosity(0).crate_level(), LevelFilter::Debug);
    }

    #[test]
    fn plain_level() {
        let level = ColorizedLevel { level: Level::Warn, color: false };
        assert_eq!(level.to_string(), "WARN");

        let painted = ColorizedLevel { level: Level::Warn, color: true }.to_string();
        assert!(painted.contains("WARN"));
        assert_ne!(painted, "WARN");
    }
}

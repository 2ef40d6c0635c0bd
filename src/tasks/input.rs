/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Two-column sample files.
//!
//! One `x y` pair per line, separated by whitespace and/or a comma.
//! Blank lines and lines beginning with `#` are skipped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not read '{name}': {source}")]
    Io { name: String, source: io::Error },

    #[error("{name}:{line}: expected two columns, found {found}")]
    Columns { name: String, line: usize, found: usize },

    #[error("{name}:{line}: invalid number '{text}': {source}")]
    Number { name: String, line: usize, text: String, source: ParseFloatError },
}

/// Where samples come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` means stdin.
    pub fn from_arg(arg: &str) -> Source {
        match arg {
            "-" => Source::Stdin,
            path => Source::File(path.into()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Stdin => write!(f, "<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Samples {
    pub fn len(&self) -> usize { self.x.len() }
    pub fn is_empty(&self) -> bool { self.x.is_empty() }
}

pub fn read_samples(source: &Source) -> Result<Samples, ReadError> {
    let name = source.to_string();
    match source {
        Source::Stdin => {
            let stdin = io::stdin();
            let lock = stdin.lock();
            parse_samples(lock, &name)
        },
        Source::File(path) => {
            let file = File::open(path).map_err(|source| ReadError::Io { name: name.clone(), source })?;
            parse_samples(BufReader::new(file), &name)
        },
    }
}

/// `name` is only used in error messages.
pub fn parse_samples(reader: impl BufRead, name: &str) -> Result<Samples, ReadError> {
    let mut samples = Samples::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| ReadError::Io { name: name.to_owned(), source })?;
        let line_number = index + 1;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let words: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .collect();
        if words.len() != 2 {
            return Err(ReadError::Columns { name: name.to_owned(), line: line_number, found: words.len() });
        }

        let parse = |text: &str| text.parse::<f64>().map_err(|source| ReadError::Number {
            name: name.to_owned(),
            line: line_number,
            text: text.to_owned(),
            source,
        });
        samples.x.push(parse(words[0])?);
        samples.y.push(parse(words[1])?);
    }
    Ok(samples)
}

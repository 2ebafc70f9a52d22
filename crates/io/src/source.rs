//! Sample sources: typed-in bit strings and comma-separated files.
//!
//! Both produce a validated [`SampleSet`], so anything that reaches the
//! builder already has equal widths and only 0/1 values.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use statemat_core::SampleSet;
use tracing::{info, warn};

use crate::error::IoError;

/// Parse one bit string such as `"0101"`, `"0,1,0,1"` or `"0 1 0 1"`.
///
/// Commas and whitespace are separators; every other character must be `0`
/// or `1`. Errors report line 1.
pub fn parse_bits(text: &str, m: usize) -> Result<Vec<u8>, IoError> {
    let bits = parse_line(text, 1)?;
    check_width(bits, m, 1)
}

fn parse_line(text: &str, line: usize) -> Result<Vec<u8>, IoError> {
    text.chars()
        .enumerate()
        .filter(|(_, c)| *c != ',' && !c.is_whitespace())
        .map(|(i, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(IoError::InvalidCell {
                line,
                column: i + 1,
                found: other.to_string(),
            }),
        })
        .collect()
}

fn check_width(bits: Vec<u8>, expected: usize, line: usize) -> Result<Vec<u8>, IoError> {
    if bits.len() != expected {
        return Err(IoError::WidthMismatch {
            line,
            expected,
            got: bits.len(),
        });
    }
    Ok(bits)
}

/// Samples typed in one per entry, each a bit string of width `m`.
pub fn parse_manual<I, S>(entries: I, m: usize) -> Result<SampleSet, IoError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let samples = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let bits = parse_line(entry.as_ref(), i + 1)?;
            check_width(bits, m, i + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if samples.is_empty() {
        return Err(IoError::EmptyInput);
    }
    Ok(SampleSet::new(samples)?)
}

/// Read comma-separated samples, one per line.
///
/// Blank lines are skipped. The width is taken from the first sample; every
/// cell must be exactly `0` or `1`.
pub fn read_csv<R: BufRead>(reader: R) -> Result<SampleSet, IoError> {
    let mut samples: Vec<Vec<u8>> = Vec::new();
    let mut width: Option<usize> = None;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| IoError::Io {
            path: "<input>".to_string(),
            message: e.to_string(),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let bits = line
            .split(',')
            .enumerate()
            .map(|(col, cell)| match cell.trim() {
                "0" => Ok(0),
                "1" => Ok(1),
                other => Err(IoError::InvalidCell {
                    line: line_no,
                    column: col + 1,
                    found: other.to_string(),
                }),
            })
            .collect::<Result<Vec<u8>, _>>()
            .inspect_err(|e| warn!(line = line_no, error = %e, "rejected csv line"))?;

        let expected = *width.get_or_insert(bits.len());
        samples.push(check_width(bits, expected, line_no)?);
    }

    if samples.is_empty() {
        return Err(IoError::EmptyInput);
    }
    Ok(SampleSet::new(samples)?)
}

/// [`read_csv`] on a file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<SampleSet, IoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let set = read_csv(BufReader::new(file))?;
    info!(path = %path.display(), n = set.n(), m = set.m(), "samples loaded");
    Ok(set)
}

use crate::error::SourceError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Trait for anything that can supply the integers of one pipeline run
pub trait NumberSource {
    /// Load every integer available at `location`, in order
    fn read_numbers(&self, location: &Path) -> std::result::Result<Vec<i64>, SourceError>;

    /// Get a human-readable name for this source
    fn name(&self) -> &str {
        "source"
    }
}

/// Parse whitespace-separated signed integers from a reader.
///
/// Parsing stops at the first token that is not a base-10 `i64`. A leading
/// integer in that token (`6` in `6abc`, `1` in `1.5`) is still kept;
/// everything after it is dropped without error. Overflow ends parsing
/// without keeping the overflowing value.
pub fn parse_numbers<R: BufRead>(mut reader: R) -> io::Result<Vec<i64>> {
    let mut numbers = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        for token in line
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
        {
            match parse_token(token) {
                Some(n) => numbers.push(n),
                None => {
                    if let Some(n) = leading_integer(token) {
                        numbers.push(n);
                    }
                    debug!(
                        token = %String::from_utf8_lossy(token),
                        parsed = numbers.len(),
                        "stopping at non-numeric token"
                    );
                    return Ok(numbers);
                }
            }
        }
    }

    Ok(numbers)
}

fn parse_token(token: &[u8]) -> Option<i64> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

/// Longest `[+-]?[0-9]+` prefix of `token`, if it fits an `i64`
fn leading_integer(token: &[u8]) -> Option<i64> {
    let sign = usize::from(matches!(token.first(), Some(b'+' | b'-')));
    let digits = token[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    parse_token(&token[..sign + digits])
}

/// Reads integers from a text file on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FileNumberSource;

impl NumberSource for FileNumberSource {
    fn read_numbers(&self, location: &Path) -> std::result::Result<Vec<i64>, SourceError> {
        let unavailable = |source: io::Error| SourceError::Unavailable {
            path: location.to_path_buf(),
            source,
        };

        // The handle is dropped when this call returns
        let file = File::open(location).map_err(unavailable)?;
        parse_numbers(BufReader::new(file)).map_err(unavailable)
    }

    fn name(&self) -> &str {
        "file"
    }
}

/// Serves a fixed sequence regardless of the location asked for
#[derive(Debug, Clone, Default)]
pub struct StaticNumberSource {
    numbers: Vec<i64>,
}

impl StaticNumberSource {
    /// Create a source that always yields `numbers`
    pub fn new(numbers: impl Into<Vec<i64>>) -> Self {
        Self {
            numbers: numbers.into(),
        }
    }
}

impl NumberSource for StaticNumberSource {
    fn read_numbers(&self, _location: &Path) -> std::result::Result<Vec<i64>, SourceError> {
        Ok(self.numbers.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

//! Bounded input reading for token files and JSON documents

use bootstrap_token::config::compile_time::cli::{MAX_BATCH_TOKENS, MAX_FILE_SIZE};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// A candidate token together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: String,
    pub raw: String,
}

/// Read at most `MAX_FILE_SIZE` bytes, failing if the input is larger
pub fn read_bounded<R: Read>(reader: R, label: &str) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.take(MAX_FILE_SIZE + 1).read_to_end(&mut buffer)?;

    if buffer.len() as u64 > MAX_FILE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} exceeds the {} byte input limit", label, MAX_FILE_SIZE),
        ));
    }

    Ok(buffer)
}

pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    read_bounded(file, &path.display().to_string())
}

/// Split token-per-line text into candidates
///
/// Only line endings are stripped; surrounding whitespace stays and will fail
/// the grammar. Blank lines and lines starting with `#` are skipped.
pub fn token_lines(bytes: &[u8], label: &str) -> io::Result<Vec<Candidate>> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", label, e),
        )
    })?;

    let mut candidates = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if candidates.len() == MAX_BATCH_TOKENS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} holds more than {} tokens", label, MAX_BATCH_TOKENS),
            ));
        }

        candidates.push(Candidate {
            source: format!("{}:{}", label, index + 1),
            raw: line.to_string(),
        });
    }

    Ok(candidates)
}

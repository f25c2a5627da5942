//! Turns LS-8 program text into raw instruction bytes.
//!
//! Program sources carry one binary instruction literal per line. A `#`
//! starts a trailing comment; blank lines and lines that do not parse as a
//! binary literal are skipped.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoaderError {
    #[error("no instruction lines found in program source")]
    MissingProgramSource,
}

pub type Result<T> = std::result::Result<T, LoaderError>;

pub fn parse_program(source: &str) -> Result<Vec<u8>> {
    let mut program = Vec::new();
    for line in source.lines() {
        let literal = match line.split_once('#') {
            Some((code, _comment)) => code,
            None => line,
        };
        if let Ok(byte) = u8::from_str_radix(literal.trim(), 2) {
            program.push(byte);
        }
    }
    if program.is_empty() {
        return Err(LoaderError::MissingProgramSource);
    }
    Ok(program)
}

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpcodeError {
    #[error("bit index {0} out of bounds, must be [0, 8)")]
    IndexOutOfBounds(usize),
}

pub type Result<T> = std::result::Result<T, OpcodeError>;

/// A fetched opcode byte with checked bit extraction.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Opcode8 {
    value: u8,
}

impl fmt::Debug for Opcode8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("0x{:02X}", self.value))
    }
}

impl Opcode8 {
    pub const fn new(value: u8) -> Self {
        Self { value }
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub fn get_bit(&self, idx: usize) -> u8 {
        self.try_get_bit(idx).unwrap()
    }

    pub fn try_get_bit(&self, idx: usize) -> Result<u8> {
        if idx >= 8 {
            return Err(OpcodeError::IndexOutOfBounds(idx));
        }
        Ok((self.value >> idx) & 0x01)
    }
}

use std::fmt;

use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressableComponentError {
    #[error("address 0x{address:04X} is outside the 0x{size:04X}-byte address space")]
    OutOfBounds { address: usize, size: usize },
    #[error(
        "program of {len} bytes does not fit at 0x{start:04X} in a 0x{size:04X}-byte address space"
    )]
    ProgramTooLarge { len: usize, start: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, AddressableComponentError>;

#[derive(Debug, Eq, Hash, PartialEq)]
pub struct ComponentId {
    name: String,
    uuid: Uuid,
}

impl Clone for ComponentId {
    fn clone(&self) -> Self {
        Self {
            name: String::from(self.name.as_str()),
            uuid: self.uuid,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

impl ComponentId {
    pub fn new(name: &str) -> Self {
        ComponentId {
            name: String::from(name),
            uuid: Uuid::new_v4(),
        }
    }
}

pub trait Component: 'static + Send + Sync {
    fn id(&self) -> &ComponentId;
}

/// A component whose state is reachable by absolute byte address.
pub trait AddressableComponent: Component {
    fn read(&self, address: usize, length: usize) -> Result<Bytes>;
    fn write(&self, address: usize, data: &[u8]) -> Result<()>;
}

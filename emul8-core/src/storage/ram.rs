use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::component::{
    AddressableComponent, AddressableComponentError, Component, ComponentId, Result,
};

#[derive(Clone, Debug)]
struct RamState<const N: usize> {
    buffer: [u8; N],
    bytes_read: usize,
    bytes_written: usize,
    num_reads: usize,
    num_writes: usize,
}

/// Fixed-size, zero-initialized byte memory. Cloning shares the underlying
/// buffer, so a machine and its CPU can address the same cells.
#[derive(Clone, Debug)]
pub struct RAM<const N: usize> {
    id: ComponentId,
    state: Arc<Mutex<RamState<N>>>,
}

impl<const N: usize> Component for RAM<N> {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl<const N: usize> AddressableComponent for RAM<N> {
    fn read(&self, address: usize, length: usize) -> Result<Bytes> {
        let end = self.check_range(address, length)?;
        let mut state = self.state.lock().unwrap();
        state.bytes_read += length;
        state.num_reads += 1;
        let slice = &state.buffer[address..end];
        Ok(Bytes::copy_from_slice(slice))
    }

    fn write(&self, address: usize, data: &[u8]) -> Result<()> {
        let end = self.check_range(address, data.len())?;
        tracing::trace!("{}: writing {} bytes at 0x{:04X}", self.id, data.len(), address);
        let mut state = self.state.lock().unwrap();
        state.bytes_written += data.len();
        state.num_writes += 1;
        state.buffer[address..end].copy_from_slice(data);
        Ok(())
    }
}

impl<const N: usize> RAM<N> {
    pub fn new(name: &str) -> Self {
        Self {
            id: ComponentId::new(name),
            state: Arc::new(Mutex::new(RamState {
                buffer: [0; N],
                bytes_read: 0,
                bytes_written: 0,
                num_reads: 0,
                num_writes: 0,
            })),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bulk-copies a program image into memory beginning at `start`.
    pub fn load_program(&self, data: &[u8], start: usize) -> Result<()> {
        if self.check_range(start, data.len()).is_err() {
            return Err(AddressableComponentError::ProgramTooLarge {
                len: data.len(),
                start,
                size: N,
            });
        }
        self.write(start, data)
    }

    fn check_range(&self, address: usize, length: usize) -> Result<usize> {
        match address.checked_add(length) {
            Some(end) if end <= N => Ok(end),
            _ => Err(AddressableComponentError::OutOfBounds { address, size: N }),
        }
    }
}

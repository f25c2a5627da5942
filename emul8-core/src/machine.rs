use thiserror::Error;

use crate::component::{AddressableComponentError, Component};

#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Addressable(#[from] AddressableComponentError),
}

pub trait Machine: Component {}

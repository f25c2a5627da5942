use std::io::{self, Write};

use emul8_core::{Component, ComponentId, Machine, MachineError};

use crate::cpu::{self, Ls8Cpu, Ls8Ram};

/// An LS-8 machine: 256 bytes of RAM and a single CPU, with the program
/// loaded at address 0. Instances are fully independent of each other.
#[derive(Debug)]
pub struct Ls8Machine {
    id: ComponentId,
    ram: Ls8Ram,
    cpu: Ls8Cpu,
}

impl Component for Ls8Machine {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl Machine for Ls8Machine {}

impl Ls8Machine {
    pub fn new(program: &[u8]) -> Result<Ls8Machine, MachineError> {
        Self::with_output(program, Box::new(io::stdout()))
    }

    /// Builds a machine whose PRN output goes to `output` instead of stdout.
    pub fn with_output(
        program: &[u8],
        output: Box<dyn Write + Send + Sync>,
    ) -> Result<Ls8Machine, MachineError> {
        let ram = Ls8Ram::new("ls8-ram");
        tracing::debug!("{}: {} byte address space", ram.id(), ram.capacity());
        ram.load_program(program, 0)?;
        let cpu = Ls8Cpu::with_output(ram.clone(), output);
        Ok(Ls8Machine {
            id: ComponentId::new("ls8-machine"),
            ram,
            cpu,
        })
    }

    /// Bulk-copies more bytes into memory, e.g. data placed above the program.
    pub fn load(&self, data: &[u8], start: usize) -> Result<(), MachineError> {
        self.ram.load_program(data, start)?;
        Ok(())
    }

    /// Runs the loaded program until HLT or the first fault, which is
    /// propagated unchanged.
    pub fn run(&mut self) -> cpu::Result<()> {
        tracing::info!("starting LS-8 machine");
        let result = self.cpu.run();
        match &result {
            Ok(()) => tracing::info!("LS-8 machine halted"),
            Err(fault) => tracing::error!("LS-8 machine faulted: {fault}"),
        }
        result
    }

    pub fn cpu(&self) -> &Ls8Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Ls8Cpu {
        &mut self.cpu
    }
}

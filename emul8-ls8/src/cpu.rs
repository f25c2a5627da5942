use std::fmt;
use std::io::{self, Write};

use emul8_core::cpu::decoder::{DecodeError, DecodeOne};
use emul8_core::cpu::{Cpu, Instruction};
use emul8_core::{
    AddressableComponent, AddressableComponentError, Component, ComponentId, RAM,
};
use thiserror::Error;

use crate::alu::{self, AluError, AluOp};
use crate::decoder::Ls8Decoder;
use crate::isa::instruction::{operand_count, Ls8Instruction};
use crate::registers::Ls8Registers;

/// The LS-8 address space: 256 bytes of RAM.
pub type Ls8Ram = RAM<256>;

#[derive(Debug, Error)]
pub enum Ls8CpuError {
    #[error(transparent)]
    Memory(#[from] AddressableComponentError),
    #[error("{source} at address 0x{address:02X}")]
    Decode {
        source: DecodeError,
        address: usize,
    },
    #[error("{source} at address 0x{address:02X}")]
    Alu { source: AluError, address: usize },
}

pub type Result<T> = std::result::Result<T, Ls8CpuError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CpuState {
    Running,
    Halted,
}

pub struct Ls8Cpu {
    id: ComponentId,
    pub(crate) regs: Ls8Registers,
    pub(crate) ram: Ls8Ram,
    pub(crate) pc: usize,
    state: CpuState,
    decoder: Ls8Decoder,
    output: Box<dyn Write + Send + Sync>,
}

impl fmt::Debug for Ls8Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ls8Cpu")
            .field("pc", &self.pc)
            .field("state", &self.state)
            .field("regs", &self.regs)
            .finish()
    }
}

impl Component for Ls8Cpu {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

impl Cpu for Ls8Cpu {}

impl Ls8Cpu {
    pub fn new(ram: Ls8Ram) -> Self {
        Self::with_output(ram, Box::new(io::stdout()))
    }

    /// Builds a CPU whose PRN output goes to `output` instead of stdout.
    pub fn with_output(ram: Ls8Ram, output: Box<dyn Write + Send + Sync>) -> Self {
        Ls8Cpu {
            id: ComponentId::new("ls8-cpu"),
            regs: Ls8Registers::new(),
            ram,
            pc: 0,
            state: CpuState::Running,
            decoder: Ls8Decoder,
            output,
        }
    }

    pub fn state(&self) -> CpuState {
        self.state
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn registers(&self) -> &Ls8Registers {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut Ls8Registers {
        &mut self.regs
    }

    /// Runs from address 0 until HLT or the first fault. Registers keep
    /// whatever values they held before the call; only the PC and run state
    /// are reset.
    pub fn run(&mut self) -> Result<()> {
        self.pc = 0;
        self.state = CpuState::Running;
        while self.state == CpuState::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Fetches, decodes and executes the instruction at the PC.
    pub fn step(&mut self) -> Result<CpuState> {
        tracing::trace!("{}", self.trace_line());

        let pc = self.pc;
        let ir = self.ram.read(pc, 1)?[0];
        let operands = self.ram.read(pc + 1, operand_count(ir))?;
        let mut bytes = [0u8; 4];
        bytes[0] = ir;
        bytes[1..1 + operands.len()].copy_from_slice(&operands);

        let ins = self
            .decoder
            .decode_one(&bytes[..1 + operands.len()])
            .map_err(|source| Ls8CpuError::Decode {
                source,
                address: pc,
            })?;

        match ins {
            Ls8Instruction::Nop => {}
            Ls8Instruction::Halt => {
                self.state = CpuState::Halted;
                return Ok(self.state);
            }
            Ls8Instruction::Push { reg } => self.push_register(reg)?,
            Ls8Instruction::Pop { reg } => self.pop_register(reg)?,
            Ls8Instruction::Print { reg } => {
                // Output is best-effort; a failing channel never faults the run.
                let _ = writeln!(self.output, "{}", self.regs.get(reg));
            }
            Ls8Instruction::LoadImmediate { reg, value } => self.regs.set(reg, value),
            Ls8Instruction::Alu { op, reg_a, reg_b } => self.alu_apply(op, reg_a, reg_b)?,
            Ls8Instruction::ControlFlow { opcode } => {
                tracing::trace!("no-op for undefined PC-mutating opcode 0b{:08b}", opcode);
            }
        }

        self.pc += ins.len_bytes();
        Ok(self.state)
    }

    pub(crate) fn alu_apply(&mut self, op: AluOp, reg_a: u8, reg_b: u8) -> Result<()> {
        alu::apply(&mut self.regs, op, reg_a, reg_b).map_err(|source| Ls8CpuError::Alu {
            source,
            address: self.pc,
        })
    }

    /// One line of machine state in the fixed differential-trace format:
    /// the PC, the next three memory bytes and all 8 registers, every field
    /// as two-digit uppercase hex. Bytes past the end of memory read as 00.
    pub fn trace_line(&self) -> String {
        let peek = |offset: usize| {
            self.ram
                .read(self.pc + offset, 1)
                .map(|bytes| bytes[0])
                .unwrap_or(0)
        };
        let mut line = format!(
            "TRACE: {:02X} | {:02X} {:02X} {:02X} |",
            self.pc,
            peek(0),
            peek(1),
            peek(2),
        );
        for index in 0..8 {
            line.push_str(&format!(" {:02X}", self.regs.get(index)));
        }
        line
    }
}

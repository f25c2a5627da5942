//! The LS-8 stack: a descending stack kept in RAM, addressed through R7.
//!
//! The stack pointer only ever moves through ALU INC/DEC, the same path any
//! program-visible register write takes. Overflow and underflow are the
//! executing program's responsibility; a stack pointer that leaves the
//! address space faults on the memory access.

use emul8_core::AddressableComponent;

use crate::alu::AluOp;
use crate::cpu::{Ls8Cpu, Result};
use crate::registers::SP;

impl Ls8Cpu {
    /// Pushes the value of `reg` onto the stack.
    pub fn push_register(&mut self, reg: u8) -> Result<()> {
        self.alu_apply(AluOp::Dec, SP, 0)?;
        let address = self.regs.get(SP) as usize;
        let value = self.regs.get(reg);
        self.ram.write(address, &[value])?;
        Ok(())
    }

    /// Pops the top of the stack into `reg`.
    pub fn pop_register(&mut self, reg: u8) -> Result<()> {
        let address = self.regs.get(SP) as usize;
        let value = self.ram.read(address, 1)?[0];
        self.regs.set(reg, value);
        self.alu_apply(AluOp::Inc, SP, 0)
    }
}

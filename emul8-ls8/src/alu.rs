use emul8_core::cpu::decoder::DecodeError;
use thiserror::Error;

use crate::isa::instruction::opcodes;
use crate::registers::Ls8Registers;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AluError {
    #[error("division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, AluError>;

/// Operations the ALU performs on the register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
}

impl AluOp {
    /// Maps a raw opcode byte in the ALU family to its operation.
    pub fn decode(opcode: u8) -> std::result::Result<Self, DecodeError> {
        let op = match opcode {
            opcodes::ADD => AluOp::Add,
            opcodes::SUB => AluOp::Sub,
            opcodes::MUL => AluOp::Mul,
            opcodes::DIV => AluOp::Div,
            opcodes::MOD => AluOp::Mod,
            opcodes::INC => AluOp::Inc,
            opcodes::DEC => AluOp::Dec,
            other => return Err(DecodeError::UnsupportedAluOp(other)),
        };
        Ok(op)
    }
}

/// Applies `op` to `reg_a`/`reg_b`, writing the 8-bit-truncated result back
/// into `reg_a`. `reg_b` is ignored by INC and DEC. On a fault the register
/// file is left untouched.
pub fn apply(regs: &mut Ls8Registers, op: AluOp, reg_a: u8, reg_b: u8) -> Result<()> {
    let a = regs.get(reg_a);
    let b = regs.get(reg_b);
    let value = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Div => {
            if b == 0 {
                return Err(AluError::DivisionByZero);
            }
            a / b
        }
        AluOp::Mod => {
            if b == 0 {
                return Err(AluError::DivisionByZero);
            }
            a % b
        }
        AluOp::Inc => a.wrapping_add(1),
        AluOp::Dec => a.wrapping_sub(1),
    };
    regs.set(reg_a, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regs_with(a: u8, b: u8) -> Ls8Registers {
        let mut regs = Ls8Registers::new();
        regs.set(0, a);
        regs.set(1, b);
        regs
    }

    #[test]
    fn add_truncates_to_eight_bits() {
        let mut regs = regs_with(200, 100);
        apply(&mut regs, AluOp::Add, 0, 1).unwrap();
        assert_eq!(regs.get(0), 44);
        assert_eq!(regs.get(1), 100);
    }

    #[test]
    fn sub_wraps_below_zero() {
        let mut regs = regs_with(5, 10);
        apply(&mut regs, AluOp::Sub, 0, 1).unwrap();
        assert_eq!(regs.get(0), 251);
    }

    #[test]
    fn mul_truncates_to_eight_bits() {
        let mut regs = regs_with(16, 32);
        apply(&mut regs, AluOp::Mul, 0, 1).unwrap();
        assert_eq!(regs.get(0), 0);
    }

    #[test]
    fn div_and_mod_are_integer_operations() {
        let mut regs = regs_with(17, 5);
        apply(&mut regs, AluOp::Div, 0, 1).unwrap();
        assert_eq!(regs.get(0), 3);

        let mut regs = regs_with(17, 5);
        apply(&mut regs, AluOp::Mod, 0, 1).unwrap();
        assert_eq!(regs.get(0), 2);
    }

    #[test]
    fn zero_divisor_faults_without_touching_registers() {
        for op in [AluOp::Div, AluOp::Mod] {
            let mut regs = regs_with(17, 0);
            let before = regs.clone();
            assert_eq!(apply(&mut regs, op, 0, 1), Err(AluError::DivisionByZero));
            assert_eq!(regs, before);
        }
    }

    #[test]
    fn inc_and_dec_wrap_around() {
        let mut regs = regs_with(0xFF, 0);
        apply(&mut regs, AluOp::Inc, 0, 0).unwrap();
        assert_eq!(regs.get(0), 0);

        apply(&mut regs, AluOp::Dec, 0, 0).unwrap();
        assert_eq!(regs.get(0), 0xFF);
    }

    #[test]
    fn operand_indices_are_masked() {
        let mut regs = regs_with(1, 2);
        apply(&mut regs, AluOp::Add, 0b1111_1000, 0b0000_1001).unwrap();
        assert_eq!(regs.get(0), 3);
    }

    #[test]
    fn unknown_alu_codes_do_not_decode() {
        assert_eq!(AluOp::decode(opcodes::ADD), Ok(AluOp::Add));
        assert_eq!(AluOp::decode(opcodes::DEC), Ok(AluOp::Dec));
        assert_eq!(
            AluOp::decode(0b1111_1111),
            Err(DecodeError::UnsupportedAluOp(0b1111_1111))
        );
    }
}

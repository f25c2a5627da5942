use emul8_core::cpu::decoder::{DecodeError, DecodeOne, Result};
use emul8_core::cpu::opcode::Opcode8;

use crate::alu::AluOp;
use crate::isa::instruction::{opcodes, Ls8Instruction};

/// Decodes one LS-8 instruction from its opcode byte plus operand bytes.
/// Missing operand bytes read as zero, so a truncated slice never panics.
pub struct Ls8Decoder;

impl DecodeOne for Ls8Decoder {
    type Instruction = Ls8Instruction;

    fn decode_one(&self, bytes: &[u8]) -> Result<Ls8Instruction> {
        let opcode = Opcode8::new(bytes[0]);
        let operand = |idx: usize| bytes.get(idx).copied().unwrap_or(0);

        let ins = if opcode.get_bit(5) == 1 {
            let op = AluOp::decode(opcode.value())?;
            Ls8Instruction::Alu {
                op,
                reg_a: operand(1),
                reg_b: operand(2),
            }
        } else if opcode.get_bit(4) == 1 {
            Ls8Instruction::ControlFlow {
                opcode: opcode.value(),
            }
        } else {
            match opcode.value() {
                opcodes::NOP => Ls8Instruction::Nop,
                opcodes::HLT => Ls8Instruction::Halt,
                opcodes::PUSH => Ls8Instruction::Push { reg: operand(1) },
                opcodes::POP => Ls8Instruction::Pop { reg: operand(1) },
                opcodes::PRN => Ls8Instruction::Print { reg: operand(1) },
                opcodes::LDI => Ls8Instruction::LoadImmediate {
                    reg: operand(1),
                    value: operand(2),
                },
                other => return Err(DecodeError::UnsupportedOpcode(other)),
            }
        };
        Ok(ins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_harness(bytes: &[u8]) -> Result<Ls8Instruction> {
        let decoder = Ls8Decoder;
        decoder.decode_one(bytes)
    }

    #[test]
    fn test_direct_effect_opcodes() {
        assert_eq!(basic_harness(&[opcodes::NOP]), Ok(Ls8Instruction::Nop));
        assert_eq!(basic_harness(&[opcodes::HLT]), Ok(Ls8Instruction::Halt));
        assert_eq!(
            basic_harness(&[opcodes::PUSH, 3]),
            Ok(Ls8Instruction::Push { reg: 3 })
        );
        assert_eq!(
            basic_harness(&[opcodes::POP, 4]),
            Ok(Ls8Instruction::Pop { reg: 4 })
        );
        assert_eq!(
            basic_harness(&[opcodes::PRN, 0]),
            Ok(Ls8Instruction::Print { reg: 0 })
        );
        assert_eq!(
            basic_harness(&[opcodes::LDI, 0, 8]),
            Ok(Ls8Instruction::LoadImmediate { reg: 0, value: 8 })
        );
    }

    #[test]
    fn test_alu_family_opcodes() {
        assert_eq!(
            basic_harness(&[opcodes::ADD, 0, 1]),
            Ok(Ls8Instruction::Alu {
                op: AluOp::Add,
                reg_a: 0,
                reg_b: 1
            })
        );
        assert_eq!(
            basic_harness(&[opcodes::INC, 7]),
            Ok(Ls8Instruction::Alu {
                op: AluOp::Inc,
                reg_a: 7,
                reg_b: 0
            })
        );
    }

    #[test]
    fn test_unknown_alu_codes() {
        for opcode in 0u8..=255 {
            let is_alu_family = (opcode >> 5) & 1 == 1;
            let is_defined = [
                opcodes::ADD,
                opcodes::SUB,
                opcodes::MUL,
                opcodes::DIV,
                opcodes::MOD,
                opcodes::INC,
                opcodes::DEC,
            ]
            .contains(&opcode);
            if is_alu_family && !is_defined {
                assert_eq!(
                    basic_harness(&[opcode, 0, 0, 0]),
                    Err(DecodeError::UnsupportedAluOp(opcode))
                );
            }
        }
    }

    #[test]
    fn test_pc_mutating_family_decodes_as_control_flow() {
        for opcode in 0u8..=255 {
            let is_alu_family = (opcode >> 5) & 1 == 1;
            let is_pc_family = (opcode >> 4) & 1 == 1;
            if !is_alu_family && is_pc_family {
                assert_eq!(
                    basic_harness(&[opcode, 0, 0, 0]),
                    Ok(Ls8Instruction::ControlFlow { opcode })
                );
            }
        }
    }

    #[test]
    fn test_unknown_direct_effect_opcode() {
        assert_eq!(
            basic_harness(&[0b0000_1111]),
            Err(DecodeError::UnsupportedOpcode(0b0000_1111))
        );
        assert_eq!(
            basic_harness(&[0b0100_0000, 0]),
            Err(DecodeError::UnsupportedOpcode(0b0100_0000))
        );
    }

    #[test]
    fn test_truncated_operands_read_as_zero() {
        assert_eq!(
            basic_harness(&[opcodes::LDI, 5]),
            Ok(Ls8Instruction::LoadImmediate { reg: 5, value: 0 })
        );
    }
}

// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::buffer::DataBuffer;
use crate::config::ConfigDecoder;
use crate::{ByteSpan, Error};

/// A bit variable (a "varbit"): a bit range inside a parameter variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVariableDefinition {
    pub id: u32,
    /// The id of the varp holding the bits.
    pub variable: u16,
    pub low_bit: u8,
    pub high_bit: u8,
}

impl BitVariableDefinition {
    pub fn from_existing(id: u32, buffer: ByteSpan) -> Result<Self, Error> {
        BitVariableDecoder::decode(id, &mut DataBuffer::new(buffer))
    }

    /// The mask of this variable, already shifted down to bit 0.
    pub fn mask(&self) -> u32 {
        let width = u32::from(self.high_bit.saturating_sub(self.low_bit)) + 1;
        if width >= u32::BITS {
            u32::MAX
        } else {
            (1 << width) - 1
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitVariableOpcode {
    Bits,
}

pub struct BitVariableDecoder;

impl ConfigDecoder for BitVariableDecoder {
    type Definition = BitVariableDefinition;
    type Opcode = BitVariableOpcode;

    const ENTRY_NAME: &'static str = "varbit";

    fn create(id: u32) -> BitVariableDefinition {
        BitVariableDefinition {
            id,
            variable: 0,
            low_bit: 0,
            high_bit: 0,
        }
    }

    fn parse_opcode(opcode: u8) -> Option<BitVariableOpcode> {
        match opcode {
            1 => Some(BitVariableOpcode::Bits),
            _ => None,
        }
    }

    fn apply(
        definition: &mut BitVariableDefinition,
        opcode: BitVariableOpcode,
        buffer: &mut DataBuffer,
    ) -> Result<(), Error> {
        match opcode {
            BitVariableOpcode::Bits => {
                definition.variable = buffer.read_u16()?;
                definition.low_bit = buffer.read_u8()?;
                definition.high_bit = buffer.read_u8()?;
            }
        }

        Ok(())
    }
}

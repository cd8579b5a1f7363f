// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::buffer::DataBuffer;
use crate::config::ConfigDecoder;
use crate::{ByteSpan, Error};

/// A parameter variable (a "varp"), from the `varp` config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterVariableDefinition {
    pub id: u32,
    pub parameter: u16,
}

impl ParameterVariableDefinition {
    pub fn from_existing(id: u32, buffer: ByteSpan) -> Result<Self, Error> {
        ParameterVariableDecoder::decode(id, &mut DataBuffer::new(buffer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterVariableOpcode {
    Parameter,
}

pub struct ParameterVariableDecoder;

impl ConfigDecoder for ParameterVariableDecoder {
    type Definition = ParameterVariableDefinition;
    type Opcode = ParameterVariableOpcode;

    const ENTRY_NAME: &'static str = "varp";

    fn create(id: u32) -> ParameterVariableDefinition {
        ParameterVariableDefinition { id, parameter: 0 }
    }

    fn parse_opcode(opcode: u8) -> Option<ParameterVariableOpcode> {
        match opcode {
            5 => Some(ParameterVariableOpcode::Parameter),
            _ => None,
        }
    }

    fn apply(
        definition: &mut ParameterVariableDefinition,
        opcode: ParameterVariableOpcode,
        buffer: &mut DataBuffer,
    ) -> Result<(), Error> {
        match opcode {
            ParameterVariableOpcode::Parameter => definition.parameter = buffer.read_u16()?,
        }

        Ok(())
    }
}

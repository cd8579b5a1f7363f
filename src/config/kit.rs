// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::buffer::DataBuffer;
use crate::config::{read_ids, ConfigDecoder};
use crate::{ByteSpan, Error};

/// Number of colour slots, covering opcodes `40..=49` and `50..=59`.
pub const COLOUR_COUNT: usize = 10;

/// Number of head model slots, covering opcodes `60..=69`.
pub const HEAD_MODEL_COUNT: usize = 10;

/// A body part players can pick in the character designer, from the `idk` config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKitDefinition {
    pub id: u32,
    /// The body part this kit belongs to.
    pub part: Option<u8>,
    pub models: Vec<u16>,
    /// Whether the kit can be selected in the character designer.
    pub player_design_style: bool,
    pub original_colours: [u16; COLOUR_COUNT],
    pub replacement_colours: [u16; COLOUR_COUNT],
    /// Models used for chat heads.
    pub head_models: [Option<u16>; HEAD_MODEL_COUNT],
}

impl IdentityKitDefinition {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            part: None,
            models: Vec::new(),
            player_design_style: false,
            original_colours: [0; COLOUR_COUNT],
            replacement_colours: [0; COLOUR_COUNT],
            head_models: [None; HEAD_MODEL_COUNT],
        }
    }

    /// Decodes the definition `id` from its encoded bytes.
    pub fn from_existing(id: u32, buffer: ByteSpan) -> Result<Self, Error> {
        IdentityKitDecoder::decode(id, &mut DataBuffer::new(buffer))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKitOpcode {
    Part,
    Models,
    PlayerDesignStyle,
    OriginalColour(usize),
    ReplacementColour(usize),
    HeadModel(usize),
}

pub struct IdentityKitDecoder;

impl ConfigDecoder for IdentityKitDecoder {
    type Definition = IdentityKitDefinition;
    type Opcode = IdentityKitOpcode;

    const ENTRY_NAME: &'static str = "idk";

    fn create(id: u32) -> IdentityKitDefinition {
        IdentityKitDefinition::new(id)
    }

    fn parse_opcode(opcode: u8) -> Option<IdentityKitOpcode> {
        let slot = |first: u8| usize::from(opcode - first);

        match opcode {
            1 => Some(IdentityKitOpcode::Part),
            2 => Some(IdentityKitOpcode::Models),
            3 => Some(IdentityKitOpcode::PlayerDesignStyle),
            40..=49 => Some(IdentityKitOpcode::OriginalColour(slot(40))),
            50..=59 => Some(IdentityKitOpcode::ReplacementColour(slot(50))),
            60..=69 => Some(IdentityKitOpcode::HeadModel(slot(60))),
            _ => None,
        }
    }

    fn apply(
        definition: &mut IdentityKitDefinition,
        opcode: IdentityKitOpcode,
        buffer: &mut DataBuffer,
    ) -> Result<(), Error> {
        match opcode {
            IdentityKitOpcode::Part => definition.part = Some(buffer.read_u8()?),
            IdentityKitOpcode::Models => definition.models = read_ids(buffer)?,
            IdentityKitOpcode::PlayerDesignStyle => definition.player_design_style = true,
            IdentityKitOpcode::OriginalColour(slot) => {
                definition.original_colours[slot] = buffer.read_u16()?
            }
            IdentityKitOpcode::ReplacementColour(slot) => {
                definition.replacement_colours[slot] = buffer.read_u16()?
            }
            IdentityKitOpcode::HeadModel(slot) => {
                definition.head_models[slot] = Some(buffer.read_u16()?)
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_kit() {
        let kit = IdentityKitDefinition::from_existing(
            18,
            &[
                1, 7, 2, 2, 0x00, 0x20, 0x00, 0x21, 3, 40, 0x12, 0x34, 51, 0x43, 0x21, 69, 0x00,
                0x09, 0,
            ],
        )
        .unwrap();

        assert_eq!(kit.id, 18);
        assert_eq!(kit.part, Some(7));
        assert_eq!(kit.models, vec![0x20, 0x21]);
        assert!(kit.player_design_style);
        assert_eq!(kit.original_colours[0], 0x1234);
        assert_eq!(kit.replacement_colours[1], 0x4321);
        assert_eq!(kit.replacement_colours[0], 0);
        assert_eq!(kit.head_models[9], Some(9));
        assert_eq!(kit.head_models[0], None);
    }

    #[test]
    fn defaults() {
        let kit = IdentityKitDefinition::from_existing(0, &[0]).unwrap();

        assert_eq!(kit, IdentityKitDefinition::new(0));
        assert!(!kit.player_design_style);
    }

    #[test]
    fn gap_between_ranges() {
        assert_eq!(IdentityKitDecoder::parse_opcode(39), None);
        assert_eq!(IdentityKitDecoder::parse_opcode(70), None);
    }
}

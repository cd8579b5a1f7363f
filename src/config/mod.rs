// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::{debug, warn};

use crate::buffer::DataBuffer;
use crate::Error;

/// Identity kit definitions (`idk`).
pub mod kit;

/// NPC definitions (`npc`).
pub mod npc;

/// Bit variable definitions (`varbit`).
pub mod varbit;

/// Parameter variable definitions (`varp`).
pub mod varp;

/// Ends every definition in every config entry. Never used as a field opcode.
pub const DEFINITION_TERMINATOR: u8 = 0;

/// What to do with an opcode that has no decoding rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Fail with [`Error::UnknownOpcode`].
    #[default]
    Reject,
    /// Skip the opcode byte and keep going. No payload is consumed, so this only decodes
    /// correctly when the unknown opcode carries none.
    Ignore,
}

/// Knobs for [`ConfigDecoder::decode_with_options`].
#[derive(Debug, Clone, Default)]
pub struct DecoderOptions {
    pub unknown_opcodes: UnknownOpcodePolicy,
}

/// Decodes one definition out of an opcode stream.
///
/// Each field is prefixed by a one byte opcode, and the stream ends at [`DEFINITION_TERMINATOR`].
/// Implementors supply the closed opcode table through [`ConfigDecoder::parse_opcode`] and
/// [`ConfigDecoder::apply`]; the loop itself is shared.
pub trait ConfigDecoder {
    /// The definition being produced.
    type Definition;

    /// The known opcodes of this entry.
    type Opcode: Copy + std::fmt::Debug;

    /// Name of the archive entry these definitions live in, without an extension.
    const ENTRY_NAME: &'static str;

    /// Creates a definition with every field at its default.
    fn create(id: u32) -> Self::Definition;

    /// Maps a raw opcode to its field rule, or `None` if there isn't one.
    fn parse_opcode(opcode: u8) -> Option<Self::Opcode>;

    /// Reads the payload of `opcode` and stores it in `definition`.
    fn apply(
        definition: &mut Self::Definition,
        opcode: Self::Opcode,
        buffer: &mut DataBuffer,
    ) -> Result<(), Error>;

    /// Decodes the definition `id`, rejecting unknown opcodes.
    fn decode(id: u32, buffer: &mut DataBuffer) -> Result<Self::Definition, Error> {
        Self::decode_with_options(id, buffer, &DecoderOptions::default())
    }

    fn decode_with_options(
        id: u32,
        buffer: &mut DataBuffer,
        options: &DecoderOptions,
    ) -> Result<Self::Definition, Error> {
        debug!(entry = Self::ENTRY_NAME, id, "Decoding definition");

        let mut definition = Self::create(id);

        loop {
            let offset = buffer.offset();
            let opcode = buffer
                .read_u8()
                .map_err(|_| Error::MalformedOpcode { id, offset })?;

            if opcode == DEFINITION_TERMINATOR {
                return Ok(definition);
            }

            match Self::parse_opcode(opcode) {
                Some(opcode) => Self::apply(&mut definition, opcode, buffer)?,
                None => match options.unknown_opcodes {
                    UnknownOpcodePolicy::Reject => {
                        return Err(Error::UnknownOpcode { id, opcode, offset });
                    }
                    UnknownOpcodePolicy::Ignore => {
                        warn!(entry = Self::ENTRY_NAME, id, opcode, "Ignoring unknown opcode");
                    }
                },
            }
        }
    }
}

/// Reads a one byte count followed by that many ids.
pub(crate) fn read_ids(buffer: &mut DataBuffer) -> Result<Vec<u16>, Error> {
    let count = buffer.read_u8()?;

    (0..count).map(|_| buffer.read_u16()).collect()
}

#[cfg(test)]
mod tests {
    use super::varp::ParameterVariableDecoder;
    use super::*;

    #[test]
    fn terminator_only() {
        let mut buffer = DataBuffer::new(&[0]);
        let varp = ParameterVariableDecoder::decode(12, &mut buffer).unwrap();

        assert_eq!(varp.id, 12);
        assert_eq!(varp.parameter, 0);
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn stops_at_terminator() {
        // trailing bytes belong to whoever comes next
        let mut buffer = DataBuffer::new(&[5, 0x01, 0x02, 0, 0xAA]);
        ParameterVariableDecoder::decode(0, &mut buffer).unwrap();

        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn empty_stream_is_malformed() {
        let mut buffer = DataBuffer::new(&[]);

        assert_eq!(
            ParameterVariableDecoder::decode(3, &mut buffer),
            Err(Error::MalformedOpcode { id: 3, offset: 0 })
        );
    }

    #[test]
    fn missing_terminator_is_malformed() {
        let mut buffer = DataBuffer::new(&[5, 0x00, 0x10]);

        assert_eq!(
            ParameterVariableDecoder::decode(3, &mut buffer),
            Err(Error::MalformedOpcode { id: 3, offset: 3 })
        );
    }

    #[test]
    fn truncated_payload() {
        let mut buffer = DataBuffer::new(&[5, 0x00]);

        assert_eq!(
            ParameterVariableDecoder::decode(3, &mut buffer),
            Err(Error::TruncatedStream { offset: 1 })
        );
    }

    #[test]
    fn unknown_opcode_rejected() {
        let mut buffer = DataBuffer::new(&[5, 0x00, 0x10, 77, 0]);

        assert_eq!(
            ParameterVariableDecoder::decode(9, &mut buffer),
            Err(Error::UnknownOpcode {
                id: 9,
                opcode: 77,
                offset: 3
            })
        );
    }

    #[test]
    fn unknown_opcode_ignored() {
        let options = DecoderOptions {
            unknown_opcodes: UnknownOpcodePolicy::Ignore,
        };

        let mut buffer = DataBuffer::new(&[77, 5, 0x00, 0x10, 0]);
        let varp = ParameterVariableDecoder::decode_with_options(9, &mut buffer, &options).unwrap();

        assert_eq!(varp.parameter, 0x10);
    }

    #[test]
    fn read_id_list() {
        let mut buffer = DataBuffer::new(&[2, 0x00, 0x07, 0x12, 0x34]);

        assert_eq!(read_ids(&mut buffer), Ok(vec![7, 0x1234]));
    }
}

// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// Every way decoding a definition or a model can fail.
///
/// Decoding never returns a partially populated value: the first error aborts the whole decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The opcode stream ended before the definition terminator was read.
    MalformedOpcode {
        /// The id of the definition being decoded.
        id: u32,
        /// Where the missing opcode byte was expected.
        offset: usize,
    },
    /// An opcode with no decoding rule was read, and the decoder was told to reject those.
    UnknownOpcode {
        /// The id of the definition being decoded.
        id: u32,
        /// The unrecognized opcode.
        opcode: u8,
        /// Where the opcode was read from.
        offset: usize,
    },
    /// A model face declared a type outside of 1-4.
    InvalidFaceType {
        /// Index of the face.
        face: usize,
        /// The type that was read.
        value: u8,
    },
    /// A model trailer declared zero vertices or zero faces.
    EmptyGeometry {
        /// Declared vertex count.
        vertices: u16,
        /// Declared face count.
        faces: u16,
    },
    /// A read ran past the end of its stream.
    TruncatedStream {
        /// Absolute offset of the read that failed.
        offset: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MalformedOpcode { id, offset } => {
                write!(f, "definition {id} is unterminated (expected opcode at {offset:#x})")
            }
            Error::UnknownOpcode { id, opcode, offset } => {
                write!(f, "definition {id} has unknown opcode {opcode} at {offset:#x}")
            }
            Error::InvalidFaceType { face, value } => {
                write!(f, "face {face} has invalid type {value}")
            }
            Error::EmptyGeometry { vertices, faces } => {
                write!(f, "model declares {vertices} vertices and {faces} faces")
            }
            Error::TruncatedStream { offset } => write!(f, "stream truncated at {offset:#x}"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Converts a failed `binrw` read that started at the absolute `offset`.
    ///
    /// Errors that carry a stream position are reported there, anything else (such as running out of
    /// bytes) is reported at `offset`.
    pub(crate) fn from_binrw(err: &binrw::Error, base: usize, offset: usize) -> Self {
        let position = match err.root_cause() {
            binrw::Error::AssertFail { pos, .. }
            | binrw::Error::BadMagic { pos, .. }
            | binrw::Error::NoVariantMatch { pos }
            | binrw::Error::EnumErrors { pos, .. }
            | binrw::Error::Custom { pos, .. } => Some(base + *pos as usize),
            _ => None,
        };

        Error::TruncatedStream {
            offset: position.unwrap_or(offset),
        }
    }
}

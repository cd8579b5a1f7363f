// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconstruction of face vertex indices.
//!
//! Faces are stored as a strip: each face type says which edge of the previous face is reused,
//! so most faces only need one new index.

use crate::Error;

/// How a face's indices relate to the previous face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FaceKind {
    /// Three new indices, not connected to the previous face.
    Unconnected = 1,
    /// Reuses the B-C edge.
    SharedBc = 2,
    /// Reuses the A-C edge.
    SharedAc = 3,
    /// Reuses the A-B edge with the winding flipped.
    Crossed = 4,
}

impl TryFrom<u8> for FaceKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        match value {
            1 => Ok(FaceKind::Unconnected),
            2 => Ok(FaceKind::SharedBc),
            3 => Ok(FaceKind::SharedAc),
            4 => Ok(FaceKind::Crossed),
            _ => Err(value),
        }
    }
}

/// The rotating A, B, C registers plus the running index base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strip {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    /// Every new index is a delta from the last index produced.
    pub offset: i32,
}

impl Strip {
    /// Produces the registers for the next face, pulling index deltas from `next_delta`.
    pub fn advance<F>(self, kind: FaceKind, mut next_delta: F) -> Result<Strip, Error>
    where
        F: FnMut() -> Result<i32, Error>,
    {
        let strip = match kind {
            FaceKind::Unconnected => {
                let a = self.offset.wrapping_add(next_delta()?);
                let b = a.wrapping_add(next_delta()?);
                let c = b.wrapping_add(next_delta()?);

                Strip { a, b, c, offset: c }
            }
            FaceKind::SharedBc => {
                let c = self.offset.wrapping_add(next_delta()?);
                Strip {
                    a: self.a,
                    b: self.c,
                    c,
                    offset: c,
                }
            }
            FaceKind::SharedAc => {
                let c = self.offset.wrapping_add(next_delta()?);
                Strip {
                    a: self.c,
                    b: self.b,
                    c,
                    offset: c,
                }
            }
            FaceKind::Crossed => {
                let c = self.offset.wrapping_add(next_delta()?);
                Strip {
                    a: self.b,
                    b: self.a,
                    c,
                    offset: c,
                }
            }
        };

        Ok(strip)
    }

    pub fn indices(&self) -> (i32, i32, i32) {
        (self.a, self.b, self.c)
    }
}

// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::ops::Range;

use binrw::{BinRead, BinReaderExt};

use crate::{ByteSpan, Error};

/// Strings in the legacy caches end with a newline, not a nul.
pub const STRING_TERMINATOR: u8 = 10;

/// Position-tracked, bounded reader over a borrowed byte region.
///
/// All multi-byte values are big-endian. Views created with [`DataBuffer::duplicate`] and
/// [`DataBuffer::view`] share the backing bytes but keep their own position, so several
/// sub-streams packed into one buffer can be read side by side.
#[derive(Debug, Clone)]
pub struct DataBuffer<'a> {
    /// Absolute offset of this view inside the original buffer, used for error reporting.
    base: usize,
    cursor: Cursor<ByteSpan<'a>>,
}

impl<'a> DataBuffer<'a> {
    /// Wraps `bytes`, positioned at the start.
    pub fn new(bytes: ByteSpan<'a>) -> Self {
        Self {
            base: 0,
            cursor: Cursor::new(bytes),
        }
    }

    /// The size of the region this buffer can read.
    pub fn capacity(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Current position, relative to the start of this view.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Current position, relative to the start of the original buffer.
    pub fn offset(&self) -> usize {
        self.base + self.position()
    }

    /// Moves to an absolute position inside this view.
    pub fn set_position(&mut self, position: usize) {
        self.cursor.set_position(position as u64);
    }

    /// How many bytes are left before the end of this view.
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.position())
    }

    /// Returns a second reader over the same bytes, at the same position, that moves independently.
    pub fn duplicate(&self) -> DataBuffer<'a> {
        let mut cursor = Cursor::new(*self.cursor.get_ref());
        cursor.set_position(self.cursor.position());

        DataBuffer {
            base: self.base,
            cursor,
        }
    }

    /// Returns an independent reader bounded to `range` of this view.
    ///
    /// The range is clamped to the capacity, so a region that claims more bytes than exist
    /// produces a shorter view whose reads fail with [`Error::TruncatedStream`].
    pub fn view(&self, range: Range<usize>) -> DataBuffer<'a> {
        let bytes = *self.cursor.get_ref();
        let end = range.end.min(bytes.len());
        let start = range.start.min(end);

        DataBuffer {
            base: self.base + start,
            cursor: Cursor::new(&bytes[start..end]),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let offset = self.offset();
        self.cursor
            .read_be::<u8>()
            .map_err(|_| Error::TruncatedStream { offset })
    }

    /// Reads a two's-complement signed byte.
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        let offset = self.offset();
        self.cursor
            .read_be::<i8>()
            .map_err(|_| Error::TruncatedStream { offset })
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        let offset = self.offset();
        self.cursor
            .read_be::<u16>()
            .map_err(|_| Error::TruncatedStream { offset })
    }

    /// Any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a signed "smart": one byte in -64..64, or two bytes in -16384..16384.
    ///
    /// The high bit of the first byte selects the width.
    pub fn read_signed_smart(&mut self) -> Result<i32, Error> {
        let peek = self
            .cursor
            .get_ref()
            .get(self.position())
            .copied()
            .ok_or(Error::TruncatedStream {
                offset: self.offset(),
            })?;

        if peek < 0x80 {
            Ok(i32::from(self.read_u8()?) - 0x40)
        } else {
            Ok(i32::from(self.read_u16()?) - 0xC000)
        }
    }

    /// Reads Latin-1 text up to (and consuming) [`STRING_TERMINATOR`].
    pub fn read_string(&mut self) -> Result<String, Error> {
        let mut string = String::new();

        let mut next_char = self.read_u8()?;
        while next_char != STRING_TERMINATOR {
            string.push(next_char as char);
            next_char = self.read_u8()?;
        }

        Ok(string)
    }

    /// Reads a big-endian `binrw` structure at the current position.
    pub fn read_structure<T>(&mut self) -> Result<T, Error>
    where
        T: for<'b> BinRead<Args<'b> = ()>,
    {
        let offset = self.offset();
        T::read_be(self).map_err(|err| Error::from_binrw(&err, self.base, offset))
    }
}

impl Read for DataBuffer<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for DataBuffer<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_signed_bytes() {
        let mut buffer = DataBuffer::new(&[0xFF, 0x80, 0x7F]);

        assert_eq!(buffer.read_i8(), Ok(-1));
        assert_eq!(buffer.read_i8(), Ok(-128));
        assert_eq!(buffer.read_i8(), Ok(127));
    }

    #[test]
    fn read_u16_big_endian() {
        let mut buffer = DataBuffer::new(&[0x12, 0x34]);

        assert_eq!(buffer.read_u16(), Ok(0x1234));
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn read_bool_nonzero() {
        let mut buffer = DataBuffer::new(&[0, 1, 7]);

        assert_eq!(buffer.read_bool(), Ok(false));
        assert_eq!(buffer.read_bool(), Ok(true));
        assert_eq!(buffer.read_bool(), Ok(true));
    }

    #[test]
    fn signed_smart_widths() {
        // one byte: 0x40 is zero, two bytes: 0xC000 is zero
        let mut buffer = DataBuffer::new(&[0x40, 0x00, 0x7F, 0xC0, 0x00, 0xFF, 0xFF, 0x80, 0x00]);

        assert_eq!(buffer.read_signed_smart(), Ok(0));
        assert_eq!(buffer.read_signed_smart(), Ok(-64));
        assert_eq!(buffer.read_signed_smart(), Ok(63));
        assert_eq!(buffer.position(), 3);
        assert_eq!(buffer.read_signed_smart(), Ok(0));
        assert_eq!(buffer.read_signed_smart(), Ok(16383));
        assert_eq!(buffer.read_signed_smart(), Ok(-16384));
        assert_eq!(buffer.position(), 9);
    }

    #[test]
    fn signed_smart_truncated() {
        let mut buffer = DataBuffer::new(&[0x90]);

        assert_eq!(
            buffer.read_signed_smart(),
            Err(Error::TruncatedStream { offset: 0 })
        );
    }

    // "Guard\n"
    static STRING_DATA: [u8; 6] = [0x47, 0x75, 0x61, 0x72, 0x64, 0x0A];

    #[test]
    fn read_string() {
        let mut buffer = DataBuffer::new(&STRING_DATA);

        assert_eq!(buffer.read_string(), Ok("Guard".to_string()));
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn read_string_unterminated() {
        let mut buffer = DataBuffer::new(&STRING_DATA[..4]);

        assert_eq!(
            buffer.read_string(),
            Err(Error::TruncatedStream { offset: 4 })
        );
    }

    #[test]
    fn duplicate_is_independent() {
        let bytes = [1, 2, 3, 4];
        let mut buffer = DataBuffer::new(&bytes);
        buffer.read_u8().unwrap();

        let mut copy = buffer.duplicate();
        assert_eq!(copy.read_u8(), Ok(2));
        assert_eq!(copy.read_u8(), Ok(3));

        assert_eq!(buffer.position(), 1);
        assert_eq!(buffer.read_u8(), Ok(2));
    }

    #[test]
    fn view_is_bounded() {
        let bytes = [1, 2, 3, 4, 5];
        let buffer = DataBuffer::new(&bytes);

        let mut view = buffer.view(1..3);
        assert_eq!(view.capacity(), 2);
        assert_eq!(view.read_u8(), Ok(2));
        assert_eq!(view.read_u8(), Ok(3));
        assert_eq!(view.read_u8(), Err(Error::TruncatedStream { offset: 3 }));
    }

    #[test]
    fn view_is_clamped() {
        let bytes = [1, 2, 3];
        let buffer = DataBuffer::new(&bytes);

        let view = buffer.view(2..10);
        assert_eq!(view.capacity(), 1);

        let empty = buffer.view(8..10);
        assert_eq!(empty.capacity(), 0);
        assert_eq!(empty.offset(), 3);
    }

    #[test]
    fn read_structure() {
        let bytes = [0xAA, 0x12, 0x34, 0x56, 0x78];
        let mut view = DataBuffer::new(&bytes).view(1..5);

        assert_eq!(view.read_structure::<u32>(), Ok(0x12345678));
        assert_eq!(view.remaining(), 0);
    }

    #[test]
    fn truncated_structure_reports_its_offset() {
        let bytes = [0u8; 30];
        let mut view = DataBuffer::new(&bytes).view(20..30);
        view.set_position(4);

        // only 6 of the 18 trailer bytes are left
        assert_eq!(
            view.read_structure::<crate::model::ModelTrailer>(),
            Err(Error::TruncatedStream { offset: 24 })
        );
    }
}

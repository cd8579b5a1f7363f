// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::unnecessary_fallible_conversions)] // This wrongly trips on binrw code

use binrw::binread;
use tracing::debug;

use crate::buffer::DataBuffer;
use crate::{ByteSpan, Error};

/// The name of the version list entry holding the map index.
pub const ENTRY_NAME: &str = "map_index";

/// Size in bytes of a single [`MapIndexEntry`].
const ENTRY_SIZE: usize = 7;

/// Which files hold the terrain and objects of one map square.
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(big)]
pub struct MapIndexEntry {
    /// The packed region coordinates of the square.
    pub area: u16,
    /// File id of the terrain data.
    pub map: u16,
    /// File id of the object placements.
    pub object: u16,
    #[br(map = |x: u8| x != 0)]
    pub members: bool,
}

/// The map index found in the version list archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapIndex {
    entries: Vec<MapIndexEntry>,
}

impl MapIndex {
    /// Reads every complete entry in `buffer`. Trailing bytes that don't make up a whole entry
    /// are ignored.
    pub fn from_existing(buffer: ByteSpan) -> Result<MapIndex, Error> {
        let mut data = DataBuffer::new(buffer);
        let count = data.remaining() / ENTRY_SIZE;

        debug!(entry = ENTRY_NAME, count, "Decoding map index");

        let entries = (0..count)
            .map(|_| data.read_structure::<MapIndexEntry>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MapIndex { entries })
    }

    pub fn entries(&self) -> &[MapIndexEntry] {
        &self.entries
    }

    /// Looks up the entry for `area`, if there is one.
    pub fn find(&self, area: u16) -> Option<&MapIndexEntry> {
        self.entries.iter().find(|entry| entry.area == area)
    }
}

// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoders for the definition and model data stored in legacy game client caches.

/// Represents a continuous block of memory which is not owned, and comes either from an in-memory location or from a file.
pub type ByteSpan<'a> = &'a [u8];

/// Bounded, big-endian reading of cache buffers.
pub mod buffer;

/// Opcode-driven config definitions, such as NPCs, identity kits and variables.
pub mod config;

/// Reading models.
pub mod model;

/// Reading the map index from the version list.
pub mod map_index;

mod error;
pub use error::Error;

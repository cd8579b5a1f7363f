// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::unnecessary_fallible_conversions)] // This wrongly trips on binrw code

use binrw::binread;
use bitflags::bitflags;

/// The size in bytes of the trailer at the end of every model.
pub const TRAILER_SIZE: usize = 18;

/// A priority byte of this value means every face has its own priority.
const PER_FACE_PRIORITY: u8 = 255;

bitflags! {
    /// Which optional per-face and per-vertex streams a model carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct ModelFeatures: u8 {
        const TEXTURED_FACES = 0x01;
        const PRIORITIZED_FACES = 0x02;
        const TRANSPARENT_FACES = 0x04;
        const SKINNED_FACES = 0x08;
        const SKINNED_VERTICES = 0x10;
    }
}

impl ModelFeatures {
    fn from_trailer(
        textured: bool,
        prioritized: bool,
        transparent: bool,
        skinned_faces: bool,
        skinned_vertices: bool,
    ) -> Self {
        let mut features = ModelFeatures::empty();
        features.set(ModelFeatures::TEXTURED_FACES, textured);
        features.set(ModelFeatures::PRIORITIZED_FACES, prioritized);
        features.set(ModelFeatures::TRANSPARENT_FACES, transparent);
        features.set(ModelFeatures::SKINNED_FACES, skinned_faces);
        features.set(ModelFeatures::SKINNED_VERTICES, skinned_vertices);
        features
    }
}

fn read_flag(x: u8) -> bool {
    x != 0
}

/// The fixed size block at the end of a model, describing everything that comes before it.
#[binread]
#[derive(Debug, Clone, PartialEq, Eq)]
#[br(big)]
pub struct ModelTrailer {
    pub vertex_count: u16,
    pub face_count: u16,
    pub tex_coord_count: u8,

    #[br(temp, map = read_flag)]
    textured: bool,
    #[br(temp, map = |x: u8| x == PER_FACE_PRIORITY)]
    prioritized: bool,
    #[br(temp, map = read_flag)]
    transparent: bool,
    #[br(temp, map = read_flag)]
    skinned_faces: bool,
    #[br(temp, map = read_flag)]
    skinned_vertices: bool,

    #[br(calc = ModelFeatures::from_trailer(textured, prioritized, transparent, skinned_faces, skinned_vertices))]
    pub features: ModelFeatures,

    /// Lengths in bytes of the per-axis vertex delta streams.
    pub x_data_length: u16,
    pub y_data_length: u16,
    pub z_data_length: u16,
    /// Length in bytes of the face index delta stream.
    pub face_data_length: u16,
}

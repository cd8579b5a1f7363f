// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ops::Range;

use crate::model::trailer::{ModelFeatures, ModelTrailer};

/// Size in bytes of one face colour.
const FACE_COLOUR_SIZE: usize = 2;

/// Size in bytes of one texture coordinate (origin, u and v).
const TEX_COORD_SIZE: usize = 3;

const REGION_COUNT: usize = 13;

/// One of the streams a model body is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    VertexDirections,
    FaceTypes,
    FacePriorities,
    FaceBones,
    FaceTexturePointers,
    VertexBones,
    FaceAlphas,
    FaceData,
    FaceColours,
    TexCoords,
    VertexX,
    VertexY,
    VertexZ,
}

impl Region {
    /// Every region, in the order they are laid out in the body.
    pub const ORDER: [Region; REGION_COUNT] = [
        Region::VertexDirections,
        Region::FaceTypes,
        Region::FacePriorities,
        Region::FaceBones,
        Region::FaceTexturePointers,
        Region::VertexBones,
        Region::FaceAlphas,
        Region::FaceData,
        Region::FaceColours,
        Region::TexCoords,
        Region::VertexX,
        Region::VertexY,
        Region::VertexZ,
    ];

    /// The feature that has to be enabled for this region to exist, if any.
    pub fn required_feature(self) -> Option<ModelFeatures> {
        match self {
            Region::FacePriorities => Some(ModelFeatures::PRIORITIZED_FACES),
            Region::FaceBones => Some(ModelFeatures::SKINNED_FACES),
            Region::FaceTexturePointers => Some(ModelFeatures::TEXTURED_FACES),
            Region::VertexBones => Some(ModelFeatures::SKINNED_VERTICES),
            Region::FaceAlphas => Some(ModelFeatures::TRANSPARENT_FACES),
            _ => None,
        }
    }

    /// The size of this region in bytes, assuming it is present.
    pub fn length(self, trailer: &ModelTrailer) -> usize {
        let vertices = usize::from(trailer.vertex_count);
        let faces = usize::from(trailer.face_count);

        match self {
            Region::VertexDirections | Region::VertexBones => vertices,
            Region::FaceTypes
            | Region::FacePriorities
            | Region::FaceBones
            | Region::FaceTexturePointers
            | Region::FaceAlphas => faces,
            Region::FaceData => usize::from(trailer.face_data_length),
            Region::FaceColours => faces * FACE_COLOUR_SIZE,
            Region::TexCoords => usize::from(trailer.tex_coord_count) * TEX_COORD_SIZE,
            Region::VertexX => usize::from(trailer.x_data_length),
            Region::VertexY => usize::from(trailer.y_data_length),
            Region::VertexZ => usize::from(trailer.z_data_length),
        }
    }

    fn is_present(self, features: ModelFeatures) -> bool {
        self.required_feature()
            .map_or(true, |feature| features.contains(feature))
    }
}

/// Where each region starts and ends, relative to the start of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    ranges: [Range<usize>; REGION_COUNT],
}

impl Layout {
    /// Lays out the regions described by `trailer` back to back, starting at 0.
    pub fn compute(trailer: &ModelTrailer) -> Self {
        let mut start = 0;
        let ranges = Region::ORDER.map(|region| {
            let length = if region.is_present(trailer.features) {
                region.length(trailer)
            } else {
                0
            };

            let range = start..start + length;
            start = range.end;
            range
        });

        Self { ranges }
    }

    pub fn range(&self, region: Region) -> Range<usize> {
        self.ranges[region as usize].clone()
    }
}

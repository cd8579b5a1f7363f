// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

/// Reconstruction of face indices from the face type stream.
pub mod faces;

/// Offsets of each stream inside a model body.
pub mod layout;

/// The footer every model ends with.
pub mod trailer;

use modular_bitfield::prelude::*;
use tracing::debug;

use crate::buffer::DataBuffer;
use crate::{ByteSpan, Error};
use faces::{FaceKind, Strip};
use layout::{Layout, Region};
pub use trailer::{ModelFeatures, ModelTrailer, TRAILER_SIZE};

/// Which axes of a vertex have a delta stored.
#[bitfield]
#[derive(Clone, Copy, Debug)]
pub struct VertexDirections {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    #[skip]
    __: B5,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vertex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A triangle of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Indices into [`Model::vertices`].
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub colour: u16,
    /// Only present with [`ModelFeatures::PRIORITIZED_FACES`].
    pub render_priority: Option<u8>,
    /// Only present with [`ModelFeatures::TRANSPARENT_FACES`].
    pub alpha: Option<u8>,
    /// Only present with [`ModelFeatures::SKINNED_FACES`].
    pub bone: Option<u8>,
    /// Only present with [`ModelFeatures::TEXTURED_FACES`].
    pub texture_pointer: Option<u8>,
}

/// Vertex indices used to project a texture onto faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexCoord {
    pub origin: u8,
    pub u: u8,
    pub v: u8,
}

/// A decoded model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    features: ModelFeatures,
    faces: Vec<Face>,
    vertices: Vec<Vertex>,
    tex_coords: Vec<TexCoord>,
}

impl Model {
    /// Decodes an uncompressed model.
    pub fn from_existing(buffer: ByteSpan) -> Result<Model, Error> {
        let data = DataBuffer::new(buffer);
        let capacity = data.capacity();
        if capacity < TRAILER_SIZE {
            return Err(Error::TruncatedStream { offset: 0 });
        }

        let mut header = data.duplicate();
        header.set_position(capacity - TRAILER_SIZE);
        let trailer: ModelTrailer = header.read_structure()?;

        debug!(
            vertices = trailer.vertex_count,
            faces = trailer.face_count,
            tex_coords = trailer.tex_coord_count,
            features = ?trailer.features,
            "Decoding model"
        );

        if trailer.vertex_count == 0 || trailer.face_count == 0 {
            return Err(Error::EmptyGeometry {
                vertices: trailer.vertex_count,
                faces: trailer.face_count,
            });
        }

        let layout = Layout::compute(&trailer);
        let body = data.view(0..capacity - TRAILER_SIZE);

        let vertices = decode_vertices(&body, &layout, &trailer)?;
        let faces = decode_faces(&body, &layout, &trailer)?;
        let tex_coords = decode_tex_coords(&body, &layout, &trailer)?;

        Ok(Model {
            features: trailer.features,
            faces,
            vertices,
            tex_coords,
        })
    }

    pub fn features(&self) -> ModelFeatures {
        self.features
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn tex_coords(&self) -> &[TexCoord] {
        &self.tex_coords
    }
}

fn decode_vertices(
    body: &DataBuffer,
    layout: &Layout,
    trailer: &ModelTrailer,
) -> Result<Vec<Vertex>, Error> {
    let mut directions = body.view(layout.range(Region::VertexDirections));
    let mut xs = body.view(layout.range(Region::VertexX));
    let mut ys = body.view(layout.range(Region::VertexY));
    let mut zs = body.view(layout.range(Region::VertexZ));
    let mut bones = body.view(layout.range(Region::VertexBones));
    let skinned = trailer.features.contains(ModelFeatures::SKINNED_VERTICES);

    let delta = |present: bool, stream: &mut DataBuffer| -> Result<i32, Error> {
        if present {
            stream.read_signed_smart()
        } else {
            Ok(0)
        }
    };

    let mut vertices = Vec::with_capacity(usize::from(trailer.vertex_count));
    let mut base = Vertex::default();

    for _ in 0..trailer.vertex_count {
        let mask = VertexDirections::from_bytes([directions.read_u8()?]);

        base = Vertex {
            x: base.x + delta(mask.x(), &mut xs)?,
            y: base.y + delta(mask.y(), &mut ys)?,
            z: base.z + delta(mask.z(), &mut zs)?,
        };
        vertices.push(base);

        // TODO: keep vertex bones once skeletal animation is decoded
        if skinned {
            bones.read_u8()?;
        }
    }

    Ok(vertices)
}

fn read_optional(
    features: ModelFeatures,
    feature: ModelFeatures,
    stream: &mut DataBuffer,
) -> Result<Option<u8>, Error> {
    if features.contains(feature) {
        stream.read_u8().map(Some)
    } else {
        Ok(None)
    }
}

fn decode_faces(
    body: &DataBuffer,
    layout: &Layout,
    trailer: &ModelTrailer,
) -> Result<Vec<Face>, Error> {
    let features = trailer.features;

    let mut types = body.view(layout.range(Region::FaceTypes));
    let mut colours = body.view(layout.range(Region::FaceColours));
    let mut priorities = body.view(layout.range(Region::FacePriorities));
    let mut alphas = body.view(layout.range(Region::FaceAlphas));
    let mut face_data = body.view(layout.range(Region::FaceData));

    // Texture pointers are read from the bone stream, so that view has to reach the end of the
    // texture pointer region.
    let bones_start = layout.range(Region::FaceBones).start;
    let bones_end = layout.range(Region::FaceTexturePointers).end;
    let mut bones = body.view(bones_start..bones_end);

    let mut faces = Vec::with_capacity(usize::from(trailer.face_count));
    let mut strip = Strip::default();

    for face in 0..usize::from(trailer.face_count) {
        let value = types.read_u8()?;
        let colour = colours.read_u16()?;
        let render_priority =
            read_optional(features, ModelFeatures::PRIORITIZED_FACES, &mut priorities)?;
        let alpha = read_optional(features, ModelFeatures::TRANSPARENT_FACES, &mut alphas)?;
        let bone = read_optional(features, ModelFeatures::SKINNED_FACES, &mut bones)?;
        let texture_pointer = read_optional(features, ModelFeatures::TEXTURED_FACES, &mut bones)?;

        let kind =
            FaceKind::try_from(value).map_err(|value| Error::InvalidFaceType { face, value })?;
        strip = strip.advance(kind, || face_data.read_signed_smart())?;
        let (a, b, c) = strip.indices();

        faces.push(Face {
            a,
            b,
            c,
            colour,
            render_priority,
            alpha,
            bone,
            texture_pointer,
        });
    }

    Ok(faces)
}

fn decode_tex_coords(
    body: &DataBuffer,
    layout: &Layout,
    trailer: &ModelTrailer,
) -> Result<Vec<TexCoord>, Error> {
    let mut stream = body.view(layout.range(Region::TexCoords));

    (0..trailer.tex_coord_count)
        .map(|_| {
            Ok(TexCoord {
                origin: stream.read_u8()?,
                u: stream.read_u8()?,
                v: stream.read_u8()?,
            })
        })
        .collect()
}

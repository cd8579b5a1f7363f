// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::buffer::DataBuffer;
use crate::config::{read_ids, ConfigDecoder, DecoderOptions};
use crate::{ByteSpan, Error};

/// How many context menu actions an NPC can have.
pub const ACTION_COUNT: usize = 5;

/// First opcode of the action range, `30..=34`.
const FIRST_ACTION_OPCODE: u8 = 30;

/// Marks an absent id in a [`MorphismSet`].
const NO_ID: u16 = 0xFFFF;

/// The animations played while an NPC moves in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementAnimationSet {
    pub walking: u16,
    pub turn_around: u16,
    pub turn_right: u16,
    pub turn_left: u16,
}

impl MovementAnimationSet {
    fn decode(buffer: &mut DataBuffer) -> Result<Self, Error> {
        Ok(Self {
            walking: buffer.read_u16()?,
            turn_around: buffer.read_u16()?,
            turn_right: buffer.read_u16()?,
            turn_left: buffer.read_u16()?,
        })
    }
}

/// The NPCs this one can turn into, selected by a varbit or varp value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphismSet {
    pub bit_variable: Option<u16>,
    pub parameter_variable: Option<u16>,
    /// Indexed by the variable's value. `None` hides the NPC.
    pub morphisms: Vec<Option<u16>>,
}

impl MorphismSet {
    fn decode(buffer: &mut DataBuffer) -> Result<Self, Error> {
        let bit_variable = read_optional_id(buffer)?;
        let parameter_variable = read_optional_id(buffer)?;

        // the count is the highest index, not the length
        let count = usize::from(buffer.read_u8()?) + 1;
        let morphisms = (0..count)
            .map(|_| read_optional_id(buffer))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            bit_variable,
            parameter_variable,
            morphisms,
        })
    }
}

fn read_optional_id(buffer: &mut DataBuffer) -> Result<Option<u16>, Error> {
    let id = buffer.read_u16()?;
    Ok((id != NO_ID).then_some(id))
}

/// A non-player character, keyed by id in the `npc` config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpcDefinition {
    pub id: u32,
    /// The model ids composed into the NPC.
    pub models: Vec<u16>,
    /// Shown on hover and in the context menu.
    pub name: Option<String>,
    /// Shown when examining the NPC.
    pub description: Option<String>,
    /// Size, in tiles.
    pub size: i8,
    pub standing_sequence: Option<u16>,
    pub walking_sequence: Option<u16>,
    pub movement_sequences: Option<MovementAnimationSet>,
    /// The context menu actions.
    pub actions: [Option<String>; ACTION_COUNT],
    /// Original model colour to the colour that replaces it.
    pub replacement_colours: BTreeMap<u16, u16>,
    /// The model ids composed when displaying the NPC on a widget, such as dialogue heads.
    pub widget_models: Vec<u16>,
    /// Whether to draw a dot on the minimap for this NPC.
    pub visible_on_minimap: bool,
    pub combat_level: Option<u16>,
    /// Scale along the width and depth.
    pub planar_scale: u16,
    pub vertical_scale: u16,
    /// Whether this NPC is drawn before the others.
    pub priority_render: bool,
    /// Lighting offsets applied to the model.
    pub brightness: i8,
    pub diffusion: i8,
    /// The head icon drawn above the NPC.
    pub head_icon: Option<u16>,
    pub default_orientation: u16,
    pub morphisms: Option<MorphismSet>,
    pub clickable: bool,
}

impl NpcDefinition {
    /// Creates a definition with every field at its default.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            models: Vec::new(),
            name: None,
            description: None,
            size: 1,
            standing_sequence: None,
            walking_sequence: None,
            movement_sequences: None,
            actions: Default::default(),
            replacement_colours: BTreeMap::new(),
            widget_models: Vec::new(),
            visible_on_minimap: true,
            combat_level: None,
            planar_scale: 128,
            vertical_scale: 128,
            priority_render: false,
            brightness: 0,
            diffusion: 0,
            head_icon: None,
            default_orientation: 32,
            morphisms: None,
            clickable: true,
        }
    }

    /// Decodes the definition `id` from its encoded bytes.
    pub fn from_existing(id: u32, buffer: ByteSpan) -> Result<Self, Error> {
        NpcDefinitionDecoder::decode(id, &mut DataBuffer::new(buffer))
    }

    /// Like [`NpcDefinition::from_existing`], with control over how unknown opcodes are treated.
    pub fn from_existing_with_options(
        id: u32,
        buffer: ByteSpan,
        options: &DecoderOptions,
    ) -> Result<Self, Error> {
        NpcDefinitionDecoder::decode_with_options(id, &mut DataBuffer::new(buffer), options)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcOpcode {
    Models,
    Name,
    Description,
    Size,
    StandingSequence,
    WalkingSequence,
    MovementSequences,
    /// Sets the action in this slot.
    Action(usize),
    ReplacementColours,
    WidgetModels,
    HideOnMinimap,
    CombatLevel,
    PlanarScale,
    VerticalScale,
    PriorityRender,
    Brightness,
    Diffusion,
    HeadIcon,
    DefaultOrientation,
    Morphisms,
    Unclickable,
}

/// Decodes entries of the `npc` config archive.
pub struct NpcDefinitionDecoder;

impl ConfigDecoder for NpcDefinitionDecoder {
    type Definition = NpcDefinition;
    type Opcode = NpcOpcode;

    const ENTRY_NAME: &'static str = "npc";

    fn create(id: u32) -> NpcDefinition {
        NpcDefinition::new(id)
    }

    fn parse_opcode(opcode: u8) -> Option<NpcOpcode> {
        match opcode {
            1 => Some(NpcOpcode::Models),
            2 => Some(NpcOpcode::Name),
            3 => Some(NpcOpcode::Description),
            12 => Some(NpcOpcode::Size),
            13 => Some(NpcOpcode::StandingSequence),
            14 => Some(NpcOpcode::WalkingSequence),
            17 => Some(NpcOpcode::MovementSequences),
            30..=34 => Some(NpcOpcode::Action(usize::from(
                opcode - FIRST_ACTION_OPCODE,
            ))),
            40 => Some(NpcOpcode::ReplacementColours),
            60 => Some(NpcOpcode::WidgetModels),
            93 => Some(NpcOpcode::HideOnMinimap),
            95 => Some(NpcOpcode::CombatLevel),
            97 => Some(NpcOpcode::PlanarScale),
            98 => Some(NpcOpcode::VerticalScale),
            99 => Some(NpcOpcode::PriorityRender),
            100 => Some(NpcOpcode::Brightness),
            101 => Some(NpcOpcode::Diffusion),
            102 => Some(NpcOpcode::HeadIcon),
            103 => Some(NpcOpcode::DefaultOrientation),
            106 => Some(NpcOpcode::Morphisms),
            107 => Some(NpcOpcode::Unclickable),
            _ => None,
        }
    }

    fn apply(
        definition: &mut NpcDefinition,
        opcode: NpcOpcode,
        buffer: &mut DataBuffer,
    ) -> Result<(), Error> {
        match opcode {
            NpcOpcode::Models => definition.models = read_ids(buffer)?,
            NpcOpcode::Name => definition.name = Some(buffer.read_string()?),
            NpcOpcode::Description => definition.description = Some(buffer.read_string()?),
            NpcOpcode::Size => definition.size = buffer.read_i8()?,
            NpcOpcode::StandingSequence => {
                definition.standing_sequence = Some(buffer.read_u16()?)
            }
            NpcOpcode::WalkingSequence => definition.walking_sequence = Some(buffer.read_u16()?),
            NpcOpcode::MovementSequences => {
                definition.movement_sequences = Some(MovementAnimationSet::decode(buffer)?)
            }
            NpcOpcode::Action(slot) => definition.actions[slot] = Some(buffer.read_string()?),
            NpcOpcode::ReplacementColours => {
                let count = buffer.read_u8()?;

                for _ in 0..count {
                    let original = buffer.read_u16()?;
                    let replacement = buffer.read_u16()?;

                    definition.replacement_colours.insert(original, replacement);
                }
            }
            NpcOpcode::WidgetModels => definition.widget_models = read_ids(buffer)?,
            NpcOpcode::HideOnMinimap => definition.visible_on_minimap = false,
            NpcOpcode::CombatLevel => definition.combat_level = Some(buffer.read_u16()?),
            NpcOpcode::PlanarScale => definition.planar_scale = buffer.read_u16()?,
            NpcOpcode::VerticalScale => definition.vertical_scale = buffer.read_u16()?,
            NpcOpcode::PriorityRender => definition.priority_render = true,
            NpcOpcode::Brightness => definition.brightness = buffer.read_i8()?,
            NpcOpcode::Diffusion => definition.diffusion = buffer.read_i8()?,
            NpcOpcode::HeadIcon => definition.head_icon = Some(buffer.read_u16()?),
            NpcOpcode::DefaultOrientation => definition.default_orientation = buffer.read_u16()?,
            NpcOpcode::Morphisms => definition.morphisms = Some(MorphismSet::decode(buffer)?),
            NpcOpcode::Unclickable => definition.clickable = false,
        }

        Ok(())
    }
}

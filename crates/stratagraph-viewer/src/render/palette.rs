use bevy::prelude::Color;

use crate::graph::NodeTone;

pub const BACKGROUND: Color = Color::srgb(0.090, 0.090, 0.090);

pub const NODE_NORMAL: Color = Color::WHITE;
// #464d52
pub const NODE_DIMMED: Color = Color::srgb(0.275, 0.302, 0.322);
// #6fd4a0
pub const NODE_SELECTED: Color = Color::srgb(0.435, 0.831, 0.627);
// #76e3ab
pub const NODE_HOVERED: Color = Color::srgb(0.463, 0.890, 0.671);

const CONNECTION_RGB: (f32, f32, f32) = (0.463, 0.890, 0.671);
// #00ff88
pub const PARTICLE: Color = Color::srgb(0.0, 1.0, 0.533);

pub fn tone_color(tone: NodeTone) -> Color {
    match tone {
        NodeTone::Normal => NODE_NORMAL,
        NodeTone::Dimmed => NODE_DIMMED,
        NodeTone::Selected => NODE_SELECTED,
        NodeTone::Hovered => NODE_HOVERED,
    }
}

pub fn connection_color(opacity: f32) -> Color {
    let (r, g, b) = CONNECTION_RGB;
    Color::srgba(r, g, b, opacity.clamp(0.0, 1.0))
}

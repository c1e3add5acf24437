use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::{elements::DEFAULT_RADIUS, geometry::DEFAULT_EDGE_THRESHOLD};

/// Behaviour of the [`crate::Editor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsEditor {
    /// Radius of vertices created by the user.
    pub vertex_radius: f32,

    /// Maximum distance from an edge which still hits it.
    pub edge_hit_threshold: f32,

    /// Prompt shown when the user edits a vertex.
    pub vertex_edit_prompt: String,

    /// Prompt shown when the user edits an edge.
    pub edge_edit_prompt: String,

    /// Number of random vertices created by [`crate::Editor::initialize`].
    pub initial_vertices: usize,
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self {
            vertex_radius: DEFAULT_RADIUS,
            edge_hit_threshold: DEFAULT_EDGE_THRESHOLD,
            vertex_edit_prompt: "Enter a new value for this vertex.".to_string(),
            edge_edit_prompt: "Enter a new value for this edge.".to_string(),
            initial_vertices: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsVertexStyle {
    pub color: Color32,
    pub hovered_color: Color32,
    pub selected_color: Color32,

    pub outline_color: Color32,
    pub outline_width: f32,

    pub font_size: f32,
    pub text_color: Color32,

    /// Background of labels which do not fit into the circle.
    pub text_box_color: Color32,
    pub text_box_padding: f32,
}

impl Default for SettingsVertexStyle {
    fn default() -> Self {
        Self {
            color: Color32::WHITE,
            hovered_color: Color32::from_gray(230),
            selected_color: Color32::from_gray(160),
            outline_color: Color32::BLACK,
            outline_width: 2.,
            font_size: 12.,
            text_color: Color32::from_rgb(0x24, 0xB4, 0xF4),
            text_box_color: Color32::from_rgba_unmultiplied(255, 255, 255, 230),
            text_box_padding: 2.,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsEdgeStyle {
    pub color: Color32,
    pub hovered_color: Color32,
    pub width: f32,
    pub font_size: f32,
}

impl Default for SettingsEdgeStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            hovered_color: Color32::from_gray(230),
            width: 2.,
            font_size: 12.,
        }
    }
}

/// Presentation of the graph. Read only for the drawing code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsStyle {
    pub background: Color32,

    /// Show vertex labels even when the vertex is neither hovered nor selected.
    pub labels_always: bool,

    pub vertex: SettingsVertexStyle,
    pub edge: SettingsEdgeStyle,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(240),
            labels_always: false,
            vertex: SettingsVertexStyle::default(),
            edge: SettingsEdgeStyle::default(),
        }
    }
}

impl SettingsStyle {
    pub fn with_labels_always(mut self, labels_always: bool) -> Self {
        self.labels_always = labels_always;
        self
    }

    pub fn with_background(mut self, background: Color32) -> Self {
        self.background = background;
        self
    }
}

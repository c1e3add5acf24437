use egui::{
    emath::Rot2,
    epaint::{CircleShape, TextShape},
    FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2,
};

use crate::{
    elements::{Edge, Vertex},
    geometry::{distance, midpoint, segment_angle},
    settings::SettingsStyle,
    Graph,
};

use super::Labels;

/// Gap between a vertex and the label box drawn above it.
const LABEL_GAP: f32 = 4.;

/// Everything the drawing code needs besides the graph.
pub struct DrawContext<'a, V, E> {
    pub painter: &'a Painter,
    pub style: &'a SettingsStyle,
    pub labels: &'a Labels<V, E>,
    /// Added to graph coordinates to get screen coordinates.
    pub offset: Vec2,
}

/// Paints a [`Graph`] back to front: background, edges, edge labels, vertices, vertex labels
/// and the rubber band of a ctrl drag.
pub struct Drawer<'a, V, E> {
    ctx: &'a DrawContext<'a, V, E>,
    g: &'a Graph<V, E>,
    rubber_band: Option<[Pos2; 2]>,
}

impl<'a, V, E> Drawer<'a, V, E> {
    pub fn new(g: &'a Graph<V, E>, ctx: &'a DrawContext<'a, V, E>) -> Self {
        Drawer {
            ctx,
            g,
            rubber_band: None,
        }
    }

    pub fn with_rubber_band(mut self, rubber_band: Option<[Pos2; 2]>) -> Self {
        self.rubber_band = rubber_band;
        self
    }

    pub fn draw(self) {
        self.draw_background();
        self.draw_edges();
        self.draw_edge_labels();
        self.draw_vertices();
        self.draw_vertex_labels();
        self.draw_rubber_band();
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        p + self.ctx.offset
    }

    fn draw_background(&self) {
        self.ctx
            .painter
            .rect_filled(self.ctx.painter.clip_rect(), 0., self.ctx.style.background);
    }

    // reversed so that the first element in order ends up on top
    fn draw_edges(&self) {
        let style = &self.ctx.style.edge;
        for (idx, e) in self.g.edges().rev() {
            let Some((a, b)) = self.g.edge_segment(idx) else {
                continue;
            };

            let color = if e.hovered() {
                style.hovered_color
            } else {
                style.color
            };
            self.ctx.painter.line_segment(
                [self.to_screen(a), self.to_screen(b)],
                Stroke::new(style.width, color),
            );
        }
    }

    fn draw_edge_labels(&self) {
        for (idx, e) in self.g.edges().rev() {
            let Some((begin, end)) = self.g.edge_endpoints(idx) else {
                continue;
            };
            let (Some(begin), Some(end)) = (self.g.vertex(begin), self.g.vertex(end)) else {
                continue;
            };

            self.draw_edge_label(e, begin, end);
        }
    }

    fn draw_edge_label(&self, e: &Edge<E>, begin: &Vertex<V>, end: &Vertex<V>) {
        let style = &self.ctx.style.edge;
        let text = (self.ctx.labels.edge)(e.payload());
        if text.is_empty() {
            return;
        }

        let color = if e.hovered() {
            style.hovered_color
        } else {
            style.color
        };
        let galley =
            self.ctx
                .painter
                .layout_no_wrap(text, FontId::proportional(style.font_size), color);

        let (a, b) = (begin.center(), end.center());
        let len = distance(a, b);
        let text_width = galley.size().x;
        if len <= text_width {
            return;
        }

        let alpha = edge_label_alpha(len, begin.radius() + end.radius(), text_width);
        let angle = segment_angle(a, b);

        // text sits centered on the line, raised by the line width
        let local_top_left = Vec2::new(-text_width / 2., -style.width - galley.size().y);
        let pos = self.to_screen(midpoint(a, b)) + Rot2::from_angle(angle) * local_top_left;

        self.ctx.painter.add(
            TextShape::new(pos, galley, color)
                .with_angle(angle)
                .with_opacity_factor(alpha),
        );
    }

    fn draw_vertices(&self) {
        let style = &self.ctx.style.vertex;
        for (_, v) in self.g.vertices().rev() {
            let fill = if v.selected() {
                style.selected_color
            } else if v.hovered() {
                style.hovered_color
            } else {
                style.color
            };

            self.ctx.painter.add(CircleShape {
                center: self.to_screen(v.center()),
                radius: v.radius(),
                fill,
                stroke: Stroke::new(style.outline_width, style.outline_color),
            });
        }
    }

    fn draw_vertex_labels(&self) {
        for (_, v) in self.g.vertices().rev() {
            if self.ctx.style.labels_always || v.hovered() || v.selected() {
                self.draw_vertex_label(v);
            }
        }
    }

    fn draw_vertex_label(&self, v: &Vertex<V>) {
        let style = &self.ctx.style.vertex;
        let text = (self.ctx.labels.vertex)(v.payload());
        if text.is_empty() {
            return;
        }

        let galley = self.ctx.painter.layout_no_wrap(
            text,
            FontId::proportional(style.font_size),
            style.text_color,
        );
        let size = galley.size();
        let center = self.to_screen(v.center());

        if label_fits_inside(size, style.text_box_padding, v.radius()) {
            let pos = center - size / 2.;
            self.ctx
                .painter
                .add(TextShape::new(pos, galley, style.text_color));
            return;
        }

        let bottom = center.y - (v.radius() + LABEL_GAP + style.text_box_padding);
        let pos = Pos2::new(center.x - size.x / 2., bottom - size.y);
        let text_box = Rect::from_min_size(pos, size).expand(style.text_box_padding);

        self.ctx
            .painter
            .rect_filled(text_box, 0., style.text_box_color);
        self.ctx
            .painter
            .add(TextShape::new(pos, galley, style.text_color));
    }

    fn draw_rubber_band(&self) {
        let Some([from, to]) = self.rubber_band else {
            return;
        };

        let style = &self.ctx.style.edge;
        self.ctx.painter.add(Shape::line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(style.width, style.color),
        ));
    }
}

/// Opacity of an edge label: fades out as the free length of the edge approaches the text
/// width.
pub fn edge_label_alpha(len: f32, radii: f32, text_width: f32) -> f32 {
    if radii <= 0. {
        return 1.;
    }

    (((len - radii) - text_width) / (2. * radii)).clamp(0., 1.)
}

/// Checks if a label of `size` plus padding fits inside a circle of `radius`.
pub fn label_fits_inside(size: Vec2, padding: f32, radius: f32) -> bool {
    let padded = size + Vec2::splat(2. * padding);
    padded.length() < radius * 2.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_alpha_fades_with_compression() {
        // two vertices of radius 20, text 30 wide
        assert_eq!(edge_label_alpha(200., 40., 30.), 1.);
        assert_eq!(edge_label_alpha(60., 40., 30.), 0.);
        assert!((edge_label_alpha(110., 40., 30.) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn short_labels_fit_inside_vertex() {
        assert!(label_fits_inside(Vec2::new(20., 10.), 2., 20.));
        assert!(!label_fits_inside(Vec2::new(40., 10.), 2., 20.));
    }
}

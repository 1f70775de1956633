#![warn(missing_docs)]

//! SVG renderer for faceplate primitives.
//!
//! Produces a standalone SVG document sized in real-world millimeters,
//! with the viewBox set to the content bounding box expanded by 10%
//! padding on each side. Stroke styling is keyed by primitive class:
//! boundary geometry draws black at 0.1mm, hole geometry red at 0.05mm.
//! Arcs become path `A` commands carrying the large-arc and sweep flags.

use faceplate_flatten::{bounds_of, DrawingRenderer, Primitive, PrimitiveClass, Shape};

/// Fraction of the larger content extent added as padding per side.
const PADDING_FRACTION: f64 = 0.1;

/// Renders primitive lists as SVG documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

fn class_attr(class: PrimitiveClass) -> &'static str {
    match class {
        PrimitiveClass::Boundary => "boundary",
        PrimitiveClass::Hole => "hole",
    }
}

fn element(primitive: &Primitive) -> String {
    let class = class_attr(primitive.class);
    match &primitive.shape {
        Shape::Line { p1, p2 } => format!(
            "  <line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\" class=\"{class}\"/>\n",
            p1.x, p1.y, p2.x, p2.y
        ),
        Shape::Circle { center, radius } => format!(
            "  <circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" class=\"{class}\"/>\n",
            center.x, center.y, radius
        ),
        Shape::Arc(arc) => {
            let start = arc.start_point();
            let end = arc.end_point();
            format!(
                "  <path d=\"M {:.3} {:.3} A {:.3} {:.3} 0 {} {} {:.3} {:.3}\" class=\"{class}\"/>\n",
                start.x,
                start.y,
                arc.radius,
                arc.radius,
                u8::from(arc.large_arc),
                u8::from(arc.sweep_ccw),
                end.x,
                end.y
            )
        }
        Shape::Ellipse {
            center,
            major_axis,
            ratio,
        } => {
            let rx = major_axis.distance(&faceplate_flatten::Point2D::ORIGIN);
            let ry = rx * ratio;
            let angle = major_axis.y.atan2(major_axis.x).to_degrees();
            format!(
                "  <ellipse cx=\"{:.3}\" cy=\"{:.3}\" rx=\"{:.3}\" ry=\"{:.3}\" transform=\"rotate({:.3} {:.3} {:.3})\" class=\"{class}\"/>\n",
                center.x, center.y, rx, ry, angle, center.x, center.y
            )
        }
        Shape::Polyline { points, closed } => {
            let coords: Vec<String> = points
                .iter()
                .map(|p| format!("{:.3},{:.3}", p.x, p.y))
                .collect();
            let tag = if *closed { "polygon" } else { "polyline" };
            format!(
                "  <{tag} points=\"{}\" class=\"{class}\"/>\n",
                coords.join(" ")
            )
        }
    }
}

impl DrawingRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, primitives: &[Primitive]) -> String {
        let bounds = bounds_of(primitives);
        let padded = if bounds.is_valid() {
            bounds.expanded_by_fraction(PADDING_FRACTION)
        } else {
            // Nothing to draw: a 10x10 frame keeps the document well-formed.
            let mut b = faceplate_flatten::BoundingBox2D::empty();
            b.include_point(faceplate_flatten::Point2D::new(0.0, 0.0));
            b.include_point(faceplate_flatten::Point2D::new(10.0, 10.0));
            b
        };

        let width = padded.width();
        let height = padded.height();

        let mut svg = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.3}mm\" height=\"{height:.3}mm\" \
             viewBox=\"{:.3} {:.3} {width:.3} {height:.3}\">\n\
             \x20 <defs>\n\
             \x20   <style>\n\
             \x20     .boundary {{ fill: none; stroke: #000000; stroke-width: 0.1mm; }}\n\
             \x20     .hole {{ fill: none; stroke: #ff0000; stroke-width: 0.05mm; }}\n\
             \x20   </style>\n\
             \x20 </defs>\n",
            padded.min_x, padded.min_y
        );

        for primitive in primitives {
            svg.push_str(&element(primitive));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faceplate_flatten::{ArcShape, Point2D};

    fn boundary_line() -> Primitive {
        Primitive::new(
            PrimitiveClass::Boundary,
            Shape::Line {
                p1: Point2D::new(0.0, 0.0),
                p2: Point2D::new(10.0, 0.0),
            },
        )
    }

    #[test]
    fn test_document_structure_and_styles() {
        let content = SvgRenderer.render(&[boundary_line()]);
        assert!(content.starts_with("<?xml"), "XML declaration first");
        assert!(content.contains("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(content.contains(".boundary { fill: none; stroke: #000000;"));
        assert!(content.contains(".hole { fill: none; stroke: #ff0000;"));
        assert!(content.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_viewbox_includes_ten_percent_padding() {
        let content = SvgRenderer.render(&[boundary_line()]);
        // Content spans 10x0; padding = 10 * 0.1 = 1 on each side.
        assert!(
            content.contains("viewBox=\"-1.000 -1.000 12.000 2.000\""),
            "got: {content}"
        );
        assert!(content.contains("width=\"12.000mm\""));
    }

    #[test]
    fn test_hole_circle_uses_hole_class() {
        let circle = Primitive::new(
            PrimitiveClass::Hole,
            Shape::Circle {
                center: Point2D::new(5.0, 5.0),
                radius: 2.0,
            },
        );
        let content = SvgRenderer.render(&[circle]);
        assert!(content.contains("<circle cx=\"5.000\" cy=\"5.000\" r=\"2.000\" class=\"hole\"/>"));
    }

    #[test]
    fn test_arc_path_carries_flags() {
        let arc = Primitive::new(
            PrimitiveClass::Boundary,
            Shape::Arc(ArcShape {
                center: Point2D::new(0.0, 0.0),
                radius: 1.0,
                start_angle: 0.0,
                end_angle: 270.0,
                sweep_ccw: true,
                large_arc: true,
            }),
        );
        let content = SvgRenderer.render(&[arc]);
        assert!(
            content.contains("A 1.000 1.000 0 1 1"),
            "large-arc and sweep flags set: {content}"
        );
    }

    #[test]
    fn test_closed_polyline_becomes_polygon() {
        let poly = Primitive::new(
            PrimitiveClass::Boundary,
            Shape::Polyline {
                points: vec![
                    Point2D::new(0.0, 0.0),
                    Point2D::new(4.0, 0.0),
                    Point2D::new(4.0, 4.0),
                ],
                closed: true,
            },
        );
        let content = SvgRenderer.render(&[poly]);
        assert!(content.contains("<polygon points=\"0.000,0.000 4.000,0.000 4.000,4.000\""));
    }

    #[test]
    fn test_empty_list_renders_wellformed_frame() {
        let content = SvgRenderer.render(&[]);
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }
}

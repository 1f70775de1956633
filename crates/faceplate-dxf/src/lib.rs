#![warn(missing_docs)]

//! DXF (AutoCAD Drawing Exchange Format) renderer for faceplate
//! primitives.
//!
//! Emits ASCII DXF with HEADER, TABLES, and ENTITIES sections. Boundary
//! primitives land on the `BOUNDARY` layer (color 1), hole primitives on
//! the `HOLES` layer (color 2). Each primitive maps to its native DXF
//! entity:
//! - LINE for straight segments
//! - CIRCLE for full circles
//! - ARC with start/end angles in degrees, counter-clockwise
//! - ELLIPSE with major-axis endpoint and radius ratio
//! - LWPOLYLINE for open or closed point chains

use faceplate_flatten::{DrawingRenderer, Primitive, PrimitiveClass, Shape};

/// Renders primitive lists as ASCII DXF.
#[derive(Debug, Default, Clone, Copy)]
pub struct DxfRenderer;

/// Layer name for a primitive class.
fn layer_name(class: PrimitiveClass) -> &'static str {
    match class {
        PrimitiveClass::Boundary => "BOUNDARY",
        PrimitiveClass::Hole => "HOLES",
    }
}

/// Append one group-code/value pair.
fn pair(out: &mut String, code: i32, value: &str) {
    out.push_str(&format!("{code:>3}\n{value}\n"));
}

fn pair_f(out: &mut String, code: i32, value: f64) {
    pair(out, code, &format!("{value:.6}"));
}

fn write_header(out: &mut String) {
    pair(out, 0, "SECTION");
    pair(out, 2, "HEADER");
    pair(out, 9, "$ACADVER");
    pair(out, 1, "AC1021"); // DXF R2007
    pair(out, 9, "$INSUNITS");
    pair(out, 70, "4"); // millimeters
    pair(out, 0, "ENDSEC");
}

fn write_layer(out: &mut String, name: &str, color: i32) {
    pair(out, 0, "LAYER");
    pair(out, 2, name);
    pair(out, 70, "0");
    pair(out, 62, &color.to_string());
    pair(out, 6, "CONTINUOUS");
}

fn write_tables(out: &mut String) {
    pair(out, 0, "SECTION");
    pair(out, 2, "TABLES");
    pair(out, 0, "TABLE");
    pair(out, 2, "LAYER");
    pair(out, 70, "3");
    write_layer(out, "0", 7);
    write_layer(out, "BOUNDARY", 1);
    write_layer(out, "HOLES", 2);
    pair(out, 0, "ENDTAB");
    pair(out, 0, "ENDSEC");
}

fn write_entity(out: &mut String, primitive: &Primitive) {
    let layer = layer_name(primitive.class);
    match &primitive.shape {
        Shape::Line { p1, p2 } => {
            pair(out, 0, "LINE");
            pair(out, 8, layer);
            pair_f(out, 10, p1.x);
            pair_f(out, 20, p1.y);
            pair_f(out, 30, 0.0);
            pair_f(out, 11, p2.x);
            pair_f(out, 21, p2.y);
            pair_f(out, 31, 0.0);
        }
        Shape::Circle { center, radius } => {
            pair(out, 0, "CIRCLE");
            pair(out, 8, layer);
            pair_f(out, 10, center.x);
            pair_f(out, 20, center.y);
            pair_f(out, 30, 0.0);
            pair_f(out, 40, *radius);
        }
        Shape::Arc(arc) => {
            // DXF arcs run counter-clockwise from start to end; the
            // resolver already stores angles in that direction.
            pair(out, 0, "ARC");
            pair(out, 8, layer);
            pair_f(out, 10, arc.center.x);
            pair_f(out, 20, arc.center.y);
            pair_f(out, 30, 0.0);
            pair_f(out, 40, arc.radius);
            pair_f(out, 50, arc.start_angle);
            pair_f(out, 51, arc.end_angle);
        }
        Shape::Ellipse {
            center,
            major_axis,
            ratio,
        } => {
            pair(out, 0, "ELLIPSE");
            pair(out, 8, layer);
            pair_f(out, 10, center.x);
            pair_f(out, 20, center.y);
            pair_f(out, 30, 0.0);
            // Major axis endpoint, relative to the center.
            pair_f(out, 11, major_axis.x);
            pair_f(out, 21, major_axis.y);
            pair_f(out, 31, 0.0);
            pair_f(out, 40, *ratio);
            pair_f(out, 41, 0.0);
            pair_f(out, 42, std::f64::consts::TAU);
        }
        Shape::Polyline { points, closed } => {
            pair(out, 0, "LWPOLYLINE");
            pair(out, 8, layer);
            pair(out, 90, &points.len().to_string());
            pair(out, 70, if *closed { "1" } else { "0" });
            for p in points {
                pair_f(out, 10, p.x);
                pair_f(out, 20, p.y);
            }
        }
    }
}

fn write_entities(out: &mut String, primitives: &[Primitive]) {
    pair(out, 0, "SECTION");
    pair(out, 2, "ENTITIES");
    for primitive in primitives {
        write_entity(out, primitive);
    }
    pair(out, 0, "ENDSEC");
}

impl DrawingRenderer for DxfRenderer {
    fn extension(&self) -> &'static str {
        "dxf"
    }

    fn render(&self, primitives: &[Primitive]) -> String {
        let mut out = String::new();
        write_header(&mut out);
        write_tables(&mut out);
        write_entities(&mut out, primitives);
        pair(&mut out, 0, "EOF");
        out
    }
}

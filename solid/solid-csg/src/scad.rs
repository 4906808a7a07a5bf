//! OpenSCAD-style text emission.

use std::fmt::Write;

use crate::node::{CsgNode, CsgOp, ParamValue};

const INDENT: &str = "    ";

/// Format a number so that equal values always print identically.
#[allow(clippy::float_cmp)]
fn num(v: f64) -> String {
    // -0 and 0 must print the same
    if v == 0.0 { "0".to_string() } else { format!("{v}") }
}

fn list(values: impl IntoIterator<Item = f64>) -> String {
    let parts: Vec<String> = values.into_iter().map(num).collect();
    format!("[{}]", parts.join(", "))
}

fn param(value: &ParamValue) -> String {
    match value {
        ParamValue::Number(v) => num(*v),
        ParamValue::Int(i) => i.to_string(),
        ParamValue::Bool(b) => b.to_string(),
        ParamValue::Vector(v) => list(v.iter().copied()),
        ParamValue::Text(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
    }
}

fn arguments(op: &CsgOp) -> String {
    match op {
        CsgOp::Multmatrix(frame) => {
            let m = frame.matrix();
            let rows: Vec<String> = (0..4)
                .map(|r| list((0..4).map(|c| m[(r, c)])))
                .collect();
            format!("m=[{}]", rows.join(", "))
        }
        CsgOp::Color(colour) => format!("c={}", list(colour.rgba)),
        CsgOp::Primitive(p) => p
            .params
            .iter()
            .map(|(name, value)| format!("{name}={}", param(value)))
            .collect::<Vec<_>>()
            .join(", "),
        CsgOp::Union
        | CsgOp::Difference
        | CsgOp::Intersection
        | CsgOp::Hull
        | CsgOp::Minkowski => String::new(),
    }
}

impl CsgNode {
    /// Emit deterministic OpenSCAD-style source for this subtree.
    ///
    /// Metadata names are not emitted, so two trees with the
    /// [same geometry](CsgNode::same_geometry) produce identical text.
    #[must_use]
    pub fn to_scad(&self) -> String {
        let mut out = String::new();
        self.write_scad(&mut out, 0);
        out
    }

    fn write_scad(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        let head = format!(
            "{indent}{}{}({})",
            self.modifiers().scad_prefix(),
            self.op().keyword(),
            arguments(self.op())
        );
        if self.children().is_empty() {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{head};");
            return;
        }
        let _ = writeln!(out, "{head} {{");
        for child in self.children() {
            child.write_scad(out, depth + 1);
        }
        let _ = writeln!(out, "{indent}}}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Modifiers, Primitive};
    use solid_types::{Colour, Frame};

    #[test]
    fn emits_nested_tree() {
        let tree = CsgNode::difference()
            .with_child(
                CsgNode::union().with_child(CsgNode::primitive(
                    Primitive::new("cube").with_param("size", [1.0, 1.0, 1.0]),
                )),
            )
            .with_child(
                CsgNode::multmatrix(Frame::translation(0.5, 0.0, 0.0)).with_child(
                    CsgNode::primitive(Primitive::new("cube").with_param("size", [1.0, 1.0, 1.0])),
                ),
            );

        let expected = "\
difference() {
    union() {
        cube(size=[1, 1, 1]);
    }
    multmatrix(m=[[1, 0, 0, 0.5], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]) {
        cube(size=[1, 1, 1]);
    }
}
";
        assert_eq!(tree.to_scad(), expected);
    }

    #[test]
    fn emits_modifiers_and_colour() {
        let tree = CsgNode::color(Colour::rgb(1.0, 0.0, 0.0))
            .with_modifiers(Modifiers::TRANSPARENT)
            .with_child(CsgNode::primitive(
                Primitive::new("sphere")
                    .with_param("r", 2.5)
                    .with_param("$fn", 16_u32),
            ));
        assert_eq!(
            tree.to_scad(),
            "%color(c=[1, 0, 0, 1]) {\n    sphere(r=2.5, $fn=16);\n}\n"
        );
    }

    #[test]
    fn empty_container_and_negative_zero() {
        assert_eq!(CsgNode::union().to_scad(), "union();\n");
        let neg = CsgNode::primitive(Primitive::new("p").with_param("x", -0.0));
        assert_eq!(neg.to_scad(), "p(x=0);\n");
    }

    #[test]
    fn names_do_not_affect_output() {
        let a = CsgNode::union().with_name("a");
        let b = CsgNode::union().with_name("b");
        assert_eq!(a.to_scad(), b.to_scad());
    }

    #[test]
    fn text_params_are_quoted() {
        let node = CsgNode::primitive(Primitive::new("text").with_param("text", "a\"b"));
        assert_eq!(node.to_scad(), "text(text=\"a\\\"b\");\n");
    }
}

// Copyright 2025 the Plinth Authors
// SPDX-License-Identifier: MIT

//! SVG serialization of a [`Surface`].
//!
//! This is a deliberately small dump: nested `<g>` elements with class and
//! translate attributes, and one element per mark. It exists so headless
//! hosts (demos, tests, report generators) can snapshot a surface without a
//! renderer.

use peniko::Brush;

use crate::mark::{MarkPayload, TextAnchor, TextBaseline};
use crate::surface::{GroupId, Surface};
use crate::viewport::Size;

impl Surface {
    /// Serializes the surface to an SVG document of the given size.
    pub fn to_svg_string(&self, size: Size) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="0 0 {} {}" width="{}" height="{}">"#,
            size.width, size.height, size.width, size.height
        ));
        out.push('\n');
        for root in self.roots().collect::<Vec<_>>() {
            self.write_group(&mut out, root);
        }
        out.push_str("</svg>\n");
        out
    }

    fn write_group(&self, out: &mut String, id: GroupId) {
        let Some(group) = self.get(id) else {
            return;
        };
        out.push_str("<g");
        if !group.class().is_empty() {
            out.push_str(&format!(r#" class="{}""#, escape_xml(group.class())));
        }
        let t = group.translate();
        if t.x != 0.0 || t.y != 0.0 {
            out.push_str(&format!(r#" transform="translate({}, {})""#, t.x, t.y));
        }
        out.push_str(">\n");

        // Stable sort keeps insertion order among equal z-indices.
        let mut marks: Vec<_> = group.marks().iter().collect();
        marks.sort_by_key(|m| m.z_index);
        for mark in marks {
            match &mark.payload {
                MarkPayload::Rect(r) => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    write_paint_attr(out, "fill", &r.fill);
                    write_opacity_attr(out, mark.opacity);
                    out.push_str("/>\n");
                }
                MarkPayload::Path(p) => {
                    let d = p.path.to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    write_paint_attr(out, "fill", &p.fill);
                    if p.stroke_width > 0.0 {
                        write_paint_attr(out, "stroke", &p.stroke);
                        out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                    }
                    write_opacity_attr(out, mark.opacity);
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Middle => "middle",
                        TextBaseline::Hanging => "hanging",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{baseline}""#,
                        t.pos.x, t.pos.y, t.font_size
                    ));
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    if t.angle != 0.0 {
                        out.push_str(&format!(
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        ));
                    }
                    write_paint_attr(out, "fill", &t.fill);
                    write_opacity_attr(out, mark.opacity);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        for child in self.children(id) {
            self.write_group(out, child);
        }
        out.push_str("</g>\n");
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (value, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn write_opacity_attr(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        out.push_str(&format!(r#" opacity="{opacity}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};
    use peniko::Color;

    use crate::mark::{Mark, MarkId};
    use crate::surface::Surface;
    use crate::viewport::Size;

    #[test]
    fn nested_groups_serialize_with_class_and_transform() {
        let mut s = Surface::new();
        let canvas = s.group("plinth-canvas");
        s.set_translate(canvas, Vec2::new(20.0, 20.0));
        let layer = s.group_under(canvas, "plinth-layer-0");
        s.push_mark(
            layer,
            Mark::rect(
                MarkId::from_raw(1),
                Rect::new(0.0, 0.0, 10.0, 10.0),
                Color::BLACK,
            ),
        );

        let svg = s.to_svg_string(Size {
            width: 100.0,
            height: 50.0,
        });
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains(r#"class="plinth-canvas""#));
        assert!(svg.contains(r#"transform="translate(20, 20)""#));
        assert!(svg.contains(r#"class="plinth-layer-0""#));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn text_is_escaped() {
        let mut s = Surface::new();
        let g = s.group("labels");
        s.push_mark(
            g,
            Mark::text(MarkId::from_raw(1), Point::new(0.0, 0.0), "a<b&c", 10.0),
        );
        let svg = s.to_svg_string(Size {
            width: 10.0,
            height: 10.0,
        });
        assert!(svg.contains("a&lt;b&amp;c"));
    }
}

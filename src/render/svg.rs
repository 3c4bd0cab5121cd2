//! SVG generation
//!
//! Shapes become [`SvgNode`]s, which are written as XML elements through
//! quick-xml. Attribute values are escaped by the writer.

use std::fmt;

use glam::DVec2;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::canvas::Canvas;
use super::geometry::PathData;
use super::options::RenderOptions;
use super::shapes::Shape;
use crate::errors::RenderError;
use crate::types::Scaler;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Ordered `style` attribute entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgStyle {
    entries: Vec<(&'static str, String)>,
}

impl SvgStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for SvgStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{k}:{v}")?;
        }
        Ok(())
    }
}

/// The SVG elements a shape can turn into
#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    Polyline {
        points: Vec<DVec2>,
        style: SvgStyle,
    },
    Circle {
        center: DVec2,
        r: f64,
        style: SvgStyle,
    },
    Ellipse {
        center: DVec2,
        radii: DVec2,
        style: SvgStyle,
    },
    Path {
        d: PathData,
        style: SvgStyle,
    },
}

impl SvgNode {
    /// Element name
    pub fn tag(&self) -> &'static str {
        match self {
            SvgNode::Polyline { .. } => "polyline",
            SvgNode::Circle { .. } => "circle",
            SvgNode::Ellipse { .. } => "ellipse",
            SvgNode::Path { .. } => "path",
        }
    }

    /// Geometry attributes in output order, followed by `style`.
    fn attributes(&self) -> Vec<(&'static str, String)> {
        let (mut attrs, style) = match self {
            SvgNode::Polyline { points, style } => {
                let points = points
                    .iter()
                    .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                (vec![("points", points)], style)
            }
            SvgNode::Circle { center, r, style } => (
                vec![
                    ("cx", fmt_num(center.x)),
                    ("cy", fmt_num(center.y)),
                    ("r", fmt_num(*r)),
                ],
                style,
            ),
            SvgNode::Ellipse {
                center,
                radii,
                style,
            } => (
                vec![
                    ("cx", fmt_num(center.x)),
                    ("cy", fmt_num(center.y)),
                    ("rx", fmt_num(radii.x)),
                    ("ry", fmt_num(radii.y)),
                ],
                style,
            ),
            SvgNode::Path { d, style } => (vec![("d", d.to_string())], style),
        };
        attrs.push(("style", style.to_string()));
        attrs
    }

    /// The node as an empty XML element.
    pub fn to_element(&self) -> BytesStart<'static> {
        let mut element = BytesStart::new(self.tag());
        for (key, value) in self.attributes() {
            element.push_attribute((key, value.as_str()));
        }
        element
    }
}

/// Root SVG element
#[derive(Debug, Clone, PartialEq)]
pub struct Svg {
    pub width: f64,
    pub height: f64,
    pub children: Vec<SvgNode>,
}

impl Svg {
    /// Serialize as an SVG document, one element per line.
    pub fn to_xml(&self) -> Result<String, RenderError> {
        let (w, h) = (fmt_num(self.width), fmt_num(self.height));
        let view_box = format!("0 0 {w} {h}");
        let root = BytesStart::new("svg").with_attributes([
            ("xmlns", SVG_NS),
            ("width", w.as_str()),
            ("height", h.as_str()),
            ("viewBox", view_box.as_str()),
        ]);

        let mut writer = Writer::new(Vec::new());
        write_event(&mut writer, Event::Start(root))?;
        writer.get_mut().push(b'\n');
        for child in &self.children {
            write_event(&mut writer, Event::Empty(child.to_element()))?;
            writer.get_mut().push(b'\n');
        }
        write_event(&mut writer, Event::End(BytesEnd::new("svg")))?;
        writer.get_mut().push(b'\n');

        String::from_utf8(writer.into_inner()).map_err(|e| RenderError::Xml {
            message: e.to_string(),
        })
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), RenderError> {
    writer.write_event(event).map_err(|e| RenderError::Xml {
        message: e.to_string(),
    })
}

/// Lay out the canvas in an `options.width` x `options.height` viewport and serialize it.
pub fn generate_svg(canvas: &Canvas, options: &RenderOptions) -> Result<String, RenderError> {
    let limits = canvas.bounds().view_limits(options.margin);
    let scaler = Scaler::fit(limits, options.width, options.height, canvas.aspect());

    let svg = Svg {
        width: options.width,
        height: options.height,
        children: canvas
            .shapes()
            .iter()
            .map(|shape| shape.render_svg(&scaler))
            .collect(),
    };
    svg.to_xml()
}

/// Format a number like C's %g: 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Aspect;
    use glam::dvec2;

    fn small_options() -> RenderOptions {
        RenderOptions {
            width: 120.0,
            height: 120.0,
            margin: 0.1,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(110.0), "110");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(-2.25), "-2.25");
        assert_eq!(fmt_num(1234567.0), "1234570");
        assert_eq!(fmt_num(60.000000000000004), "60");
        assert_eq!(fmt_num(0.000123456789), "0.000123457");
    }

    #[test]
    fn style_serialization() {
        let style = SvgStyle::new().add("fill", "none").add("stroke-width", "2");
        assert_eq!(style.to_string(), "fill:none;stroke-width:2");
        assert_eq!(style.get("fill"), Some("none"));
        assert_eq!(style.get("stroke"), None);
    }

    #[test]
    fn single_line_svg() {
        let options = small_options();
        let mut canvas = Canvas::new(&options);
        canvas.plot(vec![0.0, 10.0], vec![0.0, 10.0]).unwrap();
        canvas.set_aspect(Aspect::Equal);
        let svg = generate_svg(&canvas, &options).unwrap();
        insta::assert_snapshot!(svg.trim_end(), @r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="120" height="120" viewBox="0 0 120 120">
        <polyline points="10,110 110,10" style="fill:none;stroke:#1f77b4;stroke-width:1.5"/>
        </svg>
        "#);
    }

    #[test]
    fn circle_and_arc_svg() {
        let options = small_options();
        let mut canvas = Canvas::new(&options);
        canvas.add_circle(dvec2(0.0, 0.0), 5.0);
        canvas.add_arc(dvec2(0.0, 0.0), 10.0, 10.0, 0.0, 90.0);
        canvas.set_aspect(Aspect::Equal);
        let svg = generate_svg(&canvas, &options).unwrap();
        insta::assert_snapshot!(svg.trim_end(), @r#"
        <svg xmlns="http://www.w3.org/2000/svg" width="120" height="120" viewBox="0 0 120 120">
        <circle cx="60" cy="60" r="50" style="fill:none;stroke:rgb(0,0,0);stroke-width:1"/>
        <path d="M110,60 A50,50 0 0 0 60,10" style="fill:none;stroke:rgb(0,0,0);stroke-width:1"/>
        </svg>
        "#);
    }

    #[test]
    fn style_values_are_escaped() {
        let options = RenderOptions {
            palette: vec!["red\"/><script/>".to_string()],
            ..RenderOptions::default()
        };
        let mut canvas = Canvas::new(&options);
        canvas.plot([0.0, 1.0], [0.0, 1.0]).unwrap();
        let svg = generate_svg(&canvas, &options).unwrap();
        assert!(!svg.contains("<script"), "{svg}");
        assert!(
            svg.contains(r#"style="fill:none;stroke:red&quot;/&gt;&lt;script/&gt;;stroke-width:1.5""#),
            "{svg}"
        );
        assert_eq!(svg.lines().count(), 3);
    }

    #[test]
    fn element_name_follows_node_kind() {
        let node = SvgNode::Ellipse {
            center: dvec2(1.0, 2.0),
            radii: dvec2(3.0, 4.5),
            style: SvgStyle::new().add("fill", "none"),
        };
        let element = node.to_element();
        assert_eq!(element.name().as_ref(), node.tag().as_bytes());
        let attrs: Vec<(String, String)> = element
            .attributes()
            .map(|a| {
                let a = a.unwrap();
                (
                    String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                    a.unescape_value().unwrap().into_owned(),
                )
            })
            .collect();
        let expected = [
            ("cx", "1"),
            ("cy", "2"),
            ("rx", "3"),
            ("ry", "4.5"),
            ("style", "fill:none"),
        ];
        assert_eq!(attrs.len(), expected.len());
        for ((k, v), (ek, ev)) in attrs.iter().zip(expected) {
            assert_eq!((k.as_str(), v.as_str()), (ek, ev));
        }
    }

    #[test]
    fn circle_becomes_ellipse_without_equal_aspect() {
        let options = RenderOptions {
            width: 240.0,
            ..small_options()
        };
        let mut canvas = Canvas::new(&options);
        canvas.add_circle(dvec2(0.0, 0.0), 5.0);
        let svg = generate_svg(&canvas, &options).unwrap();
        assert!(svg.contains(r#"<ellipse cx="120" cy="60" rx="100" ry="50""#), "{svg}");
    }

    #[test]
    fn empty_canvas_is_valid_svg() {
        let options = RenderOptions::default();
        let svg = generate_svg(&Canvas::new(&options), &options).unwrap();
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\" viewBox=\"0 0 800 600\">\n</svg>\n"
        );
    }
}

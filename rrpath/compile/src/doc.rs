//! Document access
//!
//! The compiler reads documents through [`Document`] and [`Element`], which
//! expose only what it needs: lookup by tag name and attribute access. They
//! are implemented for `roxmltree`'s types.
use cgmath::Vector2;
use rgb::RGB8;

use crate::{
    color::parse_fill,
    error::{CompileError, ElementError},
};

/// A read-only view of an element's attributes.
pub trait Element {
    fn attribute(&self, name: &str) -> Option<&str>;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// A read-only view of a parsed document.
pub trait Document {
    type Element: Element;

    /// The root element.
    fn root(&self) -> Self::Element;

    /// Every element named `tag`, in document order.
    fn elements_by_tag(&self, tag: &str) -> Vec<Self::Element>;
}

impl<'a, 'input: 'a> Element for roxmltree::Node<'a, 'input> {
    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }
}

impl<'a, 'input: 'a> Document for &'a roxmltree::Document<'input> {
    type Element = roxmltree::Node<'a, 'input>;

    fn root(&self) -> Self::Element {
        let doc: &'a roxmltree::Document<'input> = *self;
        doc.root_element()
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<Self::Element> {
        let doc: &'a roxmltree::Document<'input> = *self;
        doc.descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == tag)
            .collect()
    }
}

/// Get the base offset of a document, which moves the origin to the center
/// of its `viewBox`.
///
/// `viewBox` is taken from the root element if it has one, and from the
/// first `svg` element that has one otherwise. Only its width and height are
/// used.
pub fn document_offset(doc: &impl Document) -> Result<Vector2<f64>, CompileError> {
    let view_box = doc
        .root()
        .attribute("viewBox")
        .map(str::to_owned)
        .or_else(|| {
            doc.elements_by_tag("svg")
                .iter()
                .find_map(|e| e.attribute("viewBox").map(str::to_owned))
        })
        .ok_or(CompileError::MissingViewBox)?;

    let malformed = || CompileError::MalformedViewBox(view_box.clone());

    let values = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| malformed()))
        .collect::<Result<Vec<f64>, _>>()?;

    if values.len() < 4 {
        return Err(malformed());
    }

    Ok(Vector2::new(-values[2] / 2.0, -values[3] / 2.0))
}

/// A visible `path` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    /// The position among all `path` elements of the document, including
    /// the ones that are not visible.
    pub index: usize,
    /// The path data.
    pub data: String,
    /// The fill color. `None` means the path is not filled.
    pub fill: Option<RGB8>,
    /// The fill opacity in `[0, 1]`.
    pub fill_opacity: Option<f64>,
}

/// A `path` element that could not be read or compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFailure {
    pub index: usize,
    pub err: ElementError,
}

impl From<ElementFailure> for CompileError {
    fn from(x: ElementFailure) -> Self {
        CompileError::Element {
            index: x.index,
            err: x.err,
        }
    }
}

/// Enumerate the visible `path` elements of a document in document order.
///
/// Elements with a `clip-rule` attribute (clipping geometry) and elements
/// with a zero `fill-opacity` are left out.
pub fn path_elements(doc: &impl Document) -> Vec<Result<PathElement, ElementFailure>> {
    doc.elements_by_tag("path")
        .iter()
        .enumerate()
        .filter(|(index, e)| {
            let fill_opacity = e
                .attribute("fill-opacity")
                .and_then(|x| x.trim().parse::<f64>().ok());

            if e.has_attribute("clip-rule") {
                log::debug!("path #{}: skipping a clipping path", index);
                false
            } else if fill_opacity == Some(0.0) {
                log::debug!("path #{}: skipping an invisible path", index);
                false
            } else {
                true
            }
        })
        .map(|(index, e)| {
            read_path_element(index, e).map_err(|err| ElementFailure { index, err })
        })
        .collect()
}

fn read_path_element(index: usize, e: &impl Element) -> Result<PathElement, ElementError> {
    let data = e
        .attribute("d")
        .ok_or(ElementError::MissingPathData)?
        .to_owned();

    let fill = match e.attribute("fill") {
        Some(value) => parse_fill(value)?,
        None => None,
    };

    let fill_opacity = match e.attribute("fill-opacity") {
        Some(value) => Some(
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| ElementError::MalformedNumber("fill-opacity", value.to_owned()))?
                .max(0.0)
                .min(1.0),
        ),
        None => None,
    };

    Ok(PathElement {
        index,
        data,
        fill,
        fill_opacity,
    })
}

//! Per-format rewrite rules.

use crate::xml::Element;

/// Paragraph tag in rewritten output.
pub const PARAGRAPH: &str = "p";
/// Emphasis tag in rewritten output.
pub const EMPHASIS: &str = "em";
/// Strong-emphasis tag in rewritten output.
pub const STRONG: &str = "strong";

/// Source format whose markup is being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Office Open XML `word/document.xml`: runs (`r`) carry `b`/`i`
    /// markers under their `rPr` properties node.
    Docx,
    /// OpenDocument `content.xml`: `span`s under `body/text/p` carry a
    /// `style-name` attribute.
    Odt,
    /// DocBook from an external DOC converter: `para` and `emphasis`
    /// elements, bold signalled by `role="bold"`.
    DocBook,
}

impl Profile {
    /// Namespace prefixes stripped before matching.
    #[must_use]
    pub fn namespaces(self) -> &'static [&'static str] {
        match self {
            Self::Docx => &["w"],
            Self::Odt => &["office", "style", "text"],
            Self::DocBook => &[],
        }
    }

    /// Elements deleted outright (with their subtrees) before renaming.
    #[must_use]
    pub fn removed_elements(self) -> &'static [&'static str] {
        match self {
            Self::DocBook => &["title", "bookinfo"],
            Self::Docx | Self::Odt => &[],
        }
    }

    /// Whether `el`, below `ancestors` (outermost first), is a rewrite target.
    #[must_use]
    pub fn selects(self, el: &Element, ancestors: &[String]) -> bool {
        match self {
            Self::Docx => el.name == "r",
            Self::Odt => el.name == "span" && path_ends_with(ancestors, &["body", "text", "p"]),
            Self::DocBook => el.name == "para" || el.name == "emphasis",
        }
    }

    /// Rewrite one selected element. Returns `true` if a tag was renamed.
    pub fn apply(self, el: &mut Element) -> bool {
        match self {
            Self::Docx => rewrite_run(el),
            Self::Odt => rewrite_span(el),
            Self::DocBook => rewrite_docbook(el),
        }
    }
}

/// Style signalled by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Strong,
    Emphasis,
}

impl Style {
    fn tag(self) -> &'static str {
        match self {
            Self::Strong => STRONG,
            Self::Emphasis => EMPHASIS,
        }
    }
}

/// Bold wins over italic when a run carries both.
fn rewrite_run(run: &mut Element) -> bool {
    let Some(props) = run.find_first_mut("rPr") else {
        return false;
    };

    let style = if props.any_descendant(&|el| is_toggle_on(el, "b")) {
        Some(Style::Strong)
    } else if props.any_descendant(&|el| is_toggle_on(el, "i")) {
        Some(Style::Emphasis)
    } else {
        None
    };
    props.remove_descendants(&|el| el.name == "b" || el.name == "i");

    match (style, run.find_first_mut("t")) {
        (Some(style), Some(text)) => {
            text.rename(style.tag());
            true
        }
        _ => false,
    }
}

/// `<b/>` is on; `<b val="0"/>` (also `false`, `none`) switches it off.
fn is_toggle_on(el: &Element, name: &str) -> bool {
    el.name == name && !matches!(el.attribute("val"), Some("0" | "false" | "none"))
}

/// Automatic style names are matched literally.
fn rewrite_span(span: &mut Element) -> bool {
    let style = match span.attribute("style-name") {
        Some("T4") => Style::Strong,
        Some("T3") => Style::Emphasis,
        _ => return false,
    };
    span.rename(style.tag());
    true
}

fn rewrite_docbook(el: &mut Element) -> bool {
    let tag = if el.name == "para" {
        PARAGRAPH
    } else if el.attribute("role") == Some("bold") {
        STRONG
    } else {
        EMPHASIS
    };
    el.rename(tag);
    true
}

fn path_ends_with(ancestors: &[String], suffix: &[&str]) -> bool {
    ancestors.len() >= suffix.len()
        && ancestors
            .iter()
            .rev()
            .zip(suffix.iter().rev())
            .all(|(have, want)| have == want)
}

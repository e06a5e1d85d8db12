//! Structural rewrite of document XML into minimal HTML.
//!
//! DOCX, ODT and DocBook markup is reduced to three tags: `<p>`, `<em>` and
//! `<strong>`. The passes run in a fixed order:
//!
//! 1. Strip the profile's namespace prefixes so matching uses bare names
//! 2. Delete metadata subtrees (DocBook `title` and `bookinfo`)
//! 3. Rename styled nodes to `em` / `strong` (and DocBook `para` to `p`),
//!    deleting the marker nodes that carried the style
//! 4. Prune paragraphs whose trimmed text is empty
//! 5. Serialize and strip every tag outside the allowed three
//!
//! Running [`rewrite`] on an already rewritten tree changes nothing: no
//! selectable nodes or markers remain.

mod profile;
mod sanitize;

pub use profile::{Profile, EMPHASIS, PARAGRAPH, STRONG};
pub use sanitize::strip_tags;

use crate::error::Result;
use crate::xml::{Document, Element};

/// Tags that survive sanitizing.
pub const ALLOWED_TAGS: &[&str] = &[PARAGRAPH, EMPHASIS, STRONG];

/// Rewrite `doc` in place according to `profile` (passes 1 to 4).
pub fn rewrite(doc: &mut Document, profile: Profile) {
    for prefix in profile.namespaces() {
        doc.root.strip_namespace(prefix);
    }

    let removed_names = profile.removed_elements();
    let removed = if removed_names.is_empty() {
        0
    } else {
        doc.root
            .remove_descendants(&|el| removed_names.contains(&el.name.as_str()))
    };

    let mut renamed = 0usize;
    doc.root.walk_mut(&mut |el, ancestors| {
        if profile.selects(el, ancestors) && profile.apply(el) {
            renamed += 1;
        }
    });

    let pruned = prune_empty(&mut doc.root, PARAGRAPH);

    log::debug!(
        "rewrite {profile:?}: {removed} subtrees removed, {renamed} nodes renamed, {pruned} empty paragraphs pruned"
    );
}

/// Blank characters for pruning. No-break spaces are content.
const BLANK: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Remove every `tag` element below `root` whose text is only [`BLANK`].
///
/// Returns the number of elements removed; a second call returns 0.
pub fn prune_empty(root: &mut Element, tag: &str) -> usize {
    root.remove_descendants(&|el| el.name == tag && el.text_content().trim_matches(&BLANK[..]).is_empty())
}

/// Serialize a rewritten tree and keep only the allowed tags (pass 5).
#[must_use]
pub fn render(doc: &Document) -> String {
    strip_tags(&doc.to_xml(), ALLOWED_TAGS).trim().to_string()
}

/// Parse XML bytes, rewrite them with `profile`, and render the result.
///
/// # Errors
///
/// Returns `Error::MalformedMarkup` if the bytes are not well-formed XML.
pub fn rewrite_markup(xml: &[u8], profile: Profile) -> Result<String> {
    let mut doc = Document::parse(xml)?;
    rewrite(&mut doc, profile);
    Ok(render(&doc))
}

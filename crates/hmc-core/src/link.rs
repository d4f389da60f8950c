//! Resolve hyperlink references into entity identifiers.
//!
//! HMC encodes relationships as `href` attributes whose URL path ends in the
//! target's identifier, e.g. `.../rest/api/uom/ManagedSystem/<uuid>`.

use hmc_xml::{Element, Path};
use tracing::trace;

/// `from_end` value selecting the final path segment.
pub const LAST_SEGMENT: usize = 1;

const HREF: &str = "href";
const LINK: &str = "link";

/// Return the URL path segment `from_end` positions from the end of `href`.
///
/// `from_end == 1` is the last segment, `3` the third from last. Scheme,
/// authority, query and fragment are ignored, as are empty segments produced
/// by doubled or trailing slashes.
pub fn id_from_link(href: &str, from_end: usize) -> Option<String> {
    if from_end == 0 {
        return None;
    }
    let without_fragment = href.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |slash| &rest[slash..]),
        None => without_query,
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let index = segments.len().checked_sub(from_end)?;
    segments.get(index).map(|s| s.to_string())
}

/// Resolve the `href` of the first element `path` reaches from `root`.
pub fn id_from_link_at(root: &Element, path: &Path, from_end: usize) -> Option<String> {
    let href = path.attribute(root, HREF)?;
    id_from_link(&href, from_end)
}

/// Resolve every `<link>` directly under the element `collection` reaches.
///
/// Other children are ignored even when they carry an `href`. Links without
/// an `href`, or whose `href` has too few segments, are skipped. Source
/// order is kept and duplicates are not removed.
pub fn ids_from_links(root: &Element, collection: &Path, from_end: usize) -> Vec<String> {
    let Some(container) = collection.find(root) else {
        return Vec::new();
    };
    container
        .children()
        .iter()
        .filter(|child| child.local_name() == LINK)
        .filter_map(|link| match link.attribute(HREF) {
            Some(href) => id_from_link(href, from_end),
            None => {
                trace!(collection = %collection, element = %link.name(), "link without href");
                None
            }
        })
        .collect()
}

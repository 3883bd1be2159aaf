// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// Markup of the graphic shown when an icon cannot be loaded: a red `?`.
pub const PLACEHOLDER_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="24" height="24" fill="red">"#,
    r#"<text x="12" y="12" text-anchor="middle" dominant-baseline="middle">?</text>"#,
    "</svg>",
);

/// A loaded icon: SVG markup shared between every user of the cache entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon {
    markup: Arc<str>,
    placeholder: bool,
}

impl Icon {
    pub(crate) fn svg(markup: String) -> Self {
        Self {
            markup: Arc::from(markup),
            placeholder: false,
        }
    }

    /// The placeholder icon ([`PLACEHOLDER_SVG`]).
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            markup: Arc::from(PLACEHOLDER_SVG),
            placeholder: true,
        }
    }

    /// Returns the SVG markup.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Returns `true` if this is the placeholder shown after a failed load.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// Returns the name of a markup document's root element.
///
/// Skips a byte order mark, XML declarations, processing instructions,
/// comments and the doctype.
pub(crate) fn root_element(document: &str) -> Option<&str> {
    let mut rest = document.trim_start_matches('\u{feff}');
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("<?") {
            rest = after.split_once("?>")?.1;
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.split_once("-->")?.1;
        } else if let Some(after) = rest.strip_prefix("<!") {
            rest = after.split_once('>')?.1;
        } else {
            let after = rest.strip_prefix('<')?;
            let end = after
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(after.len());
            let name = &after[..end];
            return (!name.is_empty()).then_some(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn root_of_plain_svg() {
        assert_eq!(root_element(r#"<svg viewBox="0 0 1 1"/>"#), Some("svg"));
        assert_eq!(root_element("<svg>"), Some("svg"));
    }

    #[test]
    fn prolog_is_skipped() {
        let document = "\u{feff}<?xml version=\"1.0\"?>\n<!-- by hand -->\n\
                        <!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"x.dtd\">\n<svg></svg>";
        assert_eq!(root_element(document), Some("svg"));
    }

    #[test]
    fn other_roots() {
        assert_eq!(root_element("<html><svg/></html>"), Some("html"));
        assert_eq!(root_element("not markup"), None);
        assert_eq!(root_element("<!-- unterminated"), None);
        assert_eq!(root_element(""), None);
    }

    #[test]
    fn placeholder_is_svg() {
        let icon = Icon::placeholder();
        assert!(icon.is_placeholder());
        assert_eq!(root_element(icon.markup()), Some("svg"));
        assert!(icon.to_string().contains(">?</text>"));
    }
}

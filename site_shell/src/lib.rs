mod head;

pub use head::{DEFAULT_TITLE, HeadLink, HtmlAttrs, MetaTag, SiteHead};

/// Tag prefixes the shell treats as custom elements rather than components.
pub const CUSTOM_ELEMENT_PREFIXES: &[&str] = &["iconify-icon"];

/// Whether `tag` should be left to the browser as a custom element.
#[must_use]
pub fn is_custom_element(tag: &str) -> bool {
    CUSTOM_ELEMENT_PREFIXES
        .iter()
        .any(|prefix| tag.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_custom_element() {
        assert!(is_custom_element("iconify-icon"));
        assert!(is_custom_element("iconify-icon-inline"));
        assert!(!is_custom_element("icon"));
        assert!(!is_custom_element("div"));
        assert!(!is_custom_element("my-iconify-icon"));
    }
}

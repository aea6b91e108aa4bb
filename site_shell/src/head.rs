use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Hello, I'm Louis Rozier";

const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Inter:ital,opsz,wght@0,14..32,100..900;1,14..32,100..900&display=swap";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlAttrs {
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadLink {
    pub rel: String,
    pub href: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sizes: Option<String>,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media_type: Option<String>,
}

impl HeadLink {
    fn new(rel: &str, href: &str) -> Self {
        Self {
            rel: rel.to_string(),
            href: href.to_string(),
            sizes: None,
            media_type: None,
        }
    }

    fn sized(mut self, sizes: &str) -> Self {
        self.sizes = Some(sizes.to_string());
        self
    }

    fn typed(mut self, media_type: &str) -> Self {
        self.media_type = Some(media_type.to_string());
        self
    }
}

/// Everything the single-page shell puts in its `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHead {
    pub title_template: String,
    pub html_attrs: HtmlAttrs,
    pub meta: Vec<MetaTag>,
    pub link: Vec<HeadLink>,
    pub custom_element_prefixes: Vec<String>,
}

impl SiteHead {
    /// Head metadata for a site titled `title`.
    ///
    /// Links are ordered the way the shell emits them: the font stylesheet
    /// first, then the icons, then the web manifest.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title_template: title.into(),
            html_attrs: HtmlAttrs {
                lang: "en".to_string(),
            },
            meta: vec![MetaTag {
                name: "description".to_string(),
                content: String::new(),
            }],
            link: vec![
                HeadLink::new("stylesheet", FONT_STYLESHEET),
                HeadLink::new("icon", "/favicon.ico").sized("48x48"),
                HeadLink::new("apple-touch-icon", "/apple-touch-icon-180x180.png"),
                HeadLink::new("icon", "/android-chrome-192x192.png")
                    .sized("192x192")
                    .typed("image/png"),
                HeadLink::new("icon", "/android-chrome-512x512.png")
                    .sized("512x512")
                    .typed("image/png"),
                HeadLink::new("manifest", "/site.webmanifest"),
            ],
            custom_element_prefixes: crate::CUSTOM_ELEMENT_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Links with the given `rel`, in document order.
    pub fn links(&self, rel: &str) -> impl Iterator<Item = &HeadLink> {
        self.link.iter().filter(move |link| link.rel == rel)
    }
}

impl Default for SiteHead {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

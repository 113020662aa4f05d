use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{Html, Selector};

use crate::config::DEFAULT_NOISE_TAGS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub content_html: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedContent;
}

/// Drops every element whose tag is in the noise set, then hands back the
/// remaining `<body>` markup together with the document `<title>`.
///
/// Removal is purely by tag name; there is no content scoring.
#[derive(Debug, Clone)]
pub struct NoiseStrippingExtractor {
    noise_tags: HashSet<String>,
}

impl NoiseStrippingExtractor {
    pub fn new<I, S>(noise_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            noise_tags: noise_tags
                .into_iter()
                .map(|tag| tag.as_ref().trim().to_ascii_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }

    pub fn is_noise(&self, tag: &str) -> bool {
        self.noise_tags.contains(tag)
    }
}

impl Default for NoiseStrippingExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_TAGS)
    }
}

impl Extractor for NoiseStrippingExtractor {
    fn extract(&self, html: &str) -> ExtractedContent {
        let mut doc = Html::parse_document(html);
        let title = extract_title(&doc);

        let doomed: Vec<NodeId> = doc
            .tree
            .nodes()
            .filter(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|el| self.is_noise(el.name()))
            })
            .map(|node| node.id())
            .collect();
        for id in doomed {
            if let Some(mut node) = doc.tree.get_mut(id) {
                node.detach();
            }
        }

        ExtractedContent {
            title,
            content_html: body_html(&doc),
        }
    }
}

fn extract_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|t| t.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}

fn body_html(doc: &Html) -> String {
    Selector::parse("body")
        .ok()
        .and_then(|sel| doc.select(&sel).next().map(|body| body.inner_html()))
        .unwrap_or_else(|| doc.root_element().html())
}

use std::sync::Arc;

use crate::config::BundlerConfig;
use crate::convert::{Converter, MarkdownConverter};
use crate::extract::{Extractor, NoiseStrippingExtractor};
use crate::page::build_page_block;

/// HTML in, bundle block out. Tolerates any input the HTML parser accepts,
/// which is all of it.
#[derive(Clone)]
pub struct Transformer {
    extractor: Arc<dyn Extractor>,
    converter: Arc<dyn Converter>,
}

impl Transformer {
    pub fn new(extractor: Arc<dyn Extractor>, converter: Arc<dyn Converter>) -> Self {
        Self {
            extractor,
            converter,
        }
    }

    pub fn from_config(config: &BundlerConfig) -> Self {
        Self::new(
            Arc::new(NoiseStrippingExtractor::new(&config.noise_tags)),
            Arc::new(MarkdownConverter),
        )
    }

    pub fn transform(&self, html: &str, source_url: &str) -> String {
        let extracted = self.extractor.extract(html);
        let body = self
            .converter
            .to_markdown(&extracted.content_html, Some(source_url));
        build_page_block(source_url, extracted.title.as_deref(), &body)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::from_config(&BundlerConfig::default())
    }
}

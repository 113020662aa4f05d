//! Page bundler engine: concurrent fetch, HTML-to-Markdown transform and
//! bundle aggregation.
mod aggregate;
mod config;
mod convert;
mod decode;
mod dispatch;
mod engine;
mod export;
mod extract;
mod fetch;
mod page;
mod preview;
mod transform;
mod types;
mod worker;

pub use aggregate::{aggregate, Aggregation, Bundle, BundleOutcome, RunSummary};
pub use config::{BundlerConfig, DEFAULT_NOISE_TAGS, DEFAULT_USER_AGENT};
pub use convert::{Converter, MarkdownConverter};
pub use decode::{decode_html, DecodedHtml};
pub use dispatch::{ChannelProgressSink, Dispatcher, ProgressSink};
pub use engine::EngineHandle;
pub use export::{export_bundle, ExportError, ExportOptions, ExportSummary, BUNDLE_FILENAME, BUNDLE_MIME};
pub use extract::{ExtractedContent, Extractor, NoiseStrippingExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use page::build_page_block;
pub use preview::{bundle_preview, MAX_PREVIEW_CHARS};
pub use transform::Transformer;
pub use types::{
    EngineError, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobId,
    PageOutcome, PageResult, PageStatus, ProgressEvent, ProgressState,
};
pub use worker::PageWorker;

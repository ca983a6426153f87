//! Markdown rendering adapters.

mod pulldown_renderer;

pub use pulldown_renderer::PulldownRenderer;

pub mod chunking;
pub mod format;
pub mod ranking;
pub mod render;

pub use chunking::{chunk_report, utf16_len, MAX_CHUNK_CHARS};
pub use ranking::{newest_properties, DEFAULT_TOP_N};
pub use render::render_report;

//! Utility functions and helpers

pub mod fs;
pub mod text;
pub mod url;

pub use fs::read_lines_or_warn;
pub use text::{decode_with_fallback, to_simplified};
pub use url::{host_of, normalize_percent_encoding, socket_target, SocketTarget};

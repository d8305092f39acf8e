// src/utils/url.rs

//! URL normalization and parsing helpers.

use std::fmt::Write;

use url::Url;

/// Bytes left bare when re-encoding. Everything else becomes `%XX`.
fn is_bare_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~' | b':' | b'/' | b'?' | b'&' | b'=')
}

/// Decode any existing percent-escapes, then re-encode uniformly.
///
/// Stream URLs arrive with mixed encoding (raw UTF-8 path segments, `%2F`
/// escapes, stray spaces). Collapsing to one canonical form keeps dedup and
/// probing consistent. Applying this twice yields the same string.
pub fn normalize_percent_encoding(url: &str) -> String {
    let decoded = urlencoding::decode_binary(url.as_bytes());
    let mut out = String::with_capacity(decoded.len());
    for &b in decoded.iter() {
        if is_bare_byte(b) {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{:02X}", b);
        }
    }
    out
}

/// Host (plus port when explicit) of a URL, used to key failure counts.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Connection target extracted from a non-HTTP stream URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketTarget {
    pub host: String,
    pub port: u16,
    pub path: String,
}

/// Split a URL into host, port, and path for raw socket probes.
///
/// Returns `None` when the host is missing or the URL does not parse; a
/// missing port falls back to the given default.
pub fn socket_target(url: &str, default_port: u16) -> Option<SocketTarget> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_string();
    let port = parsed.port().unwrap_or(default_port);
    Some(SocketTarget {
        host,
        port,
        path: parsed.path().to_string(),
    })
}

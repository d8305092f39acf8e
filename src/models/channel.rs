use std::fmt;

/// One channel record: a display name and a stream URL, the unit every list
/// file is made of. Rendered as `name,url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLine {
    pub name: String,
    pub url: String,
}

impl ChannelLine {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse a `name,url` line from a source list.
    ///
    /// Genre markers, M3U directives, and lines missing either field are
    /// rejected. A `$` suffix on the URL (bandwidth hints like `$LR•IPV6`)
    /// is cut at its last occurrence.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.contains("#genre#") || line.contains("#EXTINF:") || !line.contains("://") {
            return None;
        }
        let (name, rest) = line.split_once(',')?;
        let url = match rest.rfind('$') {
            Some(idx) => &rest[..idx],
            None => rest,
        };
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() || !url.contains("://") {
            return None;
        }
        Some(Self::new(name, url))
    }

    /// Parse a line that may carry several `#`-joined URLs, yielding one
    /// record per URL. A line without the separator parses as a single
    /// record; parts without a scheme are dropped.
    pub fn expand(line: &str) -> Vec<Self> {
        let line = line.trim();
        if !line.contains(',') || !line.contains("://") {
            return Vec::new();
        }
        let Some((name, rest)) = line.split_once(',') else {
            return Vec::new();
        };
        if !rest.contains('#') {
            return Self::parse(line).into_iter().collect();
        }
        rest.split('#')
            .map(str::trim)
            .filter(|part| part.contains("://"))
            .filter_map(|part| Self::parse(&format!("{},{}", name, part)))
            .collect()
    }
}

impl fmt::Display for ChannelLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_record() {
        let line = ChannelLine::parse("CCTV1综合,http://example.com/live.m3u8").unwrap();
        assert_eq!(line.name, "CCTV1综合");
        assert_eq!(line.url, "http://example.com/live.m3u8");
    }

    #[test]
    fn test_parse_strips_dollar_suffix() {
        let line = ChannelLine::parse("湖南卫视,http://example.com/hn$LR•IPV6").unwrap();
        assert_eq!(line.url, "http://example.com/hn");
    }

    #[test]
    fn test_parse_rejects_markers_and_malformed() {
        assert!(ChannelLine::parse("央视频道,#genre#").is_none());
        assert!(ChannelLine::parse("#EXTINF:-1,CCTV1").is_none());
        assert!(ChannelLine::parse("no url here").is_none());
        assert!(ChannelLine::parse(",http://example.com/x").is_none());
        assert!(ChannelLine::parse("CCTV1,$").is_none());
    }

    #[test]
    fn test_expand_splits_hash_joined_urls() {
        let lines = ChannelLine::expand("CCTV1,http://a/1#http://b/2#garbage");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].url, "http://a/1");
        assert_eq!(lines[1].url, "http://b/2");
        assert!(lines.iter().all(|l| l.name == "CCTV1"));
    }

    #[test]
    fn test_expand_single_url_passthrough() {
        let lines = ChannelLine::expand("CCTV1,http://a/1");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "CCTV1,http://a/1");
    }

    #[test]
    fn test_display_round_trip() {
        let line = ChannelLine::new("翡翠台", "http://example.com/jade");
        assert_eq!(line.to_string(), "翡翠台,http://example.com/jade");
    }
}

//! M3U playlist detection, conversion to plain records, and rendering.

/// URL schemes accepted as stream lines inside a playlist body.
const STREAM_PREFIXES: [&str; 6] = ["http", "rtmp", "rtsp", "rtp", "p3p", "p2p"];

/// True when the first non-blank content of the document is an `#EXTM3U`
/// header.
pub fn is_m3u(text: &str) -> bool {
    text.trim_start().starts_with("#EXTM3U")
}

/// Converts an M3U document to `name,url` record lines.
///
/// Each `#EXTINF` directive names the record formed by the next stream URL
/// line; plain `name,url` records embedded in the playlist pass through
/// unchanged. Everything else is dropped.
pub fn to_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut channel_name = String::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("#EXTM3U") {
            continue;
        }
        if line.starts_with("#EXTINF") {
            channel_name = line
                .rsplit(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
        } else if STREAM_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            if !channel_name.is_empty() {
                records.push(format!("{},{}", channel_name, line));
            }
        } else if is_plain_record(line) {
            records.push(line.to_string());
        }
    }
    records
}

/// `name,url` with a non-empty name, no comma before the separator, and a
/// whitespace-free URL carrying `://`.
fn is_plain_record(line: &str) -> bool {
    if line.contains("#genre#") {
        return false;
    }
    let Some((name, url)) = line.split_once(',') else {
        return false;
    };
    if name.is_empty() || url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }
    match url.find("://") {
        Some(idx) => idx > 0 && idx + 3 < url.len(),
        None => false,
    }
}

/// Renders text-list lines back into an M3U document.
///
/// `label,#genre#` lines set the current group; every following record gets
/// an `#EXTINF` directive with the group title and a logo URL built from the
/// `{name}` template.
pub fn render_m3u(lines: &[String], tvg_url: &str, logo_template: &str) -> String {
    let mut output = format!("#EXTM3U x-tvg-url=\"{}\"\n", tvg_url);
    let mut group_name = String::new();
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let Some((name, url)) = line.split_once(',') else {
            continue;
        };
        if url.contains("#genre#") {
            group_name = name.trim().to_string();
            continue;
        }
        let name = name.trim();
        let url = url.trim();
        if url.is_empty() || !url.contains("://") {
            continue;
        }
        let logo_url = logo_template.replace("{name}", name);
        output.push_str(&format!(
            "#EXTINF:-1  tvg-name=\"{}\" tvg-logo=\"{}\"  group-title=\"{}\",{}\n{}\n",
            name, logo_url, group_name, name, url
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_m3u_ignores_leading_blank_lines() {
        assert!(is_m3u("#EXTM3U\n#EXTINF:-1,a\nhttp://x/1\n"));
        assert!(is_m3u("\n\n  #EXTM3U x-tvg-url=\"http://e/epg.xml\"\n"));
        assert!(!is_m3u("CCTV1,http://x/1\n"));
        assert!(!is_m3u(""));
    }

    #[test]
    fn test_to_records_pairs_extinf_with_stream_line() {
        let doc = concat!(
            "#EXTM3U\n",
            "#EXTINF:-1 tvg-name=\"CCTV1\" group-title=\"央视频道\",CCTV1\n",
            "http://example.com/1.m3u8\n",
            "#EXTINF:-1,凤凰中文\n",
            "rtsp://example.com/fh\n",
        );
        assert_eq!(
            to_records(doc),
            vec![
                "CCTV1,http://example.com/1.m3u8".to_string(),
                "凤凰中文,rtsp://example.com/fh".to_string(),
            ]
        );
    }

    #[test]
    fn test_to_records_stream_line_without_name_is_dropped() {
        let doc = "#EXTM3U\nhttp://example.com/orphan.m3u8\n";
        assert!(to_records(doc).is_empty());
    }

    #[test]
    fn test_to_records_passes_plain_records_through() {
        let doc = concat!(
            "#EXTM3U\n",
            "CCTV2,http://example.com/2.m3u8\n",
            "央视频道,#genre#\n",
            "broken line without comma\n",
            "name,no-scheme-here\n",
            "bad url,http://has space\n",
        );
        assert_eq!(to_records(doc), vec!["CCTV2,http://example.com/2.m3u8".to_string()]);
    }

    #[test]
    fn test_to_records_recognizes_every_probe_scheme() {
        let doc = concat!(
            "#EXTM3U\n",
            "#EXTINF:-1,a\nhttp://h/1\n",
            "#EXTINF:-1,b\nrtmp://h/2\n",
            "#EXTINF:-1,c\nrtp://1.2.3.4:5000\n",
            "#EXTINF:-1,d\nrtsp://h/3\n",
            "#EXTINF:-1,e\np3p://h:35/path\n",
            "#EXTINF:-1,f\np2p://h:9000/ch\n",
        );
        assert_eq!(to_records(doc).len(), 6);
    }

    #[test]
    fn test_render_m3u_tracks_groups_and_formats_records() {
        let lines = vec![
            "央视频道,#genre#".to_string(),
            "CCTV1,http://example.com/1.m3u8".to_string(),
            "".to_string(),
            "卫视频道,#genre#".to_string(),
            "湖南卫视,http://example.com/hn.m3u8".to_string(),
            "not a record".to_string(),
        ];
        let rendered = render_m3u(
            &lines,
            "http://epg.example.com/epg.xml",
            "http://logo.example.com/{name}.png",
        );
        let expected = concat!(
            "#EXTM3U x-tvg-url=\"http://epg.example.com/epg.xml\"\n",
            "#EXTINF:-1  tvg-name=\"CCTV1\" tvg-logo=\"http://logo.example.com/CCTV1.png\"  ",
            "group-title=\"央视频道\",CCTV1\n",
            "http://example.com/1.m3u8\n",
            "#EXTINF:-1  tvg-name=\"湖南卫视\" tvg-logo=\"http://logo.example.com/湖南卫视.png\"  ",
            "group-title=\"卫视频道\",湖南卫视\n",
            "http://example.com/hn.m3u8\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_m3u_records_before_any_group_get_empty_title() {
        let lines = vec!["20240825 12:00,http://version.example.com/v".to_string()];
        let rendered = render_m3u(&lines, "http://e/epg.xml", "http://l/{name}.png");
        assert!(rendered.contains("group-title=\"\",20240825 12:00\n"));
    }
}

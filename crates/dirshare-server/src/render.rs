//! HTML pages and URL text helpers.

use dirshare_core::DirectoryListing;
use std::fmt::Write;
use std::time::Duration;

const STATUS_STYLE: &str = r"
body { background: #23272e; color: #c7d0dc; font-family: 'Segoe UI', Arial, sans-serif;
       margin: 0; min-height: 100vh; display: flex; align-items: center; justify-content: center; }
.container { background: #2c313c; padding: 40px 60px; border-radius: 12px;
             box-shadow: 0 4px 24px rgba(0,0,0,0.4); text-align: center; }
h1 { color: #7ecfff; margin-bottom: 12px; }
p { font-size: 1.2em; }
.button { display: inline-block; margin-top: 25px; padding: 12px 24px; background-color: #7ecfff;
          color: #23272e; text-decoration: none; font-weight: 600; border-radius: 8px; }
.button:hover { background-color: #a2e0ff; }
";

const LISTING_STYLE: &str = r"
body { background: #23272e; color: #c7d0dc; font-family: 'Segoe UI', Arial, sans-serif; margin: 20px; }
.container { background: #2c313c; padding: 20px 40px; border-radius: 12px;
             box-shadow: 0 4px 24px rgba(0,0,0,0.4); max-width: 900px; margin: auto; }
h1, h2 { color: #7ecfff; border-bottom: 1px solid #4f5b6a; padding-bottom: 10px; }
ul { list-style-type: none; padding: 0; }
li { padding: 8px 12px; border-bottom: 1px solid #3a424d; display: flex;
     justify-content: space-between; align-items: center; }
li:last-child { border-bottom: none; }
a { color: #7ecfff; text-decoration: none; font-weight: 500; }
a:hover { text-decoration: underline; }
.dir::before { content: '\1F4C1'; margin-right: 10px; }
.file::before { content: '\1F4C4'; margin-right: 10px; }
.breadcrumbs { margin-bottom: 20px; padding: 10px; background-color: #23272e; border-radius: 5px; }
.breadcrumbs a { color: #c7d0dc; }
.breadcrumbs span { color: #777; margin: 0 5px; }
form { margin-top: 20px; padding: 15px; background-color: #3a424d; border-radius: 8px; }
input[type=submit] { background-color: #7ecfff; color: #23272e; border: none; padding: 8px 16px;
                     border-radius: 5px; font-weight: 600; cursor: pointer; }
.download-btn { background-color: #28a745; color: white; padding: 4px 8px; border-radius: 4px;
                font-size: 12px; text-decoration: none; }
.download-btn:hover { background-color: #218838; }
";

const UPTIME_SCRIPT: &str = r"
function formatUptime(s) {
    const pad = (n) => n.toString().padStart(2, '0');
    return pad(Math.floor(s / 3600)) + ':' + pad(Math.floor((s % 3600) / 60)) + ':' + pad(s % 60);
}
function tick() {
    document.getElementById('uptime').innerText = formatUptime(uptime);
    uptime += 1;
}
window.onload = function () { tick(); setInterval(tick, 1000); };
";

/// Renders the landing page with a live uptime counter.
#[must_use]
pub fn status_page(uptime: Duration) -> String {
    let seconds = uptime.as_secs();
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>dirshare is running</title>\n<style>");
    html.push_str(STATUS_STYLE);
    html.push_str("</style>\n<script>\n");
    let _ = writeln!(html, "let uptime = {seconds};");
    html.push_str(UPTIME_SCRIPT);
    html.push_str("</script>\n</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<h1>dirshare is running</h1>\n");
    let _ = writeln!(
        html,
        "<p><b>Uptime:</b> <span id=\"uptime\">{}</span></p>",
        format_uptime(seconds)
    );
    html.push_str("<a href=\"/files/\" class=\"button\">Browse files</a>\n");
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Renders the listing page for the directory at `relative`.
#[must_use]
pub fn listing_page(relative: &str, listing: &DirectoryListing) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        html,
        "<title>/{} - dirshare</title>",
        escape_html(relative)
    );
    html.push_str("<style>");
    html.push_str(LISTING_STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<h1>File Explorer</h1>\n");

    render_breadcrumbs(&mut html, relative);

    html.push_str("<h2>Upload</h2>\n");
    html.push_str("<form method=\"post\" enctype=\"multipart/form-data\">\n");
    html.push_str("<input type=\"file\" name=\"file\" required>\n");
    html.push_str("<input type=\"submit\" value=\"Upload\">\n</form>\n");

    html.push_str("<h2>Directories</h2>\n<ul>\n");
    if listing.directories.is_empty() {
        html.push_str("<li>No directories found.</li>\n");
    }
    for name in &listing.directories {
        let child = encode_path(&child_path(relative, name));
        let _ = writeln!(
            html,
            "<li><a class=\"dir\" href=\"/files/{child}\">{name}</a>\
             <a class=\"download-btn\" href=\"/download_folder/{child}\">ZIP</a></li>",
            name = escape_html(name),
        );
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Files</h2>\n<ul>\n");
    if listing.files.is_empty() {
        html.push_str("<li>No files found.</li>\n");
    }
    for name in &listing.files {
        let child = encode_path(&child_path(relative, name));
        let _ = writeln!(
            html,
            "<li><a class=\"file\" href=\"/files/{child}\">{name}</a>\
             <a class=\"download-btn\" href=\"/files/{child}\">Download</a></li>",
            name = escape_html(name),
        );
    }
    html.push_str("</ul>\n</div>\n</body>\n</html>\n");
    html
}

/// `home` followed by one link per path segment.
fn render_breadcrumbs(html: &mut String, relative: &str) {
    html.push_str("<div class=\"breadcrumbs\">\n<a href=\"/files/\">home</a>");

    let mut prefix = String::new();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);
        let _ = write!(
            html,
            "<span>/</span><a href=\"/files/{}\">{}</a>",
            encode_path(&prefix),
            escape_html(segment)
        );
    }

    html.push_str("\n</div>\n");
}

fn child_path(relative: &str, name: &str) -> String {
    if relative.is_empty() {
        name.to_string()
    } else {
        format!("{relative}/{name}")
    }
}

/// Formats seconds as `HH:MM:SS`; hours may exceed two digits.
#[must_use]
pub fn format_uptime(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Escapes text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes each segment of a `/`-separated relative path.
///
/// Separators are kept; everything outside the RFC 3986 unreserved set is
/// encoded, so names containing `?`, `#` or `%` survive the round trip.
#[must_use]
pub fn encode_path(relative: &str) -> String {
    relative
        .split('/')
        .map(|segment| percent_encode(segment, is_unreserved))
        .collect::<Vec<_>>()
        .join("/")
}

/// Percent-encodes every byte of `text` for which `keep` is false.
pub(crate) fn percent_encode(text: &str, keep: fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if keep(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

const fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_encode_path_per_segment() {
        assert_eq!(encode_path("reports/2024"), "reports/2024");
        assert_eq!(encode_path("my docs/a#1?.txt"), "my%20docs/a%231%3F.txt");
        assert_eq!(encode_path("100%"), "100%25");
        assert_eq!(encode_path("café"), "caf%C3%A9");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(3_723), "01:02:03");
        assert_eq!(format_uptime(360_000), "100:00:00");
    }

    #[test]
    fn test_status_page_links_to_files() {
        let html = status_page(Duration::from_secs(65));
        assert!(html.contains("let uptime = 65;"));
        assert!(html.contains("00:01:05"));
        assert!(html.contains("href=\"/files/\""));
    }

    #[test]
    fn test_listing_page_links_and_breadcrumbs() {
        let listing = DirectoryListing {
            directories: vec!["2024".into()],
            files: vec!["a b.txt".into()],
        };
        let html = listing_page("reports", &listing);

        assert!(html.contains("<a href=\"/files/\">home</a>"));
        assert!(html.contains("<a href=\"/files/reports\">reports</a>"));
        assert!(html.contains("href=\"/files/reports/2024\""));
        assert!(html.contains("href=\"/download_folder/reports/2024\""));
        assert!(html.contains("href=\"/files/reports/a%20b.txt\">a b.txt</a>"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }

    #[test]
    fn test_listing_page_placeholders_and_escaping() {
        let html = listing_page("", &DirectoryListing::default());
        assert!(html.contains("No directories found."));
        assert!(html.contains("No files found."));

        let listing = DirectoryListing {
            directories: vec![],
            files: vec!["<img src=x>.txt".into()],
        };
        let html = listing_page("", &listing);
        assert!(html.contains("&lt;img src=x&gt;.txt"));
        assert!(!html.contains("<img src=x>"));
    }
}

//! HTML emitter: tab list → one self-contained HTML5 document.
//!
//! The output carries no external references. All styling is inline and a
//! single inline `openTab` script switches between content blocks, so the
//! document still works when pasted somewhere that strips `<link>` tags.
//!
//! # Trust boundary
//!
//! Tab headers and content are inserted **verbatim**. Content is an HTML
//! fragment written by the same user who opens the result, and inline
//! `<script>` inside it is expected to run. Escaping here would change what
//! the document does. Never feed this emitter content from another party.
//!
//! The switcher hides every element whose id starts with `tab`, so an element
//! inside user content with an id like `tabular` is hidden on the first click
//! too. Authors should avoid that prefix in their own ids.
//!
//! Every function in this module is pure: identical input gives
//! byte-identical output.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;

use crate::types::tab::Tab;

/// File name offered for the download.
pub const DOWNLOAD_FILENAME: &str = "generated-tabs.html";
/// MIME type of the emitted document.
pub const DOWNLOAD_MIME: &str = "text/html";

const ACTIVE_HEADER_BG: &str = "#ccc";
const INACTIVE_HEADER_BG: &str = "#f1f1f1";

/// The inline `openTab` switcher, with both header colours taken from the
/// constants above.
fn switch_script() -> String {
    format!(
        r##"  <script>
    function openTab(evt, tabName) {{
      var i, tabcontent, tablinks;
      tabcontent = document.querySelectorAll('[id^="tab"]');
      for (i = 0; i < tabcontent.length; i++) {{ tabcontent[i].style.display = "none"; }}
      tablinks = document.querySelectorAll('button[onclick^="openTab"]');
      for (i = 0; i < tablinks.length; i++) {{ tablinks[i].style.backgroundColor = "{inactive}"; }}
      document.getElementById(tabName).style.display = "block";
      evt.currentTarget.style.backgroundColor = "{active}";
    }}
  </script>"##,
        active = ACTIVE_HEADER_BG,
        inactive = INACTIVE_HEADER_BG,
    )
}

/// DOM id of the content block for a tab.
pub fn content_block_id(tab: &Tab) -> String {
    format!("tab{}", tab.id)
}

fn render_header(index: usize, tab: &Tab) -> String {
    let background = if index == 0 {
        ACTIVE_HEADER_BG
    } else {
        INACTIVE_HEADER_BG
    };
    format!(
        "<button onclick=\"openTab(event, '{}')\" style=\"background-color: {}; border: none; outline: none; cursor: pointer; padding: 14px 16px; transition: 0.3s; font-size: 16px; margin-right: 2px;\">{}</button>",
        content_block_id(tab),
        background,
        tab.header
    )
}

fn render_content(index: usize, tab: &Tab) -> String {
    let display = if index == 0 { "block" } else { "none" };
    format!(
        "<div id=\"{}\" style=\"display: {}; padding: 12px; border: 1px solid #ccc; border-top: none; background-color: white; min-height: 200px;\">\n              {}\n          </div>",
        content_block_id(tab),
        display,
        tab.content
    )
}

/// Renders the full document for `tabs`.
///
/// The first tab's header is highlighted and its content block is the only
/// one shown initially. An empty slice still yields a valid (tab-less)
/// document; the editor never hands one over.
pub fn emit_document(tabs: &[Tab]) -> String {
    let headers = tabs
        .iter()
        .enumerate()
        .map(|(i, t)| render_header(i, t))
        .collect::<Vec<_>>()
        .join("\n      ");
    let contents = tabs
        .iter()
        .enumerate()
        .map(|(i, t)| render_content(i, t))
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Generated Tabs</title>
</head>
<body style="font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5;">
  <div style="max-width: 800px; margin: 0 auto; background-color: white; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden;">
    <h2 style="margin: 0; padding: 20px; background-color: #333; color: white; text-align: center;">Interactive Tabs</h2>

    <div style="background-color: {inactive}; padding: 0; border-bottom: 1px solid #ccc;">
      {headers}
    </div>

    {contents}
  </div>

{script}
</body>
</html>"#,
        inactive = INACTIVE_HEADER_BG,
        headers = headers,
        contents = contents,
        script = switch_script(),
    )
}

/// Wraps a single tab's content in a minimal document for a sandboxed
/// preview frame. Content goes in as-is so its inline scripts run.
pub fn emit_preview(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta
    http-equiv="Content-Security-Policy"
    content="default-src 'self' 'unsafe-inline' data: blob:; img-src * data: blob:; media-src * data: blob:;"
  >
</head>
<body style="margin:0; padding:12px; font-family: Arial, sans-serif; background:#fff;">
{}
</body>
</html>"#,
        content
    )
}

/// `data:` URL carrying `html`, suitable for a download link.
pub fn download_data_url(html: &str) -> String {
    format!("data:{};charset=utf-8;base64,{}", DOWNLOAD_MIME, BASE64.encode(html))
}

/// An emitted document packaged for copy and download.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub html: String,
    pub filename: &'static str,
    pub mime: &'static str,
    pub data_url: String,
}

/// Emits `tabs` once and derives the download link from that same string,
/// so the copied and downloaded documents are identical.
pub fn generate(tabs: &[Tab]) -> GeneratedDocument {
    let html = emit_document(tabs);
    let data_url = download_data_url(&html);
    GeneratedDocument {
        html,
        filename: DOWNLOAD_FILENAME,
        mime: DOWNLOAD_MIME,
        data_url,
    }
}

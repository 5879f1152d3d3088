//! Standalone document rendering for pages.
//!
//! # Invariants
//! - Output is a pure function of `(config, title, description, body)`.
//! - `title` and `description` are HTML-escaped; `body` is inserted verbatim.

use crate::config::ProtocolConfig;
use serde::Serialize;

/// Payload submitted to the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebpageDocument {
    pub title: String,
    pub html: String,
}

impl WebpageDocument {
    pub fn render(config: &ProtocolConfig, title: &str, description: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            html: render_document(config, title, description, body),
        }
    }
}

/// Renders `body` into the full HTML document skeleton.
pub fn render_document(
    config: &ProtocolConfig,
    title: &str,
    description: &str,
    body: &str,
) -> String {
    let stylesheets = config.stylesheets.iter().map(|href| {
        format!(
            "    <link href=\"{}\" rel=\"stylesheet\" type=\"text/css\" />\n",
            escape_html(href)
        )
    });
    let scripts = config
        .scripts
        .iter()
        .map(|src| format!("    <script src=\"{}\"></script>\n", escape_html(src)));
    let assets = stylesheets.chain(scripts).collect::<String>();

    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta name="description" content="{description}">
    <meta name="about" content="Webpage generated by {generator}">
{assets}  </head>
  <body>
    <main class="bg-base-100">
    {body}
    </main>
  </body>
</html>
"#,
        title = escape_html(title),
        description = escape_html(description),
        generator = escape_html(&config.generator_url),
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

//! Meta tag document rendering.
//!
//! The configuration-dependent parts of the document are escaped once when the
//! template is built; rendering only interpolates the module id and redirect target.

use crate::config::ServerConfig;

/// Placeholder used by the `go-source` convention for a missing template.
const NO_TEMPLATE: &str = "_";

/// Pre-built meta tag document for one server configuration.
#[derive(Debug, Clone)]
pub struct MetaTemplate {
    base: String,
    kind: &'static str,
    root: String,
    source: Option<(String, String)>,
}

impl MetaTemplate {
    pub fn new(config: &ServerConfig) -> Self {
        let repo = config.repo();
        let source = repo.has_source_templates().then(|| {
            (
                escape_html(repo.dir_template()),
                escape_html(repo.file_template()),
            )
        });

        Self {
            base: escape_html(config.base()),
            kind: repo.kind().as_str(),
            root: escape_html(repo.root()),
            source,
        }
    }

    /// Render the document for `module`, pointing browsers at `redirect`.
    pub fn render(&self, module: &str, redirect: &str) -> String {
        let module = escape_html(module);
        let redirect = escape_html(redirect);
        let import = format!("{}/{}", self.base, module);
        let host = format!("{}{}", self.root, module);

        let source = match &self.source {
            Some((dir, file)) => format!(
                "\t<meta name=\"go-source\" content=\"{} {} {} {}\">\n",
                import,
                host,
                source_url(&host, dir),
                source_url(&host, file)
            ),
            None => String::new(),
        };

        format!(
            concat!(
                "<!DOCTYPE html>\n<html>\n<head>\n",
                "\t<meta charset=\"UTF-8\">\n",
                "\t<meta name=\"go-import\" content=\"{import} {kind} {host}\">\n",
                "{source}",
                "\t<meta http-equiv=\"refresh\" content=\"0;url={redirect}\">\n",
                "</head>\n<body>\n",
                "<p>Redirecting to <a href=\"{redirect}\">{redirect}</a></p>\n",
                "</body>\n</html>\n"
            ),
            import = import,
            kind = self.kind,
            host = host,
            source = source,
            redirect = redirect,
        )
    }
}

fn source_url(host: &str, template: &str) -> String {
    if template.is_empty() {
        NO_TEMPLATE.to_string()
    } else {
        format!("{}/{}", host, template)
    }
}

/// Escape text for use inside an HTML attribute or element.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

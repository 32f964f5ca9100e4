use clap::{Parser, Subcommand};
use reqwest::{header::LOCATION, redirect, Client, Response};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "vanity-cli")]
#[command(about = "Query a running vanity server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:2369")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an import path as both the go tool and a browser would
    Lookup {
        /// Import path below the vanity domain, e.g. `widget/sub`
        path: String,
    },
    /// Show where the bare domain redirects
    Root,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;
    let base = cli.url.trim_end_matches('/');

    let report = match cli.command {
        Commands::Lookup { path } => {
            let path = path.trim_start_matches('/');
            let tool = client
                .get(format!("{}/{}?go-get=1", base, path))
                .send()
                .await?;
            let tool = describe(tool, true).await?;

            let browser = client.get(format!("{}/{}", base, path)).send().await?;
            let browser = describe(browser, false).await?;

            json!({ "path": path, "go_get": tool, "browser": browser })
        }
        Commands::Root => {
            let res = client.get(format!("{}/", base)).send().await?;
            describe(res, false).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn describe(res: Response, read_meta: bool) -> Result<Value, reqwest::Error> {
    let status = res.status().as_u16();
    let location = res
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut report = json!({ "status": status, "location": location });
    if read_meta && status == 200 {
        let body = res.text().await?;
        report["go_import"] = json!(meta_content(&body, "go-import"));
        report["go_source"] = json!(meta_content(&body, "go-source"));
    }
    Ok(report)
}

/// Content of `<meta name="{name}" content="...">`, with HTML entities decoded.
fn meta_content(body: &str, name: &str) -> Option<String> {
    let marker = format!("name=\"{}\" content=\"", name);
    let start = body.find(&marker)? + marker.len();
    let end = body[start..].find('"')? + start;
    Some(unescape_html(&body[start..end]))
}

/// Reverse the server's attribute escaping. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
fn unescape_html(s: &str) -> String {
    s.replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

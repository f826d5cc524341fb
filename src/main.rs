//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `proxyfetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All request handling is implemented in the library crate.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use scraper::Selector;
use std::process;
use std::time::Duration;

use proxyfetch::config::{Opt, Verb};
use proxyfetch::initialization::init_logger_with;
use proxyfetch::{
    Client, ClientSettings, DecodedBody, Envelope, JsonPayload, Logger, PostOptions,
    RedirectPolicy, RequestOptions,
};

/// Exit status for a transport failure or a rejected request.
const EXIT_FAILURE: i32 = 1;
/// Exit status for a response other than 200.
const EXIT_NOT_OK: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    init_logger_with(opt.effective_log_level(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let (origin, path) = split_target(&opt.url)?;
    let settings = ClientSettings {
        timeout: Some(Duration::from_secs(opt.timeout_seconds)),
        accept_invalid_certs: opt.insecure,
        ..Default::default()
    };
    let client = Client::with_settings(&origin, settings).context("Invalid target URL")?;
    let options = request_options(&opt)?;

    let result = match opt.method {
        Verb::Head => client.head(&path, options).await,
        Verb::Get => client.get(&path, options).await,
        Verb::Post => client.post(&path, post_options(&opt, options)).await,
    };

    match result {
        Ok(envelope) => {
            report(&envelope);
            process::exit(exit_code(&envelope));
        }
        Err(e) => {
            eprintln!("proxyfetch error: {:#}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Splits a full URL into the client origin and the request path with its query.
fn split_target(raw: &str) -> Result<(String, String)> {
    let url = url::Url::parse(raw).with_context(|| format!("Invalid URL: {raw}"))?;
    let origin = url.origin().ascii_serialization();
    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Ok((origin, path))
}

/// Splits `name<sep>value`, trimming both sides.
fn split_pair(raw: &str, separator: char, what: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(separator) else {
        bail!("Invalid {what} {raw:?}: expected name{separator}value");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid {what} {raw:?}: empty name");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn request_options(opt: &Opt) -> Result<RequestOptions> {
    let mut options = RequestOptions::default();
    for header in &opt.headers {
        let (name, value) = split_pair(header, ':', "header")?;
        options = options.header(name, value);
    }
    for cookie in &opt.cookies {
        let (name, value) = split_pair(cookie, '=', "cookie")?;
        options = options.cookie(name, value);
    }
    for param in &opt.query {
        let (key, value) = split_pair(param, '=', "query parameter")?;
        options = options.query(key, value);
    }
    if let Some(token) = &opt.token {
        options = options.token(token.clone());
    }
    if let Some(proxy) = &opt.proxy {
        options = options.proxy(proxy.clone());
    }
    if let Some(max) = opt.follow_redirects {
        options = options.redirect(RedirectPolicy::Follow(max));
    }
    if opt.verbose {
        options = options.logger(Logger::facade());
    }
    Ok(options)
}

fn post_options(opt: &Opt, request: RequestOptions) -> PostOptions {
    let mut options = PostOptions::new(request);
    if let Some(json) = &opt.json {
        // Valid JSON is re-serialized; anything else is sent as given
        options = match serde_json::from_str::<serde_json::Value>(json) {
            Ok(value) => options.json(JsonPayload::Value(value)),
            Err(_) => options.json_raw(json.clone()),
        };
    }
    if let Some(form) = &opt.form {
        options = options.form_raw(form.clone());
    }
    if let Some(text) = &opt.text {
        options = options.text(text.clone());
    }
    options
}

fn report(envelope: &Envelope) {
    if let Some(failure) = envelope.error() {
        eprintln!("proxyfetch: {failure}");
        return;
    }

    info!("HTTP {}", envelope.status());
    for (name, value) in envelope.headers() {
        debug!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    for (name, value) in envelope.cookies().iter() {
        info!("cookie {name}={value}");
    }

    match envelope.body() {
        DecodedBody::Empty => {
            for (name, value) in envelope.headers() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
        }
        DecodedBody::Text(text) => println!("{text}"),
        DecodedBody::Json(body) => match body.value() {
            Ok(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => println!("{pretty}"),
                Err(_) => println!("{}", body.text()),
            },
            Err(e) => {
                warn!("{e}");
                println!("{}", body.text());
            }
        },
        DecodedBody::Markup(body) => {
            if let Ok(selector) = Selector::parse("title") {
                if let Some(title) = body.document().select(&selector).next() {
                    info!("title: {}", title.text().collect::<String>().trim());
                }
            }
            println!("{}", body.text());
        }
        DecodedBody::Bytes(bytes) => {
            let essence = envelope
                .header("content-type")
                .unwrap_or("application/octet-stream");
            println!("<{} bytes of {essence}>", bytes.len());
        }
    }
}

fn exit_code(envelope: &Envelope) -> i32 {
    if envelope.is_transport_failure() {
        EXIT_FAILURE
    } else if !envelope.ok() {
        EXIT_NOT_OK
    } else {
        0
    }
}

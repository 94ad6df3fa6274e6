use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `DOCCHAT_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "DOCCHAT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the answer service
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Directory holding the built documentation site
    #[arg(long, env = "SITE_ROOT")]
    pub site_root: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub widget: WidgetConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL; joined to `query_path` verbatim.
    pub base_url: String,
    pub query_path: String,
    /// Transport timeout; `0` disables it.
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Full query URL, exactly as it will be requested.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.query_path)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub title: String,
    pub greeting: String,
    pub placeholder: String,
    /// `chrono` format string for message time labels.
    pub time_format: String,
    /// Delay between panel refreshes while a question is in flight.
    pub poll_interval_ms: u64,
    pub idle_timeout_secs: u64,
    /// Whether the injected snippet loads HTMX and Alpine itself.
    pub include_scripts: bool,
    /// Script URLs. Point these at `/static/...` to self-host copies placed
    /// in `site.static_dir`.
    pub htmx_src: String,
    pub alpine_src: String,
}

impl WidgetConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "Ask the Book".into(),
            greeting: "Hello! I'm your book assistant. Ask me anything about this book.".into(),
            placeholder: "Ask a question about the book...".into(),
            time_format: "%H:%M".into(),
            poll_interval_ms: 400,
            idle_timeout_secs: 30 * 60,
            include_scripts: true,
            htmx_src: "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js".into(),
            alpine_src: "https://unpkg.com/alpinejs@3.14.9/dist/cdn.min.js".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory served as the host documentation site.
    pub root: String,
    /// Directory served under `/static` for self-hosted widget assets.
    pub static_dir: String,
    /// Largest HTML page the widget injector will buffer.
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let widget = WidgetConfig::default();
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("backend.base_url", "https://ai-assisted-book.onrender.com/")?
            .set_default("backend.query_path", "/api/query-global")?
            .set_default("backend.timeout_secs", 60)?
            .set_default("widget.title", widget.title)?
            .set_default("widget.greeting", widget.greeting)?
            .set_default("widget.placeholder", widget.placeholder)?
            .set_default("widget.time_format", widget.time_format)?
            .set_default("widget.poll_interval_ms", widget.poll_interval_ms)?
            .set_default("widget.idle_timeout_secs", widget.idle_timeout_secs)?
            .set_default("widget.include_scripts", widget.include_scripts)?
            .set_default("widget.htmx_src", widget.htmx_src)?
            .set_default("widget.alpine_src", widget.alpine_src)?
            .set_default("site.root", "build")?
            .set_default("site.static_dir", "static")?
            .set_default("site.body_limit_bytes", 10 * 1024 * 1024)?;

        // 2. Config file (explicit, else ./config.yaml when present)
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config.yaml"));
        }

        // 3. Environment, e.g. DOCCHAT_BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and their clap-managed env vars) win
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(root) = cli.site_root {
            builder = builder.set_override("site.root", root)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_configured_separators() {
        let backend = BackendConfig {
            base_url: "https://ai-assisted-book.onrender.com/".into(),
            query_path: "/api/query-global".into(),
            timeout_secs: 0,
        };
        assert_eq!(
            backend.endpoint(),
            "https://ai-assisted-book.onrender.com//api/query-global"
        );
        assert_eq!(backend.timeout(), None);
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let config = AppConfig::load_from_args([
            "docs-chat-widget",
            "--port",
            "4100",
            "--backend-url",
            "http://localhost:8000",
            "--site-root",
            "public",
        ])
        .unwrap();

        assert_eq!(config.server.port, 4100);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.site.root, "public");
        assert_eq!(config.backend.timeout(), Some(Duration::from_secs(60)));
    }
}

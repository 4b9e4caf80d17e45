//! Thin wrapper around a `fantoccini` WebDriver client.
//!
//! The session launches Chrome with a persistent user data dir so Google
//! logins survive between runs; authentication itself is out of scope and
//! happens by a human signing in once in the visible browser.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use fantoccini::{elements::Element, Client, ClientBuilder, Locator};
use serde_json::json;
use tracing::debug;
use webdriver::capabilities::Capabilities;

use daybrief_config::BrowserConfig;

pub struct BrowserSession {
    client: Client,
}

impl BrowserSession {
    /// Connect to a running WebDriver service (Chromedriver by default) and
    /// open a Chrome session on the configured profile directory.
    pub async fn connect(config: &BrowserConfig) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let mut args = vec![
            format!("--user-data-dir={}", config.user_data_dir),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
        ];
        if config.headless {
            args.push("--headless".to_string());
            args.push("--disable-gpu".to_string());
        }
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .with_context(|| format!("webdriver unreachable at {}", config.webdriver_url))?;

        Ok(Self { client })
    }

    /// Navigate the single tab to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(%url, "navigating");
        self.client.goto(url).await?;
        Ok(())
    }

    /// Find the first element matching a CSS selector.
    pub async fn find_element(&self, selector: &str) -> Result<SessionElement> {
        let element = self.client.find(Locator::Css(selector)).await?;
        Ok(SessionElement { element })
    }

    /// Find zero or more elements matching a CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<SessionElement>> {
        let elements = self.client.find_all(Locator::Css(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|element| SessionElement { element })
            .collect())
    }

    /// Screenshot the current page into `path`, creating parent directories
    /// as needed.
    pub async fn screenshot_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let png = self.client.screenshot().await?;
        tokio::fs::write(path, png).await?;
        debug!(path = %path.display(), "screenshot written");
        Ok(())
    }

    /// Close the underlying browser session. Best-effort: a scrape that
    /// already produced its report should not fail on teardown.
    pub async fn close(self) {
        let _ = self.client.close().await;
    }
}

/// Wrapper for DOM elements with the handful of reads the captures need.
pub struct SessionElement {
    element: Element,
}

impl SessionElement {
    /// Find the first child element matching a CSS selector.
    pub async fn find_element(&self, selector: &str) -> Result<SessionElement> {
        let element = self.element.find(Locator::Css(selector)).await?;
        Ok(SessionElement { element })
    }

    /// Return the element's visible text.
    pub async fn text(&self) -> Result<String> {
        self.element.text().await.map_err(anyhow::Error::from)
    }
}

use crate::robots::fetch_config::FetchConfig;
use crate::robots::robots_error::RobotsError;
use crate::robots::robots_txt::RobotsTxt;
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use tracing::{debug, warn};
use url::Url;

/// The text of a robots.txt document and the site it came from, if any.
#[derive(Debug, Clone)]
pub struct RobotsTxtSource {
    content: String,
    site: Option<Url>,
}

impl RobotsTxtSource {
    pub fn from_text(content: &str) -> Self {
        Self {
            content: content.to_owned(),
            site: None,
        }
    }

    /// Treats `input` as an HTTP(S) origin when it has an `http://` or
    /// `https://` scheme and fetches its robots.txt, otherwise as the
    /// document itself. An origin that does not parse is the only error.
    pub async fn load(input: &str, config: &FetchConfig) -> Result<Self, RobotsError> {
        if !is_origin(input) {
            return Ok(Self::from_text(input));
        }
        let url =
            Url::parse(input).map_err(|e| RobotsError::InvalidOrigin(input.to_owned(), e))?;
        Ok(Self::load_from_url(&url, config).await)
    }

    /// Fetches `/robots.txt` from the origin of `url`. Any failure yields an
    /// empty document, which allows everything.
    pub async fn load_from_url(url: &Url, config: &FetchConfig) -> Self {
        let content = match Self::fetch(url, config).await {
            Ok(content) => content,
            Err(e) => {
                warn!(url = %url, error = %e, "Could not fetch robots.txt, assuming allow-all");
                String::new()
            }
        };
        Self {
            content,
            site: Some(url.clone()),
        }
    }

    async fn fetch(url: &Url, config: &FetchConfig) -> Result<String, RobotsError> {
        let mut robots_txt_url = url.clone();
        robots_txt_url.set_path("/robots.txt");
        robots_txt_url.set_query(None);
        robots_txt_url.set_fragment(None);
        debug!(url = %robots_txt_url, "Fetching robots.txt");

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        let mut request = client.get(robots_txt_url);
        if let Some(user_agent) = config.user_agent_header() {
            request = request.header(USER_AGENT, user_agent);
        }
        let robots_response = request.send().await?;
        if robots_response.status() != StatusCode::OK {
            return Err(RobotsError::HttpStatus(robots_response.status().as_u16()));
        }
        Ok(robots_response.text().await?)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn site(&self) -> Option<&Url> {
        self.site.as_ref()
    }

    pub fn robots_txt(&self) -> RobotsTxt {
        match &self.site {
            Some(site) => RobotsTxt::parse_with_site(&self.content, site),
            None => RobotsTxt::parse(&self.content),
        }
    }
}

/// Loads `source` (an origin or document text), then checks `url` for `agent`.
pub async fn is_allowed(source: &str, url: &str, agent: &str) -> Result<bool, RobotsError> {
    let config = FetchConfig::new(FetchConfig::default().timeout(), agent);
    let robots_txt = RobotsTxtSource::load(source, &config).await?.robots_txt();
    Ok(robots_txt.matcher(agent).is_allowed(url))
}

/// Whether `input` names an HTTP(S) origin rather than document text or a file.
pub fn is_origin(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

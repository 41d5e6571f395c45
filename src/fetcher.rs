/*!
 * MediaWiki API client.
 *
 * Fetches raw wikitext plus section metadata for a talk page and renders
 * wikitext back to HTML for display. Every request carries a descriptive
 * User-Agent and a short timeout; any network, HTTP, or payload failure
 * surfaces as a [`FetchError`]; the analysis core never sees a panic
 * and no partial analysis is attempted on a failed fetch.
 */

use std::time::Duration;

use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app_config::WikiConfig;
use crate::errors::FetchError;

/// A page identified from a user-supplied URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRef {
    /// Page title, percent-decoded, e.g. "Talk:Example_article"
    pub title: String,

    /// Percent-decoded fragment naming the target section, if any
    pub anchor: Option<String>,
}

/// Parse a wiki URL into a page title and optional section anchor.
pub fn parse_talk_url(input: &str) -> Result<PageRef, FetchError> {
    let url = Url::parse(input)
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", input, e)))?;

    let path = url.path();
    let raw_title = path
        .split_once("/wiki/")
        .map(|(_, title)| title)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| {
            FetchError::InvalidUrl(format!("No /wiki/<page> path in URL: {}", input))
        })?;

    let title = urlencoding::decode(raw_title)
        .map_err(|e| FetchError::InvalidUrl(format!("Undecodable page title: {}", e)))?
        .into_owned();

    let anchor = url
        .fragment()
        .and_then(|fragment| urlencoding::decode(fragment).ok())
        .map(|decoded| decoded.into_owned())
        .filter(|anchor| !anchor.is_empty());

    Ok(PageRef { title, anchor })
}

/// Section metadata as reported by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionInfo {
    /// Anchor id of the heading
    #[serde(default)]
    pub anchor: String,

    /// Heading text
    #[serde(default)]
    pub line: String,

    /// Heading level; the API reports it as a string
    #[serde(default)]
    pub level: String,
}

impl SectionInfo {
    /// Numeric heading rank; talk-page sections default to 2.
    pub fn level_number(&self) -> u8 {
        self.level.parse().unwrap_or(2)
    }
}

/// A fetched page: wikitext, section metadata, and the requested anchor.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Resolved page title
    pub title: String,

    /// Full-page raw wikitext
    pub wikitext: String,

    /// Section metadata in document order
    pub sections: Vec<SectionInfo>,

    /// Anchor carried over from the input URL
    pub anchor: Option<String>,
}

impl FetchedPage {
    /// Resolve an anchor to its heading text using the section metadata.
    ///
    /// Anchors swap spaces for underscores relative to the heading line,
    /// so both spellings are accepted.
    pub fn heading_for_anchor(&self, anchor: &str) -> Option<&str> {
        let normalized = anchor.replace('_', " ");
        self.sections
            .iter()
            .find(|section| {
                section.anchor == anchor || section.anchor.replace('_', " ") == normalized
            })
            .map(|section| section.line.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct ParsePayload {
    title: Option<String>,
    wikitext: Option<String>,
    text: Option<String>,
    #[serde(default)]
    sections: Vec<SectionInfo>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: Option<ParsePayload>,
    error: Option<ApiErrorPayload>,
}

/// Client for the MediaWiki parse API.
#[derive(Debug)]
pub struct WikiClient {
    client: Client,
    api_endpoint: String,
    user_agent: String,
}

impl WikiClient {
    /// Create a client from wiki configuration.
    pub fn from_config(config: &WikiConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_endpoint: config.api_endpoint.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Client with default configuration (English Wikipedia, 10 s timeout).
    pub fn new() -> Self {
        Self::from_config(&WikiConfig::default())
    }

    /// Fetch the wikitext and section metadata for a page.
    pub async fn fetch_page(&self, page: &PageRef) -> Result<FetchedPage, FetchError> {
        info!("Fetching wikitext for page: {}", page.title);
        if let Some(anchor) = &page.anchor {
            debug!("Target section: {}", anchor);
        }

        let response = self
            .client
            .get(&self.api_endpoint)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "application/json")
            .query(&[
                ("action", "parse"),
                ("page", page.title.as_str()),
                ("prop", "wikitext|sections"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(FetchError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let data: ParseResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MissingContent(format!("malformed API response: {}", e)))?;

        if let Some(error) = data.error {
            return Err(FetchError::WikiError {
                code: error.code,
                info: error.info,
            });
        }

        let payload = data
            .parse
            .ok_or_else(|| FetchError::MissingContent("no parse data in response".to_string()))?;
        let wikitext = payload
            .wikitext
            .ok_or_else(|| FetchError::MissingContent("no wikitext in response".to_string()))?;

        debug!("Fetched {} chars of wikitext", wikitext.len());

        Ok(FetchedPage {
            title: payload.title.unwrap_or_else(|| page.title.clone()),
            wikitext,
            sections: payload.sections,
            anchor: page.anchor.clone(),
        })
    }

    /// Render wikitext to display HTML through the API.
    pub async fn render_html(&self, wikitext: &str, title: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .post(&self.api_endpoint)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", "application/json")
            .form(&[
                ("action", "parse"),
                ("text", wikitext),
                ("title", title),
                ("prop", "text"),
                ("format", "json"),
                ("formatversion", "2"),
                ("contentmodel", "wikitext"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(FetchError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let data: ParseResponse = response
            .json()
            .await
            .map_err(|e| FetchError::MissingContent(format!("malformed API response: {}", e)))?;

        if let Some(error) = data.error {
            return Err(FetchError::WikiError {
                code: error.code,
                info: error.info,
            });
        }

        data.parse
            .and_then(|payload| payload.text)
            .ok_or_else(|| FetchError::MissingContent("no rendered text in response".to_string()))
    }
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parseTalkUrl_withFragment_shouldSplitTitleAndAnchor() {
        let page =
            parse_talk_url("https://en.wikipedia.org/wiki/Talk:Example#Move_discussion").unwrap();

        assert_eq!(page.title, "Talk:Example");
        assert_eq!(page.anchor.as_deref(), Some("Move_discussion"));
    }

    #[test]
    fn test_parseTalkUrl_percentEncoded_shouldDecode() {
        let page = parse_talk_url(
            "https://en.wikipedia.org/wiki/Talk:V%C3%A9lo#RfC%3A_new_lead",
        )
        .unwrap();

        assert_eq!(page.title, "Talk:Vélo");
        assert_eq!(page.anchor.as_deref(), Some("RfC:_new_lead"));
    }

    #[test]
    fn test_parseTalkUrl_withoutFragment_shouldHaveNoAnchor() {
        let page = parse_talk_url("https://en.wikipedia.org/wiki/Talk:Example").unwrap();

        assert!(page.anchor.is_none());
    }

    #[test]
    fn test_parseTalkUrl_notAWikiPath_shouldFail() {
        assert!(parse_talk_url("https://en.wikipedia.org/w/index.php?title=X").is_err());
        assert!(parse_talk_url("not a url at all").is_err());
    }

    #[test]
    fn test_headingForAnchor_shouldAcceptUnderscoreSpelling() {
        let page = FetchedPage {
            title: "Talk:Example".to_string(),
            wikitext: String::new(),
            sections: vec![SectionInfo {
                anchor: "Move_discussion".to_string(),
                line: "Move discussion".to_string(),
                level: "2".to_string(),
            }],
            anchor: None,
        };

        assert_eq!(page.heading_for_anchor("Move_discussion"), Some("Move discussion"));
        assert_eq!(page.heading_for_anchor("Move discussion"), Some("Move discussion"));
        assert_eq!(page.heading_for_anchor("Absent"), None);
    }

    #[test]
    fn test_sectionInfo_levelNumber_shouldParseStringLevels() {
        let section = SectionInfo {
            anchor: String::new(),
            line: String::new(),
            level: "3".to_string(),
        };
        assert_eq!(section.level_number(), 3);

        let unparseable = SectionInfo {
            anchor: String::new(),
            line: String::new(),
            level: String::new(),
        };
        assert_eq!(unparseable.level_number(), 2);
    }
}

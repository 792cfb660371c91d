//! Latest-version lookups against an npm-compatible registry.

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::RegistryError;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: String,
    http: Client,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Whether `name` looks like something the registry could know about.
    ///
    /// Scoped names (`@scope/pkg`) and bare names qualify; anything else with
    /// a slash does not.
    pub fn is_lookupable(name: &str) -> bool {
        !name.is_empty() && (name.starts_with('@') || !name.contains('/'))
    }

    /// Latest published version of `name`, or `None` when the registry has
    /// nothing to say about it.
    pub fn latest_version(&self, name: &str) -> Result<Option<String>, RegistryError> {
        if !Self::is_lookupable(name) {
            tracing::debug!(name, "skipping registry lookup");
            return Ok(None);
        }

        let url = self.package_url(name)?;
        tracing::debug!(%url, "querying registry");

        let response = self.http.get(url).send()?;
        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            status => return Err(RegistryError::Status(status.as_u16())),
        }

        let body: Value = serde_json::from_slice(&response.bytes()?)?;
        Ok(latest_dist_tag(&body))
    }

    fn package_url(&self, name: &str) -> Result<Url, RegistryError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| RegistryError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| RegistryError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

fn latest_dist_tag(body: &Value) -> Option<String> {
    body.get("dist-tags")
        .and_then(|tags| tags.get("latest"))
        .and_then(Value::as_str)
        .filter(|latest| !latest.is_empty())
        .map(str::to_owned)
}


#[cfg(test)]
mod tests {
    use super::mock::MockRegistry;
    use super::*;

    #[test]
    fn lookupable_names() {
        assert!(RegistryClient::is_lookupable("left-pad"));
        assert!(RegistryClient::is_lookupable("@anthropic/claude-tools"));
        assert!(!RegistryClient::is_lookupable("github.com/someone/plugin"));
        assert!(!RegistryClient::is_lookupable("owner/repo"));
        assert!(!RegistryClient::is_lookupable(""));
    }

    #[test]
    fn reads_latest_dist_tag() {
        let registry = MockRegistry::start(&[(
            "/foo",
            200,
            r#"{"name":"foo","dist-tags":{"latest":"2.0.0","next":"3.0.0-beta.1"}}"#,
        )]);

        let latest = registry.client().latest_version("foo").unwrap();
        assert_eq!(latest.as_deref(), Some("2.0.0"));
        assert_eq!(registry.requests(), vec!["/foo"]);
    }

    #[test]
    fn not_found_is_no_information() {
        let registry = MockRegistry::start(&[]);
        assert_eq!(registry.client().latest_version("unlisted").unwrap(), None);
    }

    #[test]
    fn missing_latest_tag_is_no_information() {
        let registry = MockRegistry::start(&[
            ("/no-tags", 200, r#"{"name":"no-tags"}"#),
            ("/no-latest", 200, r#"{"dist-tags":{"next":"1.0.0"}}"#),
            ("/odd-latest", 200, r#"{"dist-tags":{"latest":7}}"#),
        ]);
        let client = registry.client();

        assert_eq!(client.latest_version("no-tags").unwrap(), None);
        assert_eq!(client.latest_version("no-latest").unwrap(), None);
        assert_eq!(client.latest_version("odd-latest").unwrap(), None);
    }

    #[test]
    fn other_status_is_an_error() {
        let registry = MockRegistry::start(&[("/flaky", 500, "oops")]);

        let err = registry.client().latest_version("flaky").unwrap_err();
        assert!(matches!(err, RegistryError::Status(500)));
        assert_eq!(err.to_string(), "npm registry returned status 500");
    }

    #[test]
    fn malformed_body_is_an_error() {
        let registry = MockRegistry::start(&[("/garbled", 200, "<html>")]);

        let err = registry.client().latest_version("garbled").unwrap_err();
        assert!(matches!(err, RegistryError::Body(_)));
    }

    #[test]
    fn ineligible_name_makes_no_request() {
        let registry = MockRegistry::start(&[]);

        assert_eq!(registry.client().latest_version("owner/repo").unwrap(), None);
        assert!(registry.requests().is_empty());
    }

    #[test]
    fn scoped_name_is_a_single_path_segment() {
        let registry = MockRegistry::start(&[(
            "/@scope%2Fpkg",
            200,
            r#"{"dist-tags":{"latest":"0.4.0"}}"#,
        )]);

        let latest = registry.client().latest_version("@scope/pkg").unwrap();
        assert_eq!(latest.as_deref(), Some("0.4.0"));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = RegistryClient::new("https://registry.example.com/").unwrap();
        let url = client.package_url("foo").unwrap();
        assert_eq!(url.as_str(), "https://registry.example.com/foo");
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let client = RegistryClient::new("not a url").unwrap();
        assert!(matches!(client.latest_version("foo"), Err(RegistryError::InvalidUrl(_))));
    }
}

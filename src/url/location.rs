use crate::url::directory_of;
use crate::url::error::{UrlError, UrlResult};
use reqwest::Url;
use serde::Serialize;

/// The page the thumbnails are shown on, split like a browser location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLocation {
    /// Scheme including the trailing colon, e.g. `https:`.
    pub protocol: String,
    pub hostname: String,
    pub port: Option<u16>,
    pub pathname: String,
}

impl DocumentLocation {
    pub fn parse(location: &str) -> UrlResult<Self> {
        let url = Url::parse(location)
            .map_err(|e| UrlError::InvalidLocation(location.to_string(), e.to_string()))?;

        if url.cannot_be_a_base() {
            return Err(UrlError::CannotBeABase(location.to_string()));
        }

        Ok(Self {
            protocol: format!("{}:", url.scheme()),
            hostname: url.host_str().unwrap_or_default().to_string(),
            port: url.port(),
            pathname: url.path().to_string(),
        })
    }

    /// Location with the final path segment removed, used as the base for relative sources.
    pub fn base_url(&self) -> String {
        let port = match self.port {
            Some(port) => format!(":{port}"),
            None => String::new(),
        };

        let full = format!(
            "{}//{}{}{}",
            self.protocol, self.hostname, port, self.pathname
        );

        directory_of(&full).to_string()
    }
}

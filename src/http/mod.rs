use crate::config::ThumbnailsConfig;
use crate::http::error::{FetchError, FetchResult};
use bytes::BytesMut;
use const_format::concatcp;
use futures::StreamExt;
use log::debug;
use reqwest::{Client, Method, Url};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tower::limit::RateLimit;
use tower::{Service, ServiceBuilder, ServiceExt};

pub mod error;

pub const USER_AGENT: &str = concatcp!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches cue-sheet text by absolute URL.
pub trait CueSheetFetcher {
    fn fetch(&mut self, url: &str) -> impl Future<Output = FetchResult<String>>;
}

/// Rate limited HTTP(S) fetcher.
pub struct HttpFetcher {
    client: Client,
    service: RateLimit<Client>,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &ThumbnailsConfig) -> FetchResult<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &ThumbnailsConfig) -> Self {
        let service = ServiceBuilder::new()
            .rate_limit(config.requests_per_second, Duration::from_secs(1))
            .service(client.clone());

        Self {
            client,
            service,
            max_bytes: config.max_cue_sheet_bytes,
        }
    }
}

impl CueSheetFetcher for HttpFetcher {
    async fn fetch(&mut self, url: &str) -> FetchResult<String> {
        let req = self
            .client
            .request(Method::GET, url)
            .header(reqwest::header::ACCEPT, "text/vtt, text/plain, */*")
            .build()?;

        let res = self.service.ready().await?.call(req).await?;

        if !res.status().is_success() {
            return Err(FetchError::NoSuccessStatusCode(res.status(), res.text().await?));
        }

        let mut body = BytesMut::new();
        let mut stream = res.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {url}", body.len());

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Reads `file://` URLs from disk.
pub struct FileFetcher {
    max_bytes: usize,
}

impl FileFetcher {
    pub fn new(config: &ThumbnailsConfig) -> Self {
        Self {
            max_bytes: config.max_cue_sheet_bytes,
        }
    }

    async fn read(&self, url: &str, path: &Path) -> FetchResult<String> {
        let size = tokio::fs::metadata(path).await?.len();
        if size > self.max_bytes as u64 {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        let data = tokio::fs::read(path).await?;

        debug!("Read {} bytes from {path:?}", data.len());

        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

impl CueSheetFetcher for FileFetcher {
    async fn fetch(&mut self, url: &str) -> FetchResult<String> {
        let parsed = parse_url(url)?;
        if parsed.scheme() != "file" {
            return Err(FetchError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let path = parsed
            .to_file_path()
            .map_err(|_| FetchError::InvalidFilePath(url.to_string()))?;

        self.read(url, &path).await
    }
}

/// Picks the HTTP or file fetcher from the URL scheme.
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(config: &ThumbnailsConfig) -> FetchResult<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            file: FileFetcher::new(config),
        })
    }
}

impl CueSheetFetcher for SourceFetcher {
    async fn fetch(&mut self, url: &str) -> FetchResult<String> {
        let parsed = parse_url(url)?;

        match parsed.scheme() {
            "http" | "https" => self.http.fetch(url).await,
            "file" => self.file.fetch(url).await,
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn parse_url(url: &str) -> FetchResult<Url> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl(url.to_string(), e.to_string()))
}

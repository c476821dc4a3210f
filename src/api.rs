// API client module: a small async HTTP client for the hosting service.
// One call creates a site, the other pushes a single file into it. The
// underlying `reqwest::Client` is a connection pool, so clones share it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// The service spells it the British way. Header names go out lowercase.
pub const AUTH_HEADER: &str = "authorisation";

const USER_AGENT: &str = concat!("smokeshow/", env!("CARGO_PKG_VERSION"));

// Encode all non-unreserved characters, except '/'.
const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Async API client holding the shared connection pool, the create
/// endpoint and the credential used to create sites.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    create_url: String,
    auth: String,
}

/// Where a freshly created site accepts uploads and the key to do so.
#[derive(Debug, Clone)]
pub struct SiteSession {
    pub upload_root: String,
    pub secret_key: String,
    pub upload_expiration: Option<String>,
    pub site_expiration: Option<String>,
}

/// Body returned by the create endpoint. Only `url` and `secret_key`
/// are needed; the rest is informational.
#[derive(Serialize, Deserialize, Debug)]
pub struct CreateSiteResponse {
    pub url: String,
    pub secret_key: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sites_created_24h: Option<u64>,
    #[serde(default)]
    pub site_creation: Option<String>,
    #[serde(default)]
    pub site_expiration: Option<String>,
    #[serde(default)]
    pub upload_expiration: Option<String>,
}

/// Body returned for each uploaded file. `total_site_size` is the
/// server's running total for the whole site after this file.
#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub size: u64,
    pub total_site_size: u64,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;
        Ok(ApiClient {
            client,
            create_url: config.create_url.clone(),
            auth: config.auth.clone(),
        })
    }

    /// POST to the create endpoint and return the new site. Nothing is
    /// retried; a non-200 answer becomes `Error::Provisioning`.
    pub async fn create_site(&self) -> Result<SiteSession> {
        debug!(url = %self.create_url, "creating site");
        let res = self
            .client
            .post(&self.create_url)
            .headers(auth_headers(&self.auth)?)
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if status != StatusCode::OK {
            warn!(%status, "site creation failed");
            return Err(Error::Provisioning { status, body });
        }

        let site: CreateSiteResponse = serde_json::from_str(&body)
            .map_err(|source| Error::MalformedSiteResponse { body: body.clone(), source })?;
        if !site.url.ends_with('/') {
            return Err(Error::InvalidUploadRoot(site.url));
        }
        debug!(
            url = %site.url,
            sites_created_24h = ?site.sites_created_24h,
            message = ?site.message,
            "site created"
        );
        Ok(SiteSession {
            upload_root: site.url,
            secret_key: site.secret_key,
            upload_expiration: site.upload_expiration,
            site_expiration: site.site_expiration,
        })
    }

    /// POST one file's bytes to `upload_root + path`, `path` being the
    /// `/`-joined relative path of the file.
    pub async fn upload_file(
        &self,
        session: &SiteSession,
        path: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<UploadResponse> {
        let url = upload_url(&session.upload_root, path);
        let mut headers = auth_headers(&session.secret_key)?;
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_str(ct)?);
        }

        debug!(%url, bytes = body.len(), "uploading file");
        let res = self.client.post(&url).headers(headers).body(body).send().await?;
        let status = res.status();
        let text = res.text().await?;
        if status != StatusCode::OK {
            warn!(%path, %status, "upload failed");
            return Err(Error::Upload {
                path: path.to_string(),
                status,
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|source| Error::MalformedUploadResponse {
            path: path.to_string(),
            body: text.clone(),
            source,
        })
    }
}

/// URL a file is uploaded to. Each path segment is percent-encoded so
/// names containing `#`, `?` or `%` keep their full name on the site.
pub fn upload_url(upload_root: &str, path: &str) -> String {
    format!("{upload_root}{}", utf8_percent_encode(path, PATH_ENCODE_SET))
}

/// Header map carrying the service's `Authorisation` header.
fn auth_headers(key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(AUTH_HEADER), HeaderValue::from_str(key)?);
    Ok(headers)
}

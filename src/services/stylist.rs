use crate::core::encoding::encode_file;
use crate::models::{
    ClothingItem, Confirmation, Gender, SimilarityRequest, SimilarityResponse, UploadRequest,
    DEFAULT_TOP_N,
};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Default Stylist service address
pub const DEFAULT_BASE_URL: &str = "http://localhost:9500";

/// Default per-request timeout. Similarity calls run model inference on the
/// backend, so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors that can occur when talking to the Stylist service
#[derive(Debug, Error)]
pub enum StylistError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StylistError {
    /// HTTP status code, when the backend answered with a non-2xx status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(e) if e.is_timeout())
    }
}

impl From<validator::ValidationErrors> for StylistError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(errors.to_string())
    }
}

/// Connection settings for [`StylistClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("stylist-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Blocking client for the Stylist API
///
/// Each operation issues exactly one request and never retries. The
/// underlying session is reference-counted, so clones share connections
/// and the client can be used from several threads at once.
#[derive(Debug, Clone)]
pub struct StylistClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl StylistClient {
    /// Create a new Stylist client
    pub fn new(config: ClientConfig) -> Result<Self, StylistError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let parsed = reqwest::Url::parse(&base_url).map_err(|e| {
            StylistError::InvalidConfig(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StylistError::InvalidConfig(format!(
                "unsupported scheme '{}' in base URL",
                parsed.scheme()
            )));
        }
        if config.timeout.is_zero() {
            return Err(StylistError::InvalidConfig(
                "timeout must be greater than zero".into(),
            ));
        }

        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| StylistError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// Client pointed at the default local service
    pub fn local() -> Result<Self, StylistError> {
        Self::new(ClientConfig::default())
    }

    /// Copy of this client that applies `timeout` to every request it sends.
    ///
    /// The copy shares the connection pool with the original.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            base_url: self.base_url.clone(),
            timeout,
            client: self.client.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upload a clothing image
    ///
    /// POST /api/clothes/upload
    pub fn upload_clothes(
        &self,
        name: &str,
        gender: Gender,
        image_path: impl AsRef<Path>,
    ) -> Result<ClothingItem, StylistError> {
        let image = encode_file(image_path.as_ref())?;
        let request = UploadRequest::new(name, gender, image);
        request.validate()?;

        tracing::debug!("Uploading clothes '{}' ({})", request.name, request.gender);

        let builder = self.request(Method::POST, "/api/clothes/upload").json(&request);
        let mut item: ClothingItem = self.execute(builder, "upload clothes")?;

        // The backend may answer with a bare `{id, success}` acknowledgement
        if item.name.is_empty() {
            item.name = request.name;
        }

        Ok(item)
    }

    /// List stored clothes in backend order
    ///
    /// GET /api/clothes/get
    pub fn get_clothes(&self) -> Result<Vec<ClothingItem>, StylistError> {
        let builder = self.request(Method::GET, "/api/clothes/get");
        let items: Vec<ClothingItem> = self.execute(builder, "list clothes")?;

        tracing::debug!("Fetched {} clothing items", items.len());

        Ok(items)
    }

    /// Delete a clothing item. Unknown ids surface as [`StylistError::Http`].
    ///
    /// DELETE /api/clothes/delete/{id}
    pub fn delete_clothes(&self, id: &str) -> Result<Confirmation, StylistError> {
        let path = format!("/api/clothes/delete/{}", urlencoding::encode(id));
        let builder = self.request(Method::DELETE, &path);
        self.execute(builder, "delete clothes")
    }

    /// Find stored clothes similar to the image at `image_path`
    ///
    /// POST /api/similarity/calculate
    pub fn calculate_similarity(
        &self,
        image_path: impl AsRef<Path>,
        top_n: i64,
    ) -> Result<SimilarityResponse, StylistError> {
        let request = SimilarityRequest {
            user_image: encode_file(image_path.as_ref())?,
            top_n,
        };

        let builder = self
            .request(Method::POST, "/api/similarity/calculate")
            .json(&request);
        let response: SimilarityResponse = self.execute(builder, "calculate similarity")?;

        tracing::debug!("Similarity returned {} matches (top_n={})", response.len(), top_n);

        Ok(response)
    }

    /// [`calculate_similarity`](Self::calculate_similarity) with the default of five matches
    pub fn calculate_similarity_default(
        &self,
        image_path: impl AsRef<Path>,
    ) -> Result<SimilarityResponse, StylistError> {
        self.calculate_similarity(image_path, DEFAULT_TOP_N)
    }

    /// Ask the backend to persist its stores
    ///
    /// GET /api/store/save
    pub fn save_store(&self) -> Result<Confirmation, StylistError> {
        let builder = self.request(Method::GET, "/api/store/save");
        self.execute(builder, "save store")
    }

    /// Ask the backend to reload its stores from disk
    ///
    /// GET /api/store/load
    pub fn load_store(&self) -> Result<Confirmation, StylistError> {
        let builder = self.request(Method::GET, "/api/store/load");
        self.execute(builder, "load store")
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
    }

    fn execute<T>(&self, builder: RequestBuilder, action: &str) -> Result<T, StylistError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to {}: {} - {}", action, status, body);
            return Err(StylistError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text()?;
        parse_body(&body, action)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str, action: &str) -> Result<T, StylistError> {
    serde_json::from_str(body)
        .map_err(|e| StylistError::Decode(format!("failed to parse {} response: {}", action, e)))
}

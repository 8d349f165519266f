use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::WallpaperId,
    error::{ApiException, ErrorCode},
    protocol::{
        Comment, CreateCommentRequest, CreateCommentResponse, RenameForm, COMMENTS_PATH,
        RENAME_PATH,
    },
};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request with status {status}: {message}")]
    Status {
        status: u16,
        code: ErrorCode,
        message: String,
    },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// The two comment endpoints the wallpaper modal talks to.
#[async_trait]
pub trait CommentsApi: Send + Sync {
    async fn fetch_comments(&self, wallpaper_id: WallpaperId) -> Result<Vec<Comment>, ClientError>;
    async fn post_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<CreateCommentResponse, ClientError>;
}

pub struct MissingCommentsApi;

#[async_trait]
impl CommentsApi for MissingCommentsApi {
    async fn fetch_comments(&self, wallpaper_id: WallpaperId) -> Result<Vec<Comment>, ClientError> {
        Err(ClientError::Unavailable(format!(
            "comments backend unavailable for wallpaper {wallpaper_id}"
        )))
    }

    async fn post_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<CreateCommentResponse, ClientError> {
        Err(ClientError::Unavailable(format!(
            "comments backend unavailable for wallpaper {}",
            request.wallpaper_id
        )))
    }
}

pub struct GalleryClient {
    http: Client,
    server_url: String,
}

impl GalleryClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Posts the rename form. The backend answers with a redirect, which
    /// reqwest follows; the final location is returned.
    pub async fn rename_wallpaper(&self, form: &RenameForm) -> Result<String, ClientError> {
        let res = self
            .http
            .post(format!("{}{RENAME_PATH}", self.server_url))
            .form(form)
            .send()
            .await?;
        let res = ensure_success(res).await?;
        let location = res.url().to_string();
        info!(
            wallpaper_id = %form.wallpaper_id,
            %location,
            "rename submitted"
        );
        Ok(location)
    }
}

#[async_trait]
impl CommentsApi for GalleryClient {
    async fn fetch_comments(&self, wallpaper_id: WallpaperId) -> Result<Vec<Comment>, ClientError> {
        let res = self
            .http
            .get(format!("{}{COMMENTS_PATH}/{wallpaper_id}", self.server_url))
            .send()
            .await?;
        let res = ensure_success(res).await?;
        let bytes = res.bytes().await?;
        // Some backend versions encode an empty result as `null`.
        let comments: Option<Vec<Comment>> = serde_json::from_slice(&bytes)?;
        let comments = comments.unwrap_or_default();
        debug!(%wallpaper_id, count = comments.len(), "fetched comments");
        Ok(comments)
    }

    async fn post_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<CreateCommentResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}{COMMENTS_PATH}", self.server_url))
            .json(request)
            .send()
            .await?;
        let res = ensure_success(res).await?;
        let bytes = res.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(CreateCommentResponse {
                success: true,
                id: None,
            });
        }
        match serde_json::from_slice::<CreateCommentResponse>(&bytes) {
            Ok(body) => Ok(body),
            Err(error) => {
                warn!(%error, "unrecognised create-comment response body; treating as success");
                Ok(CreateCommentResponse {
                    success: true,
                    id: None,
                })
            }
        }
    }
}

async fn ensure_success(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let exception = ApiException::from_response(status.as_u16(), body);
    ClientError::Status {
        status: status.as_u16(),
        code: exception.code,
        message: exception.message,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

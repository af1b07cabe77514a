use std::{fmt::Debug, time::Duration};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::util::{error_chain_fmt, parse_base_url};

use super::{Event, Issue, OpenCall, Page, Post};

pub const OPEN_CALL_SLUG: &str = "open-call";

/// 请求的内容类型，决定错误提示的措辞
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Issues,
    Issue,
    Events,
    Posts,
    Page(&'a str),
}

impl Resource<'_> {
    fn not_found(&self) -> String {
        match self {
            Resource::Issues => "No issues found.".into(),
            Resource::Issue => "Issue not found.".into(),
            Resource::Events => "No events found.".into(),
            Resource::Posts => "No posts found.".into(),
            Resource::Page(OPEN_CALL_SLUG) => "Open Call page not found.".into(),
            Resource::Page(slug) => format!("Page `{slug}` not found."),
        }
    }

    fn load_failed(&self) -> String {
        let noun = match self {
            Resource::Issues => "issues",
            Resource::Issue => "issue",
            Resource::Events => "events",
            Resource::Posts => "posts",
            Resource::Page(OPEN_CALL_SLUG) => "Open Call data",
            Resource::Page(_) => "page",
        };
        format!("Failed to load {noun}. Please check your connection.")
    }
}

#[derive(thiserror::Error)]
pub enum ContentError {
    #[error("{0}")]
    NotFound(String),
    /// CMS返回了错误或非预期的响应
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: anyhow::Error,
    },
    /// 没有收到响应
    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Debug for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContentError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContentError::NotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Upstream { .. } | ContentError::Network { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

#[derive(serde::Deserialize)]
struct CmsErrorBody {
    message: Option<String>,
}

/// WordPress REST接口的只读客户端
pub struct ContentClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl ContentClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build content client.")?;
        let base_url = parse_base_url(base_url)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        let content_api = &config.content_api;
        Self::new(&content_api.base_url, content_api.timeout())
    }

    #[tracing::instrument(name = "获取刊物列表", skip(self))]
    pub async fn issues(&self) -> Result<Vec<Issue>, ContentError> {
        self.get(
            Resource::Issues,
            "issues",
            &[("_embed", "true"), ("per_page", "100"), ("status", "publish")],
        )
        .await
    }

    #[tracing::instrument(name = "获取单期刊物", skip(self))]
    pub async fn issue(&self, id: u64) -> Result<Issue, ContentError> {
        self.get(
            Resource::Issue,
            &format!("issues/{id}"),
            &[("_embed", "true"), ("status", "publish")],
        )
        .await
    }

    #[tracing::instrument(name = "获取活动列表", skip(self))]
    pub async fn events(&self) -> Result<Vec<Event>, ContentError> {
        self.get(
            Resource::Events,
            "events",
            &[("_embed", "true"), ("per_page", "100"), ("status", "publish")],
        )
        .await
    }

    #[tracing::instrument(name = "获取文章列表", skip(self))]
    pub async fn posts(&self) -> Result<Vec<Post>, ContentError> {
        self.get(
            Resource::Posts,
            "posts",
            &[("_embed", "true"), ("per_page", "6"), ("status", "publish")],
        )
        .await
    }

    #[tracing::instrument(name = "获取页面", skip(self))]
    pub async fn page(&self, slug: &str) -> Result<Page, ContentError> {
        self.page_as(slug).await
    }

    #[tracing::instrument(name = "获取open call页面", skip(self))]
    pub async fn open_call(&self) -> Result<OpenCall, ContentError> {
        self.page_as(OPEN_CALL_SLUG).await
    }

    /// 按slug查询页面，接口返回数组，取第一个
    async fn page_as<T: DeserializeOwned>(&self, slug: &str) -> Result<T, ContentError> {
        let resource = Resource::Page(slug);
        let pages: Vec<T> = self
            .get(
                resource,
                "pages",
                &[("slug", slug), ("_embed", "true"), ("status", "publish")],
            )
            .await?;

        pages
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::NotFound(resource.not_found()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource<'_>,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ContentError> {
        let upstream = |source: anyhow::Error| ContentError::Upstream {
            message: resource.load_failed(),
            source,
        };

        let url = self.base_url.join(path).map_err(|e| upstream(e.into()))?;
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| {
                tracing::error!(error.cause_chain = ?source, "内容接口无响应.");
                ContentError::Network {
                    message: resource.load_failed(),
                    source,
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read content response body.")
            .map_err(upstream)?;

        if !status.is_success() {
            let error = map_failure(resource, status, &body);
            tracing::warn!(%status, "内容接口返回错误: {error}");
            return Err(error);
        }

        serde_json::from_str(&body)
            .with_context(|| format!("unexpected content response for {path}."))
            .map_err(upstream)
    }
}

/// CMS自带的错误信息优先，其次按状态码给出提示
fn map_failure(resource: Resource<'_>, status: reqwest::StatusCode, body: &str) -> ContentError {
    let cms_message = serde_json::from_str::<CmsErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());
    let source = anyhow::anyhow!("content api responded with {status}.");

    match (status, cms_message) {
        (reqwest::StatusCode::NOT_FOUND, Some(message)) => ContentError::NotFound(message),
        (reqwest::StatusCode::NOT_FOUND, None) => ContentError::NotFound(resource.not_found()),
        (_, Some(message)) => ContentError::Upstream { message, source },
        (reqwest::StatusCode::INTERNAL_SERVER_ERROR, None) => ContentError::Upstream {
            message: "WordPress server error. Please try again later.".into(),
            source,
        },
        (_, None) => ContentError::Upstream {
            message: resource.load_failed(),
            source,
        },
    }
}

use std::{fmt::Debug, time::Duration};

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{domain::SubmissionResult, util::error_chain_fmt, util::parse_base_url};

use super::Payload;

/// 表单服务中的表单编号
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormId(String);

impl FormId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for FormId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for FormId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for FormId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 请求未能完成时的错误，`Display`即面向用户的提示
#[derive(thiserror::Error)]
pub enum TransportError {
    /// 没有收到任何响应：断网、DNS失败、超时
    #[error("Nätverksfel: Kontrollera din anslutning.")]
    Network(#[source] reqwest::Error),
    /// 收到了5xx或无法解析的响应
    #[error("Serverfel: Kunde inte skicka formuläret. Försök igen senare.")]
    Server(#[source] anyhow::Error),
}

impl Debug for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl TransportError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// 表单提交的传输层，每次调用只发出一个请求
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(
        &self,
        form_id: &FormId,
        payload: &Payload,
    ) -> Result<SubmissionResult, TransportError>;
}

/// Contact Form 7 REST接口客户端
pub struct FormApiClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl FormApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build form api client.")?;
        let base_url = parse_base_url(base_url)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        let form_api = &config.form_api;
        Self::new(&form_api.base_url, form_api.timeout())
    }

    fn endpoint(&self, form_id: &FormId) -> anyhow::Result<reqwest::Url> {
        self.base_url
            .join(&format!(
                "contact-form-7/v1/contact-forms/{form_id}/feedback"
            ))
            .with_context(|| format!("failed to build feedback url for form `{form_id}`."))
    }
}

#[async_trait]
impl SubmissionTransport for FormApiClient {
    #[tracing::instrument(name = "提交表单", skip(self, payload), fields(form_id = %form_id))]
    async fn submit(
        &self,
        form_id: &FormId,
        payload: &Payload,
    ) -> Result<SubmissionResult, TransportError> {
        let url = self.endpoint(form_id).map_err(TransportError::Server)?;
        let body = payload
            .to_multipart()
            .context("failed to build multipart body.")
            .map_err(TransportError::Server)?;

        let response = self
            .client
            .post(url)
            .multipart(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "表单服务无响应.");
                TransportError::Network(e)
            })?;

        let body = read_body(response).await?;
        parse_json(&body)
    }
}

/// 读取响应体，5xx视为服务端错误
pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();
    if status.is_server_error() {
        tracing::error!(%status, "表单服务返回服务端错误.");
        return Err(TransportError::Server(anyhow!(
            "form service responded with {status}."
        )));
    }

    response
        .text()
        .await
        .context("failed to read response body.")
        .map_err(TransportError::Server)
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body)
        .with_context(|| format!("unexpected response body: {body}"))
        .map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "表单服务响应无法解析.");
            TransportError::Server(e)
        })
}

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::domain::{ResultStatus, SubmissionResult};

use super::{
    client::{parse_json, read_body},
    FormId, Payload, SubmissionTransport, TransportError,
};

/// 第三方邮件列表的嵌入式表单接口
/// 表单的`/post?`地址对应返回JSON的`/post-json?`地址
pub struct MailingListClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "lowercase")]
enum ListResult {
    Success,
    Error,
}

#[derive(serde::Deserialize)]
struct ListResponse {
    result: ListResult,
    #[serde(default)]
    msg: String,
}

impl From<ListResponse> for SubmissionResult {
    fn from(response: ListResponse) -> Self {
        let status = match response.result {
            ListResult::Success => ResultStatus::MailSent,
            ListResult::Error => ResultStatus::MailFailed,
        };
        SubmissionResult::new(status, response.msg)
    }
}

impl MailingListClient {
    pub fn new(action_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build mailing list client.")?;
        let endpoint = reqwest::Url::parse(&action_url.replace("/post?", "/post-json?"))
            .with_context(|| format!("failed to parse mailing list url `{action_url}`."))?;

        Ok(Self { client, endpoint })
    }

    /// 未配置地址时返回`None`，由调用方决定是否禁用newsletter
    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Option<Self>> {
        let mailing_list = &config.mailing_list;
        mailing_list
            .action_url()
            .map(|url| Self::new(url, mailing_list.timeout()))
            .transpose()
    }
}

#[async_trait]
impl SubmissionTransport for MailingListClient {
    #[tracing::instrument(name = "订阅邮件列表", skip(self, payload), fields(form_id = %form_id))]
    async fn submit(
        &self,
        form_id: &FormId,
        payload: &Payload,
    ) -> Result<SubmissionResult, TransportError> {
        let query: Vec<(&str, &str)> = payload.texts().collect();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "邮件列表服务无响应.");
                TransportError::Network(e)
            })?;

        let body = read_body(response).await?;
        let response: ListResponse = parse_json(strip_jsonp(&body))?;
        Ok(response.into())
    }
}

/// 去掉`callback({...})`形式的JSONP包装
fn strip_jsonp(body: &str) -> &str {
    let body = body.trim().trim_end_matches(';');
    match (body.find('('), body.ends_with(')')) {
        (Some(start), true) if !body.starts_with('{') => &body[start + 1..body.len() - 1],
        _ => body,
    }
}

use std::time::Duration;

use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::UploadLimits;

#[derive(serde::Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub content_api: ContentApiConfig,
    pub form_api: FormApiConfig,
    pub mailing_list: MailingListConfig,
    pub uploads: UploadLimits,
    pub order_guard: OrderGuardConfig,
}

#[derive(serde::Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct ContentApiConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl ContentApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct FormApiConfig {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub open_call_form_id: String,
    pub order_form_id: String,
}

impl FormApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct MailingListConfig {
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl MailingListConfig {
    /// 空字符串与未配置等同
    pub fn action_url(&self) -> Option<&str> {
        self.action_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct OrderGuardConfig {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub min_fill_milliseconds: u64,
}

impl OrderGuardConfig {
    pub fn min_fill(&self) -> Duration {
        Duration::from_millis(self.min_fill_milliseconds)
    }
}

/// 读取`config.yaml`，并允许`APP_`前缀的环境变量覆盖
/// e.g. `APP_MAILING_LIST__ACTION_URL=https://...`
pub fn try_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Config>()
}

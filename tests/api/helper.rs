use std::time::Duration;

use dramatik::{
    config::Config,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use wiremock::MockServer;

/// 默认不输出日志，设置`TEST_LOG`后输出到stdout
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test", "debug", std::io::stdout));
    } else {
        init_subscriber(get_subscriber("test", "debug", std::io::sink));
    }
});

pub const OPEN_CALL_FORM_ID: &str = "56";
pub const ORDER_FORM_ID: &str = "55";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    /// 模拟WordPress内容接口
    pub cms_server: MockServer,
    /// 模拟Contact Form 7接口
    pub form_server: MockServer,
    /// 模拟邮件列表服务
    pub list_server: MockServer,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn post_newsletter<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.client
            .post(format!("{}/api/forms/newsletter", &self.address))
            .form(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn post_open_call(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/api/forms/open-call", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn post_order<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.client
            .post(format!("{}/api/forms/order", &self.address))
            .form(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub fn feedback_path(form_id: &str) -> String {
        format!("/wp-json/contact-form-7/v1/contact-forms/{form_id}/feedback")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// 启动服务，在启动前可修改配置
pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    Lazy::force(&TRACING);

    let cms_server = MockServer::start().await;
    let form_server = MockServer::start().await;
    let list_server = MockServer::start().await;

    let mut config = dramatik::config::try_config().expect("failed to read config.yaml.");
    // 随机端口
    config.web.port = 0;
    config.content_api.base_url = format!("{}/wp-json/wp/v2", cms_server.uri());
    config.content_api.timeout_milliseconds = 2000;
    config.form_api.base_url = format!("{}/wp-json", form_server.uri());
    config.form_api.timeout_milliseconds = 2000;
    config.form_api.open_call_form_id = OPEN_CALL_FORM_ID.into();
    config.form_api.order_form_id = ORDER_FORM_ID.into();
    config.mailing_list.action_url = Some(format!(
        "{}/subscribe/post?u=abc&id=def",
        list_server.uri()
    ));
    config.mailing_list.timeout_milliseconds = 2000;
    configure(&mut config);

    let application = Application::build(config.clone()).expect("failed to build application.");
    let address = format!("http://{}:{}", &config.web.host, application.port());
    tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    TestApp {
        address,
        client,
        cms_server,
        form_server,
        list_server,
    }
}

use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::{
    config::Config,
    content::ContentClient,
    domain::UploadLimits,
    forms::AntiAutomationGuard,
    routes::{
        events, health_check, issue, issues, open_call, page, posts, submit_open_call,
        submit_order, subscribe_newsletter,
    },
    submission::{FormApiClient, FormId, MailingListClient},
};

/// 表单相关的静态设置，各请求共享
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub open_call_form_id: FormId,
    pub order_form_id: FormId,
    pub uploads: UploadLimits,
    pub guard: AntiAutomationGuard,
}

impl FormSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            open_call_form_id: FormId::new(config.form_api.open_call_form_id.as_str()),
            order_form_id: FormId::new(config.form_api.order_form_id.as_str()),
            uploads: config.uploads,
            guard: AntiAutomationGuard::new(config.order_guard.min_fill()),
        }
    }

    /// 附件以base64随JSON提交，体积约为原始大小的4/3
    fn json_limit(&self) -> usize {
        let encoded = self.uploads.max_total_bytes.saturating_mul(4) / 3;
        usize::try_from(encoded)
            .unwrap_or(usize::MAX)
            .saturating_add(64 * 1024)
    }
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(config: Config) -> anyhow::Result<Self> {
        let listener =
            TcpListener::bind(config.web.server_address()).context("failed to bind web port.")?;
        let port = listener.local_addr()?.port();

        let content_client = ContentClient::from_config(&config)?;
        let form_api = FormApiClient::from_config(&config)?;
        let mailing_list = mailing_list_client(&config);
        let settings = FormSettings::from_config(&config);

        let server = run(listener, content_client, form_api, mailing_list, settings)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

/// 邮件列表地址缺失或无法解析时禁用newsletter，服务照常启动
fn mailing_list_client(config: &Config) -> Option<MailingListClient> {
    match MailingListClient::from_config(config) {
        Ok(Some(client)) => Some(client),
        Ok(None) => {
            tracing::error!("未配置邮件列表地址，newsletter订阅不可用.");
            None
        }
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "邮件列表地址无效，newsletter订阅不可用.");
            None
        }
    }
}

fn run(
    listener: TcpListener,
    content_client: ContentClient,
    form_api: FormApiClient,
    mailing_list: Option<MailingListClient>,
    settings: FormSettings,
) -> std::io::Result<Server> {
    let json_config = web::JsonConfig::default().limit(settings.json_limit());
    let content_client = web::Data::new(content_client);
    let form_api = web::Data::new(form_api);
    let mailing_list = mailing_list.map(web::Data::new);
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        let mut api = web::scope("/api")
            .route("/issues", web::get().to(issues))
            .route("/issues/{id}", web::get().to(issue))
            .route("/events", web::get().to(events))
            .route("/posts", web::get().to(posts))
            .route("/pages/{slug}", web::get().to(page))
            .route("/open-call", web::get().to(open_call))
            .route("/forms/open-call", web::post().to(submit_open_call))
            .route("/forms/order", web::post().to(submit_order));
        // 未配置邮件列表时不挂载newsletter
        if let Some(mailing_list) = &mailing_list {
            api = api
                .app_data(mailing_list.clone())
                .route("/forms/newsletter", web::post().to(subscribe_newsletter));
        }

        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(api)
            .app_data(json_config.clone())
            .app_data(content_client.clone())
            .app_data(form_api.clone())
            .app_data(settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

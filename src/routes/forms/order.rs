use std::time::{Duration, Instant};

use actix_web::{web, HttpResponse};

use crate::{
    forms::{OrderForm, ShipmentMethod},
    startup::FormSettings,
    submission::{FormApiClient, FormSession},
};

use super::form_response;

#[derive(serde::Deserialize)]
pub struct OrderData {
    #[serde(rename = "your-firstname", default)]
    first_name: String,
    #[serde(rename = "your-lastname", default)]
    last_name: String,
    #[serde(rename = "your-email", default)]
    email: String,
    quantity: Option<String>,
    #[serde(default)]
    shipment: ShipmentMethod,
    #[serde(rename = "your-address", default)]
    address: String,
    #[serde(rename = "your-zip", default)]
    zip: String,
    #[serde(rename = "your-city", default)]
    city: String,
    /// 复选框只在勾选时出现
    #[serde(rename = "mc4wp-subscribe")]
    newsletter: Option<String>,
    #[serde(rename = "acceptance-privacy")]
    consent: Option<String>,
    /// 蜜罐
    #[serde(default)]
    website: String,
    /// 页面渲染时间，unix毫秒
    rendered_at: Option<i64>,
}

#[tracing::instrument(
    name = "刊物订购",
    skip_all,
    fields(email = %form.email, shipment = form.shipment.label())
)]
pub async fn submit_order(
    form: web::Form<OrderData>,
    form_api: web::Data<FormApiClient>,
    settings: web::Data<FormSettings>,
) -> HttpResponse {
    let data = form.into_inner();

    let mut order = OrderForm::new(settings.order_form_id.clone(), settings.guard);
    order.first_name = data.first_name;
    order.last_name = data.last_name;
    order.email = data.email;
    if let Some(quantity) = data.quantity {
        order.quantity = quantity;
    }
    order.shipment = data.shipment;
    order.address = data.address;
    order.zip = data.zip;
    order.city = data.city;
    order.newsletter = data.newsletter.is_some();
    order.consent = data.consent.is_some();
    order.honeypot = data.website;

    let mut session = FormSession::new(order).mounted_at(mounted_at(data.rendered_at));
    let outcome = session.submit(form_api.get_ref()).await;

    form_response(outcome, &session)
}

/// 由页面渲染时间推算表单挂载时刻，缺失或晚于当前时间视为刚刚挂载
fn mounted_at(rendered_at: Option<i64>) -> Instant {
    let now = Instant::now();
    let elapsed = rendered_at
        .map(|at| chrono::Utc::now().timestamp_millis().saturating_sub(at))
        .and_then(|millis| u64::try_from(millis).ok())
        .map(Duration::from_millis)
        .unwrap_or_default();

    now.checked_sub(elapsed).unwrap_or(now)
}

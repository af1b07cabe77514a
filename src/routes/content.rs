use actix_web::{web, HttpResponse};

use crate::content::{ContentClient, ContentError, OpenCallView};

#[tracing::instrument(name = "刊物列表", skip_all)]
pub async fn issues(content: web::Data<ContentClient>) -> Result<HttpResponse, ContentError> {
    let issues = content.issues().await?;
    Ok(HttpResponse::Ok().json(issues))
}

#[tracing::instrument(name = "单期刊物", skip(content))]
pub async fn issue(
    path: web::Path<u64>,
    content: web::Data<ContentClient>,
) -> Result<HttpResponse, ContentError> {
    let issue = content.issue(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(issue))
}

#[tracing::instrument(name = "活动列表", skip_all)]
pub async fn events(content: web::Data<ContentClient>) -> Result<HttpResponse, ContentError> {
    let events = content.events().await?;
    Ok(HttpResponse::Ok().json(events))
}

#[tracing::instrument(name = "文章列表", skip_all)]
pub async fn posts(content: web::Data<ContentClient>) -> Result<HttpResponse, ContentError> {
    let posts = content.posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(name = "页面", skip(content))]
pub async fn page(
    path: web::Path<String>,
    content: web::Data<ContentClient>,
) -> Result<HttpResponse, ContentError> {
    let page = content.page(&path).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(name = "open call页面", skip_all)]
pub async fn open_call(content: web::Data<ContentClient>) -> Result<HttpResponse, ContentError> {
    let open_call = content.open_call().await?;
    let is_expired = open_call.is_expired(chrono::Utc::now().naive_utc());

    Ok(HttpResponse::Ok().json(OpenCallView {
        open_call,
        is_expired,
    }))
}

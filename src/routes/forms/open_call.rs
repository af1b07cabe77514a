use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::{
    domain::{Attachment, AttachmentSet},
    forms::OpenCallForm,
    startup::FormSettings,
    submission::{FormApiClient, FormSession},
    util::e400,
};

use super::form_response;

#[derive(serde::Deserialize)]
pub struct UploadedFile {
    name: String,
    /// base64编码的文件内容
    content: String,
}

#[derive(serde::Deserialize)]
pub struct ApplicationData {
    #[serde(rename = "applicant-firstname", default)]
    first_name: String,
    #[serde(rename = "applicant-lastname", default)]
    last_name: String,
    #[serde(rename = "applicant-email", default)]
    email: String,
    #[serde(default)]
    files: Vec<UploadedFile>,
}

#[tracing::instrument(
    name = "open call投稿",
    skip_all,
    fields(email = %body.email, files = body.files.len())
)]
pub async fn submit_open_call(
    body: web::Json<ApplicationData>,
    form_api: web::Data<FormApiClient>,
    settings: web::Data<FormSettings>,
) -> Result<HttpResponse, actix_web::Error> {
    let ApplicationData {
        first_name,
        last_name,
        email,
        files,
    } = body.into_inner();

    let attachments = files
        .into_iter()
        .map(|file| -> Result<Attachment, actix_web::Error> {
            let bytes = STANDARD.decode(file.content.trim()).map_err(e400)?;
            Ok(Attachment::new(file.name, bytes))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut form = OpenCallForm::new(settings.open_call_form_id.clone(), settings.uploads);
    form.first_name = first_name;
    form.last_name = last_name;
    form.email = email;
    // 超出限制的整批文件原样保留，由提交时的规则拦下
    form.set_files(AttachmentSet::from_selection(attachments, &settings.uploads));

    let mut session = FormSession::new(form);
    let outcome = session.submit(form_api.get_ref()).await;

    Ok(form_response(outcome, &session))
}

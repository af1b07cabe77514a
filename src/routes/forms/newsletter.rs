use actix_web::{web, HttpResponse};

use crate::{
    forms::NewsletterForm,
    submission::{FormSession, MailingListClient},
};

use super::form_response;

#[derive(serde::Deserialize)]
pub struct NewsletterData {
    #[serde(rename = "FNAME", default)]
    first_name: String,
    #[serde(rename = "LNAME", default)]
    last_name: String,
    #[serde(rename = "EMAIL", default)]
    email: String,
}

#[tracing::instrument(
    name = "newsletter订阅",
    skip_all,
    fields(%form.email)
)]
pub async fn subscribe_newsletter(
    form: web::Form<NewsletterData>,
    mailing_list: web::Data<MailingListClient>,
) -> HttpResponse {
    let NewsletterData {
        first_name,
        last_name,
        email,
    } = form.into_inner();

    let mut session = FormSession::new(NewsletterForm::new(first_name, last_name, email));
    let outcome = session.submit(mailing_list.get_ref()).await;

    form_response(outcome, &session)
}

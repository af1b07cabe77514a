mod content;
mod forms;

pub use content::*;
pub use forms::*;

use actix_web::{HttpResponse, Responder};

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok()
}

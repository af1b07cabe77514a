mod newsletter;
mod open_call;
mod order;

pub use newsletter::*;
pub use open_call::*;
pub use order::*;

use actix_web::HttpResponse;

use crate::{
    forms::FormDefinition,
    submission::{DuplicateClassifier, FormSession, FormView, SubmitOutcome},
};

/// 本地校验未通过返回422，其余情况（包括服务端错误）都已在表单内处理，返回200
fn form_response<F, C>(outcome: SubmitOutcome, session: &FormSession<F, C>) -> HttpResponse
where
    F: FormDefinition + serde::Serialize,
    C: DuplicateClassifier,
{
    let view = FormView::from(session);
    match outcome {
        SubmitOutcome::Blocked => HttpResponse::UnprocessableEntity().json(view),
        SubmitOutcome::Completed | SubmitOutcome::Dropped | SubmitOutcome::InFlight => {
            HttpResponse::Ok().json(view)
        }
    }
}

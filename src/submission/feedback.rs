use std::collections::BTreeMap;

use crate::{
    domain::SubmissionStatus,
    forms::FormDefinition,
};

use super::{DuplicateClassifier, FormSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 真正的新提交
    Welcome,
    /// 重复订阅，提示已在名单中
    AlreadyRegistered,
}

/// 弹窗提示
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub heading: String,
    pub description: String,
}

impl Notification {
    pub fn welcome(heading: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Welcome,
            heading: heading.into(),
            description: description.into(),
        }
    }

    pub fn already_registered() -> Self {
        Self {
            kind: NotificationKind::AlreadyRegistered,
            heading: "Redan prenumerant".into(),
            description: "Den här e-postadressen finns redan i vårt register.".into(),
        }
    }
}

/// 表单当前状态的只读视图，供页面渲染
#[derive(Debug, serde::Serialize)]
pub struct FormView<'a, F> {
    pub status: SubmissionStatus,
    pub message: &'a str,
    pub duplicate: bool,
    pub notification: Option<&'a Notification>,
    pub inline_error: Option<&'a str>,
    pub field_errors: BTreeMap<&'static str, &'a str>,
    pub fields: &'a F,
}

impl<'a, F, C> From<&'a FormSession<F, C>> for FormView<'a, F>
where
    F: FormDefinition,
    C: DuplicateClassifier,
{
    fn from(session: &'a FormSession<F, C>) -> Self {
        let field_errors = session
            .form()
            .field_names()
            .iter()
            .filter_map(|name| session.field_error(name).map(|message| (*name, message)))
            .collect();

        Self {
            status: session.status(),
            message: session.message(),
            duplicate: session.is_duplicate(),
            notification: session.notification(),
            inline_error: session.inline_error(),
            field_errors,
            fields: session.form(),
        }
    }
}

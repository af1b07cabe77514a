use crate::submission::{FormId, Notification, Payload};

use super::{Check, FieldSource, FieldValue, FormDefinition, RuleSet};

pub const FIRST_NAME: &str = "FNAME";
pub const LAST_NAME: &str = "LNAME";
pub const EMAIL: &str = "EMAIL";

/// newsletter订阅表单，提交到邮件列表服务
#[derive(Debug, Clone, serde::Serialize)]
pub struct NewsletterForm {
    #[serde(skip)]
    form_id: FormId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewsletterForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            form_id: FormId::from("newsletter"),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

impl Default for NewsletterForm {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl FieldSource for NewsletterForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIRST_NAME => FieldValue::Text(&self.first_name),
            LAST_NAME => FieldValue::Text(&self.last_name),
            EMAIL => FieldValue::Text(&self.email),
            _ => FieldValue::Missing,
        }
    }
}

impl FormDefinition for NewsletterForm {
    fn form_id(&self) -> &FormId {
        &self.form_id
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[FIRST_NAME, LAST_NAME, EMAIL]
    }

    fn rules(&self) -> RuleSet {
        RuleSet::new()
            .rule(FIRST_NAME, Check::Required)
            .rule(LAST_NAME, Check::Required)
            .rule(EMAIL, Check::Required)
            .rule(EMAIL, Check::ContainsAt)
    }

    fn payload(&self) -> Payload {
        Payload::new()
            .text(FIRST_NAME, self.first_name.trim())
            .text(LAST_NAME, self.last_name.trim())
            .text(EMAIL, self.email.trim())
    }

    fn clear(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
    }

    fn success_notification(&self, _message: &str) -> Notification {
        Notification::welcome(
            "Välkommen!",
            "Tack för att du prenumererar på Rum för Dramatik.",
        )
    }
}

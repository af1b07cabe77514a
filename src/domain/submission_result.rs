/// 表单服务返回的状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    MailSent,
    ValidationFailed,
    MailFailed,
    Spam,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 表单服务的响应体
/// `invalid_fields`仅在`validation_failed`时出现
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct SubmissionResult {
    pub status: ResultStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub invalid_fields: Vec<FieldError>,
}

impl SubmissionResult {
    pub fn new(status: ResultStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            invalid_fields: Vec::new(),
        }
    }

    pub fn with_invalid_fields(mut self, invalid_fields: Vec<FieldError>) -> Self {
        self.invalid_fields = invalid_fields;
        self
    }
}

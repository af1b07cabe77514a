/// 表单实例的提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Sending => "sending",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Success | SubmissionStatus::Error)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

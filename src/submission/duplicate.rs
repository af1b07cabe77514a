use crate::domain::SubmissionStatus;

/// 判断一次提交结果是否意味着"已经登记过"
///
/// 表单服务对新订阅和重复订阅使用重叠的状态码，
/// 只能根据状态和消息文本区分。实现可替换，状态机不依赖具体判定方式。
pub trait DuplicateClassifier {
    fn is_duplicate(&self, status: SubmissionStatus, message: &str) -> bool;
}

/// 按固定短语做不区分大小写的子串匹配
#[derive(Debug, Clone, Copy, Default)]
pub struct PhraseClassifier;

impl PhraseClassifier {
    /// 成功路径：资料已更新即意味着记录早已存在
    pub const SUCCESS_PHRASES: &'static [&'static str] =
        &["already subscribed", "profile has been updated"];
    /// 错误路径：`redan prenumerant`是瑞典语的"已是订阅者"
    pub const ERROR_PHRASES: &'static [&'static str] = &["already subscribed", "redan prenumerant"];
}

impl DuplicateClassifier for PhraseClassifier {
    fn is_duplicate(&self, status: SubmissionStatus, message: &str) -> bool {
        let phrases = match status {
            SubmissionStatus::Success => Self::SUCCESS_PHRASES,
            SubmissionStatus::Error => Self::ERROR_PHRASES,
            SubmissionStatus::Idle | SubmissionStatus::Sending => return false,
        };
        let message = message.to_lowercase();
        phrases.iter().any(|phrase| message.contains(phrase))
    }
}

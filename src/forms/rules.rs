use crate::domain::{
    too_large_message, too_many_files_message, AttachmentSet, EmailAddress, FieldError,
    PersonName,
};

/// 表单字段的当前值
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
    Files(&'a AttachmentSet),
    Missing,
}

pub trait FieldSource {
    fn value(&self, field: &str) -> FieldValue<'_>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Required,
    /// 宽松的邮箱校验，只要求包含`@`
    ContainsAt,
    /// 完整的邮箱格式校验
    EmailPattern,
    Name,
    Checked,
    AtLeast(u32),
    HasFiles,
    MaxFiles(usize),
    MaxTotalBytes(u64),
    AllowedExtensions,
}

impl Check {
    fn passes(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Check::Required, FieldValue::Text(s)) => !s.trim().is_empty(),
            (Check::Required, FieldValue::Flag(checked)) => *checked,
            (Check::Required, FieldValue::Files(files)) => !files.is_empty(),
            (Check::ContainsAt, FieldValue::Text(s)) => EmailAddress::looks_like_email(s),
            (Check::EmailPattern, FieldValue::Text(s)) => EmailAddress::parse(s).is_ok(),
            (Check::Name, FieldValue::Text(s)) => PersonName::parse(s).is_ok(),
            (Check::Checked, FieldValue::Flag(checked)) => *checked,
            (Check::AtLeast(min), FieldValue::Text(s)) => {
                s.trim().parse::<u32>().is_ok_and(|n| n >= *min)
            }
            (Check::HasFiles, FieldValue::Files(files)) => !files.is_empty(),
            (Check::MaxFiles(max), FieldValue::Files(files)) => files.len() <= *max,
            (Check::MaxTotalBytes(max), FieldValue::Files(files)) => files.total_bytes() <= *max,
            (Check::AllowedExtensions, FieldValue::Files(files)) => {
                files.iter().all(|f| f.has_allowed_extension())
            }
            // 文件相关的限制对缺失的字段不适用
            (Check::MaxFiles(_) | Check::MaxTotalBytes(_) | Check::AllowedExtensions, _) => true,
            _ => false,
        }
    }

    pub fn default_message(&self) -> String {
        match self {
            Check::Required => "Fältet är obligatoriskt.".into(),
            Check::ContainsAt | Check::EmailPattern => "Ange en giltig e-postadress.".into(),
            Check::Name => "Ange ett giltigt namn.".into(),
            Check::Checked => "Du måste godkänna villkoren.".into(),
            Check::AtLeast(min) => format!("Ange ett antal på minst {min}."),
            Check::HasFiles => "Du måste bifoga minst en fil.".into(),
            Check::MaxFiles(max) => too_many_files_message(*max),
            Check::MaxTotalBytes(max) => too_large_message(*max),
            Check::AllowedExtensions => "Filen måste vara PDF, DOC eller DOCX.".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rule {
    field: &'static str,
    check: Check,
    message: Option<String>,
}

impl Rule {
    fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.check.default_message())
    }
}

/// 每个表单的声明式校验规则
/// 同一字段按声明顺序检查，只报告第一条失败的规则
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, field: &'static str, check: Check) -> Self {
        self.rules.push(Rule {
            field,
            check,
            message: None,
        });
        self
    }

    pub fn rule_with_message(
        mut self,
        field: &'static str,
        check: Check,
        message: impl Into<String>,
    ) -> Self {
        self.rules.push(Rule {
            field,
            check,
            message: Some(message.into()),
        });
        self
    }

    pub fn evaluate(&self, source: &impl FieldSource) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = Vec::new();
        for rule in &self.rules {
            if errors.iter().any(|e| e.field == rule.field) {
                continue;
            }
            if !rule.check.passes(&source.value(rule.field)) {
                errors.push(FieldError::new(rule.field, rule.message()));
            }
        }
        errors
    }
}

use validator::ValidateEmail;

#[derive(Debug, Clone)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(s: &str) -> Result<EmailAddress, String> {
        let s = s.trim();
        if s.validate_email() {
            Ok(Self(s.into()))
        } else {
            tracing::debug!("`{s}` is not a valid email address.");
            Err(format!("`{s}` is not a valid email address."))
        }
    }

    /// 宽松校验，只要求包含`@`
    pub fn looks_like_email(s: &str) -> bool {
        s.contains('@')
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

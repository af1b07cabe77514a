use unicode_segmentation::UnicodeSegmentation;

const MAX_GRAPHEMES: usize = 256;

#[derive(Debug, Clone)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(s: &str) -> Result<PersonName, String> {
        let trimmed = s.trim();
        let is_empty = trimmed.is_empty();
        let is_too_long = trimmed.graphemes(true).count() > MAX_GRAPHEMES;

        if is_empty || is_too_long {
            return Err(format!("`{s}` is not a valid name."));
        }
        Ok(Self(trimmed.into()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use reqwest::multipart;

use crate::domain::Attachment;

/// 一次提交的表单数据：有序的文本字段和零个或多个文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    texts: Vec<(String, String)>,
    files: Vec<(String, Attachment)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.texts.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, name: impl Into<String>, attachment: Attachment) -> Self {
        self.files.push((name.into(), attachment));
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.texts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.texts()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &Attachment)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 构造`multipart/form-data`请求体，文本字段在前
    pub fn to_multipart(&self) -> reqwest::Result<multipart::Form> {
        let mut form = multipart::Form::new();
        for (name, value) in self.texts() {
            form = form.text(name.to_owned(), value.to_owned());
        }
        for (name, attachment) in self.files() {
            let part = multipart::Part::bytes(attachment.bytes().to_vec())
                .file_name(attachment.name().to_owned())
                .mime_str(attachment.content_type())?;
            form = form.part(name.to_owned(), part);
        }
        Ok(form)
    }
}

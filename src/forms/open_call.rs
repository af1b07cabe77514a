use crate::{
    domain::{Attachment, AttachmentSet, UploadLimits},
    submission::{FormId, Notification, Payload},
};

use super::{Check, FieldSource, FieldValue, FormDefinition, RuleSet};

pub const FIRST_NAME: &str = "applicant-firstname";
pub const LAST_NAME: &str = "applicant-lastname";
pub const EMAIL: &str = "applicant-email";
pub const FILES: &str = "files";

const UNIT_TAG: &str = "headless-form";

fn serialize_file_names<S: serde::Serializer>(
    files: &AttachmentSet,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(files.names())
}

/// open call投稿表单，附带1到3个文件
#[derive(Debug, Clone, serde::Serialize)]
pub struct OpenCallForm {
    #[serde(skip)]
    form_id: FormId,
    #[serde(skip)]
    limits: UploadLimits,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_file_names")]
    files: AttachmentSet,
}

impl OpenCallForm {
    pub fn new(form_id: FormId, limits: UploadLimits) -> Self {
        Self {
            form_id,
            limits,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            files: AttachmentSet::new(),
        }
    }

    /// 选择文件：整批超出限制时全部拒绝，并返回提示
    pub fn select_files(
        &mut self,
        incoming: impl IntoIterator<Item = Attachment>,
    ) -> Result<(), String> {
        self.files.add(incoming, &self.limits)
    }

    /// 直接替换全部附件，限制留到提交时检查
    pub fn set_files(&mut self, files: AttachmentSet) {
        self.files = files;
    }

    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        self.files.remove(index)
    }

    pub fn files(&self) -> &AttachmentSet {
        &self.files
    }
}

impl FieldSource for OpenCallForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIRST_NAME => FieldValue::Text(&self.first_name),
            LAST_NAME => FieldValue::Text(&self.last_name),
            EMAIL => FieldValue::Text(&self.email),
            FILES => FieldValue::Files(&self.files),
            _ => FieldValue::Missing,
        }
    }
}

impl FormDefinition for OpenCallForm {
    fn form_id(&self) -> &FormId {
        &self.form_id
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[FIRST_NAME, LAST_NAME, EMAIL, FILES]
    }

    fn rules(&self) -> RuleSet {
        RuleSet::new()
            .rule(FIRST_NAME, Check::Required)
            .rule(FIRST_NAME, Check::Name)
            .rule(LAST_NAME, Check::Required)
            .rule(LAST_NAME, Check::Name)
            .rule(EMAIL, Check::Required)
            .rule(EMAIL, Check::ContainsAt)
            .rule(FILES, Check::HasFiles)
            .rule(FILES, Check::MaxFiles(self.limits.max_files))
            .rule(FILES, Check::MaxTotalBytes(self.limits.max_total_bytes))
            .rule(FILES, Check::AllowedExtensions)
    }

    fn payload(&self) -> Payload {
        let payload = Payload::new()
            .text(FIRST_NAME, self.first_name.trim())
            .text(LAST_NAME, self.last_name.trim())
            .text(EMAIL, self.email.trim())
            .text("_wpcf7_unit_tag", UNIT_TAG);

        self.files
            .iter()
            .enumerate()
            .fold(payload, |payload, (index, file)| {
                payload.file(format!("file-{}", index + 1), file.clone())
            })
    }

    fn clear(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.files.clear();
    }

    fn success_notification(&self, message: &str) -> Notification {
        Notification::welcome("Tack för din ansökan!", message)
    }

    /// 服务端按`file-N`报告附件错误
    fn local_field(&self, server_field: &str) -> Option<&'static str> {
        if server_field.starts_with("file-") {
            return Some(FILES);
        }
        self.field_names()
            .iter()
            .copied()
            .find(|name| *name == server_field)
    }
}

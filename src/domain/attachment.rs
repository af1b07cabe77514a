use serde_aux::field_attributes::deserialize_number_from_string;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// 上传数量与总大小的限制
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct UploadLimits {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_files: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_total_bytes: u64,
}

pub fn too_many_files_message(max_files: usize) -> String {
    format!("Du kan max ladda upp {max_files} filer totalt.")
}

pub fn too_large_message(max_total_bytes: u64) -> String {
    format!(
        "Total filstorlek är för stor! (Max {}MB)",
        max_total_bytes / (1024 * 1024)
    )
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_files: 3,
            max_total_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// 根据扩展名推断MIME类型
    pub fn content_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            _ => "application/octet-stream",
        }
    }

    fn same_file(&self, other: &Attachment) -> bool {
        self.name == other.name && self.size() == other.size()
    }
}

/// 已选择的附件，按(文件名, 大小)去重
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    files: Vec<Attachment>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 不做数量和大小检查，只去重
    pub fn from_files(files: impl IntoIterator<Item = Attachment>) -> Self {
        let mut set = Self::new();
        for file in files {
            set.push_unique(file);
        }
        set
    }

    /// 选择文件时的检查：整批超出限制则全部拒绝
    pub fn add(
        &mut self,
        incoming: impl IntoIterator<Item = Attachment>,
        limits: &UploadLimits,
    ) -> Result<(), String> {
        let incoming: Vec<Attachment> = incoming.into_iter().collect();
        self.check(&incoming, limits)?;

        for file in incoming {
            self.push_unique(file);
        }
        Ok(())
    }

    /// 一次性接收整批文件：数量和大小按去重前的完整列表检查，
    /// 超出限制时原样保留，交给提交时的规则报告，否则去重
    pub fn from_selection(
        files: impl IntoIterator<Item = Attachment>,
        limits: &UploadLimits,
    ) -> Self {
        let files: Vec<Attachment> = files.into_iter().collect();
        match Self::new().check(&files, limits) {
            Ok(()) => Self::from_files(files),
            Err(_) => Self { files },
        }
    }

    fn check(&self, incoming: &[Attachment], limits: &UploadLimits) -> Result<(), String> {
        if self.files.len() + incoming.len() > limits.max_files {
            return Err(too_many_files_message(limits.max_files));
        }
        let total_size = self.total_bytes() + incoming.iter().map(Attachment::size).sum::<u64>();
        if total_size > limits.max_total_bytes {
            return Err(too_large_message(limits.max_total_bytes));
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Attachment> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(Attachment::size).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(Attachment::name).collect()
    }

    fn push_unique(&mut self, file: Attachment) {
        if !self.files.iter().any(|f| f.same_file(&file)) {
            self.files.push(file);
        }
    }
}

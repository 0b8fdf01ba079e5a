//! Upload Commands

/// 待保存的上传文件
#[derive(Clone)]
pub struct Upload {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for Upload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("size", &self.data.len())
            .finish()
    }
}

/// 保存上传文件命令
#[derive(Debug, Clone)]
pub struct StoreUpload {
    pub upload: Upload,
}

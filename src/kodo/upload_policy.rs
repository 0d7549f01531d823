use crate::{credential::Credential, utils::deadline_after};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 上传策略
///
/// 参考[上传策略文档](https://developer.qiniu.com/kodo/manual/1206/put-policy)
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadPolicy {
    scope: String,
    deadline: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    insert_only: Option<u8>,
}

impl UploadPolicy {
    /// 允许上传到存储空间中的任意对象，对象已存在时上传失败（614）
    pub fn new_for_bucket(bucket: impl Into<String>, lifetime: Duration) -> Self {
        Self::new(bucket.into(), lifetime)
    }

    /// 只允许上传指定对象，对象已存在时将被覆盖
    pub fn new_for_object(bucket: impl AsRef<str>, key: impl AsRef<str>, lifetime: Duration) -> Self {
        Self::new(format!("{}:{}", bucket.as_ref(), key.as_ref()), lifetime)
    }

    fn new(scope: String, lifetime: Duration) -> Self {
        Self {
            scope,
            deadline: deadline_after(lifetime).as_secs(),
            insert_only: None,
        }
    }

    /// 仅允许新增对象，不允许覆盖
    pub fn insert_only(mut self) -> Self {
        self.insert_only = Some(1);
        self
    }

    fn as_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// 签发上传凭证
    pub fn to_upload_token(&self, credential: &Credential) -> String {
        credential.sign_with_data(self.as_json().as_bytes())
    }
}

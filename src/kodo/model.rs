use crate::utils::put_time_to_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 对象信息
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub fsize: u64,
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    pub mime_type: String,
    /// 上传时间，单位为 100 纳秒
    #[serde(default, rename = "putTime", alias = "put_time")]
    pub put_time: u64,
    /// 存储类型，0 为标准存储，1 为低频存储，2 为归档存储，3 为深度归档存储
    #[serde(default, rename = "type")]
    pub file_type: u8,
}

impl FileInfo {
    #[inline]
    pub fn put_time_as_datetime(&self) -> DateTime<Utc> {
        put_time_to_datetime(self.put_time)
    }
}

/// 对象列举结果
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default, rename = "commonPrefixes")]
    pub common_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub items: Vec<FileInfo>,
}

impl FileListing {
    /// 是否还有更多对象
    #[inline]
    pub fn has_more(&self) -> bool {
        self.marker.as_deref().map_or(false, |marker| !marker.is_empty())
    }
}

/// 存储空间信息，`private` 为 1 表示私有空间，`no_index_page` 为 0 表示开启默认首页
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct BucketInfo {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub private: i32,
    #[serde(default)]
    pub no_index_page: i32,
}

/// 存储空间访问控制
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AclType {
    Public,
    Private,
}

impl AclType {
    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            AclType::Public => 0,
            AclType::Private => 1,
        }
    }
}

/// 存储空间默认首页
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IndexPageType {
    Has,
    No,
}

impl IndexPageType {
    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            IndexPageType::Has => 0,
            IndexPageType::No => 1,
        }
    }
}

/// 批量操作中单个操作的结果
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchOpResult {
    pub code: u16,
    #[serde(default)]
    pub data: Option<Value>,
}

impl BatchOpResult {
    /// 200 为成功，298 为部分成功
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.code, 200 | 298)
    }

    pub fn error(&self) -> Option<&str> {
        self.data.as_ref()?.get("error")?.as_str()
    }
}

/// 表单上传的响应
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PutRet {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub key: String,
}

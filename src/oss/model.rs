use crate::http_client::ResponseBody;
use chrono::{DateTime, Utc};
use std::{collections::BTreeMap, fmt};

/// 存储空间
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Bucket {
    pub name: String,
    /// 区域 ID
    pub location: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub storage_class: Option<StorageClass>,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// 存储空间列举结果
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BucketList {
    pub buckets: Vec<Bucket>,
    pub prefix: Option<String>,
    pub marker: Option<String>,
    pub max_keys: Option<usize>,
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ListBucketsRequest {
    pub prefix: Option<String>,
    /// 只返回名称大于 `marker` 的存储空间
    pub marker: Option<String>,
    pub max_keys: Option<usize>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CreateBucketRequest {
    pub bucket_name: String,
    pub storage_class: StorageClass,
    pub canned_acl: Option<CannedAccessControlList>,
}

impl CreateBucketRequest {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            storage_class: StorageClass::Standard,
            canned_acl: None,
        }
    }

    pub fn storage_class(mut self, storage_class: StorageClass) -> Self {
        self.storage_class = storage_class;
        self
    }

    pub fn canned_acl(mut self, canned_acl: CannedAccessControlList) -> Self {
        self.canned_acl = Some(canned_acl);
        self
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BucketInfo {
    pub bucket: Bucket,
    pub canned_acl: CannedAccessControlList,
}

/// 预设访问控制
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CannedAccessControlList {
    Default,
    Private,
    PublicRead,
    PublicReadWrite,
}

impl CannedAccessControlList {
    pub fn as_str(self) -> &'static str {
        match self {
            CannedAccessControlList::Default => "default",
            CannedAccessControlList::Private => "private",
            CannedAccessControlList::PublicRead => "public-read",
            CannedAccessControlList::PublicReadWrite => "public-read-write",
        }
    }
}

impl fmt::Display for CannedAccessControlList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AccessControlList {
    pub canned_acl: CannedAccessControlList,
}

/// 存储类型
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StorageClass {
    Standard,
    IA,
    Archive,
    ColdArchive,
}

impl StorageClass {
    /// 转换七牛的存储类型，0 为标准存储，1 为低频存储，2 为归档存储，3 为深度归档存储
    pub fn from_kodo_type(file_type: u8) -> Self {
        match file_type {
            1 => StorageClass::IA,
            2 => StorageClass::Archive,
            3 => StorageClass::ColdArchive,
            _ => StorageClass::Standard,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StorageClass::Standard => "Standard",
            StorageClass::IA => "IA",
            StorageClass::Archive => "Archive",
            StorageClass::ColdArchive => "ColdArchive",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通用请求，只包含存储空间与对象名称
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GenericRequest {
    pub bucket_name: String,
    pub key: Option<String>,
}

impl GenericRequest {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            key: None,
        }
    }

    pub fn with_key(bucket_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            key: Some(key.into()),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ListObjectsRequest {
    pub bucket_name: String,
    pub prefix: Option<String>,
    pub marker: Option<String>,
    pub delimiter: Option<String>,
    pub max_keys: Option<usize>,
}

impl ListObjectsRequest {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = Some(max_keys);
        self
    }
}

/// 对象列举结果
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ObjectListing {
    pub bucket_name: String,
    pub object_summaries: Vec<ObjectSummary>,
    pub common_prefixes: Vec<String>,
    pub prefix: Option<String>,
    pub marker: Option<String>,
    pub delimiter: Option<String>,
    pub max_keys: Option<usize>,
    pub is_truncated: bool,
    pub next_marker: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ObjectSummary {
    pub bucket_name: String,
    pub key: String,
    pub etag: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub storage_class: StorageClass,
}

/// 对象元数据
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub storage_class: Option<StorageClass>,
    /// 用户自定义元数据，名称不含 `x-qn-meta-` 前缀
    pub user_metadata: BTreeMap<String, String>,
}

impl ObjectMetadata {
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn user_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_metadata.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SimplifiedObjectMeta {
    pub etag: String,
    pub size: u64,
    pub content_type: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// 下载得到的对象，`content` 为尚未读取的响应体
pub struct OssObject {
    pub bucket_name: String,
    pub key: String,
    pub metadata: ObjectMetadata,
    pub content: ResponseBody,
}

impl fmt::Debug for OssObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("OssObject")
            .field("bucket_name", &self.bucket_name)
            .field("key", &self.key)
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GetObjectRequest {
    pub bucket_name: String,
    pub key: String,
}

impl GetObjectRequest {
    pub fn new(bucket_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PutObjectResult {
    pub etag: String,
    pub request_id: Option<String>,
    pub callback_response_body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CopyObjectRequest {
    pub source_bucket_name: String,
    pub source_key: String,
    pub destination_bucket_name: String,
    pub destination_key: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CopyObjectResult {
    pub etag: String,
    pub last_modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DeleteObjectsRequest {
    pub bucket_name: String,
    pub keys: Vec<String>,
    /// 静默模式下不返回已删除的对象
    pub quiet: bool,
}

impl DeleteObjectsRequest {
    pub fn new(bucket_name: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            keys,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DeleteObjectsResult {
    pub deleted_objects: Vec<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Options,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneratePresignedUrlRequest {
    pub bucket_name: String,
    pub key: String,
    pub expiration: DateTime<Utc>,
    pub method: HttpMethod,
}

impl GeneratePresignedUrlRequest {
    pub fn new(bucket_name: impl Into<String>, key: impl Into<String>, expiration: DateTime<Utc>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            key: key.into(),
            expiration,
            method: HttpMethod::Get,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SetBucketAclRequest {
    pub bucket_name: String,
    pub canned_acl: CannedAccessControlList,
}

/// 静态网站设置，七牛只支持 `index.html` 与 `error-404` 的组合
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SetBucketWebsiteRequest {
    pub bucket_name: String,
    pub index_document: Option<String>,
    pub error_document: Option<String>,
}

impl SetBucketWebsiteRequest {
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    pub fn index_document(mut self, index_document: impl Into<String>) -> Self {
        self.index_document = Some(index_document.into());
        self
    }

    pub fn error_document(mut self, error_document: impl Into<String>) -> Self {
        self.error_document = Some(error_document.into());
        self
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BucketWebsiteResult {
    pub index_document: String,
    pub error_document: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PartETag {
    pub part_number: u32,
    pub etag: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MultipartUpload {
    pub key: String,
    pub upload_id: String,
    pub initiated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CorsRule {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age_seconds: Option<u32>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LifecycleRule {
    pub id: String,
    pub prefix: String,
    pub enabled: bool,
    pub expiration_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReplicationRule {
    pub id: String,
    pub target_bucket_name: String,
    pub target_location: String,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BucketLoggingResult {
    pub target_bucket: Option<String>,
    pub target_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BucketReferer {
    pub allow_empty_referer: bool,
    pub referer_list: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_class_from_kodo_type() {
        assert_eq!(StorageClass::from_kodo_type(0), StorageClass::Standard);
        assert_eq!(StorageClass::from_kodo_type(1), StorageClass::IA);
        assert_eq!(StorageClass::from_kodo_type(2), StorageClass::Archive);
        assert_eq!(StorageClass::from_kodo_type(3), StorageClass::ColdArchive);
        assert_eq!(StorageClass::from_kodo_type(9), StorageClass::Standard);
        assert_eq!(StorageClass::IA.to_string(), "IA");
    }

    #[test]
    fn test_request_builders() {
        let request = ListObjectsRequest::new("bucket").prefix("dir/").delimiter("/").max_keys(10);
        assert_eq!(request.prefix.as_deref(), Some("dir/"));
        assert_eq!(request.marker, None);
        assert_eq!(request.max_keys, Some(10));

        let request = CreateBucketRequest::new("bucket").canned_acl(CannedAccessControlList::Private);
        assert_eq!(request.storage_class, StorageClass::Standard);
        assert_eq!(request.canned_acl, Some(CannedAccessControlList::Private));

        assert_eq!(GenericRequest::new("bucket").key(), "");
        assert_eq!(GenericRequest::with_key("bucket", "key").key(), "key");
    }
}

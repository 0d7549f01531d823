//! 七牛对象存储接口
//!
//! 提供存储空间管理、对象管理与表单上传，是 OSS 兼容层的底层实现

mod bucket_manager;
pub(crate) mod client;
mod error;
mod model;
pub(crate) mod regions;
mod upload_manager;
mod upload_policy;

pub use bucket_manager::BucketManager;
pub use error::{KodoError, KodoErrorKind, KodoResult};
pub use model::{AclType, BatchOpResult, BucketInfo, FileInfo, FileListing, IndexPageType, PutRet};
pub use upload_manager::{PutResponse, UploadManager, UploadOptions};
pub use upload_policy::UploadPolicy;

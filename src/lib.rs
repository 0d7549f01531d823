#![deny(
    large_assignments,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    non_ascii_idents,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]

//! # qiniu-oss
//!
//! ## 基于七牛对象存储的阿里云 OSS 兼容客户端
//!
//! 面向 `Oss` 接口编写的代码可以不做修改地访问七牛存储空间。
//! 七牛不提供的 OSS 能力将返回 `Error::Unsupported`。
//!
//! ```no_run
//! use qiniu_oss::{region::Region, Config, Oss, QiniuOssClient};
//!
//! # fn main() -> qiniu_oss::Result<()> {
//! let config = Config::builder().region(Region::z0().to_owned()).build();
//! let client = QiniuOssClient::new("access-key", "secret-key", config)?;
//! for bucket in client.list_buckets()? {
//!     println!("{}", bucket.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
pub mod config;
pub mod credential;
mod error;
pub mod http_client;
pub mod kodo;
pub mod oss;
pub mod region;
mod util;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use client::{QiniuOssClient, QiniuOssClientBuilder};
pub use config::{Config, ConfigBuilder};
pub use credential::Credential;
pub use error::{ClientError, Error, OssError, Result};
pub use oss::Oss;
pub use util::{OssServiceError, OssServiceResult, QiniuOssUtil};

//! 工具函数

pub mod base64;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::{
    env::consts::{ARCH, OS},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// 获取 HTTP 请求的 UserAgent
pub fn user_agent() -> &'static str {
    static USER_AGENT: Lazy<String> =
        Lazy::new(|| format!("QiniuOss/{} ({}; {}) Rust", env!("CARGO_PKG_VERSION"), OS, ARCH));
    USER_AGENT.as_str()
}

/// 将存储空间和对象名称编码为七牛 API 使用的 EncodedEntryURI
pub fn encode_entry(bucket: &str, key: &str) -> String {
    base64::urlsafe(format!("{}:{}", bucket, key).as_bytes())
}

/// 对对象名称进行百分号编码，除字母数字和 `-_.~` 外的字符都将被编码
pub fn encode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).to_string()
}

/// 为没有协议的主机地址补齐协议
pub fn endpoint(host: &str, use_https: bool) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_owned()
    } else if use_https {
        format!("https://{}", host.trim_end_matches('/'))
    } else {
        format!("http://{}", host.trim_end_matches('/'))
    }
}

/// 七牛的 putTime 以 100 纳秒为单位
pub fn put_time_to_datetime(put_time: u64) -> DateTime<Utc> {
    DateTime::from(UNIX_EPOCH + Duration::from_nanos(put_time.saturating_mul(100)))
}

pub(crate) fn deadline_after(lifetime: Duration) -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .saturating_add(lifetime)
}

pub(crate) fn deadline_at(expiration: DateTime<Utc>) -> Duration {
    Duration::from_secs(expiration.timestamp().max(0) as u64)
}

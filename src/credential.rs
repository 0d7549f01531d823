//! 七牛认证信息与签名
//!
//! 管理凭证、上传凭证与私有下载地址都基于 HMAC-SHA1 签名

use crate::utils::base64;
use hmac::{Hmac, Mac};
use http::HeaderValue;
use mime::APPLICATION_WWW_FORM_URLENCODED;
use sha1::Sha1;
use std::{
    env,
    fmt,
    io::{Error, ErrorKind, Result},
    time::Duration,
};
use url::Url;

/// 七牛 AccessKey 的环境变量
pub const QINIU_ACCESS_KEY_ENV_KEY: &str = "QINIU_ACCESS_KEY";
/// 七牛 SecretKey 的环境变量
pub const QINIU_SECRET_KEY_ENV_KEY: &str = "QINIU_SECRET_KEY";

/// 七牛认证信息
#[derive(Clone, Eq, PartialEq)]
pub struct Credential {
    access_key: String,
    secret_key: String,
}

impl Credential {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    #[inline]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// 返回 `AccessKey:EncodedSign`
    pub fn sign(&self, data: &[u8]) -> String {
        let mut mac = match Hmac::<Sha1>::new_from_slice(self.secret_key.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => unreachable!("HMAC accepts keys of any length"),
        };
        mac.update(data);
        format!("{}:{}", self.access_key, base64::urlsafe(&mac.finalize().into_bytes()))
    }

    /// 返回 `AccessKey:EncodedSign:EncodedData`，用于上传凭证
    pub fn sign_with_data(&self, data: &[u8]) -> String {
        let encoded = base64::urlsafe(data);
        let signature = self.sign(encoded.as_bytes());
        format!("{}:{}", signature, encoded)
    }

    /// 生成管理凭证，请求体仅在表单格式时参与签名
    pub fn authorization(&self, url: &Url, content_type: Option<&HeaderValue>, body: &[u8]) -> String {
        let mut signing = url.path().as_bytes().to_vec();
        if let Some(query) = url.query().filter(|query| !query.is_empty()) {
            signing.push(b'?');
            signing.extend_from_slice(query.as_bytes());
        }
        signing.push(b'\n');
        let is_form = content_type.map_or(false, |content_type| {
            content_type.as_bytes() == APPLICATION_WWW_FORM_URLENCODED.as_ref().as_bytes()
        });
        if is_form {
            signing.extend_from_slice(body);
        }
        format!("QBox {}", self.sign(&signing))
    }

    /// 为下载地址追加 `e` 与 `token` 参数，`deadline` 为过期的 UNIX 时间
    pub fn sign_download_url(&self, url: &mut Url, deadline: Duration) {
        url.query_pairs_mut()
            .append_pair("e", &deadline.as_secs().to_string());
        let token = self.sign(url.as_str().as_bytes());
        url.query_pairs_mut().append_pair("token", &token);
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_key", &self.access_key)
            .finish_non_exhaustive()
    }
}

/// 认证信息提供者
///
/// `QiniuOssClient` 切换认证信息时会整体替换提供者
pub trait CredentialProvider: fmt::Debug + Send + Sync {
    fn get(&self) -> Result<Credential>;
}

/// 固定的认证信息
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StaticCredentialProvider(Credential);

impl StaticCredentialProvider {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self(Credential::new(access_key, secret_key))
    }
}

impl From<Credential> for StaticCredentialProvider {
    #[inline]
    fn from(credential: Credential) -> Self {
        Self(credential)
    }
}

impl CredentialProvider for StaticCredentialProvider {
    #[inline]
    fn get(&self) -> Result<Credential> {
        Ok(self.0.to_owned())
    }
}

/// 每次从 `QINIU_ACCESS_KEY` 与 `QINIU_SECRET_KEY` 环境变量读取认证信息
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct EnvCredentialProvider;

impl CredentialProvider for EnvCredentialProvider {
    fn get(&self) -> Result<Credential> {
        let read = |name: &str| {
            env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("environment variable {} is not set", name)))
        };
        Ok(Credential::new(
            read(QINIU_ACCESS_KEY_ENV_KEY)?,
            read(QINIU_SECRET_KEY_ENV_KEY)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::encode_entry;
    use anyhow::Result;

    fn credential() -> Credential {
        Credential::new("abcdefghklmnopq", "1234567890")
    }

    fn form() -> HeaderValue {
        HeaderValue::from_static("application/x-www-form-urlencoded")
    }

    #[test]
    fn test_sign() {
        assert_eq!(credential().sign(b"hello"), "abcdefghklmnopq:b84KVc-LroDiz0ebUANfdzSRxa0=");
        assert_eq!(credential().sign(b""), credential().sign(b""));
        assert_ne!(credential().sign(b"hello"), Credential::new("abcdefghklmnopq", "other").sign(b"hello"));
    }

    #[test]
    fn test_upload_token_layout() -> Result<()> {
        let policy = br#"{"scope":"test-bucket","deadline":1893456000}"#;
        let token = credential().sign_with_data(policy);
        let mut parts = token.splitn(3, ':');
        assert_eq!(parts.next(), Some("abcdefghklmnopq"));
        let signature = parts.next().unwrap_or_default().to_owned();
        let encoded = parts.next().unwrap_or_default();
        assert_eq!(base64::decode(encoded.as_bytes())?, policy.to_vec());
        assert_eq!(credential().sign(encoded.as_bytes()), format!("abcdefghklmnopq:{}", signature));
        Ok(())
    }

    #[test]
    fn test_authorization_for_batch_delete() -> Result<()> {
        let url = Url::parse("http://fakers.example.com/batch")?;
        let body = format!("op=%2Fdelete%2F{}", encode_entry("test-bucket", "a.txt"));
        assert_eq!(
            credential().authorization(&url, Some(&form()), body.as_bytes()),
            format!("QBox {}", credential().sign(format!("/batch\n{}", body).as_bytes()))
        );
        Ok(())
    }

    #[test]
    fn test_authorization_without_body() -> Result<()> {
        let url = Url::parse("http://fakeuc.example.com/mkbucketv3/new-bucket/region/z0")?;
        assert_eq!(
            credential().authorization(&url, None, b""),
            format!("QBox {}", credential().sign(b"/mkbucketv3/new-bucket/region/z0\n"))
        );

        let url = Url::parse("http://fakeapi.example.com/v6/domain/list?tbl=test-bucket")?;
        assert_eq!(
            credential().authorization(&url, None, b""),
            format!("QBox {}", credential().sign(b"/v6/domain/list?tbl=test-bucket\n"))
        );
        Ok(())
    }

    #[test]
    fn test_authorization_ignores_multipart_body() -> Result<()> {
        let url = Url::parse("http://fakeup.example.com/")?;
        let multipart = HeaderValue::from_static("multipart/form-data; boundary=abc");
        assert_eq!(
            credential().authorization(&url, Some(&multipart), b"--abc\r\n"),
            format!("QBox {}", credential().sign(b"/\n"))
        );
        Ok(())
    }

    #[test]
    fn test_sign_download_url() -> Result<()> {
        let mut url = Url::parse("http://cdn.example.com/dir%2Fa.txt")?;
        credential().sign_download_url(&mut url, Duration::from_secs(1_893_456_000));
        let expected_token = credential().sign(b"http://cdn.example.com/dir%2Fa.txt?e=1893456000");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("e".to_owned(), "1893456000".to_owned()),
                ("token".to_owned(), expected_token),
            ]
        );
        assert_eq!(url.path(), "/dir%2Fa.txt");
        Ok(())
    }

    #[test]
    fn test_providers() -> Result<()> {
        let provider: &dyn CredentialProvider = &StaticCredentialProvider::from(credential());
        assert_eq!(provider.get()?, credential());
        assert!(!format!("{:?}", provider).contains("1234567890"));

        env::set_var(QINIU_ACCESS_KEY_ENV_KEY, "env-ak");
        env::set_var(QINIU_SECRET_KEY_ENV_KEY, "env-sk");
        let credential = EnvCredentialProvider.get()?;
        assert_eq!(credential.access_key(), "env-ak");
        env::set_var(QINIU_SECRET_KEY_ENV_KEY, "");
        assert_eq!(EnvCredentialProvider.get().unwrap_err().kind(), ErrorKind::NotFound);
        Ok(())
    }
}

//! OSS 兼容层的错误类型

use crate::kodo::KodoError;
use std::{error::Error as StdError, fmt, result::Result as StdResult};
use thiserror::Error;

/// OSS 服务端错误
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct OssError {
    /// 错误码，来自七牛时为 HTTP 状态码
    pub error_code: String,
    pub message: String,
    pub request_id: Option<String>,
    pub host_id: Option<String>,
    pub method: Option<String>,
    /// 原始错误响应
    pub raw_response_error: Option<String>,
}

impl OssError {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for OssError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code, self.message)?;
        if let Some(request_id) = &self.request_id {
            write!(f, ", RequestId: {}", request_id)?;
        }
        if let Some(host_id) = &self.host_id {
            write!(f, ", HostId: {}", host_id)?;
        }
        Ok(())
    }
}

/// 客户端错误，请求没有到达服务端或响应无法处理
#[derive(Debug, Error)]
#[error("[{error_code}] {message}")]
pub struct ClientError {
    pub error_code: String,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_code: "-1".to_owned(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            error_code: "-1".to_owned(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// OSS 兼容层错误
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("oss error: {0}")]
    Oss(OssError),

    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// 七牛不支持的 OSS 操作
    #[error("QiniuOSSClient do not support all oss's method: {operation}")]
    Unsupported { operation: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl StdError for OssError {}

impl Error {
    #[inline]
    pub fn unsupported(operation: &'static str) -> Self {
        Error::Unsupported { operation }
    }

    #[inline]
    pub fn oss(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Oss(OssError::new(error_code, message))
    }

    #[inline]
    pub fn client(message: impl Into<String>) -> Self {
        Error::Client(ClientError::new(message))
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }

    /// 错误码，不支持的操作与参数错误没有错误码
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Error::Oss(err) => Some(&err.error_code),
            Error::Client(err) => Some(&err.error_code),
            _ => None,
        }
    }
}

impl From<OssError> for Error {
    #[inline]
    fn from(err: OssError) -> Self {
        Error::Oss(err)
    }
}

impl From<KodoError> for Error {
    fn from(err: KodoError) -> Self {
        if err.code() > -1 {
            Error::Oss(OssError {
                error_code: err.code().to_string(),
                message: err.message().to_owned(),
                request_id: err.x_req_id().map(|id| id.to_owned()),
                raw_response_error: Some(String::from_utf8_lossy(err.response_body_sample()).into_owned())
                    .filter(|raw| !raw.is_empty()),
                ..Default::default()
            })
        } else {
            Error::Client(ClientError {
                error_code: "-1".to_owned(),
                message: err.message().to_owned(),
                source: Some(Box::new(err)),
            })
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        http_client::{HeaderName, HeaderValue, Response},
        kodo::KodoErrorKind,
    };

    #[test]
    fn test_kodo_status_error_to_oss_error() {
        let response = Response::builder(631)
            .header(HeaderName::from_static("x-reqid"), HeaderValue::from_static("fake-req-id"))
            .bytes(br#"{"error":"no such bucket"}"#.to_vec())
            .build();
        match Error::from(KodoError::from_response(response)) {
            Error::Oss(err) => {
                assert_eq!(err.error_code, "631");
                assert_eq!(err.message, "no such bucket");
                assert_eq!(err.request_id.as_deref(), Some("fake-req-id"));
                assert_eq!(err.raw_response_error.as_deref(), Some(r#"{"error":"no such bucket"}"#));
                assert_eq!(err.to_string(), "[631] no such bucket, RequestId: fake-req-id");
            }
            err => panic!("unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_kodo_io_error_to_client_error() {
        let err = Error::from(KodoError::new(KodoErrorKind::HttpError, "connection refused"));
        assert_eq!(err.error_code(), Some("-1"));
        match &err {
            Error::Client(client_error) => {
                assert_eq!(client_error.message, "connection refused");
                assert!(client_error.source().is_some());
            }
            err => panic!("unexpected error: {:?}", err),
        }
    }

    #[test]
    fn test_unsupported() {
        let err = Error::unsupported("initiate_multipart_upload");
        assert!(err.is_unsupported());
        assert!(err.error_code().is_none());
        assert!(err.to_string().ends_with("initiate_multipart_upload"));
    }
}

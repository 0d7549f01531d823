use crate::http_client::{Response, StatusCode};
use assert_impl::assert_impl;
use serde::Deserialize;
use std::{
    error::Error as StdError,
    fmt::{self, Display},
    io::Error as IoError,
    result::Result as StdResult,
};

/// 七牛 API 调用错误类型
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KodoErrorKind {
    /// HTTP 客户端错误，没有收到响应
    HttpError,

    /// 响应状态码错误
    StatusCodeError(StatusCode),

    /// 解析响应体错误
    ParseResponseError,

    /// 本地文件读写错误
    LocalIoError,
}

/// 七牛 API 调用错误
#[derive(Debug)]
pub struct KodoError {
    kind: KodoErrorKind,
    message: String,
    x_req_id: Option<String>,
    x_log: Option<String>,
    response_body_sample: Vec<u8>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

const RESPONSE_BODY_SAMPLE_LEN_LIMIT: u64 = 1024;

#[derive(Deserialize)]
struct ErrorResponseBody {
    error: String,
}

impl KodoError {
    #[inline]
    pub fn new(kind: KodoErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            x_req_id: None,
            x_log: None,
            response_body_sample: Vec::new(),
            source: None,
        }
    }

    /// 请求没有得到响应
    pub fn from_io(err: IoError) -> Self {
        let mut error = Self::new(KodoErrorKind::HttpError, err.to_string());
        error.source = Some(Box::new(err));
        error
    }

    pub(crate) fn from_local_io(err: IoError) -> Self {
        let mut error = Self::new(KodoErrorKind::LocalIoError, err.to_string());
        error.source = Some(Box::new(err));
        error
    }

    /// 从状态码错误的响应中构建错误，错误信息优先取 JSON 响应体中的 `error` 字段
    pub fn from_response(mut response: Response) -> Self {
        let status_code = response.status_code();
        let response_body_sample = response
            .read_body_sample(RESPONSE_BODY_SAMPLE_LEN_LIMIT)
            .unwrap_or_default();
        let message = serde_json::from_slice::<ErrorResponseBody>(&response_body_sample)
            .map(|body| body.error)
            .ok()
            .or_else(|| {
                let sample = String::from_utf8_lossy(&response_body_sample).trim().to_owned();
                Some(sample).filter(|sample| !sample.is_empty())
            })
            .unwrap_or_else(|| status_code.canonical_reason().unwrap_or_default().to_owned());
        Self {
            kind: KodoErrorKind::StatusCodeError(status_code),
            message,
            x_req_id: response.x_req_id().map(|s| s.to_owned()),
            x_log: response.x_log().map(|s| s.to_owned()),
            response_body_sample,
            source: None,
        }
    }

    pub(crate) fn parse_error(err: impl StdError + Send + Sync + 'static, response: &Response) -> Self {
        Self {
            kind: KodoErrorKind::ParseResponseError,
            message: err.to_string(),
            x_req_id: response.x_req_id().map(|s| s.to_owned()),
            x_log: response.x_log().map(|s| s.to_owned()),
            response_body_sample: Vec::new(),
            source: Some(Box::new(err)),
        }
    }

    #[inline]
    pub fn kind(&self) -> KodoErrorKind {
        self.kind
    }

    /// 错误码，即响应的 HTTP 状态码，没有收到响应时为 -1
    #[inline]
    pub fn code(&self) -> i32 {
        match self.kind {
            KodoErrorKind::StatusCodeError(status_code) => i32::from(status_code.as_u16()),
            _ => -1,
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn x_req_id(&self) -> Option<&str> {
        self.x_req_id.as_deref()
    }

    #[inline]
    pub fn x_log(&self) -> Option<&str> {
        self.x_log.as_deref()
    }

    #[inline]
    pub fn response_body_sample(&self) -> &[u8] {
        &self.response_body_sample
    }

    /// 资源不存在（612）
    #[inline]
    pub fn is_not_found(&self) -> bool {
        self.code() == 612
    }

    /// 存储空间不存在（612 或 631）
    #[inline]
    pub fn is_bucket_not_found(&self) -> bool {
        matches!(self.code(), 612 | 631)
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl Display for KodoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)?;
        if let Some(x_req_id) = &self.x_req_id {
            write!(f, ", reqId: {}", x_req_id)?;
        }
        Ok(())
    }
}

impl StdError for KodoError {
    #[inline]
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|err| err.as_ref() as &(dyn StdError + 'static))
    }
}

pub type KodoResult<T> = StdResult<T, KodoError>;

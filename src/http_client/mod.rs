//! HTTP 请求与响应
//!
//! 定义了 HTTP 请求处理器接口 `HttpCaller`，默认实现基于 ureq

mod ureq_caller;
pub use ureq_caller::UreqCaller;

pub use http::{
    header::{self, HeaderName},
    HeaderMap, HeaderValue, Method, StatusCode,
};
use std::{
    fmt::{self, Debug},
    io::{self, Cursor, Read, Result as IoResult},
};
use url::Url;

/// 七牛请求 ID 响应头
pub const X_REQ_ID: &str = "X-Reqid";
/// 七牛日志响应头
pub const X_LOG: &str = "X-Log";

/// HTTP 请求处理器
///
/// 处理器只负责发送请求与接收响应，非 2xx 的状态码也应当作为正常的响应返回
pub trait HttpCaller: Debug + Send + Sync {
    fn call(&self, request: &Request) -> IoResult<Response>;

    /// 从 `body` 读取请求体发送，`request` 自带的请求体被忽略
    ///
    /// 默认实现先将请求体读入内存，再交给 `call`
    fn call_with_stream(&self, request: &Request, body: &mut dyn Read) -> IoResult<Response> {
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)?;
        self.call(&request.to_owned().body(bytes))
    }
}

/// HTTP 请求
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Request {
    #[inline]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Default::default(),
            body: Default::default(),
        }
    }

    #[inline]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[inline]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }
}

/// HTTP 响应体
pub type ResponseBody = Box<dyn Read + Send>;

/// HTTP 响应
pub struct Response {
    status_code: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl Response {
    #[inline]
    pub fn builder(status_code: u16) -> ResponseBuilder {
        ResponseBuilder {
            status_code: StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: Default::default(),
            body: Box::new(io::empty()),
        }
    }

    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 获取响应头的字符串值，无法转换为字符串的值视为不存在
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    #[inline]
    pub fn x_req_id(&self) -> Option<&str> {
        self.header(X_REQ_ID)
    }

    #[inline]
    pub fn x_log(&self) -> Option<&str> {
        self.header(X_LOG)
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    #[inline]
    pub fn into_body(self) -> ResponseBody {
        self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut ResponseBody {
        &mut self.body
    }

    /// 读取最多 `limit` 个字节的响应体
    pub fn read_body_sample(&mut self, limit: u64) -> IoResult<Vec<u8>> {
        let mut sample = Vec::new();
        self.body.by_ref().take(limit).read_to_end(&mut sample)?;
        Ok(sample)
    }
}

impl Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Response")
            .field("status_code", &self.status_code)
            .field("headers", &self.headers)
            .finish()
    }
}

/// HTTP 响应构建器
pub struct ResponseBuilder {
    status_code: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl ResponseBuilder {
    #[inline]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[inline]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    #[inline]
    pub fn body(mut self, body: impl Read + Send + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    #[inline]
    pub fn bytes(self, body: impl Into<Vec<u8>>) -> Self {
        self.body(Cursor::new(body.into()))
    }

    #[inline]
    pub fn build(self) -> Response {
        Response {
            status_code: self.status_code,
            headers: self.headers,
            body: self.body,
        }
    }
}

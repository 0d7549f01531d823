use crate::{
    config::Config,
    http_client::{HeaderName, HeaderValue, HttpCaller, Request, Response},
    region::Region,
};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt,
    io::Result as IoResult,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

pub(crate) const FAKE_UC_HOST: &str = "fakeuc.example.com";
pub(crate) const FAKE_API_HOST: &str = "fakeapi.example.com";
pub(crate) const FAKE_UP_HOST: &str = "fakeup.example.com";
pub(crate) const FAKE_IO_HOST: &str = "fakeio.example.com";
pub(crate) const FAKE_RS_HOST: &str = "fakers.example.com";
pub(crate) const FAKE_RSF_HOST: &str = "fakersf.example.com";

/// 总是返回相同 JSON 响应的请求处理器
#[derive(Debug)]
pub(crate) struct JsonCallMock {
    status_code: u16,
    body: Value,
}

impl JsonCallMock {
    pub(crate) fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }
}

impl HttpCaller for JsonCallMock {
    fn call(&self, _: &Request) -> IoResult<Response> {
        json_response(self.status_code, self.body.to_owned())
    }
}

type Handler = dyn Fn(&Request, usize) -> IoResult<Response> + Send + Sync;

/// 由闭包处理请求的处理器，闭包的第二个参数为当前是第几次调用（从 0 开始）
pub(crate) struct FnCallMock {
    handler: Box<Handler>,
    counter: AtomicUsize,
}

impl FnCallMock {
    pub(crate) fn new(handler: impl Fn(&Request, usize) -> IoResult<Response> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            counter: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl HttpCaller for FnCallMock {
    fn call(&self, request: &Request) -> IoResult<Response> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        (self.handler)(request, n)
    }
}

impl fmt::Debug for FnCallMock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnCallMock").field("counter", &self.counter).finish()
    }
}

pub(crate) fn json_response(status_code: u16, body: Value) -> IoResult<Response> {
    Ok(Response::builder(status_code)
        .header(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        )
        .header(HeaderName::from_static("x-reqid"), HeaderValue::from_static("fake-req-id"))
        .bytes(serde_json::to_vec(&body)?)
        .build())
}

pub(crate) fn bytes_response(status_code: u16, body: impl Into<Vec<u8>>) -> IoResult<Response> {
    Ok(Response::builder(status_code)
        .header(HeaderName::from_static("x-reqid"), HeaderValue::from_static("fake-req-id"))
        .bytes(body)
        .build())
}

pub(crate) fn test_region() -> Region {
    Region::builder("z0")
        .up_host(FAKE_UP_HOST)
        .io_host(FAKE_IO_HOST)
        .rs_host(FAKE_RS_HOST)
        .rsf_host(FAKE_RSF_HOST)
        .api_host(FAKE_API_HOST)
        .build()
        .unwrap()
}

pub(crate) fn test_config(http_caller: Arc<dyn HttpCaller>) -> Config {
    Config::builder()
        .region(test_region())
        .uc_host(FAKE_UC_HOST)
        .api_host(FAKE_API_HOST)
        .http_caller(http_caller)
        .build()
}

pub(crate) fn query_params(request: &Request) -> HashMap<String, String> {
    request.url().query_pairs().into_owned().collect()
}

pub(crate) fn form_params(request: &Request) -> Vec<(String, String)> {
    form_urlencoded_pairs(request.body_bytes())
}

fn form_urlencoded_pairs(body: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(body).unwrap_or_default()
}

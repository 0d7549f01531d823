use super::{HeaderMap, HeaderName, HeaderValue, HttpCaller, Request, Response};
use crate::{config::Config, utils::user_agent};
use http::header::USER_AGENT;
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read, Result as IoResult};
use ureq::{
    Agent, AgentBuilder, Error as UreqError, Proxy as UreqProxy, Request as UreqRequest, Response as UreqResponse,
};

/// 基于 ureq 的 HTTP 请求处理器
#[derive(Debug, Clone)]
pub struct UreqCaller {
    agent: Agent,
}

impl UreqCaller {
    #[inline]
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// 根据配置中的超时时间、连接池和代理设置创建请求处理器
    pub fn from_config(config: &Config) -> IoResult<Self> {
        let mut builder = AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .max_idle_connections(config.max_idle_connections())
            .max_idle_connections_per_host(config.max_idle_connections_per_host())
            .user_agent(user_agent());
        if let Some(write_timeout) = config.write_timeout() {
            builder = builder.timeout_write(write_timeout);
        }
        if let Some(proxy) = config.proxy() {
            let proxy =
                UreqProxy::new(proxy.to_url()).map_err(|err| IoError::new(IoErrorKind::InvalidInput, err))?;
            builder = builder.proxy(proxy);
        }
        Ok(Self::new(builder.build()))
    }
}

impl Default for UreqCaller {
    #[inline]
    fn default() -> Self {
        Self::new(AgentBuilder::new().user_agent(user_agent()).build())
    }
}

impl From<Agent> for UreqCaller {
    #[inline]
    fn from(agent: Agent) -> Self {
        Self::new(agent)
    }
}

impl UreqCaller {
    fn prepare(&self, request: &Request) -> IoResult<UreqRequest> {
        let mut ureq_request = self.agent.request(request.method().as_str(), request.url().as_str());
        for (header_name, header_value) in request.headers() {
            let header_value = header_value
                .to_str()
                .map_err(|err| IoError::new(IoErrorKind::InvalidInput, err))?;
            ureq_request = ureq_request.set(header_name.as_str(), header_value);
        }
        if !request.headers().contains_key(USER_AGENT) {
            ureq_request = ureq_request.set(USER_AGENT.as_str(), user_agent());
        }
        Ok(ureq_request)
    }
}

impl HttpCaller for UreqCaller {
    fn call(&self, request: &Request) -> IoResult<Response> {
        let ureq_request = self.prepare(request)?;
        let result = if request.body_bytes().is_empty() && request.method() == http::Method::GET {
            ureq_request.call()
        } else {
            ureq_request.send_bytes(request.body_bytes())
        };
        into_response(result)
    }

    /// 长度未知的请求体以 chunked 编码发送
    fn call_with_stream(&self, request: &Request, body: &mut dyn Read) -> IoResult<Response> {
        into_response(self.prepare(request)?.send(body))
    }
}

fn into_response(result: Result<UreqResponse, UreqError>) -> IoResult<Response> {
    match result {
        Ok(response) => make_response(response),
        Err(UreqError::Status(_, response)) => make_response(response),
        Err(UreqError::Transport(transport)) => Err(IoError::new(IoErrorKind::Other, transport)),
    }
}

fn make_response(response: UreqResponse) -> IoResult<Response> {
    let mut headers = HeaderMap::new();
    for header_name_str in response.headers_names().into_iter() {
        if let Some(header_value_str) = response.header(&header_name_str) {
            let header_name = HeaderName::from_bytes(header_name_str.as_bytes())
                .map_err(|err| IoError::new(IoErrorKind::InvalidData, err))?;
            let header_value = HeaderValue::from_bytes(header_value_str.as_bytes())
                .map_err(|err| IoError::new(IoErrorKind::InvalidData, err))?;
            headers.append(header_name, header_value);
        }
    }
    Ok(Response::builder(response.status())
        .headers(headers)
        .body(response.into_reader())
        .build())
}

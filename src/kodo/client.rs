use super::error::{KodoError, KodoResult};
use crate::{
    credential::CredentialProvider,
    http_client::{header, HeaderValue, HttpCaller, Method, Request, Response},
    utils::{endpoint, user_agent},
};
use log::{debug, warn};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fmt,
    io::{self, Read},
    sync::Arc,
};
use url::Url;

/// 七牛 API 客户端，负责拼接 URL、签发管理凭证与处理错误响应
#[derive(Clone)]
pub(crate) struct ApiClient {
    credential: Arc<dyn CredentialProvider>,
    http_caller: Arc<dyn HttpCaller>,
    use_https: bool,
}

impl ApiClient {
    pub(crate) fn new(
        credential: Arc<dyn CredentialProvider>,
        http_caller: Arc<dyn HttpCaller>,
        use_https: bool,
    ) -> Self {
        Self {
            credential,
            http_caller,
            use_https,
        }
    }

    #[inline]
    pub(crate) fn get<'a>(&'a self, host: &str, path: &str) -> RequestBuilder<'a> {
        RequestBuilder::new(self, Method::GET, host, path)
    }

    #[inline]
    pub(crate) fn post<'a>(&'a self, host: &str, path: &str) -> RequestBuilder<'a> {
        RequestBuilder::new(self, Method::POST, host, path)
    }

    #[inline]
    pub(crate) fn credential(&self) -> &Arc<dyn CredentialProvider> {
        &self.credential
    }

    #[inline]
    pub(crate) fn http_caller(&self) -> &Arc<dyn HttpCaller> {
        &self.http_caller
    }

    #[inline]
    pub(crate) fn use_https(&self) -> bool {
        self.use_https
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("credential", &self.credential)
            .field("http_caller", &self.http_caller)
            .field("use_https", &self.use_https)
            .finish()
    }
}

pub(crate) struct RequestBuilder<'a> {
    client: &'a ApiClient,
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    authorization: bool,
    content_type: Option<HeaderValue>,
    body: Vec<u8>,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a ApiClient, method: Method, host: &str, path: &str) -> Self {
        Self {
            url: endpoint(host, client.use_https) + path,
            client,
            method,
            query: Vec::new(),
            authorization: false,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub(crate) fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// 值为空时不追加查询参数
    pub(crate) fn query_if_not_empty(self, key: impl Into<String>, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.query(key, value)
        }
    }

    /// 使用管理凭证签名请求
    pub(crate) fn authorization(mut self) -> Self {
        self.authorization = true;
        self
    }

    pub(crate) fn form_body<T: Serialize + ?Sized>(mut self, body: &T) -> KodoResult<Self> {
        let body = serde_urlencoded::to_string(body)
            .map_err(|err| KodoError::from_local_io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
        self.content_type = Some(HeaderValue::from_static("application/x-www-form-urlencoded"));
        self.body = body.into_bytes();
        Ok(self)
    }

    fn build(self) -> KodoResult<Request> {
        let mut url = Url::parse(&self.url)
            .map_err(|err| KodoError::from_local_io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        let mut request = Request::new(self.method, url);
        if let Some(content_type) = &self.content_type {
            request = request.header(header::CONTENT_TYPE, content_type.to_owned());
        }
        if self.authorization {
            let credential = self.client.credential.get().map_err(KodoError::from_local_io)?;
            let authorization = credential.authorization(request.url(), self.content_type.as_ref(), &self.body);
            let authorization = HeaderValue::from_str(&authorization)
                .map_err(|err| KodoError::from_local_io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
            request = request.header(header::AUTHORIZATION, authorization);
        }
        Ok(request
            .header(header::USER_AGENT, HeaderValue::from_static(user_agent()))
            .body(self.body))
    }

    /// 发送请求，非 2xx 的响应将被转换为错误
    pub(crate) fn send(self) -> KodoResult<Response> {
        let http_caller = self.client.http_caller.to_owned();
        let request = self.build()?;
        debug!("{} {}", request.method(), request.url());
        check_response(&request, http_caller.call(&request))
    }

    /// 从 `body` 流式读取请求体发送，请求体不参与签名
    pub(crate) fn send_stream(mut self, content_type: HeaderValue, body: &mut dyn Read) -> KodoResult<Response> {
        let http_caller = self.client.http_caller.to_owned();
        self.content_type = Some(content_type);
        let request = self.build()?;
        debug!("{} {} (streaming)", request.method(), request.url());
        check_response(&request, http_caller.call_with_stream(&request, body))
    }

    pub(crate) fn send_json<T: DeserializeOwned>(self) -> KodoResult<T> {
        parse_json(self.send()?)
    }

    pub(crate) fn send_and_ignore_body(self) -> KodoResult<()> {
        let mut response = self.send()?;
        io::copy(response.body_mut(), &mut io::sink()).map_err(KodoError::from_io)?;
        Ok(())
    }
}

fn check_response(request: &Request, result: io::Result<Response>) -> KodoResult<Response> {
    let response = result.map_err(|err| {
        warn!("{} {} failed: {}", request.method(), request.url(), err);
        KodoError::from_io(err)
    })?;
    if response.is_success() {
        Ok(response)
    } else {
        let err = KodoError::from_response(response);
        warn!("{} {} responded {}", request.method(), request.url(), err);
        Err(err)
    }
}

pub(crate) fn parse_json<T: DeserializeOwned>(mut response: Response) -> KodoResult<T> {
    let mut body = Vec::new();
    response.body_mut().read_to_end(&mut body).map_err(KodoError::from_io)?;
    serde_json::from_slice(&body).map_err(|err| KodoError::parse_error(err, &response))
}

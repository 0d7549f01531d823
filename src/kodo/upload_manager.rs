use super::{
    client::ApiClient,
    error::{KodoError, KodoResult},
    model::PutRet,
    regions::Regions,
};
use crate::http_client::HeaderValue;
use assert_impl::assert_impl;
use log::info;
use mime::Mime;
use qiniu_multipart::client::lazy::{Multipart, PreparedFields};
use std::{
    fs::File,
    io::{self, Cursor, Read},
    path::Path,
    sync::Arc,
};

/// 表单上传的附加选项
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// 文件名，未设置时上传文件使用路径中的文件名
    pub file_name: Option<String>,
    /// MIME 类型，未设置时由服务端检测
    pub mime: Option<Mime>,
    /// 用户自定义元数据，以 `x-qn-meta-` 为前缀上传
    pub metadata: Vec<(String, String)>,
    /// 自定义变量，以 `x:` 为前缀上传
    pub vars: Vec<(String, String)>,
}

/// 上传响应
#[derive(Debug, Clone)]
pub struct PutResponse {
    hash: String,
    key: String,
    request_id: Option<String>,
    body: Vec<u8>,
}

impl PutResponse {
    #[inline]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// 原始响应体
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// 表单上传管理器
#[derive(Debug)]
pub struct UploadManager {
    client: ApiClient,
    regions: Arc<Regions>,
}

impl UploadManager {
    pub(crate) fn new(client: ApiClient, regions: Arc<Regions>) -> Self {
        Self { client, regions }
    }

    pub fn put_bytes(
        &self,
        bucket: &str,
        key: Option<&str>,
        upload_token: &str,
        data: &[u8],
        options: &UploadOptions,
    ) -> KodoResult<PutResponse> {
        self.put_reader(bucket, key, upload_token, Cursor::new(data), options)
    }

    /// 上传本地文件，未指定 MIME 类型时根据文件扩展名推断
    pub fn put_file(
        &self,
        bucket: &str,
        key: Option<&str>,
        upload_token: &str,
        path: impl AsRef<Path>,
        options: &UploadOptions,
    ) -> KodoResult<PutResponse> {
        let path = path.as_ref();
        let file = File::open(path).map_err(KodoError::from_local_io)?;
        let mut options = options.to_owned();
        if options.file_name.is_none() {
            options.file_name = path.file_name().map(|name| name.to_string_lossy().into_owned());
        }
        if options.mime.is_none() {
            options.mime = mime_guess::from_path(path).first();
        }
        self.put_reader(bucket, key, upload_token, file, &options)
    }

    pub fn put_reader(
        &self,
        bucket: &str,
        key: Option<&str>,
        upload_token: &str,
        reader: impl Read,
        options: &UploadOptions,
    ) -> KodoResult<PutResponse> {
        let region = self.regions.region_for(&self.client, bucket)?;
        let mut fields = multipart_fields(key, upload_token, reader, options).map_err(KodoError::from_local_io)?;
        let content_type = HeaderValue::from_str(&format!("multipart/form-data; boundary={}", fields.boundary()))
            .map_err(|err| KodoError::from_local_io(io::Error::new(io::ErrorKind::InvalidInput, err)))?;
        let mut response = self
            .client
            .post(region.up_host(), "/")
            .send_stream(content_type, &mut fields)?;
        let request_id = response.x_req_id().map(|id| id.to_owned());
        let mut body = Vec::new();
        response.body_mut().read_to_end(&mut body).map_err(KodoError::from_io)?;
        let put_ret: PutRet = if body.is_empty() {
            PutRet::default()
        } else {
            serde_json::from_slice(&body).map_err(|err| KodoError::parse_error(err, &response))?
        };
        info!(
            "uploaded {} to bucket {}, hash: {}",
            key.unwrap_or(&put_ret.key),
            bucket,
            put_ret.hash
        );
        Ok(PutResponse {
            hash: put_ret.hash,
            key: put_ret.key,
            request_id,
            body,
        })
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

/// 文件内容在发送请求时才被读取
fn multipart_fields<'d>(
    key: Option<&'d str>,
    upload_token: &'d str,
    reader: impl Read + 'd,
    options: &'d UploadOptions,
) -> io::Result<PreparedFields<'d>> {
    let mut multipart = Multipart::new();
    multipart.add_text("token", upload_token);
    if let Some(key) = key {
        multipart.add_text("key", key);
    }
    for (name, value) in options.metadata.iter() {
        multipart.add_text("x-qn-meta-".to_owned() + name, value.as_str());
    }
    for (name, value) in options.vars.iter() {
        multipart.add_text("x:".to_owned() + name, value.as_str());
    }
    multipart.add_stream(
        "file",
        reader,
        Some(options.file_name.as_deref().unwrap_or("fileName")),
        options.mime.to_owned(),
    );
    multipart.prepare().map_err(|err| err.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        credential::StaticCredentialProvider,
        http_client::{header, HttpCaller, Method, Request, Response},
        test_utils::*,
    };
    use anyhow::Result;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle.as_bytes())
    }

    fn get_upload_manager(http_caller: Arc<dyn HttpCaller>) -> UploadManager {
        UploadManager::new(
            ApiClient::new(
                Arc::new(StaticCredentialProvider::new("abcdefghklmnopq", "1234567890")),
                http_caller,
                false,
            ),
            Arc::new(Regions::fixed(test_region())),
        )
    }

    #[test]
    fn test_put_bytes() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, _| {
            assert_eq!(*request.method(), Method::POST);
            assert_eq!(request.url().as_str(), "http://fakeup.example.com/");
            assert!(request.headers().get(header::AUTHORIZATION).is_none());
            assert!(request
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map_or(false, |value| value.starts_with("multipart/form-data; boundary=")));
            let body = request.body_bytes();
            assert!(contains(body, "name=\"token\""));
            assert!(contains(body, "fake-upload-token"));
            assert!(contains(body, "name=\"key\""));
            assert!(contains(body, "dir/test-key"));
            assert!(contains(body, "name=\"x-qn-meta-author\""));
            assert!(contains(body, "name=\"x:biz\""));
            assert!(contains(body, "filename=\"hello.txt\""));
            assert!(contains(body, "text/plain"));
            assert!(contains(body, "hello world"));
            json_response(200, json!({"hash": "FjmDbDf1DAMvzBVWF4r-gxAzQHKG", "key": "dir/test-key"}))
        });
        let manager = get_upload_manager(caller.to_owned());
        let response = manager.put_bytes(
            "test-bucket",
            Some("dir/test-key"),
            "fake-upload-token",
            b"hello world",
            &UploadOptions {
                file_name: Some("hello.txt".to_owned()),
                mime: Some(mime::TEXT_PLAIN),
                metadata: vec![("author".to_owned(), "qiniu".to_owned())],
                vars: vec![("biz".to_owned(), "oss".to_owned())],
            },
        )?;
        assert_eq!(response.hash(), "FjmDbDf1DAMvzBVWF4r-gxAzQHKG");
        assert_eq!(response.key(), "dir/test-key");
        assert_eq!(response.request_id(), Some("fake-req-id"));
        assert!(contains(response.body(), "FjmDbDf1DAMvzBVWF4r-gxAzQHKG"));
        assert_eq!(caller.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_put_file_guesses_mime() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let mut file = Builder::new().suffix(".json").tempfile()?;
        file.write_all(br#"{"a":1}"#)?;
        file.flush()?;
        let file_name = file
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap();
        let caller = FnCallMock::new(move |request, _| {
            let body = request.body_bytes();
            assert!(contains(body, &format!("filename=\"{}\"", file_name)));
            assert!(contains(body, "application/json"));
            assert!(contains(body, r#"{"a":1}"#));
            json_response(200, json!({"hash": "Fabc", "key": "test.json"}))
        });
        let manager = get_upload_manager(caller);
        let response = manager.put_file(
            "test-bucket",
            Some("test.json"),
            "fake-upload-token",
            file.path(),
            &Default::default(),
        )?;
        assert_eq!(response.hash(), "Fabc");
        Ok(())
    }

    #[derive(Debug, Default)]
    struct StreamOnlyCaller {
        body: std::sync::Mutex<Vec<u8>>,
    }

    impl HttpCaller for StreamOnlyCaller {
        fn call(&self, request: &Request) -> io::Result<Response> {
            panic!("{} should be sent as a stream", request.url());
        }

        fn call_with_stream(&self, request: &Request, body: &mut dyn Read) -> io::Result<Response> {
            assert!(request.body_bytes().is_empty());
            body.read_to_end(&mut self.body.lock().unwrap())?;
            json_response(200, json!({"hash": "Fbig", "key": "big.bin"}))
        }
    }

    #[test]
    fn test_put_file_streams_content() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let mut file = Builder::new().suffix(".bin").tempfile()?;
        let content: Vec<u8> = (0..256 * 1024).map(|i| (i % 251) as u8).collect();
        file.write_all(&content)?;
        file.flush()?;

        let caller = Arc::new(StreamOnlyCaller::default());
        let manager = get_upload_manager(caller.to_owned());
        let response = manager.put_file(
            "test-bucket",
            Some("big.bin"),
            "fake-upload-token",
            file.path(),
            &Default::default(),
        )?;
        assert_eq!(response.hash(), "Fbig");
        let body = caller.body.lock().unwrap();
        assert!(body.windows(content.len()).any(|window| window == content.as_slice()));
        assert!(contains(&body, "application/octet-stream"));
        Ok(())
    }

    #[test]
    fn test_put_with_bad_token() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let manager = get_upload_manager(Arc::new(JsonCallMock::new(401, json!({"error": "bad token"}))));
        let err = manager
            .put_bytes("test-bucket", None, "bad-token", b"data", &Default::default())
            .unwrap_err();
        assert_eq!(err.code(), 401);
        assert_eq!(err.message(), "bad token");
        Ok(())
    }

    #[test]
    fn test_put_missing_file() {
        let manager = get_upload_manager(Arc::new(JsonCallMock::new(200, json!({}))));
        let err = manager
            .put_file(
                "test-bucket",
                None,
                "fake-upload-token",
                "/path/not/exists",
                &Default::default(),
            )
            .unwrap_err();
        assert_eq!(err.code(), -1);
    }
}

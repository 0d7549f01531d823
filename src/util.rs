//! 绑定单个下载域名的七牛对象存储辅助工具
//!
//! 与 `QiniuOssClient` 不同，`QiniuOssUtil` 不要求固定区域，未设置时按存储空间查询区域。
//! 下载使用构造时传入的域名，不查询存储空间绑定的域名。

use crate::{
    config::Config,
    credential::{CredentialProvider, StaticCredentialProvider},
    http_client::{header, HeaderValue, HttpCaller, Method, Request, Response, UreqCaller},
    kodo::{regions::Regions, client::ApiClient, BucketManager, KodoError, UploadManager, UploadOptions, UploadPolicy},
    oss::{ObjectListing, ObjectSummary, SimplifiedObjectMeta, StorageClass},
    utils::{deadline_after, encode_object_key, put_time_to_datetime},
};
use log::{debug, info};
use mime::Mime;
use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
    result::Result as StdResult,
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};
use thiserror::Error;
use url::Url;

const PRIVATE_URL_LIFETIME: Duration = Duration::from_secs(3600);
const DEFAULT_LIST_LIMIT: usize = 200;
const ERROR_BODY_SAMPLE_LIMIT: u64 = 512;

/// `QiniuOssUtil` 的错误
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{message}")]
pub struct OssServiceError {
    pub code: String,
    pub message: String,
}

impl OssServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    fn wrap(bucket: &str, object: &str, err: KodoError) -> Self {
        Self::new(
            err.code().to_string(),
            format!(
                "OssBucket: {}, ossObject: {}, errorCode: {}, {}",
                bucket,
                object,
                err.code(),
                err.message()
            ),
        )
    }
}

pub type OssServiceResult<T> = StdResult<T, OssServiceError>;

/// 七牛对象存储辅助工具
#[derive(Debug)]
pub struct QiniuOssUtil {
    host: String,
    config: Config,
    credential: Arc<dyn CredentialProvider>,
    http_caller: Arc<dyn HttpCaller>,
    regions: Arc<Regions>,
    bucket_manager: RwLock<Option<Arc<BucketManager>>>,
    upload_manager: RwLock<Option<Arc<UploadManager>>>,
}

impl QiniuOssUtil {
    /// 创建辅助工具，`host` 为下载域名，没有协议时使用 `http://`
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        host: impl Into<String>,
        config: Config,
    ) -> OssServiceResult<Self> {
        let host = host.into();
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host
        } else {
            format!("http://{}", host)
        };
        let http_caller: Arc<dyn HttpCaller> = match config.http_caller() {
            Some(http_caller) => http_caller.to_owned(),
            None => Arc::new(
                UreqCaller::from_config(&config).map_err(|err| OssServiceError::new("-1", err.to_string()))?,
            ),
        };
        let regions = match config.region() {
            Some(region) => Regions::fixed(region.to_owned()),
            None => Regions::query(config.uc_host().to_owned(), config.region_cache_lifetime()),
        };
        Ok(Self {
            host,
            credential: Arc::new(StaticCredentialProvider::new(access_key, secret_key)),
            http_caller,
            regions: Arc::new(regions),
            bucket_manager: RwLock::new(None),
            upload_manager: RwLock::new(None),
            config,
        })
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// 释放存储空间管理器与上传管理器，之后的调用会重新创建
    pub fn shutdown(&self) {
        *self.bucket_manager.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.upload_manager.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// 七牛只使用 AccessKey 与 SecretKey 认证，不需要额外的令牌
    pub fn switch_oss_token(&self, _token: &str) {}

    /// 获取对象的类型、大小与上传时间
    pub fn get_meta(&self, bucket: &str, object: &str) -> OssServiceResult<SimplifiedObjectMeta> {
        let info = self
            .bucket_manager()
            .stat(bucket, object)
            .map_err(|err| OssServiceError::wrap(bucket, object, err))?;
        Ok(SimplifiedObjectMeta {
            last_modified: Some(info.put_time_as_datetime()),
            etag: info.hash,
            size: info.fsize,
            content_type: info.mime_type,
        })
    }

    /// 存储空间不存在时返回错误码为 612 的错误
    pub fn is_bucket_exist(&self, bucket: &str) -> OssServiceResult<bool> {
        match self.bucket_manager().bucket_info(bucket) {
            Ok(_) => Ok(true),
            Err(err) if err.is_bucket_not_found() => Err(OssServiceError::new(
                "612",
                format!(" qiniu bucket: {} is not exist, create it first.", bucket),
            )),
            Err(err) => Err(OssServiceError::new(err.code().to_string(), err.message())),
        }
    }

    /// 存储空间与域名需要预先创建
    pub fn create_bucket(&self, _bucket: &str) -> OssServiceResult<()> {
        Err(OssServiceError::new(
            "Unsupported",
            "qiniu: create bucket and host first, after that start the server.",
        ))
    }

    pub fn remove_bucket(&self, _bucket: &str) -> OssServiceResult<()> {
        Err(OssServiceError::new("Unsupported", "qiniu: do not need remove bucket."))
    }

    /// 通过私有下载地址下载对象到本地文件
    pub fn fetch_file(&self, bucket: &str, object: &str, dest_path: impl AsRef<Path>) -> OssServiceResult<()> {
        let dest_path = dest_path.as_ref();
        let url = self.private_url(object)?;
        let mut response = self.fetch_url(&url).map_err(|err| fetch_error(bucket, object, 0, err))?;
        let status_code = response.status_code().as_u16();
        filter_ok(&mut response, &url).map_err(|err| fetch_error(bucket, object, status_code, err))?;
        let size = save_to_file(response.body_mut(), dest_path)
            .map_err(|err| fetch_error(bucket, object, status_code, err))?;
        info!(
            "OssBucket: {}, ossObject: {}, destPath: {}, size: {}",
            bucket,
            object,
            dest_path.display(),
            size
        );
        Ok(())
    }

    /// 下载对象内容，对象不存在时返回空字符串
    pub fn fetch_content(&self, bucket: &str, object: &str) -> OssServiceResult<String> {
        let url = self.private_url(object)?;
        let mut response = self.fetch_url(&url).map_err(|err| fetch_error(bucket, object, 0, err))?;
        let status_code = response.status_code().as_u16();
        let mut content = String::new();
        if status_code == 404 && response.x_req_id().map_or(false, |id| !id.is_empty()) {
            debug!("object {} is not found in bucket {}", object, bucket);
        } else {
            filter_ok(&mut response, &url).map_err(|err| fetch_error(bucket, object, status_code, err))?;
            response
                .body_mut()
                .read_to_string(&mut content)
                .map_err(|err| fetch_error(bucket, object, status_code, err))?;
        }
        info!("OssBucket: {}, ossObject: {}, size: {}", bucket, object, content.len());
        Ok(content)
    }

    /// 上传内容，返回对象的下载地址，对象已存在时失败（614）
    pub fn upload_content(
        &self,
        bucket: &str,
        object: &str,
        content: &[u8],
        content_type: Option<&str>,
    ) -> OssServiceResult<String> {
        let upload_token = self.upload_token(bucket, object)?;
        self.upload_manager()
            .put_bytes(bucket, Some(object), &upload_token, content, &upload_options(content_type))
            .map_err(|err| OssServiceError::wrap(bucket, object, err))?;
        info!("OssBucket: {}, ossObject: {}, size: {}", bucket, object, content.len());
        Ok(self.object_url(object))
    }

    /// 上传本地文件，返回对象的下载地址
    pub fn upload_file(
        &self,
        bucket: &str,
        object: &str,
        file_path: impl AsRef<Path>,
        content_type: Option<&str>,
    ) -> OssServiceResult<String> {
        let upload_token = self.upload_token(bucket, object)?;
        self.upload_manager()
            .put_file(
                bucket,
                Some(object),
                &upload_token,
                file_path.as_ref(),
                &upload_options(content_type),
            )
            .map_err(|err| OssServiceError::wrap(bucket, object, err))?;
        info!(
            "OssBucket: {}, ossObject: {}, filePath: {}",
            bucket,
            object,
            file_path.as_ref().display()
        );
        Ok(self.object_url(object))
    }

    pub fn delete_object(&self, bucket: &str, object: &str) -> OssServiceResult<()> {
        self.bucket_manager()
            .delete(bucket, object)
            .map_err(|err| OssServiceError::wrap(bucket, object, err))
    }

    /// 列举对象，`max_keys` 默认为 200
    pub fn list_object(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        marker: Option<&str>,
        max_keys: Option<usize>,
    ) -> OssServiceResult<ObjectListing> {
        let max_keys = max_keys.unwrap_or(DEFAULT_LIST_LIMIT);
        let listing = self
            .bucket_manager()
            .list_files(
                bucket,
                prefix.unwrap_or_default(),
                marker.unwrap_or_default(),
                max_keys,
                "",
            )
            .map_err(|err| {
                OssServiceError::new(
                    err.code().to_string(),
                    format!(
                        "OssBucket: {}, marker: {}, errorCode: {}, {}",
                        bucket,
                        marker.unwrap_or_default(),
                        err.code(),
                        err.message()
                    ),
                )
            })?;
        Ok(ObjectListing {
            bucket_name: bucket.to_owned(),
            is_truncated: listing.has_more(),
            object_summaries: listing
                .items
                .into_iter()
                .map(|info| ObjectSummary {
                    bucket_name: bucket.to_owned(),
                    last_modified: put_time_to_datetime(info.put_time),
                    storage_class: StorageClass::from_kodo_type(info.file_type),
                    size: info.fsize,
                    etag: info.hash,
                    key: info.key,
                })
                .collect(),
            next_marker: listing.marker.filter(|marker| !marker.is_empty()),
            common_prefixes: listing.common_prefixes.unwrap_or_default(),
            prefix: prefix.map(|prefix| prefix.to_owned()),
            marker: marker.map(|marker| marker.to_owned()),
            delimiter: None,
            max_keys: Some(max_keys),
        })
    }

    #[inline]
    pub fn user_agent() -> &'static str {
        crate::utils::user_agent()
    }

    fn api_client(&self) -> ApiClient {
        ApiClient::new(
            self.credential.to_owned(),
            self.http_caller.to_owned(),
            self.config.use_https(),
        )
    }

    fn bucket_manager(&self) -> Arc<BucketManager> {
        if let Some(manager) = self
            .bucket_manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return manager.to_owned();
        }
        self.bucket_manager
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(|| Arc::new(BucketManager::new(self.api_client(), self.regions.to_owned(), &self.config)))
            .to_owned()
    }

    fn upload_manager(&self) -> Arc<UploadManager> {
        if let Some(manager) = self
            .upload_manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return manager.to_owned();
        }
        self.upload_manager
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(|| Arc::new(UploadManager::new(self.api_client(), self.regions.to_owned())))
            .to_owned()
    }

    fn upload_token(&self, bucket: &str, object: &str) -> OssServiceResult<String> {
        let credential = self
            .credential
            .get()
            .map_err(|err| OssServiceError::new("-1", format!("OssBucket: {}, ossObject: {}, {}", bucket, object, err)))?;
        Ok(UploadPolicy::new_for_bucket(bucket, self.config.upload_token_lifetime())
            .insert_only()
            .to_upload_token(&credential))
    }

    fn object_url(&self, object: &str) -> String {
        format!("{}/{}", self.host, encode_object_key(object))
    }

    fn private_url(&self, object: &str) -> OssServiceResult<Url> {
        let mut url = Url::parse(&self.object_url(object)).map_err(|err| OssServiceError::new("-1", err.to_string()))?;
        self.credential
            .get()
            .map_err(|err| OssServiceError::new("-1", err.to_string()))?
            .sign_download_url(&mut url, deadline_after(PRIVATE_URL_LIFETIME));
        Ok(url)
    }

    fn fetch_url(&self, url: &Url) -> io::Result<Response> {
        let request = Request::new(Method::GET, url.to_owned())
            .header(header::USER_AGENT, HeaderValue::from_static(Self::user_agent()));
        debug!("GET {}", url);
        self.http_caller.call(&request)
    }
}

fn upload_options(content_type: Option<&str>) -> UploadOptions {
    UploadOptions {
        mime: content_type.and_then(|content_type| content_type.parse::<Mime>().ok()),
        ..Default::default()
    }
}

fn filter_ok(response: &mut Response, url: &Url) -> io::Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let raw_response_error = String::from_utf8_lossy(&response.read_body_sample(ERROR_BODY_SAMPLE_LIMIT)?).into_owned();
    let status_code = response.status_code();
    Err(io::Error::new(
        io::ErrorKind::Other,
        format!(
            "{} {}, reqId:{}, xlog:{}, adress:{}, error:{}",
            status_code.as_u16(),
            status_code.canonical_reason().unwrap_or_default(),
            response.x_req_id().unwrap_or_default(),
            response.x_log().unwrap_or_default(),
            url,
            raw_response_error
        ),
    ))
}

fn fetch_error(bucket: &str, object: &str, status_code: u16, err: io::Error) -> OssServiceError {
    OssServiceError::new(
        status_code.to_string(),
        format!(
            "OssBucket: {}, ossObject: {}, errorCode: {}, {}",
            bucket, object, status_code, err
        ),
    )
}

fn save_to_file(reader: &mut dyn Read, path: &Path) -> io::Result<u64> {
    let mut writer = BufWriter::new(File::create(path)?);
    let size = io::copy(reader, &mut writer)?;
    writer.flush()?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use anyhow::Result;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    const DOWNLOAD_HOST: &str = "cdn.example.com";

    fn get_util(http_caller: Arc<dyn HttpCaller>) -> QiniuOssUtil {
        QiniuOssUtil::new("abcdefghklmnopq", "1234567890", DOWNLOAD_HOST, test_config(http_caller)).unwrap()
    }

    #[test]
    fn test_host_scheme() {
        let caller: Arc<dyn HttpCaller> = Arc::new(JsonCallMock::new(200, json!({})));
        assert_eq!(get_util(caller.to_owned()).host(), "http://cdn.example.com");
        let util = QiniuOssUtil::new("ak", "sk", "https://cdn.example.com", test_config(caller)).unwrap();
        assert_eq!(util.host(), "https://cdn.example.com");
    }

    #[test]
    fn test_get_meta() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let util = get_util(Arc::new(JsonCallMock::new(
            200,
            json!({
                "fsize": 53986,
                "hash": "FhashOfJpeg",
                "mimeType": "image/jpeg",
                "putTime": 15_064_371_347_957_620u64,
                "type": 0
            }),
        )));
        let meta = util.get_meta("test-bucket", "2338_1436560813.jpeg")?;
        assert_eq!(meta.content_type, "image/jpeg");
        assert_eq!(meta.size, 53986);
        assert_eq!(
            meta.last_modified.map(|time| time.timestamp_millis()),
            Some(15_064_371_347_957_620 / 10_000)
        );
        Ok(())
    }

    #[test]
    fn test_is_bucket_exist() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, _| {
            match query_params(request).get("bucket").map(String::as_str) {
                Some("test-bucket") => json_response(200, json!({"region": "z0"})),
                Some("missing-bucket") => json_response(631, json!({"error": "no such bucket"})),
                _ => json_response(401, json!({"error": "bad token"})),
            }
        });
        let util = get_util(caller);
        assert!(util.is_bucket_exist("test-bucket")?);
        let err = util.is_bucket_exist("missing-bucket").unwrap_err();
        assert_eq!(err.code, "612");
        assert_eq!(err.message, " qiniu bucket: missing-bucket is not exist, create it first.");
        let err = util.is_bucket_exist("other-bucket").unwrap_err();
        assert_eq!(err.code, "401");
        assert_eq!(err.message, "bad token");
        Ok(())
    }

    #[test]
    fn test_bucket_creation_is_unsupported() {
        let util = get_util(Arc::new(JsonCallMock::new(200, json!({}))));
        assert_eq!(
            util.create_bucket("bucket").unwrap_err().message,
            "qiniu: create bucket and host first, after that start the server."
        );
        assert_eq!(
            util.remove_bucket("bucket").unwrap_err().message,
            "qiniu: do not need remove bucket."
        );
    }

    #[test]
    fn test_fetch_content() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, _| {
            assert_eq!(request.url().host_str(), Some(DOWNLOAD_HOST));
            let params = query_params(request);
            assert!(params.contains_key("e"));
            assert!(params.get("token").map_or(false, |token| token.starts_with("abcdefghklmnopq:")));
            match request.url().path() {
                "/dir%2Fhello.txt" => bytes_response(200, "hello world"),
                "/missing.txt" => json_response(404, json!({"error": "Document not found"})),
                _ => json_response(403, json!({"error": "token out of date"})),
            }
        });
        let util = get_util(caller);
        assert_eq!(util.fetch_content("test-bucket", "dir/hello.txt")?, "hello world");
        assert_eq!(util.fetch_content("test-bucket", "missing.txt")?, "");

        let err = util.fetch_content("test-bucket", "expired.txt").unwrap_err();
        assert_eq!(err.code, "403");
        assert!(err
            .message
            .starts_with("OssBucket: test-bucket, ossObject: expired.txt, errorCode: 403, 403 Forbidden, reqId:fake-req-id, xlog:, adress:http://cdn.example.com/expired.txt?e="));
        assert!(err.message.ends_with(r#"error:{"error":"token out of date"}"#));
        Ok(())
    }

    #[test]
    fn test_fetch_file() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let util = get_util(FnCallMock::new(|_, _| bytes_response(200, "file content")));
        let dir = tempdir()?;
        let path = dir.path().join("fetched");
        util.fetch_file("test-bucket", "file", &path)?;
        assert_eq!(fs::read_to_string(&path)?, "file content");

        let util = get_util(FnCallMock::new(|_, _| {
            Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
        }));
        let err = util.fetch_file("test-bucket", "file", &path).unwrap_err();
        assert_eq!(err.code, "0");
        assert_eq!(err.message, "OssBucket: test-bucket, ossObject: file, errorCode: 0, timed out");
        Ok(())
    }

    fn upload_policy_in(body: &str) -> serde_json::Value {
        let field = &body[body.find("name=\"token\"").unwrap()..];
        let value = &field[field.find("\r\n\r\n").unwrap() + 4..];
        let token = &value[..value.find("\r\n").unwrap()];
        let encoded = token.splitn(3, ':').nth(2).unwrap();
        serde_json::from_slice(&crate::utils::base64::decode(encoded.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_upload_content_and_file() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, n| {
            assert_eq!(request.url().host_str(), Some(FAKE_UP_HOST));
            let body = String::from_utf8_lossy(request.body_bytes()).into_owned();
            let policy = upload_policy_in(&body);
            assert_eq!(policy["scope"], "test-bucket");
            assert_eq!(policy["insertOnly"], 1);
            match n {
                0 => {
                    assert!(body.contains("text/html"));
                    assert!(body.contains("<p>hello</p>"));
                    json_response(200, json!({"hash": "Fhtml", "key": "pages/index.html"}))
                }
                1 => {
                    assert!(body.contains("file content"));
                    json_response(200, json!({"hash": "Ffile", "key": "files/a b.txt"}))
                }
                _ => json_response(614, json!({"error": "file exists"})),
            }
        });
        let util = get_util(caller);
        assert_eq!(
            util.upload_content("test-bucket", "pages/index.html", b"<p>hello</p>", Some("text/html"))?,
            "http://cdn.example.com/pages%2Findex.html"
        );

        let dir = tempdir()?;
        let path = dir.path().join("a.txt");
        fs::write(&path, "file content")?;
        assert_eq!(
            util.upload_file("test-bucket", "files/a b.txt", &path, None)?,
            "http://cdn.example.com/files%2Fa%20b.txt"
        );

        let err = util.upload_content("test-bucket", "exists", b"data", None).unwrap_err();
        assert_eq!(err.code, "614");
        assert_eq!(err.message, "OssBucket: test-bucket, ossObject: exists, errorCode: 614, file exists");
        Ok(())
    }

    #[test]
    fn test_delete_object() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|_, n| match n {
            0 => json_response(200, json!({})),
            _ => json_response(612, json!({"error": "no such file or directory"})),
        });
        let util = get_util(caller);
        util.delete_object("test-bucket", "a.txt")?;
        let err = util.delete_object("test-bucket", "a.txt").unwrap_err();
        assert_eq!(err.code, "612");
        assert_eq!(
            err.message,
            "OssBucket: test-bucket, ossObject: a.txt, errorCode: 612, no such file or directory"
        );
        Ok(())
    }

    #[test]
    fn test_list_object() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, n| {
            let params = query_params(request);
            match n {
                0 => {
                    assert_eq!(params.get("limit").map(String::as_str), Some("200"));
                    assert_eq!(params.get("prefix").map(String::as_str), Some("logs/"));
                    json_response(
                        200,
                        json!({
                            "marker": "next",
                            "items": [{"key": "logs/1", "hash": "Fh1", "fsize": 3, "putTime": 10_000u64, "type": 1}]
                        }),
                    )
                }
                _ => {
                    assert_eq!(params.get("marker").map(String::as_str), Some("next"));
                    json_response(631, json!({"error": "no such bucket"}))
                }
            }
        });
        let util = get_util(caller);
        let listing = util.list_object("test-bucket", Some("logs/"), None, None)?;
        assert_eq!(listing.max_keys, Some(200));
        assert!(listing.is_truncated);
        assert_eq!(listing.next_marker.as_deref(), Some("next"));
        assert_eq!(listing.object_summaries[0].key, "logs/1");
        assert_eq!(listing.object_summaries[0].storage_class, StorageClass::IA);
        assert_eq!(listing.object_summaries[0].last_modified.timestamp_millis(), 1);

        let err = util
            .list_object("test-bucket", None, Some("next"), Some(10))
            .unwrap_err();
        assert_eq!(err.message, "OssBucket: test-bucket, marker: next, errorCode: 631, no such bucket");
        Ok(())
    }

    #[test]
    fn test_region_query_without_fixed_region() -> Result<()> {
        env_logger::builder().is_test(true).try_init().ok();
        let caller = FnCallMock::new(|request, n| match n {
            0 => {
                assert_eq!(request.url().host_str(), Some(FAKE_UC_HOST));
                assert_eq!(request.url().path(), "/v3/query");
                json_response(
                    200,
                    json!({"hosts": [{
                        "region": "z1",
                        "io": {"src": {"main": [FAKE_IO_HOST]}},
                        "up": {"src": {"main": [FAKE_UP_HOST]}},
                        "rs": {"src": {"main": [FAKE_RS_HOST]}},
                        "rsf": {"src": {"main": [FAKE_RSF_HOST]}}
                    }]}),
                )
            }
            _ => {
                assert_eq!(request.url().host_str(), Some(FAKE_RS_HOST));
                json_response(200, json!({}))
            }
        });
        let config = Config::builder()
            .uc_host(FAKE_UC_HOST)
            .http_caller(caller.to_owned() as Arc<dyn HttpCaller>)
            .build();
        let util = QiniuOssUtil::new("abcdefghklmnopq", "1234567890", DOWNLOAD_HOST, config)?;
        util.delete_object("test-bucket", "a")?;
        util.delete_object("test-bucket", "b")?;
        assert_eq!(caller.calls(), 3);

        util.shutdown();
        util.switch_oss_token("ignored");
        util.delete_object("test-bucket", "c")?;
        assert_eq!(caller.calls(), 4);
        Ok(())
    }
}

//! 基于七牛对象存储实现的 OSS 客户端

use crate::{
    cache::DomainCache,
    config::Config,
    credential::{Credential, CredentialProvider, StaticCredentialProvider},
    error::{ClientError, Error, OssError, Result},
    http_client::{header, HeaderValue, HttpCaller, Method, Request, Response, UreqCaller},
    kodo::{
        client::ApiClient, regions::Regions, AclType, BucketManager, FileInfo, IndexPageType, KodoError,
        UploadManager, UploadOptions, UploadPolicy,
    },
    oss::*,
    region::Region,
    utils::{deadline_after, deadline_at, encode_object_key, endpoint, put_time_to_datetime, user_agent},
};
use assert_impl::assert_impl;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use mime::Mime;
use std::{
    io::Read,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
};
use url::Url;

const INDEX_DOCUMENT: &str = "index.html";
const ERROR_DOCUMENT: &str = "error-404";
const USER_METADATA_PREFIX: &str = "x-qn-meta-";
const ERROR_BODY_SAMPLE_LIMIT: u64 = 512;

/// 以七牛对象存储作为后端的 OSS 客户端
///
/// 必须在配置中设置固定的区域。存储空间管理器和上传管理器在首次使用时创建，
/// 切换认证信息或关闭客户端时被重置。
#[derive(Debug)]
pub struct QiniuOssClient {
    config: Config,
    region: Region,
    regions: Arc<Regions>,
    http_caller: Arc<dyn HttpCaller>,
    credential: RwLock<Arc<dyn CredentialProvider>>,
    bucket_manager: RwLock<Option<Arc<BucketManager>>>,
    upload_manager: RwLock<Option<Arc<UploadManager>>>,
    domain_cache: DomainCache,
    shutdown: AtomicBool,
}

/// `QiniuOssClient` 构建器
#[derive(Debug)]
pub struct QiniuOssClientBuilder {
    credential: Arc<dyn CredentialProvider>,
    config: Config,
    http_caller: Option<Arc<dyn HttpCaller>>,
}

impl QiniuOssClientBuilder {
    #[inline]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// 使用自定义的 HTTP 请求处理器，优先于配置中的处理器
    #[inline]
    pub fn http_caller(mut self, http_caller: Arc<dyn HttpCaller>) -> Self {
        self.http_caller = Some(http_caller);
        self
    }

    pub fn build(self) -> Result<QiniuOssClient> {
        let region = self
            .config
            .region()
            .to_owned()
            .ok_or_else(|| Error::InvalidArgument("region must be set-up or not a fix zone".to_owned()))?;
        let http_caller = match self.http_caller.or_else(|| self.config.http_caller().to_owned()) {
            Some(http_caller) => http_caller,
            None => Arc::new(UreqCaller::from_config(&self.config).map_err(|err| {
                Error::InvalidArgument(format!("failed to create http client: {}", err))
            })?),
        };
        Ok(QiniuOssClient {
            domain_cache: DomainCache::new(
                self.config.domain_cache_capacity(),
                self.config.domain_cache_lifetime(),
            ),
            regions: Arc::new(Regions::fixed(region.to_owned())),
            region,
            http_caller,
            credential: RwLock::new(self.credential),
            bucket_manager: RwLock::new(None),
            upload_manager: RwLock::new(None),
            shutdown: AtomicBool::new(false),
            config: self.config,
        })
    }
}

impl QiniuOssClient {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>, config: Config) -> Result<Self> {
        Self::builder(Arc::new(StaticCredentialProvider::new(access_key, secret_key)))
            .config(config)
            .build()
    }

    pub fn builder(credential: Arc<dyn CredentialProvider>) -> QiniuOssClientBuilder {
        QiniuOssClientBuilder {
            credential,
            config: Config::default(),
            http_caller: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// 存储空间为空时返回 true
    pub fn is_empty_bucket(&self, bucket_name: &str) -> Result<bool> {
        let listing = self.bucket_manager()?.list_files(bucket_name, "", "", 2, "")?;
        Ok(listing.items.is_empty())
    }

    fn ensure_running(&self) -> Result<()> {
        if self.shutdown.load(Ordering::SeqCst) {
            Err(Error::client("QiniuOssClient has been shut down"))
        } else {
            Ok(())
        }
    }

    fn credential_provider(&self) -> Arc<dyn CredentialProvider> {
        self.credential.read().unwrap_or_else(PoisonError::into_inner).to_owned()
    }

    fn current_credential(&self) -> Result<Credential> {
        self.credential_provider()
            .get()
            .map_err(|err| Error::Client(ClientError::with_source(err.to_string(), err)))
    }

    fn api_client(&self) -> ApiClient {
        ApiClient::new(
            self.credential_provider(),
            self.http_caller.to_owned(),
            self.config.use_https(),
        )
    }

    fn bucket_manager(&self) -> Result<Arc<BucketManager>> {
        self.ensure_running()?;
        if let Some(manager) = self
            .bucket_manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(manager.to_owned());
        }
        let mut guard = self.bucket_manager.write().unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .get_or_insert_with(|| {
                debug!("create bucket manager");
                Arc::new(BucketManager::new(self.api_client(), self.regions.to_owned(), &self.config))
            })
            .to_owned())
    }

    fn upload_manager(&self) -> Result<Arc<UploadManager>> {
        self.ensure_running()?;
        if let Some(manager) = self
            .upload_manager
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(manager.to_owned());
        }
        let mut guard = self.upload_manager.write().unwrap_or_else(PoisonError::into_inner);
        Ok(guard
            .get_or_insert_with(|| {
                debug!("create upload manager");
                Arc::new(UploadManager::new(self.api_client(), self.regions.to_owned()))
            })
            .to_owned())
    }

    fn reset_managers(&self) {
        *self.bucket_manager.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.upload_manager.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// 获取存储空间绑定的第一个下载域名，优先使用缓存
    fn bucket_domain(&self, bucket_name: &str) -> Result<String> {
        if let Some(domain) = self.domain_cache.get(bucket_name) {
            return Ok(domain);
        }
        debug!("domain cache missed for bucket {}", bucket_name);
        let domain = self
            .bucket_manager()?
            .domain_list(bucket_name)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::client(format!("no domain bound to bucket {}", bucket_name)))?;
        info!("bucket {} is bound to domain {}", bucket_name, domain);
        self.domain_cache.put(bucket_name, domain.to_owned());
        Ok(domain)
    }

    fn object_url(&self, domain: &str, key: &str) -> Result<Url> {
        Url::parse(&format!(
            "{}/{}",
            endpoint(domain, self.config.use_https()),
            encode_object_key(key)
        ))
        .map_err(|err| Error::Client(ClientError::with_source(err.to_string(), err)))
    }

    fn upload_token(&self, bucket_name: &str, key: &str) -> Result<String> {
        Ok(
            UploadPolicy::new_for_object(bucket_name, key, self.config.upload_token_lifetime())
                .to_upload_token(&self.current_credential()?),
        )
    }

    fn object_not_found_error(err: KodoError, bucket_name: &str, key: &str) -> Error {
        if err.is_not_found() {
            Error::Oss(OssError {
                error_code: "NoSuchKey".to_owned(),
                message: format!("NoSuchKey: {}/{}", bucket_name, key),
                request_id: err.x_req_id().map(|id| id.to_owned()),
                ..Default::default()
            })
        } else {
            err.into()
        }
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

fn upload_options(key: &str, metadata: Option<&ObjectMetadata>, guess_from_key: bool) -> UploadOptions {
    let mut options = UploadOptions::default();
    if let Some(metadata) = metadata {
        options.mime = metadata
            .content_type
            .as_deref()
            .and_then(|content_type| content_type.parse::<Mime>().ok());
        options.metadata = metadata
            .user_metadata
            .iter()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect();
    }
    if options.mime.is_none() && guess_from_key {
        options.mime = mime_guess::from_path(key).first();
    }
    options
}

fn object_metadata_from_response(response: &Response) -> ObjectMetadata {
    let mut metadata = ObjectMetadata {
        content_type: response.header(header::CONTENT_TYPE.as_str()).map(|value| value.to_owned()),
        content_length: response
            .header(header::CONTENT_LENGTH.as_str())
            .and_then(|value| value.parse().ok()),
        etag: response
            .header(header::ETAG.as_str())
            .map(|value| value.trim_matches('"').to_owned()),
        last_modified: response
            .header(header::LAST_MODIFIED.as_str())
            .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
            .map(|last_modified| last_modified.with_timezone(&Utc)),
        ..Default::default()
    };
    for (name, value) in response.headers().iter() {
        if let Some(name) = name.as_str().strip_prefix(USER_METADATA_PREFIX) {
            if let Ok(value) = value.to_str() {
                metadata.user_metadata.insert(name.to_owned(), value.to_owned());
            }
        }
    }
    metadata
}

fn object_metadata_from_file_info(info: &FileInfo) -> ObjectMetadata {
    ObjectMetadata {
        content_type: Some(info.mime_type.to_owned()),
        content_length: Some(info.fsize),
        etag: Some(info.hash.to_owned()),
        last_modified: Some(info.put_time_as_datetime()),
        storage_class: Some(StorageClass::from_kodo_type(info.file_type)),
        ..Default::default()
    }
}

impl Oss for QiniuOssClient {
    fn create_bucket_with_request(&self, request: &CreateBucketRequest) -> Result<Bucket> {
        if request.storage_class != StorageClass::Standard {
            warn!(
                "storage class {} is not supported when creating bucket {}, use Standard instead",
                request.storage_class, request.bucket_name
            );
        }
        let region_id = self.region.region_id();
        self.bucket_manager()?.create_bucket(&request.bucket_name, region_id)?;
        if request.canned_acl == Some(CannedAccessControlList::Private) {
            self.set_bucket_acl(&request.bucket_name, CannedAccessControlList::Private)?;
        }
        Ok(Bucket {
            name: request.bucket_name.to_owned(),
            location: Some(region_id.to_owned()),
            creation_date: Some(Utc::now()),
            storage_class: Some(StorageClass::Standard),
        })
    }

    fn delete_bucket(&self, bucket_name: &str) -> Result<()> {
        let no_such_bucket = |err: KodoError| {
            if err.is_not_found() {
                Error::Oss(OssError {
                    error_code: "NoSuchBucket".to_owned(),
                    message: format!("NoSuchBucket: {}", bucket_name),
                    request_id: err.x_req_id().map(|id| id.to_owned()),
                    ..Default::default()
                })
            } else {
                err.into()
            }
        };
        let bucket_manager = self.bucket_manager()?;
        let listing = bucket_manager
            .list_files(bucket_name, "", "", 2, "")
            .map_err(no_such_bucket)?;
        if !listing.items.is_empty() {
            return Err(Error::oss("BucketNotEmpty", format!("BucketNotEmpty: {}", bucket_name)));
        }
        bucket_manager.drop_bucket(bucket_name).map_err(no_such_bucket)?;
        self.domain_cache.remove(bucket_name);
        info!("bucket {} is deleted", bucket_name);
        Ok(())
    }

    fn list_buckets(&self) -> Result<Vec<Bucket>> {
        Ok(self
            .bucket_manager()?
            .buckets()?
            .into_iter()
            .map(Bucket::new)
            .collect())
    }

    /// 七牛没有分页列举存储空间的接口，在客户端按名称过滤
    fn list_buckets_with_request(&self, request: &ListBucketsRequest) -> Result<BucketList> {
        let mut names = self.bucket_manager()?.buckets()?;
        names.sort();
        let mut matched = names.into_iter().filter(|name| {
            request.prefix.as_deref().map_or(true, |prefix| name.starts_with(prefix))
                && request.marker.as_deref().map_or(true, |marker| name.as_str() > marker)
        });
        let max_keys = match request.max_keys {
            Some(0) => {
                return Ok(BucketList {
                    prefix: request.prefix.to_owned(),
                    marker: request.marker.to_owned(),
                    max_keys: request.max_keys,
                    ..Default::default()
                })
            }
            max_keys => max_keys.unwrap_or(usize::MAX),
        };
        let buckets: Vec<Bucket> = matched.by_ref().take(max_keys).map(Bucket::new).collect();
        let is_truncated = matched.next().is_some();
        Ok(BucketList {
            next_marker: if is_truncated {
                buckets.last().map(|bucket| bucket.name.to_owned())
            } else {
                None
            },
            is_truncated,
            buckets,
            prefix: request.prefix.to_owned(),
            marker: request.marker.to_owned(),
            max_keys: request.max_keys,
        })
    }

    fn get_bucket_info(&self, bucket_name: &str) -> Result<BucketInfo> {
        let info = self.bucket_manager()?.bucket_info(bucket_name)?;
        let mut bucket = Bucket::new(bucket_name);
        bucket.location = Some(info.region);
        Ok(BucketInfo {
            bucket,
            canned_acl: if info.private == AclType::Private.as_i32() {
                CannedAccessControlList::Private
            } else {
                CannedAccessControlList::PublicReadWrite
            },
        })
    }

    fn get_bucket_location(&self, bucket_name: &str) -> Result<String> {
        Ok(self.bucket_manager()?.bucket_info(bucket_name)?.region)
    }

    fn get_bucket_acl(&self, bucket_name: &str) -> Result<AccessControlList> {
        Ok(AccessControlList {
            canned_acl: self.get_bucket_info(bucket_name)?.canned_acl,
        })
    }

    fn set_bucket_acl(&self, bucket_name: &str, canned_acl: CannedAccessControlList) -> Result<()> {
        let acl = match canned_acl {
            CannedAccessControlList::Private => AclType::Private,
            _ => AclType::Public,
        };
        Ok(self.bucket_manager()?.set_bucket_acl(bucket_name, acl)?)
    }

    fn does_bucket_exist(&self, bucket_name: &str) -> Result<bool> {
        match self.bucket_manager()?.bucket_info(bucket_name) {
            Ok(_) => Ok(true),
            Err(err) if err.is_bucket_not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn set_bucket_website(&self, request: &SetBucketWebsiteRequest) -> Result<()> {
        let index_document = request.index_document.as_deref().unwrap_or_default();
        let error_document = request.error_document.as_deref().unwrap_or_default();
        let index_page = if index_document.is_empty() && error_document.is_empty() {
            IndexPageType::No
        } else if index_document == INDEX_DOCUMENT && error_document == ERROR_DOCUMENT {
            IndexPageType::Has
        } else {
            return Err(Error::client(
                "indexDocument must be index.html or '', errorDocument must be error-404 or ''",
            ));
        };
        Ok(self
            .bucket_manager()?
            .set_index_page(&request.bucket_name, index_page)?)
    }

    fn get_bucket_website(&self, bucket_name: &str) -> Result<BucketWebsiteResult> {
        let info = self.bucket_manager()?.bucket_info(bucket_name)?;
        if info.no_index_page == IndexPageType::Has.as_i32() {
            Ok(BucketWebsiteResult {
                index_document: INDEX_DOCUMENT.to_owned(),
                error_document: ERROR_DOCUMENT.to_owned(),
            })
        } else {
            Ok(BucketWebsiteResult::default())
        }
    }

    fn delete_bucket_website(&self, bucket_name: &str) -> Result<()> {
        Ok(self.bucket_manager()?.set_index_page(bucket_name, IndexPageType::No)?)
    }

    fn put_object(
        &self,
        bucket_name: &str,
        key: &str,
        input: &mut dyn Read,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<PutObjectResult> {
        let upload_token = self.upload_token(bucket_name, key)?;
        let response = self.upload_manager()?.put_reader(
            bucket_name,
            Some(key),
            &upload_token,
            input,
            &upload_options(key, metadata, true),
        )?;
        Ok(PutObjectResult {
            etag: response.hash().to_owned(),
            request_id: response.request_id().map(|id| id.to_owned()),
            callback_response_body: Some(response.body().to_owned()),
        })
    }

    fn put_object_from_file(
        &self,
        bucket_name: &str,
        key: &str,
        path: &Path,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<PutObjectResult> {
        let upload_token = self.upload_token(bucket_name, key)?;
        let response = self.upload_manager()?.put_file(
            bucket_name,
            Some(key),
            &upload_token,
            path,
            &upload_options(key, metadata, false),
        )?;
        Ok(PutObjectResult {
            etag: response.hash().to_owned(),
            request_id: response.request_id().map(|id| id.to_owned()),
            callback_response_body: Some(response.body().to_owned()),
        })
    }

    /// 通过区域的源站下载对象，请求的 Host 为存储空间绑定的域名
    fn get_object(&self, bucket_name: &str, key: &str) -> Result<OssObject> {
        self.ensure_running()?;
        let domain = self.bucket_domain(bucket_name)?;
        let mut signed_url = self.object_url(&domain, key)?;
        self.current_credential()?
            .sign_download_url(&mut signed_url, deadline_after(self.config.download_url_lifetime()));

        let mut request_url = Url::parse(&endpoint(self.region.io_host(), self.config.use_https()))
            .map_err(|err| Error::Client(ClientError::with_source(err.to_string(), err)))?;
        request_url.set_path(signed_url.path());
        request_url.set_query(signed_url.query());
        let host = HeaderValue::from_str(&domain)
            .map_err(|err| Error::Client(ClientError::with_source(err.to_string(), err)))?;
        let request = Request::new(Method::GET, request_url)
            .header(header::HOST, host)
            .header(header::USER_AGENT, HeaderValue::from_static(user_agent()));
        debug!("GET {} with host {}", request.url(), domain);

        let mut response = self.http_caller.call(&request).map_err(|err| {
            warn!("GET {} failed: {}", request.url(), err);
            Error::Client(ClientError::with_source(err.to_string(), err))
        })?;
        if !response.is_success() {
            let status_code = response.status_code();
            let raw_response_error = String::from_utf8_lossy(
                &response.read_body_sample(ERROR_BODY_SAMPLE_LIMIT).unwrap_or_default(),
            )
            .into_owned();
            if status_code.as_u16() == 404 && raw_response_error.contains("\"no such domain\"") {
                info!("domain {} is unbound from bucket {}", domain, bucket_name);
                self.domain_cache.remove(bucket_name);
            }
            warn!("GET {} responded {}", request.url(), status_code);
            return Err(Error::Oss(OssError {
                error_code: status_code.as_u16().to_string(),
                message: status_code.canonical_reason().unwrap_or_default().to_owned(),
                request_id: response.x_req_id().map(|id| id.to_owned()),
                host_id: Some(domain),
                method: Some(Method::GET.to_string()),
                raw_response_error: Some(raw_response_error),
            }));
        }
        Ok(OssObject {
            bucket_name: bucket_name.to_owned(),
            key: key.to_owned(),
            metadata: object_metadata_from_response(&response),
            content: response.into_body(),
        })
    }

    fn list_objects_with_request(&self, request: &ListObjectsRequest) -> Result<ObjectListing> {
        let listing = self.bucket_manager()?.list_files(
            &request.bucket_name,
            request.prefix.as_deref().unwrap_or_default(),
            request.marker.as_deref().unwrap_or_default(),
            request.max_keys.unwrap_or(0),
            request.delimiter.as_deref().unwrap_or_default(),
        )?;
        Ok(ObjectListing {
            bucket_name: request.bucket_name.to_owned(),
            is_truncated: listing.has_more(),
            object_summaries: listing
                .items
                .into_iter()
                .map(|info| ObjectSummary {
                    bucket_name: request.bucket_name.to_owned(),
                    last_modified: put_time_to_datetime(info.put_time),
                    storage_class: StorageClass::from_kodo_type(info.file_type),
                    size: info.fsize,
                    etag: info.hash,
                    key: info.key,
                })
                .collect(),
            next_marker: listing.marker.filter(|marker| !marker.is_empty()),
            common_prefixes: listing.common_prefixes.unwrap_or_default(),
            prefix: request.prefix.to_owned(),
            marker: request.marker.to_owned(),
            delimiter: request.delimiter.to_owned(),
            max_keys: request.max_keys,
        })
    }

    fn delete_object(&self, bucket_name: &str, key: &str) -> Result<()> {
        Ok(self.bucket_manager()?.delete(bucket_name, key)?)
    }

    fn delete_objects(&self, request: &DeleteObjectsRequest) -> Result<DeleteObjectsResult> {
        if request.keys.is_empty() {
            return Ok(DeleteObjectsResult::default());
        }
        let results = self
            .bucket_manager()?
            .batch_delete(&request.bucket_name, &request.keys)?;
        if results.len() != request.keys.len() {
            return Err(Error::client(format!(
                "batch delete in {} returned {} results for {} keys",
                request.bucket_name,
                results.len(),
                request.keys.len()
            )));
        }
        let mut deleted_objects = Vec::with_capacity(request.keys.len());
        for (key, result) in request.keys.iter().zip(results.iter()) {
            if !result.is_success() {
                return Err(Error::Oss(OssError {
                    error_code: result.code.to_string(),
                    message: format!(
                        "failed to delete {}/{}: {}",
                        request.bucket_name,
                        key,
                        result.error().unwrap_or_default()
                    ),
                    ..Default::default()
                }));
            }
            if !request.quiet {
                deleted_objects.push(key.to_owned());
            }
        }
        Ok(DeleteObjectsResult { deleted_objects })
    }

    fn copy_object(
        &self,
        source_bucket_name: &str,
        source_key: &str,
        destination_bucket_name: &str,
        destination_key: &str,
    ) -> Result<CopyObjectResult> {
        let bucket_manager = self.bucket_manager()?;
        bucket_manager
            .copy(source_bucket_name, source_key, destination_bucket_name, destination_key, false)
            .map_err(|err| Self::object_not_found_error(err, source_bucket_name, source_key))?;
        let info = bucket_manager.stat(destination_bucket_name, destination_key)?;
        Ok(CopyObjectResult {
            last_modified: Some(info.put_time_as_datetime()),
            etag: info.hash,
        })
    }

    fn get_object_metadata(&self, bucket_name: &str, key: &str) -> Result<ObjectMetadata> {
        let info = self
            .bucket_manager()?
            .stat(bucket_name, key)
            .map_err(|err| Self::object_not_found_error(err, bucket_name, key))?;
        Ok(object_metadata_from_file_info(&info))
    }

    fn get_simplified_object_meta(&self, bucket_name: &str, key: &str) -> Result<SimplifiedObjectMeta> {
        let info = self
            .bucket_manager()?
            .stat(bucket_name, key)
            .map_err(|err| Self::object_not_found_error(err, bucket_name, key))?;
        Ok(SimplifiedObjectMeta {
            last_modified: Some(info.put_time_as_datetime()),
            etag: info.hash,
            size: info.fsize,
            content_type: info.mime_type,
        })
    }

    fn does_object_exist(&self, bucket_name: &str, key: &str) -> Result<bool> {
        match self.bucket_manager()?.stat(bucket_name, key) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn generate_presigned_url(&self, bucket_name: &str, key: &str, expiration: DateTime<Utc>) -> Result<Url> {
        let domain = self.bucket_domain(bucket_name)?;
        let mut url = self.object_url(&domain, key)?;
        self.current_credential()?
            .sign_download_url(&mut url, deadline_at(expiration));
        Ok(url)
    }

    fn switch_credentials(&self, credential: Credential) -> Result<()> {
        self.ensure_running()?;
        info!("switch credential to access key {}", credential.access_key());
        *self.credential.write().unwrap_or_else(PoisonError::into_inner) =
            Arc::new(StaticCredentialProvider::from(credential));
        self.reset_managers();
        Ok(())
    }

    fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.reset_managers();
        self.domain_cache.clear();
    }
}

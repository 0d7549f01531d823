//! OSS 客户端接口
//!
//! `Oss` 接口的每个方法都有默认实现：基础方法返回 `Error::Unsupported`，
//! 接受请求结构体的重载方法转发到对应的基础方法。实现者只需要覆盖自己支持的基础方法。

mod model;

pub use model::*;

use crate::{
    credential::Credential,
    error::{ClientError, Error, Result},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};
use url::Url;

/// OSS 客户端接口
#[allow(unused_variables)]
pub trait Oss {
    fn create_bucket(&self, bucket_name: &str) -> Result<Bucket> {
        self.create_bucket_with_request(
            &CreateBucketRequest::new(bucket_name).canned_acl(CannedAccessControlList::PublicReadWrite),
        )
    }

    fn create_bucket_with_request(&self, request: &CreateBucketRequest) -> Result<Bucket> {
        Err(Error::unsupported("create_bucket"))
    }

    fn delete_bucket(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket"))
    }

    fn delete_bucket_with_request(&self, request: &GenericRequest) -> Result<()> {
        self.delete_bucket(&request.bucket_name)
    }

    fn list_buckets(&self) -> Result<Vec<Bucket>> {
        Err(Error::unsupported("list_buckets"))
    }

    fn list_buckets_with_request(&self, request: &ListBucketsRequest) -> Result<BucketList> {
        Err(Error::unsupported("list_buckets_with_request"))
    }

    fn list_buckets_with(&self, prefix: Option<&str>, marker: Option<&str>, max_keys: Option<usize>) -> Result<BucketList> {
        self.list_buckets_with_request(&ListBucketsRequest {
            prefix: prefix.map(|prefix| prefix.to_owned()),
            marker: marker.map(|marker| marker.to_owned()),
            max_keys,
        })
    }

    fn get_bucket_info(&self, bucket_name: &str) -> Result<BucketInfo> {
        Err(Error::unsupported("get_bucket_info"))
    }

    fn get_bucket_info_with_request(&self, request: &GenericRequest) -> Result<BucketInfo> {
        self.get_bucket_info(&request.bucket_name)
    }

    fn get_bucket_location(&self, bucket_name: &str) -> Result<String> {
        Err(Error::unsupported("get_bucket_location"))
    }

    fn get_bucket_location_with_request(&self, request: &GenericRequest) -> Result<String> {
        self.get_bucket_location(&request.bucket_name)
    }

    fn get_bucket_metadata(&self, bucket_name: &str) -> Result<HashMap<String, String>> {
        Err(Error::unsupported("get_bucket_metadata"))
    }

    fn get_bucket_acl(&self, bucket_name: &str) -> Result<AccessControlList> {
        Err(Error::unsupported("get_bucket_acl"))
    }

    fn get_bucket_acl_with_request(&self, request: &GenericRequest) -> Result<AccessControlList> {
        self.get_bucket_acl(&request.bucket_name)
    }

    fn set_bucket_acl(&self, bucket_name: &str, canned_acl: CannedAccessControlList) -> Result<()> {
        Err(Error::unsupported("set_bucket_acl"))
    }

    fn set_bucket_acl_with_request(&self, request: &SetBucketAclRequest) -> Result<()> {
        self.set_bucket_acl(&request.bucket_name, request.canned_acl)
    }

    fn does_bucket_exist(&self, bucket_name: &str) -> Result<bool> {
        Err(Error::unsupported("does_bucket_exist"))
    }

    fn does_bucket_exist_with_request(&self, request: &GenericRequest) -> Result<bool> {
        self.does_bucket_exist(&request.bucket_name)
    }

    fn set_bucket_website(&self, request: &SetBucketWebsiteRequest) -> Result<()> {
        Err(Error::unsupported("set_bucket_website"))
    }

    fn get_bucket_website(&self, bucket_name: &str) -> Result<BucketWebsiteResult> {
        Err(Error::unsupported("get_bucket_website"))
    }

    fn get_bucket_website_with_request(&self, request: &GenericRequest) -> Result<BucketWebsiteResult> {
        self.get_bucket_website(&request.bucket_name)
    }

    fn delete_bucket_website(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_website"))
    }

    fn delete_bucket_website_with_request(&self, request: &GenericRequest) -> Result<()> {
        self.delete_bucket_website(&request.bucket_name)
    }

    fn put_object(
        &self,
        bucket_name: &str,
        key: &str,
        input: &mut dyn Read,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<PutObjectResult> {
        Err(Error::unsupported("put_object"))
    }

    fn put_object_from_file(
        &self,
        bucket_name: &str,
        key: &str,
        path: &Path,
        metadata: Option<&ObjectMetadata>,
    ) -> Result<PutObjectResult> {
        Err(Error::unsupported("put_object_from_file"))
    }

    fn put_object_with_signed_url(
        &self,
        signed_url: &Url,
        path: &Path,
        headers: &HashMap<String, String>,
    ) -> Result<PutObjectResult> {
        Err(Error::unsupported("put_object_with_signed_url"))
    }

    fn append_object(&self, bucket_name: &str, key: &str, position: u64, input: &mut dyn Read) -> Result<u64> {
        Err(Error::unsupported("append_object"))
    }

    fn get_object(&self, bucket_name: &str, key: &str) -> Result<OssObject> {
        Err(Error::unsupported("get_object"))
    }

    fn get_object_with_request(&self, request: &GetObjectRequest) -> Result<OssObject> {
        self.get_object(&request.bucket_name, &request.key)
    }

    /// 下载对象到本地文件，返回对象元数据
    fn get_object_to_file(&self, request: &GetObjectRequest, path: &Path) -> Result<ObjectMetadata> {
        let mut object = self.get_object_with_request(request)?;
        copy_to_file(&mut object.content, path)
            .map_err(|err| ClientError::with_source(format!("Cannot read object content stream: {}", err), err))?;
        Ok(object.metadata)
    }

    fn get_object_with_signed_url(&self, signed_url: &Url, headers: &HashMap<String, String>) -> Result<OssObject> {
        Err(Error::unsupported("get_object_with_signed_url"))
    }

    fn select_object(&self, bucket_name: &str, key: &str, expression: &str) -> Result<OssObject> {
        Err(Error::unsupported("select_object"))
    }

    fn list_objects(&self, bucket_name: &str) -> Result<ObjectListing> {
        self.list_objects_with_request(&ListObjectsRequest::new(bucket_name))
    }

    fn list_objects_with_prefix(&self, bucket_name: &str, prefix: &str) -> Result<ObjectListing> {
        self.list_objects_with_request(&ListObjectsRequest::new(bucket_name).prefix(prefix))
    }

    fn list_objects_with_request(&self, request: &ListObjectsRequest) -> Result<ObjectListing> {
        Err(Error::unsupported("list_objects"))
    }

    fn delete_object(&self, bucket_name: &str, key: &str) -> Result<()> {
        Err(Error::unsupported("delete_object"))
    }

    fn delete_object_with_request(&self, request: &GenericRequest) -> Result<()> {
        self.delete_object(&request.bucket_name, request.key())
    }

    fn delete_objects(&self, request: &DeleteObjectsRequest) -> Result<DeleteObjectsResult> {
        Err(Error::unsupported("delete_objects"))
    }

    fn copy_object(
        &self,
        source_bucket_name: &str,
        source_key: &str,
        destination_bucket_name: &str,
        destination_key: &str,
    ) -> Result<CopyObjectResult> {
        Err(Error::unsupported("copy_object"))
    }

    fn copy_object_with_request(&self, request: &CopyObjectRequest) -> Result<CopyObjectResult> {
        self.copy_object(
            &request.source_bucket_name,
            &request.source_key,
            &request.destination_bucket_name,
            &request.destination_key,
        )
    }

    fn get_object_metadata(&self, bucket_name: &str, key: &str) -> Result<ObjectMetadata> {
        Err(Error::unsupported("get_object_metadata"))
    }

    fn get_object_metadata_with_request(&self, request: &GenericRequest) -> Result<ObjectMetadata> {
        self.get_object_metadata(&request.bucket_name, request.key())
    }

    fn get_simplified_object_meta(&self, bucket_name: &str, key: &str) -> Result<SimplifiedObjectMeta> {
        Err(Error::unsupported("get_simplified_object_meta"))
    }

    fn get_simplified_object_meta_with_request(&self, request: &GenericRequest) -> Result<SimplifiedObjectMeta> {
        self.get_simplified_object_meta(&request.bucket_name, request.key())
    }

    fn does_object_exist(&self, bucket_name: &str, key: &str) -> Result<bool> {
        Err(Error::unsupported("does_object_exist"))
    }

    fn does_object_exist_with_request(&self, request: &GenericRequest) -> Result<bool> {
        self.does_object_exist(&request.bucket_name, request.key())
    }

    fn set_object_acl(&self, bucket_name: &str, key: &str, canned_acl: CannedAccessControlList) -> Result<()> {
        Err(Error::unsupported("set_object_acl"))
    }

    fn get_object_acl(&self, bucket_name: &str, key: &str) -> Result<AccessControlList> {
        Err(Error::unsupported("get_object_acl"))
    }

    fn restore_object(&self, bucket_name: &str, key: &str) -> Result<()> {
        Err(Error::unsupported("restore_object"))
    }

    fn create_symlink(&self, bucket_name: &str, symlink: &str, target: &str) -> Result<()> {
        Err(Error::unsupported("create_symlink"))
    }

    fn get_symlink(&self, bucket_name: &str, symlink: &str) -> Result<String> {
        Err(Error::unsupported("get_symlink"))
    }

    fn process_object(&self, bucket_name: &str, key: &str, process: &str) -> Result<String> {
        Err(Error::unsupported("process_object"))
    }

    fn generate_presigned_url(&self, bucket_name: &str, key: &str, expiration: DateTime<Utc>) -> Result<Url> {
        Err(Error::unsupported("generate_presigned_url"))
    }

    /// 七牛的下载地址与请求方法无关，`method` 将被忽略
    fn generate_presigned_url_with_method(
        &self,
        bucket_name: &str,
        key: &str,
        expiration: DateTime<Utc>,
        method: HttpMethod,
    ) -> Result<Url> {
        self.generate_presigned_url(bucket_name, key, expiration)
    }

    fn generate_presigned_url_with_request(&self, request: &GeneratePresignedUrlRequest) -> Result<Url> {
        self.generate_presigned_url_with_method(&request.bucket_name, &request.key, request.expiration, request.method)
    }

    fn generate_post_policy(&self, expiration: DateTime<Utc>, conditions: &[(String, String)]) -> Result<String> {
        Err(Error::unsupported("generate_post_policy"))
    }

    fn calculate_post_signature(&self, post_policy: &str) -> Result<String> {
        Err(Error::unsupported("calculate_post_signature"))
    }

    fn initiate_multipart_upload(&self, bucket_name: &str, key: &str) -> Result<String> {
        Err(Error::unsupported("initiate_multipart_upload"))
    }

    fn upload_part(
        &self,
        bucket_name: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        input: &mut dyn Read,
    ) -> Result<PartETag> {
        Err(Error::unsupported("upload_part"))
    }

    fn upload_part_copy(
        &self,
        source_bucket_name: &str,
        source_key: &str,
        bucket_name: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
    ) -> Result<PartETag> {
        Err(Error::unsupported("upload_part_copy"))
    }

    fn complete_multipart_upload(
        &self,
        bucket_name: &str,
        key: &str,
        upload_id: &str,
        parts: &[PartETag],
    ) -> Result<PutObjectResult> {
        Err(Error::unsupported("complete_multipart_upload"))
    }

    fn abort_multipart_upload(&self, bucket_name: &str, key: &str, upload_id: &str) -> Result<()> {
        Err(Error::unsupported("abort_multipart_upload"))
    }

    fn list_multipart_uploads(&self, bucket_name: &str) -> Result<Vec<MultipartUpload>> {
        Err(Error::unsupported("list_multipart_uploads"))
    }

    fn list_parts(&self, bucket_name: &str, key: &str, upload_id: &str) -> Result<Vec<PartETag>> {
        Err(Error::unsupported("list_parts"))
    }

    /// 断点续传上传
    fn upload_file(&self, bucket_name: &str, key: &str, path: &Path, checkpoint_file: Option<&Path>) -> Result<PutObjectResult> {
        Err(Error::unsupported("upload_file"))
    }

    /// 断点续传下载
    fn download_file(&self, bucket_name: &str, key: &str, path: &Path, checkpoint_file: Option<&Path>) -> Result<ObjectMetadata> {
        Err(Error::unsupported("download_file"))
    }

    fn set_bucket_cors(&self, bucket_name: &str, rules: &[CorsRule]) -> Result<()> {
        Err(Error::unsupported("set_bucket_cors"))
    }

    fn get_bucket_cors_rules(&self, bucket_name: &str) -> Result<Vec<CorsRule>> {
        Err(Error::unsupported("get_bucket_cors_rules"))
    }

    fn delete_bucket_cors_rules(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_cors_rules"))
    }

    fn set_bucket_lifecycle(&self, bucket_name: &str, rules: &[LifecycleRule]) -> Result<()> {
        Err(Error::unsupported("set_bucket_lifecycle"))
    }

    fn get_bucket_lifecycle(&self, bucket_name: &str) -> Result<Vec<LifecycleRule>> {
        Err(Error::unsupported("get_bucket_lifecycle"))
    }

    fn delete_bucket_lifecycle(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_lifecycle"))
    }

    fn add_bucket_replication(&self, bucket_name: &str, rule: &ReplicationRule) -> Result<()> {
        Err(Error::unsupported("add_bucket_replication"))
    }

    fn get_bucket_replication(&self, bucket_name: &str) -> Result<Vec<ReplicationRule>> {
        Err(Error::unsupported("get_bucket_replication"))
    }

    fn delete_bucket_replication(&self, bucket_name: &str, rule_id: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_replication"))
    }

    fn get_bucket_replication_location(&self, bucket_name: &str) -> Result<Vec<String>> {
        Err(Error::unsupported("get_bucket_replication_location"))
    }

    fn set_bucket_logging(&self, bucket_name: &str, target_bucket: &str, target_prefix: &str) -> Result<()> {
        Err(Error::unsupported("set_bucket_logging"))
    }

    fn get_bucket_logging(&self, bucket_name: &str) -> Result<BucketLoggingResult> {
        Err(Error::unsupported("get_bucket_logging"))
    }

    fn delete_bucket_logging(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_logging"))
    }

    fn set_bucket_referer(&self, bucket_name: &str, referer: &BucketReferer) -> Result<()> {
        Err(Error::unsupported("set_bucket_referer"))
    }

    fn get_bucket_referer(&self, bucket_name: &str) -> Result<BucketReferer> {
        Err(Error::unsupported("get_bucket_referer"))
    }

    fn set_bucket_tagging(&self, bucket_name: &str, tags: &HashMap<String, String>) -> Result<()> {
        Err(Error::unsupported("set_bucket_tagging"))
    }

    fn get_bucket_tagging(&self, bucket_name: &str) -> Result<HashMap<String, String>> {
        Err(Error::unsupported("get_bucket_tagging"))
    }

    fn delete_bucket_tagging(&self, bucket_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_tagging"))
    }

    fn add_bucket_cname(&self, bucket_name: &str, domain: &str) -> Result<()> {
        Err(Error::unsupported("add_bucket_cname"))
    }

    fn get_bucket_cname(&self, bucket_name: &str) -> Result<Vec<String>> {
        Err(Error::unsupported("get_bucket_cname"))
    }

    fn delete_bucket_cname(&self, bucket_name: &str, domain: &str) -> Result<()> {
        Err(Error::unsupported("delete_bucket_cname"))
    }

    fn get_bucket_stat(&self, bucket_name: &str) -> Result<HashMap<String, u64>> {
        Err(Error::unsupported("get_bucket_stat"))
    }

    fn set_bucket_storage_capacity(&self, bucket_name: &str, capacity_gb: i64) -> Result<()> {
        Err(Error::unsupported("set_bucket_storage_capacity"))
    }

    fn get_bucket_storage_capacity(&self, bucket_name: &str) -> Result<i64> {
        Err(Error::unsupported("get_bucket_storage_capacity"))
    }

    fn put_image_style(&self, bucket_name: &str, style_name: &str, style: &str) -> Result<()> {
        Err(Error::unsupported("put_image_style"))
    }

    fn get_image_style(&self, bucket_name: &str, style_name: &str) -> Result<String> {
        Err(Error::unsupported("get_image_style"))
    }

    fn delete_image_style(&self, bucket_name: &str, style_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_image_style"))
    }

    fn list_image_styles(&self, bucket_name: &str) -> Result<Vec<String>> {
        Err(Error::unsupported("list_image_styles"))
    }

    fn create_live_channel(&self, bucket_name: &str, channel_name: &str) -> Result<()> {
        Err(Error::unsupported("create_live_channel"))
    }

    fn delete_live_channel(&self, bucket_name: &str, channel_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_live_channel"))
    }

    fn list_live_channels(&self, bucket_name: &str) -> Result<Vec<String>> {
        Err(Error::unsupported("list_live_channels"))
    }

    fn generate_rtmp_uri(&self, bucket_name: &str, channel_name: &str, playlist_name: &str, expires: u64) -> Result<String> {
        Err(Error::unsupported("generate_rtmp_uri"))
    }

    fn create_udf(&self, udf_name: &str) -> Result<()> {
        Err(Error::unsupported("create_udf"))
    }

    fn list_udfs(&self) -> Result<Vec<String>> {
        Err(Error::unsupported("list_udfs"))
    }

    fn delete_udf(&self, udf_name: &str) -> Result<()> {
        Err(Error::unsupported("delete_udf"))
    }

    fn get_endpoint(&self) -> Result<Url> {
        Err(Error::unsupported("get_endpoint"))
    }

    fn set_endpoint(&self, endpoint: &str) -> Result<()> {
        Err(Error::unsupported("set_endpoint"))
    }

    fn switch_credentials(&self, credential: Credential) -> Result<()> {
        Err(Error::unsupported("switch_credentials"))
    }

    fn shutdown(&self) {}
}

fn copy_to_file(content: &mut dyn Read, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    io::copy(content, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NothingSupported;

    impl Oss for NothingSupported {}

    struct OnlyListing;

    impl Oss for OnlyListing {
        fn list_objects_with_request(&self, request: &ListObjectsRequest) -> Result<ObjectListing> {
            Ok(ObjectListing {
                bucket_name: request.bucket_name.to_owned(),
                prefix: request.prefix.to_owned(),
                ..Default::default()
            })
        }
    }

    #[test]
    fn test_unsupported_by_default() {
        let oss = NothingSupported;
        assert!(oss.create_bucket("bucket").unwrap_err().is_unsupported());
        assert!(oss.list_objects("bucket").unwrap_err().is_unsupported());
        assert!(oss.initiate_multipart_upload("bucket", "key").unwrap_err().is_unsupported());
        assert!(oss.set_bucket_cors("bucket", &[]).unwrap_err().is_unsupported());
        match oss.get_bucket_lifecycle("bucket").unwrap_err() {
            Error::Unsupported { operation } => assert_eq!(operation, "get_bucket_lifecycle"),
            err => panic!("unexpected error: {:?}", err),
        }
        oss.shutdown();
    }

    #[test]
    fn test_overloads_delegate() {
        let oss = OnlyListing;
        let listing = oss.list_objects_with_prefix("bucket", "dir/").unwrap();
        assert_eq!(listing.bucket_name, "bucket");
        assert_eq!(listing.prefix.as_deref(), Some("dir/"));
        assert_eq!(oss.list_objects("bucket").unwrap().prefix, None);
        assert!(oss
            .get_object_to_file(&GetObjectRequest::new("bucket", "key"), Path::new("/tmp/never-written"))
            .unwrap_err()
            .is_unsupported());
    }
}

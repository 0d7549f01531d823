use super::{
    client::ApiClient,
    error::KodoResult,
    model::{AclType, BatchOpResult, BucketInfo, FileInfo, FileListing, IndexPageType},
    regions::Regions,
};
use crate::{config::Config, region::Region, utils::encode_entry};
use assert_impl::assert_impl;
use serde::Deserialize;
use std::sync::Arc;

/// 存储空间与对象管理
///
/// 存储空间级别的接口访问 UC 服务，对象级别的接口访问存储空间所在区域的 RS 与 RSF 服务
#[derive(Debug)]
pub struct BucketManager {
    client: ApiClient,
    regions: Arc<Regions>,
    uc_host: String,
    api_host: String,
}

#[derive(Deserialize)]
struct DomainInfo {
    domain: String,
}

/// 兼容返回字符串数组和对象数组两种形式的域名列表
#[derive(Deserialize)]
#[serde(untagged)]
enum DomainListItem {
    Plain(String),
    Detailed(DomainInfo),
}

impl BucketManager {
    pub(crate) fn new(client: ApiClient, regions: Arc<Regions>, config: &Config) -> Self {
        Self {
            client,
            regions,
            uc_host: config.uc_host().to_owned(),
            api_host: config.api_host().to_owned(),
        }
    }

    /// 列出当前用户的全部存储空间名称
    pub fn buckets(&self) -> KodoResult<Vec<String>> {
        self.client.get(&self.uc_host, "/buckets").authorization().send_json()
    }

    pub fn create_bucket(&self, bucket: &str, region_id: &str) -> KodoResult<()> {
        self.client
            .post(&self.uc_host, &format!("/mkbucketv3/{}/region/{}", bucket, region_id))
            .authorization()
            .send_and_ignore_body()
    }

    /// 删除存储空间，非空的存储空间无法删除
    pub fn drop_bucket(&self, bucket: &str) -> KodoResult<()> {
        self.client
            .post(&self.uc_host, &format!("/drop/{}", bucket))
            .authorization()
            .send_and_ignore_body()
    }

    pub fn bucket_info(&self, bucket: &str) -> KodoResult<BucketInfo> {
        self.client
            .post(&self.uc_host, "/v2/bucketInfo")
            .query("bucket", bucket)
            .authorization()
            .send_json()
    }

    pub fn set_bucket_acl(&self, bucket: &str, acl: AclType) -> KodoResult<()> {
        self.client
            .post(&self.uc_host, "/private")
            .authorization()
            .form_body(&[("bucket", bucket.to_owned()), ("private", acl.as_i32().to_string())])?
            .send_and_ignore_body()
    }

    pub fn set_index_page(&self, bucket: &str, index_page: IndexPageType) -> KodoResult<()> {
        self.client
            .post(&self.uc_host, "/noIndexPage")
            .query("bucket", bucket)
            .query("noIndexPage", index_page.as_i32().to_string())
            .authorization()
            .send_and_ignore_body()
    }

    /// 获取存储空间绑定的下载域名
    pub fn domain_list(&self, bucket: &str) -> KodoResult<Vec<String>> {
        let items: Vec<DomainListItem> = self
            .client
            .get(&self.api_host, "/v6/domain/list")
            .query("tbl", bucket)
            .authorization()
            .send_json()?;
        Ok(items
            .into_iter()
            .map(|item| match item {
                DomainListItem::Plain(domain) => domain,
                DomainListItem::Detailed(info) => info.domain,
            })
            .collect())
    }

    pub fn stat(&self, bucket: &str, key: &str) -> KodoResult<FileInfo> {
        let region = self.region(bucket)?;
        let mut info: FileInfo = self
            .client
            .post(region.rs_host(), &format!("/stat/{}", encode_entry(bucket, key)))
            .authorization()
            .send_json()?;
        if info.key.is_empty() {
            info.key = key.to_owned();
        }
        Ok(info)
    }

    pub fn delete(&self, bucket: &str, key: &str) -> KodoResult<()> {
        let region = self.region(bucket)?;
        self.client
            .post(region.rs_host(), &format!("/delete/{}", encode_entry(bucket, key)))
            .authorization()
            .send_and_ignore_body()
    }

    pub fn copy(&self, src_bucket: &str, src_key: &str, dst_bucket: &str, dst_key: &str, force: bool) -> KodoResult<()> {
        let region = self.region(src_bucket)?;
        self.client
            .post(
                region.rs_host(),
                &format!(
                    "/copy/{}/{}/force/{}",
                    encode_entry(src_bucket, src_key),
                    encode_entry(dst_bucket, dst_key),
                    force
                ),
            )
            .authorization()
            .send_and_ignore_body()
    }

    /// 批量删除同一存储空间中的对象，返回结果与 `keys` 一一对应
    pub fn batch_delete(&self, bucket: &str, keys: &[impl AsRef<str>]) -> KodoResult<Vec<BatchOpResult>> {
        let operations: Vec<(&str, String)> = keys
            .iter()
            .map(|key| ("op", format!("/delete/{}", encode_entry(bucket, key.as_ref()))))
            .collect();
        let region = self.region(bucket)?;
        self.client
            .post(region.rs_host(), "/batch")
            .authorization()
            .form_body(&operations)?
            .send_json()
    }

    /// 列举对象，`limit` 为 0 时使用服务端的默认值
    pub fn list_files(
        &self,
        bucket: &str,
        prefix: &str,
        marker: &str,
        limit: usize,
        delimiter: &str,
    ) -> KodoResult<FileListing> {
        let region = self.region(bucket)?;
        let mut request = self
            .client
            .get(region.rsf_host(), "/list")
            .query("bucket", bucket)
            .query_if_not_empty("prefix", prefix)
            .query_if_not_empty("marker", marker)
            .query_if_not_empty("delimiter", delimiter);
        if limit > 0 {
            request = request.query("limit", limit.to_string());
        }
        request.authorization().send_json()
    }

    pub(crate) fn region(&self, bucket: &str) -> KodoResult<Region> {
        self.regions.region_for(&self.client, bucket)
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

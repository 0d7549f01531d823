use super::{
    client::ApiClient,
    error::{KodoError, KodoErrorKind, KodoResult},
};
use crate::{
    cache::LruCache,
    region::{Region, RegionQueryResults},
};
use log::info;
use std::time::Duration;

const REGION_CACHE_CAPACITY: usize = 64;

/// 区域解析器
///
/// 设置了固定区域时总是返回该区域，否则通过 UC 服务按存储空间查询并缓存
#[derive(Debug)]
pub(crate) enum Regions {
    Fixed(Region),
    Query { uc_host: String, cache: LruCache<Region> },
}

impl Regions {
    pub(crate) fn fixed(region: Region) -> Self {
        Regions::Fixed(region)
    }

    pub(crate) fn query(uc_host: impl Into<String>, lifetime: Duration) -> Self {
        Regions::Query {
            uc_host: uc_host.into(),
            cache: LruCache::new(REGION_CACHE_CAPACITY, lifetime),
        }
    }

    pub(crate) fn region_for(&self, client: &ApiClient, bucket: &str) -> KodoResult<Region> {
        match self {
            Regions::Fixed(region) => Ok(region.to_owned()),
            Regions::Query { uc_host, cache } => {
                if let Some(region) = cache.get(bucket) {
                    return Ok(region);
                }
                let access_key = client
                    .credential()
                    .get()
                    .map_err(KodoError::from_local_io)?
                    .access_key()
                    .to_owned();
                let region = client
                    .get(uc_host, "/v3/query")
                    .query("ak", access_key)
                    .query("bucket", bucket)
                    .send_json::<RegionQueryResults>()?
                    .into_region()
                    .ok_or_else(|| {
                        KodoError::new(
                            KodoErrorKind::ParseResponseError,
                            format!("no region found for bucket {}", bucket),
                        )
                    })?;
                info!("bucket {} is located in region {}", bucket, region.region_id());
                cache.put(bucket, region.to_owned());
                Ok(region)
            }
        }
    }
}

use assert_impl::assert_impl;
use derive_builder::Builder;
use getset::Getters;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fmt;

/// 七牛公有云区域 ID
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RegionId {
    /// 华东
    Z0,
    /// 华北
    Z1,
    /// 华南
    Z2,
    /// 北美
    NA0,
    /// 东南亚
    AS0,
}

impl RegionId {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::Z0 => "z0",
            RegionId::Z1 => "z1",
            RegionId::Z2 => "z2",
            RegionId::NA0 => "na0",
            RegionId::AS0 => "as0",
        }
    }

    pub fn from_id(region_id: &str) -> Option<Self> {
        match region_id {
            "z0" => Some(RegionId::Z0),
            "z1" => Some(RegionId::Z1),
            "z2" => Some(RegionId::Z2),
            "na0" => Some(RegionId::NA0),
            "as0" => Some(RegionId::AS0),
            _ => None,
        }
    }

    pub fn as_region(self) -> &'static Region {
        match self {
            RegionId::Z0 => Region::z0(),
            RegionId::Z1 => Region::z1(),
            RegionId::Z2 => Region::z2(),
            RegionId::NA0 => Region::na0(),
            RegionId::AS0 => Region::as0(),
        }
    }
}

impl AsRef<str> for RegionId {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 区域
///
/// 包含一个存储区域内各个服务的主机地址。主机地址可以不带协议，此时协议由 `Config::use_https` 决定
#[derive(Getters, Builder, Clone, Debug, Default, Eq, PartialEq)]
#[builder(default, pattern = "owned", setter(into))]
#[get = "pub"]
pub struct Region {
    /// 区域 ID，创建存储空间时使用
    region_id: String,
    /// 上传服务
    up_host: String,
    /// 源站下载服务
    io_host: String,
    /// 对象管理服务
    rs_host: String,
    /// 对象列举服务
    rsf_host: String,
    /// API 服务
    api_host: String,
}

impl Region {
    pub fn builder(region_id: impl Into<String>) -> RegionBuilder {
        RegionBuilder::default().region_id(region_id)
    }

    pub fn z0() -> &'static Region {
        &HUA_DONG
    }

    pub fn hua_dong() -> &'static Region {
        &HUA_DONG
    }

    pub fn z1() -> &'static Region {
        &HUA_BEI
    }

    pub fn hua_bei() -> &'static Region {
        &HUA_BEI
    }

    pub fn z2() -> &'static Region {
        &HUA_NAN
    }

    pub fn hua_nan() -> &'static Region {
        &HUA_NAN
    }

    pub fn na0() -> &'static Region {
        &NORTH_AMERICA
    }

    pub fn north_america() -> &'static Region {
        &NORTH_AMERICA
    }

    pub fn as0() -> &'static Region {
        &SINGAPORE
    }

    pub fn singapore() -> &'static Region {
        &SINGAPORE
    }

    pub fn all() -> &'static [&'static Region] {
        &ALL_REGIONS[..]
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

fn preset(region_id: RegionId) -> Region {
    let id = region_id.as_str();
    let (up_host, io_host) = match region_id {
        RegionId::Z0 => ("upload.qiniup.com".to_owned(), "iovip.qbox.me".to_owned()),
        _ => (format!("upload-{}.qiniup.com", id), format!("iovip-{}.qbox.me", id)),
    };
    Region {
        region_id: id.to_owned(),
        up_host,
        io_host,
        rs_host: format!("rs-{}.qiniuapi.com", id),
        rsf_host: format!("rsf-{}.qiniuapi.com", id),
        api_host: format!("api-{}.qiniuapi.com", id),
    }
}

static HUA_DONG: Lazy<Region> = Lazy::new(|| preset(RegionId::Z0));
static HUA_BEI: Lazy<Region> = Lazy::new(|| preset(RegionId::Z1));
static HUA_NAN: Lazy<Region> = Lazy::new(|| preset(RegionId::Z2));
static NORTH_AMERICA: Lazy<Region> = Lazy::new(|| preset(RegionId::NA0));
static SINGAPORE: Lazy<Region> = Lazy::new(|| preset(RegionId::AS0));
static ALL_REGIONS: Lazy<[&'static Region; 5]> = Lazy::new(|| {
    [
        Region::hua_dong(),
        Region::hua_bei(),
        Region::hua_nan(),
        Region::north_america(),
        Region::singapore(),
    ]
});

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct RegionQueryResults {
    hosts: Vec<RegionQueryResult>,
}

#[derive(Deserialize, Debug, Clone)]
struct RegionQueryResult {
    #[serde(default)]
    region: Option<String>,
    io: RegionQueryResultForIO,
    up: RegionQueryResultForUP,
    #[serde(default)]
    rs: Option<RegionQueryResultForAPI>,
    #[serde(default)]
    rsf: Option<RegionQueryResultForAPI>,
    #[serde(default)]
    api: Option<RegionQueryResultForAPI>,
}

#[derive(Deserialize, Debug, Clone)]
struct RegionQueryResultForIO {
    src: RegionQueryResultDomains,
}

#[derive(Deserialize, Debug, Clone)]
struct RegionQueryResultForUP {
    #[serde(default)]
    acc: Option<RegionQueryResultDomains>,
    src: RegionQueryResultDomains,
}

#[derive(Deserialize, Debug, Clone)]
struct RegionQueryResultForAPI {
    #[serde(default)]
    acc: Option<RegionQueryResultDomains>,
    #[serde(default)]
    src: Option<RegionQueryResultDomains>,
}

#[derive(Deserialize, Debug, Clone)]
struct RegionQueryResultDomains {
    main: Vec<String>,
}

impl RegionQueryResultDomains {
    fn first(&self) -> Option<&str> {
        self.main.first().map(|domain| domain.as_str())
    }
}

impl RegionQueryResultForAPI {
    fn first(&self) -> Option<&str> {
        self.acc
            .as_ref()
            .and_then(|domains| domains.first())
            .or_else(|| self.src.as_ref().and_then(|domains| domains.first()))
    }
}

impl RegionQueryResults {
    pub(crate) fn into_region(self) -> Option<Region> {
        self.hosts.into_iter().next().map(|host_result| host_result.into_region())
    }
}

impl RegionQueryResult {
    fn into_region(self) -> Region {
        let fallback = self
            .region
            .as_deref()
            .and_then(RegionId::from_id)
            .map(|region_id| region_id.as_region().to_owned())
            .unwrap_or_else(|| Region::z0().to_owned());
        return Region {
            region_id: self.region.clone().unwrap_or_else(|| fallback.region_id.to_owned()),
            up_host: self
                .up
                .acc
                .as_ref()
                .and_then(|domains| domains.first())
                .or_else(|| self.up.src.first())
                .unwrap_or(&fallback.up_host)
                .to_owned(),
            io_host: self.io.src.first().unwrap_or(&fallback.io_host).to_owned(),
            rs_host: pick(self.rs.as_ref(), &fallback.rs_host),
            rsf_host: pick(self.rsf.as_ref(), &fallback.rsf_host),
            api_host: pick(self.api.as_ref(), &fallback.api_host),
        };

        fn pick(result: Option<&RegionQueryResultForAPI>, default: &str) -> String {
            result.and_then(|result| result.first()).unwrap_or(default).to_owned()
        }
    }
}

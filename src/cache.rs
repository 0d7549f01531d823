//! 带有效期的 LRU 缓存
//!
//! 用于缓存存储空间绑定的下载域名与查询得到的区域

use indexmap::IndexMap;
use log::debug;
use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

/// 有界 LRU 缓存
///
/// 条目总数不超过 `capacity`，超过有效期的条目不会被返回
pub struct LruCache<V> {
    entries: Mutex<IndexMap<String, CacheEntry<V>>>,
    capacity: usize,
    lifetime: Duration,
}

impl<V: Clone> LruCache<V> {
    pub fn new(capacity: usize, lifetime: Duration) -> Self {
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
            lifetime,
        }
    }

    /// 获取未过期的条目，命中时将条目移动到最近使用的位置，过期条目将被移除
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();
        let entry = entries.shift_remove(key)?;
        if entry.created_at.elapsed() < self.lifetime {
            let value = entry.value.to_owned();
            entries.insert(key.to_owned(), entry);
            Some(value)
        } else {
            debug!("cache entry of {} is expired", key);
            None
        }
    }

    /// 插入条目，超过容量时淘汰最久未使用的条目
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let mut entries = self.lock();
        entries.shift_remove(&key);
        entries.insert(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
        while entries.len() > self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!("cache entry of {} is evicted", evicted);
            }
        }
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.lock().shift_remove(key).map(|entry| entry.value)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// 存储空间到下载域名的缓存
pub type DomainCache = LruCache<String>;

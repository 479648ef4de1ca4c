// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

const CACHE_HITS: &str = "relation_cache_hits_total";
const CACHE_MISSES: &str = "relation_cache_misses_total";
const CACHE_NEGATIVE_HITS: &str = "relation_cache_negative_hits_total";
const CACHE_EVICTION_FAILURES: &str = "relation_cache_eviction_failures_total";
const RELATION_WRITES: &str = "relation_writes_total";

/// 初始化指标系统
///
/// 启动 Prometheus 导出器并注册关系服务的计数器。
/// 地址被占用时只记录告警，不影响服务启动。
pub fn init_metrics(listen_addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = listen_addr.parse()?;

    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return Ok(());
    }

    describe_counter!(CACHE_HITS, "Relation cache lookups that found a record");
    describe_counter!(CACHE_MISSES, "Relation cache lookups that fell through to the database");
    describe_counter!(
        CACHE_NEGATIVE_HITS,
        "Relation cache lookups answered by a not-found placeholder"
    );
    describe_counter!(
        CACHE_EVICTION_FAILURES,
        "Cache invalidations that failed after a write and were skipped"
    );
    describe_counter!(RELATION_WRITES, "Committed follow/unfollow transactions");

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

pub fn record_cache_hit(cache: &'static str) {
    record_cache_hits(cache, 1);
}

pub fn record_cache_hits(cache: &'static str, n: u64) {
    counter!(CACHE_HITS, "cache" => cache).increment(n);
}

pub fn record_cache_miss(cache: &'static str) {
    record_cache_misses(cache, 1);
}

pub fn record_cache_misses(cache: &'static str, n: u64) {
    counter!(CACHE_MISSES, "cache" => cache).increment(n);
}

pub fn record_cache_negative_hit(cache: &'static str) {
    counter!(CACHE_NEGATIVE_HITS, "cache" => cache).increment(1);
}

pub fn record_eviction_failure(cache: &'static str) {
    counter!(CACHE_EVICTION_FAILURES, "cache" => cache).increment(1);
}

/// 记录一次已提交的关系写入，`op` 为 follow / unfollow
pub fn record_relation_write(op: &'static str) {
    counter!(RELATION_WRITES, "op" => op).increment(1);
}

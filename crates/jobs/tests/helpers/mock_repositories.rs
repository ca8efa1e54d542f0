#![allow(dead_code)]

use async_trait::async_trait;
use dnsperf_application::ports::{
    DomainStatsRepository, LatencyProbe, MeasurementRepository, NameserverDiscovery,
};
use dnsperf_domain::{DomainError, DomainStats, Latency, Measurement, Nameserver, ProbeOutcome};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

// ============================================================================
// Mock NameserverDiscovery
// ============================================================================

pub struct MockDiscovery {
    zones: Arc<RwLock<HashMap<String, Vec<Nameserver>>>>,
    failing: Arc<RwLock<Vec<String>>>,
    call_count: Arc<AtomicU64>,
    calls: Arc<RwLock<Vec<(String, Instant)>>>,
    delay: Arc<RwLock<Option<Duration>>>,
}

impl MockDiscovery {
    pub fn new() -> Self {
        Self {
            zones: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            calls: Arc::new(RwLock::new(Vec::new())),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Makes every lookup take `delay` before answering.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Domain and start instant of every lookup, in call order.
    pub async fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.read().await.clone()
    }

    pub async fn add_zone(&self, domain: &str, hostnames: &[&str]) {
        let nameservers = hostnames
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let ip: IpAddr = format!("192.0.2.{}", i + 1).parse().unwrap();
                Nameserver::new(*h, vec![ip])
            })
            .collect();
        self.zones
            .write()
            .await
            .insert(domain.to_string(), nameservers);
    }

    pub async fn fail_domain(&self, domain: &str) {
        self.failing.write().await.push(domain.to_string());
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NameserverDiscovery for MockDiscovery {
    async fn discover(&self, domain: &str) -> Result<Vec<Nameserver>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls
            .write()
            .await
            .push((domain.to_string(), Instant::now()));

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.read().await.iter().any(|d| d == domain) {
            return Err(DomainError::QueryTimeout);
        }
        Ok(self
            .zones
            .read()
            .await
            .get(domain)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Mock LatencyProbe
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum ProbeScript {
    Answer(u64),
    Timeout,
}

pub struct MockProbe {
    scripts: Arc<RwLock<HashMap<String, ProbeScript>>>,
    queried_names: Arc<RwLock<Vec<String>>>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self {
            scripts: Arc::new(RwLock::new(HashMap::new())),
            queried_names: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn script(&self, hostname: &str, script: ProbeScript) {
        self.scripts
            .write()
            .await
            .insert(hostname.to_string(), script);
    }

    pub async fn queried_names(&self) -> Vec<String> {
        self.queried_names.read().await.clone()
    }
}

#[async_trait]
impl LatencyProbe for MockProbe {
    async fn measure(
        &self,
        nameserver: &Nameserver,
        query_name: &str,
    ) -> Result<ProbeOutcome, DomainError> {
        self.queried_names
            .write()
            .await
            .push(query_name.to_string());

        let script = self
            .scripts
            .read()
            .await
            .get(&*nameserver.hostname)
            .copied()
            .unwrap_or(ProbeScript::Timeout);

        match script {
            ProbeScript::Answer(us) => Ok(ProbeOutcome::new(Latency::from_micros(us)?)),
            ProbeScript::Timeout => Err(DomainError::QueryTimeout),
        }
    }
}

// ============================================================================
// Mock MeasurementRepository
// ============================================================================

pub struct MockMeasurementRepository {
    entries: Arc<RwLock<Vec<Measurement>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockMeasurementRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub async fn entries(&self) -> Vec<Measurement> {
        self.entries.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl MeasurementRepository for MockMeasurementRepository {
    async fn append(&self, measurement: &Measurement) -> Result<i64, DomainError> {
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("disk I/O error".to_string()));
        }
        let mut entries = self.entries.write().await;
        let mut stored = measurement.clone();
        stored.id = Some(entries.len() as i64 + 1);
        entries.push(stored);
        Ok(entries.len() as i64)
    }

    async fn list_for_domain(&self, domain: &str) -> Result<Vec<Measurement>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|m| &*m.domain == domain)
            .cloned()
            .collect())
    }

    async fn count_for_domain(&self, domain: &str) -> Result<u64, DomainError> {
        Ok(self.list_for_domain(domain).await?.len() as u64)
    }

    async fn clear(&self) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let n = entries.len() as u64;
        entries.clear();
        Ok(n)
    }
}

// ============================================================================
// Mock DomainStatsRepository
// ============================================================================

pub struct MockDomainStatsRepository {
    rows: Arc<RwLock<Vec<DomainStats>>>,
    upserts: Arc<AtomicU64>,
    fail_next_upsert: Arc<AtomicBool>,
}

impl MockDomainStatsRepository {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            upserts: Arc::new(AtomicU64::new(0)),
            fail_next_upsert: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The next upsert returns a database error and writes nothing.
    pub fn fail_next_upsert(&self) {
        self.fail_next_upsert.store(true, Ordering::Relaxed);
    }

    pub fn upsert_count(&self) -> u64 {
        self.upserts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DomainStatsRepository for MockDomainStatsRepository {
    async fn seed(&self, domains: &[String]) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        let mut seeded = 0;
        for domain in domains {
            if !rows.iter().any(|r| &*r.domain == domain.as_str()) {
                rows.push(DomainStats::empty(domain.as_str()));
                seeded += 1;
            }
        }
        Ok(seeded)
    }

    async fn upsert(&self, stats: &DomainStats) -> Result<(), DomainError> {
        if self.fail_next_upsert.swap(false, Ordering::Relaxed) {
            return Err(DomainError::DatabaseError("disk I/O error".to_string()));
        }
        self.upserts.fetch_add(1, Ordering::Relaxed);
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|r| r.domain == stats.domain) {
            Some(row) => *row = stats.clone(),
            None => rows.push(stats.clone()),
        }
        Ok(())
    }

    async fn get(&self, domain: &str) -> Result<Option<DomainStats>, DomainError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|r| &*r.domain == domain)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<DomainStats>, DomainError> {
        Ok(self.rows.read().await.clone())
    }

    async fn clear(&self) -> Result<u64, DomainError> {
        let mut rows = self.rows.write().await;
        let n = rows.len() as u64;
        rows.clear();
        Ok(n)
    }
}

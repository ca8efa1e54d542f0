use crate::ports::{LatencyProbe, MeasurementRepository, NameserverDiscovery};
use chrono::Utc;
use dnsperf_domain::{
    DomainError, Measurement, Nameserver, ProbeNameGenerator, ProbeOutcome,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// What happened to one domain during one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainPassReport {
    pub nameservers: usize,
    pub recorded: usize,
    pub failed_probes: usize,
    pub store_errors: usize,
}

impl DomainPassReport {
    pub fn skipped(&self) -> bool {
        self.nameservers == 0
    }
}

/// Discovers a domain's nameservers, probes each one with a fresh
/// cache-busting name and appends every successful timing to the log.
pub struct MeasureDomainUseCase {
    discovery: Arc<dyn NameserverDiscovery>,
    probe: Arc<dyn LatencyProbe>,
    measurements: Arc<dyn MeasurementRepository>,
    concurrent: bool,
}

impl MeasureDomainUseCase {
    pub fn new(
        discovery: Arc<dyn NameserverDiscovery>,
        probe: Arc<dyn LatencyProbe>,
        measurements: Arc<dyn MeasurementRepository>,
    ) -> Self {
        Self {
            discovery,
            probe,
            measurements,
            concurrent: true,
        }
    }

    pub fn with_concurrency(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, domain: &str) -> DomainPassReport {
        let nameservers = match self.discovery.discover(domain).await {
            Ok(ns) if ns.is_empty() => {
                warn!(domain = %domain, "No nameservers discovered, skipping domain");
                return DomainPassReport::default();
            }
            Ok(ns) => ns,
            Err(e) => {
                warn!(domain = %domain, error = %e, "Nameserver discovery failed, skipping domain");
                return DomainPassReport::default();
            }
        };

        debug!(domain = %domain, count = nameservers.len(), "Nameservers discovered");

        let outcomes = if self.concurrent {
            join_all(nameservers.iter().map(|ns| self.probe_one(domain, ns))).await
        } else {
            let mut outcomes = Vec::with_capacity(nameservers.len());
            for ns in &nameservers {
                outcomes.push(self.probe_one(domain, ns).await);
            }
            outcomes
        };

        let mut report = DomainPassReport {
            nameservers: nameservers.len(),
            ..Default::default()
        };

        // Appends stay sequential and in delegation order.
        for (ns, outcome) in nameservers.iter().zip(outcomes) {
            let measurement = match outcome {
                Ok(m) => m,
                Err(e) => {
                    debug!(domain = %domain, nameserver = %ns.hostname, error = %e, "Probe failed");
                    report.failed_probes += 1;
                    continue;
                }
            };

            match self.measurements.append(&measurement).await {
                Ok(_) => report.recorded += 1,
                Err(e) => {
                    error!(
                        domain = %domain,
                        nameserver = %ns.hostname,
                        error = %e,
                        "Failed to append measurement"
                    );
                    report.store_errors += 1;
                }
            }
        }

        info!(
            domain = %domain,
            nameservers = report.nameservers,
            recorded = report.recorded,
            failed = report.failed_probes,
            "Domain measured"
        );

        report
    }

    async fn probe_one(&self, domain: &str, ns: &Nameserver) -> Result<Measurement, DomainError> {
        let query_name = ProbeNameGenerator::generate(domain);
        let ProbeOutcome {
            latency,
            responder,
            note,
        } = self.probe.measure(ns, &query_name).await?;
        let observed_at = Utc::now();

        debug!(
            domain = %domain,
            nameserver = %ns.hostname,
            responder = ?responder,
            query = %query_name,
            latency_us = latency.as_micros(),
            "Probe completed"
        );

        Ok(Measurement::new(domain, Arc::clone(&ns.hostname), latency, observed_at).with_note(note))
    }
}

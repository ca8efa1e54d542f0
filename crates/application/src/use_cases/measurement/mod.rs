pub mod measure_domain;

pub use measure_domain::{DomainPassReport, MeasureDomainUseCase};

use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub static REFRESHER_METRICS: Lazy<RefresherMetrics> = Lazy::new(RefresherMetrics::register);

pub struct RefresherMetrics {
    /// Scheduler invocations, labelled by outcome
    pub refresh_invocations: Counter<u64>,
    /// Popped requests, labelled by per item outcome
    pub refresh_items: Counter<u64>,
    pub refresh_metadata_items: Counter<u64>,
    pub refresh_rate_limited: Counter<u64>,
    pub refresh_invocation_duration: Histogram<f64>,
}

impl RefresherMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.metadata-refresher.opentelemetry");

        let refresh_invocations = meter
            .u64_counter("refresh_invocations")
            .with_description("Count of refresh scheduler invocations")
            .with_unit("invocations")
            .build();

        let refresh_items = meter
            .u64_counter("refresh_items")
            .with_description("Count of refresh requests processed, by outcome")
            .with_unit("requests")
            .build();

        let refresh_metadata_items = meter
            .u64_counter("refresh_metadata_items")
            .with_description("Count of token metadata items handed to the write pipeline")
            .with_unit("items")
            .build();

        let refresh_rate_limited = meter
            .u64_counter("refresh_rate_limited")
            .with_description("Count of provider rate limit responses")
            .with_unit("responses")
            .build();

        let refresh_invocation_duration = meter
            .f64_histogram("refresh_invocation_duration")
            .with_description("Wall clock time of a refresh scheduler invocation")
            .with_unit("s")
            .build();

        Self {
            refresh_invocations,
            refresh_items,
            refresh_metadata_items,
            refresh_rate_limited,
            refresh_invocation_duration,
        }
    }
}

use prometheus::{
    Encoder, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub match_requests_total: IntCounterVec,
    pub match_latency_seconds: HistogramVec,
    pub parcels_scored_total: IntCounter,
    pub drivers_registered: IntGauge,
    pub parcels_registered: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let match_requests_total = IntCounterVec::new(
            Opts::new("match_requests_total", "Total match requests by outcome"),
            &["outcome"],
        )
        .expect("valid match_requests_total metric");

        let match_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "match_latency_seconds",
                "Latency of a full scoring pass in seconds",
            ),
            &["outcome"],
        )
        .expect("valid match_latency_seconds metric");

        let parcels_scored_total = IntCounter::new(
            "parcels_scored_total",
            "Total parcels scored across all match requests",
        )
        .expect("valid parcels_scored_total metric");

        let drivers_registered = IntGauge::new(
            "drivers_registered",
            "Current number of registered drivers",
        )
        .expect("valid drivers_registered metric");

        let parcels_registered = IntGauge::new(
            "parcels_registered",
            "Current number of parcels in the pool",
        )
        .expect("valid parcels_registered metric");

        registry
            .register(Box::new(match_requests_total.clone()))
            .expect("register match_requests_total");
        registry
            .register(Box::new(match_latency_seconds.clone()))
            .expect("register match_latency_seconds");
        registry
            .register(Box::new(parcels_scored_total.clone()))
            .expect("register parcels_scored_total");
        registry
            .register(Box::new(drivers_registered.clone()))
            .expect("register drivers_registered");
        registry
            .register(Box::new(parcels_registered.clone()))
            .expect("register parcels_registered");

        Self {
            registry,
            match_requests_total,
            match_latency_seconds,
            parcels_scored_total,
            drivers_registered,
            parcels_registered,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

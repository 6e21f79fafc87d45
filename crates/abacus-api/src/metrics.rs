//! Prometheus counters served on `/metrics`.
use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    static ref REGISTRY: Registry = Registry::new();

    static ref TRACES_GENERATED: IntCounterVec = register(
        Opts::new("abacus_traces_generated_total", "Step traces generated, by operator"),
        &["operator"],
    );

    static ref GENERATION_ERRORS: IntCounterVec = register(
        Opts::new("abacus_generation_errors_total", "Failed generation requests, by error kind"),
        &["kind"],
    );
}

fn register(opts: Opts, labels: &[&str]) -> IntCounterVec {
    let counter = IntCounterVec::new(opts, labels).expect("valid metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registered once");
    counter
}

pub fn record_trace(operator: &str) {
    TRACES_GENERATED.with_label_values(&[operator]).inc();
}

pub fn record_error(kind: &str) {
    GENERATION_ERRORS.with_label_values(&[kind]).inc();
}

pub fn encode() -> Result<String, prometheus::Error> {
    // families register on first use; force it before gathering
    lazy_static::initialize(&TRACES_GENERATED);
    lazy_static::initialize(&GENERATION_ERRORS);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_exported() {
        record_trace("addition");
        record_error("FormatError");
        let text = encode().unwrap();
        assert!(text.contains("abacus_traces_generated_total{operator=\"addition\"}"));
        assert!(text.contains("abacus_generation_errors_total{kind=\"FormatError\"}"));
    }
}

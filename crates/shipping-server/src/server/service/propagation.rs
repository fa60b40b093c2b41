//! Trace context propagation from incoming gRPC metadata.
//!
//! Callers send W3C `traceparent`/`tracestate` and `baggage` headers. They are
//! read through the globally installed propagator so request spans join the
//! caller's trace instead of starting a new one.

use opentelemetry::{
    Context,
    propagation::{Extractor, TextMapCompositePropagator},
};
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use tonic::metadata::{KeyRef, MetadataMap};

/// Propagator installed globally at startup: W3C trace context plus baggage.
pub fn propagator() -> TextMapCompositePropagator {
    TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ])
}

/// Reads propagation headers out of tonic request metadata.
pub struct MetadataExtractor<'a>(pub &'a MetadataMap);

impl Extractor for MetadataExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(|key| match key {
                KeyRef::Ascii(key) => key.as_str(),
                KeyRef::Binary(key) => key.as_str(),
            })
            .collect()
    }
}

/// Extracts the caller's context from `metadata`. Without propagation headers
/// the returned context has no remote span, so request spans become roots.
pub fn parent_context(metadata: &MetadataMap) -> Context {
    opentelemetry::global::get_text_map_propagator(|propagator| {
        propagator.extract(&MetadataExtractor(metadata))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{
        baggage::BaggageExt,
        propagation::TextMapPropagator,
        trace::{SpanId, TraceContextExt, TraceId},
    };

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    #[test]
    fn extracts_trace_context_and_baggage() {
        let mut metadata = MetadataMap::new();
        metadata.insert("traceparent", TRACEPARENT.parse().unwrap());
        metadata.insert("baggage", "session=abc123".parse().unwrap());

        let cx = propagator().extract(&MetadataExtractor(&metadata));

        let span_context = cx.span().span_context().clone();
        assert!(span_context.is_remote());
        assert_eq!(
            span_context.trace_id(),
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap()
        );
        assert_eq!(
            span_context.span_id(),
            SpanId::from_hex("00f067aa0ba902b7").unwrap()
        );
        assert_eq!(
            cx.baggage().get("session").map(|value| value.as_str().to_owned()),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn missing_headers_yield_no_remote_parent() {
        let cx = propagator().extract(&MetadataExtractor(&MetadataMap::new()));
        assert!(!cx.span().span_context().is_valid());
    }

    #[test]
    fn extractor_lists_ascii_keys() {
        let mut metadata = MetadataMap::new();
        metadata.insert("traceparent", TRACEPARENT.parse().unwrap());

        let extractor = MetadataExtractor(&metadata);
        assert_eq!(extractor.keys(), vec!["traceparent"]);
        assert_eq!(extractor.get("traceparent"), Some(TRACEPARENT));
        assert_eq!(extractor.get("tracestate"), None);
    }
}

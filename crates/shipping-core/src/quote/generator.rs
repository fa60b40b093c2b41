use super::{CostSource, LatencySimulator, Quote, ThreadRandomCost, TokioLatency};
use core::time::Duration;

/// Simulated pricing latency of [`QuoteGenerator::from_count`].
pub const COUNT_DELAY: Duration = Duration::from_millis(100);

/// Simulated pricing latency of [`QuoteGenerator::from_value`].
pub const VALUE_DELAY: Duration = Duration::from_nanos(1_000_000_000 / 3);

/// Produces traced shipping quotes.
///
/// Both entry points open a child span scoped to their execution, nested
/// under whatever span is current when they are awaited. Neither can fail.
#[derive(Clone, Debug, Default)]
pub struct QuoteGenerator<C = ThreadRandomCost, L = TokioLatency> {
    cost: C,
    latency: L,
}

impl<C, L> QuoteGenerator<C, L>
where
    C: CostSource,
    L: LatencySimulator,
{
    pub fn new(cost: C, latency: L) -> Self {
        Self { cost, latency }
    }

    /// Quotes a shipment of `count` items.
    ///
    /// The cost is a synthetic dollar amount drawn from the [`CostSource`];
    /// it does not depend on `count`, which is only recorded on the span.
    #[tracing::instrument(name = "create_quote_from_count", skip(self))]
    pub async fn from_count(&self, count: u32) -> Quote {
        self.latency.sleep_for(COUNT_DELAY).await;
        let dollars = self.cost.sample_dollars();
        self.from_value(f64::from(dollars)).await
    }

    /// Quotes an arbitrary non-negative cost. See [`Quote::from_value`].
    #[tracing::instrument(name = "create_quote_from_float", skip(self))]
    pub async fn from_value(&self, value: f64) -> Quote {
        self.latency.sleep_for(VALUE_DELAY).await;
        Quote::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{FixedCost, MAX_DOLLARS, NoLatency};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider};
    use tracing_subscriber::layer::SubscriberExt;

    #[tokio::test]
    async fn fixed_cost_yields_whole_dollar_quote() {
        let generator = QuoteGenerator::new(FixedCost(42), NoLatency);

        let quote = generator.from_count(3).await;

        assert_eq!(quote, Quote::new(42, 0).unwrap());
        assert_eq!(quote.to_string(), "$42.0");
    }

    #[tokio::test]
    async fn item_count_does_not_change_the_cost() {
        let generator = QuoteGenerator::new(FixedCost(9), NoLatency);

        let few = generator.from_count(1).await;
        let many = generator.from_count(1_000).await;

        assert_eq!(few, many);
    }

    #[tokio::test]
    async fn random_quotes_stay_in_range() {
        let generator = QuoteGenerator::new(ThreadRandomCost, NoLatency);

        for count in 0..500 {
            let quote = generator.from_count(count).await;
            assert!(quote.units() < MAX_DOLLARS);
            assert_eq!(quote.subunits(), 0);
        }
    }

    #[tokio::test]
    async fn from_value_splits_fraction() {
        let generator = QuoteGenerator::new(FixedCost(0), NoLatency);

        let quote = generator.from_value(3.567).await;

        assert_eq!((quote.units(), quote.subunits()), (3, 56));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_latency_delays_both_steps() {
        let generator = QuoteGenerator::new(FixedCost(1), TokioLatency);
        let start = tokio::time::Instant::now();

        generator.from_count(1).await;

        assert!(start.elapsed() >= COUNT_DELAY + VALUE_DELAY);
    }

    #[tokio::test]
    async fn value_span_nests_under_count_span() {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("quote-test")));
        let _guard = tracing::subscriber::set_default(subscriber);

        QuoteGenerator::new(FixedCost(5), NoLatency)
            .from_count(2)
            .await;

        provider.force_flush().unwrap();
        let spans = exporter.get_finished_spans().unwrap();
        let count_span = spans
            .iter()
            .find(|span| span.name == "create_quote_from_count")
            .expect("count span exported");
        let value_span = spans
            .iter()
            .find(|span| span.name == "create_quote_from_float")
            .expect("value span exported");

        assert_eq!(
            value_span.parent_span_id,
            count_span.span_context.span_id()
        );
    }
}

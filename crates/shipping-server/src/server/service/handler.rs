//! gRPC service implementation for shipping quotes and orders.
//!
//! This module defines [`ShippingHandler`], the concrete implementation of the
//! [`ShippingService`] gRPC service defined in the protobuf specification.
//!
//! ## Responsibilities
//!
//! - Quote the cost of a shipment in USD (`GetQuote`).
//! - Derive a tracking id for a shipment (`ShipOrder`).
//! - Open each request span as a child of the caller's propagated trace
//!   context.
//! - Annotate the request span with the shipment address and flag
//!   implausible ZIP codes on it.

use shipping_core::{
    Error, QuoteGenerator,
    proto::{
        Address, GetQuoteRequest, GetQuoteResponse, ShipOrderRequest, ShipOrderResponse,
        shipping_service_server::ShippingService,
    },
    quote::{CostSource, LatencySimulator, ThreadRandomCost, TokioLatency},
    tracking::{create_tracking_id, format_address, is_valid_zip_code},
};
use super::propagation::parent_context;
use std::sync::Arc;
use tonic::{Request, Response, Status, metadata::MetadataMap};
use tracing::{Instrument, Span, field::Empty};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Currency every quote is expressed in.
pub const QUOTE_CURRENCY: &str = "USD";

/// Status message recorded on the `ship_order` span for implausible ZIP codes.
pub const INVALID_ZIP_CODE: &str = "zipcode is invalid";

/// Item count passed to the quote generator. Cart contents do not affect the
/// cost yet.
const PLACEHOLDER_ITEM_COUNT: u32 = 0;

/// Stateless shipping service.
///
/// The handler only holds the shared [`QuoteGenerator`], so clones are cheap
/// and concurrent calls never contend on anything.
#[derive(Debug)]
pub struct ShippingHandler<C = ThreadRandomCost, L = TokioLatency> {
    quotes: Arc<QuoteGenerator<C, L>>,
}

impl<C, L> Clone for ShippingHandler<C, L> {
    fn clone(&self) -> Self {
        Self {
            quotes: Arc::clone(&self.quotes),
        }
    }
}

impl<C, L> ShippingHandler<C, L>
where
    C: CostSource,
    L: LatencySimulator,
{
    pub fn new(quotes: QuoteGenerator<C, L>) -> Self {
        Self {
            quotes: Arc::new(quotes),
        }
    }
}

impl<C, L> ShippingHandler<C, L>
where
    C: CostSource,
    L: LatencySimulator,
{
    async fn quote(&self) -> GetQuoteResponse {
        tracing::info!("[GetQuote] received request");

        let quote = self.quotes.from_count(PLACEHOLDER_ITEM_COUNT).await;

        tracing::info!(%quote, "[GetQuote] completed request");
        GetQuoteResponse {
            cost_usd: Some(quote.to_wire_money(QUOTE_CURRENCY)),
        }
    }

    fn ship(&self, address: Option<Address>) -> Result<ShipOrderResponse, Error> {
        tracing::info!("[ShipOrder] received request");

        let address = address.ok_or_else(|| Error::InvalidRequest {
            reason: "address is required".to_string(),
        })?;
        let address_line = format_address(&address);

        let span = Span::current();
        span.record("address", address_line.as_str());
        span.record("city", address.city.as_str());
        span.record("state", address.state.as_str());

        if !is_valid_zip_code(address.zip_code) {
            // A description alone marks the span status as error.
            span.record("otel.status_description", INVALID_ZIP_CODE);
            tracing::warn!(zip_code = address.zip_code, "{INVALID_ZIP_CODE}");
        }

        let tracking_id = create_tracking_id(&address_line);

        tracing::info!(%tracking_id, "[ShipOrder] completed request");
        Ok(ShipOrderResponse { tracking_id })
    }
}

/// Opens the request span as a child of the caller's propagated context.
fn request_span(span: Span, metadata: &MetadataMap) -> Span {
    // Not entered yet, so the parent can still be replaced.
    let _ = span.set_parent(parent_context(metadata));
    span
}

#[tonic::async_trait]
impl<C, L> ShippingService for ShippingHandler<C, L>
where
    C: CostSource + Send + Sync + 'static,
    L: LatencySimulator + Send + Sync + 'static,
{
    /// Produces a shipping quote in USD.
    ///
    /// Never fails: the quote generator is total.
    async fn get_quote(
        &self,
        req: Request<GetQuoteRequest>,
    ) -> Result<Response<GetQuoteResponse>, Status> {
        let span = request_span(
            tracing::info_span!("get_quote", items = req.get_ref().items.len()),
            req.metadata(),
        );

        let response = self.quote().instrument(span).await;
        Ok(Response::new(response))
    }

    /// Mocks shipment of the requested items and returns a tracking id for
    /// notional lookup of the delivery status.
    ///
    /// A ZIP code outside `10000..=99999` marks the span as errored but does
    /// not reject the order. A request without an address is rejected with
    /// `INVALID_ARGUMENT`.
    async fn ship_order(
        &self,
        req: Request<ShipOrderRequest>,
    ) -> Result<Response<ShipOrderResponse>, Status> {
        let span = request_span(
            tracing::info_span!(
                "ship_order",
                items = req.get_ref().items.len(),
                address = Empty,
                city = Empty,
                state = Empty,
                otel.status_description = Empty,
            ),
            req.metadata(),
        );

        let address = req.into_inner().address;
        let response = span.in_scope(|| self.ship(address))?;
        Ok(Response::new(response))
    }
}

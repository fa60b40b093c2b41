//! gRPC service and message definitions generated from `proto/shipping.proto`.
//!
//! ## Service
//!
//! - `GetQuote` - Quotes the cost of shipping a cart, in USD.
//! - `ShipOrder` - Mocks shipment of a cart and returns a tracking id.
//!
//! ## Money
//!
//! [`Money`] carries whole `units` plus `nanos`, the fractional part of the
//! base unit in billionths. Quotes are produced in hundredths, so `nanos` is
//! always a multiple of `10_000_000`.

tonic::include_proto!("shipping");

/// Encoded file descriptor set for `shipping.proto`, registered with the
/// reflection service.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("shipping_descriptor");

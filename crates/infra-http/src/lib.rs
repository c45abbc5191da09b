// Jobboard Infrastructure - HTTP Adapters
// Implements: ListingEndpoint

pub mod listing_endpoint_impl;

pub use listing_endpoint_impl::{HttpEndpointConfig, HttpListingEndpoint};

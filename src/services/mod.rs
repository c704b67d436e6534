//! Service clients consumed by the route handlers

pub mod upstream;

pub use upstream::UpstreamClient;

//! Endpoint and subscription registries.

pub mod endpoint;
pub mod subscription;

pub use endpoint::{Endpoint, EndpointRegistry, EndpointRegistryError, endpoint_hash};
pub use subscription::{
    CancellationHandle, Handler, SubscriptionError, SubscriptionInfo, SubscriptionRegistry,
};

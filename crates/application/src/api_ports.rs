mod gateway;
mod transport;

pub use gateway::ApiGateway;
pub use transport::{ApiMethod, ApiRequest, ApiTransport};

pub(crate) use gateway::{decode, decode_collection, decode_nested};

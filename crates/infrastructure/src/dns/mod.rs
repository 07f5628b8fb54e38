mod codec;
pub mod record_filter;
pub mod request_builder;
pub mod response_finalizer;
pub mod sig0;
pub mod truncation;

pub use request_builder::RequestBuilder;
pub use response_finalizer::ResponseFinalizer;
pub use sig0::Sig0Signer;

//! HTTP transport layer: the chunk source for the streaming decoder.

mod http;
mod error;
mod reqwest;
pub mod endpoints;
mod request;
mod response;

pub use http::{ChunkedStream, HttpRequest, HttpResponse, HttpTransport};
pub use error::TransportError;
pub use self::reqwest::ReqwestTransport;
pub use request::RequestBuilder;
pub use response::ResponseParser;

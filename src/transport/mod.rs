mod http;
mod mock;
mod session;

pub use http::{HttpResponse, HttpTransport, ReqwestTransport, SPARQL_QUERY_CONTENT_TYPE};
pub use mock::{MockSession, MockTransport, RecordedRequest};
pub use session::{ApiRequest, ApiSession, HttpApiSession};

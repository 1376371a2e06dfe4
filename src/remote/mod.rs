//! Remote chat service adapter: REST gateway, wire format and the dispatcher
//! that keeps network calls off the event loop.

mod dispatcher;
mod http;
mod wire;

pub use dispatcher::RuntimeDispatcher;
pub use http::HttpConversationGateway;

/// Returns the remote module name for smoke checks.
pub fn module_name() -> &'static str {
    "remote"
}

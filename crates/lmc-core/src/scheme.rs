//! Platform-facing scheme interception surface.
//!
//! The platform adapter owns the native webview API. It forwards request
//! start/stop here and receives the synthetic response through the
//! [`ResponseSink`] callbacks, always in the order response, data, finish.

use crate::resolver::{ResponseEnvelope, SchemeResolver};

/// Callback surface the platform adapter implements around its native
/// scheme-task object. Callbacks may be invoked synchronously within
/// [`SchemeHandler::on_request_start`].
pub trait ResponseSink {
    fn did_receive_response(&mut self, status: u16, headers: &[(String, String)]);
    fn did_receive_data(&mut self, data: &[u8]);
    fn did_finish(&mut self);
}

/// Drives the resolver for one intercepted scheme.
pub struct SchemeHandler {
    resolver: SchemeResolver,
}

impl SchemeHandler {
    pub fn new(resolver: SchemeResolver) -> Self {
        Self { resolver }
    }

    /// Handle one intercepted request. A miss emits the 404 response and
    /// finish with no data callback in between.
    pub fn on_request_start(&self, request_uri: &str, sink: &mut dyn ResponseSink) {
        let ResponseEnvelope {
            status,
            body,
            headers,
            ..
        } = self.resolver.handle(request_uri);

        sink.did_receive_response(status, &headers);
        if !body.is_empty() {
            sink.did_receive_data(&body);
        }
        sink.did_finish();
    }

    /// Stop notification for an in-flight task. File reads are fully buffered
    /// before any callback fires, so there is nothing to interrupt.
    pub fn on_request_stop(&self, request_uri: &str) {
        tracing::trace!(uri = request_uri, "scheme task stopped");
    }
}

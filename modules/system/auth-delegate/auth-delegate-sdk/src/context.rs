//! Request carrier abstraction.
//!
//! The delegate never owns the inbound request. It borrows it, reads headers
//! and the query string, and mutates headers in place. This trait lets the same
//! logic run on a full `http::Request` (middleware) and on split
//! `http::request::Parts` (extractors).

use http::{HeaderMap, Request, Uri, request::Parts};

/// A mutable view over an inbound HTTP request.
pub trait RequestContext {
    /// Request headers.
    fn headers(&self) -> &HeaderMap;

    /// Mutable request headers. Changes are visible to the request owner.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Request URI, used for query parameter lookup.
    fn uri(&self) -> &Uri;

    /// First value of the query parameter `name`, form-urlencoded decoded.
    fn query_param(&self, name: &str) -> Option<String> {
        let query = self.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

impl<B> RequestContext for Request<B> {
    fn headers(&self) -> &HeaderMap {
        Request::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        Request::headers_mut(self)
    }

    fn uri(&self) -> &Uri {
        Request::uri(self)
    }
}

impl RequestContext for Parts {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn uri(&self) -> &Uri {
        &self.uri
    }
}

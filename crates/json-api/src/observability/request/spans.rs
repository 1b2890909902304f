//! HTTP span naming and parent trace extraction.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};
use uuid::Uuid;

/// Collapse identifiers so span names and metric labels stay low-cardinality.
pub(super) fn route_template(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

/// Parent context from `traceparent` headers, if they carry a valid span.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    let extractor = HeaderExtractor { headers };

    global::get_text_map_propagator(|propagator| {
        // Fresh base context: no trace headers must not inherit the in-process span chain.
        let context = propagator.extract_with_context(&Context::new(), &extractor);
        let valid = context.span().span_context().is_valid();

        valid.then_some(context)
    })
}

#[derive(Debug)]
struct HeaderExtractor<'a> {
    headers: &'a HeaderMap,
}

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.headers.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_are_replaced_in_route_template() {
        let order = Uuid::now_v7();

        assert_eq!(
            route_template(&format!("/api/v1/orders/{order}/pay")),
            "/api/v1/orders/{uuid}/pay"
        );
    }

    #[test]
    fn root_and_plain_paths_are_kept() {
        assert_eq!(route_template("/"), "/");
        assert_eq!(route_template("/api/v1/cart/"), "/api/v1/cart");
    }

    #[test]
    fn missing_trace_headers_yield_no_parent() {
        assert!(extract_parent_context(&HeaderMap::new()).is_none());
    }
}

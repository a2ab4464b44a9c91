// SPDX-License-Identifier: Apache-2.0

//! Scope-name conventions used for dataset routing.
//!
//! Instrumentation scopes report the module path of the collector component
//! that produced the telemetry. Two path shapes matter for routing: receiver
//! scopes (`.../receiver/<name>/...`) and encoding-extension scopes
//! (`.../extension/encoding/<name>`). Matching works over `/`-separated
//! path segments so unrelated scope names that merely contain similar
//! substrings never match.

const RECEIVER_SEGMENT: &str = "receiver";
const EXTENSION_SEGMENT: &str = "extension";
const ENCODING_SEGMENT: &str = "encoding";

/// Extract the receiver component from a scope name following the receiver
/// path convention: the path segment immediately after a `receiver` segment.
pub fn receiver_component(scope_name: &str) -> Option<&str> {
    let mut segments = scope_name.split('/');
    while let Some(segment) = segments.next() {
        if segment == RECEIVER_SEGMENT {
            return segments.next().filter(|name| !name.is_empty());
        }
    }
    None
}

/// Whether a scope name follows the encoding-extension path convention,
/// with `extension` and `encoding` as adjacent segments in that order.
pub fn is_encoding_extension(scope_name: &str) -> bool {
    let mut previous: Option<&str> = None;
    for segment in scope_name.split('/') {
        if previous == Some(EXTENSION_SEGMENT) && segment == ENCODING_SEGMENT {
            return true;
        }
        previous = Some(segment);
    }
    false
}

//! NGSI-LD `Link` header parsing and context-reference validation.
//!
//! Per the NGSI-LD HTTP binding, the context reference arrives as
//! `<uri>; rel="http://www.w3.org/ns/json-ld#context"; type="application/ld+json"`.
//! Only the syntactic shape matters here: a present reference that is not an
//! absolute http(s) URL is a `ContextUriInvalid` client error; whether the
//! URL is reachable is the resolver's concern.

use url::Url;

use crate::domain::error::TemporalFailure;

/// Relation identifying the JSON-LD context link.
pub const JSON_LD_CONTEXT_REL: &str = "http://www.w3.org/ns/json-ld#context";

/// Extracts the JSON-LD context reference from a raw `Link` header value.
///
/// `None` input (no header) or a header carrying only unrelated relations
/// yields `Ok(None)`. A header that does carry a context relation must hold
/// a syntactically valid absolute http(s) URL.
pub fn context_reference(link: Option<&str>) -> Result<Option<Url>, TemporalFailure> {
    let Some(raw) = link else {
        return Ok(None);
    };

    for part in raw.split(',') {
        let Some(target) = link_target(part) else {
            // A Link value without a <target> cannot name a context.
            return Err(TemporalFailure::context_uri_invalid(part.trim()));
        };
        if part.contains(JSON_LD_CONTEXT_REL) {
            return validate(target).map(Some);
        }
    }

    Ok(None)
}

/// The `<...>` target of one link-value, if present.
fn link_target(part: &str) -> Option<&str> {
    let start = part.find('<')?;
    let end = part[start..].find('>')? + start;
    Some(&part[start + 1..end])
}

fn validate(target: &str) -> Result<Url, TemporalFailure> {
    let url = Url::parse(target)
        .map_err(|_| TemporalFailure::context_uri_invalid(target))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(TemporalFailure::context_uri_invalid(target))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::error::FailureKind;

    fn header(uri: &str) -> String {
        format!("<{uri}>; rel=\"{JSON_LD_CONTEXT_REL}\"; type=\"application/ld+json\"")
    }

    #[test]
    fn test_absent_header_means_no_reference() {
        assert_eq!(context_reference(None).unwrap(), None);
    }

    #[test]
    fn test_valid_context_reference_is_extracted() {
        let value = header("https://example.org/context.jsonld");
        let url = context_reference(Some(&value)).unwrap();
        assert_eq!(
            url.map(String::from),
            Some("https://example.org/context.jsonld".to_owned())
        );
    }

    #[test]
    fn test_unrelated_relations_are_ignored() {
        let value = "<https://example.org/next>; rel=\"next\"";
        assert_eq!(context_reference(Some(value)).unwrap(), None);
    }

    #[test]
    fn test_context_relation_among_several_links() {
        let value = format!(
            "<https://example.org/next>; rel=\"next\", {}",
            header("https://example.org/context.jsonld")
        );
        let url = context_reference(Some(&value)).unwrap();
        assert_eq!(
            url.map(String::from),
            Some("https://example.org/context.jsonld".to_owned())
        );
    }

    #[test]
    fn test_syntactically_invalid_references_are_client_errors() {
        for bad in ["invalidURI", "", "ht://some-url.com"] {
            let value = header(bad);
            let result = context_reference(Some(&value));
            let Err(failure) = result else {
                panic!("reference {bad:?} should be rejected");
            };
            assert_eq!(failure.kind(), FailureKind::ContextUriInvalid);
        }
    }

    #[test]
    fn test_header_without_target_is_a_client_error() {
        let result = context_reference(Some("no angle brackets at all"));
        let Err(failure) = result else {
            panic!("malformed header should be rejected");
        };
        assert_eq!(failure.kind(), FailureKind::ContextUriInvalid);
    }
}

//! JSON-LD context: term expansion and the resolver seam.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::error::TemporalFailure;

/// Default vocabulary of the NGSI-LD core context.
pub const CORE_VOCABULARY: &str = "https://uri.etsi.org/ngsi-ld/default-context/";

/// An active JSON-LD context: a term map plus an optional `@vocab` default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdContext {
    terms: BTreeMap<String, String>,
    vocab: Option<String>,
}

impl LdContext {
    #[must_use]
    pub fn new(terms: BTreeMap<String, String>, vocab: Option<String>) -> Self {
        Self { terms, vocab }
    }

    /// The built-in NGSI-LD core context, used when a request carries no
    /// `Link` header. Every term expands into the default vocabulary.
    #[must_use]
    pub fn core() -> Self {
        Self {
            terms: BTreeMap::new(),
            vocab: Some(CORE_VOCABULARY.to_owned()),
        }
    }

    /// Parses the `@context` entry of a fetched context document.
    ///
    /// Accepts an object or an array of objects; string entries (nested
    /// remote references) are skipped. String-valued terms become the term
    /// map, `@vocab` the default vocabulary.
    pub fn from_document(doc: &serde_json::Value) -> anyhow::Result<Self> {
        let context = doc
            .get("@context")
            .ok_or_else(|| anyhow::anyhow!("document has no @context entry"))?;

        let mut terms = BTreeMap::new();
        let mut vocab = None;

        let objects: Vec<&serde_json::Map<String, serde_json::Value>> = match context {
            serde_json::Value::Object(map) => vec![map],
            serde_json::Value::Array(entries) => {
                entries.iter().filter_map(|e| e.as_object()).collect()
            }
            other => anyhow::bail!("@context is neither an object nor an array: {other}"),
        };

        for object in objects {
            for (term, definition) in object {
                let Some(iri) = term_iri(definition) else {
                    continue;
                };
                if term == "@vocab" {
                    vocab = Some(iri.to_owned());
                } else if !term.starts_with('@') {
                    terms.insert(term.clone(), iri.to_owned());
                }
            }
        }

        Ok(Self { terms, vocab })
    }

    /// Expands a short attribute name to its fully qualified form.
    ///
    /// Resolution order: exact term match, absolute-IRI passthrough, prefix
    /// (`curie:suffix`) expansion, then the `@vocab` default. A name the
    /// context cannot expand is an `AttributeExpansion` failure.
    pub fn expand(&self, name: &str) -> Result<String, TemporalFailure> {
        if let Some(iri) = self.terms.get(name) {
            return Ok(iri.clone());
        }
        if let Some((prefix, suffix)) = name.split_once(':') {
            if matches!(prefix, "http" | "https" | "urn") {
                return Ok(name.to_owned());
            }
            if let Some(base) = self.terms.get(prefix) {
                return Ok(format!("{base}{suffix}"));
            }
        }
        if let Some(vocab) = &self.vocab {
            return Ok(format!("{vocab}{name}"));
        }
        Err(TemporalFailure::attribute_expansion(name))
    }
}

/// The fully qualified IRI a term definition maps to, if it is one we use.
fn term_iri(definition: &serde_json::Value) -> Option<&str> {
    match definition {
        serde_json::Value::String(iri) => Some(iri),
        serde_json::Value::Object(map) => map.get("@id").and_then(|id| id.as_str()),
        _ => None,
    }
}

/// Resolves a context reference into an active [`LdContext`].
///
/// `None` means the request carried no context reference; implementations
/// fall back to the core context. Retrieval or decoding failures surface as
/// `ContextUnreachable`.
#[async_trait]
pub trait ContextResolver: Send + Sync {
    async fn resolve(&self, reference: Option<&Url>) -> Result<Arc<LdContext>, TemporalFailure>;
}

//! # Graph Hash
//!
//! RDF payload parsing and deterministic content hashing.
//!
//! Responsibilities:
//! - Map MIME types to RDF serializations
//! - Parse payload bytes into quads (well-formedness check for metrics graphs)
//! - Compute a canonical content hash for change detection on the hub side
//!
//! The hash is content-addressed: identical payload bytes always produce the
//! identical digest, so re-exporting unchanged data lets the hub answer 304
//! without re-parsing.

use oxrdf::Quad;
use oxrdfio::{RdfFormat, RdfParser};
use thiserror::Error;

/// Graph parsing and hashing errors
#[derive(Debug, Error)]
pub enum GraphHashError {
    /// MIME type does not name a supported RDF serialization
    #[error("unsupported media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },

    /// Payload is not well-formed for the declared serialization
    #[error("rdf parse error: {message}")]
    Parse { message: String },
}

impl GraphHashError {
    fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Resolve a MIME type to an RDF serialization
///
/// Accepts media type parameters (`text/turtle; charset=utf-8`). Supported:
/// N-Triples, N-Quads, Turtle, TriG, RDF/XML.
pub fn rdf_format(media_type: &str) -> Result<RdfFormat, GraphHashError> {
    RdfFormat::from_media_type(media_type).ok_or_else(|| GraphHashError::UnsupportedMediaType {
        media_type: media_type.to_string(),
    })
}

/// Parse a payload into quads
///
/// # Errors
/// Unsupported media type, or the first syntax error in the payload.
pub fn parse_quads(data: &[u8], media_type: &str) -> Result<Vec<Quad>, GraphHashError> {
    let format = rdf_format(media_type)?;
    let mut quads = Vec::new();
    for quad in RdfParser::from_format(format).for_reader(data) {
        quads.push(quad.map_err(|e| GraphHashError::parse(e.to_string()))?);
    }
    Ok(quads)
}

/// Compute the canonical content hash of an RDF payload
///
/// Each parsed quad is serialized in N-Quads form; the lines are sorted and
/// hashed with blake3. The digest is returned as lowercase hex.
pub fn canonical_hash(data: &[u8], media_type: &str) -> Result<String, GraphHashError> {
    let quads = parse_quads(data, media_type)?;

    let mut lines: Vec<String> = quads.iter().map(|quad| quad.to_string()).collect();
    lines.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize().as_bytes()))
}

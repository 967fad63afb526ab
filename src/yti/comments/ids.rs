use std::collections::BTreeSet;

use uuid::Uuid;

use crate::yti::comments::error::{CommentsError, Result};

/// Parses an identifier received from a caller.
pub fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| CommentsError::NotAcceptable(format!("String not mappable to UUID: {value}")))
}

/// Parses a comma-separated identifier list, failing on the first malformed
/// entry.
pub fn parse_uuid_list(csv: &str) -> Result<BTreeSet<Uuid>> {
    csv.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_uuid)
        .collect()
}

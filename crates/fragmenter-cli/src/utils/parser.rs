use fragmenter::core::models::topology::{Bond, BondOrder};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid bond '{0}'. Expected 'i-j' or 'i-j:order' (e.g., '0-1' or '2-3:double').")]
    InvalidBondFormat(String),

    #[error("Invalid atom index '{index}' in bond '{bond}'.")]
    InvalidAtomIndex { index: String, bond: String },

    #[error("Unknown bond order '{order}' in bond '{bond}'.")]
    UnknownBondOrder { order: String, bond: String },
}

/// Parses a comma-separated bond list such as `"0-1,1-2:double"`.
///
/// Indices are zero-based. Whitespace around entries is ignored and an empty
/// string yields no bonds.
pub fn parse_bond_list(input: &str) -> Result<Vec<Bond>, ParseError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_bond)
        .collect()
}

fn parse_bond(entry: &str) -> Result<Bond, ParseError> {
    let (pair, order) = match entry.split_once(':') {
        Some((pair, order)) => (pair, Some(order.trim())),
        None => (entry, None),
    };
    let (a, b) = pair
        .split_once('-')
        .ok_or_else(|| ParseError::InvalidBondFormat(entry.to_string()))?;

    let index = |raw: &str| -> Result<usize, ParseError> {
        raw.trim().parse().map_err(|_| ParseError::InvalidAtomIndex {
            index: raw.trim().to_string(),
            bond: entry.to_string(),
        })
    };
    let (atom1, atom2) = (index(a)?, index(b)?);

    let order = order
        .map(|o| {
            o.parse::<BondOrder>().map_err(|_| ParseError::UnknownBondOrder {
                order: o.to_string(),
                bond: entry.to_string(),
            })
        })
        .transpose()?;

    Ok(Bond::new(atom1, atom2, order))
}

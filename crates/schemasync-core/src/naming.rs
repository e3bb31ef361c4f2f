//! Deterministic identifier naming for generated indexes and constraints.
//!
//! Names are derived from the owning table name and the column list via
//! CRC32, so repeated runs over unchanged metadata produce byte-identical
//! identifiers and unrelated tables cannot collide on short column names.

/// Longest identifier accepted by the supported engine families.
const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Builds a prefixed identifier from hashed name parts, truncated to the
/// portable identifier length.
fn generate_identifier(prefix: &str, table: &str, columns: &[&str]) -> String {
    let mut name = String::from(prefix);
    name.push('_');
    name.push_str(&hash_part(table));
    for column in columns {
        name.push_str(&hash_part(column));
    }
    name.truncate(MAX_IDENTIFIER_LENGTH);
    name
}

fn hash_part(part: &str) -> String {
    format!("{:X}", crc32fast::hash(part.as_bytes()))
}

/// Name for a non-unique index over `columns` on `table`.
#[must_use]
pub fn index_name(table: &str, columns: &[&str]) -> String {
    generate_identifier("IDX", table, columns)
}

/// Name for a unique index over `columns` on `table`.
#[must_use]
pub fn unique_index_name(table: &str, columns: &[&str]) -> String {
    generate_identifier("UNIQ", table, columns)
}

/// Name for a foreign key constraint over `columns` on `table`.
#[must_use]
pub fn foreign_key_name(table: &str, columns: &[&str]) -> String {
    generate_identifier("FK", table, columns)
}

//! Key and location normalization for inventory records.
//!
//! Each step is a small pure function so the quirks of the format can be
//! exercised in isolation. [`normalize`] applies them in order.

use crate::inventory::record::InventoryRecord;
use crate::inventory::table::InventoryTable;
use std::borrow::Cow;
use url::Url;

/// Module path fragments removed from every key, in this order.
pub const NOISE_FRAGMENTS: [&str; 7] = [
    "lawf.",
    "errors.",
    "serving.",
    "request.",
    "response.",
    "server.",
    "filetypes.",
];

/// A record after normalization, ready to be inserted into a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEntry {
    pub key: String,
    pub url: Url,
}

/// Normalize a record against the table built so far.
///
/// Returns `None` when the record must be skipped. Skipped records leave the
/// table untouched.
pub fn normalize(
    record: &InventoryRecord<'_>,
    table: &InventoryTable,
    base_url: &Url,
) -> Option<NormalizedEntry> {
    if is_duplicate_module(record, table) {
        return None;
    }

    let role = effective_role(record);
    let location = expand_location(record.location, record.name);
    let key = format!(
        "{}{}",
        key_prefix(record.domain, role),
        strip_noise(display_key(record))
    );
    if key.is_empty() {
        return None;
    }

    Some(NormalizedEntry {
        key,
        url: join_location(base_url, &location)?,
    })
}

/// Old Sphinx versions emit two `py:module` entries per module; the first wins.
///
/// The check is against the normalized keys already in the table.
pub fn is_duplicate_module(record: &InventoryRecord<'_>, table: &InventoryTable) -> bool {
    record.domain == "py" && record.role == "module" && table.contains_key(record.name)
}

/// Documents are filed under the `label` role.
pub fn effective_role<'a>(record: &InventoryRecord<'a>) -> &'a str {
    if record.domain == "std" && record.role == "doc" {
        "label"
    } else {
        record.role
    }
}

/// Replace a trailing `$` in `location` with the entry name.
pub fn expand_location<'a>(location: &'a str, name: &str) -> Cow<'a, str> {
    match location.strip_suffix('$') {
        Some(stem) => Cow::Owned(format!("{}{}", stem, name)),
        None => Cow::Borrowed(location),
    }
}

/// The display name, falling back to the entry name when it is `-`.
pub fn display_key<'a>(record: &InventoryRecord<'a>) -> &'a str {
    if record.dispname == "-" {
        record.name
    } else {
        record.dispname
    }
}

/// Only `std` domain keys are prefixed with their role.
pub fn key_prefix(domain: &str, role: &str) -> String {
    if domain == "std" {
        format!("{}:", role)
    } else {
        String::new()
    }
}

/// Remove every occurrence of each noise fragment, wherever it appears.
pub fn strip_noise(key: &str) -> String {
    NOISE_FRAGMENTS
        .iter()
        .fold(key.to_string(), |key, fragment| key.replace(fragment, ""))
}

/// Join a relative location onto a directory-style base URL.
///
/// Returns `None` if the location cannot be parsed or resolves outside the
/// base, as absolute URLs and `../` escapes do.
pub fn join_location(base_url: &Url, location: &str) -> Option<Url> {
    let url = base_url.join(location.trim_start_matches('/')).ok()?;
    url.as_str().starts_with(base_url.as_str()).then_some(url)
}

/// Ensure a base URL ends in `/` so that joins treat it as a directory.
pub fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

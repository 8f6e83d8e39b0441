//! Sphinx object inventory (version 2) parsing.

use crate::error::{Result, RtfmError};
use crate::inventory::normalize::normalize;
use crate::inventory::reader::InventoryReader;
use crate::inventory::record::InventoryRecord;
use crate::inventory::table::{InventoryMeta, InventoryTable};
use url::Url;

/// The only inventory format understood by the parser.
pub const VERSION_HEADER: &str = "# Sphinx inventory version 2";

/// Length of the `# Project: ` and `# Version: ` header prefixes.
const HEADER_PREFIX_LEN: usize = 11;

/// Parse a raw `objects.inv` buffer into a lookup table.
///
/// URLs are resolved against `base_url`, which is treated as a directory.
pub fn parse_inventory(buffer: &[u8], base_url: &Url) -> Result<InventoryTable> {
    let mut reader = InventoryReader::new(buffer);

    let version = reader.read_line()?.unwrap_or_default();
    if version.trim_end() != VERSION_HEADER {
        return Err(RtfmError::unsupported_version());
    }

    let project = header_value(reader.read_line()?);
    let release = header_value(reader.read_line()?);

    let compression = reader.read_line()?.unwrap_or_default();
    if !compression.contains("zlib") {
        return Err(RtfmError::not_zlib());
    }

    let mut table = InventoryTable::new(InventoryMeta {
        project,
        version: release,
    });
    let mut skipped = 0usize;

    for line in reader.compressed_lines() {
        let line = line?;
        let Some(entry) =
            InventoryRecord::parse(&line).and_then(|record| normalize(&record, &table, base_url))
        else {
            tracing::trace!("Skipping inventory line {:?}", line.trim_end());
            skipped += 1;
            continue;
        };

        table.insert(entry.key, entry.url);
    }

    tracing::debug!(
        "Parsed inventory for {} {} ({} entries, {} lines skipped)",
        table.meta().project,
        table.meta().version,
        table.len(),
        skipped
    );

    Ok(table)
}

/// Strip the fixed-width label from a `# Project:`/`# Version:` line.
fn header_value(line: Option<String>) -> String {
    line.unwrap_or_default()
        .trim_end()
        .chars()
        .skip(HEADER_PREFIX_LEN)
        .collect()
}

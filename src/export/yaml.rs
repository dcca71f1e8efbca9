//! YAML export of one owner's records

use std::io::Write;

use crate::error::TrackerResult;

use super::json::OwnerExport;

/// Write an export as YAML, with a short comment header
pub fn export_owner_yaml<W: Write>(export: &OwnerExport, writer: &mut W) -> TrackerResult<()> {
    writeln!(writer, "# expense-tracker export")?;
    writeln!(writer, "# Owner: {}", export.owner)?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, export)?;
    Ok(())
}

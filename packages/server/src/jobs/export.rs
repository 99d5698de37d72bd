//! CSV export of completed job results.

use chrono::{DateTime, Utc};
use leadgen::{Lead, CSV_FIELDS};

/// Render leads as a CSV document with a fixed header row.
pub fn leads_to_csv(leads: &[Lead]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_FIELDS)?;
    for lead in leads {
        writer.write_record(lead.csv_row())?;
    }
    Ok(writer.into_inner()?)
}

/// Download filename: `business_leads_{location}_{timestamp}.csv`, with
/// the location made filesystem-safe (spaces to underscores, commas out).
pub fn csv_filename(location: &str, now: DateTime<Utc>) -> String {
    let safe_location = location.replace(' ', "_").replace(',', "");
    format!(
        "business_leads_{}_{}.csv",
        safe_location,
        now.format("%Y%m%d_%H%M%S")
    )
}

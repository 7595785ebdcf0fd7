//! Delimited-text export of an augmented series.
//!
//! One row per date and one column per bar field or indicator. Undefined
//! indicator values are written as empty fields.

use std::io::Write;

use shared::models::AugmentedSeries;
use shared::utils::normalize_ticker;

use crate::error::EngineError;

const BAR_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

pub fn export_file_name(ticker: &str) -> String {
    format!("{}_data.csv", normalize_ticker(ticker))
}

pub fn write_csv<W: Write>(augmented: &AugmentedSeries, writer: W) -> Result<(), EngineError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let header: Vec<&str> = BAR_COLUMNS
        .iter()
        .copied()
        .chain(augmented.indicators().iter().map(|c| c.name.as_str()))
        .collect();
    wtr.write_record(&header)?;

    for row in augmented.rows() {
        let bar = row.bar;
        let mut record = vec![
            bar.date.format("%Y-%m-%d").to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
        ];
        record.extend(row.values.iter().map(|v| v.map(|v| v.to_string()).unwrap_or_default()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_bytes(augmented: &AugmentedSeries) -> Result<Vec<u8>, EngineError> {
    let mut buffer = Vec::new();
    write_csv(augmented, &mut buffer)?;
    Ok(buffer)
}

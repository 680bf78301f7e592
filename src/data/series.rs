use super::model::{DerivedSeries, SensorRecord};

/// Scale the raw current channel for plotting.
///
/// Readings below 1 collapse to 0; anything else is divided by 10 and
/// floored (`1` → 0, `10` → 1, `19.9` → 1, `20` → 2).
pub fn current_transform(raw: f64) -> f64 {
    if raw >= 1.0 {
        (raw / 10.0).floor()
    } else {
        0.0
    }
}

/// Derive the chart series from parsed records. Total over any input,
/// an empty slice gives five empty vectors.
pub fn build(records: &[SensorRecord]) -> DerivedSeries {
    let mut series = DerivedSeries {
        labels: Vec::with_capacity(records.len()),
        temp1: Vec::with_capacity(records.len()),
        temp3: Vec::with_capacity(records.len()),
        current: Vec::with_capacity(records.len()),
        chamber: Vec::with_capacity(records.len()),
    };

    for rec in records {
        series.labels.push(rec.time);
        series.temp1.push(rec.temp1);
        series.temp3.push(rec.temp3);
        series.current.push(current_transform(rec.current));
        series.chamber.push(rec.chamber_temp);
    }
    series
}

use super::model::{
    SensorRecord, CHAMBER_COL, CURRENT_COL, MIN_FIELDS, TEMP1_COL, TEMP3_COL, TIME_COL,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse raw CSV text into sensor records.
///
/// * Line 0 is a header and is always skipped, whatever it contains.
/// * Rows with fewer than [`MIN_FIELDS`] comma-separated fields are dropped.
/// * Rows where any of the time / temp1 / temp3 / current / chamber fields
///   has no finite numeric prefix are dropped.
///
/// Never fails: malformed input simply yields fewer (possibly zero) records,
/// in source order.
pub fn parse(raw: &str) -> Vec<SensorRecord> {
    let mut lines = raw.split('\n');
    if let Some(header) = lines.next() {
        log::debug!("Skipping header line: {:?}", header.trim_end());
    }
    lines.filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<SensorRecord> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let field = |idx: usize| parse_number_prefix(fields[idx]);

    Some(SensorRecord {
        time: field(TIME_COL)?,
        temp1: field(TEMP1_COL)?,
        temp3: field(TEMP3_COL)?,
        current: field(CURRENT_COL)?,
        chamber_temp: field(CHAMBER_COL)?,
    })
}

// ---------------------------------------------------------------------------
// Numeric prefix reader
// ---------------------------------------------------------------------------

/// Read the leading decimal number of a field, ignoring leading whitespace
/// and anything after the number (`"12.5 °C"` → 12.5, `"15\r"` → 15).
///
/// Returns `None` when there is no numeric prefix or the value is not finite.
pub fn parse_number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

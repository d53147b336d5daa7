use std::collections::BTreeMap;

use crate::models::LalinRecord;

/// Per-gate aggregate used as chart input.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct GateTotals {
    pub tunai: i64,
    pub e_toll: i64,
    pub records: usize,
}

impl GateTotals {
    pub fn total(&self) -> i64 {
        self.tunai + self.e_toll
    }
}

/// A record matches when the calendar-date prefix of its `Tanggal`
/// equals the selected ISO date. The backend sometimes returns full
/// datetimes, so only the first ten characters are compared.
pub fn matches_tanggal(record: &LalinRecord, tanggal: &str) -> bool {
    record.tanggal.get(..10) == Some(tanggal)
}

/// Filters records to the selected date and groups them by gate id,
/// summing cash and e-toll amounts per gate. An empty input (or a date
/// with no matching records) yields an empty map.
pub fn filter_by_date_and_group_by_gate(
    records: &[LalinRecord],
    tanggal: &str,
) -> BTreeMap<u32, GateTotals> {
    let mut grouped: BTreeMap<u32, GateTotals> = BTreeMap::new();
    for record in records.iter().filter(|r| matches_tanggal(r, tanggal)) {
        let entry = grouped.entry(record.id_gerbang).or_default();
        entry.tunai += record.tunai;
        entry.e_toll += record.e_toll_total();
        entry.records += 1;
    }
    grouped
}

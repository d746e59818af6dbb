//! Lookup of existing provider records.
//!
//! Lists are scanned in the order the API returned them and the first hit
//! wins. Nothing guarantees a (type, name) slot holds a single record; use
//! [`count_records`] to detect ambiguity.

use crate::providers::dynv6::types::Dynv6Record;

fn same_slot(candidate: &Dynv6Record, target: &Dynv6Record) -> bool {
    candidate.record_type == target.record_type && candidate.name == target.name
}

/// First record with the target's type and name.
pub fn find_record<'a>(records: &'a [Dynv6Record], target: &Dynv6Record) -> Option<&'a Dynv6Record> {
    records.iter().find(|rec| same_slot(rec, target))
}

/// First record with the target's type, name and data.
pub fn find_record_with_value<'a>(
    records: &'a [Dynv6Record],
    target: &Dynv6Record,
) -> Option<&'a Dynv6Record> {
    records
        .iter()
        .find(|rec| same_slot(rec, target) && rec.data == target.data)
}

/// Number of records sharing the target's type and name.
pub fn count_records(records: &[Dynv6Record], target: &Dynv6Record) -> usize {
    records.iter().filter(|rec| same_slot(rec, target)).count()
}

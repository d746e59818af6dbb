use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::record::{DNSRecord, DNSRecordType};
use crate::providers::dynv6::error::Dynv6Error;

/// dynv6 does not support custom TTLs; every record is reported with this one.
pub const RECORD_TTL: Duration = Duration::from_secs(60);

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Dynv6Zone {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "ipv4address")]
    pub ipv4_address: Option<String>,
    #[serde(default, rename = "ipv6prefix")]
    pub ipv6_prefix: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Record as exchanged with `/zones/{id}/records`.
///
/// `id == 0` means the record has not been created yet. `expanded_data` is
/// computed by the server and never sent back.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Dynv6Record {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: i64,
    #[serde(default, rename = "zoneID", skip_serializing_if = "is_unset")]
    pub zone_id: i64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, rename = "expandedData", skip_serializing)]
    pub expanded_data: Option<String>,
}

fn is_unset(id: &i64) -> bool {
    *id == 0
}

/// Type-specific fields (priority, flags, tag, weight, port, expanded data)
/// have no generic counterpart and are dropped.
pub fn to_dns_record(rec: &Dynv6Record) -> DNSRecord {
    DNSRecord {
        id: rec.id.to_string(),
        record_type: DNSRecordType::from(rec.record_type.as_str()),
        name: rec.name.clone(),
        value: rec.data.clone(),
        ttl: RECORD_TTL,
    }
}

/// The caller's TTL is ignored.
pub fn to_dynv6_record(zone: &str, rec: &DNSRecord) -> Result<Dynv6Record, Dynv6Error> {
    let id = if rec.id.is_empty() {
        0
    } else {
        rec.id.parse().map_err(|source| Dynv6Error::InvalidId {
            id: rec.id.clone(),
            source,
        })?
    };

    Ok(Dynv6Record {
        id,
        record_type: rec.record_type.to_string(),
        name: relative_name(zone, &rec.name),
        data: rec.value.clone(),
        ..Default::default()
    })
}

/// Converts a whole batch, failing before anything is sent if one record is invalid.
pub fn to_dynv6_records(zone: &str, records: &[DNSRecord]) -> Result<Vec<Dynv6Record>, Dynv6Error> {
    records.iter().map(|rec| to_dynv6_record(zone, rec)).collect()
}

/// Strips `.<zone>` (ignoring trailing dots) from `name`.
///
/// The zone apex maps to the empty name. Names outside the zone, including
/// names that are already relative, are returned unchanged.
pub fn relative_name(zone: &str, name: &str) -> String {
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    let fqdn = name.strip_suffix('.').unwrap_or(name);

    if zone.is_empty() {
        return name.to_string();
    }
    if fqdn == zone {
        return String::new();
    }
    match fqdn.strip_suffix(zone).and_then(|rest| rest.strip_suffix('.')) {
        Some(relative) => relative.to_string(),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn provider_record(id: i64, record_type: &str, name: &str, data: &str) -> Dynv6Record {
        Dynv6Record {
            id,
            zone_id: 100,
            record_type: record_type.to_string(),
            name: name.to_string(),
            data: data.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_dns_record_drops_type_specific_fields() {
        let rec = Dynv6Record {
            priority: Some(10),
            expanded_data: Some("mail.example.com.".to_string()),
            ..provider_record(7, "MX", "", "mail.example.com")
        };
        let dns = to_dns_record(&rec);
        assert_eq!(dns.id, "7");
        assert_eq!(dns.record_type, DNSRecordType::MX);
        assert_eq!(dns.name, "");
        assert_eq!(dns.value, "mail.example.com");
        assert_eq!(dns.ttl, RECORD_TTL);
    }

    #[test]
    fn test_to_dns_record_always_reports_fixed_ttl() {
        let dns = to_dns_record(&provider_record(1, "TXT", "txt", "hello"));
        assert_eq!(dns.ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_fully_qualified_name_is_made_relative() {
        let dns = DNSRecord::new(DNSRecordType::A, "host.example.dynv6.net.", "1.2.3.4");
        let rec = to_dynv6_record("example.dynv6.net", &dns).unwrap();
        assert_eq!(rec.id, 0);
        assert_eq!(rec.name, "host");
        assert_eq!(rec.record_type, "A");
        assert_eq!(rec.data, "1.2.3.4");
    }

    #[test]
    fn test_zone_trailing_dot_is_ignored() {
        let dns = DNSRecord::new(DNSRecordType::A, "host.example.dynv6.net", "1.2.3.4");
        let rec = to_dynv6_record("example.dynv6.net.", &dns).unwrap();
        assert_eq!(rec.name, "host");
    }

    #[test]
    fn test_relative_name_is_left_alone() {
        assert_eq!(relative_name("example.dynv6.net", "host"), "host");
        assert_eq!(relative_name("example.dynv6.net", "a.b"), "a.b");
    }

    #[test]
    fn test_name_outside_zone_is_left_alone() {
        assert_eq!(
            relative_name("example.dynv6.net", "host.other.net."),
            "host.other.net."
        );
        assert_eq!(
            relative_name("example.dynv6.net", "hostexample.dynv6.net"),
            "hostexample.dynv6.net"
        );
    }

    #[test]
    fn test_zone_apex_maps_to_empty_name() {
        assert_eq!(relative_name("example.dynv6.net", "example.dynv6.net."), "");
    }

    #[test]
    fn test_round_trip_keeps_type_and_value() {
        let dns = DNSRecord::new(DNSRecordType::TXT, "_acme.example.dynv6.net.", "token")
            .with_id("42");
        let rec = to_dynv6_record("example.dynv6.net", &dns).unwrap();
        let back = to_dns_record(&rec);
        assert_eq!(back.id, "42");
        assert_eq!(back.record_type, dns.record_type);
        assert_eq!(back.value, dns.value);
        assert_eq!(format!("{}.example.dynv6.net.", back.name), dns.name);
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let dns = DNSRecord::new(DNSRecordType::A, "host", "1.2.3.4").with_id("abc");
        let result = to_dynv6_record("example.dynv6.net", &dns);
        assert_matches!(result, Err(Dynv6Error::InvalidId { id, .. }) if id == "abc");
    }

    #[test]
    fn test_batch_conversion_fails_on_any_invalid_id() {
        let records = vec![
            DNSRecord::new(DNSRecordType::A, "ok", "1.2.3.4"),
            DNSRecord::new(DNSRecordType::A, "bad", "1.2.3.5").with_id("x1"),
        ];
        assert!(to_dynv6_records("example.dynv6.net", &records).is_err());
    }

    #[test]
    fn test_unset_ids_and_server_fields_are_not_serialized() {
        let rec = Dynv6Record {
            expanded_data: Some("ignored".to_string()),
            ..provider_record(0, "A", "host", "1.2.3.4")
        };
        let json = serde_json::to_value(Dynv6Record { zone_id: 0, ..rec }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "A", "name": "host", "data": "1.2.3.4" })
        );
    }

    #[test]
    fn test_decode_record_with_nulls() {
        let rec: Dynv6Record = serde_json::from_value(serde_json::json!({
            "id": 42,
            "zoneID": 100,
            "type": "SRV",
            "name": "_sip._tcp",
            "data": "sip.example.com",
            "priority": 10,
            "weight": 5,
            "port": 5060,
            "flags": null,
            "tag": null,
            "expandedData": "sip.example.com."
        }))
        .unwrap();
        assert_eq!(rec.id, 42);
        assert_eq!(rec.zone_id, 100);
        assert_eq!(rec.port, Some(5060));
        assert_eq!(rec.flags, None);
        assert_eq!(rec.expanded_data.as_deref(), Some("sip.example.com."));
    }

    #[test]
    fn test_decode_zone() {
        let zone: Dynv6Zone = serde_json::from_value(serde_json::json!({
            "id": 100,
            "name": "example.dynv6.net",
            "ipv4address": "1.2.3.4",
            "ipv6prefix": "2001:db8::/64",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-02-03T04:05:06Z"
        }))
        .unwrap();
        assert_eq!(zone.id, 100);
        assert_eq!(zone.ipv4_address.as_deref(), Some("1.2.3.4"));
        assert_eq!(zone.ipv6_prefix.as_deref(), Some("2001:db8::/64"));
        assert!(zone.created_at.is_some());
    }
}

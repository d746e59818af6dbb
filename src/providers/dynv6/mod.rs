//! dynv6 provider implementation

pub mod client;
pub mod error;
pub mod matcher;
pub mod types;


pub use client::Dynv6Provider;
pub use error::Dynv6Error;
pub use types::{Dynv6Record, Dynv6Zone, RECORD_TTL};

// --- DNSProvider trait implementation for Dynv6Provider ---
use crate::core::provider::DNSProvider;
use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;
use error::map_error;
use log::{info, warn};
use matcher::{count_records, find_record, find_record_with_value};
use types::{to_dns_record, to_dynv6_records};

impl Dynv6Provider {
    /// Existing records are only needed when some input carries no ID.
    async fn records_for_lookup(
        &self,
        zone: &Dynv6Zone,
        pending: &[Dynv6Record],
    ) -> Result<Vec<Dynv6Record>, Dynv6Error> {
        if pending.iter().all(|rec| rec.id != 0) {
            return Ok(Vec::new());
        }
        self.get_records(zone.id).await
    }
}

#[async_trait]
impl DNSProvider for Dynv6Provider {
    fn name(&self) -> &str {
        "dynv6"
    }

    async fn list_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.resolve_zone(zone).await.map_err(map_error)?;
        self.get_records(zone.id)
            .await
            .map(|v| v.iter().map(to_dns_record).collect())
            .map_err(map_error)
    }

    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.resolve_zone(zone).await.map_err(map_error)?;
        let pending = to_dynv6_records(&zone.name, &records).map_err(map_error)?;

        let mut added = Vec::with_capacity(pending.len());
        for rec in &pending {
            let created = self.add_record(zone.id, rec).await.map_err(map_error)?;
            info!(
                "[dynv6] Created {} record {:?} (id {}) in {}",
                created.record_type, created.name, created.id, zone.name
            );
            added.push(to_dns_record(&created));
        }
        Ok(added)
    }

    async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.resolve_zone(zone).await.map_err(map_error)?;
        let pending = to_dynv6_records(&zone.name, &records).map_err(map_error)?;
        let existing = self
            .records_for_lookup(&zone, &pending)
            .await
            .map_err(map_error)?;

        let mut saved = Vec::with_capacity(pending.len());
        for mut rec in pending {
            if rec.id == 0 {
                if let Some(found) = find_record(&existing, &rec) {
                    let candidates = count_records(&existing, &rec);
                    if candidates > 1 {
                        warn!(
                            "[dynv6] {candidates} {} records named {:?} in {}, updating the first (id {})",
                            rec.record_type, rec.name, zone.name, found.id
                        );
                    }
                    rec.id = found.id;
                }
            }

            let result = if rec.id == 0 {
                self.add_record(zone.id, &rec).await
            } else {
                self.update_record(zone.id, &rec).await
            };
            let result = result.map_err(map_error)?;
            info!(
                "[dynv6] Set {} record {:?} (id {}) in {}",
                result.record_type, result.name, result.id, zone.name
            );
            saved.push(to_dns_record(&result));
        }
        Ok(saved)
    }

    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = self.resolve_zone(zone).await.map_err(map_error)?;
        let pending = to_dynv6_records(&zone.name, &records).map_err(map_error)?;
        let existing = self
            .records_for_lookup(&zone, &pending)
            .await
            .map_err(map_error)?;

        let mut deleted = Vec::with_capacity(pending.len());
        for rec in pending {
            let target = if rec.id != 0 {
                rec
            } else if let Some(found) = find_record_with_value(&existing, &rec) {
                found.clone()
            } else {
                warn!(
                    "[dynv6] No {} record {:?} with value {:?} in {}, skipping",
                    rec.record_type, rec.name, rec.data, zone.name
                );
                continue;
            };

            self.delete_record(zone.id, target.id)
                .await
                .map_err(map_error)?;
            info!(
                "[dynv6] Deleted {} record {:?} (id {}) from {}",
                target.record_type, target.name, target.id, zone.name
            );
            deleted.push(to_dns_record(&target));
        }
        Ok(deleted)
    }
}

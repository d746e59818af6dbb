use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;

/// Generic record management interface.
///
/// `zone` is a zone name (trailing dot allowed) or a provider zone ID.
/// Batch operations are not atomic: they stop at the first failed write and
/// report that error, so earlier records in the batch may already be applied.
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn list_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error>;
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
    async fn set_records(&self, zone: &str, records: Vec<DNSRecord>)
    -> Result<Vec<DNSRecord>, Error>;
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}

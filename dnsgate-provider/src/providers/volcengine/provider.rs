//! 火山引擎 DnsProvider trait 实现

use std::any::Any;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::DnsProvider;
use crate::types::{
    CreateRecordRequest, DEFAULT_LINE, DEFAULT_TTL, DnsRecord, DnsRecordType, ProviderDomain,
    ProviderKind, RecordStatus, UpdateRecordRequest,
};

use super::types::{
    CreateRecordInput, DeleteRecordInput, ListRecordsInput, ListZonesInput, QueryZoneInput,
    RecordOutput, UpdateRecordInput, UpdateRecordStatusInput, ZoneInfo,
};
use super::{PAGE_SIZE, VolcengineProvider};

// ============ 字段映射 ============

/// 记录状态在火山引擎中是布尔 `Enable`
pub(crate) fn status_to_native(status: RecordStatus) -> bool {
    status == RecordStatus::Enable
}

/// 只有显式 `true` 视为启用，缺省视为暂停
pub(crate) fn status_from_native(enable: Option<bool>) -> RecordStatus {
    if enable == Some(true) {
        RecordStatus::Enable
    } else {
        RecordStatus::Disable
    }
}

/// TTL 已被限制在 `[1, i32::MAX]`，这里只做类型收窄
fn ttl_to_native(ttl: i64) -> i32 {
    i32::try_from(ttl).unwrap_or(i32::MAX)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 解析 ZID；非法值在发出请求之前报错
pub(crate) fn parse_zid(domain_id: &str) -> Result<i64> {
    domain_id
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|zid| *zid > 0)
        .ok_or_else(|| ProviderError::InvalidParameter {
            provider: "volcengine".to_string(),
            param: "domain_id".to_string(),
            detail: format!("'{domain_id}' is not a numeric zone ID (ZID)"),
        })
}

impl VolcengineProvider {
    fn convert_record(record: RecordOutput, domain_id: &str) -> DnsRecord {
        DnsRecord {
            id: record.record_id.unwrap_or_default(),
            domain_id: domain_id.to_string(),
            name: record.host.unwrap_or_default(),
            record_type: DnsRecordType::from(record.record_type.unwrap_or_default()),
            value: record.value.unwrap_or_default(),
            ttl: record.ttl.map_or(DEFAULT_TTL, i64::from),
            line: non_empty(record.line).unwrap_or_else(|| DEFAULT_LINE.to_string()),
            status: Some(status_from_native(record.enable)),
            remark: record.remark.unwrap_or_default(),
            priority: None,
        }
    }

    /// 创建/更新的响应缺字段时用请求值补齐
    fn record_from_output(record: RecordOutput, req: &CreateRecordRequest) -> DnsRecord {
        DnsRecord {
            id: record.record_id.unwrap_or_default(),
            domain_id: req.domain_id.clone(),
            name: record.host.unwrap_or_else(|| req.name.clone()),
            record_type: record
                .record_type
                .map_or_else(|| req.record_type.clone(), DnsRecordType::from),
            value: record.value.unwrap_or_else(|| req.value.clone()),
            ttl: record.ttl.map_or(req.ttl, i64::from),
            line: non_empty(record.line).unwrap_or_else(|| req.line.clone()),
            status: Some(status_from_native(record.enable)),
            remark: record.remark.or_else(|| req.remark.clone()).unwrap_or_default(),
            priority: req.priority,
        }
    }

    /// Volcengine-specific zone metadata (`QueryZone`): ZID, instance ID, DNS security
    /// plan and timestamps.
    pub async fn zone_details(&self, domain_id: &str) -> Result<ZoneInfo> {
        let zid = parse_zid(domain_id)?;
        let mut zone = self
            .session
            .query_zone(QueryZoneInput { zid: Some(zid) })
            .await?;
        zone.zid.get_or_insert(zid);
        Ok(zone)
    }
}

#[async_trait]
impl DnsProvider for VolcengineProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Volcengine
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn list_domains(&self, keyword: Option<&str>) -> Result<Vec<ProviderDomain>> {
        let output = self
            .session
            .list_zones(ListZonesInput {
                page_number: Some(1),
                page_size: Some(PAGE_SIZE),
                key: keyword.map(str::trim).filter(|k| !k.is_empty()).map(String::from),
            })
            .await?;

        Ok(output
            .zones
            .unwrap_or_default()
            .into_iter()
            .map(|zone| ProviderDomain {
                id: zone.zid.map(|z| z.to_string()).unwrap_or_default(),
                name: zone.zone_name.unwrap_or_default(),
                provider: ProviderKind::Volcengine,
                record_count: zone.record_count.and_then(|c| u32::try_from(c).ok()),
            })
            .collect())
    }

    async fn list_records(
        &self,
        domain_id: &str,
        subdomain: Option<&str>,
    ) -> Result<Vec<DnsRecord>> {
        let zid = parse_zid(domain_id)?;
        let output = self
            .session
            .list_records(ListRecordsInput {
                zid: Some(zid),
                host: subdomain.map(str::trim).filter(|s| !s.is_empty()).map(String::from),
                page_number: Some(1),
                page_size: Some(PAGE_SIZE),
            })
            .await?;

        Ok(output
            .records
            .unwrap_or_default()
            .into_iter()
            .map(|r| Self::convert_record(r, domain_id))
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<DnsRecord> {
        let zid = parse_zid(&req.domain_id)?;
        let output = self
            .session
            .create_record(CreateRecordInput {
                zid: Some(zid),
                host: Some(req.name.clone()),
                record_type: Some(req.record_type.to_string()),
                value: Some(req.value.clone()),
                ttl: Some(ttl_to_native(req.ttl)),
                line: Some(req.line.clone()),
                remark: req.remark.clone(),
            })
            .await?;
        Ok(Self::record_from_output(output, req))
    }

    async fn update_record(
        &self,
        record_id: &str,
        req: &UpdateRecordRequest,
    ) -> Result<DnsRecord> {
        let output = self
            .session
            .update_record(UpdateRecordInput {
                record_id: Some(record_id.to_string()),
                host: Some(req.name.clone()),
                record_type: Some(req.record_type.to_string()),
                value: Some(req.value.clone()),
                ttl: Some(ttl_to_native(req.ttl)),
                line: Some(req.line.clone()),
                remark: req.remark.clone(),
            })
            .await?;

        let mut record = Self::record_from_output(output, req);
        if record.id.is_empty() {
            record.id = record_id.to_string();
        }
        Ok(record)
    }

    async fn delete_record(&self, record_id: &str, _domain_id: &str) -> Result<()> {
        self.session
            .delete_record(DeleteRecordInput {
                record_id: Some(record_id.to_string()),
            })
            .await?;
        Ok(())
    }

    async fn set_record_status(
        &self,
        record_id: &str,
        _domain_id: &str,
        status: RecordStatus,
    ) -> Result<()> {
        self.session
            .update_record_status(UpdateRecordStatusInput {
                record_id: Some(record_id.to_string()),
                enable: Some(status_to_native(status)),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        for status in [RecordStatus::Enable, RecordStatus::Disable] {
            assert_eq!(status_from_native(Some(status_to_native(status))), status);
        }
    }

    #[test]
    fn missing_enable_is_disabled() {
        assert_eq!(status_from_native(None), RecordStatus::Disable);
    }

    #[test]
    fn parse_zid_accepts_digits() {
        assert!(matches!(parse_zid(" 58846 "), Ok(58_846)));
    }

    #[test]
    fn parse_zid_rejects_names() {
        for bad in ["example.com", "", "0", "-3"] {
            assert!(
                matches!(parse_zid(bad), Err(ProviderError::InvalidParameter { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn ttl_narrowing() {
        assert_eq!(ttl_to_native(600), 600);
        assert_eq!(ttl_to_native(crate::types::MAX_TTL), i32::MAX);
    }

    #[test]
    fn convert_record_widens_ttl_and_defaults_nulls() {
        let record = VolcengineProvider::convert_record(
            RecordOutput {
                record_id: Some("1234".into()),
                host: Some("www".into()),
                record_type: Some("A".into()),
                value: Some("203.0.113.5".into()),
                ttl: Some(i32::MAX),
                enable: Some(true),
                ..Default::default()
            },
            "58846",
        );
        assert_eq!(record.ttl, 2_147_483_647_i64);
        assert_eq!(record.line, DEFAULT_LINE);
        assert_eq!(record.status, Some(RecordStatus::Enable));
        assert_eq!(record.remark, "");
        assert_eq!(record.domain_id, "58846");
    }
}

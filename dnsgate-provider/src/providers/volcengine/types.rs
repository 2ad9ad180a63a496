//! 火山引擎 DNS SDK 形状的输入/输出类型
//!
//! 字段与官方 SDK 一致：几乎全部可空，TTL 为 32 位，记录状态为布尔 `Enable`。

use serde::{Deserialize, Serialize};

// ============ 输入 ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListZonesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    /// 域名关键字
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryZoneInput {
    #[serde(rename = "ZID")]
    pub zid: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListRecordsInput {
    #[serde(rename = "ZID")]
    pub zid: Option<i64>,
    /// 主机记录过滤
    #[serde(rename = "Host", skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "PageNumber", skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i32>,
    #[serde(rename = "PageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateRecordInput {
    #[serde(rename = "ZID")]
    pub zid: Option<i64>,
    #[serde(rename = "Host")]
    pub host: Option<String>,
    #[serde(rename = "Type")]
    pub record_type: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i32>,
    #[serde(rename = "Line", skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(rename = "Remark", skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateRecordInput {
    #[serde(rename = "RecordID")]
    pub record_id: Option<String>,
    #[serde(rename = "Host")]
    pub host: Option<String>,
    #[serde(rename = "Type")]
    pub record_type: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i32>,
    /// 更新接口要求必填
    #[serde(rename = "Line")]
    pub line: Option<String>,
    #[serde(rename = "Remark", skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteRecordInput {
    #[serde(rename = "RecordID")]
    pub record_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateRecordStatusInput {
    #[serde(rename = "RecordID")]
    pub record_id: Option<String>,
    #[serde(rename = "Enable")]
    pub enable: Option<bool>,
}

// ============ 输出 ============

/// Zone metadata as returned by `ListZones` / `QueryZone`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    #[serde(rename = "ZID", default)]
    pub zid: Option<i64>,
    #[serde(rename = "ZoneName", default)]
    pub zone_name: Option<String>,
    #[serde(rename = "RecordCount", default)]
    pub record_count: Option<i32>,
    #[serde(rename = "InstanceID", default)]
    pub instance_id: Option<String>,
    #[serde(rename = "DnsSecurity", default)]
    pub dns_security: Option<String>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListZonesOutput {
    #[serde(rename = "Zones", default)]
    pub zones: Option<Vec<ZoneInfo>>,
    #[serde(rename = "Total", default)]
    pub total: Option<i32>,
}

/// 单条记录；列表、创建、更新共用
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecordOutput {
    #[serde(rename = "RecordID", default)]
    pub record_id: Option<String>,
    #[serde(rename = "Host", default)]
    pub host: Option<String>,
    #[serde(rename = "Type", default)]
    pub record_type: Option<String>,
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
    #[serde(rename = "TTL", default)]
    pub ttl: Option<i32>,
    #[serde(rename = "Line", default)]
    pub line: Option<String>,
    #[serde(rename = "Enable", default)]
    pub enable: Option<bool>,
    #[serde(rename = "Remark", default)]
    pub remark: Option<String>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<String>,
}

/// `CreateRecord` / `UpdateRecord` 返回完整记录
pub type CreateRecordOutput = RecordOutput;
pub type UpdateRecordOutput = RecordOutput;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListRecordsOutput {
    #[serde(rename = "Records", default)]
    pub records: Option<Vec<RecordOutput>>,
    #[serde(rename = "TotalCount", default)]
    pub total_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateRecordStatusOutput {
    #[serde(rename = "RecordID", default)]
    pub record_id: Option<String>,
    #[serde(rename = "Enable", default)]
    pub enable: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteRecordOutput {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_list_records_input_skips_none() {
        let input = ListRecordsInput {
            zid: Some(58_846),
            host: None,
            page_number: Some(1),
            page_size: Some(500),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"ZID": 58846, "PageNumber": 1, "PageSize": 500})
        );
    }

    #[test]
    fn deserialize_record_with_nulls() {
        let out: RecordOutput = serde_json::from_value(json!({
            "RecordID": "1234",
            "Host": "www",
            "Type": "A",
            "Value": "203.0.113.5",
            "TTL": 600,
            "Line": null,
            "Enable": null
        }))
        .unwrap();
        assert_eq!(out.record_id.as_deref(), Some("1234"));
        assert_eq!(out.ttl, Some(600));
        assert!(out.line.is_none());
        assert!(out.enable.is_none());
        assert!(out.remark.is_none());
    }

    #[test]
    fn deserialize_zone_list() {
        let out: ListZonesOutput = serde_json::from_value(json!({
            "Zones": [{"ZID": 58846, "ZoneName": "example.com", "RecordCount": 4,
                       "InstanceID": "inst-1", "DnsSecurity": "free"}],
            "Total": 1
        }))
        .unwrap();
        let zones = out.zones.unwrap();
        assert_eq!(zones[0].zid, Some(58_846));
        assert_eq!(zones[0].dns_security.as_deref(), Some("free"));
    }
}

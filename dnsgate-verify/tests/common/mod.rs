//! 共享测试工具

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use dnsgate_verify::{DnsLookup, VerifyError, VerifyResult};

/// 模拟已发布的 DNS 记录，按记录名应答
#[derive(Default)]
pub struct PublishedRecords {
    pub txt: HashMap<String, Vec<String>>,
    pub cname: HashMap<String, String>,
    /// 预置的解析失败
    pub failure: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl PublishedRecords {
    pub fn with_txt(name: &str, values: &[&str]) -> Self {
        let mut records = Self::default();
        records.txt.insert(
            name.to_string(),
            values.iter().map(ToString::to_string).collect(),
        );
        records
    }

    pub fn with_cname(name: &str, target: &str) -> Self {
        let mut records = Self::default();
        records.cname.insert(name.to_string(), target.to_string());
        records
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock").clone()
    }

    fn check(&self, name: &str) -> VerifyResult<()> {
        self.queries.lock().expect("queries lock").push(name.to_string());
        match &self.failure {
            Some(reason) => Err(VerifyError::Dns(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DnsLookup for PublishedRecords {
    async fn txt(&self, name: &str) -> VerifyResult<Vec<String>> {
        self.check(name)?;
        Ok(self.txt.get(name).cloned().unwrap_or_default())
    }

    async fn cname(&self, name: &str) -> VerifyResult<Option<String>> {
        self.check(name)?;
        Ok(self.cname.get(name).cloned())
    }
}

/// 把字符串的最后一个字符换成另一个十六进制字符
pub fn tamper(value: &str) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    if let Some(last) = chars.last_mut() {
        *last = if *last == '0' { '1' } else { '0' };
    }
    chars.into_iter().collect()
}

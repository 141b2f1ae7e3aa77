// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 文档实体
///
/// 爬取的基本单元和输出。由列表页采集器创建（只有标题、链接、日期和摘要），
/// 由文档补全器写入正文和加载时间，最后经过采集闸门一次。
/// 被闸门接受后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// 存储分配的标识符，创建时为空
    pub id: Option<Uuid>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    /// 正文，补全成功后写入
    pub text: Option<String>,
    /// 网页地址，文档的稳定主键
    pub web_link: String,
    pub local_link: Option<String>,
    /// 自由格式的附加数据
    pub other_data: Option<serde_json::Value>,
    pub pub_date: Option<DateTime<Utc>>,
    /// 补全成功的时间，当且仅当补全成功时存在
    pub load_date: Option<DateTime<Utc>>,
}

impl Document {
    /// 从列表页条目创建部分文档
    pub fn stub(
        title: String,
        web_link: String,
        abstract_text: Option<String>,
        pub_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title,
            abstract_text,
            text: None,
            web_link,
            local_link: None,
            other_data: None,
            pub_date: Some(pub_date),
            load_date: None,
        }
    }

    /// 内容指纹
    ///
    /// 标题和网页地址的 SHA-256，只用于与上次爬取的最后一篇文档比较。
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        // unit separator keeps ("ab", "c") and ("a", "bc") apart
        hasher.update([0x1f]);
        hasher.update(self.web_link.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 是否已完成补全
    pub fn is_enriched(&self) -> bool {
        self.load_date.is_some()
    }
}

//! Merchant model.

use serde::{Deserialize, Serialize};

use super::{BizType, MerchantCode, MerchantStatus};

/// A business that originates payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Unique merchant identifier.
    #[serde(rename = "mchtCode")]
    pub merchant_code: MerchantCode,
    /// Display name.
    #[serde(rename = "mchtName")]
    pub merchant_name: String,
    /// Lifecycle state.
    pub status: MerchantStatus,
    /// Business category.
    pub biz_type: BizType,
    /// Business registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biz_no: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Registration timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

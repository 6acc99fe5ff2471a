// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current snapshot/export format version. Mismatches on import are
/// reported as warnings, never rejected.
pub const SNAPSHOT_VERSION: &str = "2.0";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub profile_id: String,
    pub bank_name: String,
    pub card_name: String,
    /// Day of month (1-31) the statement falls due.
    pub due_day: u8,
    /// Day of month (1-31) the billing cycle cuts off.
    pub cutoff_day: u8,
    pub color: String,
}

/// One billed month for one card. At most one Statement may exist per
/// (card_id, month_str) pair; all direct mutations look the pair up
/// before deciding insert vs update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub id: String,
    pub card_id: String,
    /// "YYYY-MM"
    pub month_str: String,
    pub amount: Decimal,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_unbilled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_amount: Option<Decimal>,
}

/// Amortizing charge on a card. Whether it is active in a given month is
/// derived from start_date and terms, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: String,
    pub card_id: String,
    pub name: String,
    pub total_principal: Decimal,
    pub terms: u32,
    pub monthly_amortization: Decimal,
    /// "YYYY-MM-DD"
    pub start_date: String,
}

impl Installment {
    /// True when `month` ("YYYY-MM") falls within [start month, start month + terms).
    pub fn is_active_in(&self, month: &str) -> bool {
        let Some(start) = self.start_date.get(..7).and_then(crate::utils::month_index) else {
            return false;
        };
        let Some(asked) = crate::utils::month_index(month) else {
            return false;
        };
        asked >= start && asked < start + self.terms as i32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashInstallment {
    pub id: String,
    pub card_id: String,
    pub name: String,
    pub monthly_amount: Decimal,
    pub terms: u32,
    pub start_date: String,
    pub is_paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OneTimeBill {
    pub id: String,
    pub card_id: String,
    pub name: String,
    pub amount: Decimal,
    pub month_str: String,
    pub is_paid: bool,
}

/// One row per (profile_id, month_str).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBalance {
    pub id: String,
    pub profile_id: String,
    pub month_str: String,
    pub balance: Decimal,
}

/// The full exportable/importable state of the application at a point in
/// time. Satellite collections default to empty so older exports that
/// predate them still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub profiles: Vec<Profile>,
    pub cards: Vec<CreditCard>,
    pub statements: Vec<Statement>,
    pub installments: Vec<Installment>,
    #[serde(default)]
    pub cash_installments: Vec<CashInstallment>,
    #[serde(default)]
    pub one_time_bills: Vec<OneTimeBill>,
    #[serde(default)]
    pub bank_balances: Vec<BankBalance>,
    pub active_profile_id: Option<String>,
    pub active_month: Option<String>,
}

/// Single-profile backup used by the replace-import path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBackup {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub profile: Profile,
    pub cards: Vec<CreditCard>,
    pub statements: Vec<Statement>,
    pub installments: Vec<Installment>,
}

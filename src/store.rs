// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::models::{
    BankBalance, CashInstallment, CreditCard, Installment, OneTimeBill, Profile, Statement,
};

/// Well-known entry keys. One per entity collection, one per scalar cursor.
pub mod keys {
    pub const PROFILES: &str = "profiles";
    pub const CARDS: &str = "cards";
    pub const STATEMENTS: &str = "statements";
    pub const INSTALLMENTS: &str = "installments";
    pub const CASH_INSTALLMENTS: &str = "cashInstallments";
    pub const ONE_TIME_BILLS: &str = "oneTimeBills";
    pub const BANK_BALANCES: &str = "bankBalances";
    pub const ACTIVE_PROFILE_ID: &str = "activeProfileId";
    pub const ACTIVE_MONTH: &str = "activeMonth";
    pub const MULTI_PROFILE_MODE: &str = "multiProfileMode";
    pub const SELECTED_PROFILE_IDS: &str = "selectedProfileIds";
    pub const BANK_BALANCE_TRACKING: &str = "bankBalanceTracking";
    pub const LOCAL_MODIFIED_AT: &str = "localModifiedAt";
}

/// Narrow persistence capability the core is written against. Values are
/// JSON text; writes are effectively atomic per key.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
}

/// Production store backed by the single `entries` table in sqlite.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM entries WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
            .with_context(|| format!("Read entry '{}'", key))?;
        Ok(v)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO entries(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )
            .with_context(|| format!("Write entry '{}'", key))?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed facade over the key-value store. Constructed once per process and
/// passed by reference to every command and to the sync core.
pub struct AppStore {
    inner: Box<dyn KeyValueStore>,
}

impl AppStore {
    pub fn new(inner: Box<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn open_default() -> Result<Self> {
        let conn = crate::db::open_or_init()?;
        Ok(Self::new(Box::new(SqliteStore::new(conn))))
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.inner.get_raw(key)? {
            Some(raw) => {
                let v = serde_json::from_str(&raw)
                    .with_context(|| format!("Parse entry '{}'", key))?;
                Ok(Some(v))
            }
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.inner.set_raw(key, &serde_json::to_string(value)?)
    }

    fn get_vec<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    // Entity collections. Mutation is always replace-the-whole-collection.

    pub fn profiles(&self) -> Result<Vec<Profile>> {
        self.get_vec(keys::PROFILES)
    }

    pub fn set_profiles(&self, v: &[Profile]) -> Result<()> {
        self.set(keys::PROFILES, &v)
    }

    pub fn cards(&self) -> Result<Vec<CreditCard>> {
        self.get_vec(keys::CARDS)
    }

    pub fn set_cards(&self, v: &[CreditCard]) -> Result<()> {
        self.set(keys::CARDS, &v)
    }

    pub fn statements(&self) -> Result<Vec<Statement>> {
        self.get_vec(keys::STATEMENTS)
    }

    pub fn set_statements(&self, v: &[Statement]) -> Result<()> {
        self.set(keys::STATEMENTS, &v)
    }

    pub fn installments(&self) -> Result<Vec<Installment>> {
        self.get_vec(keys::INSTALLMENTS)
    }

    pub fn set_installments(&self, v: &[Installment]) -> Result<()> {
        self.set(keys::INSTALLMENTS, &v)
    }

    pub fn cash_installments(&self) -> Result<Vec<CashInstallment>> {
        self.get_vec(keys::CASH_INSTALLMENTS)
    }

    pub fn set_cash_installments(&self, v: &[CashInstallment]) -> Result<()> {
        self.set(keys::CASH_INSTALLMENTS, &v)
    }

    pub fn one_time_bills(&self) -> Result<Vec<OneTimeBill>> {
        self.get_vec(keys::ONE_TIME_BILLS)
    }

    pub fn set_one_time_bills(&self, v: &[OneTimeBill]) -> Result<()> {
        self.set(keys::ONE_TIME_BILLS, &v)
    }

    pub fn bank_balances(&self) -> Result<Vec<BankBalance>> {
        self.get_vec(keys::BANK_BALANCES)
    }

    pub fn set_bank_balances(&self, v: &[BankBalance]) -> Result<()> {
        self.set(keys::BANK_BALANCES, &v)
    }

    // Scalar cursors.

    pub fn active_profile_id(&self) -> Result<Option<String>> {
        Ok(self.get(keys::ACTIVE_PROFILE_ID)?.flatten())
    }

    pub fn set_active_profile_id(&self, id: Option<&str>) -> Result<()> {
        self.set(keys::ACTIVE_PROFILE_ID, &id)
    }

    pub fn active_month(&self) -> Result<Option<String>> {
        Ok(self.get(keys::ACTIVE_MONTH)?.flatten())
    }

    pub fn set_active_month(&self, month: Option<&str>) -> Result<()> {
        self.set(keys::ACTIVE_MONTH, &month)
    }

    pub fn multi_profile_mode(&self) -> Result<bool> {
        Ok(self.get(keys::MULTI_PROFILE_MODE)?.unwrap_or(false))
    }

    pub fn set_multi_profile_mode(&self, on: bool) -> Result<()> {
        self.set(keys::MULTI_PROFILE_MODE, &on)
    }

    pub fn selected_profile_ids(&self) -> Result<Vec<String>> {
        self.get_vec(keys::SELECTED_PROFILE_IDS)
    }

    pub fn set_selected_profile_ids(&self, ids: &[String]) -> Result<()> {
        self.set(keys::SELECTED_PROFILE_IDS, &ids)
    }

    pub fn bank_balance_tracking(&self) -> Result<bool> {
        Ok(self.get(keys::BANK_BALANCE_TRACKING)?.unwrap_or(false))
    }

    pub fn set_bank_balance_tracking(&self, on: bool) -> Result<()> {
        self.set(keys::BANK_BALANCE_TRACKING, &on)
    }

    /// Local-modification cursor driving the auto-sync decision. Updated on
    /// every data mutation and on every successful upload/download.
    pub fn local_modified_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.get(keys::LOCAL_MODIFIED_AT)?.flatten())
    }

    pub fn set_local_modified_at(&self, at: DateTime<Utc>) -> Result<()> {
        self.set(keys::LOCAL_MODIFIED_AT, &Some(at))
    }

    pub fn mark_modified(&self) -> Result<()> {
        self.set_local_modified_at(Utc::now())
    }

    // Lookups shared by commands.

    pub fn profile_named(&self, name: &str) -> Result<Profile> {
        self.profiles()?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| anyhow!("Profile '{}' not found", name))
    }

    pub fn card_named(&self, name: &str) -> Result<CreditCard> {
        self.cards()?
            .into_iter()
            .find(|c| c.card_name == name)
            .ok_or_else(|| anyhow!("Card '{}' not found", name))
    }

    /// Seed the "default" profile on first run and point the cursor at it.
    pub fn ensure_seed_profile(&self) -> Result<Profile> {
        let mut profiles = self.profiles()?;
        if profiles.is_empty() {
            let p = Profile {
                id: crate::models::new_id(),
                name: "default".to_string(),
            };
            profiles.push(p.clone());
            self.set_profiles(&profiles)?;
            self.set_active_profile_id(Some(&p.id))?;
            return Ok(p);
        }
        if self.active_profile_id()?.is_none() {
            self.set_active_profile_id(Some(&profiles[0].id))?;
        }
        Ok(profiles[0].clone())
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::draft::{AmountInput, ExpenseDraft, IncomeDraft, RecordDraft};
use crate::error::{DraftError, StoreError};
use crate::models::{Entry, Expense, Income};

/// Where income and expense collections come from. Every call hands out a full copy.
pub trait RecordSource {
    fn income(&self) -> Result<Vec<Income>, StoreError>;
    fn expenses(&self) -> Result<Vec<Expense>, StoreError>;

    fn load(&self) -> Result<(Vec<Income>, Vec<Expense>), StoreError> {
        Ok((self.income()?, self.expenses()?))
    }
}

/// In-process record collection with create/update/delete.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    income: Vec<Income>,
    expenses: Vec<Expense>,
}

impl MemoryStore {
    pub fn new(income: Vec<Income>, expenses: Vec<Expense>) -> Result<Self, StoreError> {
        ensure_unique_ids(&income, &expenses)?;
        Ok(Self { income, expenses })
    }

    /// Fixture data of a small print shop.
    pub fn seeded() -> Result<Self, StoreError> {
        let income = SEED_INCOME
            .iter()
            .map(|s| {
                let draft = IncomeDraft {
                    base: seed_base(s.date, s.amount, s.category, s.description),
                    client: Some(s.client.to_string()),
                    invoice_number: s.invoice_number.map(str::to_string),
                };
                seed_record(s.id, s.date, |now| draft.build(s.id, now))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let expenses = SEED_EXPENSES
            .iter()
            .map(|s| {
                let draft = ExpenseDraft {
                    base: seed_base(s.date, s.amount, s.category, s.description),
                    vendor: Some(s.vendor.to_string()),
                    receipt_number: s.receipt_number.map(str::to_string),
                    tax_deductible: Some(s.tax_deductible),
                };
                seed_record(s.id, s.date, |now| draft.build(s.id, now))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(income, expenses)
    }

    /// New entries go to the front, like the entry tables show them.
    pub fn add_income(
        &mut self,
        draft: &IncomeDraft,
        now: DateTime<Utc>,
    ) -> Result<Income, StoreError> {
        let income = draft.build(Uuid::new_v4().to_string(), now)?;
        self.income.insert(0, income.clone());
        info!(id = %income.record.id, "added income");
        Ok(income)
    }

    pub fn add_expense(
        &mut self,
        draft: &ExpenseDraft,
        now: DateTime<Utc>,
    ) -> Result<Expense, StoreError> {
        let expense = draft.build(Uuid::new_v4().to_string(), now)?;
        self.expenses.insert(0, expense.clone());
        info!(id = %expense.record.id, "added expense");
        Ok(expense)
    }

    pub fn update_income(
        &mut self,
        id: &str,
        draft: &IncomeDraft,
        now: DateTime<Utc>,
    ) -> Result<Income, StoreError> {
        let income = self
            .income
            .iter_mut()
            .find(|i| i.record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        draft.apply(income, now)?;
        Ok(income.clone())
    }

    pub fn update_expense(
        &mut self,
        id: &str,
        draft: &ExpenseDraft,
        now: DateTime<Utc>,
    ) -> Result<Expense, StoreError> {
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        draft.apply(expense, now)?;
        Ok(expense.clone())
    }

    /// Removes the entry with `id` from whichever collection holds it.
    pub fn remove(&mut self, id: &str) -> Result<Entry, StoreError> {
        if let Some(pos) = self.income.iter().position(|i| i.record.id == id) {
            return Ok(Entry::Income(self.income.remove(pos)));
        }
        if let Some(pos) = self.expenses.iter().position(|e| e.record.id == id) {
            return Ok(Entry::Expense(self.expenses.remove(pos)));
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<Entry> {
        self.income
            .iter()
            .find(|i| i.record.id == id)
            .cloned()
            .map(Entry::from)
            .or_else(|| {
                self.expenses
                    .iter()
                    .find(|e| e.record.id == id)
                    .cloned()
                    .map(Entry::from)
            })
    }
}

impl RecordSource for MemoryStore {
    fn income(&self) -> Result<Vec<Income>, StoreError> {
        Ok(self.income.clone())
    }

    fn expenses(&self) -> Result<Vec<Expense>, StoreError> {
        Ok(self.expenses.clone())
    }
}

#[derive(Debug, Deserialize)]
struct StoredIncome {
    id: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    draft: IncomeDraft,
}

#[derive(Debug, Deserialize)]
struct StoredExpense {
    id: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    draft: ExpenseDraft,
}

#[derive(Debug, Deserialize)]
struct RecordsFile {
    #[serde(default)]
    income: Vec<StoredIncome>,
    #[serde(default)]
    expenses: Vec<StoredExpense>,
}

/// A JSON records file `{ "income": [...], "expenses": [...] }`, validated as a whole.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    store: MemoryStore,
}

impl JsonFileSource {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let shown = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: shown.clone(),
            source,
        })?;
        let file: RecordsFile = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: shown.clone(),
            source,
        })?;

        let now = Utc::now();
        let income = file
            .income
            .into_iter()
            .map(|s| -> Result<Income, StoreError> {
                let created = s.created_at.unwrap_or(now);
                let mut income = s.draft.build(s.id.clone(), created).map_err(|source| {
                    StoreError::InvalidRecord { id: s.id.clone(), source }
                })?;
                income.record.updated_at = s.updated_at.unwrap_or(created);
                Ok(income)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let expenses = file
            .expenses
            .into_iter()
            .map(|s| -> Result<Expense, StoreError> {
                let created = s.created_at.unwrap_or(now);
                let mut expense = s.draft.build(s.id.clone(), created).map_err(|source| {
                    StoreError::InvalidRecord { id: s.id.clone(), source }
                })?;
                expense.record.updated_at = s.updated_at.unwrap_or(created);
                Ok(expense)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            path = %shown,
            income = income.len(),
            expenses = expenses.len(),
            "loaded records file"
        );
        Ok(Self {
            store: MemoryStore::new(income, expenses)?,
        })
    }
}

impl RecordSource for JsonFileSource {
    fn income(&self) -> Result<Vec<Income>, StoreError> {
        self.store.income()
    }

    fn expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.store.expenses()
    }
}

fn ensure_unique_ids(income: &[Income], expenses: &[Expense]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    let ids = income
        .iter()
        .map(|i| &i.record.id)
        .chain(expenses.iter().map(|e| &e.record.id));
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId(id.clone()));
        }
    }
    Ok(())
}

struct SeedIncome {
    id: &'static str,
    date: &'static str,
    amount: &'static str,
    category: &'static str,
    description: &'static str,
    client: &'static str,
    invoice_number: Option<&'static str>,
}

struct SeedExpense {
    id: &'static str,
    date: &'static str,
    amount: &'static str,
    category: &'static str,
    description: &'static str,
    vendor: &'static str,
    receipt_number: Option<&'static str>,
    tax_deductible: bool,
}

fn seed_base(date: &str, amount: &str, category: &str, description: &str) -> RecordDraft {
    RecordDraft {
        date: Some(date.to_string()),
        amount: Some(AmountInput::from(amount)),
        category: Some(category.to_string()),
        description: Some(description.to_string()),
    }
}

/// Seeds are stamped as created at 10:00 UTC on their booking date.
fn seed_record<T>(
    id: &str,
    date: &str,
    build: impl FnOnce(DateTime<Utc>) -> Result<T, DraftError>,
) -> Result<T, StoreError> {
    let invalid = |source| StoreError::InvalidRecord {
        id: id.to_string(),
        source,
    };
    let created = DateTime::parse_from_rfc3339(&format!("{}T10:00:00Z", date))
        .map_err(|_| invalid(DraftError::InvalidDate(date.to_string())))?
        .with_timezone(&Utc);
    build(created).map_err(invalid)
}

const SEED_INCOME: &[SeedIncome] = &[
    SeedIncome {
        id: "1",
        date: "2023-03-10",
        amount: "1500.00",
        category: "Druckaufträge",
        description: "Broschüren-Druck für Marketingkampagne",
        client: "Schmidt GmbH",
        invoice_number: Some("INV-2023-001"),
    },
    SeedIncome {
        id: "2",
        date: "2023-03-15",
        amount: "950.00",
        category: "Digitaldruck",
        description: "Visitenkarten und Briefpapier",
        client: "M. Müller",
        invoice_number: Some("INV-2023-002"),
    },
    SeedIncome {
        id: "253",
        date: "2024-08-03",
        amount: "670.00",
        category: "Großformatdruck",
        description: "Werbetafeln für Produkteinführung",
        client: "Autohaus Fahrspaß",
        invoice_number: Some("INV-2024-063"),
    },
];

const SEED_EXPENSES: &[SeedExpense] = &[
    SeedExpense {
        id: "1001",
        date: "2023-03-01",
        amount: "1450.00",
        category: "Büromiete",
        description: "Monatsmiete März",
        vendor: "Immobilien Verwaltung GmbH",
        receipt_number: None,
        tax_deductible: true,
    },
    SeedExpense {
        id: "263",
        date: "2023-09-01",
        amount: "1450.00",
        category: "Büromiete",
        description: "Monatsmiete September",
        vendor: "Immobilien Verwaltung GmbH",
        receipt_number: None,
        tax_deductible: true,
    },
    SeedExpense {
        id: "264",
        date: "2023-09-04",
        amount: "78.00",
        category: "Büromaterial",
        description: "Bürobedarf monatlich",
        vendor: "Office Supplies GmbH",
        receipt_number: Some("R-2023-264"),
        tax_deductible: true,
    },
    SeedExpense {
        id: "331",
        date: "2024-03-13",
        amount: "98.00",
        category: "Telekommunikation",
        description: "Geschäftshandyvertrag",
        vendor: "TeleMobil GmbH",
        receipt_number: Some("R-2024-023"),
        tax_deductible: true,
    },
];

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Building and updating records from partial, textual input.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::DraftError;
use crate::models::{Expense, FinancialRecord, Income};
use crate::utils::{parse_date, parse_decimal};

pub const DEFAULT_CATEGORY: &str = "Sonstiges";

/// Amounts arrive as JSON numbers from files and as text from forms.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(Decimal),
    Text(String),
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        AmountInput::Text(s.to_string())
    }
}

impl AmountInput {
    fn resolve(&self) -> Result<Decimal, DraftError> {
        let amount = match self {
            AmountInput::Number(d) => *d,
            AmountInput::Text(s) => parse_decimal(s)?,
        };
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DraftError::NegativeAmount(amount));
        }
        Ok(amount)
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(v: &'a Option<String>, field: &'static str) -> Result<&'a str, DraftError> {
    non_blank(v).ok_or(DraftError::MissingField(field))
}

/// Optional fields: blank input clears the value.
fn optional(v: &Option<String>) -> Option<String> {
    non_blank(v).map(str::to_string)
}

/// Base fields common to both drafts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecordDraft {
    pub date: Option<String>,
    pub amount: Option<AmountInput>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl RecordDraft {
    fn date(&self) -> Result<Option<NaiveDate>, DraftError> {
        non_blank(&self.date).map(parse_date).transpose()
    }

    fn amount(&self) -> Result<Option<Decimal>, DraftError> {
        self.amount.as_ref().map(AmountInput::resolve).transpose()
    }

    fn build(&self, id: String, now: DateTime<Utc>) -> Result<FinancialRecord, DraftError> {
        let date = self.date()?.ok_or(DraftError::MissingField("date"))?;
        let amount = self.amount()?.ok_or(DraftError::MissingField("amount"))?;
        Ok(FinancialRecord {
            id,
            date,
            amount,
            category: non_blank(&self.category)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            description: self.description.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validates every supplied field before touching `rec`.
    fn apply(&self, rec: &mut FinancialRecord, now: DateTime<Utc>) -> Result<(), DraftError> {
        let date = self.date()?;
        let amount = self.amount()?;
        if let Some(d) = date {
            rec.date = d;
        }
        if let Some(a) = amount {
            rec.amount = a;
        }
        if let Some(c) = non_blank(&self.category) {
            rec.category = c.to_string();
        }
        if let Some(d) = &self.description {
            rec.description = d.clone();
        }
        rec.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IncomeDraft {
    #[serde(flatten)]
    pub base: RecordDraft,
    pub client: Option<String>,
    pub invoice_number: Option<String>,
}

impl IncomeDraft {
    pub fn build(&self, id: impl Into<String>, now: DateTime<Utc>) -> Result<Income, DraftError> {
        let client = required(&self.client, "client")?.to_string();
        Ok(Income {
            record: self.base.build(id.into(), now)?,
            client,
            invoice_number: optional(&self.invoice_number),
        })
    }

    /// Partial update; an invalid field leaves `income` untouched.
    pub fn apply(&self, income: &mut Income, now: DateTime<Utc>) -> Result<(), DraftError> {
        if self.client.is_some() {
            required(&self.client, "client")?;
        }
        let mut record = income.record.clone();
        self.base.apply(&mut record, now)?;
        income.record = record;
        if let Some(c) = non_blank(&self.client) {
            income.client = c.to_string();
        }
        if self.invoice_number.is_some() {
            income.invoice_number = optional(&self.invoice_number);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseDraft {
    #[serde(flatten)]
    pub base: RecordDraft,
    pub vendor: Option<String>,
    pub receipt_number: Option<String>,
    pub tax_deductible: Option<bool>,
}

impl ExpenseDraft {
    pub fn build(&self, id: impl Into<String>, now: DateTime<Utc>) -> Result<Expense, DraftError> {
        let vendor = required(&self.vendor, "vendor")?.to_string();
        Ok(Expense {
            record: self.base.build(id.into(), now)?,
            vendor,
            receipt_number: optional(&self.receipt_number),
            tax_deductible: self.tax_deductible.unwrap_or(false),
        })
    }

    /// Partial update; an invalid field leaves `expense` untouched.
    pub fn apply(&self, expense: &mut Expense, now: DateTime<Utc>) -> Result<(), DraftError> {
        if self.vendor.is_some() {
            required(&self.vendor, "vendor")?;
        }
        let mut record = expense.record.clone();
        self.base.apply(&mut record, now)?;
        expense.record = record;
        if let Some(v) = non_blank(&self.vendor) {
            expense.vendor = v.to_string();
        }
        if self.receipt_number.is_some() {
            expense.receipt_number = optional(&self.receipt_number);
        }
        if let Some(flag) = self.tax_deductible {
            expense.tax_deductible = flag;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2023-03-10T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn income_draft() -> IncomeDraft {
        IncomeDraft {
            base: RecordDraft {
                date: Some("2023-03-10".into()),
                amount: Some("1500.00".into()),
                category: Some("Druckaufträge".into()),
                description: None,
            },
            client: Some("Schmidt GmbH".into()),
            invoice_number: Some("  ".into()),
        }
    }

    #[test]
    fn build_fills_defaults() {
        let income = income_draft().build("1", now()).unwrap();
        assert_eq!(income.record.amount, Decimal::from_str("1500.00").unwrap());
        assert_eq!(income.record.description, "");
        assert_eq!(income.invoice_number, None);
        assert_eq!(income.record.created_at, income.record.updated_at);

        let mut draft = income_draft();
        draft.base.category = None;
        assert_eq!(draft.build("2", now()).unwrap().record.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn build_requires_client_and_date() {
        let mut draft = income_draft();
        draft.client = Some(" ".into());
        assert_eq!(draft.build("1", now()), Err(DraftError::MissingField("client")));

        let mut draft = income_draft();
        draft.base.date = None;
        assert_eq!(draft.build("1", now()), Err(DraftError::MissingField("date")));
    }

    #[test]
    fn build_rejects_negative_amount() {
        let mut draft = income_draft();
        draft.base.amount = Some("-5".into());
        assert!(matches!(
            draft.build("1", now()),
            Err(DraftError::NegativeAmount(_))
        ));
    }

    #[test]
    fn failed_apply_leaves_record_unchanged() {
        let mut income = income_draft().build("1", now()).unwrap();
        let before = income.clone();
        let patch = IncomeDraft {
            base: RecordDraft {
                amount: Some("100".into()),
                date: Some("not a date".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(patch.apply(&mut income, now()).is_err());
        assert_eq!(income, before);
    }
}

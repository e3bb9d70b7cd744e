//! Dealer directory record

use crate::core::Entity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: Uuid,
    pub company_name: String,
    pub is_active: bool,
    /// Available credit line (plafond)
    pub credit_limit: i64,
}

impl Dealer {
    pub fn new(company_name: impl Into<String>, credit_limit: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            is_active: true,
            credit_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DealerPatch {
    pub company_name: Option<String>,
    pub is_active: Option<bool>,
    pub credit_limit: Option<i64>,
}

impl Entity for Dealer {
    type Patch = DealerPatch;

    fn resource_name() -> &'static str {
        "dealers"
    }

    fn resource_name_singular() -> &'static str {
        "dealer"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn status(&self) -> &str {
        if self.is_active { "active" } else { "inactive" }
    }

    fn apply(&mut self, patch: DealerPatch) {
        if let Some(name) = patch.company_name {
            self.company_name = name;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        if let Some(limit) = patch.credit_limit {
            self.credit_limit = limit;
        }
    }
}

//! Plan Catalog
//!
//! The closed set of purchasable repair-session plans. Defined at build
//! time; prices are whole US dollars as sent to the checkout backend.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TechFixError};

/// Plan tiers offered on the site
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Pro,
    Premium,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Basic => "basic",
            PlanId::Pro => "pro",
            PlanId::Premium => "premium",
        }
    }

    /// Parse a plan id; unknown strings are an error, never a default
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(PlanId::Basic),
            "pro" => Ok(PlanId::Pro),
            "premium" => Ok(PlanId::Premium),
            other => Err(TechFixError::UnknownPlan(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A purchasable plan as rendered on the pricing section
#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub id: PlanId,

    /// Display name
    pub name: &'static str,

    /// Price in whole USD
    pub price: u32,

    /// One-line description
    pub description: &'static str,

    /// Ordered feature bullets
    pub features: &'static [&'static str],

    /// Highlighted as the popular choice
    pub popular: bool,
}

impl Plan {
    /// The build-time plan catalog, in display order
    pub fn catalog() -> &'static [Plan] {
        CATALOG
    }

    /// Look up a plan by id; total by construction, so the catalog can
    /// never desync from the id set
    pub fn get(id: PlanId) -> &'static Plan {
        match id {
            PlanId::Basic => &CATALOG[0],
            PlanId::Pro => &CATALOG[1],
            PlanId::Premium => &CATALOG[2],
        }
    }
}

const CATALOG: &[Plan] = &[
    Plan {
        id: PlanId::Basic,
        name: "Basic Repair",
        price: 29,
        description: "One AI repair session for a single machine",
        features: &[
            "30 minutes of automated repairs",
            "Session token delivered instantly",
            "Works on Linux and Windows",
        ],
        popular: false,
    },
    Plan {
        id: PlanId::Pro,
        name: "Pro Repair",
        price: 59,
        description: "Extended session with human escalation",
        features: &[
            "60 minutes of automated repairs",
            "15 minutes of expert human support",
            "Priority queue",
            "Works on Linux and Windows",
        ],
        popular: true,
    },
    Plan {
        id: PlanId::Premium,
        name: "Premium Repair",
        price: 99,
        description: "Full-day coverage for stubborn problems",
        features: &[
            "Unlimited sessions for 24 hours",
            "Dedicated human technician on standby",
            "Follow-up health report",
        ],
        popular: false,
    },
];

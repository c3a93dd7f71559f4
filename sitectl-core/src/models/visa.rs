use std::fmt;

use serde::{Deserialize, Serialize};

use super::de;

/// Visa page content. Standard and investor visas share this shape and live
/// in separate tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase", default)]
pub struct Visa {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub description_image: String,
    pub description_image_width: String,
    pub description_image_height: String,
    pub description_image_position: String,
    /// Free-form HTML body
    pub info: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub image: String,
    pub addon_heading: String,
    pub addon_description: String,
}

impl Visa {
    /// Page title: explicit meta title, else the visa name.
    pub fn page_title(&self) -> &str {
        if self.meta_title.trim().is_empty() {
            &self.name
        } else {
            &self.meta_title
        }
    }
}

/// Which visa table a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisaKind {
    Standard,
    Investor,
}

impl VisaKind {
    pub fn table(self) -> &'static str {
        match self {
            VisaKind::Standard => "visas",
            VisaKind::Investor => "investor_visa",
        }
    }

    /// Path segment under `/api`
    pub fn route(self) -> &'static str {
        match self {
            VisaKind::Standard => "visas",
            VisaKind::Investor => "investorVisas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VisaKind::Standard => "Visa",
            VisaKind::Investor => "Investor visa",
        }
    }
}

impl fmt::Display for VisaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

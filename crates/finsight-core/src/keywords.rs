//! Category keyword dictionary
//!
//! The dictionary is configuration data: loaded once, injected into the
//! classifier, and never mutated by input. Categories are kept as an
//! ordered list (not a map) because declaration order is the classifier's
//! tie-break.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text;

/// One keyword with its scoring weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordWeight {
    pub keyword: String,
    pub weight: f64,
}

/// Keywords belonging to one category, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: String,
    pub keywords: Vec<KeywordWeight>,
}

/// The full category -> keyword -> weight dictionary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryKeywordTable {
    pub categories: Vec<CategoryKeywords>,
}

impl CategoryKeywordTable {
    /// Load a table from a TOML document using `[[categories]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: Self = toml::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(content)?;
        table.validate()?;
        Ok(table)
    }

    /// Check structural invariants: unique non-empty category labels,
    /// keywords that survive tokenization, strictly positive weights.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.categories {
            if entry.category.trim().is_empty() {
                return Err(Error::InvalidData("empty category label".to_string()));
            }
            if !seen.insert(entry.category.as_str()) {
                return Err(Error::InvalidData(format!(
                    "duplicate category: {}",
                    entry.category
                )));
            }
            for kw in &entry.keywords {
                if text::tokenize(&kw.keyword).next().is_none() {
                    return Err(Error::InvalidData(format!(
                        "keyword '{}' in category {} has no matchable tokens",
                        kw.keyword, entry.category
                    )));
                }
                if !(kw.weight > 0.0) || !kw.weight.is_finite() {
                    return Err(Error::InvalidData(format!(
                        "keyword '{}' in category {} has non-positive weight {}",
                        kw.keyword, entry.category, kw.weight
                    )));
                }
            }
        }
        Ok(())
    }

    /// The default UK-centric dictionary shipped with the crate.
    ///
    /// Brand names carry weight 5.0 so that a single strong match clears
    /// the presentation threshold; generic terms sit at 1.5-3.0 and mostly
    /// reinforce brand matches.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(category, keywords)| CategoryKeywords {
                category: (*category).to_string(),
                keywords: keywords
                    .iter()
                    .map(|(keyword, weight)| KeywordWeight {
                        keyword: (*keyword).to_string(),
                        weight: *weight,
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }
}

type BuiltinCategory = (&'static str, &'static [(&'static str, f64)]);

const BUILTIN: &[BuiltinCategory] = &[
    (
        "Groceries",
        &[
            ("tesco", 5.0),
            ("sainsbury", 5.0),
            ("sainsburys", 5.0),
            ("asda", 5.0),
            ("aldi", 5.0),
            ("lidl", 5.0),
            ("morrisons", 5.0),
            ("waitrose", 5.0),
            ("coop", 4.0),
            ("whole foods", 4.0),
            ("grocery", 3.0),
            ("supermarket", 3.0),
            ("food", 1.5),
            ("market", 1.5),
        ],
    ),
    (
        "Transport",
        &[
            ("uber", 5.0),
            ("lyft", 5.0),
            ("trainline", 5.0),
            ("merseyrail", 5.0),
            ("tfl", 5.0),
            ("shell", 4.0),
            ("bp", 4.0),
            ("petrol", 3.0),
            ("fuel", 3.0),
            ("taxi", 3.0),
            ("train", 2.0),
            ("bus", 2.0),
            ("transit", 2.0),
            ("metro", 2.0),
            ("parking", 2.0),
            ("gas", 2.0),
        ],
    ),
    (
        "Rent",
        &[
            ("rent", 5.0),
            ("landlord", 5.0),
            ("lease", 4.0),
            ("letting", 4.0),
            ("mortgage", 4.0),
            ("property management", 4.0),
        ],
    ),
    (
        "Utilities",
        &[
            ("octopus energy", 5.0),
            ("british gas", 5.0),
            ("thames water", 5.0),
            ("virgin media", 5.0),
            ("vodafone", 5.0),
            ("bt group", 4.0),
            ("gas bill", 4.0),
            ("electricity", 3.0),
            ("electric", 3.0),
            ("broadband", 3.0),
            ("internet", 3.0),
            ("utility", 3.0),
            ("water", 2.0),
            ("phone", 2.0),
            ("wireless", 2.0),
        ],
    ),
    (
        "Entertainment",
        &[
            ("netflix", 5.0),
            ("spotify", 5.0),
            ("disney", 4.0),
            ("prime video", 4.0),
            ("cinema", 3.0),
            ("movie", 3.0),
            ("concert", 3.0),
            ("theatre", 3.0),
            ("theater", 3.0),
            ("sky", 3.0),
            ("game", 2.0),
        ],
    ),
    (
        "Dining",
        &[
            ("pret", 5.0),
            ("greggs", 5.0),
            ("nandos", 5.0),
            ("mcdonalds", 5.0),
            ("starbucks", 5.0),
            ("deliveroo", 5.0),
            ("costa", 4.0),
            ("restaurant", 3.0),
            ("cafe", 3.0),
            ("coffee", 3.0),
            ("takeaway", 3.0),
            ("pizza", 3.0),
        ],
    ),
    (
        "Healthcare",
        &[
            ("nhs", 5.0),
            ("specsavers", 5.0),
            ("boots", 4.0),
            ("prescription", 4.0),
            ("pharmacy", 3.0),
            ("dentist", 3.0),
            ("doctor", 3.0),
            ("optician", 3.0),
        ],
    ),
    (
        "Shopping",
        &[
            ("argos", 5.0),
            ("asos", 5.0),
            ("john lewis", 5.0),
            ("primark", 5.0),
            ("amazon", 4.0),
            ("ebay", 4.0),
            ("retail", 2.0),
            ("shopping", 2.0),
            ("store", 1.5),
        ],
    ),
    (
        "Bills",
        &[
            ("hmrc", 5.0),
            ("council tax", 5.0),
            ("insurance", 3.0),
            ("tax", 3.0),
            ("subscription", 2.0),
            ("fee", 1.5),
        ],
    ),
];

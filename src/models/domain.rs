use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Price tier shared by user budgets and product price categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceTier {
    Budget,
    MidRange,
    Luxury,
}

impl PriceTier {
    /// Whether a user on this budget accepts a product priced at `product_tier`
    ///
    /// The relation is intentionally asymmetric: mid-range shoppers accept
    /// budget products, budget shoppers never accept mid-range ones, and
    /// luxury shoppers only accept luxury.
    #[inline]
    pub fn accepts(self, product_tier: PriceTier) -> bool {
        matches!(
            (self, product_tier),
            (PriceTier::Budget, PriceTier::Budget)
                | (PriceTier::MidRange, PriceTier::Budget | PriceTier::MidRange)
                | (PriceTier::Luxury, PriceTier::Luxury)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriceTier::Budget => "budget",
            PriceTier::MidRange => "mid-range",
            PriceTier::Luxury => "luxury",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget" => Ok(PriceTier::Budget),
            "mid-range" => Ok(PriceTier::MidRange),
            "luxury" => Ok(PriceTier::Luxury),
            other => Err(format!(
                "'{}' is not one of: budget, mid-range, luxury",
                other
            )),
        }
    }
}

/// Allergen tokens parsed from the questionnaire's free text answer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allergens(BTreeSet<String>);

impl Allergens {
    /// Split comma separated text into trimmed, lowercased tokens.
    /// Blank tokens are dropped, so `""` never vetoes anything.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|token| token.trim().to_lowercase())
                .filter(|token| !token.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// True if any token occurs as a substring of the ingredient text
    pub fn found_in(&self, ingredients: &str) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let ingredients = ingredients.to_lowercase();
        self.0.iter().any(|allergen| ingredients.contains(allergen.as_str()))
    }
}

/// Questionnaire answers that drive scoring
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Collected for future use, not scored
    pub gender: String,
    pub age: u32,
    pub skin_type: String,
    pub skin_concerns: BTreeSet<String>,
    pub current_routine: BTreeSet<String>,
    pub allergies: Allergens,
    pub budget: PriceTier,
    pub preferred_brands: BTreeSet<String>,
}

impl UserProfile {
    /// Case-insensitive routine lookup
    pub fn uses_category(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.current_routine
            .iter()
            .any(|entry| entry.to_lowercase() == category)
    }
}

/// Catalog entry
///
/// Keys the scorer does not read (`id`, `name`, `price`, ...) are kept in
/// `extra`. A product deserialized from JSON also keeps its source text and
/// serializes back to exactly those bytes.
#[derive(Debug, Clone)]
pub struct Product {
    pub brand: String,
    pub category: String,
    pub skin_type_compatibility: String,
    pub target_concerns: Vec<String>,
    pub ingredients: String,
    pub price_category: PriceTier,
    pub average_rating: f64,
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Original JSON, `None` for products built in code
    pub source: Option<Box<RawValue>>,
}

/// Typed view of a catalog record, used for both directions of serde
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord<'a> {
    #[serde(borrow)]
    brand: Cow<'a, str>,
    #[serde(borrow)]
    category: Cow<'a, str>,
    #[serde(borrow)]
    skin_type_compatibility: Cow<'a, str>,
    target_concerns: Cow<'a, [String]>,
    #[serde(borrow)]
    ingredients: Cow<'a, str>,
    price_category: PriceTier,
    average_rating: f64,
    #[serde(flatten)]
    extra: Cow<'a, serde_json::Map<String, serde_json::Value>>,
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = Box::<RawValue>::deserialize(deserializer)?;
        let record: ProductRecord<'_> =
            serde_json::from_str(source.get()).map_err(de::Error::custom)?;

        Ok(Product {
            brand: record.brand.into_owned(),
            category: record.category.into_owned(),
            skin_type_compatibility: record.skin_type_compatibility.into_owned(),
            target_concerns: record.target_concerns.into_owned(),
            ingredients: record.ingredients.into_owned(),
            price_category: record.price_category,
            average_rating: record.average_rating,
            extra: record.extra.into_owned(),
            source: Some(source),
        })
    }
}

impl Serialize for Product {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(source) = &self.source {
            return source.serialize(serializer);
        }

        ProductRecord {
            brand: Cow::Borrowed(&self.brand),
            category: Cow::Borrowed(&self.category),
            skin_type_compatibility: Cow::Borrowed(&self.skin_type_compatibility),
            target_concerns: Cow::Borrowed(&self.target_concerns),
            ingredients: Cow::Borrowed(&self.ingredients),
            price_category: self.price_category,
            average_rating: self.average_rating,
            extra: Cow::Borrowed(&self.extra),
        }
        .serialize(serializer)
    }
}

/// Equality over the catalog fields; the source text is not compared
impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.brand == other.brand
            && self.category == other.category
            && self.skin_type_compatibility == other.skin_type_compatibility
            && self.target_concerns == other.target_concerns
            && self.ingredients == other.ingredients
            && self.price_category == other.price_category
            && self.average_rating == other.average_rating
            && self.extra == other.extra
    }
}

impl Product {
    #[inline]
    pub fn targets(&self, concern: &str) -> bool {
        self.target_concerns.iter().any(|c| c == concern)
    }

    /// Display name if the catalog provides one
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(|v| v.as_str())
    }
}

/// Age brackets used for the age bonus; each targets one concern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    /// Under 25
    Young,
    /// 25 to 39
    Adult,
    /// 40 and over
    Mature,
}

impl AgeBracket {
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=24 => AgeBracket::Young,
            25..=39 => AgeBracket::Adult,
            _ => AgeBracket::Mature,
        }
    }

    pub fn target_concern(self) -> &'static str {
        match self {
            AgeBracket::Young => "acne",
            AgeBracket::Adult => "hydration",
            AgeBracket::Mature => "anti-aging",
        }
    }
}

/// Point values of the additive scoring stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skin_type: f64,
    pub age_bracket: f64,
    pub concern: f64,
    pub routine_novelty: f64,
    pub budget: f64,
    pub brand: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skin_type: 2.0,
            age_bracket: 1.0,
            concern: 1.0,
            routine_novelty: 0.5,
            budget: 1.0,
            brand: 1.0,
        }
    }
}

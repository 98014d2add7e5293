/// Default calorie target when none (or garbage) is supplied.
pub const DEFAULT_TARGET_CALORIES: u32 = 2000;

/// Every returned plate has at least this many items.
pub const MIN_PLATE_ITEMS: usize = 4;

/// AI selections beyond this count are ignored.
pub const MAX_PLATE_ITEMS: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Goal predicates (per 100g)
// ─────────────────────────────────────────────────────────────────────────────

/// Diabetes plates only use low-GI foods (or foods with no GI recorded).
pub const DIABETES_MAX_GI: f64 = 55.0;

/// Weight-loss calorie ceiling.
pub const WEIGHT_LOSS_MAX_CALORIES: f64 = 250.0;

/// Weight-gain calorie floor.
pub const WEIGHT_GAIN_MIN_CALORIES: f64 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Sample sizes
// ─────────────────────────────────────────────────────────────────────────────

pub const STAPLE_SAMPLE: usize = 5;
pub const LEGUME_SAMPLE: usize = 8;
pub const VEGETABLE_SAMPLE: usize = 10;
pub const DISH_SAMPLE: usize = 12;

/// Flat pool size offered to the language model.
pub const AI_POOL_SAMPLE: usize = 80;

/// Eligibility-only sample used when the filtered pool is too thin.
pub const FALLBACK_SAMPLE: usize = 5;

// ─────────────────────────────────────────────────────────────────────────────
// Role calorie shares
// ─────────────────────────────────────────────────────────────────────────────

pub const STAPLE_SHARE: f64 = 0.35;
pub const PROTEIN_SHARE: f64 = 0.25;
pub const VEGETABLE_SHARE: f64 = 0.20;
pub const FOURTH_SHARE: f64 = 0.15;
pub const CONDIMENT_SHARE: f64 = 0.05;

/// Top-up items get `max(TOP_UP_MIN_CALORIES, TOP_UP_SHARE * target)`.
pub const TOP_UP_SHARE: f64 = 0.15;
pub const TOP_UP_MIN_CALORIES: f64 = 80.0;

// ─────────────────────────────────────────────────────────────────────────────
// Portions
// ─────────────────────────────────────────────────────────────────────────────

pub const MIN_PORTION_GRAMS: u32 = 10;
pub const MAX_PORTION_GRAMS: u32 = 500;

/// Used when a food has no usable calorie figure.
pub const DEFAULT_PORTION_GRAMS: u32 = 100;

/// Bounds applied to portions proposed by the language model.
pub const AI_MIN_PORTION_GRAMS: u32 = 20;
pub const AI_MAX_PORTION_GRAMS: u32 = 500;

// ─────────────────────────────────────────────────────────────────────────────
// Name patterns (lowercase substrings of the English name)
// ─────────────────────────────────────────────────────────────────────────────

pub const PROTEIN_DISH_PATTERNS: &[&str] = &["dhal", "curry", "parippu", "kadala"];

pub const MEAT_PATTERNS: &[&str] = &["fish", "chicken", "egg", "mutton", "beef", "prawn"];

pub const CONDIMENT_PATTERNS: &[&str] = &["sambol", "mallung", "lunu miris"];

/// Supported display languages besides English.
pub const LOCALIZED_LANGUAGES: &[&str] = &["si", "ta"];

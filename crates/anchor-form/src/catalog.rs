//! Fixed option sets offered by the choice fields.

pub const EVENT_TYPES: &[&str] = &[
    "Corporate Event",
    "Conference",
    "Seminar",
    "Awards Ceremony",
    "Product Launch",
    "TV Show",
    "Radio Show",
    "Live Streaming",
    "Wedding",
    "Cultural Event",
    "Sports Event",
    "Other",
];

pub const ANCHOR_STYLES: &[&str] = &[
    "Formal/Professional",
    "Casual/Friendly",
    "Energetic/Enthusiastic",
    "Calm/Soothing",
    "Humorous/Entertaining",
    "Authoritative",
    "Bilingual/Multilingual",
];

pub const LANGUAGES: &[&str] = &[
    "English", "Hindi", "Marathi", "Gujarati", "Tamil", "Telugu", "Bengali", "Other",
];

pub const DURATIONS: &[&str] = &[
    "1-2 hours",
    "2-4 hours",
    "4-6 hours",
    "Full day (6+ hours)",
    "Multiple days",
];

pub const BUDGETS: &[&str] = &[
    "Under ₹10,000",
    "₹10,000 - ₹25,000",
    "₹25,000 - ₹50,000",
    "₹50,000 - ₹1,00,000",
    "₹1,00,000+",
    "To be discussed",
];

/// Returns true when `value` is one of `options`.
pub fn contains(options: &[&str], value: &str) -> bool {
    options.iter().any(|option| *option == value)
}

pub const NON_VEGAN_TERMS: &[&str] = &[
    "yogurt", "milk", "cheese", "butter", "cream", "egg", "honey", "ghee", "whey", "casein",
    "meat", "chicken", "beef", "pork", "lamb", "bacon", "fish", "seafood", "shrimp", "anchovy",
    "gelatin", "lard", "paneer", "dairy",
];

/// Dairy, egg and honey terms that a plant-milk style qualifier can excuse.
pub const DAIRY_STYLE_TERMS: &[&str] = &[
    "yogurt", "milk", "cheese", "butter", "cream", "egg", "honey", "ghee", "whey", "casein",
    "paneer", "dairy",
];

/// Words that make any following term plant-based, e.g. "vegan chicken", "mock meat".
pub const PLANT_BASED_PREFIXES: &[&str] = &["plant", "plant-based", "vegan", "tofu", "mock"];

/// Words that only excuse dairy-style terms, e.g. "coconut milk" but not "coconut chicken".
pub const DAIRY_ALTERNATIVE_PREFIXES: &[&str] = &[
    "coconut",
    "almond",
    "oat",
    "soy",
    "cashew",
    "hemp",
    "rice",
    "pea",
    "peanut",
    "sunflower",
    "cocoa",
    "flax",
    "chia",
    "non",
    "non-dairy",
    "dairy-free",
];

/// Phrases that make the preceding term a stand-in, e.g. "egg replacer".
pub const PLANT_BASED_SUFFIXES: &[&str] = &[
    " substitute",
    " alternative",
    " replacer",
    "-free",
    " free",
    " of tartar",
];

pub const HIGH_OXALATE_TERMS: &[&str] = &[
    "spinach",
    "beets",
    "rhubarb",
    "chocolate",
    "cocoa powder",
    "dark chocolate",
    "sweet potato",
    "almonds",
    "cashews",
    "peanuts",
    "sesame seeds",
    "tahini",
];

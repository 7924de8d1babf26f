//! Fixed lookup tables behind the constraint compiler.

use crate::domain::constraint::entities::{AuthenticityProfile, CatalogEntry, FilterCategory};

const fn entry(
    key: &'static str,
    id: &'static str,
    label: &'static str,
    category: FilterCategory,
) -> CatalogEntry {
    CatalogEntry {
        key,
        id,
        label,
        category,
    }
}

use crate::domain::constraint::entities::FilterCategory::{
    Allergy, Cuisine, DietType, Health, Trending,
};

pub const FILTER_CATALOG: &[CatalogEntry] = &[
    entry("vegetarian", "vegetarian", "Vegetarian", DietType),
    entry("vegan", "vegan", "Vegan", DietType),
    entry("pescatarian", "pescatarian", "Pescatarian", DietType),
    entry("highprotein", "highProtein", "High Protein", DietType),
    entry("keto", "keto", "Keto", DietType),
    entry("paleo", "paleo", "Paleo", DietType),
    entry("lowcarb", "lowCarb", "Low Carb", DietType),
    entry("nutfree", "nutFree", "Nut Allergy", Allergy),
    entry("glutenfree", "glutenFree", "Celiac Friendly", Allergy),
    entry("dairyfree", "dairyFree", "Dairy Free", Allergy),
    entry("lowoxalate", "lowOxalate", "Low Oxalate", Allergy),
    entry("hearthealthy", "heartHealthy", "Heart Healthy", Health),
    entry("lowsodium", "lowSodium", "Low Sodium", Health),
    entry("diabetic", "diabetic", "Diabetic Friendly", Health),
    entry("mediterranean", "mediterranean", "Mediterranean", Trending),
    entry("whole30", "whole30", "Whole30", Trending),
    entry("airfryer", "airFryer", "Air Fryer", Trending),
    entry("onepot", "onePot", "One Pot", Trending),
    entry("adaptogens", "adaptogens", "Adaptogens", Trending),
    entry("italian", "italian", "Italian", Cuisine),
    entry("mexican", "mexican", "Mexican", Cuisine),
    entry("japanese", "japanese", "Japanese", Cuisine),
    entry("chinese", "chinese", "Chinese", Cuisine),
    entry("indian", "indian", "Indian", Cuisine),
    entry("french", "french", "French", Cuisine),
    entry("greek", "greek", "Greek", Cuisine),
    entry("turkish", "turkish", "Turkish", Cuisine),
    entry("spanish", "spanish", "Spanish", Cuisine),
    entry("ethiopian", "ethiopian", "Ethiopian", Cuisine),
    entry("thai", "thai", "Thai", Cuisine),
    entry("american", "american", "American", Cuisine),
    entry("korean", "korean", "Korean", Cuisine),
    entry("pakistani", "pakistani", "Pakistani", Cuisine),
    entry("peruvian", "peruvian", "Peruvian", Cuisine),
    entry("indonesian", "indonesian", "Indonesian", Cuisine),
    entry("iranian", "iranian", "Iranian", Cuisine),
    entry("venezuelan", "venezuelan", "Venezuelan", Cuisine),
    entry("german", "german", "German", Cuisine),
    entry("polish", "polish", "Polish", Cuisine),
    entry("vietnamese", "vietnamese", "Vietnamese", Cuisine),
    entry("egyptian", "egyptian", "Egyptian", Cuisine),
    entry("brazilian", "brazilian", "Brazilian", Cuisine),
    entry("filipino", "filipino", "Filipino", Cuisine),
    entry("colombian", "colombian", "Colombian", Cuisine),
    entry("malaysian", "malaysian", "Malaysian", Cuisine),
    entry("russian", "russian", "Russian", Cuisine),
    entry("british", "british", "British", Cuisine),
    entry("moroccan", "moroccan", "Moroccan", Cuisine),
    entry("burmese", "burmese", "Burmese", Cuisine),
    entry("southern", "southern", "Southern", Cuisine),
    entry("scandinavian", "scandinavian", "Scandinavian", Cuisine),
    entry("middleeastern", "middleEastern", "Middle Eastern", Cuisine),
    entry("lebanese", "lebanese", "Lebanese", Cuisine),
];

const ALIASES: &[(&str, &str)] = &[
    ("nutallergy", "nutfree"),
    ("celiacfriendly", "glutenfree"),
    ("diabeticfriendly", "diabetic"),
];

pub fn resolve_alias(key: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
}

pub fn catalog_entry(key: &str) -> Option<&'static CatalogEntry> {
    FILTER_CATALOG.iter().find(|e| e.key == key)
}

pub fn is_cuisine(key: &str) -> bool {
    catalog_entry(key).is_some_and(|e| e.category == FilterCategory::Cuisine)
}

pub const INDIVIDUALLY_COMPLEX: &[&str] = &["vegan", "highprotein", "lowoxalate"];

pub const COMPLEX_PAIRINGS: &[(&str, &str)] = &[
    ("keto", "highprotein"),
    ("lowcarb", "highprotein"),
    ("vegan", "highprotein"),
];

pub const VEGAN_FRIENDLY_CUISINES: &[&str] = &[
    "mediterranean",
    "middleeastern",
    "lebanese",
    "thai",
    "vietnamese",
    "ethiopian",
    "mexican",
    "moroccan",
    "chinese",
    "japanese",
    "korean",
];

pub const PROTEIN_RESTRICTIVE_FILTERS: &[&str] = &["vegan", "vegetarian", "pescatarian"];

pub struct ContradictionRule {
    pub filters: &'static [&'static str],
    pub message: &'static str,
}

pub const CONTRADICTION_RULES: &[ContradictionRule] = &[
    ContradictionRule {
        filters: &["vegan", "keto"],
        message: "Vegan and Keto diets can be challenging to combine. Vegan keto requires careful planning to get enough fats while avoiding animal products.",
    },
    ContradictionRule {
        filters: &["vegan", "paleo"],
        message: "Vegan and Paleo diets are fundamentally incompatible. Paleo emphasizes animal proteins while vegan excludes all animal products.",
    },
    ContradictionRule {
        filters: &["keto", "dairyfree"],
        message: "Keto and Dairy-Free can be difficult to combine. Keto relies heavily on dairy fats, so dairy-free keto requires alternative fat sources.",
    },
    ContradictionRule {
        filters: &["paleo", "vegetarian"],
        message: "Paleo and Vegetarian diets conflict. Paleo emphasizes meat and fish while vegetarian excludes these protein sources.",
    },
];

/// Fixed clause per filter. `highprotein` is assembled separately.
pub fn clause_for(key: &str) -> Option<&'static str> {
    let clause = match key {
        "vegan" => {
            "VEGAN: ABSOLUTELY NO ANIMAL PRODUCTS - This means ZERO dairy (no milk, cheese, yogurt, butter, cream, ghee), ZERO eggs, ZERO meat, ZERO fish, ZERO honey, ZERO gelatin. Use only plant-based alternatives like coconut oil, plant-based milk, cashew cream, nutritional yeast, plant-based protein sources."
        }
        "vegetarian" => "VEGETARIAN: No meat or fish, but dairy and eggs are allowed",
        "pescatarian" => {
            "PESCATARIAN: No meat or poultry. Fish and seafood are allowed, as are dairy and eggs"
        }
        "lowoxalate" => {
            "LOW OXALATE: STRICTLY AVOID spinach, beets, rhubarb, nuts (if not nut-free), chocolate, and wheat. Use ONLY low-oxalate vegetables like cauliflower, cabbage, lettuce, cucumber, zucchini, carrots, bell peppers."
        }
        "keto" => {
            "KETO: Very low carb (under 10g net carbs), high fat, moderate protein. If combined with high protein, aim for 25g+ protein while keeping carbs under 10g."
        }
        "lowcarb" => {
            "LOW CARB: Keep total carbs under 20g per serving, focus on protein and healthy fats"
        }
        "paleo" => {
            "PALEO: No grains, legumes, dairy, refined sugar or processed oils. Build on meat, fish, eggs, vegetables, fruit, nuts and seeds"
        }
        "glutenfree" => "GLUTEN-FREE: No wheat, barley, rye, or other gluten-containing grains",
        "nutfree" => "NUT-FREE: No tree nuts, peanuts, or nut-derived products",
        "dairyfree" => {
            "DAIRY-FREE: No milk, cheese, yogurt, butter, cream, ghee, whey or casein. Use plant-based alternatives"
        }
        "hearthealthy" => {
            "HEART HEALTHY: Low sodium, low saturated fat, high fiber, include omega-3 fatty acids"
        }
        "lowsodium" => {
            "LOW SODIUM: Keep sodium under 600mg per serving, season with herbs, citrus and spices instead of salt"
        }
        "diabetic" => {
            "DIABETIC FRIENDLY: Low glycemic ingredients, no added sugar, balanced carbs paired with protein and fiber"
        }
        "whole30" => {
            "WHOLE30: No added sugar, alcohol, grains, legumes, soy or dairy. Use whole, unprocessed ingredients only"
        }
        _ => return None,
    };

    Some(clause)
}

pub const HIGH_PROTEIN_BASE: &str =
    "HIGH PROTEIN: Recipe must contain at least 25g of protein per serving.";
pub const HIGH_PROTEIN_VEGAN: &str = " For vegan recipes, strictly use plant-based protein sources such as lentils, chickpeas, black beans, tofu, tempeh, seitan, hemp seeds, chia seeds, spirulina, or plant-based protein powder. Absolutely NO animal proteins.";
pub const HIGH_PROTEIN_KETO: &str = " For keto recipes, ensure the protein sources are high in protein but low in net carbs, such as chicken, fish, eggs, greek yogurt, cheese, or unsweetened protein powder. Maintain keto macros while hitting the protein goal.";
pub const HIGH_PROTEIN_GENERAL: &str = " Use lean, high-quality protein sources (e.g., poultry, fish, legumes, tofu, or lean beef) and clearly state protein content.";

/// Banned-ingredient vocabulary contributed by each filter.
pub fn forbidden_terms_for(key: &str) -> &'static [&'static str] {
    match key {
        "vegan" => &[
            "milk", "cheese", "yogurt", "butter", "cream", "ghee", "eggs", "meat", "fish",
            "seafood", "honey", "gelatin", "whey", "casein",
        ],
        "vegetarian" => &["meat", "poultry", "fish", "seafood", "gelatin"],
        "pescatarian" => &["meat", "poultry"],
        "dairyfree" => &[
            "milk", "cheese", "yogurt", "butter", "cream", "ghee", "whey", "casein",
        ],
        "glutenfree" => &["wheat", "barley", "rye"],
        "nutfree" => &["nuts", "peanuts", "almond", "walnut", "cashew", "pecan"],
        "lowoxalate" => &[
            "spinach",
            "beets",
            "rhubarb",
            "chocolate",
            "wheat flour",
            "cocoa powder",
            "dark chocolate",
        ],
        _ => &[],
    }
}

pub const AUTHENTICITY_PROFILES: &[AuthenticityProfile] = &[AuthenticityProfile::VeganIndian];

pub const VEGAN_INDIAN_USER_ADDENDUM: &str = "IMPORTANT: This MUST be an authentic traditional Indian dish with proper Indian cooking techniques (tadka/tempering, masala base). Use authentic Indian names (e.g., \"Chana Masala\" NOT \"chickpea curry\"). Include traditional spices and regional cooking methods. Avoid Western fusion or \"Indian-inspired\" dishes.";

pub const VEGAN_INDIAN_RETRY_REQUIREMENT: &str = "AUTHENTICITY REQUIREMENT: This MUST be an authentic traditional Indian dish with proper Indian cooking techniques (tadka/tempering, bhuna, masala base building). Use authentic Indian dish names like \"Chana Masala\", \"Dal Tadka\", \"Baingan Bharta\", \"Aloo Gobi\" - NOT generic names like \"chickpea curry\" or \"lentil soup\". Include traditional Indian spices, regional cooking methods, and avoid Western fusion concepts.";

pub const VEGAN_INDIAN_GUIDANCE: &str = r#"CRITICAL: This MUST be an AUTHENTIC traditional Indian dish, not a Western dish with Indian spices.

REQUIRED INDIAN AUTHENTICITY:
- Traditional techniques: tadka/tempering (heat oil, add whole spices until they crackle), bhuna (sauteing spices in oil), dum (slow cooking), roasting whole spices
- Traditional spice blends: garam masala, curry powder, panch phoron (Bengali), sambar powder (South Indian)
- Regional styles: North Indian (tomato-onion-cashew base), South Indian (coconut-tamarind base), East Indian (mustard oil and seeds)
- Garnishes: fresh coriander leaves, curry leaves, ginger julienne, lemon wedges
- Accompaniments: basmati rice, roti, naan, paratha or dosa
- Names: use Hindi or regional names (Chana Masala NOT "chickpea curry", Dal Tadka NOT "lentil soup")

ESSENTIAL INGREDIENTS FOR VEGAN INDIAN:
- Legumes: masoor dal, moong dal, toor dal, chana dal, chickpeas, rajma
- Vegetables: bhindi (okra), baingan (eggplant), karela (bitter gourd), lauki (bottle gourd), green chilies
- Bases: coconut milk for South Indian, cashew paste for North Indian, tomato-onion masala
- Tempering: mustard seeds (rai), cumin seeds (jeera), curry leaves, dried red chilies, asafoetida (hing)
- Spices: turmeric (haldi), coriander powder (dhaniya), cumin powder, garam masala, kasuri methi, amchur
- Oils: mustard oil (East/North), coconut oil (South), sesame oil

VEGAN SUBSTITUTIONS:
- NO ghee: use coconut oil or mustard oil
- NO paneer: use pressed firm tofu marinated in turmeric and salt, or cashew cream for gravies
- NO cream/malai: use coconut cream (South) or cashew cream (North)
- NO yogurt/dahi: use coconut yogurt or a cashew-based raita with lemon juice
- NO butter/makkhan: use vegan butter or coconut oil

DISHES TO CONSIDER:
- Dal Tadka, Dal Fry, Sambar, Chana Masala, Chole
- Baingan Bharta, Bhindi Masala, Aloo Gobi, Aloo Matar
- Vegetable Biryani, Pulao, Tehri
- South Indian: Avial, Kootu, Poriyal, Rasam
- East Indian: Aloo Posto, Cholar Dal
- Gujarati: Undhiyu, Handvo

AVOID (not authentically Indian):
- "Indian-spiced" Western dishes such as quinoa bowls, wraps or grain bowls with curry powder
- Fusion concepts such as "Indian tacos", "curry pasta" or "naan pizza"
- Generic "curry" without regional specificity
- Western vegetables with only garam masala added
- Missing traditional techniques (no tadka/tempering)

COOKING TECHNIQUE REQUIREMENTS:
- Start with tadka: heat oil, add whole spices and let them crackle
- Build the masala base: golden onions, ginger-garlic paste, tomatoes and ground spices
- Use traditional methods: slow simmering for dal, bhuna for masala, dum for biryani
- Finish with fresh coriander, curry leaves or ginger julienne
- State the consistency: thick or thin gravy, dry or semi-dry"#;

pub const INDIAN_SPICES: &[&str] = &[
    "turmeric",
    "haldi",
    "cumin",
    "jeera",
    "coriander",
    "dhaniya",
    "garam masala",
    "curry leaves",
    "mustard seeds",
    "rai",
    "asafoetida",
    "hing",
    "cardamom",
    "cinnamon",
    "cloves",
    "fenugreek",
    "kasuri methi",
    "curry powder",
    "sambar powder",
];

pub const INDIAN_TECHNIQUES: &[&str] = &["tadka", "tempering", "temper", "masala", "bhuna", "dum"];

pub const FUSION_TITLE_WORDS: &[&str] = &[
    "bowl", "wrap", "buddha", "quinoa", "pasta", "taco", "pizza", "fusion",
];

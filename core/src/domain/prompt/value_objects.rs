use rand::Rng;

/// Protein category used to steer unrestricted requests toward variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProteinFocus {
    Poultry,
    Fish,
    Seafood,
    RedMeat,
    VegetarianProteins,
}

impl ProteinFocus {
    pub const ALL: [ProteinFocus; 5] = [
        ProteinFocus::Poultry,
        ProteinFocus::Fish,
        ProteinFocus::Seafood,
        ProteinFocus::RedMeat,
        ProteinFocus::VegetarianProteins,
    ];

    /// Picks one category with equal probability.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProteinFocus::Poultry => "poultry (such as chicken, turkey, or duck)",
            ProteinFocus::Fish => "fish (such as salmon, cod, tuna, or halibut)",
            ProteinFocus::Seafood => "seafood (such as shrimp, scallops, crab, or mussels)",
            ProteinFocus::RedMeat => "red meat (such as beef, lamb, or pork)",
            ProteinFocus::VegetarianProteins => {
                "vegetarian proteins (such as eggs, cheese, tofu, beans, or lentils)"
            }
        }
    }
}

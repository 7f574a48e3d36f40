use serde::{Deserialize, Serialize};

/// Elemental type of a unit or a move.
///
/// The discriminants index [`TYPE_CHART`]; the order matches the canonical type listing
/// (Normal first, Fairy last).
///
/// # Example
///
/// ```
/// use duelist_engine::Type;
///
/// assert_eq!(Type::Water.multiplier(Type::Fire), 2.0);
/// assert_eq!(Type::Fire.multiplier_against(&[Type::Water, Type::Rock]), 0.25);
/// assert_eq!("ground".parse::<Type>().unwrap(), Type::Ground);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl Type {
    pub const LEN: usize = 18;

    pub const ALL: [Type; Self::LEN] = [
        Type::Normal,
        Type::Fighting,
        Type::Flying,
        Type::Poison,
        Type::Ground,
        Type::Rock,
        Type::Bug,
        Type::Ghost,
        Type::Steel,
        Type::Fire,
        Type::Water,
        Type::Grass,
        Type::Electric,
        Type::Psychic,
        Type::Ice,
        Type::Dragon,
        Type::Dark,
        Type::Fairy,
    ];

    /// Damage multiplier of an attack of this type against a single defending type.
    #[must_use]
    pub fn multiplier(self, defender: Type) -> f32 {
        TYPE_CHART[self as usize][defender as usize].multiplier()
    }

    /// Damage multiplier of an attack of this type against a full type combination.
    ///
    /// Multipliers of the individual defending types are multiplied together. A type listed
    /// twice counts once, and an empty combination is neutral (1.0).
    #[must_use]
    pub fn multiplier_against(self, defender: &[Type]) -> f32 {
        let mut result = 1.0;
        for (i, ty) in defender.iter().enumerate() {
            if !defender[..i].contains(ty) {
                result *= self.multiplier(*ty);
            }
        }
        result
    }

    /// Returns `true` if this attacking type hits the combination for more than neutral damage.
    #[must_use]
    pub fn is_super_effective_against(self, defender: &[Type]) -> bool {
        self.multiplier_against(defender) > 1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effectiveness {
    Immune,
    Resisted,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Effectiveness::Immune => 0.0,
            Effectiveness::Resisted => 0.5,
            Effectiveness::Neutral => 1.0,
            Effectiveness::SuperEffective => 2.0,
        }
    }
}

const O: Effectiveness = Effectiveness::Immune;
const H: Effectiveness = Effectiveness::Resisted;
const N: Effectiveness = Effectiveness::Neutral;
const S: Effectiveness = Effectiveness::SuperEffective;

/// Attacking type (row) against defending type (column).
///
/// Columns: Nor Fig Fly Poi Gro Roc Bug Gho Ste Fir Wat Gra Ele Psy Ice Dra Dar Fai
#[rustfmt::skip]
pub const TYPE_CHART: [[Effectiveness; Type::LEN]; Type::LEN] = [
    /* Normal   */ [N, N, N, N, N, H, N, O, H, N, N, N, N, N, N, N, N, N],
    /* Fighting */ [S, N, H, H, N, S, H, O, S, N, N, N, N, H, S, N, S, H],
    /* Flying   */ [N, S, N, N, N, H, S, N, H, N, N, S, H, N, N, N, N, N],
    /* Poison   */ [N, N, N, H, H, H, N, H, O, N, N, S, N, N, N, N, N, S],
    /* Ground   */ [N, N, O, S, N, S, H, N, S, S, N, H, S, N, N, N, N, N],
    /* Rock     */ [N, H, S, N, H, N, S, N, H, S, N, N, N, N, S, N, N, N],
    /* Bug      */ [N, H, H, H, N, N, N, H, H, H, N, S, N, S, N, N, S, H],
    /* Ghost    */ [O, N, N, N, N, N, N, S, N, N, N, N, N, S, N, N, H, N],
    /* Steel    */ [N, N, N, N, N, S, N, N, H, H, H, N, H, N, S, N, N, S],
    /* Fire     */ [N, N, N, N, N, H, S, N, S, H, H, S, N, N, S, H, N, N],
    /* Water    */ [N, N, N, N, S, S, N, N, N, S, H, H, N, N, N, H, N, N],
    /* Grass    */ [N, N, H, H, S, S, H, N, H, H, S, H, N, N, N, H, N, N],
    /* Electric */ [N, N, S, N, O, N, N, N, N, N, S, H, H, N, N, H, N, N],
    /* Psychic  */ [N, S, N, S, N, N, N, N, H, N, N, N, N, H, N, N, O, N],
    /* Ice      */ [N, N, S, N, S, N, N, N, H, H, H, S, N, N, H, S, N, N],
    /* Dragon   */ [N, N, N, N, N, N, N, N, H, N, N, N, N, N, N, S, N, O],
    /* Dark     */ [N, H, N, N, N, N, N, S, N, N, N, N, N, S, N, N, H, H],
    /* Fairy    */ [N, S, N, H, N, N, N, N, H, H, N, N, N, N, N, S, S, N],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_discriminant_order() {
        for (i, ty) in Type::ALL.iter().enumerate() {
            assert_eq!(*ty as usize, i);
        }
    }

    #[test]
    fn test_single_type_matchups() {
        assert_eq!(Type::Water.multiplier(Type::Fire), 2.0);
        assert_eq!(Type::Fire.multiplier(Type::Water), 0.5);
        assert_eq!(Type::Normal.multiplier(Type::Ghost), 0.0);
        assert_eq!(Type::Ground.multiplier(Type::Flying), 0.0);
        assert_eq!(Type::Dragon.multiplier(Type::Fairy), 0.0);
        assert_eq!(Type::Fairy.multiplier(Type::Dragon), 2.0);
        assert_eq!(Type::Electric.multiplier(Type::Normal), 1.0);
    }

    #[test]
    fn test_dual_type_multipliers_multiply() {
        assert_eq!(Type::Ice.multiplier_against(&[Type::Dragon, Type::Ground]), 4.0);
        assert_eq!(Type::Fire.multiplier_against(&[Type::Water, Type::Rock]), 0.25);
        assert_eq!(Type::Electric.multiplier_against(&[Type::Water, Type::Ground]), 0.0);
        assert_eq!(Type::Rock.multiplier_against(&[Type::Fire, Type::Flying]), 4.0);
    }

    #[test]
    fn test_duplicate_and_empty_defenders() {
        assert_eq!(Type::Water.multiplier_against(&[Type::Fire, Type::Fire]), 2.0);
        assert_eq!(Type::Water.multiplier_against(&[]), 1.0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Psychic".parse::<Type>().unwrap(), Type::Psychic);
        assert_eq!("psychic".parse::<Type>().unwrap(), Type::Psychic);
        assert!("plasma".parse::<Type>().is_err());
        assert_eq!(Type::Steel.to_string(), "Steel");
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&[Type::Fire, Type::Dark]).unwrap();
        assert_eq!(json, r#"["fire","dark"]"#);
        let parsed: Vec<Type> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![Type::Fire, Type::Dark]);
    }
}

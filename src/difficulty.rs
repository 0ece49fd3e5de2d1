use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownDifficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Menu order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                difficulty: self,
                min_operand: 1,
                max_operand: 10,
                operators: &Operator::ALL,
                time_limit_secs: 5,
                compound: false,
            },
            Difficulty::Normal => DifficultyProfile {
                difficulty: self,
                min_operand: 10,
                max_operand: 99,
                operators: &Operator::ALL,
                time_limit_secs: 15,
                compound: false,
            },
            Difficulty::Hard => DifficultyProfile {
                difficulty: self,
                min_operand: 10,
                max_operand: 100,
                operators: &Operator::ALL,
                time_limit_secs: 30,
                compound: true,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

/// Operand range, operators and time limit of one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    pub min_operand: i32,
    pub max_operand: i32,
    /// Never empty.
    pub operators: &'static [Operator],
    pub time_limit_secs: u32,
    /// Questions combine two binary operations over three operands.
    pub compound: bool,
}

pub fn profile_for(name: &str) -> Result<DifficultyProfile, UnknownDifficulty> {
    name.parse::<Difficulty>().map(Difficulty::profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_tiers() {
        let easy = profile_for("Easy").unwrap();
        assert_eq!((easy.min_operand, easy.max_operand), (1, 10));
        assert_eq!(easy.time_limit_secs, 5);
        assert!(!easy.compound);

        let normal = profile_for("Normal").unwrap();
        assert_eq!((normal.min_operand, normal.max_operand), (10, 99));
        assert_eq!(normal.time_limit_secs, 15);

        let hard = profile_for("Hard").unwrap();
        assert_eq!((hard.min_operand, hard.max_operand), (10, 100));
        assert_eq!(hard.time_limit_secs, 30);
        assert!(hard.compound);
        assert_eq!(hard.operators.len(), 4);
    }

    #[test]
    fn every_preset_has_operators() {
        for difficulty in Difficulty::ALL {
            assert!(!difficulty.profile().operators.is_empty(), "{}", difficulty);
        }
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(profile_for(" hard ").unwrap().difficulty, Difficulty::Hard);
        assert_eq!("NORMAL".parse::<Difficulty>(), Ok(Difficulty::Normal));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            profile_for("Insane"),
            Err(UnknownDifficulty("Insane".to_string()))
        );
        assert!(profile_for("").is_err());
    }

    #[test]
    fn operators_apply_as_floats() {
        assert_eq!(Operator::Div.apply(7.0, 2.0), 3.5);
        assert_eq!(Operator::Sub.apply(3.0, 10.0), -7.0);
        assert_eq!(Operator::Mul.to_string(), "*");
    }
}

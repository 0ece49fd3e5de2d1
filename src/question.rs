use rand::Rng;

use crate::difficulty::{DifficultyProfile, Operator};
use crate::error::ParseError;
use crate::eval::evaluate;

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub text: String,
    pub expected_answer: f64,
}

impl Question {
    /// Line shown on the game screen, e.g. `Question 3/20: 4 + 7 = ?`.
    pub fn prompt(&self, index: u32, total: u32) -> String {
        format!("Question {}/{}: {} = ?", index, total, self.text)
    }

    /// Re-parses `text` and reports whether it agrees with `expected_answer`.
    pub fn cross_check(&self) -> Result<bool, ParseError> {
        let parsed = evaluate(&self.text)?;
        Ok(parsed == self.expected_answer
            || (parsed.is_nan() && self.expected_answer.is_nan()))
    }
}

pub fn generate<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> Question {
    let a = draw_operand(profile, rng);
    let b = draw_operand(profile, rng);
    let op = draw_operator(profile, rng);
    let pair = op.apply(a as f64, b as f64);

    if !profile.compound {
        return Question {
            text: format!("{} {} {}", a, op, b),
            expected_answer: pair,
        };
    }

    let c = draw_operand(profile, rng);
    let op2 = draw_operator(profile, rng);
    Question {
        text: format!("({} {} {}) {} {}", a, op, b, op2, c),
        expected_answer: op2.apply(pair, c as f64),
    }
}

fn draw_operand<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> i32 {
    rng.gen_range(profile.min_operand..=profile.max_operand)
}

// Presets always carry at least one operator.
fn draw_operator<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> Operator {
    profile.operators[rng.gen_range(0..profile.operators.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn operands(text: &str) -> Vec<i32> {
        text.split(|c: char| !c.is_ascii_digit())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse().unwrap())
            .collect()
    }

    #[test]
    fn easy_questions_are_two_operands_in_range() {
        let profile = Difficulty::Easy.profile();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let q = generate(&profile, &mut rng);
            let nums = operands(&q.text);
            assert_eq!(nums.len(), 2, "{}", q.text);
            assert!(nums.iter().all(|n| (1..=10).contains(n)), "{}", q.text);
            assert!(!q.text.contains('('));
        }
    }

    #[test]
    fn hard_questions_wrap_first_pair() {
        let profile = Difficulty::Hard.profile();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let q = generate(&profile, &mut rng);
            assert!(q.text.starts_with('('), "{}", q.text);
            let nums = operands(&q.text);
            assert_eq!(nums.len(), 3, "{}", q.text);
            assert!(nums.iter().all(|n| (10..=100).contains(n)), "{}", q.text);
        }
    }

    #[test]
    fn generated_text_agrees_with_evaluator() {
        let mut rng = StdRng::seed_from_u64(3);
        for difficulty in Difficulty::ALL {
            let profile = difficulty.profile();
            for _ in 0..500 {
                let q = generate(&profile, &mut rng);
                assert_eq!(q.cross_check(), Ok(true), "{}", q.text);
            }
        }
    }

    #[test]
    fn compound_value_applies_second_operator_last() {
        let q = Question {
            text: "(10 - 4) * 3".to_string(),
            expected_answer: 18.0,
        };
        assert_eq!(q.cross_check(), Ok(true));
        assert_eq!(q.prompt(2, 20), "Question 2/20: (10 - 4) * 3 = ?");
    }

    #[test]
    fn every_operator_is_drawn() {
        let profile = Difficulty::Normal.profile();
        let mut rng = StdRng::seed_from_u64(19);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let op = draw_operator(&profile, &mut rng);
            if !seen.contains(&op) {
                seen.push(op);
            }
        }
        assert_eq!(seen.len(), Operator::ALL.len());
    }

    #[test]
    fn cross_check_flags_disagreement() {
        let q = Question {
            text: "2 + 2".to_string(),
            expected_answer: 5.0,
        };
        assert_eq!(q.cross_check(), Ok(false));
    }
}

//! Property-based tests for the evaluator, the question generator and the
//! session scoring bounds.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use brain_train::scheduler::SystemClock;
use brain_train::session::TOTAL_QUESTIONS;
use brain_train::{evaluate, generate, Difficulty, Phase, QuizSession};

fn difficulty_strategy() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    // Generated text always re-evaluates to the stored answer.
    #[test]
    fn generated_questions_agree_with_evaluator(seed in any::<u64>(), difficulty in difficulty_strategy()) {
        let profile = difficulty.profile();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..20 {
            let question = generate(&profile, &mut rng);
            let parsed = evaluate(&question.text);
            prop_assert_eq!(parsed, Ok(question.expected_answer), "text={}", question.text);
        }
    }

    // The evaluator returns an error instead of panicking on arbitrary input.
    #[test]
    fn evaluate_never_panics(input in "[0-9+\\-*/(). x]{0,24}") {
        let _ = evaluate(&input);
    }

    // Integer sums and products agree with integer arithmetic.
    #[test]
    fn integer_arithmetic_matches(a in 0..10_000i64, b in 0..10_000i64, c in 1..100i64) {
        let text = format!("{} + {} * {}", a, b, c);
        prop_assert_eq!(evaluate(&text), Ok((a + b * c) as f64));
        let text = format!("-({} - {}) * {}", a, b, c);
        prop_assert_eq!(evaluate(&text), Ok((-(a - b) * c) as f64));
    }

    // Any mix of right and wrong answers ends with a score in [0, 20].
    #[test]
    fn score_stays_in_bounds(seed in any::<u64>(), answers in prop::collection::vec(any::<bool>(), TOTAL_QUESTIONS as usize)) {
        let mut session = QuizSession::with_parts(StdRng::seed_from_u64(seed), SystemClock);
        session.start_session("Normal").unwrap();
        for _ in 0..5 {
            session.on_tick();
        }
        prop_assert_eq!(session.phase(), Phase::InQuestion);

        let mut expected_score = 0;
        for (i, right) in answers.iter().enumerate() {
            let state = session.state().unwrap();
            prop_assert_eq!(state.question_index, i as u32 + 1);
            let expected = state.current_question.as_ref().unwrap().expected_answer;
            let answer = if *right { expected } else { expected + 0.5 };
            let outcome = session.submit_answer(Some(&answer.to_string())).unwrap();
            if *right {
                expected_score += 1;
            }
            prop_assert_eq!(outcome.was_correct, *right);
            prop_assert_eq!(outcome.score_so_far, expected_score);
        }

        prop_assert_eq!(
            session.phase(),
            Phase::Finished { final_score: expected_score, total: TOTAL_QUESTIONS }
        );
    }
}

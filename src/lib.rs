pub mod difficulty;
pub mod error;
pub mod eval;
pub mod question;
pub mod scheduler;
pub mod session;

pub use difficulty::{profile_for, Difficulty, DifficultyProfile, Operator};
pub use error::{ParseError, SessionError, UnknownDifficulty};
pub use eval::evaluate;
pub use question::{generate, Question};
pub use session::{Phase, QuizSession, SessionEvent, SessionState, SubmitOutcome};

//! Quiz session state machine.
//!
//! `Idle -> Countdown -> InQuestion -> InQuestion | Finished`. Timer firings
//! are queued in an inbox and only applied by [`QuizSession::pump`], so the
//! session state has a single writer.

use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::difficulty::{profile_for, DifficultyProfile};
use crate::error::SessionError;
use crate::question::{generate, Question};
use crate::scheduler::{Clock, SystemClock, TickTimer, TimerId};

pub const TOTAL_QUESTIONS: u32 = 20;
pub const COUNTDOWN_TICKS: u32 = 5;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Countdown { remaining: u32 },
    InQuestion,
    Finished { final_score: u32, total: u32 },
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub profile: DifficultyProfile,
    /// 1-based; `total_questions + 1` once the last answer is in.
    pub question_index: u32,
    pub total_questions: u32,
    pub score: u32,
    pub current_question: Option<Question>,
    pub remaining_seconds: u32,
}

/// Notifications for the presentation layer, drained with
/// [`QuizSession::drain_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CountdownTick {
        remaining: u32,
    },
    QuestionReady {
        text: String,
        index: u32,
        total: u32,
        time_limit: u32,
    },
    TimeTick {
        remaining: u32,
    },
    AnswerChecked {
        was_correct: bool,
        expected: f64,
        score: u32,
    },
    SessionFinished {
        final_score: u32,
        total: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub was_correct: bool,
    pub score_so_far: u32,
    pub session_done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    TimerFired(TimerId),
}

pub struct QuizSession<R = StdRng, C = SystemClock> {
    rng: R,
    clock: C,
    timer: TickTimer,
    phase: Phase,
    state: Option<SessionState>,
    inbox: VecDeque<SessionInput>,
    events: Vec<SessionEvent>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_parts(StdRng::from_entropy(), SystemClock)
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, C: Clock> QuizSession<R, C> {
    pub fn with_parts(rng: R, clock: C) -> Self {
        Self {
            rng,
            clock,
            timer: TickTimer::default(),
            phase: Phase::Idle,
            state: None,
            inbox: VecDeque::new(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.as_ref()?.current_question.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.timer.time_until_next(self.clock.now())
    }

    pub fn start_session(&mut self, difficulty: &str) -> Result<(), SessionError> {
        let profile = profile_for(difficulty)?;
        self.reset();

        info!("Starting {} session", profile.difficulty);
        self.state = Some(SessionState {
            profile,
            question_index: 1,
            total_questions: TOTAL_QUESTIONS,
            score: 0,
            current_question: None,
            remaining_seconds: 0,
        });
        self.phase = Phase::Countdown {
            remaining: COUNTDOWN_TICKS,
        };
        self.events.push(SessionEvent::CountdownTick {
            remaining: COUNTDOWN_TICKS,
        });
        self.timer.start(self.clock.now(), TICK);
        Ok(())
    }

    /// Abandons any session and goes back to `Idle`.
    pub fn return_to_menu(&mut self) {
        self.reset();
        self.phase = Phase::Idle;
    }

    fn reset(&mut self) {
        if let Some(id) = self.timer.cancel() {
            trace!("Cancelled timer {:?}", id);
        }
        self.inbox.clear();
        self.state = None;
    }

    /// Queues the timer firings due by now and applies every queued input.
    pub fn pump(&mut self) {
        let now = self.clock.now();
        self.inbox
            .extend(self.timer.due(now).into_iter().map(SessionInput::TimerFired));
        while let Some(input) = self.inbox.pop_front() {
            self.handle(input);
        }
    }

    fn handle(&mut self, input: SessionInput) {
        match input {
            SessionInput::TimerFired(id) if self.timer.is_current(id) => self.on_tick(),
            SessionInput::TimerFired(id) => trace!("Dropping stale tick from {:?}", id),
        }
    }

    pub fn on_tick(&mut self) {
        match self.phase {
            Phase::Countdown { remaining } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.phase = Phase::InQuestion;
                    self.begin_question();
                } else {
                    self.phase = Phase::Countdown { remaining };
                    self.events.push(SessionEvent::CountdownTick { remaining });
                }
            }
            Phase::InQuestion => {
                let Some(state) = self.state.as_mut() else {
                    return;
                };
                state.remaining_seconds = state.remaining_seconds.saturating_sub(1);
                let remaining = state.remaining_seconds;
                self.events.push(SessionEvent::TimeTick { remaining });

                if remaining == 0 {
                    debug!("Question {} timed out", state.question_index);
                    if let Err(e) = self.submit_answer(None) {
                        warn!("Timeout submission rejected: {}", e);
                    }
                }
            }
            Phase::Idle | Phase::Finished { .. } => trace!("Tick ignored in {:?}", self.phase),
        }
    }

    fn begin_question(&mut self) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let question = generate(&state.profile, &mut self.rng);
        match question.cross_check() {
            Ok(true) => {}
            Ok(false) => warn!(
                "Evaluator disagrees with generated answer {} for {:?}",
                question.expected_answer, question.text
            ),
            Err(e) => warn!("Generated question {:?} does not parse: {}", question.text, e),
        }

        debug!(
            "Question {}/{}: {}",
            state.question_index, state.total_questions, question.text
        );
        state.remaining_seconds = state.profile.time_limit_secs;
        self.events.push(SessionEvent::QuestionReady {
            text: question.text.clone(),
            index: state.question_index,
            total: state.total_questions,
            time_limit: state.profile.time_limit_secs,
        });
        state.current_question = Some(question);
        self.timer.start(self.clock.now(), TICK);
    }

    /// Scores the current question. `None` stands for "no answer" and always
    /// counts as wrong. Unparseable input is rejected without consuming the
    /// question or touching its timer.
    pub fn submit_answer(&mut self, raw: Option<&str>) -> Result<SubmitOutcome, SessionError> {
        if self.phase != Phase::InQuestion {
            return Err(SessionError::NoActiveQuestion);
        }
        let answer = raw.map(parse_answer).transpose()?;

        let state = self.state.as_mut().ok_or(SessionError::NoActiveQuestion)?;
        let question = state
            .current_question
            .take()
            .ok_or(SessionError::NoActiveQuestion)?;
        self.timer.cancel();

        let was_correct = answer == Some(question.expected_answer);
        if was_correct {
            state.score += 1;
        }
        debug!(
            "Answer {:?} to {:?} (expected {}): {}",
            answer,
            question.text,
            question.expected_answer,
            if was_correct { "correct" } else { "wrong" }
        );
        self.events.push(SessionEvent::AnswerChecked {
            was_correct,
            expected: question.expected_answer,
            score: state.score,
        });

        state.question_index += 1;
        let score_so_far = state.score;
        let session_done = state.question_index > state.total_questions;
        if session_done {
            self.finish();
        } else {
            self.begin_question();
        }

        Ok(SubmitOutcome {
            was_correct,
            score_so_far,
            session_done,
        })
    }

    fn finish(&mut self) {
        self.timer.cancel();
        let Some(state) = self.state.take() else {
            return;
        };
        info!(
            "Session finished: {}/{} on {}",
            state.score, state.total_questions, state.profile.difficulty
        );
        self.phase = Phase::Finished {
            final_score: state.score,
            total: state.total_questions,
        };
        self.events.push(SessionEvent::SessionFinished {
            final_score: state.score,
            total: state.total_questions,
        });
    }
}

fn parse_answer(input: &str) -> Result<f64, SessionError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SessionError::InvalidAnswerFormat {
            input: input.to_string(),
        })
}

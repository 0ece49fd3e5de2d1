use brain_train::{Difficulty, Phase, QuizSession, SessionError, SessionEvent};
use eframe::egui;
use log::{debug, info, warn};
use std::time::Duration;

use crate::config::UserConfig;
use crate::ui::{QuestionView, QuizAction, QuizUI};

const FLASH_REPAINT: Duration = Duration::from_millis(50);

#[derive(Debug)]
enum AppState {
    MainMenu,
    DifficultySelection,
    Playing,
}

pub struct BrainTrainApp {
    config: UserConfig,
    ui: QuizUI,
    session: QuizSession,
    state: AppState,
}

impl BrainTrainApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: UserConfig) -> Self {
        Self {
            config,
            ui: QuizUI::default(),
            session: QuizSession::new(),
            state: AppState::MainMenu,
        }
    }

    /// Returns whether anything was drained.
    fn drain_session_events(&mut self) -> bool {
        let events = self.session.drain_events();
        let any = !events.is_empty();
        for event in events {
            self.apply_event(event);
        }
        any
    }

    fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::CountdownTick { remaining } => debug!("Countdown: {}", remaining),
            SessionEvent::QuestionReady {
                index,
                total,
                time_limit,
                ..
            } => {
                debug!("Question {}/{} ready ({}s)", index, total, time_limit);
                self.ui.current_answer.clear();
                self.ui.error_message = None;
            }
            SessionEvent::TimeTick { .. } => {}
            SessionEvent::AnswerChecked {
                was_correct,
                expected,
                score,
            } => {
                debug!(
                    "{} answer (expected {}), score {}",
                    if was_correct { "Correct" } else { "Incorrect" },
                    expected,
                    score
                );
                debug!(
                    "Sound cue: {}",
                    if was_correct { "correct" } else { "incorrect" }
                );
                self.ui.start_flash(was_correct);
            }
            SessionEvent::SessionFinished { final_score, total } => {
                info!("Quiz ended. Score {}/{}", final_score, total);
                debug!("Sound cue: game finish");
            }
        }
    }

    fn start_game(&mut self, difficulty: Difficulty) {
        debug!("Sound cue: difficulty selected ({})", difficulty);
        self.config.remember_difficulty(difficulty);
        match self.session.start_session(difficulty.name()) {
            Ok(()) => {
                debug!("Sound cue: game start");
                self.ui.error_message = None;
                self.state = AppState::Playing;
            }
            Err(e) => {
                warn!("Could not start session: {}", e);
                self.ui.error_message = Some(e.to_string());
            }
        }
    }

    fn submit(&mut self, answer: String) {
        match self.session.submit_answer(Some(&answer)) {
            Ok(outcome) => debug!("Submitted {:?}: {:?}", answer, outcome),
            Err(SessionError::InvalidAnswerFormat { .. }) => {
                self.ui.error_message = Some("Invalid input".to_string());
            }
            Err(e) => warn!("Submission ignored: {}", e),
        }
    }

    fn question_view(&self) -> Option<QuestionView> {
        let state = self.session.state()?;
        let question = state.current_question.as_ref()?;
        Some(QuestionView {
            prompt: question.prompt(state.question_index, state.total_questions),
            score: state.score,
            remaining: state.remaining_seconds,
        })
    }

    fn show(&mut self, ui: &mut egui::Ui) -> QuizAction {
        match self.state {
            AppState::MainMenu => self.ui.show_main_menu(ui),
            AppState::DifficultySelection => {
                let last = self.config.last_difficulty;
                self.ui.show_difficulty_selection(ui, last)
            }
            AppState::Playing => match self.session.phase() {
                Phase::Countdown { remaining } => {
                    self.ui.show_countdown(ui, remaining);
                    QuizAction::None
                }
                Phase::InQuestion => match self.question_view() {
                    Some(view) => self.ui.show_question(ui, &view),
                    None => QuizAction::None,
                },
                Phase::Finished { final_score, total } => {
                    self.ui.show_finished(ui, final_score, total)
                }
                Phase::Idle => QuizAction::ReturnToMenu,
            },
        }
    }

    fn handle_action(&mut self, action: QuizAction, frame: &mut eframe::Frame) {
        match action {
            QuizAction::None => {}
            QuizAction::Play => {
                debug!("Sound cue: background music stopped, game start");
                self.state = AppState::DifficultySelection;
            }
            QuizAction::Exit => self.ui.show_exit_confirm = true,
            QuizAction::ConfirmExit => frame.close(),
            QuizAction::CancelExit => self.ui.show_exit_confirm = false,
            QuizAction::SelectDifficulty(difficulty) => self.start_game(difficulty),
            QuizAction::Back => {
                debug!("Sound cue: background music looping");
                self.state = AppState::MainMenu;
            }
            QuizAction::Submit(answer) => self.submit(answer),
            QuizAction::ReturnToMenu => {
                debug!("Sound cue: background music looping");
                self.session.return_to_menu();
                self.ui.error_message = None;
                self.state = AppState::MainMenu;
            }
        }
    }
}

impl eframe::App for BrainTrainApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.session.pump();
        self.drain_session_events();

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| self.show(ui))
            .inner;
        self.handle_action(action, frame);

        if self.ui.show_exit_confirm {
            let action = self.ui.show_exit_confirmation(ctx);
            self.handle_action(action, frame);
        }

        if self.drain_session_events() {
            ctx.request_repaint();
        }

        if let Some(wait) = self.session.time_until_next_tick() {
            ctx.request_repaint_after(wait);
        }
        if self.ui.is_flashing() {
            ctx.request_repaint_after(FLASH_REPAINT);
        }
    }
}

use brain_train::Difficulty;
use egui::{Align, Color32, Key, Layout, RichText, Ui};
use std::time::{Duration, Instant};

const HEADING_SIZE: f32 = 40.0;
const TEXT_SIZE: f32 = 24.0;
const FLASH_STEP: Duration = Duration::from_millis(100);
const FLASH_STEPS: u32 = 6;

pub struct QuizUI {
    pub current_answer: String,
    pub show_exit_confirm: bool,
    pub error_message: Option<String>,
    flash: Option<(bool, Instant)>,
}

#[derive(Debug)]
pub enum QuizAction {
    None,
    Play,
    Exit,
    ConfirmExit,
    CancelExit,
    SelectDifficulty(Difficulty),
    Back,
    Submit(String),
    ReturnToMenu,
}

/// What the game screen shows for the running question.
pub struct QuestionView {
    pub prompt: String,
    pub score: u32,
    pub remaining: u32,
}

impl Default for QuizUI {
    fn default() -> Self {
        Self {
            current_answer: String::new(),
            show_exit_confirm: false,
            error_message: None,
            flash: None,
        }
    }
}

impl QuizUI {
    pub fn start_flash(&mut self, correct: bool) {
        self.flash = Some((correct, Instant::now()));
    }

    pub fn is_flashing(&self) -> bool {
        self.flash
            .map(|(_, started)| started.elapsed() < FLASH_STEP * FLASH_STEPS)
            .unwrap_or(false)
    }

    // Blinks green or red on even steps.
    fn flash_color(&self) -> Option<Color32> {
        self.flash_color_at(Instant::now())
    }

    fn flash_color_at(&self, now: Instant) -> Option<Color32> {
        let (correct, started) = self.flash?;
        let step = now.saturating_duration_since(started).as_millis() / FLASH_STEP.as_millis();
        if step >= FLASH_STEPS as u128 || step % 2 == 1 {
            return None;
        }
        Some(if correct { Color32::GREEN } else { Color32::RED })
    }

    pub fn show_main_menu(&mut self, ui: &mut Ui) -> QuizAction {
        let mut action = QuizAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.heading(RichText::new("Brain Training").size(HEADING_SIZE));
            ui.add_space(60.0);
            if ui.button(RichText::new("Play").size(TEXT_SIZE)).clicked() {
                action = QuizAction::Play;
            }
            ui.add_space(30.0);
            if ui.button(RichText::new("Exit").size(TEXT_SIZE)).clicked() {
                action = QuizAction::Exit;
            }
        });

        action
    }

    pub fn show_exit_confirmation(&mut self, ctx: &egui::Context) -> QuizAction {
        let mut action = QuizAction::None;
        egui::Window::new("Exit")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to exit?");
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        action = QuizAction::ConfirmExit;
                    }
                    if ui.button("No").clicked() {
                        action = QuizAction::CancelExit;
                    }
                });
            });
        action
    }

    pub fn show_difficulty_selection(
        &mut self,
        ui: &mut Ui,
        last: Option<Difficulty>,
    ) -> QuizAction {
        let mut action = QuizAction::None;

        if ui.button(RichText::new("Back").size(TEXT_SIZE)).clicked() {
            action = QuizAction::Back;
        }

        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading(RichText::new("Select Difficulty").size(HEADING_SIZE));
            ui.add_space(40.0);
            for difficulty in Difficulty::ALL {
                let profile = difficulty.profile();
                let mut label = RichText::new(format!(
                    "{}  ({}-{}, {}s)",
                    difficulty, profile.min_operand, profile.max_operand, profile.time_limit_secs
                ))
                .size(TEXT_SIZE);
                if last == Some(difficulty) {
                    label = label.strong();
                }
                if ui.button(label).clicked() {
                    action = QuizAction::SelectDifficulty(difficulty);
                }
                ui.add_space(20.0);
            }

            if let Some(message) = &self.error_message {
                ui.label(RichText::new(message).color(Color32::RED));
            }
        });

        action
    }

    pub fn show_countdown(&mut self, ui: &mut Ui, remaining: u32) {
        ui.vertical_centered(|ui| {
            ui.add_space((ui.available_height() / 2.0 - HEADING_SIZE).max(0.0));
            ui.label(
                RichText::new(format!("Game will start in {} seconds!", remaining))
                    .size(HEADING_SIZE)
                    .strong(),
            );
        });
    }

    pub fn show_question(&mut self, ui: &mut Ui, view: &QuestionView) -> QuizAction {
        let mut action = QuizAction::None;

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Score: {}", view.score)).size(TEXT_SIZE));
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(format!("Time: {}s", view.remaining)).size(TEXT_SIZE));
            });
        });

        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.label(RichText::new(&view.prompt).size(TEXT_SIZE));
            ui.add_space(30.0);

            let flash_color = self.flash_color();
            let edit = egui::TextEdit::singleline(&mut self.current_answer)
                .font(egui::FontId::proportional(TEXT_SIZE))
                .desired_width(300.0);
            // The field is emptied for the next question, so the fill carries the flash.
            let response = ui
                .scope(|ui| {
                    if let Some(color) = flash_color {
                        ui.visuals_mut().extreme_bg_color = color;
                    }
                    ui.add(edit)
                })
                .inner;
            let entered =
                response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            response.request_focus();

            ui.add_space(30.0);
            let clicked = ui.button(RichText::new("Submit").size(TEXT_SIZE)).clicked();
            if clicked || entered {
                action = QuizAction::Submit(self.current_answer.clone());
            }

            if let Some((correct, _)) = self.flash.filter(|_| self.is_flashing()) {
                let (text, color) = if correct {
                    ("Correct!", Color32::GREEN)
                } else {
                    ("Wrong!", Color32::RED)
                };
                ui.label(RichText::new(text).size(TEXT_SIZE).color(color));
            }
            if let Some(message) = &self.error_message {
                ui.label(RichText::new(message).color(Color32::RED));
            }
        });

        action
    }

    pub fn show_finished(&mut self, ui: &mut Ui, score: u32, total: u32) -> QuizAction {
        let mut action = QuizAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(150.0);
            ui.heading(RichText::new("Quiz Ended").size(HEADING_SIZE));
            ui.add_space(20.0);
            let percentage = (score as f32 / total as f32) * 100.0;
            ui.label(
                RichText::new(format!("Your score is {}/{} ({:.0}%)", score, total, percentage))
                    .size(TEXT_SIZE),
            );
            ui.add_space(40.0);
            if ui.button(RichText::new("Main Menu").size(TEXT_SIZE)).clicked() {
                action = QuizAction::ReturnToMenu;
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_fills_on_even_steps_only() {
        let mut ui = QuizUI::default();
        let started = Instant::now();
        ui.flash = Some((true, started));

        assert_eq!(ui.flash_color_at(started), Some(Color32::GREEN));
        assert_eq!(ui.flash_color_at(started + FLASH_STEP), None);
        assert_eq!(ui.flash_color_at(started + FLASH_STEP * 2), Some(Color32::GREEN));
        assert_eq!(ui.flash_color_at(started + FLASH_STEP * FLASH_STEPS), None);
    }

    #[test]
    fn wrong_answer_flashes_red() {
        let mut ui = QuizUI::default();
        ui.start_flash(false);
        let (_, started) = ui.flash.unwrap();
        assert_eq!(ui.flash_color_at(started), Some(Color32::RED));
        assert!(ui.is_flashing());
    }
}

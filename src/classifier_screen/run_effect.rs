use crate::classifier_screen::core::Effect;
use crate::classifier_screen::main::ClassifierScreen;

impl ClassifierScreen {
    pub(super) fn run_effect(&mut self, effect: Effect) {
        let _ = self
            .logger
            .info(&format!("Running effect: {}", effect.to_display_string()));

        match effect {
            Effect::ClearPreview => {
                if let Err(e) = self.display().clear_preview() {
                    let _ = self
                        .logger
                        .error(&format!("Failed to clear preview: {}", e));
                }
            }
            Effect::ShowPreview {
                photo_name,
                upright,
            } => {
                if let Err(e) = self.display().show_preview(&upright) {
                    let _ = self
                        .logger
                        .error(&format!("Failed to show preview of {}: {}", photo_name, e));
                }
            }
            Effect::Classify(photo) => {
                let task = self.pipeline.spawn(photo, self.waker.clone());
                self.pending.push(task);
            }
        }
    }
}

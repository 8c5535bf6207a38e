use crate::classification_pipeline::main::{ClassificationPipeline, Waker};
use crate::classification_pipeline::task::ClassificationTask;
use crate::classifier_screen::core::{init, transition, Effect, Event, State};
use crate::classifier_screen::render::render;
use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::library::logger::interface::Logger;
use crate::photo::interface::Photo;
use std::sync::{Arc, Mutex, MutexGuard};

/// Owns the status shown to the user. Every method runs on the UI-owning
/// thread; background work reports back through `pending` tasks.
pub struct ClassifierScreen {
    pub(super) config: Config,
    pub(super) logger: Arc<dyn Logger + Send + Sync>,
    pub(super) pipeline: ClassificationPipeline,
    pub(super) display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub(super) waker: Waker,
    pub(super) pending: Vec<ClassificationTask>,
    state: State,
}

impl ClassifierScreen {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        pipeline: ClassificationPipeline,
        display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        waker: Waker,
    ) -> Self {
        let (state, effects) = init();

        let mut screen = Self {
            config,
            logger: logger.with_namespace("screen"),
            pipeline,
            display,
            waker,
            pending: Vec::new(),
            state,
        };

        screen.render();
        screen.run_effects(effects);
        screen
    }

    #[cfg(test)]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status_text(&self) -> String {
        render(&self.state, self.config.top_k)
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pick_photo(&mut self, photo: Photo) {
        self.send(Event::PhotoPicked(photo));
    }

    pub fn send(&mut self, event: Event) {
        let _ = self.logger.info(&format!(
            "old state: {} event: {}",
            self.state.to_display_string(),
            event.to_display_string()
        ));

        let (new_state, effects) = transition(self.state.clone(), event);
        self.state = new_state;

        let _ = self.logger.info(&format!(
            "new state: {} effects: {:?}",
            self.state.to_display_string(),
            effects
                .iter()
                .map(Effect::to_display_string)
                .collect::<Vec<_>>()
        ));

        self.render();
        self.run_effects(effects);
    }

    /// Delivers every preview and result that has arrived since the last
    /// pump, oldest request first. Returns how many results were delivered.
    pub fn pump(&mut self) -> usize {
        let mut events = Vec::new();
        let mut still_pending = Vec::new();
        let mut delivered = 0;

        for task in self.pending.drain(..) {
            // The worker sends the preview before the result, so taking the
            // result first means a finished task never loses its preview.
            let result = task.try_take();
            events.extend(preview_event(&task));
            match result {
                Some(result) => {
                    delivered += 1;
                    events.push(Event::ClassifyDone {
                        photo_name: task.photo_name().to_string(),
                        result,
                    });
                }
                None => still_pending.push(task),
            }
        }
        self.pending = still_pending;

        for event in events {
            self.send(event);
        }
        delivered
    }

    /// Blocks until every in-flight request has been delivered.
    pub fn wait_for_pending(&mut self) {
        while !self.pending.is_empty() {
            let task = self.pending.remove(0);
            let photo_name = task.photo_name().to_string();
            let result = task.wait();
            if let Some(event) = preview_event(&task) {
                self.send(event);
            }
            self.send(Event::ClassifyDone { photo_name, result });
        }
    }

    pub(super) fn display(&self) -> MutexGuard<'_, dyn DeviceDisplay + Send + Sync + 'static> {
        self.display
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self) {
        let text = self.status_text();
        if let Err(e) = self.display().show_status(&text) {
            let _ = self.logger.error(&format!("Failed to render status: {}", e));
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run_effect(effect);
        }
    }
}

fn preview_event(task: &ClassificationTask) -> Option<Event> {
    task.try_take_preview().map(|upright| Event::PreviewReady {
        photo_name: task.photo_name().to_string(),
        upright,
    })
}

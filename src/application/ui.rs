#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::mem;
use std::str::FromStr;

use anyhow::Result;
use strum::VariantNames;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::AspectRatio;
use crate::domain::models::Event;
use crate::domain::models::KeySelectorName;
use crate::domain::models::PlanMode;
use crate::domain::models::Scene;
use crate::domain::models::SceneCount;
use crate::domain::models::SessionState;
use crate::domain::models::SlashCommand;
use crate::domain::models::StoreEvent;
use crate::domain::models::Thumbnail;
use crate::domain::services::actions::help_text;
use crate::domain::services::Store;
use crate::domain::services::Storyboard;
use crate::domain::services::Workflow;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::keys::KeySelectorManager;

/// Initial session built from the loaded configuration.
pub fn session_from_config() -> Result<SessionState> {
    let scene_count = SceneCount::parse(&Config::get(ConfigKey::SceneCount))?;
    let aspect_ratio = AspectRatio::from_str(&Config::get(ConfigKey::AspectRatio))?;

    return Ok(SessionState::new(scene_count, aspect_ratio));
}

pub fn build_workflow(tx: mpsc::UnboundedSender<Event>) -> Result<Workflow> {
    let (prompts, images) = BackendManager::get();
    let key_selector = KeySelectorName::from_str(&Config::get(ConfigKey::KeySelector))?;
    let keys = KeySelectorManager::get(key_selector, tx.clone());

    return Ok(Workflow::new(prompts, images, keys, tx));
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Notice(String),
    Warning(String),
}

/// Line oriented storyboard session. Owns the store and applies user
/// commands and request completions to it one at a time.
pub struct Shell {
    workflow: Workflow,
    store: Store,
    action_tx: mpsc::UnboundedSender<Action>,
    output: Vec<Output>,
}

impl Shell {
    pub fn new(workflow: Workflow, store: Store, action_tx: mpsc::UnboundedSender<Action>) -> Shell {
        return Shell {
            workflow,
            store,
            action_tx,
            output: vec![],
        };
    }

    pub fn state(&self) -> &SessionState {
        return self.store.snapshot();
    }

    pub fn take_output(&mut self) -> Vec<Output> {
        return mem::take(&mut self.output);
    }

    fn text(&mut self, text: &str) {
        self.output.push(Output::Text(text.to_string()));
    }

    fn notice(&mut self, text: &str) {
        self.output.push(Output::Notice(text.to_string()));
    }

    fn warning(&mut self, text: &str) {
        self.output.push(Output::Warning(text.to_string()));
    }

    fn send_action(&mut self, action: Action) {
        if let Err(err) = self.action_tx.send(action) {
            tracing::error!(error = ?err, "Actions service is gone");
            self.warning("Background actions are unavailable.");
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        let store_event = match event {
            Event::Store(store_event) => store_event,
            Event::Notice(text) => {
                self.notice(&text);
                return;
            }
            Event::Warning(text) => {
                self.warning(&text);
                return;
            }
        };

        let state = self.store.snapshot();
        let mut show_board = false;
        let mut announcement: Option<Output> = None;
        match &store_event {
            StoreEvent::PlanSucceeded { .. } => show_board = true,
            StoreEvent::PlanFailed { message, .. } => {
                announcement = Some(Output::Warning(message.to_string()));
            }
            StoreEvent::SceneImageSucceeded(id, _) => {
                if let Some(scene) = state.scene(id) {
                    announcement = Some(Output::Notice(format!(
                        "Scene {} visual is ready. Save it with /save {}.",
                        scene.index, scene.index
                    )));
                }
            }
            StoreEvent::SceneImageFailed { id, .. } => {
                if let Some(scene) = state.scene(id) {
                    announcement = Some(Output::Warning(format!(
                        "Failed to develop the visual for scene {}. Run /image {} to try again.",
                        scene.index, scene.index
                    )));
                }
            }
            StoreEvent::ThumbnailSucceeded { id, .. } if *id == state.thumbnail.id => {
                announcement = Some(Output::Notice(
                    "Story poster visual is ready. Save it with /save thumbnail.".to_string(),
                ));
            }
            StoreEvent::ThumbnailFailed { id, .. } if *id == state.thumbnail.id => {
                announcement = Some(Output::Warning(
                    "Failed to develop the story poster. Run /thumbnail to try again.".to_string(),
                ));
            }
            _ => {}
        }

        self.store.dispatch(store_event);

        if let Some(output) = announcement {
            self.output.push(output);
        }
        if show_board {
            let board = Storyboard::render(self.store.snapshot());
            self.text(&board);
        }
    }

    /// Returns false once the session should end.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        if !line.starts_with('/') {
            self.workflow.append_story(&mut self.store, line);
            return Ok(true);
        }

        let cmd = match SlashCommand::parse(line) {
            Some(cmd) => cmd,
            None => {
                self.warning(&format!("Unknown command {line}. Run /help for a list of commands."));
                return Ok(true);
            }
        };

        if cmd.is_quit() {
            return Ok(false);
        }

        self.handle_command(&cmd);

        return Ok(true);
    }

    fn handle_command(&mut self, cmd: &SlashCommand) {
        if cmd.is_help() {
            self.text(&help_text());
        } else if cmd.is_story() {
            self.story(cmd);
        } else if cmd.is_scene_count() {
            self.scene_count(cmd);
        } else if cmd.is_aspect_ratio() {
            self.aspect_ratio(cmd);
        } else if cmd.is_generate() {
            self.generate(PlanMode::Fresh);
        } else if cmd.is_add_more() {
            self.generate(PlanMode::Continue);
        } else if cmd.is_image() {
            self.image(cmd);
        } else if cmd.is_thumbnail() {
            self.thumbnail();
        } else if cmd.is_list() {
            let board = Storyboard::render(self.store.snapshot());
            self.text(&board);
        } else if cmd.is_copy() {
            self.copy(cmd);
        } else if cmd.is_save() {
            self.save(cmd);
        } else if cmd.is_key() {
            self.key(cmd);
        }
    }

    fn story(&mut self, cmd: &SlashCommand) {
        if cmd.args.is_empty() {
            let story = self.store.snapshot().story.to_string();
            if story.is_empty() {
                self.text("Your story is empty. Type it line by line, or use /story TEXT.");
            } else {
                self.text(&story);
            }
            return;
        }

        self.workflow.set_story(&mut self.store, &cmd.rest());
        self.notice("Story updated.");
    }

    fn scene_count(&mut self, cmd: &SlashCommand) {
        let arg = match cmd.first_arg() {
            Some(arg) => arg,
            None => {
                let current = self.store.snapshot().scene_count;
                self.text(&format!("Generating {current} scenes per request."));
                return;
            }
        };

        match SceneCount::parse(arg) {
            Ok(scene_count) => {
                self.workflow.set_scene_count(&mut self.store, scene_count);
                self.notice(&format!("Generating {scene_count} scenes per request."));
            }
            Err(err) => self.warning(&err.to_string()),
        }
    }

    fn aspect_ratio(&mut self, cmd: &SlashCommand) {
        let arg = cmd.first_arg().unwrap_or_default();
        match AspectRatio::from_str(arg) {
            Ok(aspect_ratio) => {
                self.workflow.set_aspect_ratio(&mut self.store, aspect_ratio);
                self.notice(&format!("New visuals will use {aspect_ratio}."));
            }
            Err(_) => self.warning(&format!(
                "Unknown aspect ratio '{arg}'. Possible values are: {}",
                AspectRatio::VARIANTS.join(", ")
            )),
        }
    }

    fn generate(&mut self, mode: PlanMode) {
        if mode == PlanMode::Continue && !self.store.snapshot().has_plan() {
            self.warning("There is no storyboard to extend yet. Run /generate first.");
            return;
        }

        let in_flight = self.store.snapshot().is_generating_prompts;
        if self.workflow.generate_plan(&mut self.store, mode).is_some() {
            self.notice("Generating storyboard...");
            return;
        }

        if in_flight {
            self.warning("A storyboard is already being generated.");
        } else if let Some(err) = self.store.snapshot().error.clone() {
            self.warning(&err);
        }
    }

    fn scene_from_arg(&mut self, arg: &str) -> Option<Scene> {
        let found = arg
            .parse::<usize>()
            .ok()
            .and_then(|index| return self.store.snapshot().scene_by_index(index))
            .cloned();
        if found.is_none() {
            self.warning(&format!("There is no scene {arg}. Run /list to see the storyboard."));
        }

        return found;
    }

    fn image(&mut self, cmd: &SlashCommand) {
        let arg = match cmd.first_arg() {
            Some(arg) => arg.to_string(),
            None => {
                self.warning("Usage: /image [SCENE_NUMBER,all]");
                return;
            }
        };

        if arg == "all" {
            let started = self.workflow.generate_pending_images(&mut self.store).len();
            if started == 0 {
                self.text("Every scene already has a visual or is developing one.");
            } else {
                self.notice(&format!("Developing {started} visuals..."));
            }
            return;
        }

        let scene = match self.scene_from_arg(&arg) {
            Some(scene) => scene,
            None => return,
        };

        if self
            .workflow
            .generate_scene_image(&mut self.store, &scene.id)
            .is_some()
        {
            self.notice(&format!("Developing visual for scene {}...", scene.index));
        } else {
            self.text(&format!(
                "Scene {} already has a visual or is developing one.",
                scene.index
            ));
        }
    }

    fn thumbnail(&mut self) {
        if self.store.snapshot().thumbnail.prompt.is_empty() {
            self.warning("There is no poster prompt yet. Run /generate first.");
            return;
        }

        if self.workflow.generate_thumbnail(&mut self.store).is_some() {
            self.notice("Developing story poster...");
        } else {
            self.text("The story poster already has a visual or is developing one.");
        }
    }

    fn copy(&mut self, cmd: &SlashCommand) {
        let state = self.store.snapshot();
        match cmd.first_arg() {
            Some("all") if state.has_plan() => {
                let text = Storyboard::all_prompts(state);
                self.send_action(Action::CopyText("all prompts".to_string(), text));
            }
            Some("thumbnail") if !state.thumbnail.prompt.is_empty() => {
                let text = state.thumbnail.prompt.to_string();
                self.send_action(Action::CopyText("poster prompt".to_string(), text));
            }
            Some("all") | Some("thumbnail") => {
                self.warning("There is no storyboard yet. Run /generate first.");
            }
            Some(arg) => {
                let arg = arg.to_string();
                if let Some(scene) = self.scene_from_arg(&arg) {
                    self.send_action(Action::CopyText(
                        format!("scene {} prompt", scene.index),
                        scene.prompt,
                    ));
                }
            }
            None => self.warning("Usage: /copy [SCENE_NUMBER,thumbnail,all]"),
        }
    }

    fn save(&mut self, cmd: &SlashCommand) {
        let arg = match cmd.first_arg() {
            Some(arg) => arg.to_string(),
            None => {
                self.warning("Usage: /save [SCENE_NUMBER,thumbnail]");
                return;
            }
        };

        if arg == "thumbnail" {
            match self.store.snapshot().thumbnail.image.image().cloned() {
                Some(image) => {
                    let file_name = Thumbnail::file_name(&image);
                    self.send_action(Action::SaveImage(image, file_name));
                }
                None => self.warning("The story poster has no visual yet. Run /thumbnail first."),
            }
            return;
        }

        let scene = match self.scene_from_arg(&arg) {
            Some(scene) => scene,
            None => return,
        };

        match scene.image.image() {
            Some(image) => {
                let file_name = scene.file_name(image);
                self.send_action(Action::SaveImage(image.clone(), file_name));
            }
            None => self.warning(&format!(
                "Scene {} has no visual yet. Run /image {} first.",
                scene.index, scene.index
            )),
        }
    }

    fn key(&mut self, cmd: &SlashCommand) {
        let token = match cmd.first_arg() {
            Some(token) => token.to_string(),
            None => {
                self.warning("Usage: /key [TOKEN]");
                return;
            }
        };

        Config::set(ConfigKey::GeminiToken, &token);
        self.workflow.select_key(&mut self.store);
        self.notice("API key selected.");
    }
}

fn print(output: Output) {
    match output {
        Output::Text(text) => println!("{text}"),
        Output::Notice(text) => println!("{}", Paint::cyan(text)),
        Output::Warning(text) => println!("{}", Paint::yellow(text)),
    }
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,
    mut event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let workflow = build_workflow(event_tx)?;
    let mut shell = Shell::new(workflow, Store::new(session_from_config()?), action_tx);

    println!(
        "{}",
        Paint::new(format!("Storyreel v{}", env!("CARGO_PKG_VERSION"))).bold()
    );
    println!("Type your story line by line, then run /generate. Run /help for every command.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };
                let keep_going = shell.handle_line(&line)?;
                shell.take_output().into_iter().for_each(print);
                if !keep_going {
                    break;
                }
            }
            event = event_rx.recv() => {
                match event {
                    Some(event) => shell.handle_event(event),
                    None => break,
                }
                shell.take_output().into_iter().for_each(print);
            }
        }
    }

    return Ok(());
}

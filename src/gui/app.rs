//! Main GUI application
//!
//! egui application state and rendering.

use super::i18n::{Text, behavior_label, tr};
use anyhow::Context;
use browser_profile_launcher::config::{self, BehaviorAfterLaunch, Config, Language};
use browser_profile_launcher::core::collection::CollectionManager;
use browser_profile_launcher::core::history::HistoryManager;
use browser_profile_launcher::core::launch;
use browser_profile_launcher::core::profile::{self, Profile, ProfileKey};
use browser_profile_launcher::core::registry::ProfileRegistry;
use browser_profile_launcher::core::view::{self, NavKeys, Tab};
use browser_profile_launcher::server;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;
use url::Url;

const ICON_SIZE: f32 = 24.0;

/// Main launcher application state
pub struct LauncherApp {
    config: Config,
    /// Profiles shared with the icon server
    registry: ProfileRegistry,
    /// Snapshot of the registry used for rendering
    profiles: Vec<Profile>,
    history: HistoryManager,
    collections: CollectionManager,
    current_tab: Tab,
    query: String,
    /// Index of the highlighted row in the current tab
    focus: usize,
    scroll_to_focus: bool,
    focus_search: bool,
    error_message: Option<String>,
    show_add_collection: bool,
    new_collection_name: String,
    show_settings: bool,
    /// Root URL of the icon server
    icon_base: Url,
    icons: HashMap<ProfileKey, IconState>,
    icon_sender: mpsc::Sender<IconResult>,
    icon_receiver: mpsc::Receiver<IconResult>,
    runtime: tokio::runtime::Handle,
}

enum IconState {
    Loading,
    Ready(egui::TextureHandle),
    Missing,
}

struct IconResult {
    key: ProfileKey,
    bytes: Result<Vec<u8>, String>,
}

/// Deferred UI actions, applied after the frame is drawn
enum Action {
    Launch(Profile),
    Assign(ProfileKey, String),
    Unassign(ProfileKey, String),
    OpenFolder(PathBuf),
    DeleteCollection(String),
}

impl LauncherApp {
    pub fn new(
        config: Config,
        registry: ProfileRegistry,
        icon_base: Url,
        runtime: tokio::runtime::Handle,
    ) -> anyhow::Result<Self> {
        let history = HistoryManager::new(config.general.history_limit)
            .context("Failed to load launch history")?;
        let collections = CollectionManager::new().context("Failed to load collections")?;
        let (icon_sender, icon_receiver) = mpsc::channel();

        Ok(Self {
            profiles: registry.list(),
            config,
            registry,
            history,
            collections,
            current_tab: Tab::All,
            query: String::new(),
            focus: 0,
            scroll_to_focus: false,
            focus_search: true,
            error_message: None,
            show_add_collection: false,
            new_collection_name: String::new(),
            show_settings: false,
            icon_base,
            icons: HashMap::new(),
            icon_sender,
            icon_receiver,
            runtime,
        })
    }

    fn lang(&self) -> Language {
        self.config.general.language
    }

    fn tabs(&self) -> Vec<Tab> {
        view::tabs(self.collections.names())
    }

    fn visible(&self, tab: &Tab) -> Vec<Profile> {
        let history = self.history.keys();
        view::visible(
            tab,
            &self.profiles,
            &history,
            self.collections.data(),
            &self.query,
        )
        .into_iter()
        .cloned()
        .collect()
    }

    fn set_tab(&mut self, tab: Tab) {
        let len = self.visible(&tab).len();
        self.current_tab = tab;
        self.focus = view::clamp_focus(self.focus, len);
        self.scroll_to_focus = true;
    }

    fn refresh_profiles(&mut self) {
        tracing::info!("Reloading browser profiles");
        self.registry.replace(profile::discover());
        self.profiles = self.registry.list();
        self.icons.clear();
        let len = self.visible(&self.current_tab).len();
        self.focus = view::clamp_focus(self.focus, len);
    }

    fn launch(&mut self, profile: &Profile, ctx: &egui::Context) {
        match launch::run(
            &self.registry,
            profile.browser.id(),
            &profile.directory,
            &self.config.browsers,
        ) {
            Ok(pid) => {
                tracing::info!("Launched {} (PID: {})", profile.key(), pid);
                self.error_message = None;
                if let Err(e) = self.history.record(profile.key()) {
                    tracing::warn!("Failed to save history: {:#}", e);
                }

                match self.config.general.behavior_after_launch {
                    BehaviorAfterLaunch::None => {}
                    BehaviorAfterLaunch::Minimize => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
                    }
                    BehaviorAfterLaunch::Close => {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Launch failed: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn apply(&mut self, action: Action, ctx: &egui::Context) {
        let result = match action {
            Action::Launch(profile) => {
                self.launch(&profile, ctx);
                Ok(())
            }
            Action::Assign(key, name) => self.collections.assign(&key, &name),
            Action::Unassign(key, name) => self.collections.unassign(&key, &name),
            Action::OpenFolder(path) => {
                open::that(&path).with_context(|| format!("Failed to open {:?}", path))
            }
            Action::DeleteCollection(name) => {
                let tabs = self.tabs();
                let was_current = self.current_tab == Tab::Collection(name.clone());
                let result = self.collections.remove(&name);
                if result.is_ok() && was_current {
                    let prev = view::prev_tab(&tabs, &self.current_tab);
                    self.set_tab(prev);
                }
                result
            }
        };

        if let Err(e) = result {
            self.error_message = Some(format!("{:#}", e));
        }
    }

    /// Keyboard navigation: arrows move focus and switch tabs, Enter launches
    fn handle_keys(&mut self, ctx: &egui::Context) -> Option<Action> {
        if self.show_add_collection || self.show_settings {
            return None;
        }

        let (up, down, prev, next, enter) = ctx.input_mut(|i| {
            (
                i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowUp),
                i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowDown),
                i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowLeft)
                    || i.consume_key(egui::Modifiers::SHIFT, egui::Key::Tab),
                i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowRight)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Tab),
                i.consume_key(egui::Modifiers::NONE, egui::Key::Enter),
            )
        });

        let keys = NavKeys {
            up,
            down,
            prev,
            next,
            enter,
        };
        let tabs = self.tabs();
        let sel = view::navigate(&tabs, &self.current_tab, self.focus, keys, |tab| {
            self.visible(tab).len()
        });

        self.current_tab = sel.tab;
        self.focus = sel.focus;
        if sel.moved {
            self.scroll_to_focus = true;
        }
        if let Some(idx) = sel.launch {
            if let Some(profile) = self.visible(&self.current_tab).into_iter().nth(idx) {
                tracing::debug!("Enter {}", profile.key());
                return Some(Action::Launch(profile));
            }
        }
        None
    }

    fn request_icon(&mut self, profile: &Profile, ctx: &egui::Context) {
        let key = profile.key();
        if self.icons.contains_key(&key) {
            return;
        }
        if profile.ico_path.is_none() {
            self.icons.insert(key, IconState::Missing);
            return;
        }

        let url = match server::icon_url(&self.icon_base, &key) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Bad icon URL for {}: {}", key, e);
                self.icons.insert(key, IconState::Missing);
                return;
            }
        };
        self.icons.insert(key.clone(), IconState::Loading);

        let tx = self.icon_sender.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let bytes = fetch_icon(url).await.map_err(|e| e.to_string());
            let _ = tx.send(IconResult { key, bytes });
            ctx.request_repaint();
        });
    }

    fn receive_icons(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.icon_receiver.try_recv() {
            let state = match result.bytes.and_then(|bytes| decode_icon(&bytes)) {
                Ok(image) => IconState::Ready(ctx.load_texture(
                    format!("icon-{}", result.key),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(e) => {
                    tracing::debug!("No icon for {}: {}", result.key, e);
                    IconState::Missing
                }
            };
            self.icons.insert(result.key, state);
        }
    }

    fn show_search(&mut self, ui: &mut egui::Ui) {
        let lang = self.lang();
        let mut refresh = false;

        ui.horizontal(|ui| {
            let width = ui.available_width() - 64.0;
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text(tr(lang, Text::KeywordSearch))
                    .desired_width(width),
            );
            if self.focus_search {
                response.request_focus();
                self.focus_search = false;
            }
            if response.changed() {
                self.focus = 0;
                self.scroll_to_focus = true;
            }

            if ui
                .button("🔄")
                .on_hover_text(tr(lang, Text::Refresh))
                .clicked()
            {
                refresh = true;
            }
            if ui
                .button("⚙")
                .on_hover_text(tr(lang, Text::Settings))
                .clicked()
            {
                self.show_settings = true;
            }
        });

        if refresh {
            self.refresh_profiles();
        }
    }

    fn show_tabs(&mut self, ui: &mut egui::Ui) {
        let lang = self.lang();
        let mut selected = None;

        ui.horizontal_wrapped(|ui| {
            for tab in self.tabs() {
                let label = match &tab {
                    Tab::All => tr(lang, Text::All).to_string(),
                    Tab::History => tr(lang, Text::History).to_string(),
                    Tab::Collection(name) => name.clone(),
                };
                if ui
                    .selectable_label(self.current_tab == tab, label)
                    .clicked()
                {
                    selected = Some(tab);
                }
            }

            if ui
                .button("➕")
                .on_hover_text(tr(lang, Text::AddCollection))
                .clicked()
            {
                self.new_collection_name.clear();
                self.show_add_collection = true;
            }
        });

        if let Some(tab) = selected {
            self.set_tab(tab);
        }
    }

    fn show_list(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let lang = self.lang();
        let visible = self.visible(&self.current_tab);
        for profile in &visible {
            self.request_icon(profile, ctx);
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if visible.is_empty() {
                    ui.weak(tr(lang, Text::NoProfiles));
                }

                for (idx, profile) in visible.iter().enumerate() {
                    let key = profile.key();
                    let response = ui
                        .horizontal(|ui| {
                            match self.icons.get(&key) {
                                Some(IconState::Ready(texture)) => {
                                    ui.add(
                                        egui::Image::from_texture(egui::load::SizedTexture::new(
                                            texture.id(),
                                            egui::vec2(ICON_SIZE, ICON_SIZE),
                                        ))
                                        .fit_to_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE)),
                                    );
                                }
                                Some(IconState::Loading) => {
                                    ui.add_sized([ICON_SIZE, ICON_SIZE], egui::Spinner::new());
                                }
                                Some(IconState::Missing) | None => {
                                    ui.allocate_exact_size(
                                        egui::vec2(ICON_SIZE, ICON_SIZE),
                                        egui::Sense::hover(),
                                    );
                                }
                            }

                            ui.selectable_label(
                                idx == self.focus,
                                format!("{}\n{}", profile.name, profile.browser.display_name()),
                            )
                        })
                        .inner;

                    if idx == self.focus && self.scroll_to_focus {
                        response.scroll_to_me(None);
                    }
                    if response.clicked() {
                        actions.push(Action::Launch(profile.clone()));
                    }

                    let member_of = self.collections.data().collections_of(&key);
                    response.context_menu(|ui| {
                        ui.label(tr(lang, Text::Collections));
                        for name in self.collections.names() {
                            let mut checked = member_of.contains(name);
                            if ui.checkbox(&mut checked, name).changed() {
                                actions.push(if checked {
                                    Action::Assign(key.clone(), name.clone())
                                } else {
                                    Action::Unassign(key.clone(), name.clone())
                                });
                            }
                        }
                        ui.separator();
                        if ui.button(tr(lang, Text::OpenFolder)).clicked() {
                            actions.push(Action::OpenFolder(profile.path()));
                            ui.close_menu();
                        }
                    });
                }

                if let Tab::Collection(name) = &self.current_tab {
                    ui.add_space(8.0);
                    if ui.small_button(tr(lang, Text::DeleteCollection)).clicked() {
                        actions.push(Action::DeleteCollection(name.clone()));
                    }
                }
            });

        self.scroll_to_focus = false;
    }

    fn show_add_collection_dialog(&mut self, ctx: &egui::Context) {
        let lang = self.lang();
        let mut open = self.show_add_collection;
        let mut submit = false;
        let mut cancel = false;

        egui::Window::new(tr(lang, Text::AddCollection))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(tr(lang, Text::CollectionName));
                    let response = ui.text_edit_singleline(&mut self.new_collection_name);
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button(tr(lang, Text::Add)).clicked() {
                        submit = true;
                    }
                    if ui.button(tr(lang, Text::Cancel)).clicked() {
                        cancel = true;
                    }
                });
            });

        if submit {
            match self.collections.add(&self.new_collection_name) {
                Ok(name) => {
                    self.error_message = None;
                    self.new_collection_name.clear();
                    self.set_tab(Tab::Collection(name));
                    open = false;
                }
                Err(e) => self.error_message = Some(e.to_string()),
            }
        }
        if cancel {
            open = false;
        }
        self.show_add_collection = open;
    }

    fn show_settings_dialog(&mut self, ctx: &egui::Context) {
        let lang = self.lang();
        let mut open = self.show_settings;
        let mut save = false;

        egui::Window::new(tr(lang, Text::Settings))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(tr(lang, Text::Language));
                        egui::ComboBox::from_id_salt("language")
                            .selected_text(self.config.general.language.label())
                            .show_ui(ui, |ui| {
                                for language in Language::ALL {
                                    ui.selectable_value(
                                        &mut self.config.general.language,
                                        language,
                                        language.label(),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label(tr(lang, Text::BehaviorAfterLaunch));
                        egui::ComboBox::from_id_salt("behavior_after_launch")
                            .selected_text(behavior_label(
                                lang,
                                self.config.general.behavior_after_launch,
                            ))
                            .show_ui(ui, |ui| {
                                for behavior in BehaviorAfterLaunch::ALL {
                                    ui.selectable_value(
                                        &mut self.config.general.behavior_after_launch,
                                        behavior,
                                        behavior_label(lang, behavior),
                                    );
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(8.0);
                if ui.button(tr(lang, Text::Save)).clicked() {
                    save = true;
                }
            });

        if save {
            match config::save(&self.config) {
                Ok(()) => open = false,
                Err(e) => self.error_message = Some(format!("{:#}", e)),
            }
        }
        self.show_settings = open;
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_icons(ctx);

        let mut actions = Vec::new();
        if let Some(action) = self.handle_keys(ctx) {
            actions.push(action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_search(ui);

            if let Some(error) = &self.error_message {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, error);
            }

            ui.add_space(4.0);
            self.show_tabs(ui);
            ui.separator();
            self.show_list(ui, ctx, &mut actions);
        });

        if self.show_add_collection {
            self.show_add_collection_dialog(ctx);
        }
        if self.show_settings {
            self.show_settings_dialog(ctx);
        }

        for action in actions {
            self.apply(action, ctx);
        }
    }
}

async fn fetch_icon(url: Url) -> anyhow::Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Decode `.ico` (or any format `image` understands) into an egui image
fn decode_icon(bytes: &[u8]) -> Result<egui::ColorImage, String> {
    let image = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = image.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

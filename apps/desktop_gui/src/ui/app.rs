use std::collections::BTreeMap;
use std::time::Duration;

use arboard::Clipboard;
use client_core::InvitationSession;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{DeliveryStatus, UiEvent},
    gesture::{is_admin_trigger, MultiClickDetector},
    orchestration::{commit_answer, confirm_clear},
    reducer::{reduce, ViewAction, ViewState},
};
use crate::ui::{
    panels::{self, AdminPanelModel, PanelAction},
    particles::ParticleField,
    theme,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct InvitationApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: InvitationSession,
    view: ViewState,
    clicks: MultiClickDetector,
    roses: ParticleField,
    stars: ParticleField,
    delivery: BTreeMap<&'static str, DeliveryStatus>,
    channels: Option<Vec<&'static str>>,
    backend_note: Option<String>,
    admin_notice: Option<String>,
    theme_applied: bool,
}

impl InvitationApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        session: InvitationSession,
        gesture_window: Duration,
    ) -> Self {
        let view = ViewState::from_persisted(session.current());
        Self {
            cmd_tx,
            ui_rx,
            session,
            view,
            clicks: MultiClickDetector::new(gesture_window),
            roses: ParticleField::scatter(15, "🌹", 22.0, theme::ROSE),
            stars: ParticleField::scatter(20, "✨", 16.0, theme::STAR),
            delivery: BTreeMap::new(),
            channels: None,
            backend_note: None,
            admin_notice: None,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady { channels } => {
                    tracing::info!(?channels, "notification channels ready");
                    self.channels = Some(channels);
                }
                UiEvent::BackendUnavailable(reason) => {
                    self.backend_note = Some(reason);
                }
                UiEvent::DeliveryReported { channel, status } => {
                    self.delivery.insert(channel, status);
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        ctx.set_visuals(theme::visuals());
        self.theme_applied = true;
    }

    /// Feeds every primary-button release into the click grouper, wherever it
    /// lands, and opens the admin overlay once a group of exactly three settles.
    fn track_root_activations(&mut self, ctx: &egui::Context) {
        let (now, releases) = ctx.input(|i| {
            let releases = i
                .events
                .iter()
                .filter(|event| {
                    matches!(
                        event,
                        egui::Event::PointerButton {
                            button: egui::PointerButton::Primary,
                            pressed: false,
                            ..
                        }
                    )
                })
                .count();
            (i.time, releases)
        });

        let mut settled = Vec::new();
        for _ in 0..releases {
            settled.extend(self.clicks.register(now));
        }
        settled.extend(self.clicks.settle(now));

        if settled.into_iter().any(is_admin_trigger) {
            tracing::debug!("admin gesture recognised");
            self.admin_notice = None;
            self.apply(ViewAction::AdminGesture);
        }

        if let Some(left) = self.clicks.remaining(now) {
            ctx.request_repaint_after(left);
        }
    }

    fn apply(&mut self, action: ViewAction) {
        self.view = reduce(self.view.clone(), action);
    }

    fn handle(&mut self, action: PanelAction) {
        match action {
            PanelAction::OpenPrompt => self.apply(ViewAction::OpenPrompt),
            PanelAction::Commit(answer) => {
                self.view = commit_answer(self.view.clone(), answer, &mut self.session, &self.cmd_tx);
            }
            PanelAction::OpenInfo => self.apply(ViewAction::OpenInfo),
            PanelAction::CloseInfo => self.apply(ViewAction::CloseInfo),
            PanelAction::CloseAdmin => {
                self.admin_notice = None;
                self.apply(ViewAction::CloseAdmin);
            }
            PanelAction::CopyPayload => self.copy_payload(),
            PanelAction::RequestClear => self.apply(ViewAction::RequestClear),
            PanelAction::CancelClear => self.apply(ViewAction::CancelClear),
            PanelAction::ConfirmClear => {
                if !self.view.confirming_clear() {
                    return;
                }
                self.view = confirm_clear(self.view.clone(), &mut self.session);
                self.delivery.clear();
                self.admin_notice = Some("Respuesta borrada".to_string());
            }
        }
    }

    fn copy_payload(&mut self) {
        let Some(payload) = self.session.export_payload() else {
            self.admin_notice = Some("No hay respuesta para copiar".to_string());
            return;
        };
        let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(payload));
        self.admin_notice = Some(match copied {
            Ok(()) => "Respuesta copiada al portapapeles".to_string(),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                format!("No se pudo copiar: {err}")
            }
        });
    }

    fn show_page(&mut self, ctx: &egui::Context, actions: &mut Vec<PanelAction>) {
        let time = ctx.input(|i| i.time);
        egui::CentralPanel::default()
            .frame(theme::page_frame())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter().clone();
                self.roses.paint(&painter, rect, time);
                self.stars.paint(&painter, rect, time);

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| panels::main_page(ui, &self.view, actions));
            });

        if self.view.prompt_open() {
            panels::prompt_modal(ctx, actions);
        }
        if self.view.info_open {
            panels::info_modal(ctx, actions);
        }
        if self.view.admin_visible() {
            let model = AdminPanelModel {
                response: self.view.response(),
                confirming_clear: self.view.confirming_clear(),
                notice: self.admin_notice.as_deref(),
                channels: self.channels.as_deref(),
                backend_note: self.backend_note.as_deref(),
                delivery: &self.delivery,
            };
            panels::admin_panel(ctx, &model, actions);
        }
    }
}

impl eframe::App for InvitationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);
        self.track_root_activations(ctx);

        let mut actions = Vec::new();
        self.show_page(ctx, &mut actions);
        for action in actions {
            self.handle(action);
        }

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

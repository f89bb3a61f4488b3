//! Page content and the three modal windows. Panels never mutate state; they
//! push the user's intent as a [`PanelAction`] for the app shell to apply.

use std::collections::BTreeMap;

use eframe::egui;
use shared::{
    domain::{Answer, Response},
    format,
};

use crate::controller::{events::DeliveryStatus, reducer::ViewState};
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    OpenPrompt,
    Commit(Answer),
    OpenInfo,
    CloseInfo,
    CloseAdmin,
    CopyPayload,
    RequestClear,
    ConfirmClear,
    CancelClear,
}

pub struct AdminPanelModel<'a> {
    pub response: Option<&'a Response>,
    pub confirming_clear: bool,
    pub notice: Option<&'a str>,
    pub channels: Option<&'a [&'static str]>,
    pub backend_note: Option<&'a str>,
    pub delivery: &'a BTreeMap<&'static str, DeliveryStatus>,
}

pub fn main_page(ui: &mut egui::Ui, view: &ViewState, actions: &mut Vec<PanelAction>) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        let info = egui::Button::new(egui::RichText::new("i").strong().size(16.0))
            .fill(theme::ACCENT.gamma_multiply(0.2))
            .corner_radius(egui::CornerRadius::same(14))
            .min_size(egui::vec2(28.0, 28.0));
        if ui.add(info).on_hover_text("Más detalles").clicked() {
            actions.push(PanelAction::OpenInfo);
        }
    });

    ui.vertical_centered(|ui| {
        ui.set_max_width(560.0);
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("Una Invitación Especial ❤")
                .size(34.0)
                .strong()
                .color(theme::ACCENT),
        );
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("💡 Haz clic en (i) para más detalles")
                .size(13.0)
                .color(theme::MUTED),
        );
        ui.add_space(18.0);

        theme::card_frame(theme::CARD_BACKGROUND).show(ui, |ui| {
            ui.label(
                egui::RichText::new(
                    "Hola! 👋 Sé que he intentado invitarte antes por WhatsApp y quizás no has \
                     podido responder. Esta vez quise crear algo especial como desarrollador \
                     para tener una respuesta clara.",
                )
                .size(16.0),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Me interesas mucho y me gustaría conocerte mejor. Entiendo que puedes estar \
                     ocupada, pero esta será mi última invitación para no molestarte más.",
                )
                .size(16.0),
            );
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("¿Te gustaría almorzar conmigo? ☕")
                    .size(22.0)
                    .strong()
                    .color(theme::ACCENT),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(
                    "Solo necesito un \"Sí\" o \"No\". Respetaré completamente tu decisión. 💭",
                )
                .italics()
                .color(theme::MUTED),
            );
        });

        ui.add_space(24.0);
        match view.response() {
            None => {
                let respond = egui::Button::new(
                    egui::RichText::new("⭐ ¡Responder!")
                        .size(18.0)
                        .color(egui::Color32::WHITE),
                )
                .fill(theme::YES_FILL)
                .corner_radius(egui::CornerRadius::same(22))
                .min_size(egui::vec2(200.0, 44.0));
                if ui.add(respond).clicked() {
                    actions.push(PanelAction::OpenPrompt);
                }
            }
            Some(response) => result_card(ui, response),
        }
    });
}

fn result_card(ui: &mut egui::Ui, response: &Response) {
    let fill = match response.answer() {
        Answer::Yes => theme::YES_CARD,
        Answer::No => theme::NO_CARD,
    };
    theme::card_frame(fill).show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(format::result_heading(response.answer()))
                    .size(22.0)
                    .strong(),
            );
            ui.add_space(6.0);
            ui.label(egui::RichText::new(response.message()).size(16.0));
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!(
                    "Respondido el: {}",
                    format::format_es_local(response.timestamp())
                ))
                .small()
                .color(theme::MUTED),
            );
        });
    });
}

fn centered_window(title: &'static str) -> egui::Window<'static> {
    egui::Window::new(title)
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .frame(theme::modal_frame())
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .max_width(460.0)
}

/// Centered card over a dimmed backdrop. Returns true when the backdrop was
/// clicked or Escape pressed.
fn dismissable_modal(
    ctx: &egui::Context,
    id: &'static str,
    add_contents: impl FnOnce(&mut egui::Ui),
) -> bool {
    egui::Modal::new(egui::Id::new(id))
        .frame(theme::modal_frame())
        .backdrop_color(egui::Color32::from_black_alpha(128))
        .show(ctx, |ui| {
            ui.set_max_width(460.0);
            add_contents(ui);
        })
        .should_close()
}

fn modal_header(ui: &mut egui::Ui, title: &str, closable: bool) -> bool {
    let mut close = false;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(title).size(20.0).strong());
        if closable {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    close = true;
                }
            });
        }
    });
    ui.separator();
    close
}

pub fn prompt_modal(ctx: &egui::Context, actions: &mut Vec<PanelAction>) {
    centered_window("prompt_modal").show(ctx, |ui| {
        modal_header(ui, "Mi última invitación 💫", false);
        ui.label(
            "Solo quiero una respuesta clara. No hay presión, solo honestidad. Sea cual sea tu \
             decisión, la respetaré completamente.",
        );
        ui.add_space(14.0);
        ui.horizontal(|ui| {
            let yes = egui::Button::new(
                egui::RichText::new("Sí, almorcemos 😊").color(egui::Color32::WHITE),
            )
            .fill(theme::YES_FILL)
            .min_size(egui::vec2(180.0, 40.0));
            if ui.add(yes).clicked() {
                actions.push(PanelAction::Commit(Answer::Yes));
            }
            let no = egui::Button::new(
                egui::RichText::new("No, gracias 🙏").color(egui::Color32::WHITE),
            )
            .fill(theme::NO_FILL)
            .min_size(egui::vec2(180.0, 40.0));
            if ui.add(no).clicked() {
                actions.push(PanelAction::Commit(Answer::No));
            }
        });
    });
}

pub fn info_modal(ctx: &egui::Context, actions: &mut Vec<PanelAction>) {
    let dismissed = dismissable_modal(ctx, "info_modal", |ui| {
        if modal_header(ui, "¿Por qué esta página? 💭", true) {
            actions.push(PanelAction::CloseInfo);
        }
        for (heading, body) in [
            (
                "Mis intentos anteriores:",
                "Te he escrito por WhatsApp antes, pero nunca he tenido una respuesta clara. \
                 Quizás no supiste qué decir o simplemente no era el momento.",
            ),
            (
                "Esta es mi última carta:",
                "Como desarrollador, quise crear algo especial para tener una respuesta \
                 definitiva. Después de esto, no volveré a insistir. Solo quiero saber qué \
                 piensas realmente.",
            ),
            (
                "Sin presión:",
                "Si es \"no\", lo entenderé completamente y podremos seguir como antes, ya que \
                 fuimos compañeros de trabajo. Si es \"sí\", me haría muy feliz conocerte mejor.",
            ),
            (
                "Agradecimiento:",
                "Independientemente de tu respuesta, agradezco mucho que te hayas tomado el \
                 tiempo de leer esto y responder. Significa mucho para mí.",
            ),
            (
                "Sobre tu respuesta:",
                "Tu decisión queda guardada localmente en este equipo para que yo pueda verla \
                 cuando revise la aplicación. Es completamente privada entre nosotros dos.",
            ),
        ] {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(heading).strong());
            ui.label(body);
        }
    });
    if dismissed && !actions.contains(&PanelAction::CloseInfo) {
        actions.push(PanelAction::CloseInfo);
    }
}

pub fn admin_panel(ctx: &egui::Context, model: &AdminPanelModel<'_>, actions: &mut Vec<PanelAction>) {
    let dismissed = dismissable_modal(ctx, "admin_panel", |ui| {
        if modal_header(ui, "🔐 Panel de Administración", true) {
            actions.push(PanelAction::CloseAdmin);
        }

        ui.label(egui::RichText::new("📊 Estado de la Respuesta:").strong());
        match model.response {
            Some(response) => {
                let fill = match response.answer() {
                    Answer::Yes => theme::YES_CARD,
                    Answer::No => theme::NO_CARD,
                };
                theme::card_frame(fill).show(ui, |ui| {
                    ui.label(format!("Respuesta: {}", format::admin_label(response.answer())));
                    ui.label(format!(
                        "Fecha: {}",
                        format::format_es_local(response.timestamp())
                    ));
                    ui.label(format!("Mensaje: {}", response.message()));
                });
            }
            None => {
                theme::card_frame(theme::PAGE_BACKGROUND).show(ui, |ui| {
                    ui.label("🤷 Aún no hay respuesta");
                });
            }
        }

        ui.add_space(10.0);
        if model.confirming_clear {
            ui.colored_label(theme::NO_FILL, "¿Estás seguro de borrar la respuesta?");
            ui.horizontal(|ui| {
                if ui.button("Sí, borrar").clicked() {
                    actions.push(PanelAction::ConfirmClear);
                }
                if ui.button("Cancelar").clicked() {
                    actions.push(PanelAction::CancelClear);
                }
            });
        } else {
            ui.horizontal(|ui| {
                if ui.button("📋 Copiar Respuesta").clicked() {
                    actions.push(PanelAction::CopyPayload);
                }
                let clear = egui::Button::new(
                    egui::RichText::new("🗑 Borrar Respuesta").color(egui::Color32::WHITE),
                )
                .fill(theme::NO_FILL);
                if ui.add(clear).clicked() {
                    actions.push(PanelAction::RequestClear);
                }
            });
        }
        if let Some(notice) = model.notice {
            ui.small(notice);
        }

        ui.add_space(10.0);
        ui.label(egui::RichText::new("📨 Notificaciones:").strong());
        match (model.channels, model.backend_note) {
            (_, Some(note)) => {
                ui.small(format!("No disponibles: {note}"));
            }
            (None, None) => {
                ui.small("Iniciando…");
            }
            (Some([]), None) => {
                ui.small("Ningún canal configurado");
            }
            (Some(channels), None) => {
                for channel in channels {
                    let status = match model.delivery.get(channel) {
                        None => "sin envíos".to_string(),
                        Some(DeliveryStatus::Delivered) => "✅ entregado".to_string(),
                        Some(DeliveryStatus::Failed(reason)) => format!("❌ {reason}"),
                    };
                    ui.small(format!("{channel}: {status}"));
                }
            }
        }

        ui.add_space(10.0);
        ui.small("💡 Cómo acceder: triple click en cualquier parte de la página");
        ui.small("🔒 Privacidad: solo visible para el administrador");
    });
    if dismissed && !actions.contains(&PanelAction::CloseAdmin) {
        actions.push(PanelAction::CloseAdmin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frame(
        ctx: &egui::Context,
        time: f64,
        events: Vec<egui::Event>,
        mut draw: impl FnMut(&egui::Context),
    ) {
        let input = egui::RawInput {
            time: Some(time),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| draw(ctx));
    }

    /// Renders `draw` for a few frames while the pointer clicks the top-left
    /// corner, well away from the centered card.
    fn click_outside(mut draw: impl FnMut(&egui::Context)) {
        let ctx = egui::Context::default();
        let corner = egui::pos2(4.0, 4.0);
        let button = |pressed| egui::Event::PointerButton {
            pos: corner,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        };
        run_frame(&ctx, 0.0, Vec::new(), &mut draw);
        run_frame(&ctx, 0.1, vec![egui::Event::PointerMoved(corner)], &mut draw);
        run_frame(&ctx, 0.2, vec![button(true)], &mut draw);
        run_frame(&ctx, 0.3, vec![button(false)], &mut draw);
    }

    #[test]
    fn admin_panel_closes_on_backdrop_click() {
        let delivery = BTreeMap::new();
        let model = AdminPanelModel {
            response: None,
            confirming_clear: false,
            notice: None,
            channels: Some(&[]),
            backend_note: None,
            delivery: &delivery,
        };
        let mut actions = Vec::new();
        click_outside(|ctx| admin_panel(ctx, &model, &mut actions));
        assert_eq!(actions, vec![PanelAction::CloseAdmin]);
    }

    #[test]
    fn info_modal_closes_on_backdrop_click() {
        let mut actions = Vec::new();
        click_outside(|ctx| info_modal(ctx, &mut actions));
        assert_eq!(actions, vec![PanelAction::CloseInfo]);
    }

    #[test]
    fn prompt_ignores_clicks_outside() {
        let mut actions = Vec::new();
        click_outside(|ctx| prompt_modal(ctx, &mut actions));
        assert!(actions.is_empty());
    }
}

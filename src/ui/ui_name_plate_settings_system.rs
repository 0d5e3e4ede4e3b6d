use bevy::prelude::{EventWriter, Input, KeyCode, Local, Res, ResMut, Vec2};
use bevy_egui::{egui, EguiContexts};

use crate::{
    events::NamePlateResetEvent,
    name_plate::NAME_PLATE_OFFSET_Y,
    render::{EguiNamePlateBackend, EguiTextStore, NamePlateSprites, ScreenRect},
    resources::{
        HookStrongWeakMode, NamePlateSettings, PlayerProfile, RainbowMode, RainbowSettings,
        ShowDirection,
    },
    systems::render_name_plate_preview,
};

const PREVIEW_HEIGHT: f32 = 130.0;
const PREVIEW_MARGIN: f32 = 8.0;

#[derive(Copy, Clone, PartialEq, Debug)]
enum SettingsPage {
    NamePlates,
    Rainbow,
}

pub struct UiStateNamePlateSettings {
    open: bool,
    page: SettingsPage,
}

impl Default for UiStateNamePlateSettings {
    fn default() -> Self {
        Self {
            open: true,
            page: SettingsPage::NamePlates,
        }
    }
}

fn percent_slider(ui: &mut egui::Ui, label: &str, value: &mut u32) -> bool {
    ui.label(label);
    let changed = ui
        .add(egui::Slider::new(value, 0..=100).suffix("%"))
        .changed();
    ui.end_row();
    changed
}

fn name_plate_settings_grid(ui: &mut egui::Ui, settings: &mut NamePlateSettings) -> bool {
    let mut changed = false;

    egui::Grid::new("name_plate_settings_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Name plates:");
            changed |= ui.checkbox(&mut settings.show, "Show").changed();
            ui.end_row();

            ui.label("Own name plate:");
            changed |= ui.checkbox(&mut settings.show_own, "Show").changed();
            ui.end_row();

            changed |= percent_slider(ui, "Name size:", &mut settings.size);

            ui.label("Clan:");
            changed |= ui.checkbox(&mut settings.show_clan, "Show").changed();
            ui.end_row();

            changed |= percent_slider(ui, "Clan size:", &mut settings.clan_size);

            ui.label("Client ids:");
            ui.horizontal(|ui| {
                changed |= ui.checkbox(&mut settings.show_ids, "Show").changed();
                changed |= ui
                    .checkbox(&mut settings.ids_new_line, "On own line")
                    .changed();
            });
            ui.end_row();

            if settings.ids_new_line {
                changed |= percent_slider(ui, "Client id size:", &mut settings.ids_size);
            }

            ui.label("Colors:");
            ui.horizontal(|ui| {
                changed |= ui
                    .checkbox(&mut settings.team_colors, "Team colors")
                    .changed();
                changed |= ui
                    .checkbox(&mut settings.friend_mark, "Friend mark")
                    .changed();
            });
            ui.end_row();

            ui.label("Hook strength:");
            egui::ComboBox::from_id_source("name_plate_hook_strong_weak")
                .selected_text(settings.hook_strong_weak.label())
                .show_ui(ui, |ui| {
                    for mode in HookStrongWeakMode::ALL {
                        changed |= ui
                            .selectable_value(&mut settings.hook_strong_weak, mode, mode.label())
                            .changed();
                    }
                });
            ui.end_row();

            if settings.hook_strong_weak != HookStrongWeakMode::Off {
                changed |= percent_slider(
                    ui,
                    "Hook strength size:",
                    &mut settings.hook_strong_weak_size,
                );
            }

            ui.label("Direction:");
            egui::ComboBox::from_id_source("name_plate_show_direction")
                .selected_text(settings.show_direction.label())
                .show_ui(ui, |ui| {
                    for mode in ShowDirection::ALL {
                        changed |= ui
                            .selectable_value(&mut settings.show_direction, mode, mode.label())
                            .changed();
                    }
                });
            ui.end_row();

            if settings.show_direction != ShowDirection::Off {
                changed |= percent_slider(ui, "Direction size:", &mut settings.direction_size);
            }

            ui.label("Fade:");
            changed |= ui
                .checkbox(&mut settings.always_show, "Always show")
                .changed();
            ui.end_row();

            changed |= percent_slider(ui, "Other teams alpha:", &mut settings.show_others_alpha);

            ui.label("Spectators:");
            changed |= ui
                .checkbox(&mut settings.show_spec_char_name_plates, "Body name plates")
                .changed();
            ui.end_row();

            ui.label("Debug:");
            changed |= ui.checkbox(&mut settings.debug, "Enabled").changed();
            ui.end_row();
        });

    changed
}

fn rainbow_settings_grid(ui: &mut egui::Ui, rainbow: &mut RainbowSettings) {
    egui::Grid::new("rainbow_settings_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Mode:");
            egui::ComboBox::from_id_source("rainbow_mode")
                .selected_text(rainbow.mode.label())
                .show_ui(ui, |ui| {
                    for mode in RainbowMode::ALL {
                        ui.selectable_value(&mut rainbow.mode, mode, mode.label());
                    }
                });
            ui.end_row();

            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut rainbow.speed, 0..=5000).suffix("%"));
            ui.end_row();

            ui.label("Players:");
            ui.horizontal(|ui| {
                ui.checkbox(&mut rainbow.local, "Self");
                ui.checkbox(&mut rainbow.others, "Others");
            });
            ui.end_row();
        });
}

fn name_plate_previews(
    ui: &mut egui::Ui,
    text_store: &mut EguiTextStore,
    sprites: &NamePlateSprites,
    settings: &NamePlateSettings,
    profile: &PlayerProfile,
) {
    let width = ui.available_width().max(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, PREVIEW_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(
        rect,
        egui::Rounding::same(4.0),
        egui::Color32::from_black_alpha(96),
    );

    // One world unit per point, origin at the top left of the preview area
    let screen = ScreenRect::new(0.0, 0.0, rect.width(), rect.height());
    let mut backend = EguiNamePlateBackend::new(painter, text_store, sprites, screen);

    let bottom = rect.height() + NAME_PLATE_OFFSET_Y - PREVIEW_MARGIN;
    for dummy in 0..2 {
        let x = rect.width() * (1.0 + 2.0 * dummy as f32) / 4.0;
        render_name_plate_preview(
            &mut backend,
            settings,
            profile,
            Vec2::new(x, bottom),
            dummy,
        );
    }
}

pub fn ui_name_plate_settings_system(
    mut egui_context: EguiContexts,
    mut ui_state: Local<UiStateNamePlateSettings>,
    keyboard: Res<Input<KeyCode>>,
    mut settings: ResMut<NamePlateSettings>,
    mut rainbow: ResMut<RainbowSettings>,
    profile: Res<PlayerProfile>,
    mut text_store: ResMut<EguiTextStore>,
    sprites: Res<NamePlateSprites>,
    mut reset_events: EventWriter<NamePlateResetEvent>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Escape) {
        ui_state.open = !ui_state.open;
    }

    let mut open = ui_state.open;
    egui::Window::new("Name Plates")
        .open(&mut open)
        .resizable(false)
        .default_pos([16.0, 16.0])
        .show(egui_context.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut ui_state.page, SettingsPage::NamePlates, "Name Plates");
                ui.selectable_value(&mut ui_state.page, SettingsPage::Rainbow, "Rainbow");
            });
            ui.separator();

            match ui_state.page {
                SettingsPage::NamePlates => {
                    if name_plate_settings_grid(ui, &mut settings) {
                        log::debug!("Name plate settings changed");
                    }

                    ui.separator();
                    name_plate_previews(ui, &mut text_store, &sprites, &settings, &profile);

                    ui.horizontal(|ui| {
                        if ui.button("Defaults").clicked() {
                            *settings = NamePlateSettings::default();
                            reset_events.send_default();
                        }
                        if ui.button("Reset text cache").clicked() {
                            reset_events.send_default();
                        }
                    });
                }
                SettingsPage::Rainbow => rainbow_settings_grid(ui, &mut rainbow),
            }
        });
    ui_state.open = open;
}

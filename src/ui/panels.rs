use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use experiment_compare::data::model::DatasetId;

use super::to_color32;
use crate::state::{AppState, ViewMode};

// ---------------------------------------------------------------------------
// Left side panel – experiment list
// ---------------------------------------------------------------------------

/// What the user clicked in the experiment list, applied after the list is drawn.
enum ListAction {
    Select(DatasetId),
    ToggleCompare(DatasetId),
    Edit(DatasetId),
    Duplicate(DatasetId),
    Delete(DatasetId),
}

/// Render the left experiment panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Experiments");
    ui.separator();

    let search = ui.add(
        egui::TextEdit::singleline(&mut state.search)
            .hint_text("Search name, description, tags…")
            .desired_width(f32::INFINITY),
    );
    if search.changed() {
        state.refilter();
    }
    ui.separator();

    if state.store.is_empty() {
        ui.label("No experiments yet. Import a JSON file or add a sample.");
        return;
    }

    let mut action = None;
    let series_order = state.series_order();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for id in &state.visible_ids {
                let Some(ds) = state.store.get(*id) else {
                    continue;
                };
                let compared = state.compare_ids.contains(id);
                let series_pos = series_order.iter().position(|s| s == id);

                ui.horizontal(|ui: &mut Ui| {
                    let mut checked = compared;
                    if ui
                        .checkbox(&mut checked, "")
                        .on_hover_text("Include in comparison")
                        .changed()
                    {
                        action = Some(ListAction::ToggleCompare(*id));
                    }

                    // Same colour as its line in the overlay plot.
                    let mut label = RichText::new(&ds.name).strong();
                    if let Some(pos) = series_pos {
                        label = label.color(to_color32(state.palette.color_for(pos)));
                    }
                    if ui
                        .selectable_label(state.selected == Some(*id), label)
                        .clicked()
                    {
                        action = Some(ListAction::Select(*id));
                    }
                });

                if !ds.description.is_empty() {
                    ui.label(RichText::new(&ds.description).small());
                }
                let mut meta = format!("{} rows", ds.len());
                if !ds.tags.is_empty() {
                    meta.push_str(&format!("  ·  {}", ds.tags.join(", ")));
                }
                ui.label(RichText::new(meta).small().weak());

                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("Edit").clicked() {
                        action = Some(ListAction::Edit(*id));
                    }
                    if ui.small_button("Duplicate").clicked() {
                        action = Some(ListAction::Duplicate(*id));
                    }
                    if ui.small_button("Delete").clicked() {
                        action = Some(ListAction::Delete(*id));
                    }
                });
                ui.separator();
            }
        });

    let result = match action {
        Some(ListAction::Select(id)) => {
            state.select(id);
            state.view = ViewMode::Single;
            Ok(())
        }
        Some(ListAction::ToggleCompare(id)) => {
            state.toggle_compare(id);
            Ok(())
        }
        Some(ListAction::Edit(id)) => {
            state.begin_edit(id);
            Ok(())
        }
        Some(ListAction::Duplicate(id)) => state.duplicate(id).map(|_| ()),
        Some(ListAction::Delete(id)) => state.delete(id),
        None => Ok(()),
    };
    if let Err(e) = result {
        state.report(e);
    }
}

// ---------------------------------------------------------------------------
// Edit dialog
// ---------------------------------------------------------------------------

/// Render the edit window while an edit is in progress.
pub fn edit_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(buffer) = state.editing.as_mut() else {
        return;
    };

    let mut save = false;
    let mut cancel = false;
    egui::Window::new("Edit experiment")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut buffer.name);
            ui.label("Description");
            ui.text_edit_multiline(&mut buffer.description);
            ui.label("Tags (comma separated)");
            ui.text_edit_singleline(&mut buffer.tags);
            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                save = ui.button("Save").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if save {
        if let Err(e) = state.commit_edit() {
            state.report(e);
        }
    } else if cancel {
        state.editing = None;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Import JSON…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Add sample experiment").clicked() {
                if let Err(e) = state.add_sample() {
                    state.report(e);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, ViewMode::Single, "Single");
        ui.selectable_value(&mut state.view, ViewMode::Compare, "Compare");

        ui.separator();

        ui.label(format!(
            "{} experiments, {} compared",
            state.store.len(),
            state.compare_ids.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Import experiment")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match state.import_file(&path) {
            Ok(id) => log::info!("Imported {} as {id}", path.display()),
            Err(e) => state.report(e),
        }
    }
}

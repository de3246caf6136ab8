//! Applies remote protocol commands to an `Editor`.

use voxedit_remote::{Cell, EditCommand, EditHandler, EditResponse, RecordData, ResponseData};

use crate::core::types::IVec3;
use crate::math::{Direction, GridBox};
use crate::voxel::Editor;

fn cell(c: Cell) -> IVec3 {
    IVec3::from_array(c)
}

/// Remote command handler owning the editor
pub struct EditorHandler {
    editor: Editor,
}

impl EditorHandler {
    pub fn new(editor: Editor) -> Self {
        Self { editor }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    fn resize_area(&mut self, min: Cell, max: Cell) -> EditResponse {
        let candidate = GridBox {
            min: cell(min),
            max: cell(max),
        };
        let result = self
            .editor
            .begin_handle_resize()
            .and_then(|_| self.editor.update_handle_resize(candidate))
            .and_then(|_| self.editor.finish_handle_resize());

        match result {
            Ok(outcome) => EditResponse::applied(outcome.changed()),
            Err(e) => {
                self.editor.cancel_gesture();
                EditResponse::error(e.to_string())
            }
        }
    }

    fn area_step(&mut self, direction: &str, expand: bool) -> EditResponse {
        let dir: Direction = match direction.parse() {
            Ok(dir) => dir,
            Err(e) => return EditResponse::error(format!("{}", e)),
        };
        let result = if expand {
            self.editor.expand_area(dir)
        } else {
            self.editor.contract_area(dir)
        };
        match result {
            Some(count) => EditResponse::count(count),
            None => EditResponse::error(format!("area step {} rejected", dir)),
        }
    }
}

impl EditHandler for EditorHandler {
    fn handle_command(&mut self, cmd: EditCommand) -> EditResponse {
        let e = &mut self.editor;
        match cmd {
            EditCommand::Place { x, y, z, color } => {
                let pos = IVec3::new(x, y, z);
                let placed = match color {
                    Some(color) => e.place_with(pos, color),
                    None => e.place(pos),
                };
                EditResponse::applied(placed)
            }
            EditCommand::Remove { x, y, z } => EditResponse::applied(e.remove_at(IVec3::new(x, y, z))),
            EditCommand::Paint { x, y, z } => EditResponse::applied(e.paint_at(IVec3::new(x, y, z))),
            EditCommand::SetPaintColor { color } => {
                e.set_paint_color(color);
                EditResponse::none()
            }
            EditCommand::SelectSingle { x, y, z } => {
                e.toggle_select(IVec3::new(x, y, z));
                EditResponse::count(e.selection_count())
            }
            EditCommand::SelectByColor { x, y, z } => {
                EditResponse::count(e.select_by_color(IVec3::new(x, y, z)))
            }
            EditCommand::SelectConnected { x, y, z } => {
                EditResponse::count(e.select_connected(IVec3::new(x, y, z)))
            }
            EditCommand::SelectAll => EditResponse::count(e.select_all()),
            EditCommand::ClearSelection => {
                e.clear_selection();
                EditResponse::none()
            }
            EditCommand::DeleteSelected => EditResponse::count(e.delete_selected()),
            EditCommand::RecolorSelected => EditResponse::count(e.recolor_selected()),
            EditCommand::Fill { start, end } => EditResponse::count(e.fill(cell(start), cell(end))),
            EditCommand::PreviewFill { start, end } => {
                let preview = e.preview_fill(cell(start), cell(end));
                EditResponse::ok(ResponseData::Preview {
                    cells: preview.cells.iter().map(|p| p.to_array()).collect(),
                })
            }
            EditCommand::ExpandArea { direction } => self.area_step(&direction, true),
            EditCommand::ContractArea { direction } => self.area_step(&direction, false),
            EditCommand::ResizeArea { min, max } => self.resize_area(min, max),
            EditCommand::ClearArea => {
                e.clear_area();
                EditResponse::none()
            }
            EditCommand::MoveSelection { dx, dy, dz } => {
                EditResponse::applied(e.move_selection(IVec3::new(dx, dy, dz)))
            }
            EditCommand::Undo => EditResponse::applied(e.undo()),
            EditCommand::ClearScene => {
                e.clear_scene();
                EditResponse::none()
            }
            EditCommand::Import { records } => {
                let report = e.import(&records);
                EditResponse::ok(ResponseData::Import {
                    applied: report.applied,
                    skipped: report.skipped,
                    conflicts: report.conflicts,
                })
            }
            EditCommand::Load { records } => {
                let report = e.load_model(&records);
                EditResponse::ok(ResponseData::Import {
                    applied: report.applied,
                    skipped: report.skipped,
                    conflicts: report.conflicts,
                })
            }
            EditCommand::Export => EditResponse::ok(ResponseData::Export {
                records: e
                    .export()
                    .into_iter()
                    .map(|r| RecordData {
                        x: r.x,
                        y: r.y,
                        z: r.z,
                        color: r.color.to_string(),
                    })
                    .collect(),
            }),
            EditCommand::GetStatus => {
                let status = e.status();
                EditResponse::ok(ResponseData::Status {
                    voxel_count: status.voxel_count,
                    selection_count: status.selection_count,
                    can_undo: status.can_undo,
                })
            }
            EditCommand::Ping => EditResponse::pong(),
        }
    }
}

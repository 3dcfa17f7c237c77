use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::consts::{BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT};
use crate::coords::{NormalizedPoint, Rect, screen_delta_to_normalized, screen_to_normalized};
use crate::csv::{ExportError, ImportError};
use crate::hotspot::{DecodeError, Hotspot, HotspotId, HotspotModel, HotspotPatch};
use crate::input::{Button, MarkerDrag, Modifiers, PointerTarget, WheelDelta, wheel_factor};
use crate::map::{MapId, MapRecord, SaveMapRequest, SavedMap};
use crate::render::{self, RenderScene};
use crate::viewport::{Point, Size, Viewport, ViewportController};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Which deployment the engine is driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Author places, drags and edits hotspots.
    #[default]
    Editor,
    /// Editor showing the public behaviour: panning without `Alt`, no placement.
    Preview,
    /// Public page: pan, zoom and follow hotspot links.
    Viewer,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Viewport or markers changed; call `render`.
    RenderNeeded,
    /// A hotspot was placed by a click.
    HotspotCreated(Hotspot),
    /// A marker drag finished at a new position.
    HotspotMoved { id: HotspotId, x: f64, y: f64 },
    /// Open the edit form for a hotspot.
    EditRequested { id: HotspotId },
    /// Follow a hotspot link.
    Navigate { url: String },
    /// A save round-trip succeeded.
    MapSaved { id: MapId },
    /// Show a failure message to the user.
    ShowError(String),
}

/// One row of the editor's hotspot side panel.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotRow {
    pub id: HotspotId,
    pub title: String,
    pub active: bool,
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser
/// dependencies. Every handler takes page-space points and converts them
/// with the container rect set by `on_resize`.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub viewport: ViewportController,
    pub model: HotspotModel,
    mode: Mode,
    container: Rect,
    marker_drag: MarkerDrag,
    /// Set when a drag moved something; the click that ends it is swallowed.
    suppress_click: bool,
    map_id: Option<MapId>,
    title: String,
    image_url: String,
}

impl EngineCore {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self { mode, ..Self::default() }
    }

    // --- Layout ---

    /// The container moved or changed size. Cancels any gesture and resets the view.
    pub fn on_resize(&mut self, container: Rect) -> Vec<Action> {
        self.container = container;
        self.marker_drag = MarkerDrag::Idle;
        self.viewport.resize(container.size());
        vec![Action::RenderNeeded]
    }

    /// A new image finished loading with the given natural size.
    pub fn set_image(&mut self, url: impl Into<String>, natural: Size) -> Vec<Action> {
        self.image_url = url.into();
        self.marker_drag = MarkerDrag::Idle;
        self.viewport.reset(self.container.size(), natural);
        vec![Action::RenderNeeded]
    }

    // --- Pointer ---

    pub fn on_pointer_down(
        &mut self,
        page: Point,
        button: Button,
        modifiers: Modifiers,
        target: &PointerTarget,
    ) -> Vec<Action> {
        let local = self.container.to_local(page);
        self.suppress_click = false;

        match (self.mode, target) {
            (Mode::Editor, PointerTarget::Hotspot(id)) if button == Button::Primary && !modifiers.alt => {
                if let Some(origin) = self.model.get(id).map(Hotspot::position) {
                    self.marker_drag.begin(id.clone(), local, origin);
                }
            }
            (Mode::Editor, _) if !modifiers.alt => {}
            _ => {
                self.viewport.begin_drag(local, button, target);
            }
        }
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, page: Point) -> Vec<Action> {
        let local = self.container.to_local(page);

        if let Some((id, origin, offset)) = self.marker_drag.advance(local) {
            let before = self.model.get(&id).map(Hotspot::position);
            let offset = screen_delta_to_normalized(offset, &self.viewport.viewport(), self.viewport.image());
            let target = NormalizedPoint::new(origin.x + offset.x, origin.y + offset.y);
            if !self.model.move_to(&id, target) || self.model.get(&id).map(Hotspot::position) == before {
                return Vec::new();
            }
            self.suppress_click = true;
            return vec![Action::RenderNeeded];
        }

        if self.viewport.continue_drag(local) {
            self.suppress_click = true;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.viewport.end_drag();

        let Some(id) = self.marker_drag.finish() else {
            return Vec::new();
        };
        match self.model.get(&id) {
            Some(h) => vec![Action::HotspotMoved { id, x: h.x, y: h.y }],
            None => Vec::new(),
        }
    }

    /// A click completed. In the editor it places a hotspot; in the viewer it
    /// follows the link of the clicked hotspot.
    pub fn on_click(&mut self, page: Point, modifiers: Modifiers, target: &PointerTarget) -> Vec<Action> {
        if std::mem::take(&mut self.suppress_click) {
            return Vec::new();
        }

        match self.mode {
            Mode::Editor => {
                if modifiers.alt || target.is_hotspot() {
                    return Vec::new();
                }
                self.place_hotspot(page)
            }
            Mode::Preview => Vec::new(),
            Mode::Viewer => {
                let PointerTarget::Hotspot(id) = target else {
                    return Vec::new();
                };
                match self.model.get(id) {
                    Some(h) if h.active && h.is_clickable() => vec![Action::Navigate { url: h.url.clone() }],
                    _ => Vec::new(),
                }
            }
        }
    }

    fn place_hotspot(&mut self, page: Point) -> Vec<Action> {
        let point = screen_to_normalized(page, self.container, &self.viewport.viewport(), self.viewport.image());
        if !point.is_within_image() {
            return Vec::new();
        }
        let hotspot = self.model.add(point.x, point.y);
        let id = hotspot.id.clone();
        vec![Action::HotspotCreated(hotspot), Action::EditRequested { id }, Action::RenderNeeded]
    }

    // --- Wheel / buttons ---

    pub fn on_wheel(&mut self, page: Point, delta: WheelDelta) -> Vec<Action> {
        let anchor = self.container.to_local(page);
        self.zoom(wheel_factor(delta), Some(anchor))
    }

    /// The `+` control: zoom in about the container center.
    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom(BUTTON_ZOOM_IN, None)
    }

    /// The `-` control: zoom out about the container center.
    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom(BUTTON_ZOOM_OUT, None)
    }

    /// The reset control.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.marker_drag = MarkerDrag::Idle;
        self.viewport.reset_view();
        vec![Action::RenderNeeded]
    }

    fn zoom(&mut self, factor: f64, anchor: Option<Point>) -> Vec<Action> {
        if self.viewport.zoom_at_point(factor, anchor) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, touches: &[Point], target: &PointerTarget) -> Vec<Action> {
        let local = self.to_local_all(touches);
        self.suppress_click = false;
        self.viewport.touch_start(&local, target);
        Vec::new()
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let local = self.to_local_all(touches);
        if self.viewport.touch_move(&local) {
            self.suppress_click = true;
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    /// Fingers lifted; `remaining` are the touches still down.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        let local = self.to_local_all(remaining);
        self.viewport.touch_end(&local);
        Vec::new()
    }

    fn to_local_all(&self, pages: &[Point]) -> Vec<Point> {
        pages.iter().map(|p| self.container.to_local(*p)).collect()
    }

    // --- Mode ---

    /// Switch between editing and previewing. No effect in the viewer.
    pub fn toggle_preview(&mut self) -> Vec<Action> {
        self.mode = match self.mode {
            Mode::Editor => Mode::Preview,
            Mode::Preview => Mode::Editor,
            Mode::Viewer => return Vec::new(),
        };
        self.marker_drag = MarkerDrag::Idle;
        self.viewport.cancel_gesture();
        vec![Action::RenderNeeded]
    }

    // --- Hotspot editing ---

    /// Commit the edit form for a hotspot.
    pub fn update_hotspot(&mut self, id: &str, patch: &HotspotPatch) -> Vec<Action> {
        Self::rendered_if(self.model.update(id, patch))
    }

    pub fn remove_hotspot(&mut self, id: &str) -> Vec<Action> {
        Self::rendered_if(self.model.remove(id).is_some())
    }

    pub fn set_hotspot_active(&mut self, id: &str, active: bool) -> Vec<Action> {
        Self::rendered_if(self.model.set_active(id, active))
    }

    /// Replace the hotspot list with the rows of an imported CSV file.
    ///
    /// # Errors
    ///
    /// Returns the import error; the current list is left as it was.
    pub fn import_csv(&mut self, text: &str) -> Result<Vec<Action>, ImportError> {
        self.model = HotspotModel::from_csv(text)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// CSV export of the active hotspots.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingToExport`] when no hotspot is active.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        self.model.to_csv()
    }

    fn rendered_if(changed: bool) -> Vec<Action> {
        if changed { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Persistence ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Build the save payload for the current map.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the hotspot list cannot be encoded.
    pub fn save_request(&self) -> Result<SaveMapRequest, DecodeError> {
        Ok(SaveMapRequest {
            id: self.map_id,
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            hotspots: self.model.to_json()?,
        })
    }

    /// Outcome of a save round-trip. Only success touches engine state.
    pub fn on_save_result(&mut self, result: Result<SavedMap, String>) -> Vec<Action> {
        match result {
            Ok(saved) => {
                self.map_id = Some(saved.id);
                vec![Action::MapSaved { id: saved.id }]
            }
            Err(message) => vec![Action::ShowError(message)],
        }
    }

    /// Hydrate the engine from a stored map. The image still has to load
    /// before `set_image` resets the view.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the stored hotspot list is not valid JSON.
    pub fn load_map(&mut self, record: &MapRecord) -> Result<Vec<Action>, DecodeError> {
        let model = record.hotspot_model()?;
        self.model = model;
        self.map_id = Some(record.id);
        self.title.clone_from(&record.title);
        self.image_url.clone_from(&record.image_url);
        self.marker_drag = MarkerDrag::Idle;
        Ok(vec![Action::RenderNeeded])
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn map_id(&self) -> Option<MapId> {
        self.map_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    #[must_use]
    pub fn camera(&self) -> Viewport {
        self.viewport.viewport()
    }

    /// Zoom indicator text for the controls.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        render::zoom_label(self.viewport.scale())
    }

    /// Side panel rows, titled `Hotspot N` when the title is empty, where N is
    /// the position in the full list.
    #[must_use]
    pub fn list_rows(&self) -> Vec<HotspotRow> {
        self.model
            .hotspots()
            .iter()
            .enumerate()
            .map(|(i, h)| HotspotRow {
                id: h.id.clone(),
                title: if h.title.trim().is_empty() { format!("Hotspot {}", i + 1) } else { h.title.clone() },
                active: h.active,
            })
            .collect()
    }

    #[must_use]
    pub fn scene(&self) -> RenderScene {
        render::scene(&self.viewport.viewport(), &self.model)
    }
}

/// The full engine. Wraps `EngineCore` and owns the transformed wrapper element.
pub struct Engine {
    wrapper: HtmlElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the wrapper element that carries the transform.
    #[must_use]
    pub fn new(wrapper: HtmlElement, mode: Mode) -> Self {
        Self { wrapper, core: EngineCore::new(mode) }
    }

    /// Apply the current transform to the wrapper and return the scene for
    /// the host to position markers.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the style update.
    pub fn render(&self) -> Result<RenderScene, JsValue> {
        render::apply_transform(&self.wrapper, &self.core.camera())?;
        Ok(self.core.scene())
    }
}

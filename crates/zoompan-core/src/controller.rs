//! View controller: turns pointer and wheel input into view updates.

use crate::error::{ZoomPanError, ZoomPanResult};
use crate::input::{EventResponse, InputEvent, PointerEvent, PointerTarget, WheelInput};
use crate::options::{ViewMode, ZoomPanOptions};
use crate::surface::ViewSurface;
use crate::view::{ViewBox, ViewState, describe_matrix};
use crate::wheel::{NOTCH_DELTA, RawWheel};
use kurbo::{Affine, Point, Vec2};

/// Pointer interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    Panning {
        /// View-space point under the pointer when the pan started.
        origin: Point,
        /// View state when the pan started.
        start: ViewState,
    },
}

/// Zoom factor for a normalized wheel delta.
///
/// Zooming out uses the reciprocal so equal and opposite deltas cancel.
pub fn zoom_factor(delta: f64) -> f64 {
    if delta >= 0.0 {
        1.0 + delta
    } else {
        1.0 / (1.0 - delta)
    }
}

/// Drives the view of one surface from pointer and wheel input.
///
/// The controller owns the surface for as long as pan/zoom is active;
/// `teardown` hands it back restored.
#[derive(Debug)]
pub struct ViewController<S: ViewSurface> {
    surface: S,
    options: ZoomPanOptions,
    interaction: Interaction,
    /// View box before initialization; `None` when an initialized surface was adopted.
    original_view_box: Option<Option<ViewBox>>,
    /// Whether initialization created the viewport group.
    created_viewport: bool,
    /// Product of every stroke width factor applied so far.
    stroke_factor: f64,
}

impl<S: ViewSurface> ViewController<S> {
    /// Set up pan/zoom on a surface.
    ///
    /// A surface that is already initialized is adopted as-is: no second
    /// viewport group is created and the current view is kept.
    pub fn initialize(mut surface: S, options: ZoomPanOptions) -> ZoomPanResult<Self> {
        let size = surface.size();
        if !(size.width > 0.0
            && size.height > 0.0
            && size.width.is_finite()
            && size.height.is_finite())
        {
            return Err(ZoomPanError::MissingGeometry(format!(
                "canvas size {}x{}",
                size.width, size.height
            )));
        }

        if surface.is_ready() {
            log::debug!("Surface already initialized, adopting current view");
            return Ok(Self {
                surface,
                options,
                interaction: Interaction::Idle,
                original_view_box: None,
                created_viewport: false,
                stroke_factor: 1.0,
            });
        }

        let original_view_box = surface.view_box();
        let mut created_viewport = false;
        match options.mode {
            ViewMode::Transform => {
                created_viewport = surface.install_viewport()?;
            }
            ViewMode::ViewBox => {
                if original_view_box.is_none() {
                    let view_box = ViewBox::for_canvas(size);
                    log::debug!("No view box, using {}", view_box.to_attribute());
                    surface.set_view_box(Some(view_box));
                }
            }
        }
        surface.set_ready(true);

        log::info!(
            "Pan/zoom initialized ({:?} mode, {}x{} canvas)",
            options.mode,
            size.width,
            size.height
        );

        Ok(Self {
            surface,
            options,
            interaction: Interaction::Idle,
            original_view_box: Some(original_view_box),
            created_viewport,
            stroke_factor: 1.0,
        })
    }

    /// Restore the surface to its state before `initialize` and return it.
    pub fn teardown(mut self) -> ZoomPanResult<S> {
        if self.created_viewport {
            self.surface.remove_viewport()?;
        }
        if let Some(view_box) = self.original_view_box {
            if self.options.mode == ViewMode::ViewBox {
                self.surface.set_view_box(view_box);
            }
        }
        if self.stroke_factor != 1.0 {
            self.surface.scale_stroke_widths(1.0 / self.stroke_factor);
        }
        self.surface.set_ready(false);
        log::info!("Pan/zoom torn down");
        Ok(self.surface)
    }

    /// Release the surface without restoring it; it stays initialized.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn options(&self) -> &ZoomPanOptions {
        &self.options
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.interaction, Interaction::Panning { .. })
    }

    /// Current view state read back from the surface.
    pub fn view_state(&self) -> ViewState {
        match self.options.mode {
            ViewMode::Transform => ViewState::Transform(self.surface.viewport_transform()),
            ViewMode::ViewBox => ViewState::ViewBox(
                self.surface
                    .view_box()
                    .unwrap_or_else(|| ViewBox::for_canvas(self.surface.size())),
            ),
        }
    }

    fn apply(&mut self, state: ViewState) {
        match state {
            ViewState::Transform(transform) => {
                log::trace!("Viewport transform:\n{}", describe_matrix(transform));
                self.surface.set_viewport_transform(transform);
            }
            ViewState::ViewBox(view_box) => {
                log::trace!("View box: {}", view_box.to_attribute());
                self.surface.set_view_box(Some(view_box));
            }
        }
    }

    /// Dispatch any input event to its handler.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::Pointer(PointerEvent::Down { position, target }) => {
                self.on_pointer_down(position, target)
            }
            InputEvent::Pointer(PointerEvent::Move { position }) => self.on_pointer_move(position),
            InputEvent::Pointer(PointerEvent::Up { position }) => self.on_pointer_up(position),
            InputEvent::Pointer(PointerEvent::Leave { position }) => {
                self.on_pointer_leave(position)
            }
            InputEvent::Wheel(WheelInput { position, raw }) => self.on_wheel(position, &raw),
        }
    }

    /// Start panning when the press lands on the canvas background.
    pub fn on_pointer_down(&mut self, position: Point, target: PointerTarget) -> EventResponse {
        if !self.options.pan || target != PointerTarget::Canvas {
            return EventResponse::CONSUMED;
        }
        let start = self.view_state();
        let origin = start.screen_to_view(position, self.surface.size());
        log::debug!("Pan started at ({}, {})", origin.x, origin.y);
        self.interaction = Interaction::Panning { origin, start };
        EventResponse::CONSUMED
    }

    pub fn on_pointer_move(&mut self, position: Point) -> EventResponse {
        if self.pan_to(position) {
            EventResponse::UPDATED
        } else {
            EventResponse::CONSUMED
        }
    }

    /// Commit the pan at the release position and go idle.
    pub fn on_pointer_up(&mut self, position: Point) -> EventResponse {
        let changed = self.pan_to(position);
        if changed {
            log::debug!("Pan ended");
        }
        self.interaction = Interaction::Idle;
        if changed {
            EventResponse::UPDATED
        } else {
            EventResponse::CONSUMED
        }
    }

    /// Ends the pan only when `stop_pan_on_mouse_out` is set.
    pub fn on_pointer_leave(&mut self, position: Point) -> EventResponse {
        if !self.options.stop_pan_on_mouse_out {
            return EventResponse::IGNORED;
        }
        self.on_pointer_up(position)
    }

    /// Move the view so the pan origin sits under `position`.
    fn pan_to(&mut self, position: Point) -> bool {
        let Interaction::Panning { origin, start } = self.interaction else {
            return false;
        };
        let current = start.screen_to_view(position, self.surface.size());
        let delta: Vec2 = current - origin;
        let panned = match start {
            ViewState::Transform(transform) => {
                ViewState::Transform(transform * Affine::translate(delta))
            }
            ViewState::ViewBox(view_box) => ViewState::ViewBox(ViewBox {
                x: view_box.x - delta.x,
                y: view_box.y - delta.y,
                ..view_box
            }),
        };
        self.apply(panned);
        true
    }

    /// Zoom about the pointer by the normalized wheel delta.
    pub fn on_wheel(&mut self, position: Point, raw: &RawWheel) -> EventResponse {
        if !self.options.zoom {
            return EventResponse::IGNORED;
        }
        let delta = self.options.wheel_convention.normalize(raw)
            * self.options.mouse_wheel_sensitivity;
        if delta == 0.0 || !delta.is_finite() {
            return EventResponse::CONSUMED;
        }

        let size = self.surface.size();
        let (zoomed, ratio) = match self.view_state() {
            ViewState::Transform(transform) => {
                let z = zoom_factor(delta);
                let anchor = (transform.inverse() * position).to_vec2();
                let scale_about =
                    Affine::translate(anchor) * Affine::scale(z) * Affine::translate(-anchor);
                (ViewState::Transform(transform * scale_about), z)
            }
            ViewState::ViewBox(view_box) => {
                // The width steps by one aspect ratio per notch.
                let aspect = size.width / size.height;
                let new_width = view_box.width - aspect * delta / NOTCH_DELTA;
                if !(new_width > 0.0 && new_width.is_finite()) {
                    log::warn!("Ignoring zoom to view box width {new_width}");
                    return EventResponse::CONSUMED;
                }
                let resized = view_box.resized_about(position, size, new_width);
                (
                    ViewState::ViewBox(resized),
                    view_box.pixel_scale(size) / resized.pixel_scale(size),
                )
            }
        };
        self.apply(zoomed);
        log::debug!("Zoomed by {ratio} at ({}, {})", position.x, position.y);

        if self.options.scale_stroke_width {
            self.surface.scale_stroke_widths(1.0 / ratio);
            self.stroke_factor /= ratio;
        }

        // Keep an active pan anchored to the zoomed view.
        if self.is_panning() {
            self.interaction = Interaction::Panning {
                origin: zoomed.screen_to_view(position, size),
                start: zoomed,
            };
        }
        EventResponse::UPDATED
    }
}

use egui::Pos2;

mod translate;
pub use translate::{InputTranslator, covered_by_other_layer};

/// Device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A single finger on a touch surface, in client (screen) coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    pub id: u64,
    pub client: Pos2,
}

/// Pointer data as the host delivers it, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawPointer {
    Mouse { client: Pos2 },
    /// Contacts in the order they touched down
    Touch { contacts: Vec<TouchContact> },
}

impl RawPointer {
    pub fn source(&self) -> PointerSource {
        match self {
            Self::Mouse { .. } => PointerSource::Mouse,
            Self::Touch { .. } => PointerSource::Touch,
        }
    }

    /// Client position of the pointer; only the first touch contact counts
    pub fn client_position(&self) -> Option<Pos2> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { contacts } => contacts.first().map(|contact| contact.client),
        }
    }
}

/// A pointer position in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Pos2,
    pub source: PointerSource,
}

/// Represents the pointer events the canvas reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pressed over the canvas
    PointerDown(RawPointer),
    /// Moved over the canvas, with or without a button held
    PointerMove(RawPointer),
    /// Released anywhere in the viewport
    PointerUp,
    /// Entered the canvas area
    PointerEnter,
    /// Left the canvas area
    PointerLeave,
}

/// Whether the host should still run its default handling of the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// Suppress scrolling and text selection
    PreventDefault,
}

/// Converts a client position into coordinates relative to the canvas origin
pub fn to_canvas_local(client: Pos2, canvas_origin: Pos2) -> Pos2 {
    Pos2::ZERO + (client - canvas_origin)
}

/// Normalizes raw pointer data; touch events without contacts yield `None`
pub fn normalize(raw: &RawPointer, canvas_origin: Pos2) -> Option<PointerSample> {
    let client = raw.client_position()?;
    Some(PointerSample {
        position: to_canvas_local(client, canvas_origin),
        source: raw.source(),
    })
}

/// Hooks a drawing target implements to receive pointer input.
///
/// `on_pointer_up` is delivered for releases anywhere in the viewport, not
/// only over the canvas.
pub trait PointerHandler {
    fn on_pointer_down(&mut self, sample: PointerSample);

    fn on_pointer_move(&mut self, sample: PointerSample);

    fn on_pointer_up(&mut self);

    fn on_pointer_enter(&mut self) {}

    fn on_pointer_leave(&mut self) {}
}

/// Normalizes `event` and forwards it to the matching hook.
///
/// Touch presses and moves, and mouse presses, ask the host to suppress its
/// default behavior.
pub fn dispatch<H: PointerHandler + ?Sized>(
    handler: &mut H,
    event: &InputEvent,
    canvas_origin: Pos2,
) -> Propagation {
    match event {
        InputEvent::PointerDown(raw) => {
            let Some(sample) = normalize(raw, canvas_origin) else {
                return Propagation::Continue;
            };
            handler.on_pointer_down(sample);
            Propagation::PreventDefault
        }
        InputEvent::PointerMove(raw) => {
            let Some(sample) = normalize(raw, canvas_origin) else {
                return Propagation::Continue;
            };
            handler.on_pointer_move(sample);
            match sample.source {
                PointerSource::Touch => Propagation::PreventDefault,
                PointerSource::Mouse => Propagation::Continue,
            }
        }
        InputEvent::PointerUp => {
            handler.on_pointer_up();
            Propagation::Continue
        }
        InputEvent::PointerEnter => {
            handler.on_pointer_enter();
            Propagation::Continue
        }
        InputEvent::PointerLeave => {
            handler.on_pointer_leave();
            Propagation::Continue
        }
    }
}

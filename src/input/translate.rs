use egui::{Context, Event, LayerId, PointerButton, Pos2, Rect, TouchPhase};

use super::{InputEvent, RawPointer, TouchContact};

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    contact: TouchContact,
    /// Touches keep reporting to the canvas only if they started on it
    started_on_canvas: bool,
}

/// Hit test for positions hidden behind another egui layer, such as the
/// color picker popup.
///
/// The canvas itself lives on `canvas_layer`; an uncovered background has no
/// layer at all.
pub fn covered_by_other_layer(
    ctx: &Context,
    canvas_layer: LayerId,
) -> impl Fn(Pos2) -> bool + '_ {
    move |pos| ctx.layer_id_at(pos).is_some_and(|layer| layer != canvas_layer)
}

/// Handles converting raw egui input into canvas `InputEvent`s.
///
/// Presses and moves are only reported over the visible part of the canvas;
/// releases are reported wherever they happen so a stroke can never get stuck.
#[derive(Debug, Default)]
pub struct InputTranslator {
    hovering: bool,
    touches: Vec<TrackedTouch>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the mouse is currently over the canvas
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Process one frame of egui events for a canvas occupying `canvas`.
    ///
    /// Positions for which `covered` is true belong to whatever is drawn on
    /// top of the canvas and are treated as off-canvas.
    pub fn translate(
        &mut self,
        events: &[Event],
        canvas: Rect,
        covered: impl Fn(Pos2) -> bool,
    ) -> Vec<InputEvent> {
        let mut out = Vec::new();
        let on_canvas = |pos: Pos2| canvas.contains(pos) && !covered(pos);

        // Some hosts also emulate pointer events for touches; skip those
        let touch_frame = events.iter().any(|event| matches!(event, Event::Touch { .. }));

        for event in events {
            match event {
                Event::Touch { id, phase, pos, .. } => {
                    self.translate_touch(id.0, *phase, *pos, on_canvas(*pos), &mut out);
                }
                Event::PointerMoved(pos) if !touch_frame => {
                    let inside = on_canvas(*pos);
                    self.track_hover(inside, &mut out);
                    if inside {
                        out.push(InputEvent::PointerMove(RawPointer::Mouse { client: *pos }));
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if !touch_frame => {
                    if !*pressed {
                        out.push(InputEvent::PointerUp);
                    } else if on_canvas(*pos) {
                        out.push(InputEvent::PointerDown(RawPointer::Mouse { client: *pos }));
                    }
                }
                Event::PointerGone if !touch_frame => {
                    if self.hovering {
                        self.hovering = false;
                        out.push(InputEvent::PointerLeave);
                    }
                }
                _ => {}
            }
        }

        out
    }

    fn track_hover(&mut self, inside: bool, out: &mut Vec<InputEvent>) {
        if inside != self.hovering {
            self.hovering = inside;
            out.push(if inside {
                InputEvent::PointerEnter
            } else {
                InputEvent::PointerLeave
            });
        }
    }

    fn translate_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        pos: Pos2,
        on_canvas: bool,
        out: &mut Vec<InputEvent>,
    ) {
        match phase {
            TouchPhase::Start => {
                let started_on_canvas = on_canvas;
                self.touches.retain(|touch| touch.contact.id != id);
                self.touches.push(TrackedTouch {
                    contact: TouchContact { id, client: pos },
                    started_on_canvas,
                });
                if started_on_canvas {
                    out.push(InputEvent::PointerDown(self.raw_touch()));
                }
            }
            TouchPhase::Move => {
                let Some(touch) = self.touches.iter_mut().find(|t| t.contact.id == id) else {
                    return;
                };
                touch.contact.client = pos;
                if touch.started_on_canvas {
                    out.push(InputEvent::PointerMove(self.raw_touch()));
                }
            }
            TouchPhase::End | TouchPhase::Cancel => {
                self.touches.retain(|touch| touch.contact.id != id);
                out.push(InputEvent::PointerUp);
            }
        }
    }

    fn raw_touch(&self) -> RawPointer {
        RawPointer::Touch {
            contacts: self.touches.iter().map(|touch| touch.contact).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, TouchId, pos2, vec2};

    fn canvas() -> Rect {
        Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 100.0))
    }

    fn uncovered(_: Pos2) -> bool {
        false
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    fn touch(id: u64, phase: TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut translator = InputTranslator::new();
        let events = [
            Event::PointerMoved(pos2(10.0, 10.0)),
            Event::PointerMoved(pos2(150.0, 60.0)),
            Event::PointerMoved(pos2(160.0, 60.0)),
            Event::PointerMoved(pos2(500.0, 60.0)),
        ];
        let out = translator.translate(&events, canvas(), uncovered);
        assert_eq!(
            out,
            vec![
                InputEvent::PointerEnter,
                InputEvent::PointerMove(RawPointer::Mouse { client: pos2(150.0, 60.0) }),
                InputEvent::PointerMove(RawPointer::Mouse { client: pos2(160.0, 60.0) }),
                InputEvent::PointerLeave,
            ]
        );
        assert!(!translator.is_hovering());
    }

    #[test]
    fn test_pointer_gone_hides() {
        let mut translator = InputTranslator::new();
        translator.translate(&[Event::PointerMoved(pos2(150.0, 60.0))], canvas(), uncovered);
        assert!(translator.is_hovering());
        let out = translator.translate(&[Event::PointerGone], canvas(), uncovered);
        assert_eq!(out, vec![InputEvent::PointerLeave]);
    }

    #[test]
    fn test_press_only_on_canvas_release_anywhere() {
        let mut translator = InputTranslator::new();
        let out = translator.translate(
            &[
                button(pos2(10.0, 10.0), true),
                button(pos2(150.0, 60.0), true),
                button(pos2(900.0, 900.0), false),
            ],
            canvas(),
            uncovered,
        );
        assert_eq!(
            out,
            vec![
                InputEvent::PointerDown(RawPointer::Mouse { client: pos2(150.0, 60.0) }),
                InputEvent::PointerUp,
            ]
        );
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut translator = InputTranslator::new();
        let out = translator.translate(
            &[Event::PointerButton {
                pos: pos2(150.0, 60.0),
                button: PointerButton::Secondary,
                pressed: true,
                modifiers: Modifiers::default(),
            }],
            canvas(),
            uncovered,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_touch_sequence() {
        let mut translator = InputTranslator::new();
        let out = translator.translate(
            &[
                touch(1, TouchPhase::Start, pos2(120.0, 70.0)),
                // Emulated pointer events in the same frame are skipped
                button(pos2(120.0, 70.0), true),
                touch(2, TouchPhase::Start, pos2(10.0, 10.0)),
                touch(1, TouchPhase::Move, pos2(400.0, 70.0)),
                touch(2, TouchPhase::Move, pos2(20.0, 20.0)),
                touch(1, TouchPhase::End, pos2(400.0, 70.0)),
            ],
            canvas(),
            uncovered,
        );

        assert_eq!(out.len(), 3);
        assert_eq!(
            out[0],
            InputEvent::PointerDown(RawPointer::Touch {
                contacts: vec![TouchContact { id: 1, client: pos2(120.0, 70.0) }],
            })
        );
        // The first contact leads even after leaving the canvas
        match &out[1] {
            InputEvent::PointerMove(raw) => {
                assert_eq!(raw.client_position(), Some(pos2(400.0, 70.0)));
            }
            other => panic!("expected a move, got {other:?}"),
        }
        assert_eq!(out[2], InputEvent::PointerUp);
    }

    #[test]
    fn test_covered_part_of_canvas_is_off_canvas() {
        // Something drawn over the left half of the canvas
        let covered = |pos: Pos2| pos.x < 200.0;
        let mut translator = InputTranslator::new();
        let out = translator.translate(
            &[
                Event::PointerMoved(pos2(150.0, 60.0)),
                button(pos2(150.0, 60.0), true),
            ],
            canvas(),
            covered,
        );
        assert!(out.is_empty());
        assert!(!translator.is_hovering());

        let out = translator.translate(
            &[
                touch(1, TouchPhase::Start, pos2(150.0, 60.0)),
                touch(1, TouchPhase::Move, pos2(250.0, 60.0)),
            ],
            canvas(),
            covered,
        );
        assert!(out.is_empty());

        let out = translator.translate(
            &[
                Event::PointerMoved(pos2(250.0, 60.0)),
                Event::PointerMoved(pos2(150.0, 60.0)),
                button(pos2(900.0, 900.0), false),
            ],
            canvas(),
            covered,
        );
        assert_eq!(
            out,
            vec![
                InputEvent::PointerEnter,
                InputEvent::PointerMove(RawPointer::Mouse { client: pos2(250.0, 60.0) }),
                InputEvent::PointerLeave,
                InputEvent::PointerUp,
            ]
        );
    }
}

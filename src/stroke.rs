use egui::Pos2;

use crate::surface::Surface;

/// An open pointer-down-to-pointer-up drawing session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSession {
    pub last_point: Pos2,
}

/// Turns a stream of canvas-local points into committed segments.
///
/// Every `extend` strokes its segment right away, using whatever context
/// settings the surface has at that moment.
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    session: Option<StrokeSession>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a new path anchored at `point`, abandoning any previous session
    pub fn begin(&mut self, surface: &mut Surface, point: Pos2) {
        surface.begin_path();
        surface.move_to(point);
        self.session = Some(StrokeSession { last_point: point });
        log::debug!("Stroke started at ({:.1}, {:.1})", point.x, point.y);
    }

    /// Commits a segment from the last point to `point`.
    ///
    /// Returns false without touching the surface when no session is open.
    pub fn extend(&mut self, surface: &mut Surface, point: Pos2) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        surface.line_to(point);
        surface.stroke();
        session.last_point = point;
        true
    }

    /// Closes the session; returns false if none was open
    pub fn end(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!(
                    "Stroke ended at ({:.1}, {:.1})",
                    session.last_point.x,
                    session.last_point.y
                );
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LineCap;
    use egui::pos2;

    fn surface() -> Surface {
        let mut surface = Surface::new(64, 64);
        surface.set_line_cap(LineCap::Round);
        surface.set_line_width(4.0);
        surface
    }

    #[test]
    fn test_extend_without_session_is_a_no_op() {
        let mut surface = surface();
        let mut renderer = StrokeRenderer::new();
        let version = surface.version();

        assert!(!renderer.extend(&mut surface, pos2(10.0, 10.0)));
        assert_eq!(surface.version(), version);
        assert!(surface.raster().pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut surface = surface();
        let mut renderer = StrokeRenderer::new();

        renderer.begin(&mut surface, pos2(5.0, 5.0));
        assert_eq!(renderer.session().unwrap().last_point, pos2(5.0, 5.0));

        assert!(renderer.extend(&mut surface, pos2(20.0, 5.0)));
        assert_eq!(renderer.session().unwrap().last_point, pos2(20.0, 5.0));
        assert_eq!(surface.pixel(12, 5).unwrap()[3], 255);

        assert!(renderer.end());
        assert!(!renderer.is_drawing());
        assert!(!renderer.extend(&mut surface, pos2(40.0, 40.0)));
        assert_eq!(surface.pixel(40, 40).unwrap()[3], 0);
    }

    #[test]
    fn test_end_without_begin() {
        let mut renderer = StrokeRenderer::new();
        assert!(!renderer.end());
        assert!(renderer.session().is_none());
    }

    #[test]
    fn test_begin_again_restarts_the_path() {
        let mut surface = surface();
        let mut renderer = StrokeRenderer::new();

        renderer.begin(&mut surface, pos2(5.0, 5.0));
        renderer.begin(&mut surface, pos2(5.0, 40.0));
        renderer.extend(&mut surface, pos2(20.0, 40.0));

        // Nothing connects the abandoned anchor with the new one
        assert_eq!(surface.pixel(5, 20).unwrap()[3], 0);
        assert_eq!(surface.pixel(12, 40).unwrap()[3], 255);
    }
}

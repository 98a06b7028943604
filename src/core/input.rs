use super::config::InputConfig;

/// Touch phases as reported by the platform input system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Events crossing the engine boundary, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down,
    Up,
    Move { x: i32, y: i32 },
    Axis { dx: f32, dy: f32 },
}

/// Maps surface pixels into the coordinate space the engine asked for.
#[derive(Debug, Clone)]
pub struct CursorMapper {
    virtual_size: Option<(i32, i32)>,
    flip_y: bool,
    sensitivity: f32,
    surface_size: (i32, i32),
    previous: Option<(f64, f64)>,
}

impl CursorMapper {
    pub fn new(config: &InputConfig) -> Self {
        let virtual_size = (config.virtual_width > 0 && config.virtual_height > 0)
            .then_some((config.virtual_width, config.virtual_height));
        Self {
            virtual_size,
            flip_y: config.flip_y,
            sensitivity: config.axis_sensitivity,
            surface_size: (0, 0),
            previous: None,
        }
    }

    pub fn set_surface_size(&mut self, width: i32, height: i32) {
        self.surface_size = (width, height);
    }

    /// The size mapped coordinates live in.
    pub fn target_size(&self) -> (i32, i32) {
        self.virtual_size.unwrap_or(self.surface_size)
    }

    /// Forget the previous position, so the next move reports no motion.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Map a surface position and return it with the motion since the previous call.
    pub fn map(&mut self, x: f64, y: f64) -> ((f64, f64), (f32, f32)) {
        let (target_w, target_h) = self.target_size();
        let (mut mx, mut my) = (x, y);
        if let Some((vw, vh)) = self.virtual_size {
            let (sw, sh) = self.surface_size;
            if sw > 0 && sh > 0 {
                mx = x * vw as f64 / sw as f64;
                my = y * vh as f64 / sh as f64;
            }
        }
        // Motion follows the screen direction even when the position is flipped
        let screen_y = my;
        if self.flip_y && target_h > 0 {
            my = (target_h - 1) as f64 - my;
        }

        // The larger side keeps the speed identical along both axes
        let span = target_w.max(target_h) as f64;
        let delta = match self.previous {
            Some((px, py)) if span > 0.0 => {
                let scale = self.sensitivity as f64 / span;
                (((mx - px) * scale) as f32, ((screen_y - py) * scale) as f32)
            }
            _ => (0.0, 0.0),
        };
        self.previous = Some((mx, screen_y));
        ((mx, my), delta)
    }
}

/// Turns platform touches into the engine's single-pointer protocol.
///
/// Only the first finger down is tracked until it lifts; other fingers are ignored.
/// A press or release is always preceded by a move to where it happened.
#[derive(Debug, Clone)]
pub struct TouchForwarder {
    primary: Option<u64>,
    mapper: CursorMapper,
}

impl TouchForwarder {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            primary: None,
            mapper: CursorMapper::new(config),
        }
    }

    pub fn set_surface_size(&mut self, width: i32, height: i32) {
        self.mapper.set_surface_size(width, height);
    }

    pub fn forward(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> Vec<PointerEvent> {
        match phase {
            TouchPhase::Down => {
                if self.primary.is_some() {
                    return vec![];
                }
                self.primary = Some(id);
                self.mapper.reset();
                let (position, _) = self.mapper.map(x, y);
                vec![Self::move_to(position), PointerEvent::Down]
            }
            TouchPhase::Move => {
                if self.primary != Some(id) {
                    return vec![];
                }
                let (position, (dx, dy)) = self.mapper.map(x, y);
                let mut events = vec![Self::move_to(position)];
                if dx != 0.0 || dy != 0.0 {
                    events.push(PointerEvent::Axis { dx, dy });
                }
                events
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                if self.primary != Some(id) {
                    return vec![];
                }
                self.primary = None;
                let (position, _) = self.mapper.map(x, y);
                vec![Self::move_to(position), PointerEvent::Up]
            }
        }
    }

    fn move_to((x, y): (f64, f64)) -> PointerEvent {
        PointerEvent::Move {
            x: x as i32,
            y: y as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passthrough() -> TouchForwarder {
        let mut forwarder = TouchForwarder::new(&InputConfig::default());
        forwarder.set_surface_size(800, 480);
        forwarder
    }

    #[test]
    fn down_is_preceded_by_a_move() {
        let mut forwarder = passthrough();
        assert_eq!(
            forwarder.forward(0, TouchPhase::Down, 10.7, 20.2),
            vec![PointerEvent::Move { x: 10, y: 20 }, PointerEvent::Down]
        );
    }

    #[test]
    fn up_is_preceded_by_a_move() {
        let mut forwarder = passthrough();
        forwarder.forward(0, TouchPhase::Down, 10.0, 20.0);
        assert_eq!(
            forwarder.forward(0, TouchPhase::Up, 30.0, 40.0),
            vec![PointerEvent::Move { x: 30, y: 40 }, PointerEvent::Up]
        );
    }

    #[test]
    fn moves_carry_relative_motion() {
        let mut forwarder = passthrough();
        forwarder.forward(0, TouchPhase::Down, 0.0, 0.0);
        let events = forwarder.forward(0, TouchPhase::Move, 80.0, 40.0);
        assert_eq!(events[0], PointerEvent::Move { x: 80, y: 40 });
        // 800 is the larger side, sensitivity 100
        assert_eq!(events[1], PointerEvent::Axis { dx: 10.0, dy: 5.0 });
    }

    #[test]
    fn still_moves_report_no_axis() {
        let mut forwarder = passthrough();
        forwarder.forward(0, TouchPhase::Down, 5.0, 5.0);
        assert_eq!(
            forwarder.forward(0, TouchPhase::Move, 5.0, 5.0),
            vec![PointerEvent::Move { x: 5, y: 5 }]
        );
    }

    #[test]
    fn secondary_fingers_are_ignored() {
        let mut forwarder = passthrough();
        forwarder.forward(1, TouchPhase::Down, 0.0, 0.0);
        assert!(forwarder.forward(2, TouchPhase::Down, 50.0, 50.0).is_empty());
        assert!(forwarder.forward(2, TouchPhase::Move, 60.0, 60.0).is_empty());
        assert!(forwarder.forward(2, TouchPhase::Up, 60.0, 60.0).is_empty());
        assert_eq!(
            forwarder.forward(1, TouchPhase::Up, 1.0, 1.0).last(),
            Some(&PointerEvent::Up)
        );
        // Once the primary lifted, any finger can take over
        assert_eq!(
            forwarder.forward(2, TouchPhase::Down, 3.0, 3.0).last(),
            Some(&PointerEvent::Down)
        );
    }

    #[test]
    fn cancel_releases_the_pointer() {
        let mut forwarder = passthrough();
        forwarder.forward(0, TouchPhase::Down, 0.0, 0.0);
        assert_eq!(
            forwarder.forward(0, TouchPhase::Cancel, 2.0, 3.0),
            vec![PointerEvent::Move { x: 2, y: 3 }, PointerEvent::Up]
        );
        assert!(forwarder.forward(0, TouchPhase::Move, 4.0, 4.0).is_empty());
    }

    #[test]
    fn mapper_scales_into_the_virtual_resolution_and_flips() {
        let mut mapper = CursorMapper::new(&InputConfig {
            virtual_width: 400,
            virtual_height: 240,
            flip_y: true,
            axis_sensitivity: 100.0,
        });
        mapper.set_surface_size(800, 480);
        let ((x, y), delta) = mapper.map(200.0, 0.0);
        assert_eq!((x, y), (100.0, 239.0));
        assert_eq!(delta, (0.0, 0.0));

        let (_, (dx, dy)) = mapper.map(280.0, 96.0);
        assert_eq!(dx, 10.0);
        assert_eq!(dy, 12.0);
    }

    #[test]
    fn flipped_motion_follows_the_finger_on_screen() {
        let config = InputConfig {
            virtual_width: 400,
            virtual_height: 240,
            flip_y: true,
            axis_sensitivity: 100.0,
        };
        let mut forwarder = TouchForwarder::new(&config);
        forwarder.set_surface_size(800, 480);
        forwarder.forward(0, TouchPhase::Down, 400.0, 100.0);

        // 96px down the screen is 48 virtual pixels, up in flipped coordinates
        let events = forwarder.forward(0, TouchPhase::Move, 400.0, 196.0);
        assert_eq!(events[0], PointerEvent::Move { x: 200, y: 141 });
        assert_eq!(events[1], PointerEvent::Axis { dx: 0.0, dy: 12.0 });
    }

    #[test]
    fn mapper_without_surface_size_reports_no_motion() {
        let mut mapper = CursorMapper::new(&InputConfig::default());
        mapper.map(0.0, 0.0);
        let (position, delta) = mapper.map(10.0, 10.0);
        assert_eq!(position, (10.0, 10.0));
        assert_eq!(delta, (0.0, 0.0));
    }
}

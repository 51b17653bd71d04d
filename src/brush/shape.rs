//! Soft circular brush with a flat core and linear falloff.

/// Radial strength profile used by the paint engine.
///
/// Implemented by [`Brush`]; tools with a different profile can pass their
/// own shape, for example a [`CustomBrush`] wrapping a closure.
pub trait BrushShape {
    /// Distance beyond which the brush has no effect.
    fn radius(&self) -> f32;

    /// Strength multiplier in `[0, 1]` at `dist` from the brush center.
    fn falloff(&self, dist: f32) -> f32;
}

/// Brush with a hardness-controlled inner zone.
///
/// Inside `hardness * radius` the brush applies full strength, then fades
/// linearly to zero at `radius`.
///
/// # Example
///
/// ```
/// use bevy_terrain_layers::brush::{Brush, BrushShape};
///
/// let brush = Brush::new(10.0, 0.5);
/// assert_eq!(brush.falloff(4.0), 1.0);
/// assert_eq!(brush.falloff(7.5), 0.5);
/// assert_eq!(brush.falloff(12.0), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    radius: f32,
    hardness: f32,
    inner_radius: f32,
    outer_radius: f32,
    pub(super) dirty: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(15.0, 0.5)
    }
}

impl Brush {
    /// Radius and hardness are taken as given; callers clamp them.
    pub fn new(radius: f32, hardness: f32) -> Self {
        let mut brush = Self {
            radius,
            hardness,
            inner_radius: 0.0,
            outer_radius: 0.0,
            dirty: true,
        };
        brush.update_zones();
        brush
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.update_zones();
    }

    pub fn set_hardness(&mut self, hardness: f32) {
        self.hardness = hardness;
        self.update_zones();
    }

    pub fn hardness(&self) -> f32 {
        self.hardness
    }

    /// Radius of the full-strength core.
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// Width of the fading ring.
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// True until the preview kernel is regenerated after a change.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn update_zones(&mut self) {
        self.inner_radius = self.hardness * self.radius;
        self.outer_radius = self.radius - self.inner_radius;
        self.dirty = true;
    }
}

impl BrushShape for Brush {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn falloff(&self, dist: f32) -> f32 {
        if dist <= self.inner_radius {
            1.0
        } else if dist >= self.radius {
            0.0
        } else {
            1.0 - (dist - self.inner_radius) / self.outer_radius
        }
    }
}

/// Brush shape backed by a closure.
///
/// # Example
///
/// ```
/// use bevy_terrain_layers::brush::{BrushShape, CustomBrush};
///
/// let quadratic = CustomBrush::new(8.0, |dist: f32| (1.0 - dist / 8.0).max(0.0).powi(2));
/// assert_eq!(quadratic.falloff(0.0), 1.0);
/// assert_eq!(quadratic.falloff(4.0), 0.25);
/// ```
#[derive(Clone, Debug)]
pub struct CustomBrush<F> {
    radius: f32,
    falloff: F,
}

impl<F: Fn(f32) -> f32> CustomBrush<F> {
    pub fn new(radius: f32, falloff: F) -> Self {
        Self { radius, falloff }
    }
}

impl<F: Fn(f32) -> f32> BrushShape for CustomBrush<F> {
    fn radius(&self) -> f32 {
        self.radius
    }

    fn falloff(&self, dist: f32) -> f32 {
        if dist > self.radius {
            return 0.0;
        }
        (self.falloff)(dist).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = Brush::default();
        assert_eq!(brush.radius(), 15.0);
        assert_eq!(brush.inner_radius(), 7.5);
        assert_eq!(brush.outer_radius(), 7.5);
        assert!(brush.is_dirty());
    }

    #[test]
    fn test_setters_recompute_zones() {
        let mut brush = Brush::new(10.0, 0.5);
        brush.dirty = false;

        brush.set_radius(20.0);
        assert_eq!(brush.inner_radius(), 10.0);
        assert!(brush.is_dirty());

        brush.dirty = false;
        brush.set_hardness(0.25);
        assert_eq!(brush.inner_radius(), 5.0);
        assert_eq!(brush.outer_radius(), 15.0);
        assert!(brush.is_dirty());
    }

    #[test]
    fn test_falloff_zones() {
        let brush = Brush::new(10.0, 0.5);
        assert_eq!(brush.falloff(0.0), 1.0);
        assert_eq!(brush.falloff(5.0), 1.0);
        assert!((brush.falloff(6.0) - 0.8).abs() < 1e-6);
        assert_eq!(brush.falloff(10.0), 0.0);
        assert_eq!(brush.falloff(50.0), 0.0);
    }

    #[test]
    fn test_falloff_monotonic() {
        let brush = Brush::new(12.0, 0.3);
        let mut last = 1.0;
        for step in 0..=130 {
            let value = brush.falloff(step as f32 * 0.1);
            assert!(value <= last);
            last = value;
        }
    }

    #[test]
    fn test_hard_brush_has_no_ring() {
        let brush = Brush::new(4.0, 1.0);
        assert_eq!(brush.falloff(4.0), 1.0);
        assert_eq!(brush.falloff(4.01), 0.0);
    }

    #[test]
    fn test_custom_brush_clamps() {
        let brush = CustomBrush::new(5.0, |_| 3.0);
        assert_eq!(brush.falloff(1.0), 1.0);
        assert_eq!(brush.falloff(6.0), 0.0);
    }
}

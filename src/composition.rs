use raylib::prelude::*;
use crate::constants::*;
use crate::visual::Element;

/// Read-only geometry queries the activator needs to frame a target.
pub trait Stage {
    /// Bounds of the camera box the composition is drawn into.
    fn camera_bounds(&self) -> Rectangle;
    /// Bounds of a named anchor inside the camera box, if it exists.
    fn anchor_bounds(&self, id: &str) -> Option<Rectangle>;
}

pub struct Anchor {
    pub id: &'static str,
    pub bounds: Rectangle,
}

/// The fixed photosynthesis illustration, in world units.
pub struct Composition {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub sun: Vector2,
    pub sun_radius: f32,
    pub stem_base: Vector2,
    pub stem_top: Vector2,
    anchors: Vec<Anchor>,
}

impl Composition {
    pub fn new() -> Self {
        let width = RENDER_WIDTH as f32;
        let height = RENDER_HEIGHT as f32;

        let anchors = vec![
            Anchor { id: "t-leaf",        bounds: Rectangle::new(760.0, 440.0, 330.0, 130.0) },
            Anchor { id: "t-stomata",     bounds: Rectangle::new(975.0, 535.0, 50.0, 30.0) },
            Anchor { id: "t-roots",       bounds: Rectangle::new(700.0, 900.0, 260.0, 150.0) },
            Anchor { id: "t-chloroplast", bounds: Rectangle::new(880.0, 480.0, 60.0, 36.0) },
        ];

        Self {
            width,
            height,
            ground_y: 900.0,
            sun: Vector2::new(1560.0, 190.0),
            sun_radius: 110.0,
            stem_base: Vector2::new(830.0, 900.0),
            stem_top: Vector2::new(830.0, 500.0),
            anchors,
        }
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Resting position of an icon or label in the world.
    pub fn position(&self, element: Element) -> Vector2 {
        match element {
            Element::Sun => self.sun,
            Element::LightBeams => self.sun,
            Element::Micro => Vector2::new(1380.0, 560.0),
            Element::Co2 => Vector2::new(260.0, 470.0),
            Element::H2o => Vector2::new(560.0, 980.0),
            Element::O2 => Vector2::new(1300.0, 420.0),
            Element::Glucose => Vector2::new(1180.0, 760.0),
            Element::LabelLight => Vector2::new(1180.0, 300.0),
            Element::LabelCo2 => Vector2::new(200.0, 540.0),
            Element::LabelH2o => Vector2::new(500.0, 1040.0),
            Element::LabelO2 => Vector2::new(1250.0, 490.0),
            Element::LabelGlucose => Vector2::new(1110.0, 830.0),
        }
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Composition {
    fn camera_bounds(&self) -> Rectangle {
        Rectangle::new(0.0, 0.0, self.width, self.height)
    }

    fn anchor_bounds(&self, id: &str) -> Option<Rectangle> {
        self.anchors.iter().find(|a| a.id == id).map(|a| a.bounds)
    }
}

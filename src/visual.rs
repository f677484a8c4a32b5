//! Discrete state-sets: which narrative elements are visible for a given mode.
//!
//! Applying a mode always starts from [`VisualState::hidden`] so nothing from a
//! previous scene can leak into the next one.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualMode {
    Intro,
    Light,
    Leaf,
    Co2,
    H2o,
    Micro,
    Outputs,
    Bilan,
}

impl VisualMode {
    pub const ALL: [VisualMode; 8] = [
        VisualMode::Intro,
        VisualMode::Light,
        VisualMode::Leaf,
        VisualMode::Co2,
        VisualMode::H2o,
        VisualMode::Micro,
        VisualMode::Outputs,
        VisualMode::Bilan,
    ];

    pub fn parse(name: &str) -> Option<VisualMode> {
        match name.trim().to_ascii_lowercase().as_str() {
            "intro" => Some(VisualMode::Intro),
            "light" => Some(VisualMode::Light),
            "leaf" => Some(VisualMode::Leaf),
            "co2" => Some(VisualMode::Co2),
            "h2o" => Some(VisualMode::H2o),
            "micro" => Some(VisualMode::Micro),
            "outputs" => Some(VisualMode::Outputs),
            "bilan" => Some(VisualMode::Bilan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VisualMode::Intro => "intro",
            VisualMode::Light => "light",
            VisualMode::Leaf => "leaf",
            VisualMode::Co2 => "co2",
            VisualMode::H2o => "h2o",
            VisualMode::Micro => "micro",
            VisualMode::Outputs => "outputs",
            VisualMode::Bilan => "bilan",
        }
    }
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Sun,
    LightBeams,
    Micro,
    Co2,
    H2o,
    O2,
    Glucose,
    LabelLight,
    LabelCo2,
    LabelH2o,
    LabelO2,
    LabelGlucose,
}

impl Element {
    pub const COUNT: usize = 12;

    pub const ALL: [Element; Element::COUNT] = [
        Element::Sun,
        Element::LightBeams,
        Element::Micro,
        Element::Co2,
        Element::H2o,
        Element::O2,
        Element::Glucose,
        Element::LabelLight,
        Element::LabelCo2,
        Element::LabelH2o,
        Element::LabelO2,
        Element::LabelGlucose,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Hidden elements shrink slightly; the sun starts smaller than the icons.
    fn hidden_scale(self) -> f32 {
        match self {
            Element::Sun => 0.6,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementState {
    pub opacity: f32,
    pub scale: f32,
}

impl ElementState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    mode: VisualMode,
    elements: [ElementState; Element::COUNT],
}

impl VisualState {
    /// Baseline where every narrative element is hidden.
    pub fn hidden() -> Self {
        let mut elements = [ElementState { opacity: 0.0, scale: 1.0 }; Element::COUNT];
        for element in Element::ALL {
            elements[element.index()].scale = element.hidden_scale();
        }
        Self {
            mode: VisualMode::Intro,
            elements,
        }
    }

    pub fn for_mode(mode: VisualMode) -> Self {
        let mut state = Self::hidden();
        state.mode = mode;

        match mode {
            VisualMode::Intro => {}
            VisualMode::Light => {
                state.show(Element::Sun, 1.0, 1.0);
                state.show(Element::LightBeams, 1.0, 1.0);
                state.show(Element::LabelLight, 1.0, 1.0);
            }
            VisualMode::Leaf => {
                state.show(Element::Sun, 1.0, 0.95);
                state.show(Element::LightBeams, 0.8, 1.0);
                state.show(Element::LabelLight, 1.0, 1.0);
            }
            VisualMode::Co2 => {
                state.show(Element::Sun, 1.0, 0.95);
                state.show(Element::LightBeams, 0.85, 1.0);
                state.show(Element::Co2, 1.0, 1.0);
                state.show(Element::LabelCo2, 1.0, 1.0);
            }
            VisualMode::H2o => {
                state.show(Element::H2o, 1.0, 1.0);
                state.show(Element::LabelH2o, 1.0, 1.0);
            }
            VisualMode::Micro => {
                state.show(Element::Micro, 1.0, 1.0);
                // Sun stays faint behind the micro view, beams off.
                state.show(Element::Sun, 0.2, 0.6);
            }
            VisualMode::Outputs => {
                state.show(Element::O2, 1.0, 1.0);
                state.show(Element::Glucose, 1.0, 1.0);
                state.show(Element::LabelO2, 1.0, 1.0);
                state.show(Element::LabelGlucose, 1.0, 1.0);
            }
            VisualMode::Bilan => {
                state.show(Element::Sun, 0.6, 0.9);
                state.show(Element::Co2, 0.7, 1.0);
                state.show(Element::H2o, 0.7, 1.0);
                state.show(Element::O2, 0.7, 1.0);
                state.show(Element::Glucose, 0.7, 1.0);
            }
        }

        state
    }

    fn show(&mut self, element: Element, opacity: f32, scale: f32) {
        self.elements[element.index()] = ElementState { opacity, scale };
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    pub fn get(&self, element: Element) -> ElementState {
        self.elements[element.index()]
    }

    pub fn visible(&self) -> impl Iterator<Item = Element> + '_ {
        Element::ALL.into_iter().filter(|e| self.get(*e).is_visible())
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_names_only() {
        for mode in VisualMode::ALL {
            assert_eq!(VisualMode::parse(mode.name()), Some(mode));
        }
        assert_eq!(VisualMode::parse(" CO2 "), Some(VisualMode::Co2));
        assert_eq!(VisualMode::parse("night"), None);
    }

    #[test]
    fn element_index_matches_table_order() {
        for (i, element) in Element::ALL.iter().enumerate() {
            assert_eq!(element.index(), i);
        }
    }

    #[test]
    fn intro_is_the_hidden_baseline() {
        let intro = VisualState::for_mode(VisualMode::Intro);
        assert_eq!(intro.visible().count(), 0);
        assert_eq!(intro.get(Element::Sun).scale, 0.6);
    }

    #[test]
    fn modes_only_enable_their_own_elements() {
        let co2 = VisualState::for_mode(VisualMode::Co2);
        let visible: Vec<_> = co2.visible().collect();
        assert_eq!(
            visible,
            vec![Element::Sun, Element::LightBeams, Element::Co2, Element::LabelCo2]
        );
        assert_eq!(co2.get(Element::LightBeams).opacity, 0.85);

        let h2o = VisualState::for_mode(VisualMode::H2o);
        assert!(!h2o.get(Element::Sun).is_visible());
        assert!(!h2o.get(Element::Co2).is_visible());
    }

    #[test]
    fn micro_dims_the_sun_and_drops_the_beams() {
        let micro = VisualState::for_mode(VisualMode::Micro);
        assert!(micro.get(Element::Micro).is_visible());
        assert!(!micro.get(Element::LightBeams).is_visible());
        assert_eq!(micro.get(Element::Sun).opacity, 0.2);
    }

    #[test]
    fn bilan_shows_all_molecules_faintly() {
        let bilan = VisualState::for_mode(VisualMode::Bilan);
        for element in [Element::Co2, Element::H2o, Element::O2, Element::Glucose] {
            assert_eq!(bilan.get(element).opacity, 0.7);
        }
        assert!(!bilan.get(Element::LabelO2).is_visible());
    }
}

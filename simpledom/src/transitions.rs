use std::fmt;
use std::time::Duration;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// A property that can be animated by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransitionProperty {
    Opacity,
    OffsetY,
}

impl TransitionProperty {
    /// The CSS-style property name reported in transition events.
    pub fn name(self) -> &'static str {
        match self {
            TransitionProperty::Opacity => "opacity",
            TransitionProperty::OffsetY => "offset-y",
        }
    }
}

impl fmt::Display for TransitionProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-property transition declarations.
///
/// Works like a `transition:` shorthand split into one slot per property.
/// Unset slots fall through to earlier rules when styles are merged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transitions {
    pub opacity: Option<TransitionConfig>,
    pub offset_y: Option<TransitionConfig>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, duration: Duration, easing: Easing) -> Self {
        self.opacity = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn offset_y(mut self, duration: Duration, easing: Easing) -> Self {
        self.offset_y = Some(TransitionConfig::new(duration, easing));
        self
    }

    /// Set transition for all properties.
    pub fn all(self, duration: Duration, easing: Easing) -> Self {
        self.opacity(duration, easing).offset_y(duration, easing)
    }

    /// Returns true if any transition is configured.
    pub fn has_any(&self) -> bool {
        self.opacity.is_some() || self.offset_y.is_some()
    }

    /// Look up the configuration for a property.
    pub fn get(&self, property: TransitionProperty) -> Option<TransitionConfig> {
        match property {
            TransitionProperty::Opacity => self.opacity,
            TransitionProperty::OffsetY => self.offset_y,
        }
    }

    /// Overlay `other` on top of `self`; slots set in `other` win.
    pub fn merge(self, other: &Transitions) -> Self {
        Self {
            opacity: other.opacity.or(self.opacity),
            offset_y: other.offset_y.or(self.offset_y),
        }
    }
}

//! Class-keyed stylesheet and computed styles.
//!
//! This is deliberately tiny: rules match on class membership only and carry
//! the handful of properties the fade transitions need.

use std::time::Duration;

use crate::node::ClassList;
use crate::transitions::{Easing, TransitionProperty, Transitions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// A property value that can be interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    F32(f32),
    I16(i16),
}

/// Property declarations carried by a rule. Unset fields don't participate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    pub display: Option<Display>,
    pub opacity: Option<f32>,
    pub offset_y: Option<i16>,
    pub transitions: Transitions,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, display: Display) -> Self {
        self.display = Some(display);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn offset_y(mut self, offset: i16) -> Self {
        self.offset_y = Some(offset);
        self
    }

    pub fn transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }
}

/// A rule applying `declarations` to elements carrying every class in `classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub classes: Vec<String>,
    pub declarations: Declarations,
}

impl StyleRule {
    /// Rule for a single class selector, e.g. `.fade`.
    pub fn class(class: impl Into<String>, declarations: Declarations) -> Self {
        Self {
            classes: vec![class.into()],
            declarations,
        }
    }

    /// Rule for a compound class selector, e.g. `.fade.fade-out`.
    pub fn classes<I, S>(classes: I, declarations: Declarations) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            declarations,
        }
    }

    pub fn matches(&self, class_list: &ClassList) -> bool {
        !self.classes.is_empty() && self.classes.iter().all(|c| class_list.contains(c))
    }
}

/// Ordered list of rules. Later rules win per property.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: StyleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// The stylesheet shipped alongside the simple modal markup.
    ///
    /// `.hide` removes the element from rendering, `.show` brings it back and
    /// declares the transitions, `.fade` drops opacity and `.fade-out` lifts
    /// the dialog slightly while it fades.
    pub fn simple_modal() -> Self {
        let duration = Duration::from_millis(300);
        Self::new()
            .rule(StyleRule::class(
                "hide",
                Declarations::new().display(Display::None),
            ))
            .rule(StyleRule::class(
                "show",
                Declarations::new().display(Display::Block).transitions(
                    Transitions::new()
                        .opacity(duration, Easing::EaseInOut)
                        .offset_y(duration, Easing::EaseOut),
                ),
            ))
            .rule(StyleRule::class("fade", Declarations::new().opacity(0.0)))
            .rule(StyleRule::class("fade-out", Declarations::new().offset_y(-2)))
    }

    /// Resolve the computed style for an element with the given classes.
    pub fn compute(&self, class_list: &ClassList) -> ComputedStyle {
        let mut style = ComputedStyle::default();
        for rule in self.rules.iter().filter(|r| r.matches(class_list)) {
            let d = &rule.declarations;
            if let Some(display) = d.display {
                style.display = display;
            }
            if let Some(opacity) = d.opacity {
                style.opacity = opacity;
            }
            if let Some(offset) = d.offset_y {
                style.offset_y = offset;
            }
            style.transitions = style.transitions.merge(&d.transitions);
        }
        style
    }
}

/// Fully resolved style of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub opacity: f32,
    pub offset_y: i16,
    pub transitions: Transitions,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            opacity: 1.0,
            offset_y: 0,
            transitions: Transitions::default(),
        }
    }
}

impl ComputedStyle {
    pub fn value(&self, property: TransitionProperty) -> PropertyValue {
        match property {
            TransitionProperty::Opacity => PropertyValue::F32(self.opacity),
            TransitionProperty::OffsetY => PropertyValue::I16(self.offset_y),
        }
    }

    pub fn is_rendered(&self) -> bool {
        self.display != Display::None
    }
}

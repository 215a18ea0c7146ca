pub mod no_classfield_shadowing;

pub use no_classfield_shadowing::NoClassfieldShadowing;

use crate::rule::Rule;

/// Rules enabled out of the box
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(NoClassfieldShadowing)]
}

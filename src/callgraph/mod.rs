//! Call-graph profile projection.

pub mod profile;

pub use profile::{
    project_profile, project_profile_with, LabelRule, LabelRules, ProfileEntry,
};

//! Built-in welcome tour used by the in-app demo.

use crate::builder::TourBuilder;
use crate::core::{StepCatalog, TourStep};

/// The five-step workspace tour.
pub fn welcome_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "welcome",
            "Welcome to your workspace",
            "This short 5-step tour will show you where everything lives so you can feel at home in seconds.",
        ),
        TourStep::new(
            "nav",
            "Navigation & main sections",
            "Use the left sidebar to move between your dashboard, tours, analytics and settings. Think of it as your product's main map.",
        ),
        TourStep::new(
            "actions",
            "Create tours and see results",
            "The quick action cards help you add new tours, view performance and copy your embed code. Gold buttons are your primary actions.",
        ),
        TourStep::new(
            "shortcuts",
            "Search, shortcuts & recent activity",
            "Use the search bar to jump straight to tours, products or customers, and use the cards below to review what's been happening recently.",
        ),
        TourStep::new(
            "finish",
            "You're ready to explore",
            "That's it for now. You can re-open this tour anytime from the glowing bubble in the corner if you need a quick refresher.",
        ),
    ]
}

pub fn welcome_catalog() -> StepCatalog {
    StepCatalog::new(welcome_steps()).expect("Welcome tour steps should always validate")
}

/// Builder preloaded with the welcome tour and default config.
pub fn welcome_tour() -> TourBuilder {
    TourBuilder::new().catalog(welcome_catalog())
}

/// Host-page region emphasized while a step is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    Navigation,
    Actions,
    Shortcuts,
}

impl Highlight {
    pub fn for_step(step: &TourStep) -> Option<Self> {
        match step.id.as_str() {
            "nav" => Some(Self::Navigation),
            "actions" => Some(Self::Actions),
            "shortcuts" => Some(Self::Shortcuts),
            _ => None,
        }
    }
}

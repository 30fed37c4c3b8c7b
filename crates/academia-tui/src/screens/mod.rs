//! Screen implementations. Each screen is a top-level Component.

pub mod enrollments;
pub mod loading;
pub mod overview;

use crate::component::Component;
use crate::i18n::I18n;
use crate::screen::ScreenId;

/// Build every screen, the loading screen included.
pub fn create_screens(i18n: I18n) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Loading, Box::new(loading::LoadingScreen::new(i18n))),
        (
            ScreenId::Enrollments,
            Box::new(enrollments::EnrollmentsScreen::new(i18n)),
        ),
        (ScreenId::Overview, Box::new(overview::OverviewScreen::new(i18n))),
    ]
}

//! # County Menu Rendering
//!
//! Builds the paginated county-selection screen: header, one line per
//! county on the requested page (numeric-code order), a "more" control
//! only when a further page exists, then the fixed back and main-menu
//! controls.

use cas_core::{County, Language};

use crate::catalog::{text, ScreenKey};
use crate::pagination::Pagination;

/// Counties shown per page. USSD screens are ~160 characters, so five
/// entries plus navigation controls fills one screen.
pub const COUNTIES_PER_PAGE: usize = 5;

/// Render the county-selection menu for `page` (1-indexed).
pub fn county_menu(language: Language, page: u32, page_size: usize) -> String {
    let bounds = Pagination::new(page, page_size, County::ALL.len());

    let mut menu = text(language, ScreenKey::CountySelectionHeader, &[]);
    for county in &County::ALL[bounds.start..bounds.end] {
        menu.push_str(county.code());
        menu.push_str(". ");
        menu.push_str(county.display_name(language));
        menu.push('\n');
    }

    if bounds.has_next() {
        menu.push_str(&text(language, ScreenKey::MoreOption, &[]));
        menu.push('\n');
    }
    menu.push_str(&text(language, ScreenKey::BackOption, &[]));
    menu.push('\n');
    menu.push_str(&text(language, ScreenKey::MainMenuOption, &[]));
    menu
}

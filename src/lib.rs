//! folio: a terminal portfolio with scroll-tracked section navigation.
//!
//! A markdown document is laid out into rows, and every heading carrying an identity
//! attribute (`## About {#about}`) becomes a navigable section. As the viewport scrolls, the
//! observation source reports how much of each section is visible and the visibility tracker
//! resolves those reports to a single active section, which the sidebar highlights.

pub mod app_state;
pub mod config;
pub mod contact;
pub mod content;
pub mod layout;
pub mod logging;
pub mod navigator;
pub mod resume;
pub mod section;
pub mod state;
pub mod theme;
pub mod tracker;
pub mod ui;
pub mod viewport;

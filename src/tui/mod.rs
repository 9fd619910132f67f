//! Terminal front end: the Elm-style event loop, screens, and widgets.

pub mod app;
pub mod events;
pub mod layout;
pub mod router;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;

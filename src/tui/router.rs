//! Path routing for the catalog screens.
//!
//! `/` is the list, `/pokemon/<name>` a detail page. Anything else
//! redirects to the list.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Detail(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let Some(rest) = trimmed.strip_prefix("/pokemon/") else {
            if !trimmed.is_empty() {
                log::debug!("Unknown path {path:?}, redirecting to /");
            }
            return Route::List;
        };
        if rest.is_empty() || rest.contains('/') {
            log::debug!("Unknown path {path:?}, redirecting to /");
            return Route::List;
        }
        match urlencoding::decode(rest) {
            Ok(name) => Route::Detail(name.into_owned()),
            Err(_) => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(name) => format!("/pokemon/{}", urlencoding::encode(name)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

//! View routing: `home` or `module/<id>`, addressed by path or fragment.

use serde::Serialize;

use crate::error::RouteError;
use crate::module::ModuleKind;

const MODULE_PREFIX: &str = "/module/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum Route {
    Home,
    Module {
        #[serde(rename = "moduleId")]
        module_id: String,
    },
}

/// A route that resolved to something renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Module(ModuleKind),
}

impl Route {
    /// Parse a location. Accepts a fragment (`#/module/stroop`) or a path
    /// under `base_path` (`/reWire/module/stroop`). Anything else is home.
    pub fn parse(location: &str, base_path: &str) -> Self {
        let relative = match location.strip_prefix('#') {
            Some(fragment) => fragment,
            None => {
                let base = base_path.trim_end_matches('/');
                location.strip_prefix(base).unwrap_or(location)
            }
        };
        match relative.strip_prefix(MODULE_PREFIX) {
            Some(id) if !id.is_empty() => Route::Module {
                module_id: id.trim_end_matches('/').to_string(),
            },
            _ => Route::Home,
        }
    }

    /// Path form under `base_path`; the inverse of [`Route::parse`].
    pub fn to_path(&self, base_path: &str) -> String {
        let base = base_path.trim_end_matches('/');
        match self {
            Route::Home => format!("{}/", base),
            Route::Module { module_id } => format!("{}{}{}", base, MODULE_PREFIX, module_id),
        }
    }

    /// Fragment form, e.g. `#/module/stroop`.
    pub fn to_fragment(&self) -> String {
        format!("#{}", self.to_path(""))
    }

    pub fn resolve(&self) -> Result<View, RouteError> {
        match self {
            Route::Home => Ok(View::Home),
            Route::Module { module_id } => ModuleKind::from_id(module_id)
                .map(View::Module)
                .ok_or_else(|| RouteError::ModuleNotFound {
                    id: module_id.clone(),
                }),
        }
    }
}

impl From<ModuleKind> for Route {
    fn from(module: ModuleKind) -> Self {
        Route::Module {
            module_id: module.id().to_string(),
        }
    }
}

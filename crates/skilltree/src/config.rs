use indexmap::IndexMap;
use serde::Deserialize;

/// Per-version options payload shipped next to the tree (`Opts.json`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeOptions {
    /// Class whose start node is allocated when the tree loads.
    pub start_class: Option<u32>,
    pub asc_classes: IndexMap<String, AscendancyClasses>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AscendancyClasses {
    pub name: String,
    pub classes: IndexMap<String, AscendancyClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AscendancyClass {
    pub name: String,
    pub display_name: String,
}

impl TreeOptions {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Ascendancy display names for `class`, in payload order.
    pub fn ascendancy_names(&self, class: u32) -> Vec<&str> {
        self.asc_classes
            .get(&class.to_string())
            .map(|c| {
                c.classes
                    .values()
                    .map(|a| {
                        if a.display_name.is_empty() {
                            a.name.as_str()
                        } else {
                            a.display_name.as_str()
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BuildOptions {
    /// Zoom scale applied to every coordinate and hit box. Defaults to the payload's largest
    /// image zoom level, or `1.0` when the payload lists none.
    pub scale: Option<f64>,
    pub start_class: Option<u32>,
    /// Place nodes whose orbit is missing from the radius table at the origin instead of
    /// rejecting the load.
    pub lenient_layout: bool,
}

impl BuildOptions {
    /// Any missing layout entry rejects the load.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Nodes on unknown orbits fall back to the origin.
    pub fn lenient() -> Self {
        Self {
            lenient_layout: true,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_start_class(mut self, class: Option<u32>) -> Self {
        self.start_class = class;
        self
    }

    pub fn with_tree_options(self, options: &TreeOptions) -> Self {
        self.with_start_class(options.start_class)
    }
}

use serde::Deserialize;

use super::node::lenient_string;

/// Info object shared by Swagger 2.0 and OpenAPI 3.x.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
    pub license: Option<License>,
}

impl Info {
    pub fn license_name(&self) -> Option<String> {
        self.license.as_ref().and_then(|l| l.name.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
    /// SPDX expression (3.1 only).
    pub identifier: Option<String>,
}

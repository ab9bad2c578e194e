use crate::error::ConfigError;
use crate::extract::{FormConfig, JsonConfig};
use crate::http::HeaderCase;
use crate::params::{BuildParamsWith, ParamBuilder};

use serde::Deserialize;

use std::path::Path;
use std::str::FromStr;

/// How routing arguments and request parameters are reconciled when they
/// share a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum MergePolicy {
    /// Routing arguments are deep merged over request parameters.
    #[default]
    RoutePrecedence,

    /// Routing arguments only fill in keys the request did not supply.
    RequestPrecedence,
}

impl FromStr for MergePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "route_precedence" => Ok(MergePolicy::RoutePrecedence),
            "request_precedence" => Ok(MergePolicy::RequestPrecedence),
            other => Err(ConfigError::UnknownMergePolicy(other.to_owned())),
        }
    }
}

impl TryFrom<String> for MergePolicy {
    type Error = ConfigError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Request parsing options.
///
/// ```
/// use corral::Options;
/// use corral::params::BuildParamsWith;
///
/// let options = Options::from_toml_str(r#"build_params_with = "mash""#).unwrap();
/// assert_eq!(options.build_params_with, BuildParamsWith::Mash);
///
/// assert!(Options::from_toml_str(r#"build_params_with = "Foo""#).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// The builder of the params container.
    pub build_params_with: BuildParamsWith,

    /// Casing of header names.
    pub header_case: HeaderCase,

    /// Precedence between routing arguments and request parameters.
    pub merge: MergePolicy,

    /// Maximum nesting of bracketed parameter names.
    pub max_depth: usize,

    pub form: FormConfig,

    pub json: JsonConfig,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            build_params_with: BuildParamsWith::default(),
            header_case: HeaderCase::default(),
            merge: MergePolicy::default(),
            max_depth: 100,
            form: FormConfig::new(),
            json: JsonConfig::new(),
        }
    }
}

impl Options {
    pub fn build_params_with(mut self, builder: BuildParamsWith) -> Self {
        self.build_params_with = builder;
        self
    }

    pub fn header_case(mut self, case: HeaderCase) -> Self {
        self.header_case = case;
        self
    }

    pub fn merge(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn form(mut self, form: FormConfig) -> Self {
        self.form = form;
        self
    }

    pub fn json(mut self, json: JsonConfig) -> Self {
        self.json = json;
        self
    }

    /// The active param builder.
    pub fn param_builder(&self) -> &'static dyn ParamBuilder {
        self.build_params_with.builder()
    }

    pub fn from_toml_str(toml: &str) -> Result<Options, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Options, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        Options::from_toml_str(&content)
    }
}

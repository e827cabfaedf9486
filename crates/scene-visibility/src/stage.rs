use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What should happen to the selected source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityMode {
	#[default]
	Toggle,
	Show,
	Hide,
}

impl VisibilityMode {
	pub const ALL: [Self; 3] = [Self::Toggle, Self::Show, Self::Hide];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Toggle => "toggle",
			Self::Show => "show",
			Self::Hide => "hide",
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::Toggle => "Toggle",
			Self::Show => "Show",
			Self::Hide => "Hide",
		}
	}

	pub const fn icon(self) -> &'static str {
		match self {
			Self::Toggle => "code",
			Self::Show => "visibility_on",
			Self::Hide => "visibility_off",
		}
	}

	/// Visibility to write given the value just read
	pub const fn apply(self, current: bool) -> bool {
		match self {
			Self::Toggle => !current,
			Self::Show => true,
			Self::Hide => false,
		}
	}
}

impl fmt::Display for VisibilityMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized visibility mode: {0}")]
pub struct UnrecognizedVisibilityMode(pub String);

impl FromStr for VisibilityMode {
	type Err = UnrecognizedVisibilityMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"toggle" => Ok(Self::Toggle),
			"show" => Ok(Self::Show),
			"hide" => Ok(Self::Hide),
			other => Err(UnrecognizedVisibilityMode(other.to_string())),
		}
	}
}

/// The user's configuration as far as it has been filled in.
///
/// `visibility` stays a raw string: it is whatever the host persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
	#[serde(default)]
	pub scene: Option<String>,
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub visibility: Option<String>,
}

impl Stage {
	#[must_use]
	pub fn with_scene(mut self, scene: impl Into<String>) -> Self {
		self.scene = Some(scene.into());
		self
	}

	#[must_use]
	pub fn with_source(mut self, source: impl Into<String>) -> Self {
		self.source = Some(source.into());
		self
	}

	#[must_use]
	pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
		self.visibility = Some(visibility.into());
		self
	}

	/// Selected scene; an empty selection counts as none
	pub fn scene_name(&self) -> Option<&str> {
		self.scene.as_deref().filter(|s| !s.is_empty())
	}

	pub fn source_name(&self) -> Option<&str> {
		self.source.as_deref().filter(|s| !s.is_empty())
	}

	/// Selected mode, falling back to the field default when unset
	pub fn visibility_mode(&self) -> Result<VisibilityMode, UnrecognizedVisibilityMode> {
		self.visibility.as_deref().map_or(Ok(VisibilityMode::default()), str::parse)
	}

	/// The executable command, once scene, source and mode are all usable
	pub fn command(&self) -> Option<VisibilityCommand> {
		Some(VisibilityCommand {
			scene: self.scene_name()?.to_string(),
			source: self.source_name()?.to_string(),
			desired: self.visibility_mode().ok()?,
		})
	}
}

/// A fully resolved visibility change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityCommand {
	pub scene: String,
	pub source: String,
	pub desired: VisibilityMode,
}

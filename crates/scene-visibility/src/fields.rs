use indexmap::IndexMap;
use serde::Serialize;

pub const SCENE: &str = "scene";
pub const SOURCE: &str = "source";
pub const VISIBILITY: &str = "visibility";

/// Field name to descriptor, in display order
pub type FieldSet = IndexMap<String, FieldDescriptor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
	Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
	pub text: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub icon: Option<String>,
}

/// A configurable field as the host renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
	#[serde(rename = "type")]
	pub kind: FieldKind,
	pub required: bool,
	pub default: Option<String>,
	pub label: String,
	pub help: String,
	/// Changing this field triggers another resolution pass
	#[serde(rename = "watch")]
	pub watched: bool,
	pub options: IndexMap<String, FieldOption>,
}

impl FieldDescriptor {
	pub fn select(label: impl Into<String>, help: impl Into<String>) -> Self {
		Self {
			kind: FieldKind::Select,
			required: false,
			default: None,
			label: label.into(),
			help: help.into(),
			watched: false,
			options: IndexMap::new(),
		}
	}

	#[must_use]
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	#[must_use]
	pub fn watched(mut self) -> Self {
		self.watched = true;
		self
	}

	#[must_use]
	pub fn with_default(mut self, value: impl Into<String>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Add an option. A repeated key replaces the earlier option.
	#[must_use]
	pub fn with_option(mut self, key: impl Into<String>, text: impl Into<String>, icon: Option<&str>) -> Self {
		self.options.insert(
			key.into(),
			FieldOption {
				text: text.into(),
				icon: icon.map(String::from),
			},
		);
		self
	}

	pub fn option_keys(&self) -> impl Iterator<Item = &str> {
		self.options.keys().map(String::as_str)
	}
}

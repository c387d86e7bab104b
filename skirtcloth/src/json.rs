//! JSON loading for meshes, presets and tool configuration.
//!
//! Every document is parsed with `#[serde(default)]` semantics, so fields left
//! out of a document take their `Default` values.

use crate::{
    BoneFrame, ClothPreset, ColliderPlan, Error, MeshSnapshot, PainterConfig, SkirtSelection,
    SpreadDeformConfig,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

fn parse<T: DeserializeOwned>(input: &str) -> Result<T, Error> {
    serde_json::from_str(input).map_err(|e| Error::JsonParse {
        message: e.to_string(),
    })
}

fn write<T: Serialize>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(|e| Error::InvalidValue {
        message: format!("failed to write JSON: {e}"),
    })
}

impl MeshSnapshot {
    /// Parses a mesh and checks its channel invariants.
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let mesh: Self = parse(input)?;
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        write(self)
    }
}

impl ClothPreset {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let preset: Self = parse(input)?;
        preset.validate()?;
        Ok(preset)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        write(self)
    }
}

impl PainterConfig {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        parse(input)
    }
}

impl SpreadDeformConfig {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        parse(input)
    }
}

impl SkirtSelection {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        parse(input)
    }
}

impl ColliderPlan {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        parse(input)
    }
}

impl BoneFrame {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        parse(input)
    }
}

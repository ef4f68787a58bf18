//! Archive metadata and user properties

/// Metadata key for the name of the application that wrote the archive
pub const APPLICATION_NAME_KEY: &str = "_ai_Application";

/// Metadata key for the free-form scene description
pub const USER_DESCRIPTION_KEY: &str = "_ai_Description";

/// Metadata key for the frame rate the scene was authored at
pub const DCC_FPS_KEY: &str = "_ai_DCC_FPS";

/// User property marking whether the mesh is a subdivision surface
pub const MESH_TYPE_PROPERTY: &str = "meshtype";

/// Ordered string key/value metadata
///
/// Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaData {
    entries: Vec<(String, String)>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Value of a user property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
}

impl PropertyValue {
    /// Type tag stored in the archive
    pub const TYPE_BOOL: u8 = 0;

    pub fn type_tag(&self) -> u8 {
        match self {
            PropertyValue::Bool(_) => Self::TYPE_BOOL,
        }
    }

    /// Encoded value byte
    pub fn value_byte(&self) -> u8 {
        match self {
            PropertyValue::Bool(v) => u8::from(*v),
        }
    }

    /// Decode a (type tag, value byte) pair
    pub fn decode(type_tag: u8, value: u8) -> Option<Self> {
        match type_tag {
            Self::TYPE_BOOL => Some(PropertyValue::Bool(value != 0)),
            _ => None,
        }
    }
}

/// Named custom property attached to the geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProperty {
    pub name: String,
    pub value: PropertyValue,
}

impl UserProperty {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

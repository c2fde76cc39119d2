use specs;

/// Human-readable label for an entity.
///
/// Only used for logging and for looking entities up by name
/// when spawning a scene; nothing requires names to be present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new<S: Into<String>>(name: S) -> Name {
        Name(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl specs::Component for Name {
    type Storage = specs::VecStorage<Name>;
}

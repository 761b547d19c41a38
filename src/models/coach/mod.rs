// Coach module

/// Coach who can be assigned to slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coach {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

impl Coach {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active: true,
        }
    }
}

/// Resolve a coach id to its display name.
pub fn coach_name(coaches: &[Coach], id: i64) -> Option<&str> {
    coaches
        .iter()
        .find(|coach| coach.id == id)
        .map(|coach| coach.name.as_str())
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Group {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Group ids in caller order. May repeat ids or name groups that do not exist.
    #[serde(default)]
    pub membership: Vec<String>,
}

impl Entity {
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }
}

/// A full diagram snapshot. Groups and entities keep their declaration order,
/// which is the order every layout output is aligned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_group(&mut self, id: &str, label: Option<String>, color: Option<String>) {
        if let Some(existing) = self.groups.iter_mut().find(|group| group.id == id) {
            if label.is_some() {
                existing.label = label;
            }
            if color.is_some() {
                existing.color = color;
            }
            return;
        }
        self.groups.push(Group {
            id: id.to_string(),
            label,
            color,
        });
    }

    pub fn ensure_entity(&mut self, id: &str, label: Option<String>, membership: Vec<String>) {
        if let Some(existing) = self.entities.iter_mut().find(|entity| entity.id == id) {
            if label.is_some() {
                existing.label = label;
            }
            existing.membership.extend(membership);
            return;
        }
        self.entities.push(Entity {
            id: id.to_string(),
            label,
            membership,
        });
    }

    pub fn group_ids(&self) -> Vec<&str> {
        self.groups.iter().map(|group| group.id.as_str()).collect()
    }
}

use std::fmt;

use serde::Serialize;

/// The two waste categories, in the network's class order.
pub const LABELS: [Label; 2] = [Label::Recyclable, Label::NonRecyclable];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    Recyclable,
    #[serde(rename = "Non-Recyclable")]
    NonRecyclable,
}

impl Label {
    pub fn from_class_id(class_id: usize) -> Option<Self> {
        LABELS.get(class_id).copied()
    }

    pub fn class_id(self) -> usize {
        match self {
            Label::Recyclable => 0,
            Label::NonRecyclable => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Recyclable => "Recyclable",
            Label::NonRecyclable => "Non-Recyclable",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Label::Recyclable => "♻️",
            Label::NonRecyclable => "🗑️",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_ids_follow_label_order() {
        for (index, label) in LABELS.iter().enumerate() {
            assert_eq!(label.class_id(), index);
            assert_eq!(Label::from_class_id(index), Some(*label));
        }
        assert_eq!(Label::from_class_id(2), None);
    }

    #[test]
    fn display_names() {
        assert_eq!(Label::Recyclable.to_string(), "Recyclable");
        assert_eq!(Label::NonRecyclable.to_string(), "Non-Recyclable");
        assert_eq!(
            serde_json::to_string(&Label::NonRecyclable).unwrap(),
            "\"Non-Recyclable\""
        );
    }
}

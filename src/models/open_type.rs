//! Open types and the resolver that picks one for a resource.

/// How a resource is rendered inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpenType {
    Code,
    Diff,
    Component { component_id: String },
    /// A kind contributed by a registry that the engine does not render.
    Other { kind: String },
}

impl OpenType {
    pub fn component(id: impl Into<String>) -> Self {
        Self::Component {
            component_id: id.into(),
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            OpenType::Code => "code",
            OpenType::Diff => "diff",
            OpenType::Component { .. } => "component",
            OpenType::Other { kind } => kind,
        }
    }

    /// Same kind and, for components, the same component id.
    pub fn is_similar(&self, other: &OpenType) -> bool {
        match (self, other) {
            (
                OpenType::Component { component_id: a },
                OpenType::Component { component_id: b },
            ) => a == b,
            _ => self.kind() == other.kind(),
        }
    }
}

/// Selects the active open type among `available`.
///
/// A forced type wins when it is one of the candidates; otherwise the first
/// candidate similar to `previous` is reused. Both fall back to the first
/// candidate. Returns `None` only when there are no candidates.
pub fn find_suitable_open_type(
    available: &[OpenType],
    previous: Option<&OpenType>,
    forced: Option<&OpenType>,
) -> Option<OpenType> {
    let picked = if let Some(forced) = forced {
        available.iter().find(|candidate| *candidate == forced)
    } else if let Some(previous) = previous {
        available
            .iter()
            .find(|candidate| candidate.is_similar(previous))
    } else {
        None
    };
    picked.or_else(|| available.first()).cloned()
}

#[cfg(test)]
#[path = "../../tests/unit/models/open_type.rs"]
mod tests;

//! Shared types used across the codebase

/// Record store operations, used to tag store diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    Select,
}

impl Operation {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::Select)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Select => "select",
        };
        f.write_str(name)
    }
}

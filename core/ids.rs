//! GUID generation for projects and filters.
//!
//! Every identifier written to a solution, project or filter file comes from an
//! [`IdGenerator`] owned by the caller. The CLI uses [`RandomIds`]; tests and
//! `--deterministic-ids` runs use [`SequentialIds`] so output is reproducible.

use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random (v4) identifiers, the normal mode of operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counter-backed identifiers: `{00000000-0000-0000-0000-000000000001}`, then `...02`, and so on.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued(&self) -> u128 {
        self.issued
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        self.issued += 1;
        Uuid::from_u128(self.issued)
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &mut T {
    fn next_id(&mut self) -> Uuid {
        (**self).next_id()
    }
}

/// Braced, lowercase form used throughout the generated files.
pub fn format_guid(id: &Uuid) -> String {
    id.braced().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_stable_and_distinct() {
        let mut ids = SequentialIds::new();
        let first = ids.next_id();
        let second = ids.next_id();
        assert_ne!(first, second);
        assert_eq!(
            format_guid(&first),
            "{00000000-0000-0000-0000-000000000001}"
        );
        assert_eq!(ids.issued(), 2);

        let mut again = SequentialIds::new();
        assert_eq!(again.next_id(), first);
    }

    #[test]
    fn random_ids_are_braced_lowercase() {
        let id = RandomIds.next_id();
        let text = format_guid(&id);
        assert!(text.starts_with('{') && text.ends_with('}'));
        assert_eq!(text.len(), 38);
        assert_eq!(text, text.to_lowercase());
    }
}

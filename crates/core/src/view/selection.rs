use fleet_transit::{BusId, FleetSnapshot};

/// The bus the user last picked, if any.
///
/// Selection is independent of snapshot lifetime: it is never validated
/// against the current fleet and never cleared when the bus disappears, only
/// overwritten by the next pick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Selection(Option<BusId>);

impl Selection {
    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn select(&mut self, id: BusId) {
        self.0 = Some(id);
    }

    pub fn id(&self) -> Option<BusId> {
        self.0
    }

    /// Index of the selected bus in `snapshot`, by exact id match.
    pub fn resolve(&self, snapshot: &FleetSnapshot) -> Option<usize> {
        snapshot.index_of(self.0?)
    }
}

/// Where clicks on a bus go. Adapters never touch selection any other way.
pub trait SelectionSink {
    fn select(&self, id: BusId);
}

#[cfg(test)]
mod tests {
    use fleet_transit::BusStatus;
    use fleet_transit::testing::{bus, snapshot};

    use super::*;

    #[test]
    fn test_starts_empty() {
        let selection = Selection::default();
        assert_eq!(selection.id(), None);
        assert_eq!(selection.resolve(&snapshot(vec![bus(1, BusStatus::Active)])), None);
    }

    #[test]
    fn test_select_overwrites() {
        let mut selection = Selection::empty();
        selection.select(BusId::new(1));
        selection.select(BusId::new(2));
        assert_eq!(selection.id(), Some(BusId::new(2)));
    }

    #[test]
    fn test_resolve_by_exact_id() {
        let buses = snapshot(vec![bus(4, BusStatus::Active), bus(5, BusStatus::Maintenance)]);

        let mut selection = Selection::empty();
        selection.select(BusId::new(5));
        assert_eq!(selection.resolve(&buses), Some(1));

        selection.select(BusId::new(50));
        assert_eq!(selection.resolve(&buses), None);
        assert_eq!(selection.id(), Some(BusId::new(50)));
    }
}

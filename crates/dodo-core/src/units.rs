//! Unit selection resolver.
//!
//! Pure function over the configured enabled ids and the region catalog.
//! Enabled ids that are not in the catalog (stale configuration) are
//! ignored: they have no unit to render and do not count as enabled.

use std::collections::{BTreeSet, HashSet};

use crate::domain::{Region, ReportType, Unit, UnitId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitToggle {
    pub unit: Unit,
    pub enabled: bool,
}

/// Enabled/disabled partition of one region for one report type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSelection {
    pub report_type: ReportType,
    pub region: Region,
    /// One entry per catalog unit, in catalog order.
    pub units: Vec<UnitToggle>,
    pub disabled_unit_ids: BTreeSet<UnitId>,
    /// Offer "enable all".
    pub any_disabled: bool,
    /// Offer "disable all".
    pub any_enabled: bool,
}

impl UnitSelection {
    pub fn enabled_units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(|t| t.enabled).map(|t| &t.unit)
    }

    pub fn enabled_unit_ids(&self) -> Vec<UnitId> {
        self.enabled_units().map(|u| u.id).collect()
    }
}

pub fn resolve_unit_selection(
    report_type: ReportType,
    region: &Region,
    enabled_unit_ids: &HashSet<UnitId>,
    all_units: &[Unit],
) -> UnitSelection {
    let all_unit_ids: BTreeSet<UnitId> = all_units.iter().map(|u| u.id).collect();
    let disabled_unit_ids: BTreeSet<UnitId> = all_unit_ids
        .iter()
        .filter(|id| !enabled_unit_ids.contains(id))
        .copied()
        .collect();

    let units: Vec<UnitToggle> = all_units
        .iter()
        .map(|unit| UnitToggle {
            unit: unit.clone(),
            enabled: enabled_unit_ids.contains(&unit.id),
        })
        .collect();

    let any_enabled = units.iter().any(|t| t.enabled);
    let any_disabled = !disabled_unit_ids.is_empty();

    UnitSelection {
        report_type,
        region: region.clone(),
        units,
        disabled_unit_ids,
        any_disabled,
        any_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Unit> {
        vec![Unit::new(1, "A"), Unit::new(2, "B"), Unit::new(3, "C")]
    }

    fn ids(raw: &[i64]) -> HashSet<UnitId> {
        raw.iter().copied().map(UnitId).collect()
    }

    fn resolve(enabled: &[i64], all: &[Unit]) -> UnitSelection {
        resolve_unit_selection(
            ReportType::StatisticsReports,
            &Region::new("Moscow"),
            &ids(enabled),
            all,
        )
    }

    #[test]
    fn one_enabled_unit() {
        let sel = resolve(&[2], &catalog());

        assert_eq!(sel.disabled_unit_ids, BTreeSet::from([UnitId(1), UnitId(3)]));
        assert!(sel.any_disabled);
        assert!(sel.any_enabled);
        assert_eq!(
            sel.units.iter().map(|t| t.enabled).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(sel.enabled_unit_ids(), vec![UnitId(2)]);
    }

    #[test]
    fn nothing_enabled() {
        let sel = resolve(&[], &catalog());

        assert_eq!(
            sel.disabled_unit_ids,
            BTreeSet::from([UnitId(1), UnitId(2), UnitId(3)])
        );
        assert!(sel.any_disabled);
        assert!(!sel.any_enabled);
    }

    #[test]
    fn everything_enabled() {
        let sel = resolve(&[1, 2, 3], &catalog());
        assert!(sel.disabled_unit_ids.is_empty());
        assert!(!sel.any_disabled);
        assert!(sel.any_enabled);
    }

    #[test]
    fn empty_catalog() {
        let sel = resolve(&[1, 2], &[]);
        assert!(sel.units.is_empty());
        assert!(sel.disabled_unit_ids.is_empty());
        assert!(!sel.any_disabled);
        assert!(!sel.any_enabled);
    }

    #[test]
    fn stale_ids_are_ignored() {
        let sel = resolve(&[2, 99], &catalog());
        assert_eq!(sel.units.len(), 3);
        assert_eq!(sel.enabled_unit_ids(), vec![UnitId(2)]);
        assert_eq!(sel.disabled_unit_ids, BTreeSet::from([UnitId(1), UnitId(3)]));

        let only_stale = resolve(&[99], &catalog());
        assert!(!only_stale.any_enabled);
    }

    #[test]
    fn keeps_catalog_order() {
        let all = vec![Unit::new(30, "Z"), Unit::new(10, "X"), Unit::new(20, "Y")];
        let sel = resolve(&[10], &all);
        let names: Vec<&str> = sel.units.iter().map(|t| t.unit.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "X", "Y"]);
    }

    #[test]
    fn partitions_every_subset() {
        let all = vec![
            Unit::new(1, "A"),
            Unit::new(2, "B"),
            Unit::new(3, "C"),
            Unit::new(4, "D"),
        ];
        let all_ids: BTreeSet<UnitId> = all.iter().map(|u| u.id).collect();

        for mask in 0u32..16 {
            let mut enabled: Vec<i64> = (0..4)
                .filter(|bit| mask & (1 << bit) != 0)
                .map(|bit| bit as i64 + 1)
                .collect();
            enabled.push(77); // stale

            let sel = resolve(&enabled, &all);
            let enabled_ids: BTreeSet<UnitId> = sel.enabled_unit_ids().into_iter().collect();

            assert!(enabled_ids.is_disjoint(&sel.disabled_unit_ids));
            let union: BTreeSet<UnitId> =
                enabled_ids.union(&sel.disabled_unit_ids).copied().collect();
            assert_eq!(union, all_ids);
            assert_eq!(sel.any_enabled, !enabled_ids.is_empty());
            assert_eq!(sel.any_disabled, !sel.disabled_unit_ids.is_empty());

            assert_eq!(sel, resolve(&enabled, &all));
        }
    }
}

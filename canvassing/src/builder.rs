pub use crate::config::*;

/// A builder for assembling filter criteria.
///
/// The criteria start from the default UI state (all streets, the three known
/// statuses, no priority restriction, no member bounds) and each call narrows
/// one control.
///
/// ```
/// pub use canvassing::CriteriaBuilder;
/// pub use canvassing::VisitStatus;
///
/// let criteria = CriteriaBuilder::new()
///     .neighborhood("Mroni Be")
///     .statuses(&[VisitStatus::ToVisit])
///     .priority_only(true)
///     .members_between(2, 6)
///     .build();
/// ```
pub struct CriteriaBuilder {
    criteria: FilterCriteria,
}

impl CriteriaBuilder {
    pub fn new() -> CriteriaBuilder {
        CriteriaBuilder {
            criteria: FilterCriteria::default(),
        }
    }

    /// Restricts to a single street. Shorthand for the single-select control.
    pub fn neighborhood(self, name: &str) -> CriteriaBuilder {
        self.neighborhoods(&[name.to_string()])
    }

    pub fn neighborhoods(mut self, names: &[String]) -> CriteriaBuilder {
        self.criteria.neighborhoods = NeighborhoodFilter::Only(names.iter().cloned().collect());
        self
    }

    pub fn all_neighborhoods(mut self) -> CriteriaBuilder {
        self.criteria.neighborhoods = NeighborhoodFilter::All;
        self
    }

    pub fn statuses(mut self, statuses: &[VisitStatus]) -> CriteriaBuilder {
        self.criteria.statuses = statuses.iter().cloned().collect();
        self
    }

    pub fn priority_only(mut self, flag: bool) -> CriteriaBuilder {
        self.criteria.priority_only = flag;
        self
    }

    /// Inclusive member-count bounds. A degenerate range (min > max) collapses
    /// to the single point (min, min) instead of raising.
    pub fn members_between(mut self, min: u32, max: u32) -> CriteriaBuilder {
        let range = if min <= max { (min, max) } else { (min, min) };
        self.criteria.member_range = Some(range);
        self
    }

    pub fn build(self) -> FilterCriteria {
        self.criteria
    }
}

impl Default for CriteriaBuilder {
    fn default() -> CriteriaBuilder {
        CriteriaBuilder::new()
    }
}

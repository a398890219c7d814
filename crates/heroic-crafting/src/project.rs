//! Crafting projects stored on an actor.
//!
//! A [`ProjectBook`] is the actor's list of in-progress projects. It is a
//! plain value: the host deserializes it from the actor's flags, calls the
//! methods here, and writes the whole list back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use heroic_coins::{half, scale};
use heroic_trove::SpendingSchedule;
use heroic_types::{
    Coins, CraftProject, PlatinumPolicy, ProgressDirection, ProjectId, SpendingDuration,
};

/// Errors that can occur when changing a project book.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectError {
    /// The item reference was blank.
    #[error("cannot begin a project without an item reference")]
    EmptyItemId,

    /// A batch must craft at least one item.
    #[error("batch size must be at least 1")]
    ZeroBatch,

    /// The starting spend exceeded half the batch cost.
    #[error("starting spend of {requested} cp exceeds the limit of {limit} cp")]
    StartingSpendTooHigh {
        /// Copper the caller tried to commit up front.
        requested: u64,
        /// Copper allowed up front.
        limit: u64,
    },

    /// No project has the given identifier.
    #[error("project not found: {0}")]
    UnknownProject(ProjectId),

    /// Progress or cost would not fit in a copper total.
    #[error("copper total overflow")]
    Overflow,
}

/// What is needed to begin a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Host document reference of the item to craft.
    pub item_id: String,
    /// Price of one item.
    pub item_price: Coins,
    /// Number of items in the batch.
    pub batch_size: u32,
    /// Value committed when the project begins.
    pub starting_progress: Coins,
}

/// An actor's crafting projects, in the order they were begun.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectBook {
    projects: Vec<CraftProject>,
}

impl ProjectBook {
    /// An empty book.
    pub const fn new() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    /// A book holding existing projects.
    pub const fn from_projects(projects: Vec<CraftProject>) -> Self {
        Self { projects }
    }

    /// All projects.
    pub fn projects(&self) -> &[CraftProject] {
        &self.projects
    }

    /// Consume the book, returning its projects.
    pub fn into_projects(self) -> Vec<CraftProject> {
        self.projects
    }

    /// Look up a project by identifier.
    pub fn get(&self, id: ProjectId) -> Option<&CraftProject> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Begin a new project.
    ///
    /// At most half the batch cost may be committed up front.
    ///
    /// A batch size of zero is rejected. The host's own project flow reads a
    /// missing or zero batch size as 1; callers carrying that behaviour over
    /// should substitute 1 before calling.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::EmptyItemId`], [`ProjectError::ZeroBatch`],
    /// [`ProjectError::StartingSpendTooHigh`], or [`ProjectError::Overflow`]
    /// if the batch cost does not fit in a copper total.
    pub fn begin(
        &mut self,
        request: NewProject,
        now: DateTime<Utc>,
    ) -> Result<ProjectId, ProjectError> {
        if request.item_id.trim().is_empty() {
            return Err(ProjectError::EmptyItemId);
        }
        if request.batch_size == 0 {
            return Err(ProjectError::ZeroBatch);
        }

        let limit = max_starting_spend(
            &request.item_price,
            request.batch_size,
            PlatinumPolicy::Ignore,
        )
        .ok_or(ProjectError::Overflow)?
        .copper_value();
        let requested = request.starting_progress.copper_value();
        if requested > limit {
            return Err(ProjectError::StartingSpendTooHigh { requested, limit });
        }

        let id = ProjectId::new();
        info!(
            project_id = %id,
            item = %request.item_id,
            batch_size = request.batch_size,
            starting_progress = requested,
            "project begun"
        );
        self.projects.push(CraftProject {
            id,
            item_id: request.item_id,
            progress_in_copper: requested,
            batch_size: request.batch_size,
            started_at: now,
        });
        Ok(id)
    }

    /// Remove a project, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownProject`] if no project has `id`.
    pub fn abandon(&mut self, id: ProjectId) -> Result<CraftProject, ProjectError> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or(ProjectError::UnknownProject(id))?;
        let removed = self.projects.remove(index);
        info!(project_id = %id, "project abandoned");
        Ok(removed)
    }

    /// Add or remove progress, returning the new progress in copper.
    ///
    /// A setback larger than the current progress leaves the project at
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::UnknownProject`] if no project has `id`, or
    /// [`ProjectError::Overflow`] if an advance overflows.
    pub fn apply_progress(
        &mut self,
        id: ProjectId,
        amount: &Coins,
        direction: ProgressDirection,
    ) -> Result<u64, ProjectError> {
        let project = self
            .projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or(ProjectError::UnknownProject(id))?;

        let delta = amount.copper_value();
        project.progress_in_copper = match direction {
            ProgressDirection::Advance => project
                .progress_in_copper
                .checked_add(delta)
                .ok_or(ProjectError::Overflow)?,
            ProgressDirection::Setback => project.progress_in_copper.saturating_sub(delta),
        };

        debug!(
            project_id = %id,
            ?direction,
            delta,
            progress = project.progress_in_copper,
            "project progress changed"
        );
        Ok(project.progress_in_copper)
    }
}

// ---------------------------------------------------------------------------
// Cost and progress arithmetic
// ---------------------------------------------------------------------------

/// Cost of crafting `batch_size` items at `item_price` each.
pub fn batch_cost(item_price: &Coins, batch_size: u32, policy: PlatinumPolicy) -> Option<Coins> {
    scale(item_price, u64::from(batch_size), policy)
}

/// The most that may be committed when a project begins: half the batch
/// cost, rounded down to the copper.
pub fn max_starting_spend(
    item_price: &Coins,
    batch_size: u32,
    policy: PlatinumPolicy,
) -> Option<Coins> {
    batch_cost(item_price, batch_size, policy).map(|cost| half(&cost, policy))
}

/// Progress toward `cost` as a percentage with two decimal places.
///
/// `None` for a zero cost. Progress past the cost reads above 100.
pub fn progress_percent(project: &CraftProject, cost: &Coins) -> Option<Decimal> {
    let cost = cost.copper_value();
    if cost == 0 {
        return None;
    }
    Decimal::from(project.progress_in_copper)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(Decimal::from(cost))
        .map(|percent| percent.round_dp(2))
}

/// Whether the project has reached `cost`.
pub const fn is_complete(project: &CraftProject, cost: &Coins) -> bool {
    project.progress_in_copper >= cost.copper_value()
}

/// Progress earned by one Craft a Project check.
///
/// The spending limit for the activity's duration and the crafter's level,
/// times `multiplier` (the check's degree of success as the host rules it;
/// `0` on a failure, `2` where a feat doubles progress).
pub fn craft_progress(
    schedule: &SpendingSchedule,
    duration: SpendingDuration,
    level: u32,
    multiplier: u64,
    policy: PlatinumPolicy,
) -> Option<Coins> {
    let limit = schedule.spending_limit(duration, level, policy)?;
    scale(&limit, multiplier, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const IGNORE: PlatinumPolicy = PlatinumPolicy::Ignore;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn request(starting_gold: u64) -> NewProject {
        NewProject {
            item_id: "Compendium.pf2e.equipment-srd.Item.abc".to_owned(),
            item_price: Coins::from_gold(10),
            batch_size: 2,
            starting_progress: Coins::from_gold(starting_gold),
        }
    }

    #[test]
    fn begin_records_the_project() {
        let mut book = ProjectBook::new();
        let id = book.begin(request(4), now());

        let project = id.ok().and_then(|id| book.get(id));
        assert_eq!(project.map(|p| p.progress_in_copper), Some(400));
        assert_eq!(project.map(|p| p.batch_size), Some(2));
        assert_eq!(project.map(|p| p.started_at), Some(now()));
        assert_eq!(book.projects().len(), 1);
    }

    #[test]
    fn begin_rejects_bad_requests() {
        let mut book = ProjectBook::new();

        let blank = NewProject {
            item_id: "  ".to_owned(),
            ..request(0)
        };
        assert_eq!(book.begin(blank, now()), Err(ProjectError::EmptyItemId));

        let empty_batch = NewProject {
            batch_size: 0,
            ..request(0)
        };
        assert_eq!(book.begin(empty_batch, now()), Err(ProjectError::ZeroBatch));

        assert_eq!(
            book.begin(request(11), now()),
            Err(ProjectError::StartingSpendTooHigh {
                requested: 1100,
                limit: 1000
            })
        );
        assert!(book.projects().is_empty());
    }

    #[test]
    fn starting_spend_may_equal_the_limit() {
        let mut book = ProjectBook::new();
        assert!(book.begin(request(10), now()).is_ok());
    }

    #[test]
    fn abandon_removes_only_that_project() {
        let mut book = ProjectBook::new();
        let first = book.begin(request(0), now()).ok();
        let second = book.begin(request(1), now()).ok();

        let removed = first.map(|id| book.abandon(id));
        assert_eq!(removed.and_then(Result::ok).map(|p| p.id), first);
        assert_eq!(book.projects().len(), 1);
        assert_eq!(book.projects().first().map(|p| p.id), second);

        let missing = ProjectId::new();
        assert_eq!(book.abandon(missing), Err(ProjectError::UnknownProject(missing)));
    }

    #[test]
    fn progress_advances_and_sets_back_to_zero() {
        let mut book = ProjectBook::new();
        let Ok(id) = book.begin(request(1), now()) else {
            return;
        };

        let advanced = book.apply_progress(id, &Coins::from_silver(25), ProgressDirection::Advance);
        assert_eq!(advanced, Ok(350));

        let set_back = book.apply_progress(id, &Coins::from_gold(2), ProgressDirection::Setback);
        assert_eq!(set_back, Ok(150));

        let floored = book.apply_progress(id, &Coins::from_gold(50), ProgressDirection::Setback);
        assert_eq!(floored, Ok(0));
    }

    #[test]
    fn progress_on_unknown_project_fails() {
        let mut book = ProjectBook::new();
        let id = ProjectId::new();
        assert_eq!(
            book.apply_progress(id, &Coins::from_gold(1), ProgressDirection::Advance),
            Err(ProjectError::UnknownProject(id))
        );
    }

    #[test]
    fn percent_has_two_decimal_places() {
        let project = CraftProject {
            id: ProjectId::new(),
            item_id: "item".to_owned(),
            progress_in_copper: 100,
            batch_size: 1,
            started_at: now(),
        };
        assert_eq!(
            progress_percent(&project, &Coins::from_copper(300)),
            Some(Decimal::new(3333, 2))
        );
        assert_eq!(
            progress_percent(&project, &Coins::from_gold(1)),
            Some(Decimal::ONE_HUNDRED)
        );
        assert_eq!(progress_percent(&project, &Coins::ZERO), None);
        assert!(is_complete(&project, &Coins::from_gold(1)));
        assert!(!is_complete(&project, &Coins::from_copper(101)));
    }

    #[test]
    fn starting_spend_is_half_the_batch_cost() {
        assert_eq!(
            max_starting_spend(&Coins::new(0, 1, 0, 5), 3, IGNORE),
            Some(Coins::new(0, 1, 5, 7))
        );
        assert_eq!(batch_cost(&Coins::from_gold(4), 0, IGNORE), Some(Coins::ZERO));
    }

    #[test]
    fn craft_progress_scales_the_spending_limit() {
        let schedule = SpendingSchedule::standard();
        assert_eq!(
            craft_progress(&schedule, SpendingDuration::Day, 5, 2, IGNORE),
            Some(Coins::from_gold(16))
        );
        assert_eq!(
            craft_progress(&schedule, SpendingDuration::Hour, 1, 0, IGNORE),
            Some(Coins::ZERO)
        );
    }

    #[test]
    fn book_serializes_as_a_plain_list() {
        let book = ProjectBook::from_projects(vec![CraftProject {
            id: ProjectId::new(),
            item_id: "item".to_owned(),
            progress_in_copper: 5,
            batch_size: 1,
            started_at: now(),
        }]);
        let json = serde_json::to_value(&book).ok();
        assert!(json.as_ref().is_some_and(serde_json::Value::is_array));

        let back: Option<ProjectBook> = json.and_then(|v| serde_json::from_value(v).ok());
        assert_eq!(back, Some(book));
    }
}

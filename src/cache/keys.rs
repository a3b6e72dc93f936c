//! Per-domain cache-key factories.
//!
//! One module per server domain. Every factory derives its keys by
//! extending a previously derived key, never by rebuilding the root by
//! hand, so detail/result/section keys always carry their parent key as
//! a literal prefix and a mutation can invalidate a whole subtree.

use uuid::Uuid;

use crate::domain::common::{ContentFilters, Section};

use super::key::{Filters, QueryKey};

/// Normalize a content filter struct into a key segment bag.
///
/// Unset fields never reach the bag, so "list with no filters" and
/// "list with an empty filter object" address the same cache entry.
fn content_filters(filters: &ContentFilters) -> Filters {
    Filters::new()
        .text_opt("difficulty", filters.difficulty.map(|d| d.as_str()))
        .text_opt("search", filters.search.clone())
        .number_opt("page", filters.page.map(u64::from))
}

/// Keys for reading exam materials.
pub mod reading {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("reading")
    }

    pub fn list() -> QueryKey {
        all().with_name("list")
    }

    pub fn list_filtered(filters: &ContentFilters) -> QueryKey {
        list().with_filters(content_filters(filters))
    }

    pub fn detail(id: Uuid) -> QueryKey {
        all().with_name("detail").with_id(id)
    }
}

/// Keys for listening exam materials.
pub mod listening {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("listening")
    }

    pub fn list() -> QueryKey {
        all().with_name("list")
    }

    pub fn list_filtered(filters: &ContentFilters) -> QueryKey {
        list().with_filters(content_filters(filters))
    }

    pub fn detail(id: Uuid) -> QueryKey {
        all().with_name("detail").with_id(id)
    }
}

/// Keys for practice attempts and the per-section practice catalogue.
pub mod practice {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("practice")
    }

    /// Practice catalogue for one exam section.
    pub fn section_list(section: Section) -> QueryKey {
        all().with_name("sections").with_name(section.as_str())
    }

    pub fn section_list_filtered(section: Section, filters: &ContentFilters) -> QueryKey {
        section_list(section).with_filters(content_filters(filters))
    }

    /// A single practice attempt.
    pub fn attempt(id: Uuid) -> QueryKey {
        all().with_name("attempt").with_id(id)
    }

    /// Scored result of an attempt; extends the attempt key.
    pub fn attempt_result(id: Uuid) -> QueryKey {
        attempt(id).with_name("result")
    }

    /// Questions and material for one section of an attempt.
    pub fn section_data(attempt_id: Uuid, section: Section) -> QueryKey {
        attempt(attempt_id)
            .with_name("section")
            .with_name(section.as_str())
    }
}

/// Keys for teacher classrooms.
pub mod classroom {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("classroom")
    }

    pub fn list() -> QueryKey {
        all().with_name("list")
    }

    pub fn detail(id: Uuid) -> QueryKey {
        all().with_name("detail").with_id(id)
    }

    /// Assignments of a classroom; extends the classroom detail key.
    pub fn assignments(classroom_id: Uuid) -> QueryKey {
        detail(classroom_id).with_name("assignments")
    }

    /// Message feed of a classroom; extends the classroom detail key.
    pub fn messages(classroom_id: Uuid) -> QueryKey {
        detail(classroom_id).with_name("messages")
    }
}

/// Keys for contests.
pub mod contest {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("contest")
    }

    pub fn list() -> QueryKey {
        all().with_name("list")
    }

    pub fn detail(id: Uuid) -> QueryKey {
        all().with_name("detail").with_id(id)
    }

    pub fn leaderboard(contest_id: Uuid) -> QueryKey {
        detail(contest_id).with_name("leaderboard")
    }
}

/// Keys for the signed-in account.
pub mod account {
    use super::*;

    pub fn all() -> QueryKey {
        QueryKey::root("account")
    }

    pub fn me() -> QueryKey {
        all().with_name("me")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::Difficulty;

    #[test]
    fn test_detail_extends_domain_root() {
        let id = Uuid::new_v4();

        assert!(reading::detail(id).starts_with(&reading::all()));
        assert!(listening::detail(id).starts_with(&listening::all()));
        assert!(classroom::detail(id).starts_with(&classroom::all()));
        assert!(contest::detail(id).starts_with(&contest::all()));
    }

    #[test]
    fn test_section_data_extends_attempt() {
        let attempt_id = Uuid::new_v4();

        let data = practice::section_data(attempt_id, Section::Reading);
        assert!(data.starts_with(&practice::attempt(attempt_id)));

        let result = practice::attempt_result(attempt_id);
        assert!(result.starts_with(&practice::attempt(attempt_id)));
    }

    #[test]
    fn test_factories_are_idempotent() {
        let id = Uuid::new_v4();
        let filters = ContentFilters::new().difficulty(Difficulty::Easy);

        assert_eq!(reading::detail(id), reading::detail(id));
        assert_eq!(
            practice::section_list_filtered(Section::Reading, &filters),
            practice::section_list_filtered(Section::Reading, &filters),
        );
    }

    #[test]
    fn test_filtered_section_list_narrows_the_unfiltered_key() {
        let filtered = practice::section_list_filtered(
            Section::Reading,
            &ContentFilters::new().difficulty(Difficulty::Easy),
        );
        let unfiltered = practice::section_list_filtered(Section::Reading, &ContentFilters::new());

        assert_ne!(filtered, unfiltered);
        assert!(filtered.starts_with(&practice::section_list(Section::Reading)));
        assert!(unfiltered.starts_with(&practice::section_list(Section::Reading)));
    }

    #[test]
    fn test_empty_filter_struct_collides_with_plain_list() {
        assert_eq!(
            reading::list_filtered(&ContentFilters::new()),
            reading::list(),
        );
        assert_eq!(
            practice::section_list_filtered(Section::Listening, &ContentFilters::new()),
            practice::section_list(Section::Listening),
        );
    }

    #[test]
    fn test_equal_filters_after_normalization_yield_equal_keys() {
        let explicit = ContentFilters {
            difficulty: Some(Difficulty::Easy),
            search: None,
            page: None,
        };
        let built = ContentFilters::new().difficulty(Difficulty::Easy);

        assert_eq!(
            reading::list_filtered(&explicit),
            reading::list_filtered(&built),
        );
    }

    #[test]
    fn test_nested_classroom_keys_share_the_detail_prefix() {
        let id = Uuid::new_v4();

        assert!(classroom::assignments(id).starts_with(&classroom::detail(id)));
        assert!(classroom::messages(id).starts_with(&classroom::detail(id)));
        assert_ne!(classroom::assignments(id), classroom::messages(id));
    }

    #[test]
    fn test_list_and_detail_are_siblings_under_the_root() {
        let id = Uuid::new_v4();

        assert!(!reading::detail(id).starts_with(&reading::list()));
        assert!(!reading::list().starts_with(&reading::detail(id)));
    }
}

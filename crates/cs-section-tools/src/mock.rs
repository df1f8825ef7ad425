//! Mock search index for testing — evaluates canonical predicates over an
//! in-memory catalog.

use async_trait::async_trait;

use cs_protocol::{
    AcademicLevel, ClassSection, DaySet, InstructionMode, MeetingBlock, SectionPage, TermCode,
    Weekday,
};

use crate::error::{SearchError, SearchResult};
use crate::index::{
    FilterField, Page, Predicate, SearchIndex, SearchQuery, Sort, SortBy, SortDirection,
};

/// A mock index serving a fixed catalog of sections.
pub struct MockSearchIndex {
    sections: Vec<ClassSection>,
    available: bool,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            available: true,
        }
    }

    pub fn with_sections(sections: Vec<ClassSection>) -> Self {
        Self {
            sections,
            available: true,
        }
    }

    /// A mock that fails every call with `BackendUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            sections: Vec::new(),
            available: false,
        }
    }

    /// A small campus catalog covering the interesting cases: multiple
    /// sections per course, asynchronous/online sections, graduate and
    /// evening offerings, gen-ed attributes, honors designation, full and
    /// closed sections, and a two-block lecture+lab schedule.
    pub fn with_sample_catalog() -> Self {
        use Weekday::*;

        let spring26 = TermCode::parse("1263").unwrap();
        let fall26 = TermCode::parse("1269").unwrap();

        let sections = vec![
            SectionSpec {
                subject: "CS",
                catalog_number: "121",
                section_number: "001",
                term: spring26,
                class_number: 10421,
                title: "Computer Science I",
                instructor: "Ada Lovelace",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: Some("CCP 221"),
                seats: (30, 12),
                waitlist: (10, 0),
                meetings: &[(&[Mon, Wed], 540, 615)],
            }
            .build(),
            SectionSpec {
                subject: "CS",
                catalog_number: "121",
                section_number: "002",
                term: spring26,
                class_number: 10422,
                title: "Computer Science I",
                instructor: "Grace Hopper",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: Some("CCP 242"),
                seats: (30, 30),
                waitlist: (10, 3),
                meetings: &[(&[Tue, Thu], 570, 645)],
            }
            .build(),
            SectionSpec {
                subject: "CS",
                catalog_number: "121",
                section_number: "003",
                term: spring26,
                class_number: 10423,
                title: "Computer Science I",
                instructor: "TBA",
                credits: 3.0,
                mode: InstructionMode::Online,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: None,
                seats: (60, 48),
                waitlist: (0, 0),
                meetings: &[],
            }
            .build(),
            SectionSpec {
                subject: "CS",
                catalog_number: "321",
                section_number: "001",
                term: spring26,
                class_number: 10501,
                title: "Data Structures",
                instructor: "Grace Hopper",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: Some("CCP 130"),
                seats: (25, 20),
                waitlist: (5, 0),
                meetings: &[(&[Mon, Wed, Fri], 630, 680)],
            }
            .build(),
            SectionSpec {
                subject: "CS",
                catalog_number: "521",
                section_number: "001",
                term: spring26,
                class_number: 10555,
                title: "Advanced Algorithms",
                instructor: "Donald Knuth",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Graduate,
                attributes: &[],
                designations: &[],
                location: Some("CCP 301"),
                seats: (15, 9),
                waitlist: (5, 0),
                meetings: &[(&[Tue], 1020, 1170)],
            }
            .build(),
            SectionSpec {
                subject: "MATH",
                catalog_number: "170",
                section_number: "001",
                term: spring26,
                class_number: 20110,
                title: "Calculus I",
                instructor: "Emmy Noether",
                credits: 4.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Mathematics"],
                designations: &[],
                location: Some("MB 139"),
                seats: (40, 35),
                waitlist: (5, 0),
                meetings: &[(&[Mon, Tue, Wed, Fri], 540, 590)],
            }
            .build(),
            SectionSpec {
                subject: "MATH",
                catalog_number: "170",
                section_number: "002",
                term: spring26,
                class_number: 20111,
                title: "Calculus I",
                instructor: "TBA",
                credits: 4.0,
                mode: InstructionMode::Hybrid,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Mathematics"],
                designations: &[],
                location: Some("MB 124"),
                seats: (40, 18),
                waitlist: (5, 0),
                meetings: &[(&[Tue, Thu], 720, 795)],
            }
            .build(),
            SectionSpec {
                subject: "ENGL",
                catalog_number: "101",
                section_number: "001",
                term: spring26,
                class_number: 30210,
                title: "Writing and Rhetoric I",
                instructor: "Maya Angelou",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Writing"],
                designations: &[],
                location: Some("LA 208"),
                seats: (24, 10),
                waitlist: (0, 0),
                meetings: &[(&[Mon, Wed, Fri], 600, 650)],
            }
            .build(),
            SectionSpec {
                subject: "ENGL",
                catalog_number: "102",
                section_number: "001",
                term: spring26,
                class_number: 30215,
                title: "Writing and Rhetoric II",
                instructor: "Maya Angelou",
                credits: 3.0,
                mode: InstructionMode::Online,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Writing"],
                designations: &[],
                location: None,
                seats: (24, 6),
                waitlist: (0, 0),
                meetings: &[],
            }
            .build(),
            SectionSpec {
                subject: "HIST",
                catalog_number: "111",
                section_number: "001",
                term: spring26,
                class_number: 40120,
                title: "World History to 1500",
                instructor: "Howard Zinn",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Humanities"],
                designations: &["HON"],
                location: Some("LA 106"),
                seats: (20, 20),
                waitlist: (0, 0),
                meetings: &[(&[Tue, Thu], 1020, 1095)],
            }
            .build(),
            SectionSpec {
                subject: "PSYC",
                catalog_number: "101",
                section_number: "001",
                term: spring26,
                class_number: 50130,
                title: "Introduction to Psychology",
                instructor: "Carl Rogers",
                credits: 3.0,
                mode: InstructionMode::Online,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Social Sciences"],
                designations: &[],
                location: None,
                seats: (100, 62),
                waitlist: (20, 0),
                meetings: &[],
            }
            .build(),
            SectionSpec {
                subject: "BIOL",
                catalog_number: "191",
                section_number: "001",
                term: spring26,
                class_number: 60140,
                title: "Biology I: Cellular and Molecular",
                instructor: "Barbara McClintock",
                credits: 4.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &["Foundations of Natural Sciences"],
                designations: &[],
                location: Some("SCNC 101"),
                seats: (48, 31),
                waitlist: (10, 0),
                meetings: &[(&[Mon, Wed, Fri], 540, 590), (&[Thu], 780, 900)],
            }
            .build(),
            SectionSpec {
                subject: "ACCT",
                catalog_number: "202",
                section_number: "001",
                term: spring26,
                class_number: 70150,
                title: "Managerial Accounting",
                instructor: "TBA",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: Some("BUS 210"),
                seats: (0, 0),
                waitlist: (0, 0),
                meetings: &[(&[Mon, Wed], 840, 915)],
            }
            .build(),
            SectionSpec {
                subject: "CS",
                catalog_number: "121",
                section_number: "001",
                term: fall26,
                class_number: 90001,
                title: "Computer Science I",
                instructor: "Ada Lovelace",
                credits: 3.0,
                mode: InstructionMode::InPerson,
                level: AcademicLevel::Undergraduate,
                attributes: &[],
                designations: &[],
                location: Some("CCP 221"),
                seats: (30, 0),
                waitlist: (10, 0),
                meetings: &[(&[Mon, Wed], 540, 615)],
            }
            .build(),
        ];

        Self::with_sections(sections)
    }

    fn matches(section: &ClassSection, field: FilterField, predicate: &Predicate) -> bool {
        match (field, predicate) {
            (FilterField::Term, Predicate::Exact { value }) => section.term.code() == *value,
            (FilterField::Subject, Predicate::Exact { value }) => {
                section.subject.eq_ignore_ascii_case(value)
            }
            (FilterField::CatalogNumber, Predicate::Exact { value }) => {
                section.catalog_number.eq_ignore_ascii_case(value)
            }
            (FilterField::CatalogNumber, Predicate::Prefix { value }) => {
                section.catalog_number.starts_with(value.as_str())
            }
            (FilterField::Instructor, Predicate::AnyOf { values }) => values.iter().any(|token| {
                section
                    .instructor
                    .to_lowercase()
                    .contains(&token.to_lowercase())
            }),
            (FilterField::InstructionMode, Predicate::Exact { value }) => {
                section.instruction_mode.key() == *value
            }
            (FilterField::AcademicLevel, Predicate::Exact { value }) => {
                section.academic_level.key() == *value
            }
            (FilterField::Credits, Predicate::Exact { value }) => value
                .parse::<f32>()
                .is_ok_and(|c| (section.credits - c).abs() < f32::EPSILON),
            (FilterField::MeetingTime, Predicate::StartsWithin { start, end }) => section
                .meetings
                .iter()
                .any(|m| m.start_minute >= *start && m.start_minute < *end),
            (FilterField::HasOpenSeats, Predicate::Flag { value }) => {
                section.has_open_seats() == *value
            }
            (FilterField::Keyword, Predicate::Text { value }) => {
                let needle = value.to_lowercase();
                section.title.to_lowercase().contains(&needle)
                    || section
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
            (FilterField::Attributes, Predicate::AnyOf { values }) => values
                .iter()
                .any(|v| section.attributes.iter().any(|a| a.eq_ignore_ascii_case(v))),
            (FilterField::RequirementDesignations, Predicate::AnyOf { values }) => {
                values.iter().any(|v| {
                    section
                        .requirement_designations
                        .iter()
                        .any(|d| d.eq_ignore_ascii_case(v))
                })
            }
            _ => false,
        }
    }

    fn sort_sections(sections: &mut [ClassSection], sort: Sort) {
        let base_key = |s: &ClassSection| {
            (
                s.subject.clone(),
                s.catalog_number.clone(),
                s.section_number.clone(),
            )
        };
        match sort.by {
            SortBy::CatalogNumber => sections.sort_by_key(base_key),
            SortBy::Title => sections.sort_by_key(|s| (s.title.clone(), base_key(s))),
            SortBy::Enrollment => sections.sort_by_key(|s| (s.seats_filled, base_key(s))),
        }
        if sort.direction == SortDirection::Descending {
            sections.reverse();
        }
    }
}

impl Default for MockSearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn search(&self, query: &SearchQuery) -> SearchResult<SectionPage> {
        if !self.available {
            return Err(SearchError::BackendUnavailable("mock offline".into()));
        }
        let page: Page = query.page.clamped();

        let mut hits: Vec<ClassSection> = self
            .sections
            .iter()
            .filter(|s| {
                query
                    .predicates
                    .iter()
                    .all(|(field, predicate)| Self::matches(s, field, predicate))
            })
            .cloned()
            .collect();
        Self::sort_sections(&mut hits, query.sort);

        let total_hits = hits.len() as u64;
        let start = ((page.page - 1) * page.per_page) as usize;
        let sections: Vec<ClassSection> = hits
            .into_iter()
            .skip(start)
            .take(page.per_page as usize)
            .collect();

        Ok(SectionPage {
            sections,
            total_hits,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn fetch(&self, class_number: u32) -> SearchResult<ClassSection> {
        if !self.available {
            return Err(SearchError::BackendUnavailable("mock offline".into()));
        }
        self.sections
            .iter()
            .find(|s| s.class_number == class_number)
            .cloned()
            .ok_or_else(|| SearchError::NotFound(format!("class number {class_number}")))
    }

    async fn distinct_values(&self, field: FilterField) -> SearchResult<Vec<String>> {
        if !self.available {
            return Err(SearchError::BackendUnavailable("mock offline".into()));
        }
        let mut values: Vec<String> = match field {
            FilterField::Subject => self.sections.iter().map(|s| s.subject.clone()).collect(),
            FilterField::InstructionMode => self
                .sections
                .iter()
                .map(|s| s.instruction_mode.key().to_string())
                .collect(),
            FilterField::AcademicLevel => self
                .sections
                .iter()
                .map(|s| s.academic_level.key().to_string())
                .collect(),
            FilterField::Attributes => self
                .sections
                .iter()
                .flat_map(|s| s.attributes.clone())
                .collect(),
            FilterField::RequirementDesignations => self
                .sections
                .iter()
                .flat_map(|s| s.requirement_designations.clone())
                .collect(),
            other => {
                return Err(SearchError::invalid_filter(
                    other.as_str(),
                    "",
                    "field is not enumerable",
                ));
            }
        };
        values.sort();
        values.dedup();
        Ok(values)
    }
}

/// Compact section constructor for the sample catalog.
struct SectionSpec<'a> {
    subject: &'a str,
    catalog_number: &'a str,
    section_number: &'a str,
    term: TermCode,
    class_number: u32,
    title: &'a str,
    instructor: &'a str,
    credits: f32,
    mode: InstructionMode,
    level: AcademicLevel,
    attributes: &'a [&'a str],
    designations: &'a [&'a str],
    location: Option<&'a str>,
    seats: (u32, u32),
    waitlist: (u32, u32),
    meetings: &'a [(&'a [Weekday], u16, u16)],
}

impl SectionSpec<'_> {
    fn build(self) -> ClassSection {
        ClassSection {
            subject: self.subject.into(),
            catalog_number: self.catalog_number.into(),
            section_number: self.section_number.into(),
            term: self.term,
            class_number: self.class_number,
            title: self.title.into(),
            description: None,
            instructor: self.instructor.into(),
            credits: self.credits,
            instruction_mode: self.mode,
            academic_level: self.level,
            attributes: self.attributes.iter().map(|s| s.to_string()).collect(),
            requirement_designations: self.designations.iter().map(|s| s.to_string()).collect(),
            session_code: Some("1".into()),
            location: self.location.map(Into::into),
            seats_capacity: self.seats.0,
            seats_filled: self.seats.1,
            waitlist_capacity: self.waitlist.0,
            waitlist_filled: self.waitlist.1,
            meetings: self
                .meetings
                .iter()
                .map(|(days, start, end)| {
                    MeetingBlock::new(DaySet::new(days), *start, *end)
                        .expect("sample catalog times are valid")
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(value: &str) -> Predicate {
        Predicate::Exact {
            value: value.into(),
        }
    }

    #[tokio::test]
    async fn search_filters_and_sorts() {
        let index = MockSearchIndex::with_sample_catalog();
        let mut query = SearchQuery::default();
        query.predicates.insert(FilterField::Subject, exact("CS"));
        query.predicates.insert(FilterField::Term, exact("1263"));

        let page = index.search(&query).await.unwrap();
        assert_eq!(page.total_hits, 5);
        // Default order: (subject, catalog, section) ascending.
        assert_eq!(page.sections[0].class_number, 10421);
        assert_eq!(page.sections[1].class_number, 10422);
    }

    #[tokio::test]
    async fn search_prefix_predicate() {
        let index = MockSearchIndex::with_sample_catalog();
        let mut query = SearchQuery::default();
        query.predicates.insert(FilterField::Subject, exact("CS"));
        query.predicates.insert(FilterField::Term, exact("1263"));
        query.predicates.insert(
            FilterField::CatalogNumber,
            Predicate::Prefix { value: "1".into() },
        );

        let page = index.search(&query).await.unwrap();
        assert_eq!(page.total_hits, 3); // the three CS 121 sections
        assert!(page.sections.iter().all(|s| s.catalog_number == "121"));
    }

    #[tokio::test]
    async fn search_open_seats_flag() {
        let index = MockSearchIndex::with_sample_catalog();
        let mut query = SearchQuery::default();
        query.predicates.insert(FilterField::Subject, exact("CS"));
        query.predicates.insert(FilterField::Term, exact("1263"));
        query.predicates.insert(
            FilterField::CatalogNumber,
            exact("121"),
        );
        query
            .predicates
            .insert(FilterField::HasOpenSeats, Predicate::Flag { value: true });

        let page = index.search(&query).await.unwrap();
        // 10422 is full; 10421 and 10423 remain.
        assert_eq!(page.total_hits, 2);
        assert!(page.sections.iter().all(|s| s.class_number != 10422));
    }

    #[tokio::test]
    async fn search_is_idempotent() {
        let index = MockSearchIndex::with_sample_catalog();
        let mut query = SearchQuery::default();
        query.predicates.insert(FilterField::Term, exact("1263"));

        let first = index.search(&query).await.unwrap();
        let second = index.search(&query).await.unwrap();
        let first_ids: Vec<u32> = first.sections.iter().map(|s| s.class_number).collect();
        let second_ids: Vec<u32> = second.sections.iter().map(|s| s.class_number).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn pagination_clamps_and_pages() {
        let index = MockSearchIndex::with_sample_catalog();
        let mut query = SearchQuery::default();
        query.predicates.insert(FilterField::Term, exact("1263"));
        query.page = Page::new(0, 10_000);

        let page = index.search(&query).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, crate::index::MAX_PER_PAGE);

        query.page = Page::new(2, 5);
        let second = index.search(&query).await.unwrap();
        assert_eq!(second.sections.len(), 5);
        assert_eq!(second.page, 2);
    }

    #[tokio::test]
    async fn fetch_found_and_missing() {
        let index = MockSearchIndex::with_sample_catalog();
        let section = index.fetch(10421).await.unwrap();
        assert_eq!(section.label(), "CS 121-001");

        let err = index.fetch(99999).await.unwrap_err();
        assert_eq!(err, SearchError::NotFound("class number 99999".into()));
    }

    #[tokio::test]
    async fn distinct_values_deduplicates() {
        let index = MockSearchIndex::with_sample_catalog();
        let subjects = index.distinct_values(FilterField::Subject).await.unwrap();
        assert_eq!(
            subjects,
            vec!["ACCT", "BIOL", "CS", "ENGL", "HIST", "MATH", "PSYC"]
        );

        let designations = index
            .distinct_values(FilterField::RequirementDesignations)
            .await
            .unwrap();
        assert_eq!(designations, vec!["HON"]);
    }

    #[tokio::test]
    async fn unavailable_mock_fails_every_call() {
        let index = MockSearchIndex::unavailable();
        assert!(index.search(&SearchQuery::default()).await.is_err());
        assert!(index.fetch(1).await.is_err());
        assert!(index.distinct_values(FilterField::Subject).await.is_err());
    }
}

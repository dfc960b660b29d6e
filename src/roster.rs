use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub const MARK_MIN: i64 = 0;
pub const MARK_MAX: i64 = 100;
pub const TOTAL_MAX: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Maths,
    Physics,
    English,
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Maths => "maths",
            Subject::Physics => "physics",
            Subject::English => "english",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("student name must not be empty")]
    EmptyName,

    #[error("{subject} mark {value} is outside 0..=100")]
    OutOfRange { subject: Subject, value: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Best to worst.
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// | Percentage | Grade |
    /// |------------|-------|
    /// | >= 90      | A     |
    /// | >= 80      | B     |
    /// | >= 70      | C     |
    /// | >= 60      | D     |
    /// | < 60       | F     |
    pub fn from_percentage(p: f64) -> Grade {
        match p {
            p if p >= 90.0 => Grade::A,
            p if p >= 80.0 => Grade::B,
            p if p >= 70.0 => Grade::C,
            p if p >= 60.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeFilter {
    #[default]
    All,
    Only(Grade),
}

impl GradeFilter {
    pub fn matches(self, grade: Grade) -> bool {
        match self {
            GradeFilter::All => true,
            GradeFilter::Only(g) => g == grade,
        }
    }
}

impl fmt::Display for GradeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeFilter::All => f.write_str("All"),
            GradeFilter::Only(g) => g.fmt(f),
        }
    }
}

impl FromStr for GradeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            return Ok(GradeFilter::All);
        }
        s.parse::<Grade>().map(GradeFilter::Only)
    }
}

impl Serialize for GradeFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("ascending") || t.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Ascending)
        } else if t.eq_ignore_ascii_case("descending") || t.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Descending)
        } else {
            Err(format!("unknown sort direction: {t}"))
        }
    }
}

/// A stored row. Total, percentage and grade are always derived from the
/// three marks, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub id: Uuid,
    pub name: String,
    pub maths: u8,
    pub physics: u8,
    pub english: u8,
}

impl StudentRecord {
    pub fn total(&self) -> u32 {
        u32::from(self.maths) + u32::from(self.physics) + u32::from(self.english)
    }

    // Multiply before dividing so whole-number percentages (90, 80, ...) are exact.
    pub fn percentage(&self) -> f64 {
        f64::from(self.total()) * 100.0 / f64::from(TOTAL_MAX)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub id: String,
    pub name: String,
    pub maths: u8,
    pub physics: u8,
    pub english: u8,
    pub total_marks: u32,
    pub percentage: f64,
    pub grade: Grade,
}

impl From<&StudentRecord> for EnrichedRecord {
    fn from(r: &StudentRecord) -> Self {
        EnrichedRecord {
            id: r.id.to_string(),
            name: r.name.clone(),
            maths: r.maths,
            physics: r.physics,
            english: r.english,
            total_marks: r.total(),
            percentage: r.percentage(),
            grade: r.grade(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeCounts {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeCounts {
    fn bump(&mut self, grade: Grade) {
        match grade {
            Grade::A => self.a += 1,
            Grade::B => self.b += 1,
            Grade::C => self.c += 1,
            Grade::D => self.d += 1,
            Grade::F => self.f += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub student_count: usize,
    pub average_percentage: f64,
    pub highest_total: u32,
    pub lowest_total: u32,
    pub grade_counts: GradeCounts,
}

/// Rounds half away from zero to 2 decimals.
pub fn round_2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn check_mark(subject: Subject, value: i64) -> Result<u8, ValidationError> {
    if !(MARK_MIN..=MARK_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange { subject, value });
    }
    u8::try_from(value).map_err(|_| ValidationError::OutOfRange { subject, value })
}

/// Session roster. Append-only: there is no update or delete.
#[derive(Debug, Default)]
pub struct Roster {
    records: Vec<StudentRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(
        &mut self,
        name: &str,
        maths: i64,
        physics: i64,
        english: i64,
    ) -> Result<&StudentRecord, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let maths = check_mark(Subject::Maths, maths)?;
        let physics = check_mark(Subject::Physics, physics)?;
        let english = check_mark(Subject::English, english)?;

        self.records.push(StudentRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            maths,
            physics,
            english,
        });
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter then (optionally) sort. `None` keeps insertion order.
    pub fn view(&self, filter: GradeFilter, sort: Option<SortDirection>) -> Vec<&StudentRecord> {
        let filtered = filter_by_grade(&self.records, filter);
        match sort {
            Some(direction) => sort_by_percentage(filtered, direction),
            None => filtered,
        }
    }
}

pub fn compute_derived<'a, I>(records: I) -> Vec<EnrichedRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    records.into_iter().map(EnrichedRecord::from).collect()
}

/// `None` when there is nothing to summarise.
pub fn compute_metrics<'a, I>(records: I) -> Option<ClassStats>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut count: usize = 0;
    let mut pct_sum: f64 = 0.0;
    let mut highest: u32 = 0;
    let mut lowest: u32 = u32::MAX;
    let mut grade_counts = GradeCounts::default();

    for r in records {
        let total = r.total();
        count += 1;
        pct_sum += r.percentage();
        highest = highest.max(total);
        lowest = lowest.min(total);
        grade_counts.bump(r.grade());
    }

    if count == 0 {
        return None;
    }

    Some(ClassStats {
        student_count: count,
        average_percentage: round_2(pct_sum / count as f64),
        highest_total: highest,
        lowest_total: lowest,
        grade_counts,
    })
}

pub fn filter_by_grade(records: &[StudentRecord], filter: GradeFilter) -> Vec<&StudentRecord> {
    records.iter().filter(|r| filter.matches(r.grade())).collect()
}

/// Stable in both directions: equal percentages keep their incoming order.
pub fn sort_by_percentage<R>(mut records: Vec<R>, direction: SortDirection) -> Vec<R>
where
    R: Borrow<StudentRecord>,
{
    records.sort_by(|a, b| {
        let (pa, pb) = (a.borrow().percentage(), b.borrow().percentage());
        match direction {
            SortDirection::Ascending => pa.total_cmp(&pb),
            SortDirection::Descending => pb.total_cmp(&pa),
        }
    });
    records
}

/// `All` followed by each grade present in `records`, best first.
pub fn grade_options(records: &[StudentRecord]) -> Vec<GradeFilter> {
    let mut out = vec![GradeFilter::All];
    for g in Grade::ALL {
        if records.iter().any(|r| r.grade() == g) {
            out.push(GradeFilter::Only(g));
        }
    }
    out
}

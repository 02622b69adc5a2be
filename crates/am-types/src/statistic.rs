use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{StatError, StatResult};
use crate::language::{CodingLanguage, FileDomain, WeightedSkill};

/// Aggregation tier a statistic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatScope {
    File,
    Project,
    User,
}

impl StatScope {
    pub fn as_str(self) -> &'static str {
        match self {
            StatScope::File => "file",
            StatScope::Project => "project",
            StatScope::User => "user",
        }
    }

    /// Resolves a template name within this scope's registry
    pub fn template_by_name(self, name: &str) -> Option<StatisticTemplate> {
        match self {
            StatScope::File => FileStat::by_name(name).map(FileStat::template),
            StatScope::Project => ProjectStat::by_name(name).map(ProjectStat::template),
            StatScope::User => UserStat::by_name(name).map(UserStat::template),
        }
    }

    pub fn templates(self) -> Vec<StatisticTemplate> {
        match self {
            StatScope::File => FileStat::ALL.iter().map(|s| s.template()).collect(),
            StatScope::Project => ProjectStat::ALL.iter().map(|s| s.template()).collect(),
            StatScope::User => UserStat::ALL.iter().map(|s| s.template()).collect(),
        }
    }
}

impl fmt::Display for StatScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the value a template accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
    Boolean,
    Date,
    FileDomain,
    CodingLanguage,
    StringList,
    WeightedSkills,
    LanguageRatio,
    DomainRatio,
    PathCounts,
}

impl ValueKind {
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Float | ValueKind::Text | ValueKind::Boolean
        )
    }

    /// Storage column type for a value of this kind
    pub fn column_type(self) -> ColumnType {
        match self {
            ValueKind::Integer => ColumnType::Integer,
            ValueKind::Float => ColumnType::Float,
            ValueKind::Text => ColumnType::Text,
            ValueKind::Boolean => ColumnType::Boolean,
            ValueKind::Date => ColumnType::DateTime,
            _ => ColumnType::Json,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Date => "date",
            ValueKind::FileDomain => "file domain",
            ValueKind::CodingLanguage => "coding language",
            ValueKind::StringList => "string list",
            ValueKind::WeightedSkills => "weighted skill list",
            ValueKind::LanguageRatio => "language ratio",
            ValueKind::DomainRatio => "domain ratio",
            ValueKind::PathCounts => "path counts",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Boolean,
    DateTime,
    Json,
}

/// Immutable descriptor of a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatisticTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub expected_type: ValueKind,
    pub scope: StatScope,
}

impl StatisticTemplate {
    /// Lowercase column name used when persisting as a row
    pub fn column_name(&self) -> String {
        self.name.to_lowercase()
    }
}

macro_rules! stat_collection {
    (
        $(#[$meta:meta])*
        $collection:ident, $scope:expr, {
            $($variant:ident => ($name:literal, $kind:ident, $desc:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $collection {
            $($variant),+
        }

        impl $collection {
            pub const ALL: &'static [$collection] = &[$($collection::$variant),+];

            pub const fn template(self) -> StatisticTemplate {
                match self {
                    $($collection::$variant => StatisticTemplate {
                        name: $name,
                        description: $desc,
                        expected_type: ValueKind::$kind,
                        scope: $scope,
                    }),+
                }
            }

            pub fn by_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|s| s.template().name == name)
            }
        }

        impl From<$collection> for StatisticTemplate {
            fn from(stat: $collection) -> Self {
                stat.template()
            }
        }
    };
}

stat_collection! {
    /// Metrics recorded for a single file
    FileStat, StatScope::File, {
        LinesInFile => ("LINES_IN_FILE", Integer, "number of lines in a file"),
        DateCreated => ("DATE_CREATED", Date, "creation date of a file"),
        DateModified => ("DATE_MODIFIED", Date, "last date the file was modified"),
        FileSizeBytes => ("FILE_SIZE_BYTES", Integer, "number of bytes in the file"),
        PercentageLinesCommitted => ("PERCENTAGE_LINES_COMMITTED", Float, "percentage of lines authored by the user"),
        TypeOfFile => ("TYPE_OF_FILE", FileDomain, "kind of work the file represents"),
        CodingLanguage => ("CODING_LANGUAGE", CodingLanguage, "programming language of the file"),
        NumberOfFunctions => ("NUMBER_OF_FUNCTIONS", Integer, "number of functions in the file"),
        NumberOfClasses => ("NUMBER_OF_CLASSES", Integer, "number of classes in the file"),
        NumberOfInterfaces => ("NUMBER_OF_INTERFACES", Integer, "number of interfaces in the file"),
        ImportedPackages => ("IMPORTED_PACKAGES", StringList, "external packages imported by the file"),
        WordCount => ("WORD_COUNT", Integer, "number of words in the file"),
        CharacterCount => ("CHARACTER_COUNT", Integer, "number of alphanumeric characters in the file"),
        SentenceCount => ("SENTENCE_COUNT", Integer, "number of sentences in the file"),
        AriWritingScore => ("ARI_WRITING_SCORE", Float, "automated readability index of the text"),
    }
}

stat_collection! {
    /// Metrics recorded for a project
    ProjectStat, StatScope::Project, {
        ProjectStartDate => ("PROJECT_START_DATE", Date, "earliest creation date across project files"),
        ProjectEndDate => ("PROJECT_END_DATE", Date, "latest modification date across project files"),
        IsGroupProject => ("IS_GROUP_PROJECT", Boolean, "whether more than one author committed"),
        TotalAuthors => ("TOTAL_AUTHORS", Integer, "number of distinct commit authors"),
        AuthorsPerFile => ("AUTHORS_PER_FILE", PathCounts, "distinct authors per tracked path"),
        UserCommitPercentage => ("USER_COMMIT_PERCENTAGE", Float, "share of commits authored by the user"),
        TotalContributionPercentage => ("TOTAL_CONTRIBUTION_PERCENTAGE", Float, "share of final lines authored by the user"),
        CodingLanguageRatio => ("CODING_LANGUAGE_RATIO", LanguageRatio, "share of code per programming language"),
        TotalProjectLines => ("TOTAL_PROJECT_LINES", Float, "number of lines in the project"),
        ActivityTypeContributions => ("ACTIVITY_TYPE_CONTRIBUTIONS", DomainRatio, "share of contribution per file domain"),
        ProjectSkillsDemonstrated => ("PROJECT_SKILLS_DEMONSTRATED", WeightedSkills, "skills demonstrated by the project"),
        ProjectFrameworks => ("PROJECT_FRAMEWORKS", WeightedSkills, "frameworks and packages used by the project"),
    }
}

stat_collection! {
    /// Metrics recorded for a user portfolio
    UserStat, StatScope::User, {
        UserStartDate => ("USER_START_DATE", Date, "earliest project start date"),
        UserEndDate => ("USER_END_DATE", Date, "latest project end date"),
        UserSkills => ("USER_SKILLS", WeightedSkills, "skills weighted across projects"),
        UserCodingLanguageRatio => ("USER_CODING_LANGUAGE_RATIO", LanguageRatio, "share of code per language across projects"),
    }
}

/// Value carried by a statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
    Date(DateTime<Utc>),
    FileDomain(FileDomain),
    CodingLanguage(CodingLanguage),
    StringList(Vec<String>),
    WeightedSkills(Vec<WeightedSkill>),
    LanguageRatio(IndexMap<CodingLanguage, f64>),
    DomainRatio(IndexMap<FileDomain, f64>),
    PathCounts(IndexMap<String, i64>),
}

impl StatValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StatValue::Integer(_) => ValueKind::Integer,
            StatValue::Float(_) => ValueKind::Float,
            StatValue::Text(_) => ValueKind::Text,
            StatValue::Boolean(_) => ValueKind::Boolean,
            StatValue::Date(_) => ValueKind::Date,
            StatValue::FileDomain(_) => ValueKind::FileDomain,
            StatValue::CodingLanguage(_) => ValueKind::CodingLanguage,
            StatValue::StringList(_) => ValueKind::StringList,
            StatValue::WeightedSkills(_) => ValueKind::WeightedSkills,
            StatValue::LanguageRatio(_) => ValueKind::LanguageRatio,
            StatValue::DomainRatio(_) => ValueKind::DomainRatio,
            StatValue::PathCounts(_) => ValueKind::PathCounts,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StatValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view; integers widen to floats
    pub fn as_float(&self) -> Option<f64> {
        match self {
            StatValue::Float(v) => Some(*v),
            StatValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StatValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            StatValue::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_file_domain(&self) -> Option<FileDomain> {
        match self {
            StatValue::FileDomain(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_language(&self) -> Option<CodingLanguage> {
        match self {
            StatValue::CodingLanguage(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            StatValue::StringList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_weighted_skills(&self) -> Option<&[WeightedSkill]> {
        match self {
            StatValue::WeightedSkills(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_language_ratio(&self) -> Option<&IndexMap<CodingLanguage, f64>> {
        match self {
            StatValue::LanguageRatio(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_domain_ratio(&self) -> Option<&IndexMap<FileDomain, f64>> {
        match self {
            StatValue::DomainRatio(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_path_counts(&self) -> Option<&IndexMap<String, i64>> {
        match self {
            StatValue::PathCounts(v) => Some(v),
            _ => None,
        }
    }

    /// JSON form used for row persistence. Enumerations become their
    /// string value and enumeration map keys their display name.
    pub fn to_json(&self) -> Value {
        match self {
            StatValue::Integer(v) => json!(v),
            StatValue::Float(v) => json!(v),
            StatValue::Text(v) => json!(v),
            StatValue::Boolean(v) => json!(v),
            StatValue::Date(v) => json!(v.to_rfc3339()),
            StatValue::FileDomain(v) => json!(v.as_str()),
            StatValue::CodingLanguage(v) => json!(v.display_name()),
            StatValue::StringList(v) => json!(v),
            StatValue::WeightedSkills(v) => Value::Array(
                v.iter()
                    .map(|s| json!({ "skill_name": s.skill_name, "weight": s.weight }))
                    .collect(),
            ),
            StatValue::LanguageRatio(v) => Value::Object(
                v.iter()
                    .map(|(lang, ratio)| (lang.display_name().to_string(), json!(ratio)))
                    .collect(),
            ),
            StatValue::DomainRatio(v) => Value::Object(
                v.iter()
                    .map(|(domain, ratio)| (domain.as_str().to_string(), json!(ratio)))
                    .collect(),
            ),
            StatValue::PathCounts(v) => Value::Object(
                v.iter().map(|(path, n)| (path.clone(), json!(n))).collect(),
            ),
        }
    }
}

/// A template paired with a value of the expected kind
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    template: StatisticTemplate,
    value: StatValue,
}

impl Statistic {
    pub fn new(template: impl Into<StatisticTemplate>, value: StatValue) -> StatResult<Self> {
        let template = template.into();
        let actual = value.kind();
        if actual != template.expected_type {
            return Err(StatError::TypeMismatch {
                name: template.name,
                expected: template.expected_type,
                actual,
            });
        }
        Ok(Self { template, value })
    }

    pub fn template(&self) -> StatisticTemplate {
        self.template
    }

    pub fn value(&self) -> &StatValue {
        &self.value
    }

    pub fn into_value(self) -> StatValue {
        self.value
    }
}

/// Ordered upsert map from template to statistic.
///
/// Replacing a statistic keeps the position of its first insertion.
/// Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticIndex {
    stats: IndexMap<StatisticTemplate, Statistic>,
}

impl StatisticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stat: Statistic) {
        self.stats.insert(stat.template, stat);
    }

    /// Builds and stores a statistic in one step
    pub fn insert(
        &mut self,
        template: impl Into<StatisticTemplate>,
        value: StatValue,
    ) -> StatResult<()> {
        self.add(Statistic::new(template, value)?);
        Ok(())
    }

    pub fn extend(&mut self, stats: impl IntoIterator<Item = Statistic>) {
        for stat in stats {
            self.add(stat);
        }
    }

    /// Upserts every statistic of `other` into this index
    pub fn merge(&mut self, other: StatisticIndex) {
        self.extend(other.stats.into_values());
    }

    pub fn get(&self, template: impl Into<StatisticTemplate>) -> Option<&Statistic> {
        self.stats.get(&template.into())
    }

    pub fn get_value(&self, template: impl Into<StatisticTemplate>) -> Option<&StatValue> {
        self.get(template).map(Statistic::value)
    }

    pub fn contains(&self, template: impl Into<StatisticTemplate>) -> bool {
        self.stats.contains_key(&template.into())
    }

    pub fn remove(&mut self, template: impl Into<StatisticTemplate>) -> Option<Statistic> {
        self.stats.shift_remove(&template.into())
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statistic> {
        self.stats.values()
    }

    pub fn to_dict(&self) -> IndexMap<&'static str, StatValue> {
        self.stats
            .iter()
            .map(|(template, stat)| (template.name, stat.value.clone()))
            .collect()
    }

    /// Rebuilds an index from a `to_dict` mapping against one scope's registry
    pub fn from_dict<'a>(
        scope: StatScope,
        dict: impl IntoIterator<Item = (&'a str, StatValue)>,
    ) -> StatResult<Self> {
        let mut index = Self::new();
        for (name, value) in dict {
            let template =
                scope
                    .template_by_name(name)
                    .ok_or_else(|| StatError::UnknownStatistic {
                        scope,
                        name: name.to_string(),
                    })?;
            index.insert(template, value)?;
        }
        Ok(index)
    }

    /// Flattens the index into a row with one lowercase column per statistic
    pub fn to_row(&self) -> Map<String, Value> {
        self.stats
            .iter()
            .map(|(template, stat)| (template.column_name(), stat.value.to_json()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a StatisticIndex {
    type Item = &'a Statistic;
    type IntoIter = indexmap::map::Values<'a, StatisticTemplate, Statistic>;

    fn into_iter(self) -> Self::IntoIter {
        self.stats.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique_per_scope() {
        for scope in [StatScope::File, StatScope::Project, StatScope::User] {
            let templates = scope.templates();
            let mut names: Vec<_> = templates.iter().map(|t| t.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), templates.len(), "duplicate name in {scope}");
            assert!(templates.iter().all(|t| t.scope == scope));
        }
    }

    #[test]
    fn test_primitive_type_mismatch_is_rejected() {
        let err = Statistic::new(FileStat::LinesInFile, StatValue::Text("ten".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            StatError::TypeMismatch {
                name: "LINES_IN_FILE",
                expected: ValueKind::Integer,
                actual: ValueKind::Text,
            }
        ));

        assert!(Statistic::new(FileStat::LinesInFile, StatValue::Integer(10)).is_ok());
        assert!(Statistic::new(FileStat::AriWritingScore, StatValue::Integer(1)).is_err());
        assert!(Statistic::new(ProjectStat::IsGroupProject, StatValue::Boolean(true)).is_ok());
    }

    #[test]
    fn test_add_upserts_and_keeps_first_position() {
        let mut index = StatisticIndex::new();
        index.insert(FileStat::LinesInFile, StatValue::Integer(1)).unwrap();
        index.insert(FileStat::FileSizeBytes, StatValue::Integer(20)).unwrap();
        index.insert(FileStat::LinesInFile, StatValue::Integer(5)).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get_value(FileStat::LinesInFile),
            Some(&StatValue::Integer(5))
        );
        let names: Vec<_> = index.iter().map(|s| s.template().name).collect();
        assert_eq!(names, vec!["LINES_IN_FILE", "FILE_SIZE_BYTES"]);
    }

    #[test]
    fn test_missing_lookup_is_absent() {
        let index = StatisticIndex::new();
        assert!(index.get(FileStat::WordCount).is_none());
        assert!(!index.contains(FileStat::WordCount));
        assert!(index.is_empty());
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = StatisticIndex::new();
        a.insert(FileStat::WordCount, StatValue::Integer(3)).unwrap();
        a.insert(FileStat::SentenceCount, StatValue::Integer(1)).unwrap();

        let mut b = StatisticIndex::new();
        b.insert(FileStat::SentenceCount, StatValue::Integer(1)).unwrap();
        b.insert(FileStat::WordCount, StatValue::Integer(3)).unwrap();

        assert_eq!(a, b);
        b.insert(FileStat::WordCount, StatValue::Integer(4)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dict_rebuild_preserves_statistics() {
        let mut index = StatisticIndex::new();
        index.insert(FileStat::LinesInFile, StatValue::Integer(12)).unwrap();
        index.insert(FileStat::AriWritingScore, StatValue::Float(3.5)).unwrap();
        index
            .insert(FileStat::TypeOfFile, StatValue::FileDomain(FileDomain::Test))
            .unwrap();

        let dict = index.to_dict();
        let rebuilt = StatisticIndex::from_dict(StatScope::File, dict).unwrap();
        assert_eq!(rebuilt, index);
    }

    #[test]
    fn test_from_dict_rejects_unknown_names() {
        let err = StatisticIndex::from_dict(
            StatScope::User,
            [("LINES_IN_FILE", StatValue::Integer(1))],
        )
        .unwrap_err();
        assert!(matches!(err, StatError::UnknownStatistic { .. }));
    }

    #[test]
    fn test_to_row_uses_display_names_for_enum_keys() {
        let mut index = StatisticIndex::new();
        let mut ratio = IndexMap::new();
        ratio.insert(CodingLanguage::Cpp, 1.0);
        index
            .insert(ProjectStat::CodingLanguageRatio, StatValue::LanguageRatio(ratio))
            .unwrap();
        index
            .insert(
                ProjectStat::ProjectSkillsDemonstrated,
                StatValue::WeightedSkills(vec![WeightedSkill::new("Database", 1.0)]),
            )
            .unwrap();

        let row = index.to_row();
        assert_eq!(row["coding_language_ratio"], json!({ "C++": 1.0 }));
        assert_eq!(
            row["project_skills_demonstrated"],
            json!([{ "skill_name": "Database", "weight": 1.0 }])
        );
    }

    #[test]
    fn test_column_types_follow_expected_type() {
        assert_eq!(FileStat::LinesInFile.template().expected_type.column_type(), ColumnType::Integer);
        assert_eq!(FileStat::DateCreated.template().expected_type.column_type(), ColumnType::DateTime);
        assert_eq!(ProjectStat::AuthorsPerFile.template().expected_type.column_type(), ColumnType::Json);
        assert_eq!(UserStat::UserSkills.template().expected_type.column_type(), ColumnType::Json);
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref SEPARATOR_RUN: Regex = Regex::new(r"[\s_]+").unwrap();
}

/// One of the three attributes every record must carry
///
/// Header variants found in uploaded files are mapped onto these through
/// [`CanonicalField::from_header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    /// Subject (student) name
    Name,

    /// Score before teaching
    PreSummative,

    /// Score after teaching
    PostSummative,
}

impl CanonicalField {
    /// All canonical fields in output order
    pub const ALL: [CanonicalField; 3] = [
        CanonicalField::Name,
        CanonicalField::PreSummative,
        CanonicalField::PostSummative,
    ];

    /// Label used as the JSON key and in error messages
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::PreSummative => "Pre_Summative",
            CanonicalField::PostSummative => "Post_Summative",
        }
    }

    /// Map a raw header onto a canonical field
    ///
    /// Matching is case-insensitive and treats any run of whitespace and
    /// underscores as a single separator, so `" Student  Name "`,
    /// `"student_name"` and `"STUDENT_ NAME"` all resolve to [`CanonicalField::Name`].
    ///
    /// # Examples
    /// ```
    /// use score_dashboard::columns::CanonicalField;
    ///
    /// assert_eq!(CanonicalField::from_header("Pre Summative"), Some(CanonicalField::PreSummative));
    /// assert_eq!(CanonicalField::from_header("Grade"), None);
    /// ```
    pub fn from_header(header: &str) -> Option<CanonicalField> {
        match normalize_header(header).as_str() {
            "name" | "student_name" => Some(CanonicalField::Name),
            "pre_summative" => Some(CanonicalField::PreSummative),
            "post_summative" => Some(CanonicalField::PostSummative),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Trim, lowercase and collapse separator runs into `_`
pub fn normalize_header(header: &str) -> String {
    let lowered = header.trim().to_lowercase();
    SEPARATOR_RUN.replace_all(&lowered, "_").into_owned()
}

/// Column positions of the canonical fields within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub pre_summative: usize,
    pub post_summative: usize,
}

impl ColumnMap {
    /// Resolve the canonical columns of a header row
    ///
    /// The left-most header wins when several map to the same field.
    /// Headers that match nothing are ignored.
    ///
    /// # Errors
    /// * Returns the canonical fields that no header matched, in output order
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMap, Vec<CanonicalField>> {
        let mut slots: [Option<usize>; 3] = [None; 3];

        for (index, header) in headers.iter().enumerate() {
            let Some(field) = CanonicalField::from_header(header.as_ref()) else {
                continue;
            };
            let slot = &mut slots[field as usize];
            match *slot {
                Some(first) => log::debug!(
                    "header {:?} at column {} duplicates {} already taken from column {}",
                    header.as_ref(),
                    index,
                    field,
                    first
                ),
                None => *slot = Some(index),
            }
        }

        match slots {
            [Some(name), Some(pre_summative), Some(post_summative)] => Ok(ColumnMap {
                name,
                pre_summative,
                post_summative,
            }),
            _ => Err(CanonicalField::ALL
                .into_iter()
                .zip(slots)
                .filter_map(|(field, slot)| slot.is_none().then_some(field))
                .collect()),
        }
    }
}

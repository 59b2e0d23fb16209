//! Categorical code tables and label resolution.
//!
//! Each dropdown-backed field draws from a closed set of `(code, label)`
//! pairs fixed at training time. The tables are constant data built into the
//! binary: no runtime mutation, no error conditions on the forward path.
//!
//! Invariant per category: codes are unique and labels are unique. The
//! forward direction (ordered labels for rendering) uses the table directly;
//! the reverse direction (`resolve`) inverts it at submission time.

/// Identifies one categorical field's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MaritalStatus,
    /// Shared by mother's and father's qualification.
    ParentQualification,
    Occupation,
    /// Shared by the five yes/no flags.
    YesNo,
    Gender,
    Attendance,
}

impl Category {
    /// The forward `(code, label)` table, in presentation order.
    pub fn pairs(self) -> &'static [(i64, &'static str)] {
        match self {
            Category::MaritalStatus => MARITAL_STATUS,
            Category::ParentQualification => PARENT_QUALIFICATION,
            Category::Occupation => OCCUPATION,
            Category::YesNo => YES_NO,
            Category::Gender => GENDER,
            Category::Attendance => ATTENDANCE,
        }
    }

    /// Labels in fixed, deterministic presentation order.
    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        self.pairs().iter().map(|&(_, label)| label)
    }

    /// Invert a label back to its originating code.
    ///
    /// For every label produced by `labels()` this returns the exact code
    /// paired with it. An unrecognized label falls back to code 0 rather
    /// than failing. That fallback is deliberate (the UI only offers labels
    /// from the table), but it can mask a table/renderer mismatch: a drifted
    /// label would silently resolve to 0 instead of the user's choice.
    pub fn resolve(self, label: &str) -> i64 {
        self.pairs()
            .iter()
            .find(|&&(_, l)| l == label)
            .map(|&(code, _)| code)
            .unwrap_or(0)
    }

    /// Forward lookup for reporting (code -> label).
    pub fn label_for(self, code: i64) -> Option<&'static str> {
        self.pairs()
            .iter()
            .find(|&&(c, _)| c == code)
            .map(|&(_, label)| label)
    }

    /// Whether `code` appears in this category's table.
    pub fn contains_code(self, code: i64) -> bool {
        self.pairs().iter().any(|&(c, _)| c == code)
    }

    /// Human-readable category name for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Category::MaritalStatus => "Marital Status",
            Category::ParentQualification => "Parental Qualification",
            Category::Occupation => "Occupation",
            Category::YesNo => "Yes/No",
            Category::Gender => "Gender",
            Category::Attendance => "Attendance Time",
        }
    }

    /// All categories, for enumeration in reports and tests.
    pub const ALL: [Category; 6] = [
        Category::MaritalStatus,
        Category::ParentQualification,
        Category::Occupation,
        Category::YesNo,
        Category::Gender,
        Category::Attendance,
    ];
}

const MARITAL_STATUS: &[(i64, &str)] = &[
    (1, "1 – Single"),
    (2, "2 – Married"),
    (3, "3 – Widower"),
    (4, "4 – Divorced"),
    (5, "5 – Facto union"),
    (6, "6 – Legally separated"),
];

const PARENT_QUALIFICATION: &[(i64, &str)] = &[
    (1, "1 - Secondary Education - 12th Year"),
    (2, "2 - Higher Education - Bachelor's"),
    (3, "3 - Higher Education - Degree"),
    (4, "4 - Higher Education - Master's"),
    (5, "5 - Higher Education - Doctorate"),
    (6, "6 - Frequency of Higher Education"),
    (9, "9 - 12th Year - Not Completed"),
    (10, "10 - 11th Year - Not Completed"),
    (11, "11 - 7th Year (Old)"),
    (12, "12 - Other - 11th Year"),
    (13, "13 - 2nd year complementary HS"),
    (14, "14 - 10th Year"),
    (18, "18 - General commerce"),
    (19, "19 - Basic Education 3rd Cycle"),
    (20, "20 - Complementary HS"),
    (22, "22 - Technical-professional"),
    (25, "25 - Complementary HS - not concluded"),
    (26, "26 - 7th year"),
    (27, "27 - 2nd cycle general HS"),
    (29, "29 - 9th Year - Not Completed"),
    (30, "30 - 8th year"),
    (31, "31 - General Course Admin"),
    (33, "33 - Supp. Accounting/Admin"),
    (34, "34 - Unknown"),
    (35, "35 - Can't read or write"),
    (36, "36 - Can read without 4th year"),
    (37, "37 - Basic education 1st cycle"),
    (38, "38 - Basic Education 2nd Cycle"),
    (39, "39 - Technological specialization"),
    (40, "40 - Higher education - degree"),
    (41, "41 - Specialized higher studies"),
    (42, "42 - Professional higher technical"),
    (43, "43 - Master (2nd cycle)"),
    (44, "44 - Doctorate (3rd cycle)"),
];

const OCCUPATION: &[(i64, &str)] = &[
    (0, "0 - Student"),
    (1, "1 - Legislative/Directors"),
    (2, "2 - Intellectual/Scientific"),
    (3, "3 - Intermediate Technicians"),
    (4, "4 - Administrative staff"),
    (5, "5 - Personal Services/Security"),
    (6, "6 - Farmers/Skilled Ag"),
    (7, "7 - Skilled Industry/Construction"),
    (8, "8 - Installation/Machine Ops"),
    (9, "9 - Unskilled Workers"),
    (10, "10 - Armed Forces"),
    (90, "90 - Other"),
    (99, "99 - (blank)"),
    (122, "122 - Health pro"),
    (123, "123 - Teachers"),
    (125, "125 - ICT Specialists"),
    (131, "131 - Intermediate Science/Eng"),
    (132, "132 - Intermediate Health"),
    (134, "134 - Intermediate Legal/Social"),
    (141, "141 - Office workers"),
    (143, "143 - Data/Financial ops"),
    (144, "144 - Other admin"),
    (151, "151 - Personal service"),
    (152, "152 - Sellers"),
    (153, "153 - Personal care"),
    (171, "171 - Skilled construction"),
    (173, "173 - Skilled printing"),
    (175, "175 - Food/Wood/Clothing"),
    (191, "191 - Cleaning"),
    (192, "192 - Unskilled Ag"),
    (193, "193 - Unskilled Const"),
    (194, "194 - Meal prep"),
];

const YES_NO: &[(i64, &str)] = &[(1, "1 – Yes"), (0, "0 – No")];

const GENDER: &[(i64, &str)] = &[(1, "1 – Male"), (0, "0 – Female")];

const ATTENDANCE: &[(i64, &str)] = &[(1, "1 – Daytime"), (0, "0 – Evening")];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_to_their_codes() {
        for category in Category::ALL {
            for &(code, label) in category.pairs() {
                assert_eq!(
                    category.resolve(label),
                    code,
                    "label '{label}' in {category:?} did not round-trip",
                );
            }
        }
    }

    #[test]
    fn unknown_label_falls_back_to_zero() {
        for category in Category::ALL {
            assert_eq!(category.resolve("no such label"), 0);
            assert_eq!(category.resolve(""), 0);
        }
    }

    #[test]
    fn codes_and_labels_are_unique_per_category() {
        for category in Category::ALL {
            let pairs = category.pairs();
            for (i, &(code_a, label_a)) in pairs.iter().enumerate() {
                for &(code_b, label_b) in &pairs[i + 1..] {
                    assert_ne!(code_a, code_b, "duplicate code in {category:?}");
                    assert_ne!(label_a, label_b, "duplicate label in {category:?}");
                }
            }
        }
    }

    #[test]
    fn label_for_inverts_resolve() {
        for category in Category::ALL {
            for &(code, label) in category.pairs() {
                assert_eq!(category.label_for(code), Some(label));
            }
        }
    }

    #[test]
    fn labels_iterate_in_table_order() {
        let labels: Vec<_> = Category::YesNo.labels().collect();
        assert_eq!(labels, vec!["1 – Yes", "0 – No"]);

        let first = Category::Occupation.labels().next();
        assert_eq!(first, Some("0 - Student"));
    }

    #[test]
    fn marital_status_covers_codes_one_through_six() {
        let codes: Vec<i64> = Category::MaritalStatus
            .pairs()
            .iter()
            .map(|&(c, _)| c)
            .collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6]);
    }
}

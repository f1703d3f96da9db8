//! Lookup tables for abbreviations, reporters, courts, and signals.
//!
//! The maps are built at compile time with `phf`. Tables whose order matters
//! (the state reporter table and the signal list) are plain slices so that
//! lookups walk them in a fixed priority order.

use phf::phf_map;

/// Month abbreviations used inside date parentheticals.
pub static MONTHS: phf::Map<&'static str, &'static str> = phf_map! {
    "January" => "Jan.",
    "February" => "Feb.",
    "March" => "Mar.",
    "April" => "Apr.",
    "May" => "May",
    "June" => "June",
    "July" => "July",
    "August" => "Aug.",
    "September" => "Sept.",
    "October" => "Oct.",
    "November" => "Nov.",
    "December" => "Dec.",
};

/// Journal abbreviations.
///
/// Keys are title-cased (every word capitalized, including "Of" and "And")
/// because matched journal names are title-cased before lookup.
pub static JOURNALS: phf::Map<&'static str, &'static str> = phf_map! {
    "Harvard Law Review" => "Harv. L. Rev.",
    "Yale Law Journal" => "Yale L.J.",
    "Columbia Law Review" => "Colum. L. Rev.",
    "Stanford Law Review" => "Stan. L. Rev.",
    "University Of Chicago Law Review" => "U. Chi. L. Rev.",
    "University Of Pennsylvania Law Review" => "U. Pa. L. Rev.",
    "Michigan Law Review" => "Mich. L. Rev.",
    "California Law Review" => "Calif. L. Rev.",
    "Virginia Law Review" => "Va. L. Rev.",
    "Texas Law Review" => "Tex. L. Rev.",
    "Georgetown Law Journal" => "Geo. L.J.",
    "Cornell Law Review" => "Cornell L. Rev.",
    "Duke Law Journal" => "Duke L.J.",
    "Northwestern University Law Review" => "Nw. U. L. Rev.",
    "New York University Law Review" => "N.Y.U. L. Rev.",
    "Ucla Law Review" => "UCLA L. Rev.",
    "Vanderbilt Law Review" => "Vand. L. Rev.",
    "Minnesota Law Review" => "Minn. L. Rev.",
    "Notre Dame Law Review" => "Notre Dame L. Rev.",
    "Boston University Law Review" => "B.U. L. Rev.",
    "Iowa Law Review" => "Iowa L. Rev.",
    "William And Mary Law Review" => "Wm. & Mary L. Rev.",
    "Journal Of Legal Studies" => "J. Legal Stud.",
    "Supreme Court Review" => "Sup. Ct. Rev.",
    "American Bar Association Journal" => "A.B.A. J.",
};

/// Reporters a case citation may cite.
///
/// The grammar builds its reporter alternation from this list sorted
/// longest-first, so that "F. Supp. 2d" is never read as "F.".
pub const REPORTERS: &[&str] = &[
    // Supreme Court
    "U.S.",
    "S. Ct.",
    "L. Ed.",
    "L. Ed. 2d",
    // Courts of appeals
    "F.",
    "F.2d",
    "F.3d",
    "F.4th",
    "F. App'x",
    // District courts
    "F. Supp.",
    "F. Supp. 2d",
    "F. Supp. 3d",
    "F.R.D.",
    "B.R.",
    // Specialized federal courts
    "Fed. Cl.",
    "Ct. Cl.",
    "T.C.",
    "M.J.",
    "Vet. App.",
    // California
    "Cal.",
    "Cal. 2d",
    "Cal. 3d",
    "Cal. 4th",
    "Cal. 5th",
    "Cal. App.",
    "Cal. App. 2d",
    "Cal. App. 3d",
    "Cal. App. 4th",
    "Cal. App. 5th",
    "Cal. Rptr.",
    "Cal. Rptr. 2d",
    "Cal. Rptr. 3d",
    // New York
    "N.Y.",
    "N.Y.2d",
    "N.Y.3d",
    "N.Y.S.",
    "N.Y.S.2d",
    "N.Y.S.3d",
    "A.D.",
    "A.D.2d",
    "A.D.3d",
    "Misc.",
    "Misc. 2d",
    "Misc. 3d",
    // Other official state reporters
    "Mass.",
    "Mass. App. Ct.",
    "Ill.",
    "Ill. 2d",
    "Ohio St.",
    "Ohio St. 2d",
    "Ohio St. 3d",
    "Pa.",
    "N.J.",
    "Wash.",
    "Wash. 2d",
    "Tex.",
    // Regional reporters
    "A.",
    "A.2d",
    "A.3d",
    "N.E.",
    "N.E.2d",
    "N.E.3d",
    "N.W.",
    "N.W.2d",
    "P.",
    "P.2d",
    "P.3d",
    "S.E.",
    "S.E.2d",
    "S.W.",
    "S.W.2d",
    "S.W.3d",
    "So.",
    "So. 2d",
    "So. 3d",
];

/// Reporters allowed for each federal court level.
pub static COURT_REPORTERS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "Supreme Court" => &["U.S.", "S. Ct.", "L. Ed.", "L. Ed. 2d"],
    "Court of Federal Claims" => &["Fed. Cl.", "Ct. Cl."],
    "Tax Court" => &["T.C."],
    "Court of Appeals" => &["F.", "F.2d", "F.3d", "F.4th", "F. App'x"],
    "District Courts" => &["F. Supp.", "F. Supp. 2d", "F. Supp. 3d", "F.R.D.", "B.R."],
    "Military Service" => &["M.J."],
    "Veterans' Appeals" => &["Vet. App."],
};

/// Reporters allowed for each state court level, in lookup order.
pub const STATE_REPORTERS: &[(&str, &[&str])] = &[
    (
        "California Appellate",
        &[
            "Cal. App.",
            "Cal. App. 2d",
            "Cal. App. 3d",
            "Cal. App. 4th",
            "Cal. App. 5th",
        ],
    ),
    (
        "California",
        &[
            "Cal.",
            "Cal. 2d",
            "Cal. 3d",
            "Cal. 4th",
            "Cal. 5th",
            "Cal. Rptr.",
            "Cal. Rptr. 2d",
            "Cal. Rptr. 3d",
        ],
    ),
    ("New York Appellate", &["N.Y.2d", "N.Y.3d"]),
    (
        "New York",
        &[
            "N.Y.",
            "N.Y.S.",
            "N.Y.S.2d",
            "N.Y.S.3d",
            "A.D.",
            "A.D.2d",
            "A.D.3d",
            "Misc.",
            "Misc. 2d",
            "Misc. 3d",
        ],
    ),
    ("Massachusetts", &["Mass.", "Mass. App. Ct."]),
    ("Illinois", &["Ill.", "Ill. 2d"]),
    ("Ohio", &["Ohio St.", "Ohio St. 2d", "Ohio St. 3d"]),
    ("Pennsylvania", &["Pa."]),
    ("New Jersey", &["N.J."]),
    ("Washington", &["Wash.", "Wash. 2d"]),
    ("Texas", &["Tex."]),
    ("Atlantic Region", &["A.", "A.2d", "A.3d"]),
    ("North Eastern Region", &["N.E.", "N.E.2d", "N.E.3d"]),
    ("North Western Region", &["N.W.", "N.W.2d"]),
    ("Pacific Region", &["P.", "P.2d", "P.3d"]),
    ("South Eastern Region", &["S.E.", "S.E.2d"]),
    ("South Western Region", &["S.W.", "S.W.2d", "S.W.3d"]),
    ("Southern Region", &["So.", "So. 2d", "So. 3d"]),
];

/// Introductory signals, in the order they are tried.
///
/// Longer signals come before the signals they start with ("See also" before
/// "See").
pub const SIGNALS: &[&str] = &[
    "See generally, e.g.,",
    "See generally",
    "See also, e.g.,",
    "See also",
    "See, e.g.,",
    "But see, e.g.,",
    "But see",
    "But cf., e.g.,",
    "But cf.",
    "See",
    "Cf., e.g.,",
    "Cf.",
    "Compare",
    "Contra",
    "Accord",
    "E.g.,",
];

/// Explanatory phrases that are always emphasized.
pub const EXPLANATORY_PHRASES: &[&str] = &["aff’d", "aff'd", "overruled by", "as quoted in"];

/// Party-name word abbreviations.
pub static WORD_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "Administration" => "Admin.",
    "Administrative" => "Admin.",
    "Association" => "Ass'n",
    "Authority" => "Auth.",
    "Board" => "Bd.",
    "Brothers" => "Bros.",
    "Commission" => "Comm'n",
    "Committee" => "Comm.",
    "Community" => "Cmty.",
    "Company" => "Co.",
    "Corporation" => "Corp.",
    "County" => "Cnty.",
    "Department" => "Dep't",
    "District" => "Dist.",
    "Education" => "Educ.",
    "Environmental" => "Env't",
    "Federal" => "Fed.",
    "Government" => "Gov't",
    "Hospital" => "Hosp.",
    "Incorporated" => "Inc.",
    "Insurance" => "Ins.",
    "International" => "Int'l",
    "Justice" => "Just.",
    "Limited" => "Ltd.",
    "Manufacturing" => "Mfg.",
    "National" => "Nat'l",
    "Railroad" => "R.R.",
    "Railway" => "Ry.",
    "Services" => "Servs.",
    "Transportation" => "Transp.",
    "University" => "Univ.",
};

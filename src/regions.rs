/// Shipping region directory
///
/// Ordered list of region codes and display names offered by the shipping
/// step's state selector.

/// A single selectable shipping region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

const fn region(code: &'static str, name: &'static str) -> Region {
    Region { code, name }
}

/// US states plus the District of Columbia, ordered by display name
pub const STATES: &[Region] = &[
    region("AL", "Alabama"),
    region("AK", "Alaska"),
    region("AZ", "Arizona"),
    region("AR", "Arkansas"),
    region("CA", "California"),
    region("CO", "Colorado"),
    region("CT", "Connecticut"),
    region("DE", "Delaware"),
    region("DC", "District Of Columbia"),
    region("FL", "Florida"),
    region("GA", "Georgia"),
    region("HI", "Hawaii"),
    region("ID", "Idaho"),
    region("IL", "Illinois"),
    region("IN", "Indiana"),
    region("IA", "Iowa"),
    region("KS", "Kansas"),
    region("KY", "Kentucky"),
    region("LA", "Louisiana"),
    region("ME", "Maine"),
    region("MD", "Maryland"),
    region("MA", "Massachusetts"),
    region("MI", "Michigan"),
    region("MN", "Minnesota"),
    region("MS", "Mississippi"),
    region("MO", "Missouri"),
    region("MT", "Montana"),
    region("NE", "Nebraska"),
    region("NV", "Nevada"),
    region("NH", "New Hampshire"),
    region("NJ", "New Jersey"),
    region("NM", "New Mexico"),
    region("NY", "New York"),
    region("NC", "North Carolina"),
    region("ND", "North Dakota"),
    region("OH", "Ohio"),
    region("OK", "Oklahoma"),
    region("OR", "Oregon"),
    region("PA", "Pennsylvania"),
    region("RI", "Rhode Island"),
    region("SC", "South Carolina"),
    region("SD", "South Dakota"),
    region("TN", "Tennessee"),
    region("TX", "Texas"),
    region("UT", "Utah"),
    region("VT", "Vermont"),
    region("VA", "Virginia"),
    region("WA", "Washington"),
    region("WV", "West Virginia"),
    region("WI", "Wisconsin"),
    region("WY", "Wyoming"),
];

/// Check whether `code` is one of the selectable region codes (exact match)
pub fn is_known_code(code: &str) -> bool {
    find(code).is_some()
}

/// Look up a region by code
pub fn find(code: &str) -> Option<&'static Region> {
    STATES.iter().find(|region| region.code == code)
}

/// Display name for a region code, if known
pub fn display_name(code: &str) -> Option<&'static str> {
    find(code).map(|region| region.name)
}

use crate::config::EndpointsConfig;

/// An autocomplete input of the detailed search form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    College,
    City,
    Program,
}

impl SearchField {
    /// Form order, also the Tab cycle order
    pub const ALL: [SearchField; 3] = [SearchField::College, SearchField::City, SearchField::Program];

    pub fn index(self) -> usize {
        match self {
            SearchField::College => 0,
            SearchField::City => 1,
            SearchField::Program => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Title shown on the input border
    pub fn label(self) -> &'static str {
        match self {
            SearchField::College => "College Name",
            SearchField::City => "City",
            SearchField::Program => "Program",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SearchField::College => "College Name",
            SearchField::City => "City",
            SearchField::Program => "Program of Study (e.g., Computer Science)",
        }
    }

    /// Autocomplete endpoint path relative to the backend base URL
    pub fn endpoint(self, endpoints: &EndpointsConfig) -> &str {
        match self {
            SearchField::College => &endpoints.college,
            SearchField::City => &endpoints.city,
            SearchField::Program => &endpoints.program,
        }
    }
}

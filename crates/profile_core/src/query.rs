use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Affiliation {
    Guelph,
    Conestoga,
    Laurier,
    #[default]
    Waterloo,
}

impl Affiliation {
    pub const ALL: [Affiliation; 4] = [
        Affiliation::Guelph,
        Affiliation::Conestoga,
        Affiliation::Laurier,
        Affiliation::Waterloo,
    ];

    /// Value sent as `university` in the search request.
    pub fn wire_value(self) -> &'static str {
        match self {
            Affiliation::Guelph => "Guelph",
            Affiliation::Conestoga => "Conestoga",
            Affiliation::Laurier => "Laurier",
            Affiliation::Waterloo => "Waterloo",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            Affiliation::Guelph => "University of Guelph",
            Affiliation::Conestoga => "Conestoga College",
            Affiliation::Laurier => "Wilfrid Laurier University",
            Affiliation::Waterloo => "University of Waterloo",
        }
    }

    /// Case-insensitive lookup by wire value.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.wire_value().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CareerStage {
    Bachelors,
    Masters,
    #[default]
    PhD,
    Alumni,
}

impl CareerStage {
    pub const ALL: [CareerStage; 4] = [
        CareerStage::Bachelors,
        CareerStage::Masters,
        CareerStage::PhD,
        CareerStage::Alumni,
    ];

    /// Value sent as `degree_status` in the search request.
    pub fn wire_value(self) -> &'static str {
        match self {
            CareerStage::Bachelors => "Bachelor's",
            CareerStage::Masters => "Master's",
            CareerStage::PhD => "PhD",
            CareerStage::Alumni => "Alumni",
        }
    }

    pub fn long_label(self) -> &'static str {
        match self {
            CareerStage::Bachelors => "Bachelor's student",
            CareerStage::Masters => "Master's student",
            CareerStage::PhD => "PhD student",
            CareerStage::Alumni => "Graduated",
        }
    }

    /// Case-insensitive lookup by wire value. The apostrophe is optional so
    /// terminal users can type `bachelors`.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted: String = raw.trim().chars().filter(|c| *c != '\'').collect();
        Self::ALL.into_iter().find(|candidate| {
            let wire: String = candidate
                .wire_value()
                .chars()
                .filter(|c| *c != '\'')
                .collect();
            wire.eq_ignore_ascii_case(&wanted)
        })
    }
}

impl fmt::Display for CareerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Form fields as edited by the operator. Persist across searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchInputs {
    pub name: String,
    pub affiliation: Affiliation,
    pub stage: CareerStage,
}

impl SearchInputs {
    /// Validates the form. The name is the only free-text field; the other
    /// two are closed sets and always valid.
    pub fn validate(&self) -> Result<SearchQuery, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(SearchQuery {
            name: name.to_string(),
            affiliation: self.affiliation,
            stage: self.stage,
        })
    }
}

/// A validated search ready to be sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    pub affiliation: Affiliation,
    pub stage: CareerStage,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a student name")]
    NameRequired,
}
